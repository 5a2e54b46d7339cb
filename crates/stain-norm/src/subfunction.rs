//! Uniform interface for image-to-image processing steps.

use stain_core::{ImageData, Result};

use crate::reinhard::StainNormalization;

/// An image-to-image step that can be chained with others.
///
/// Implementors are immutable once built and may be shared across threads.
pub trait Subfunction: Send + Sync {
    /// Applies the step to `image`, producing a new image.
    fn transform(&self, image: &ImageData) -> Result<ImageData>;
}

impl Subfunction for StainNormalization {
    fn transform(&self, image: &ImageData) -> Result<ImageData> {
        StainNormalization::transform(self, image)
    }
}

/// Runs `steps` in order, feeding each output into the next step.
///
/// An empty chain returns a copy of the input.
pub fn apply_chain(steps: &[&dyn Subfunction], image: &ImageData) -> Result<ImageData> {
    let mut current = image.clone();
    for (index, step) in steps.iter().enumerate() {
        tracing::trace!(index, shape = ?current.shape(), "apply_chain");
        current = step.transform(&current)?;
    }
    Ok(current)
}
