//! CLI command implementations

pub mod normalize;
pub mod stats;

use anyhow::{Context, Result, bail};
use stain_core::ImageData;
use stain_norm::{ChannelStats, StainNormalization};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load image from path
pub fn load_image(path: &Path) -> Result<ImageData> {
    stain_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &ImageData) -> Result<()> {
    stain_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Builds a normalizer from a reference image or a statistics file.
pub fn load_normalizer(reference: Option<&Path>, stats: Option<&Path>) -> Result<StainNormalization> {
    match (reference, stats) {
        (Some(path), _) => StainNormalization::from_path(path)
            .with_context(|| format!("Failed to use reference: {}", path.display())),
        (None, Some(path)) => {
            let stats = ChannelStats::load(path)
                .with_context(|| format!("Failed to read statistics: {}", path.display()))?;
            StainNormalization::from_stats(stats)
                .with_context(|| format!("Invalid statistics in {}", path.display()))
        }
        (None, None) => bail!("Either a reference image or a statistics file is required"),
    }
}

/// Drops the alpha channel of RGBA inputs; other layouts pass through.
pub fn strip_alpha(image: ImageData) -> Result<ImageData> {
    if image.channels() != 4 {
        return Ok(image);
    }
    debug!(width = image.width(), height = image.height(), "dropping alpha channel");
    let rgb = image.to_rgb_u8().context("Cannot read image as RGB")?;
    Ok(ImageData::from_u8(image.width(), image.height(), 3, rgb)?)
}

/// Expands glob patterns; plain paths are kept as given.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            files.push(PathBuf::from(pattern));
            continue;
        }
        let before = files.len();
        files.extend(
            glob::glob(pattern)
                .with_context(|| format!("Invalid pattern: {}", pattern))?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file()),
        );
        if files.len() == before {
            bail!("No files match pattern: {}", pattern);
        }
    }
    Ok(files)
}

/// Output path for `input` inside `output_dir`.
///
/// Keeps the input's stem; the extension is `format` if given, else the
/// input's own, else `png`.
pub fn output_path(input: &Path, output_dir: &Path, format: Option<&str>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let ext = format.unwrap_or_else(|| input.extension().and_then(|s| s.to_str()).unwrap_or("png"));

    output_dir.join(format!("{}.{}", stem, ext.trim_start_matches('.')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_path() {
        let dir = Path::new("out");
        assert_eq!(output_path(Path::new("a/tile_01.tif"), dir, None), dir.join("tile_01.tif"));
        assert_eq!(output_path(Path::new("a/tile_01.tif"), dir, Some("png")), dir.join("tile_01.png"));
        assert_eq!(output_path(Path::new("a/tile_01.tif"), dir, Some(".jpg")), dir.join("tile_01.jpg"));
        assert_eq!(output_path(Path::new("noext"), dir, None), dir.join("noext.png"));
    }

    #[test]
    fn test_expand_inputs() {
        let dir = tempdir().unwrap();
        for name in ["a.png", "b.png", "c.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let pattern = dir.path().join("*.png").to_string_lossy().into_owned();

        let mut files = expand_inputs(&[pattern, "plain.tif".to_string()]).unwrap();
        files.sort();
        assert_eq!(files.len(), 3);
        assert!(files.contains(&dir.path().join("a.png")));
        assert!(files.contains(&dir.path().join("b.png")));
        assert!(files.contains(&PathBuf::from("plain.tif")));

        let none = dir.path().join("*.jpg").to_string_lossy().into_owned();
        assert!(expand_inputs(&[none]).is_err());
    }

    #[test]
    fn test_strip_alpha() {
        let rgba = ImageData::filled_u8(2, 1, &[1, 2, 3, 4]).unwrap();
        let rgb = strip_alpha(rgba).unwrap();
        assert_eq!(rgb.shape(), (1, 2, 3));
        assert_eq!(rgb.pixel_u8(1, 0), Some([1, 2, 3]));

        let gray = ImageData::filled_u8(2, 1, &[9]).unwrap();
        assert_eq!(strip_alpha(gray.clone()).unwrap(), gray);
    }

    #[test]
    fn test_load_normalizer_requires_source() {
        assert!(load_normalizer(None, None).is_err());
        assert!(load_normalizer(Some(Path::new("/nonexistent/ref.png")), None).is_err());
    }
}
