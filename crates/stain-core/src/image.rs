//! Image buffer type.
//!
//! [`ImageData`] is a format-agnostic pixel container: a `height x width x
//! channels` array stored row-major with interleaved channels.
//!
//! # Memory Layout
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! Sample `(row y, column x, channel c)` lives at `(y * width + x) * channels + c`.
//!
//! # Sample Values
//!
//! Samples are raw display intensities regardless of their storage type:
//! a [`PixelData::F32`] value of `127.6` is an intensity of 127.6 on the
//! 0-255 scale, and a [`PixelData::U16`] value of `300` is out of range
//! (it will be clipped to 255), not a 16-bit fraction. This matches
//! upstream pipelines that hand over float arrays on the 8-bit scale.

use crate::{Error, Result};

/// Storage type of the samples in an [`ImageData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit unsigned integer per channel.
    U8,
    /// 16-bit unsigned integer per channel.
    U16,
    /// 32-bit float per channel.
    F32,
    /// 64-bit float per channel.
    F64,
}

impl PixelFormat {
    /// Returns bytes per channel for this format.
    pub fn bytes_per_channel(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// Returns true if this is a floating-point format.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

/// Raw sample storage.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    /// 8-bit unsigned data.
    U8(Vec<u8>),
    /// 16-bit unsigned data.
    U16(Vec<u16>),
    /// 32-bit float data.
    F32(Vec<f32>),
    /// 64-bit float data.
    F64(Vec<f64>),
}

impl PixelData {
    /// Number of samples stored.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    /// Returns `true` if no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage format of these samples.
    pub fn format(&self) -> PixelFormat {
        match self {
            Self::U8(_) => PixelFormat::U8,
            Self::U16(_) => PixelFormat::U16,
            Self::F32(_) => PixelFormat::F32,
            Self::F64(_) => PixelFormat::F64,
        }
    }

    fn get(&self, index: usize) -> Option<f64> {
        match self {
            Self::U8(v) => v.get(index).map(|&s| s as f64),
            Self::U16(v) => v.get(index).map(|&s| s as f64),
            Self::F32(v) => v.get(index).map(|&s| s as f64),
            Self::F64(v) => v.get(index).copied(),
        }
    }
}

/// Owned image buffer of `height x width x channels` samples.
///
/// Fields are private so that the sample count always matches the
/// declared dimensions.
///
/// # Example
///
/// ```rust
/// use stain_core::{ImageData, PixelFormat};
///
/// let img = ImageData::from_f32(2, 1, 3, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]).unwrap();
/// assert_eq!(img.format(), PixelFormat::F32);
/// assert_eq!(img.sample(1, 0, 2), Some(60.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    width: u32,
    height: u32,
    channels: u32,
    data: PixelData,
}

impl ImageData {
    /// Creates a zero-filled image of the given format.
    pub fn new(width: u32, height: u32, channels: u32, format: PixelFormat) -> Self {
        let size = width as usize * height as usize * channels as usize;
        let data = match format {
            PixelFormat::U8 => PixelData::U8(vec![0u8; size]),
            PixelFormat::U16 => PixelData::U16(vec![0u16; size]),
            PixelFormat::F32 => PixelData::F32(vec![0.0f32; size]),
            PixelFormat::F64 => PixelData::F64(vec![0.0f64; size]),
        };
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Creates an image from existing samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data` does not hold exactly
    /// `width * height * channels` samples.
    pub fn from_data(width: u32, height: u32, channels: u32, data: PixelData) -> Result<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!(
                    "expected {} samples for {} channels, got {}",
                    expected,
                    channels,
                    data.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Creates an image from 8-bit samples.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_data(width, height, channels, PixelData::U8(data))
    }

    /// Creates an image from 16-bit samples.
    pub fn from_u16(width: u32, height: u32, channels: u32, data: Vec<u16>) -> Result<Self> {
        Self::from_data(width, height, channels, PixelData::U16(data))
    }

    /// Creates an image from f32 samples.
    pub fn from_f32(width: u32, height: u32, channels: u32, data: Vec<f32>) -> Result<Self> {
        Self::from_data(width, height, channels, PixelData::F32(data))
    }

    /// Creates an image from f64 samples.
    pub fn from_f64(width: u32, height: u32, channels: u32, data: Vec<f64>) -> Result<Self> {
        Self::from_data(width, height, channels, PixelData::F64(data))
    }

    /// Creates an 8-bit image where every pixel equals `pixel`.
    ///
    /// The channel count is `pixel.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `pixel` is empty.
    pub fn filled_u8(width: u32, height: u32, pixel: &[u8]) -> Result<Self> {
        if pixel.is_empty() {
            return Err(Error::invalid_dimensions(width, height, "pixel has no channels"));
        }
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * pixel.len());
        for _ in 0..pixel_count {
            data.extend_from_slice(pixel);
        }
        Self::from_u8(width, height, pixel.len() as u32, data)
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Returns `(height, width, channels)`, the array shape of the buffer.
    #[inline]
    pub fn shape(&self) -> (u32, u32, u32) {
        (self.height, self.width, self.channels)
    }

    /// Returns the storage format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.data.format()
    }

    /// Returns the raw sample storage.
    #[inline]
    pub fn data(&self) -> &PixelData {
        &self.data
    }

    /// Consumes the image and returns its sample storage.
    pub fn into_data(self) -> PixelData {
        self.data
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the total number of samples (pixels * channels).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.pixel_count() * self.channels as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Borrows the samples if they are stored as 8-bit.
    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.data {
            PixelData::U8(v) => Some(v),
            _ => None,
        }
    }

    /// Returns sample `(row y, column x, channel c)` widened to f64.
    pub fn sample(&self, x: u32, y: u32, c: u32) -> Option<f64> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * self.channels as usize
            + c as usize;
        self.data.get(index)
    }

    /// Returns the RGB pixel at `(x, y)` of an 8-bit, 3-channel image.
    ///
    /// `None` for other layouts or out-of-bounds coordinates.
    pub fn pixel_u8(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let data = self.as_u8()?;
        if self.channels != 3 || x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        Some([data[offset], data[offset + 1], data[offset + 2]])
    }

    /// Clips every sample to `[0, 255]` and coerces it to 8 bits.
    ///
    /// Float samples are truncated toward zero after clipping, so `127.9`
    /// becomes `127`. NaN becomes `0`.
    ///
    /// ```rust
    /// use stain_core::ImageData;
    ///
    /// let img = ImageData::from_f32(1, 1, 3, vec![-12.0, 127.9, 300.0]).unwrap();
    /// assert_eq!(img.to_u8_clipped(), vec![0, 127, 255]);
    /// ```
    pub fn to_u8_clipped(&self) -> Vec<u8> {
        match &self.data {
            PixelData::U8(v) => v.clone(),
            PixelData::U16(v) => v.iter().map(|&s| s.min(255) as u8).collect(),
            PixelData::F32(v) => v.iter().map(|&s| clip_f64(s as f64)).collect(),
            PixelData::F64(v) => v.iter().map(|&s| clip_f64(s)).collect(),
        }
    }

    /// Coerces 1-4 channel samples to interleaved 8-bit RGB.
    ///
    /// - 1 channel (gray): replicated to R, G and B
    /// - 2 channels (gray + alpha): gray replicated, alpha dropped
    /// - 3 channels: clipped as-is
    /// - 4 channels (RGBA): alpha dropped
    ///
    /// Returns `None` for any other channel count.
    pub fn to_rgb_u8(&self) -> Option<Vec<u8>> {
        let clipped = self.to_u8_clipped();
        let channels = self.channels as usize;
        match channels {
            3 => Some(clipped),
            1 | 2 => Some(
                clipped
                    .chunks_exact(channels)
                    .flat_map(|px| [px[0], px[0], px[0]])
                    .collect(),
            ),
            4 => Some(
                clipped
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect(),
            ),
            _ => None,
        }
    }
}

#[inline]
fn clip_f64(v: f64) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.clamp(0.0, 255.0) as u8
    }
}
