//! Validation and decoding of uploaded images.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{GenericImageView, ImageFormat};
use thiserror::Error;

/// Errors for uploads that cannot be sent for analysis.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("No image data was uploaded")]
    Empty,

    #[error("Image is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("Unsupported image format: {0} (expected JPEG or PNG)")]
    UnsupportedFormat(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// A validated JPEG or PNG upload.
#[derive(Clone)]
pub struct ImageUpload {
    bytes: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl ImageUpload {
    /// Check size and format, then decode `bytes` to make sure the image is usable.
    pub fn from_bytes(bytes: Vec<u8>, limit: usize) -> Result<Self, IntakeError> {
        if bytes.is_empty() {
            return Err(IntakeError::Empty);
        }
        if bytes.len() > limit {
            return Err(IntakeError::TooLarge {
                size: bytes.len(),
                limit,
            });
        }

        let format = image::guess_format(&bytes)
            .map_err(|_| IntakeError::UnsupportedFormat("unknown".to_string()))?;
        if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
            return Err(IntakeError::UnsupportedFormat(format!("{:?}", format)));
        }

        let decoded = image::load_from_memory_with_format(&bytes, format)?;
        let (width, height) = decoded.dimensions();

        tracing::debug!(?format, width, height, size = bytes.len(), "Accepted image upload");

        Ok(Self {
            bytes,
            format,
            width,
            height,
        })
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Short lowercase format name, e.g. `"png"`.
    pub fn format_name(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "png",
            _ => "jpeg",
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Base64 payload for the upstream request.
    pub fn base64_data(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:` URL for the in-page preview.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), self.base64_data())
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.bytes.len())
            .finish()
    }
}
