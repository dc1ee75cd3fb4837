//! Post-processing of rendered images.
//!
//! Decodes the backend output, resizes it to the in-game target size with
//! a Lanczos filter and re-encodes it as RGBA PNG.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use scw_core::settings::RenderProfile;

/// Errors from image post-processing.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Failed to decode rendered image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Invalid target size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Resize `bytes` to exactly `width` x `height` and return PNG bytes.
pub fn postprocess(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ProcessError> {
    if width == 0 || height == 0 {
        return Err(ProcessError::InvalidSize { width, height });
    }

    let source = image::load_from_memory(bytes).map_err(ProcessError::Decode)?;
    let resized = if source.width() == width && source.height() == height {
        source
    } else {
        source.resize_exact(width, height, FilterType::Lanczos3)
    };

    let rgba = DynamicImage::ImageRgba8(resized.into_rgba8());
    let mut out = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(ProcessError::Encode)?;

    tracing::trace!(width, height, bytes = out.len(), "Post-processed image");
    Ok(out)
}

/// [`postprocess`] to the profile's target size.
pub fn postprocess_for(bytes: &[u8], profile: &RenderProfile) -> Result<Vec<u8>, ProcessError> {
    postprocess(bytes, profile.target_width, profile.target_height)
}
