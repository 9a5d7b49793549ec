//! Base image loading for the binary.
//!
//! A creative always needs some image. Callers that cannot load a usable
//! asset substitute [`placeholder`] and carry on.

use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

use crate::error::{HeadlinerError, Result};

/// Smallest accepted asset edge, in pixels.
pub const DEFAULT_MIN_ASSET_PX: u32 = 256;

/// Edge length of the default placeholder.
pub const DEFAULT_PLACEHOLDER_SIZE: u32 = 1536;

/// Neutral dark gray used for placeholders.
pub const PLACEHOLDER_COLOR: [u8; 3] = [54, 54, 60];

/// Load and decode an image, rejecting anything under `min_px` on either edge.
pub fn load_asset(path: impl AsRef<Path>, min_px: u32) -> Result<DynamicImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| HeadlinerError::Image(format!("{}: {}", path.display(), e)))?;

    if image.width() < min_px || image.height() < min_px {
        return Err(HeadlinerError::Image(format!(
            "{}: {}x{} is below the {}px minimum",
            path.display(),
            image.width(),
            image.height(),
            min_px
        )));
    }
    Ok(image)
}

/// Solid neutral image of the given size.
pub fn placeholder(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(
        width.max(1),
        height.max(1),
        Rgb(PLACEHOLDER_COLOR),
    ))
}
