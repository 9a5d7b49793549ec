//! Logo decoding, validation and scaling.
//!
//! Every step is fallible and reported as a `Result`; the compositor treats
//! any failure as "no logo".

use image::{DynamicImage, RgbaImage, imageops};

use crate::error::{HeadlinerError, Result};

/// Decode logo bytes in any format the `image` crate recognizes.
pub fn decode_logo(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| HeadlinerError::LogoDecode(e.to_string()))
}

/// Reject logos smaller than `min_px` in either dimension.
pub fn check_logo(logo: &DynamicImage, min_px: u32) -> Result<()> {
    let (width, height) = (logo.width(), logo.height());
    if width < min_px || height < min_px {
        return Err(HeadlinerError::LogoTooSmall {
            width,
            height,
            min: min_px,
        });
    }
    Ok(())
}

/// True if `bytes` decode to a logo of at least `min_px` square.
pub fn has_logo(bytes: &[u8], min_px: u32) -> bool {
    decode_logo(bytes)
        .and_then(|logo| check_logo(&logo, min_px))
        .is_ok()
}

/// Resize to `target_height`, preserving aspect ratio.
pub fn scale_to_height(logo: &DynamicImage, target_height: u32) -> RgbaImage {
    let rgba = logo.to_rgba8();
    let scale = target_height as f64 / rgba.height().max(1) as f64;
    let width = ((rgba.width() as f64 * scale) as u32).max(1);
    imageops::resize(&rgba, width, target_height.max(1), imageops::FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_logo(b"definitely not an image").unwrap_err();
        assert!(matches!(err, HeadlinerError::LogoDecode(_)));
    }

    #[test]
    fn test_has_logo_threshold() {
        assert!(!has_logo(&png_bytes(10, 10), 64));
        assert!(!has_logo(&png_bytes(200, 40), 64));
        assert!(has_logo(&png_bytes(64, 64), 64));
        assert!(!has_logo(b"garbage", 64));
    }

    #[test]
    fn test_check_logo_reports_size() {
        let logo = decode_logo(&png_bytes(10, 10)).unwrap();
        match check_logo(&logo, 64) {
            Err(HeadlinerError::LogoTooSmall { width, height, min }) => {
                assert_eq!((width, height, min), (10, 10, 64));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_scale_to_height_keeps_aspect() {
        let logo = decode_logo(&png_bytes(200, 100)).unwrap();
        let scaled = scale_to_height(&logo, 160);
        assert_eq!(scaled.dimensions(), (320, 160));
    }
}
