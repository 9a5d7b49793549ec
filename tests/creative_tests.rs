//! # Creative Tests
//!
//! End-to-end checks of the public pipeline: crop, fit and compose.
//!
//! All tests use the Spleen-backed `BitmapFontProvider`, so no font files
//! are needed and text metrics are exact integers.

use headliner::compose::{BrandSpec, Compositor};
use headliner::config::EngineConfig;
use headliner::creative::CreativeRenderer;
use headliner::crop::Cropper;
use headliner::geometry::Ratio;
use headliner::text::bitmap::BitmapFontProvider;
use headliner::text::{FontFace, FontProvider, TextFitter};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use std::io::Cursor;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// 1600x1200 image: flat top, vertical red stripes in the bottom half.
/// Green encodes the row (`y / 5`) so crops can be located.
fn busy_bottom() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(1600, 1200, |x, y| {
        let red = if y >= 600 && x % 2 == 0 { 255 } else { 0 };
        Rgb([red, (y / 5) as u8, 0])
    }))
}

fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

fn png_logo(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([0, 255, 0, 255]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

// ============================================================================
// PIPELINE
// ============================================================================

#[test]
fn test_default_ratios_have_expected_dimensions() {
    let renderer = CreativeRenderer::default();
    let image = busy_bottom();
    let brand = BrandSpec::new(vec!["#0055AA".to_string()]);

    let dims: Vec<(u32, u32)> = [Ratio::SQUARE, Ratio::PORTRAIT_9_16, Ratio::LANDSCAPE_16_9]
        .into_iter()
        .map(|ratio| {
            renderer
                .render(&image, ratio, "Summer sale", &brand, &BitmapFontProvider)
                .dimensions()
        })
        .collect();

    assert_eq!(dims, vec![(1200, 1200), (675, 1200), (1600, 900)]);
}

#[test]
fn test_landscape_crop_keeps_busy_region() {
    let renderer = CreativeRenderer::default();
    let out = renderer.render(
        &busy_bottom(),
        Ratio::LANDSCAPE_16_9,
        "Summer sale",
        &BrandSpec::default(),
        &BitmapFontProvider,
    );

    // Window starts at row 300, whose green value is 60.
    assert_eq!(out.get_pixel(0, 0), &Rgb([0, 60, 0]));
}

#[test]
fn test_render_is_deterministic() {
    let renderer = CreativeRenderer::default();
    let image = busy_bottom();
    let brand = BrandSpec::new(vec!["#FF8800".to_string()]).with_logo_bytes(&png_logo(300, 150));

    let a = renderer.render(&image, Ratio::SQUARE, "Fresh deals every day", &brand, &BitmapFontProvider);
    let b = renderer.render(&image, Ratio::SQUARE, "Fresh deals every day", &brand, &BitmapFontProvider);
    assert!(a.as_raw() == b.as_raw(), "renders differ");
}

#[test]
fn test_logo_is_drawn_inside_band() {
    let renderer = CreativeRenderer::default();
    let image = solid(1600, 900, [0, 0, 0]);
    let brand = BrandSpec::default().with_logo_bytes(&png_logo(300, 150));

    let plan = renderer.compositor().plan(1600, 900, &brand);
    let logo = plan.logo.as_ref().expect("logo placed");
    let (cx, cy) = (logo.x + logo.image.width() / 2, logo.y + logo.image.height() / 2);

    let out = renderer.render(&image, Ratio::LANDSCAPE_16_9, "Hello", &brand, &BitmapFontProvider);
    let px = out.get_pixel(cx, cy);
    assert!(px[1] > 240 && px[0] < 15, "logo pixel {:?}", px);
    assert!(cy >= plan.band.y);
}

#[test]
fn test_bad_brand_inputs_degrade_gracefully() {
    let renderer = CreativeRenderer::default();
    let image = solid(800, 800, [255, 255, 255]);
    let brand = BrandSpec::new(vec!["orange".to_string()]).with_logo_bytes(b"not a png");
    assert!(brand.logo.is_none());

    let out = renderer.render(&image, Ratio::SQUARE, "", &brand, &BitmapFontProvider);
    // Default translucent black band.
    let band = out.get_pixel(400, 799);
    assert!((band[0] as i32 - 65).abs() <= 1, "band pixel {:?}", band);
}

#[test]
fn test_json_config_changes_output() {
    let config: EngineConfig =
        serde_json::from_str(r#"{ "band": { "default_fill": [0, 0, 255, 255] } }"#).unwrap();
    let renderer = CreativeRenderer::new(config);
    let out = renderer.render(
        &solid(500, 500, [0, 0, 0]),
        Ratio::SQUARE,
        "",
        &BrandSpec::default(),
        &BitmapFontProvider,
    );
    assert_eq!(out.get_pixel(10, 499), &Rgb([0, 0, 255]));
}

// ============================================================================
// STAGES
// ============================================================================

#[test]
fn test_fitted_text_respects_box() {
    let fitter = TextFitter::default();
    let compositor = Compositor::default();

    for (width, height) in [(1600, 900), (1080, 1080), (1080, 1920)] {
        let plan = compositor.plan(width, height, &BrandSpec::default());
        let layout = fitter.fit(
            "Everything must go this weekend only",
            &BitmapFontProvider,
            plan.text_box.width,
            plan.text_box.height,
            width as f64 / height as f64,
        );

        assert!(!layout.fallback);
        assert!(!layout.lines.is_empty() && layout.lines.len() <= 3);
        let face = BitmapFontProvider.face(layout.font_size);
        for line in &layout.lines {
            let measured = face.measure(line, layout.stroke_width).width as f64;
            assert!(measured <= plan.text_box.width as f64 * 0.94, "{} too wide", line);
        }
        assert!(layout.block_height() as f64 <= plan.text_box.height as f64 * 0.94);
    }
}

#[test]
fn test_tiny_box_uses_fallback() {
    let layout = TextFitter::default().fit(
        "A headline far too long for a postage stamp",
        &BitmapFontProvider,
        60,
        20,
        1.0,
    );
    assert!(layout.fallback);
    assert_eq!(layout.font_size, 20);
    assert!(layout.lines.len() <= 3);
}

#[test]
fn test_crop_matches_ratio_within_a_pixel() {
    let cropper = Cropper::default();
    let image = solid(1013, 771, [30, 30, 30]);
    for ratio in ["1:1", "9:16", "16:9", "4:5", "3:1"] {
        let ratio: Ratio = ratio.parse().unwrap();
        let out = cropper.crop(&image, ratio);
        let (w, h) = (out.width() as f64, out.height() as f64);
        let off = (h - w / ratio.target()).abs().min((w - h * ratio.target()).abs());
        assert!(
            off <= 1.0,
            "{} -> {}x{}",
            ratio,
            out.width(),
            out.height()
        );
    }
}
