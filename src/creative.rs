//! One creative, end to end: crop, plan the band, fit the headline, compose.

use image::{DynamicImage, RgbImage};

use crate::compose::{BrandSpec, Compositor};
use crate::config::EngineConfig;
use crate::crop::Cropper;
use crate::geometry::Ratio;
use crate::text::{FontProvider, TextFitter};

/// Runs the crop, fit and compose stages for one `(image, ratio)` pair.
///
/// Holds no per-render state, so one renderer can serve parallel calls.
#[derive(Debug, Clone, Default)]
pub struct CreativeRenderer {
    cropper: Cropper,
    fitter: TextFitter,
    compositor: Compositor,
}

impl CreativeRenderer {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cropper: Cropper::new(config.crop),
            fitter: TextFitter::new(config.fit),
            compositor: Compositor::new(config.band),
        }
    }

    pub fn cropper(&self) -> &Cropper {
        &self.cropper
    }

    pub fn fitter(&self) -> &TextFitter {
        &self.fitter
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Render `headline` and `brand` over `image` cropped to `ratio`.
    #[tracing::instrument(skip_all, fields(ratio = %ratio))]
    pub fn render<P: FontProvider + ?Sized>(
        &self,
        image: &DynamicImage,
        ratio: Ratio,
        headline: &str,
        brand: &BrandSpec,
        fonts: &P,
    ) -> RgbImage {
        let cropped = self.cropper.crop(image, ratio);
        let (width, height) = (cropped.width(), cropped.height());

        let plan = self.compositor.plan(width, height, brand);
        let aspect = width as f64 / height.max(1) as f64;
        let layout = self.fitter.fit(
            headline,
            fonts,
            plan.text_box.width,
            plan.text_box.height,
            aspect,
        );
        tracing::debug!(
            width,
            height,
            font_size = layout.font_size,
            lines = layout.lines.len(),
            logo = plan.logo.is_some(),
            "rendered creative"
        );

        self.compositor.compose_planned(&cropped, &plan, &layout, fonts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::bitmap::BitmapFontProvider;
    use image::Rgb;

    #[test]
    fn test_render_matches_ratio() {
        let renderer = CreativeRenderer::default();
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(1200, 1200, Rgb([120, 80, 40])));
        let brand = BrandSpec::default();

        let wide = renderer.render(&image, Ratio::LANDSCAPE_16_9, "Sale", &brand, &BitmapFontProvider);
        assert_eq!(wide.dimensions(), (1200, 675));

        let tall = renderer.render(&image, Ratio::PORTRAIT_9_16, "Sale", &brand, &BitmapFontProvider);
        assert_eq!(tall.dimensions(), (675, 1200));

        let square = renderer.render(&image, Ratio::SQUARE, "Sale", &brand, &BitmapFontProvider);
        assert_eq!(square.dimensions(), (1200, 1200));
    }

    #[test]
    fn test_new_hands_each_stage_its_section() {
        let mut config = EngineConfig::default();
        config.crop.lower_bias = 0.2;
        config.fit.max_lines = 2;
        config.band.logo_min_px = 32;

        let renderer = CreativeRenderer::new(config.clone());
        assert_eq!(renderer.cropper().config(), &config.crop);
        assert_eq!(renderer.fitter().config(), &config.fit);
        assert_eq!(renderer.compositor().config(), &config.band);
    }

    #[test]
    fn test_render_config_is_applied() {
        let mut config = EngineConfig::default();
        config.band.default_fill = [255, 0, 0, 255];
        let renderer = CreativeRenderer::new(config);
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 400, Rgb([0, 0, 0])));

        let out = renderer.render(&image, Ratio::SQUARE, "", &BrandSpec::default(), &BitmapFontProvider);
        assert_eq!(out.get_pixel(200, 399), &Rgb([255, 0, 0]));
        assert_eq!(out.get_pixel(200, 0), &Rgb([0, 0, 0]));
    }
}
