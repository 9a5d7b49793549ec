//! # Brand Band Composition
//!
//! Overlays a translucent band at the bottom of a cropped creative, places
//! the fitted headline inside it and an optional logo on its right edge.
//!
//! ```text
//!   ┌──────────────────────────────────────────┐
//!   │                                          │
//!   │              cropped image               │
//!   │                                          │
//!   ├──────────────────────────────────────────┤ ← band_y
//!   │ ┊ HEADLINE LINE ONE           ┊ ┌──────┐ │
//!   │ ┊ headline line two           ┊ │ logo │ │
//!   │ ┊                             ┊ └──────┘ │
//!   └──────────────────────────────────────────┘
//!     ↑ left margin    text box       ↑ logo + right margin
//! ```
//!
//! Layers are composited band, text, logo (topmost) onto a transparent
//! overlay, which is then composited over the image and flattened to RGB.
//!
//! Composition is split in two steps so the caller can fit text between
//! them: [`Compositor::plan`] derives the geometry (and needs the logo to
//! know how much width to reserve), [`Compositor::compose_planned`] renders.

pub mod band;
pub mod blend;
pub mod logo;
pub mod stroke;

use image::{DynamicImage, Rgba, RgbaImage, RgbImage};

use crate::config::{BandConfig, PerAspect};
use crate::geometry::{AspectClass, Rect};
use crate::text::{FontFace, FontProvider, TextLayout, TextMask};

pub use band::parse_hex_color;
pub use logo::{check_logo, decode_logo, has_logo};

/// Brand inputs for one creative.
#[derive(Debug, Clone, Default)]
pub struct BrandSpec {
    /// `#RRGGBB` strings; the first one tints the band.
    pub colors: Vec<String>,
    /// Decoded logo raster, if any.
    pub logo: Option<DynamicImage>,
}

impl BrandSpec {
    pub fn new(colors: Vec<String>) -> Self {
        Self { colors, logo: None }
    }

    /// Attach a logo from encoded bytes. Undecodable bytes leave the brand
    /// without a logo.
    pub fn with_logo_bytes(mut self, bytes: &[u8]) -> Self {
        match decode_logo(bytes) {
            Ok(logo) => self.logo = Some(logo),
            Err(e) => {
                tracing::warn!(error = %e, "continuing without logo");
                self.logo = None;
            }
        }
        self
    }
}

/// Logo scaled and positioned for one creative.
#[derive(Debug, Clone)]
pub struct PlacedLogo {
    pub image: RgbaImage,
    pub x: u32,
    pub y: u32,
}

/// Geometry and colors for one composition.
#[derive(Debug, Clone)]
pub struct BandPlan {
    pub width: u32,
    pub height: u32,
    pub aspect_class: AspectClass,
    pub band: Rect,
    pub fill: Rgba<u8>,
    /// Area available to the headline.
    pub text_box: Rect,
    pub logo: Option<PlacedLogo>,
}

/// Band, headline and logo compositor.
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    config: BandConfig,
}

impl Compositor {
    pub fn new(config: BandConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BandConfig {
        &self.config
    }

    pub fn aspect_class(&self, width: u32, height: u32) -> AspectClass {
        AspectClass::classify(
            width as f64 / height.max(1) as f64,
            self.config.wide_threshold,
            self.config.tall_threshold,
        )
    }

    /// Derive band, text box and logo placement for a `width × height` image.
    pub fn plan(&self, width: u32, height: u32, brand: &BrandSpec) -> BandPlan {
        let cfg = &self.config;
        let class = self.aspect_class(width, height);

        let band_h = ((height as f64 * per_aspect(&cfg.band_height, class)) as u32).clamp(1, height.max(1));
        let band_y = height.saturating_sub(band_h);
        let band = Rect {
            x: 0,
            y: band_y,
            width,
            height: band_h,
        };
        let fill = band::band_fill(&brand.colors, cfg.brand_alpha, cfg.default_fill);

        let right_margin = (width as f64 * cfg.right_margin) as u32;
        let left_margin = (width as f64 * cfg.left_margin) as u32;

        let logo = brand
            .logo
            .as_ref()
            .and_then(|logo| self.place_logo(logo, width, band, class, right_margin));
        let reserved = logo.as_ref().map_or(0, |l| l.image.width() + right_margin);

        let text_w = width
            .saturating_sub(left_margin)
            .saturating_sub(reserved)
            .saturating_sub(right_margin)
            .max(cfg.min_text_width);
        let text_h = (band_h as f64 * per_aspect(&cfg.text_height, class)) as u32;
        let text_box = Rect {
            x: left_margin,
            y: band_y + (band_h - text_h.min(band_h)) / 2,
            width: text_w,
            height: text_h,
        };

        BandPlan {
            width,
            height,
            aspect_class: class,
            band,
            fill,
            text_box,
            logo,
        }
    }

    fn place_logo(
        &self,
        logo: &DynamicImage,
        width: u32,
        band: Rect,
        class: AspectClass,
        right_margin: u32,
    ) -> Option<PlacedLogo> {
        if let Err(e) = logo::check_logo(logo, self.config.logo_min_px) {
            tracing::warn!(error = %e, "continuing without logo");
            return None;
        }

        let target_h = ((band.height as f64 * per_aspect(&self.config.logo_height, class)) as u32)
            .min(band.height.saturating_sub(self.config.logo_margin));
        if target_h == 0 {
            tracing::warn!(band_height = band.height, "band too short for a logo");
            return None;
        }

        let image = logo::scale_to_height(logo, target_h);
        let x = width.saturating_sub(right_margin).saturating_sub(image.width());
        let y = band.y + (band.height - image.height().min(band.height)) / 2;
        Some(PlacedLogo { image, x, y })
    }

    /// Plan and render in one step.
    pub fn compose<P: FontProvider + ?Sized>(
        &self,
        image: &DynamicImage,
        layout: &TextLayout,
        brand: &BrandSpec,
        fonts: &P,
    ) -> RgbImage {
        let plan = self.plan(image.width(), image.height(), brand);
        self.compose_planned(image, &plan, layout, fonts)
    }

    /// Render `plan` and `layout` over `image`. Output has the same
    /// dimensions as `image` and no alpha channel.
    pub fn compose_planned<P: FontProvider + ?Sized>(
        &self,
        image: &DynamicImage,
        plan: &BandPlan,
        layout: &TextLayout,
        fonts: &P,
    ) -> RgbImage {
        let (width, height) = (image.width(), image.height());
        let mut overlay = RgbaImage::new(width, height);

        fill_rect(&mut overlay, plan.band, plan.fill);

        if !layout.is_empty() {
            self.draw_text(&mut overlay, plan, layout, fonts);
        }

        if let Some(logo) = &plan.logo {
            for (lx, ly, px) in logo.image.enumerate_pixels() {
                let (x, y) = (logo.x + lx, logo.y + ly);
                if x < width && y < height {
                    let dst = *overlay.get_pixel(x, y);
                    overlay.put_pixel(x, y, blend::over(dst, *px, 1.0));
                }
            }
        }

        let mut base = image.to_rgba8();
        for (dst, src) in base.pixels_mut().zip(overlay.pixels()) {
            *dst = blend::over(*dst, *src, 1.0);
        }
        DynamicImage::ImageRgba8(base).to_rgb8()
    }

    /// Left-aligned lines, block vertically centered in the text box.
    fn draw_text<P: FontProvider + ?Sized>(
        &self,
        overlay: &mut RgbaImage,
        plan: &BandPlan,
        layout: &TextLayout,
        fonts: &P,
    ) {
        let face = fonts.face(layout.font_size);
        let stroke_fill = Rgba(self.config.stroke_fill);
        let text_fill = Rgba(self.config.text_fill);

        let block_h = layout.block_height() as i64;
        let top = plan.text_box.y as i64 + (plan.text_box.height as i64 - block_h) / 2;

        for (i, line) in layout.lines.iter().enumerate() {
            let glyphs = face.rasterize(line);
            let outline = stroke::dilate(&glyphs, layout.stroke_width);
            let fill = stroke::pad(&glyphs, layout.stroke_width);

            let x = plan.text_box.x as i64;
            let y = top + i as i64 * layout.line_pitch as i64;
            paint_mask(overlay, &outline, x, y, stroke_fill);
            paint_mask(overlay, &fill, x, y, text_fill);
        }
    }
}

fn per_aspect(values: &PerAspect, class: AspectClass) -> f64 {
    match class {
        AspectClass::Wide => values.wide,
        AspectClass::Tall => values.tall,
        AspectClass::Square => values.square,
    }
}

fn fill_rect(overlay: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    let x_end = rect.right().min(overlay.width());
    let y_end = rect.bottom().min(overlay.height());
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            let dst = *overlay.get_pixel(x, y);
            overlay.put_pixel(x, y, blend::over(dst, color, 1.0));
        }
    }
}

/// Composite `color` through `mask` with the mask's top-left at `(x, y)`.
/// Pixels outside the overlay are clipped.
fn paint_mask(overlay: &mut RgbaImage, mask: &TextMask, x: i64, y: i64, color: Rgba<u8>) {
    let (w, h) = (overlay.width() as i64, overlay.height() as i64);
    for my in 0..mask.height {
        let oy = y + my as i64;
        if oy < 0 || oy >= h {
            continue;
        }
        for mx in 0..mask.width {
            let ox = x + mx as i64;
            if ox < 0 || ox >= w {
                continue;
            }
            let coverage = mask.get(mx, my);
            if coverage > 0.0 {
                let dst = *overlay.get_pixel(ox as u32, oy as u32);
                overlay.put_pixel(ox as u32, oy as u32, blend::over(dst, color, coverage));
            }
        }
    }
}
