//! # Content-Aware Crop
//!
//! Crops a source image to a target aspect ratio while keeping the most
//! visually busy region.
//!
//! ## Algorithm
//!
//! 1. Build an [`EnergyMap`] (edge magnitude of the grayscale source).
//! 2. Slide a window of the target ratio along the one axis that has to
//!    shrink. A window keeps the full extent of the other axis.
//! 3. Score each window by summing energy on a sparse grid of at most
//!    `sample_grid × sample_grid` points.
//! 4. Multiply the score by `1 + lower_bias × (y1 / H)` so crops that end
//!    lower in the frame win ties against higher ones.
//! 5. Keep the first window with the highest score.
//!
//! ```text
//!   source 1600x1200, target 16:9        candidates (height 900)
//!   ┌──────────────────────┐             y0 = 0, 15, 30, ... 300
//!   │                      │             ┌──────────────────────┐
//!   │      ┌────────┐      │             │ window y0..y0+900    │
//!   │      │subject │      │             │                      │
//!   │      └────────┘      │             └──────────────────────┘
//!   └──────────────────────┘
//! ```
//!
//! Selection keeps scan order, so the result is deterministic. One crop is
//! a single-threaded computation; callers parallelize across ratios.

pub mod energy;

use image::DynamicImage;

pub use energy::EnergyMap;

use crate::config::CropConfig;
use crate::geometry::{CropWindow, Ratio};

/// Saliency-maximizing cropper.
#[derive(Debug, Clone, Default)]
pub struct Cropper {
    config: CropConfig,
}

impl Cropper {
    pub fn new(config: CropConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Crop `image` to `ratio`.
    ///
    /// Returns an unmodified copy when the image already has the target
    /// ratio, and the full image when no window of that ratio fits.
    pub fn crop(&self, image: &DynamicImage, ratio: Ratio) -> DynamicImage {
        let (width, height) = (image.width(), image.height());
        let current = width as f64 / height as f64;
        if (current - ratio.target()).abs() < self.config.ratio_epsilon {
            return image.clone();
        }

        let window = self.best_window(image, ratio);
        if window == CropWindow::full(width, height) {
            return image.clone();
        }
        image.crop_imm(window.x0, window.y0, window.width(), window.height())
    }

    /// Highest-scoring window of `ratio` inside `image`.
    pub fn best_window(&self, image: &DynamicImage, ratio: Ratio) -> CropWindow {
        let (width, height) = (image.width(), image.height());
        let candidates = self.candidates(width, height, ratio);
        if candidates.is_empty() {
            tracing::warn!(
                width,
                height,
                %ratio,
                "no crop window of the requested ratio fits; keeping full image"
            );
            return CropWindow::full(width, height);
        }

        let energy = EnergyMap::from_image(image);
        let scores: Vec<f64> = candidates
            .iter()
            .map(|window| self.score(&energy, window))
            .collect();

        let mut best = CropWindow::full(width, height);
        let mut best_score = f64::NEG_INFINITY;
        for (window, score) in candidates.iter().zip(scores) {
            if score > best_score {
                best_score = score;
                best = *window;
            }
        }

        tracing::debug!(?best, best_score, candidates = candidates.len(), "selected crop window");
        best
    }

    /// Candidate windows in scan order.
    ///
    /// Height-cropping windows (full width, sliding down) come first, then
    /// width-cropping windows (full height, sliding right). Only one of the
    /// two families is non-empty unless the ratio already matches.
    pub fn candidates(&self, width: u32, height: u32, ratio: Ratio) -> Vec<CropWindow> {
        let mut out = Vec::new();

        let crop_h = scaled(width, ratio.height(), ratio.width());
        if let Some(crop_h) = crop_h.filter(|&h| h > 0 && h <= height) {
            let step = self.step(height);
            for y0 in (0..=height - crop_h).step_by(step) {
                out.push(CropWindow {
                    x0: 0,
                    y0,
                    x1: width,
                    y1: y0 + crop_h,
                });
            }
        }

        let crop_w = scaled(height, ratio.width(), ratio.height());
        if let Some(crop_w) = crop_w.filter(|&w| w > 0 && w <= width) {
            let step = self.step(width);
            for x0 in (0..=width - crop_w).step_by(step) {
                out.push(CropWindow {
                    x0,
                    y0: 0,
                    x1: x0 + crop_w,
                    y1: height,
                });
            }
        }

        out
    }

    fn step(&self, dimension: u32) -> usize {
        self.config
            .min_step
            .max(dimension / self.config.step_divisor.max(1))
            .max(1) as usize
    }

    /// Subsampled energy sum with the lower-region bias applied.
    fn score(&self, energy: &EnergyMap, window: &CropWindow) -> f64 {
        let grid = self.config.sample_grid.max(1);
        let sx = (window.width() / grid).max(1) as usize;
        let sy = (window.height() / grid).max(1) as usize;

        let mut raw = 0.0f64;
        for y in (window.y0..window.y1).step_by(sy) {
            for x in (window.x0..window.x1).step_by(sx) {
                raw += energy.at(x, y) as f64;
            }
        }

        let bias = window.y1 as f64 / energy.height() as f64 * self.config.lower_bias;
        raw * (1.0 + bias)
    }
}

/// `value * num / den` in integer math; `None` when it exceeds `u32`.
fn scaled(value: u32, num: u32, den: u32) -> Option<u32> {
    u32::try_from(value as u64 * num as u64 / den.max(1) as u64).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Flat gray top half, 1px vertical stripes in the bottom half.
    fn busy_bottom(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if y < height / 2 {
                Rgb([128, 128, 128])
            } else if x % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_matching_ratio_is_identity() {
        let img = busy_bottom(160, 90);
        let out = Cropper::default().crop(&img, Ratio::LANDSCAPE_16_9);
        assert_eq!((out.width(), out.height()), (160, 90));
        assert_eq!(out.as_bytes(), img.as_bytes());
    }

    #[test]
    fn test_height_crop_prefers_busy_bottom() {
        let img = busy_bottom(1600, 1200);
        let cropper = Cropper::default();
        let window = cropper.best_window(&img, Ratio::LANDSCAPE_16_9);
        assert_eq!(
            window,
            CropWindow {
                x0: 0,
                y0: 300,
                x1: 1600,
                y1: 1200
            }
        );

        let out = cropper.crop(&img, Ratio::LANDSCAPE_16_9);
        assert_eq!((out.width(), out.height()), (1600, 900));
    }

    #[test]
    fn test_candidates_slide_one_axis() {
        let cropper = Cropper::default();

        let tall = cropper.candidates(1600, 1200, Ratio::LANDSCAPE_16_9);
        // step = max(8, 1200 / 80) = 15 over offsets 0..=300
        assert_eq!(tall.len(), 21);
        assert!(tall.iter().all(|w| w.x0 == 0 && w.x1 == 1600 && w.height() == 900));
        assert_eq!(tall.last().unwrap().y1, 1200);

        let wide = cropper.candidates(1200, 1200, Ratio::PORTRAIT_9_16);
        assert!(wide.iter().all(|w| w.y0 == 0 && w.y1 == 1200 && w.width() == 675));
        assert_eq!(wide[1].x0 - wide[0].x0, 15);
    }

    #[test]
    fn test_width_crop_follows_detail() {
        // Detail only in the right third.
        let img = RgbImage::from_fn(1200, 1200, |x, y| {
            if x > 800 && (x + y) % 3 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([20, 20, 20])
            }
        });
        let img = DynamicImage::ImageRgb8(img);
        let cropper = Cropper::default();
        let window = cropper.best_window(&img, Ratio::PORTRAIT_9_16);
        assert_eq!(window.width(), 675);
        assert_eq!(window.height(), 1200);
        assert!(window.x0 > 262, "expected right-leaning crop, got {:?}", window);
        assert!(window.x1 <= 1200);
    }

    #[test]
    fn test_unreachable_ratio_keeps_full_image() {
        let img = busy_bottom(100, 100);
        let cropper = Cropper::default();
        let ratio = Ratio::new(10_000, 1).unwrap();
        assert!(cropper.candidates(100, 100, ratio).is_empty());
        let out = cropper.crop(&img, ratio);
        assert_eq!((out.width(), out.height()), (100, 100));
    }

    #[test]
    fn test_oversized_window_does_not_wrap() {
        let img = busy_bottom(200, 200);
        let cropper = Cropper::default();
        // 200 * 21474837 overflows u32; only enlarging could reach this ratio.
        let ratio = Ratio::new(1, 21_474_837).unwrap();
        assert!(cropper.candidates(200, 200, ratio).is_empty());
        let out = cropper.crop(&img, ratio);
        assert_eq!((out.width(), out.height()), (200, 200));
    }

    #[test]
    fn test_crop_ratio_within_one_pixel() {
        let cropper = Cropper::default();
        for (w, h) in [(1536, 1536), (1000, 700), (333, 999), (1920, 1080)] {
            let img = busy_bottom(w, h);
            for ratio in [Ratio::SQUARE, Ratio::PORTRAIT_9_16, Ratio::LANDSCAPE_16_9] {
                let out = cropper.crop(&img, ratio);
                assert!(out.width() <= w && out.height() <= h);
                let expected_h = out.width() as f64 / ratio.target();
                let expected_w = out.height() as f64 * ratio.target();
                assert!(
                    (out.height() as f64 - expected_h).abs() <= 1.0
                        || (out.width() as f64 - expected_w).abs() <= 1.0,
                    "{}x{} -> {} gave {}x{}",
                    w,
                    h,
                    ratio,
                    out.width(),
                    out.height()
                );
            }
        }
    }
}
