//! # Engine Configuration
//!
//! Every tuned constant used by the cropper, the text fitter and the
//! compositor lives here, grouped per component. Defaults reproduce the
//! shipped creative look; a JSON file may override any subset of keys.
//!
//! ## Usage
//!
//! ```
//! use headliner::config::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str(r#"{ "fit": { "max_lines": 2 } }"#).unwrap();
//! assert_eq!(config.fit.max_lines, 2);
//! assert_eq!(config.fit.min_font_size, 18);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HeadlinerError, Result};

/// Complete configuration for one render engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub crop: CropConfig,
    pub fit: FitConfig,
    pub band: BandConfig,
}

impl EngineConfig {
    /// Load a (possibly partial) configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| HeadlinerError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Saliency crop search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Ratios closer than this are treated as already matching.
    pub ratio_epsilon: f64,
    /// Smallest slide step in pixels.
    pub min_step: u32,
    /// Slide step is `dimension / step_divisor` when larger than `min_step`.
    pub step_divisor: u32,
    /// Scoring samples at most this many points per axis.
    pub sample_grid: u32,
    /// Score multiplier slope favoring windows that end lower in the source.
    pub lower_bias: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            ratio_epsilon: 1e-6,
            min_step: 8,
            step_divisor: 80,
            sample_grid: 40,
            lower_bias: 0.05,
        }
    }
}

/// Headline fitting parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Usability floor for the binary search.
    pub min_font_size: u32,
    /// Size used when nothing fits.
    pub fallback_font_size: u32,
    /// Line limit used when nothing fits.
    pub fallback_lines: usize,
    /// Highest line count the fitter escalates to.
    pub max_lines: usize,
    /// Upper bound on binary-search probes per line count.
    pub max_probes: u32,
    /// Stroke width as a fraction of font size.
    pub stroke_ratio: f64,
    pub min_stroke: u32,
    /// Line pitch as a multiple of the measured line height.
    pub line_spacing: f64,
    /// Fraction of the box width lines may occupy.
    pub width_fit: f64,
    /// Fraction of the box height the block may occupy.
    pub height_fit: f64,
    /// Search ceiling as a fraction of the per-line height budget.
    pub line_height_cap: f64,
    /// Same as `line_height_cap`, for tall creatives.
    pub tall_line_height_cap: f64,
    /// Aspect at or above which one line is preferred.
    pub wide_threshold: f64,
    /// Aspect below which three lines are preferred.
    pub narrow_threshold: f64,
    /// Aspect at or below which `tall_line_height_cap` applies.
    pub tall_threshold: f64,
    /// String measured to obtain line height.
    pub metrics_sample: String,
    pub ellipsis: String,
    /// Reject sizes at which words are dropped at the line limit.
    pub require_complete: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            min_font_size: 18,
            fallback_font_size: 20,
            fallback_lines: 3,
            max_lines: 3,
            max_probes: 14,
            stroke_ratio: 0.07,
            min_stroke: 2,
            line_spacing: 1.1,
            width_fit: 0.94,
            height_fit: 0.94,
            line_height_cap: 0.80,
            tall_line_height_cap: 0.95,
            wide_threshold: 1.4,
            narrow_threshold: 0.9,
            tall_threshold: 0.8,
            metrics_sample: "Ag".to_string(),
            ellipsis: "\u{2026}".to_string(),
            require_complete: false,
        }
    }
}

impl FitConfig {
    /// Stroke width for a font size.
    pub fn stroke_for(&self, font_size: u32) -> u32 {
        ((font_size as f64 * self.stroke_ratio) as u32).max(self.min_stroke)
    }
}

/// Per-aspect-class values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerAspect {
    pub wide: f64,
    pub tall: f64,
    pub square: f64,
}

/// Brand band and logo placement parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    /// Aspect at or above which a creative is wide.
    pub wide_threshold: f64,
    /// Aspect at or below which a creative is tall.
    pub tall_threshold: f64,
    /// Band height as a fraction of image height.
    pub band_height: PerAspect,
    /// Text box height as a fraction of band height.
    pub text_height: PerAspect,
    /// Logo height as a fraction of band height, capped at band height minus `logo_margin`.
    pub logo_height: PerAspect,
    pub logo_margin: u32,
    /// Logos smaller than this in either dimension are ignored.
    pub logo_min_px: u32,
    /// Margins as fractions of image width.
    pub left_margin: f64,
    pub right_margin: f64,
    pub min_text_width: u32,
    pub default_fill: [u8; 4],
    /// Alpha applied to the brand color fill.
    pub brand_alpha: u8,
    pub text_fill: [u8; 4],
    pub stroke_fill: [u8; 4],
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            wide_threshold: 1.4,
            tall_threshold: 0.8,
            band_height: PerAspect {
                wide: 0.18,
                tall: 0.22,
                square: 0.20,
            },
            text_height: PerAspect {
                wide: 0.82,
                tall: 0.88,
                square: 0.88,
            },
            logo_height: PerAspect {
                wide: 1.10,
                tall: 0.80,
                square: 0.80,
            },
            logo_margin: 2,
            logo_min_px: 64,
            left_margin: 0.06,
            right_margin: 0.04,
            min_text_width: 80,
            default_fill: [0, 0, 0, 190],
            brand_alpha: 200,
            text_fill: [255, 255, 255, 255],
            stroke_fill: [0, 0, 0, 220],
        }
    }
}
