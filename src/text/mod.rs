//! # Headline Text
//!
//! Font capabilities, word wrapping and the size-fitting search.
//!
//! ## Modules
//!
//! - [`wrap`]: greedy word wrap with hyphenation and ellipsis truncation
//! - [`fit`]: binary search over font size and line count
//! - [`ttf`]: TrueType provider backed by ab_glyph
//! - [`bitmap`]: fixed-advance Spleen bitmap provider
//!
//! ## Usage Example
//!
//! ```
//! use headliner::config::FitConfig;
//! use headliner::text::{TextFitter, bitmap::BitmapFontProvider};
//!
//! let fitter = TextFitter::new(FitConfig::default());
//! let layout = fitter.fit("Summer sale", &BitmapFontProvider, 900, 120, 1.0);
//! assert!(!layout.lines.is_empty());
//! assert!(layout.lines.len() <= 3);
//! ```

pub mod bitmap;
pub mod fit;
pub mod ttf;
pub mod wrap;

pub use fit::{TextFitter, TextLayout};

/// Rendered extent of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

/// Anti-aliased glyph coverage for one line of text.
///
/// The line box is `height` pixels tall with the baseline at the font's
/// ascent. Coverage is 0.0 (empty) to 1.0 (fully inked).
#[derive(Debug, Clone)]
pub struct TextMask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl TextMask {
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }
}

/// A font resolved at one pixel size.
///
/// `measure` must be monotonic: for a fixed string and stroke, a larger
/// size never measures narrower. The fitter's binary search relies on it.
pub trait FontFace {
    /// Pixel size this face was resolved at.
    fn size(&self) -> u32;

    /// Extent of `text` including a stroke of `stroke` pixels on every side.
    fn measure(&self, text: &str, stroke: u32) -> TextSize;

    /// Coverage mask of `text` without stroke.
    fn rasterize(&self, text: &str) -> TextMask;
}

/// Resolves fonts by pixel size. Same size, same metrics.
pub trait FontProvider {
    type Face: FontFace;

    fn face(&self, size: u32) -> Self::Face;
}
