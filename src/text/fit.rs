//! Fit a headline into a box by searching font size and line count.
//!
//! For each candidate line count the fitter binary-searches the largest
//! font size whose wrapped block fits the width and height budgets. Line
//! counts are tried from the preferred count (chosen from the creative's
//! aspect ratio) upwards to `max_lines`. When nothing fits, a fixed small
//! size with a three-line wrap is returned without a fit guarantee.
//!
//! ```text
//!   aspect >= 1.4  -> 1, 2, 3 lines
//!   0.9 ..< 1.4    -> 2, 3 lines
//!   aspect <  0.9  -> 3 lines
//! ```
//!
//! The size ceiling for each line count is the smaller of a per-line
//! height cap and a glyph cap: the largest size at which the widest glyph
//! plus a hyphen still fits the width budget.
//!
//! Search cost is bounded: one face for the glyph cap, at most `max_probes`
//! probes per line count, and one for the fallback.

use super::wrap::{Wrapped, wrap_to_width};
use super::{FontFace, FontProvider};
use crate::config::FitConfig;

/// Fitted headline block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    /// Lines in reading order.
    pub lines: Vec<String>,
    pub font_size: u32,
    pub stroke_width: u32,
    /// Distance between successive lines in pixels.
    pub line_pitch: u32,
    /// Produced by the absolute fallback, which carries no fit guarantee.
    pub fallback: bool,
    /// Words were dropped at the line limit.
    pub truncated: bool,
}

impl TextLayout {
    /// Height of the whole block.
    pub fn block_height(&self) -> u32 {
        self.lines.len() as u32 * self.line_pitch
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A layout measured at one probed size.
struct Probe {
    layout: TextLayout,
    widest: u32,
}

/// Binary-search headline fitter.
#[derive(Debug, Clone, Default)]
pub struct TextFitter {
    config: FitConfig,
}

impl TextFitter {
    pub fn new(config: FitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Preferred line count for a creative of `aspect` (width / height).
    pub fn preferred_lines(&self, aspect: f64) -> usize {
        let preferred = if aspect >= self.config.wide_threshold {
            1
        } else if aspect < self.config.narrow_threshold {
            3
        } else {
            2
        };
        preferred.clamp(1, self.config.max_lines.max(1))
    }

    /// Line counts in the order they are tried.
    pub fn line_counts(&self, aspect: f64) -> Vec<usize> {
        let preferred = self.preferred_lines(aspect);
        (preferred..=self.config.max_lines.max(preferred)).collect()
    }

    pub fn width_budget(&self, max_width: u32) -> u32 {
        (max_width as f64 * self.config.width_fit) as u32
    }

    pub fn height_budget(&self, max_height: u32) -> u32 {
        (max_height as f64 * self.config.height_fit) as u32
    }

    /// Font size ceiling from the per-line height budget.
    pub fn height_cap(&self, lines: usize, height_budget: u32, aspect: f64) -> u32 {
        let cap = if aspect <= self.config.tall_threshold {
            self.config.tall_line_height_cap
        } else {
            self.config.line_height_cap
        };
        (height_budget as f64 / lines.max(1) as f64 * cap) as u32
    }

    /// Largest size, up to `reference`, at which the widest glyph of `text`
    /// followed by a hyphen fits `width_budget`.
    ///
    /// Measured once at `reference` and scaled down proportionally.
    pub fn glyph_cap<P: FontProvider + ?Sized>(
        &self,
        fonts: &P,
        text: &str,
        width_budget: u32,
        reference: u32,
    ) -> u32 {
        let reference = reference.max(1);
        let face = fonts.face(reference);
        let stroke = self.config.stroke_for(reference);

        let mut probe = String::with_capacity(8);
        let widest = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|ch| {
                probe.clear();
                probe.push(ch);
                probe.push('-');
                face.measure(&probe, stroke).width
            })
            .max()
            .unwrap_or(0);

        if widest <= width_budget {
            reference
        } else {
            (reference as u64 * width_budget as u64 / widest as u64) as u32
        }
    }

    /// Inclusive font size range searched for `lines` lines: the height
    /// ceiling clamped to `glyph_cap`, never below the usability floor.
    pub fn search_range(
        &self,
        lines: usize,
        height_budget: u32,
        aspect: f64,
        glyph_cap: u32,
    ) -> (u32, u32) {
        let lo = self.config.min_font_size.max(1);
        let hi = self
            .height_cap(lines, height_budget, aspect)
            .min(glyph_cap)
            .max(lo);
        (lo, hi)
    }

    /// Fit `text` into a `max_width × max_height` box.
    ///
    /// Never fails. Empty text yields no lines at the minimum size; text
    /// that fits nowhere yields the absolute fallback layout.
    pub fn fit<P: FontProvider + ?Sized>(
        &self,
        text: &str,
        fonts: &P,
        max_width: u32,
        max_height: u32,
        aspect: f64,
    ) -> TextLayout {
        let width_budget = self.width_budget(max_width);
        let height_budget = self.height_budget(max_height);

        if text.split_whitespace().next().is_none() {
            return self
                .probe(fonts, "", self.config.min_font_size.max(1), 0, width_budget)
                .layout;
        }

        let line_counts = self.line_counts(aspect);
        let fewest_lines = line_counts.first().copied().unwrap_or(1);
        let reference = self.height_cap(fewest_lines, height_budget, aspect);
        let glyph_cap = self.glyph_cap(fonts, text, width_budget, reference);

        for lines in line_counts {
            let (mut lo, mut hi) = self.search_range(lines, height_budget, aspect, glyph_cap);
            let mut best: Option<TextLayout> = None;

            for _ in 0..self.config.max_probes {
                if lo > hi {
                    break;
                }
                let mid = lo + (hi - lo) / 2;
                let probe = self.probe(fonts, text, mid, lines, width_budget);
                if self.fits(&probe, width_budget, height_budget) {
                    best = Some(probe.layout);
                    lo = mid + 1;
                } else if mid == 0 {
                    break;
                } else {
                    hi = mid - 1;
                }
            }

            if let Some(layout) = best {
                tracing::debug!(
                    font_size = layout.font_size,
                    lines = layout.lines.len(),
                    max_lines = lines,
                    "fitted headline"
                );
                return layout;
            }
        }

        tracing::warn!(
            max_width,
            max_height,
            font_size = self.config.fallback_font_size,
            "headline does not fit at any size; using fallback layout"
        );
        let mut layout = self
            .probe(
                fonts,
                text,
                self.config.fallback_font_size.max(1),
                self.config.fallback_lines.max(1),
                width_budget,
            )
            .layout;
        layout.fallback = true;
        layout
    }

    /// Wrap and measure `text` at one size.
    fn probe<P: FontProvider + ?Sized>(
        &self,
        fonts: &P,
        text: &str,
        size: u32,
        max_lines: usize,
        width_budget: u32,
    ) -> Probe {
        let face = fonts.face(size);
        let stroke = self.config.stroke_for(size);
        let Wrapped { lines, truncated } = wrap_to_width(
            &face,
            text,
            width_budget,
            max_lines,
            stroke,
            &self.config.ellipsis,
        );

        let line_height = face.measure(&self.config.metrics_sample, stroke).height;
        let line_pitch = (line_height as f64 * self.config.line_spacing) as u32;
        let widest = lines
            .iter()
            .map(|line| face.measure(line, stroke).width)
            .max()
            .unwrap_or(0);

        Probe {
            layout: TextLayout {
                lines,
                font_size: size,
                stroke_width: stroke,
                line_pitch,
                fallback: false,
                truncated,
            },
            widest,
        }
    }

    fn fits(&self, probe: &Probe, width_budget: u32, height_budget: u32) -> bool {
        let layout = &probe.layout;
        !layout.lines.is_empty()
            && probe.widest <= width_budget
            && layout.block_height() <= height_budget
            && (!self.config.require_complete || !layout.truncated)
    }
}
