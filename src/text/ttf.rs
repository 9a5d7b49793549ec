//! TrueType/OpenType font provider.
//!
//! Measures and renders text with ab_glyph. Advances include pair kerning;
//! the line box spans ascent to descent so every line shares one height.

use ab_glyph::{Font, FontArc, GlyphId, ScaleFont};
use std::path::{Path, PathBuf};

use super::{FontFace, FontProvider, TextMask, TextSize};
use crate::error::{HeadlinerError, Result};

/// Provider for one parsed font file. Cheap to clone and `Send + Sync`.
#[derive(Clone)]
pub struct TtfFontProvider {
    font: FontArc,
}

impl std::fmt::Debug for TtfFontProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfFontProvider").finish_non_exhaustive()
    }
}

impl TtfFontProvider {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| HeadlinerError::Font(format!("invalid font data: {}", e)))?;
        Ok(Self { font })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| HeadlinerError::Font(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(bytes)
            .map_err(|e| HeadlinerError::Font(format!("{}: {}", path.display(), e)))
    }

    /// Load the first candidate that exists and parses.
    pub fn discover<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        for candidate in candidates {
            let path = candidate.as_ref();
            if !path.exists() {
                continue;
            }
            match Self::from_path(path) {
                Ok(provider) => {
                    tracing::debug!(path = %path.display(), "loaded font");
                    return Ok(provider);
                }
                Err(e) => tracing::warn!(error = %e, "skipping font candidate"),
            }
        }
        Err(HeadlinerError::Font(format!(
            "none of {} font candidates could be loaded",
            candidates.len()
        )))
    }

    /// Bundled Inter first, then common system sans-serif faces.
    pub fn default_candidates() -> Vec<PathBuf> {
        [
            "assets/fonts/Inter_24pt-Regular.ttf",
            "assets/font/Inter_24pt-Regular.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect()
    }
}

impl FontProvider for TtfFontProvider {
    type Face = TtfFace;

    fn face(&self, size: u32) -> TtfFace {
        TtfFace {
            font: self.font.clone(),
            size: size.max(1),
        }
    }
}

/// A TrueType font at one pixel size.
#[derive(Clone)]
pub struct TtfFace {
    font: FontArc,
    size: u32,
}

impl TtfFace {
    /// Glyph ids with their pen positions, and the total advance.
    fn layout(&self, text: &str) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = self.font.as_scaled(self.size as f32);
        let mut glyphs = Vec::new();
        let mut caret_x = 0.0f32;
        let mut prev: Option<GlyphId> = None;

        for ch in text.chars() {
            let glyph_id = self.font.glyph_id(ch);
            if let Some(prev) = prev {
                caret_x += scaled.kern(prev, glyph_id);
            }
            glyphs.push((glyph_id, caret_x));
            caret_x += scaled.h_advance(glyph_id);
            prev = Some(glyph_id);
        }

        (glyphs, caret_x)
    }

    fn ascent_descent(&self) -> (f32, f32) {
        let scaled = self.font.as_scaled(self.size as f32);
        (scaled.ascent(), scaled.descent())
    }
}

impl FontFace for TtfFace {
    fn size(&self) -> u32 {
        self.size
    }

    fn measure(&self, text: &str, stroke: u32) -> TextSize {
        let (_, advance) = self.layout(text);
        let (ascent, descent) = self.ascent_descent();
        TextSize {
            width: advance.max(0.0).ceil() as u32 + 2 * stroke,
            height: (ascent - descent).ceil() as u32 + 2 * stroke,
        }
    }

    fn rasterize(&self, text: &str) -> TextMask {
        let (glyphs, advance) = self.layout(text);
        let (ascent, descent) = self.ascent_descent();

        let width = (advance.max(0.0).ceil() as usize).max(1);
        let height = ((ascent - descent).ceil() as usize).max(1);
        let mut mask = TextMask::empty(width, height);

        for (glyph_id, glyph_x) in glyphs {
            let glyph =
                glyph_id.with_scale_and_position(self.size as f32, ab_glyph::point(glyph_x, ascent));

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let x = px as i32 + bounds.min.x as i32;
                    let y = py as i32 + bounds.min.y as i32;

                    if x >= 0 && x < width as i32 && y >= 0 && y < height as i32 {
                        let idx = y as usize * width + x as usize;
                        mask.data[idx] = (mask.data[idx] + coverage).min(1.0);
                    }
                });
            }
        }

        mask
    }
}
