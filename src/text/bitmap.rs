//! Fixed-advance bitmap font built on the Spleen 12x24 face.
//!
//! Glyphs are scaled nearest-neighbour to the requested size with an advance
//! of half the size. Metrics are exact integers, which makes this provider
//! the deterministic fallback when no TrueType font can be loaded.

use spleen_font::{FONT_12X24, PSF2Font};

use super::{FontFace, FontProvider, TextMask, TextSize};

const CELL_W: usize = 12;
const CELL_H: usize = 24;

/// Spleen-backed provider. Stateless; every size is derived on demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFontProvider;

impl FontProvider for BitmapFontProvider {
    type Face = BitmapFace;

    fn face(&self, size: u32) -> BitmapFace {
        BitmapFace { size: size.max(1) }
    }
}

/// Bitmap face at one pixel size.
#[derive(Debug, Clone, Copy)]
pub struct BitmapFace {
    size: u32,
}

impl BitmapFace {
    /// Horizontal advance per character.
    pub fn advance(&self) -> u32 {
        self.size.div_ceil(2)
    }
}

impl FontFace for BitmapFace {
    fn size(&self) -> u32 {
        self.size
    }

    fn measure(&self, text: &str, stroke: u32) -> TextSize {
        let chars = text.chars().count() as u32;
        TextSize {
            width: chars * self.advance() + 2 * stroke,
            height: self.size + 2 * stroke,
        }
    }

    fn rasterize(&self, text: &str) -> TextMask {
        let advance = self.advance() as usize;
        let height = self.size as usize;
        let chars = text.chars().count();
        let mut mask = TextMask::empty((chars * advance).max(1), height);

        let mut spleen = PSF2Font::new(FONT_12X24).ok();
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }

            let mut cell = [0u8; CELL_W * CELL_H];
            let utf8 = ch.to_string();
            let found = match spleen.as_mut().and_then(|f| f.glyph_for_utf8(utf8.as_bytes())) {
                Some(glyph) => {
                    for (row_y, row) in glyph.enumerate() {
                        for (col_x, on) in row.enumerate() {
                            if on && row_y < CELL_H && col_x < CELL_W {
                                cell[row_y * CELL_W + col_x] = 1;
                            }
                        }
                    }
                    true
                }
                None => false,
            };
            if !found {
                draw_box(&mut cell, CELL_W, CELL_H);
            }

            blit_scaled(&cell, &mut mask, i * advance, advance);
        }

        mask
    }
}

/// Nearest-neighbour scale a 12x24 cell into `mask` at column `x0`.
fn blit_scaled(cell: &[u8], mask: &mut TextMask, x0: usize, advance: usize) {
    let height = mask.height;
    for dy in 0..height {
        let sy = dy * CELL_H / height;
        for dx in 0..advance {
            let sx = dx * CELL_W / advance;
            if cell[sy * CELL_W + sx] != 0 {
                let idx = dy * mask.width + x0 + dx;
                if idx < mask.data.len() {
                    mask.data[idx] = 1.0;
                }
            }
        }
    }
}

/// Box outline for characters missing from the font.
fn draw_box(cell: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        cell[x] = 1;
        cell[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        cell[y * width] = 1;
        cell[y * width + width - 1] = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_scale_with_size() {
        let face = BitmapFontProvider.face(40);
        assert_eq!(face.advance(), 20);
        assert_eq!(face.measure("HELLO", 0), TextSize { width: 100, height: 40 });
        assert_eq!(face.measure("HELLO", 3), TextSize { width: 106, height: 46 });
        assert_eq!(BitmapFontProvider.face(19).advance(), 10);
    }

    #[test]
    fn test_measure_is_monotonic_in_size() {
        let mut prev = 0;
        for size in 1..200 {
            let width = BitmapFontProvider.face(size).measure("Summer Sale", 2).width;
            assert!(width >= prev);
            prev = width;
        }
    }

    #[test]
    fn test_rasterize_has_ink() {
        let mask = BitmapFontProvider.face(48).rasterize("Ag");
        assert_eq!(mask.width, 48);
        assert_eq!(mask.height, 48);
        assert_eq!(mask.data.len(), mask.width * mask.height);
        assert!(mask.data.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn test_rasterize_space_is_blank() {
        let mask = BitmapFontProvider.face(24).rasterize("   ");
        assert!(mask.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_missing_glyph_draws_box() {
        let mut cell = [0u8; CELL_W * CELL_H];
        draw_box(&mut cell, CELL_W, CELL_H);
        assert!(cell[..CELL_W].iter().all(|&p| p == 1));
        assert_eq!(cell[CELL_W + 1], 0);
    }
}
