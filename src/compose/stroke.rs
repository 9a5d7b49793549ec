//! Text outline rasterization.
//!
//! The outline is the glyph coverage grown by a disc of the stroke radius.
//! Both the grown mask and the padded fill mask gain `radius` pixels on
//! every side, matching how stroked text is measured.

use crate::text::TextMask;

/// Grow `mask` by a disc of `radius` pixels (max filter).
pub fn dilate(mask: &TextMask, radius: u32) -> TextMask {
    if radius == 0 {
        return mask.clone();
    }

    let r = radius as i64;
    let offsets: Vec<(i64, i64)> = (-r..=r)
        .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(|(dx, dy)| dx * dx + dy * dy <= r * r)
        .collect();

    let out_w = mask.width + 2 * radius as usize;
    let out_h = mask.height + 2 * radius as usize;
    let mut out = TextMask::empty(out_w, out_h);
    let (src_w, src_h) = (mask.width as i64, mask.height as i64);

    for (oy, row) in out.data.chunks_mut(out_w).enumerate() {
        for (ox, value) in row.iter_mut().enumerate() {
            let cx = ox as i64 - r;
            let cy = oy as i64 - r;
            let mut best = 0.0f32;
            for &(dx, dy) in &offsets {
                let sx = cx + dx;
                let sy = cy + dy;
                if sx >= 0 && sx < src_w && sy >= 0 && sy < src_h {
                    let v = mask.data[(sy * src_w + sx) as usize];
                    if v > best {
                        best = v;
                        if best >= 1.0 {
                            break;
                        }
                    }
                }
            }
            *value = best;
        }
    }

    out
}

/// Copy `mask` into a larger empty mask with `pad` pixels on every side.
pub fn pad(mask: &TextMask, pad: u32) -> TextMask {
    let p = pad as usize;
    let mut out = TextMask::empty(mask.width + 2 * p, mask.height + 2 * p);
    for y in 0..mask.height {
        let src = &mask.data[y * mask.width..(y + 1) * mask.width];
        let start = (y + p) * out.width + p;
        out.data[start..start + mask.width].copy_from_slice(src);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot() -> TextMask {
        let mut mask = TextMask::empty(3, 3);
        mask.data[4] = 1.0;
        mask
    }

    #[test]
    fn test_dilate_zero_radius_is_copy() {
        let out = dilate(&dot(), 0);
        assert_eq!(out.width, 3);
        assert_eq!(out.data, dot().data);
    }

    #[test]
    fn test_dilate_grows_disc() {
        let out = dilate(&dot(), 2);
        assert_eq!((out.width, out.height), (7, 7));
        // Dot now sits at (3, 3).
        assert_eq!(out.get(3, 3), 1.0);
        assert_eq!(out.get(3, 1), 1.0);
        assert_eq!(out.get(5, 3), 1.0);
        assert_eq!(out.get(4, 4), 1.0);
        // Corners of the 5x5 square are outside the disc.
        assert_eq!(out.get(1, 1), 0.0);
        assert_eq!(out.get(0, 0), 0.0);
    }

    #[test]
    fn test_pad_offsets_content() {
        let out = pad(&dot(), 2);
        assert_eq!((out.width, out.height), (7, 7));
        assert_eq!(out.get(3, 3), 1.0);
        assert_eq!(out.data.iter().filter(|&&v| v > 0.0).count(), 1);
    }
}
