//! Brand band color.

use image::Rgba;

use crate::error::{HeadlinerError, Result};

/// Parse `#RRGGBB` (the leading `#` is optional).
pub fn parse_hex_color(hex: &str) -> Result<[u8; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(HeadlinerError::InvalidColor(format!(
            "'{}' (expected #RRGGBB)",
            hex
        )));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| HeadlinerError::InvalidColor(format!("'{}': {}", hex, e)))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Band fill: the first brand color at `brand_alpha`, else `default_fill`.
pub fn band_fill(brand_colors: &[String], brand_alpha: u8, default_fill: [u8; 4]) -> Rgba<u8> {
    let Some(first) = brand_colors.first() else {
        return Rgba(default_fill);
    };
    match parse_hex_color(first) {
        Ok([r, g, b]) => Rgba([r, g, b, brand_alpha]),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring brand color for band fill");
            Rgba(default_fill)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF8800").unwrap(), [255, 136, 0]);
        assert_eq!(parse_hex_color("0a0B0c").unwrap(), [10, 11, 12]);
    }

    #[test]
    fn test_parse_hex_color_rejects_bad_input() {
        for bad in ["", "#FFF", "#GG0000", "#FF00000", "#ÿÿÿ"] {
            assert!(parse_hex_color(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_band_fill() {
        let default = [0, 0, 0, 190];
        assert_eq!(band_fill(&[], 200, default), Rgba(default));
        assert_eq!(
            band_fill(&["#112233".to_string(), "#FFFFFF".to_string()], 200, default),
            Rgba([0x11, 0x22, 0x33, 200])
        );
        assert_eq!(band_fill(&["teal".to_string()], 200, default), Rgba(default));
    }
}
