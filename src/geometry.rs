//! Ratios, aspect classes and integer rectangles.

use std::fmt;
use std::str::FromStr;

use crate::error::HeadlinerError;

/// Target width:height ratio, both components positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    a: u32,
    b: u32,
}

impl Ratio {
    pub const SQUARE: Ratio = Ratio { a: 1, b: 1 };
    pub const PORTRAIT_9_16: Ratio = Ratio { a: 9, b: 16 };
    pub const LANDSCAPE_16_9: Ratio = Ratio { a: 16, b: 9 };

    pub fn new(a: u32, b: u32) -> Result<Self, HeadlinerError> {
        if a == 0 || b == 0 {
            return Err(HeadlinerError::InvalidRatio(format!(
                "{}:{} (components must be positive)",
                a, b
            )));
        }
        Ok(Self { a, b })
    }

    pub fn width(&self) -> u32 {
        self.a
    }

    pub fn height(&self) -> u32 {
        self.b
    }

    /// Normalized `a / b`.
    pub fn target(&self) -> f64 {
        self.a as f64 / self.b as f64
    }

    /// Filesystem-safe form, e.g. `16x9`.
    pub fn folder_name(&self) -> String {
        format!("{}x{}", self.a, self.b)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.a, self.b)
    }
}

impl FromStr for Ratio {
    type Err = HeadlinerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once(':')
            .ok_or_else(|| HeadlinerError::InvalidRatio(format!("'{}' (expected a:b)", s)))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| HeadlinerError::InvalidRatio(format!("'{}' (expected a:b)", s)))
        };
        Ratio::new(parse(a)?, parse(b)?)
    }
}

/// Coarse categorization of a width/height ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectClass {
    Wide,
    Tall,
    Square,
}

impl AspectClass {
    /// Classify `aspect`: wide at or above `wide_threshold`, tall at or below
    /// `tall_threshold`, square in between.
    pub fn classify(aspect: f64, wide_threshold: f64, tall_threshold: f64) -> Self {
        if aspect >= wide_threshold {
            AspectClass::Wide
        } else if aspect <= tall_threshold {
            AspectClass::Tall
        } else {
            AspectClass::Square
        }
    }
}

/// Crop window `(x0, y0)..(x1, y1)`, exclusive on the far edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CropWindow {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width,
            y1: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratio() {
        let ratio: Ratio = "16:9".parse().unwrap();
        assert_eq!(ratio, Ratio::LANDSCAPE_16_9);
        assert!((ratio.target() - 16.0 / 9.0).abs() < 1e-12);
        assert_eq!(ratio.to_string(), "16:9");
        assert_eq!(ratio.folder_name(), "16x9");
    }

    #[test]
    fn test_parse_ratio_rejects_garbage() {
        assert!("16x9".parse::<Ratio>().is_err());
        assert!("0:9".parse::<Ratio>().is_err());
        assert!("16:".parse::<Ratio>().is_err());
        assert!("-1:2".parse::<Ratio>().is_err());
    }

    #[test]
    fn test_aspect_class() {
        assert_eq!(AspectClass::classify(16.0 / 9.0, 1.4, 0.8), AspectClass::Wide);
        assert_eq!(AspectClass::classify(1.4, 1.4, 0.8), AspectClass::Wide);
        assert_eq!(AspectClass::classify(9.0 / 16.0, 1.4, 0.8), AspectClass::Tall);
        assert_eq!(AspectClass::classify(0.8, 1.4, 0.8), AspectClass::Tall);
        assert_eq!(AspectClass::classify(1.0, 1.4, 0.8), AspectClass::Square);
    }
}
