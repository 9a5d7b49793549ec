//! Edge-magnitude energy map used to score crop windows.

use image::{DynamicImage, GrayImage, imageops};

/// 3x3 edge-detection kernel (center 8, ring -1). Sums to zero, so flat
/// regions map to 0 and edges to bright values.
const FIND_EDGES: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

/// Grayscale map where a higher value means more visually important.
pub struct EnergyMap {
    edges: GrayImage,
}

impl EnergyMap {
    /// Build from any decoded image. Border pixels carry zero energy.
    pub fn from_image(image: &DynamicImage) -> Self {
        let gray = image.to_luma8();
        let edges = imageops::filter3x3(&gray, &FIND_EDGES);
        Self { edges }
    }

    pub fn width(&self) -> u32 {
        self.edges.width()
    }

    pub fn height(&self) -> u32 {
        self.edges.height()
    }

    #[inline]
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.edges.get_pixel(x, y)[0]
    }
}
