//! # Headliner - Marketing Creative Renderer
//!
//! Headliner turns one base image into ad creatives for several aspect
//! ratios. For each ratio it:
//!
//! - **Crops**: keeps the busiest region of the image (edge energy)
//! - **Fits**: sizes and wraps the headline to fill a text box
//! - **Composes**: draws a translucent brand band, outlined headline and logo
//!
//! ## Quick Start
//!
//! ```
//! use headliner::{
//!     compose::BrandSpec,
//!     creative::CreativeRenderer,
//!     geometry::Ratio,
//!     text::bitmap::BitmapFontProvider,
//! };
//! use image::{DynamicImage, Rgb, RgbImage};
//!
//! let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(1600, 1200, Rgb([90, 120, 160])));
//! let brand = BrandSpec::new(vec!["#FF8800".to_string()]);
//!
//! let renderer = CreativeRenderer::default();
//! let creative = renderer.render(&image, Ratio::LANDSCAPE_16_9, "Summer sale", &brand, &BitmapFontProvider);
//!
//! assert_eq!(creative.dimensions(), (1600, 900));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`crop`] | Content-aware crop to a target ratio |
//! | [`text`] | Font providers, word wrap and size fitting |
//! | [`compose`] | Brand band, headline and logo compositing |
//! | [`creative`] | The crop, fit, compose pipeline for one creative |
//! | [`asset`] | Base image loading and placeholders |
//! | [`config`] | Tunable constants, loadable from JSON |
//! | [`geometry`] | Ratios, aspect classes, rectangles |
//! | [`error`] | Error types |

pub mod asset;
pub mod compose;
pub mod config;
pub mod creative;
pub mod crop;
pub mod error;
pub mod geometry;
pub mod text;

// Re-exports for convenience
pub use compose::{BrandSpec, Compositor};
pub use config::EngineConfig;
pub use creative::CreativeRenderer;
pub use crop::Cropper;
pub use error::{HeadlinerError, Result};
pub use geometry::Ratio;
pub use text::{TextFitter, TextLayout};
