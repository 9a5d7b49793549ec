//! # Error Types
//!
//! This module defines error types used throughout the headliner library.
//!
//! The three core operations (crop, fit, compose) never fail; these errors
//! surface only at the edges where inputs are parsed or decoded.

use thiserror::Error;

/// Main error type for headliner operations
#[derive(Debug, Error)]
pub enum HeadlinerError {
    /// Aspect ratio string or components are not usable
    #[error("Invalid ratio: {0}")]
    InvalidRatio(String),

    /// Brand color is not a `#RRGGBB` hex string
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Font could not be located or parsed
    #[error("Font error: {0}")]
    Font(String),

    /// Logo bytes could not be decoded
    #[error("Logo decode failed: {0}")]
    LogoDecode(String),

    /// Logo decoded but is below the minimum size
    #[error("Logo too small: {width}x{height} (minimum {min}px)")]
    LogoTooSmall { width: u32, height: u32, min: u32 },

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, HeadlinerError>;
