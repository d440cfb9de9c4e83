#![forbid(unsafe_code)]

//! Color primitives for tenant theming.
//!
//! The string-based functions ([`hex_to_rgb`], [`mix_hex`],
//! [`contrast_ratio`], ...) are lenient: malformed input degrades to
//! zero-valued channels instead of failing. Use [`ColorHex::parse`] at the
//! configuration boundary when validation is wanted.

pub mod color;
pub mod contrast;

pub use color::{
    BLACK, ColorError, ColorHex, Hsl, Rgb, WHITE, hex_to_rgb, hsl_to_hex, hsl_to_rgb, mix_hex,
    rgb_to_hex, rgb_to_hsl,
};
pub use contrast::{
    ContrastSearch, contrast_ratio, ensure_contrast, ensure_contrast_with, pick_on_color,
    relative_luminance,
};
