//! WCAG contrast math and contrast repair.
//!
//! # Repair algorithm
//!
//! [`ensure_contrast`] returns the first of these that meets the target:
//!
//! 1. the foreground itself,
//! 2. black or white (whichever contrasts more with the background),
//! 3. the foreground's hue and saturation at lightness stepped outward in
//!    both directions (`step` per iteration, up to `max_steps`).
//!
//! If nothing qualifies, the best-scoring candidate seen is returned. The
//! function is deterministic and never fails.

use crate::color::{BLACK, Rgb, WHITE, hex_to_rgb, rgb_to_hsl};

/// Minimum ratio used for on-colors (WCAG AA, normal text).
pub const WCAG_AA: f64 = 4.5;
/// Enhanced ratio (WCAG AAA, normal text).
pub const WCAG_AAA: f64 = 7.0;

/// Tunable constants for the lightness walk in [`ensure_contrast_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastSearch {
    /// Lightness increment per step, as a fraction of `[0, 1]`.
    pub step: f64,
    /// Number of steps taken in each direction.
    pub max_steps: u32,
}

impl ContrastSearch {
    /// Default search: 24 steps of 3%.
    pub const DEFAULT: Self = Self {
        step: 0.03,
        max_steps: 24,
    };
}

impl Default for ContrastSearch {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Expand an sRGB channel (`0.0..=1.0`) to linear light.
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance of an RGB color.
#[must_use]
pub fn rgb_luminance(rgb: Rgb) -> f64 {
    let r = srgb_to_linear(rgb.r as f64 / 255.0);
    let g = srgb_to_linear(rgb.g as f64 / 255.0);
    let b = srgb_to_linear(rgb.b as f64 / 255.0);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// WCAG relative luminance of a hex color (lenient parsing).
#[must_use]
pub fn relative_luminance(hex: &str) -> f64 {
    rgb_luminance(hex_to_rgb(hex))
}

/// Contrast ratio between two RGB colors, in `[1, 21]`.
#[must_use]
pub fn rgb_contrast_ratio(fg: Rgb, bg: Rgb) -> f64 {
    let lum_fg = rgb_luminance(fg);
    let lum_bg = rgb_luminance(bg);
    let lighter = lum_fg.max(lum_bg);
    let darker = lum_fg.min(lum_bg);
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex colors. Order independent.
#[must_use]
pub fn contrast_ratio(fg: &str, bg: &str) -> f64 {
    rgb_contrast_ratio(hex_to_rgb(fg), hex_to_rgb(bg))
}

/// Repair `fg` so it reaches `min_ratio` against `bg`, using the default search.
#[must_use]
pub fn ensure_contrast(fg: &str, bg: &str, min_ratio: f64) -> String {
    ensure_contrast_with(fg, bg, min_ratio, ContrastSearch::DEFAULT)
}

/// Repair `fg` so it reaches `min_ratio` against `bg`.
///
/// Returns a normalized `#RRGGBB` string. When `fg` already qualifies it is
/// returned in normalized form.
#[must_use]
pub fn ensure_contrast_with(fg: &str, bg: &str, min_ratio: f64, search: ContrastSearch) -> String {
    let fg_rgb = hex_to_rgb(fg);
    let bg_rgb = hex_to_rgb(bg);

    let fg_ratio = rgb_contrast_ratio(fg_rgb, bg_rgb);
    if fg_ratio >= min_ratio {
        return fg_rgb.to_hex();
    }

    let mut best = fg_rgb;
    let mut best_ratio = fg_ratio;

    let (mono, mono_ratio) = best_of_black_white(bg_rgb);
    if mono_ratio > best_ratio {
        best = mono;
        best_ratio = mono_ratio;
    }
    if mono_ratio >= min_ratio {
        return mono.to_hex();
    }

    let hsl = rgb_to_hsl(fg_rgb);
    for i in 1..=search.max_steps {
        let delta = search.step * i as f64;
        for l in [hsl.l + delta, hsl.l - delta] {
            let candidate = hsl.with_lightness(l).to_rgb();
            let ratio = rgb_contrast_ratio(candidate, bg_rgb);
            if ratio > best_ratio {
                best = candidate;
                best_ratio = ratio;
            }
            if ratio >= min_ratio {
                return candidate.to_hex();
            }
        }
    }

    best.to_hex()
}

/// Black or white for text on `bg`, repaired to at least 4.5:1.
#[must_use]
pub fn pick_on_color(bg: &str) -> String {
    let (mono, _) = best_of_black_white(hex_to_rgb(bg));
    ensure_contrast(&mono.to_hex(), bg, WCAG_AA)
}

fn best_of_black_white(bg: Rgb) -> (Rgb, f64) {
    let black = hex_to_rgb(BLACK);
    let white = hex_to_rgb(WHITE);
    let black_ratio = rgb_contrast_ratio(black, bg);
    let white_ratio = rgb_contrast_ratio(white, bg);
    if black_ratio >= white_ratio {
        (black, black_ratio)
    } else {
        (white, white_ratio)
    }
}
