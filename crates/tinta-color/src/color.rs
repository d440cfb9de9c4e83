//! Color types and hex/RGB/HSL conversions.

use std::fmt;
use std::str::FromStr;

/// Pure black as a normalized hex string.
pub const BLACK: &str = "#000000";
/// Pure white as a normalized hex string.
pub const WHITE: &str = "#FFFFFF";

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as `#RRGGBB` (upper-case).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to HSL.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    /// Interpolate each channel toward `other` by `t` (clamped to `[0, 1]`).
    #[must_use]
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let lerp = |a: u8, b: u8| -> u8 {
            let a = a as f64;
            let b = b as f64;
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// HSL color. `h` in degrees `[0, 360)`, `s` and `l` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Lightness.
    pub l: f64,
}

impl Hsl {
    /// Create a new HSL color, normalizing hue and clamping `s`/`l`.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }

    /// Same hue and saturation at a different lightness (clamped).
    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    /// Convert to RGB.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self)
    }
}

/// Errors raised by validating color constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The input is not a 3- or 6-digit hex color.
    InvalidColorFormat {
        /// The rejected input, verbatim.
        input: String,
    },
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidColorFormat { input } => {
                write!(f, "invalid color format: {input:?} (expected #RGB or #RRGGBB)")
            }
        }
    }
}

impl std::error::Error for ColorError {}

/// A validated hex color, normalized to `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorHex {
    normalized: String,
    rgb: Rgb,
}

impl ColorHex {
    /// Parse a 3- or 6-digit hex color (leading `#` optional).
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        let valid_len = digits.len() == 3 || digits.len() == 6;
        if !valid_len || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidColorFormat {
                input: input.to_string(),
            });
        }
        let rgb = hex_to_rgb(digits);
        Ok(Self {
            normalized: rgb.to_hex(),
            rgb,
        })
    }

    /// The normalized `#RRGGBB` form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// The parsed channels.
    #[must_use]
    pub const fn rgb(&self) -> Rgb {
        self.rgb
    }
}

impl FromStr for ColorHex {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ColorHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl From<Rgb> for ColorHex {
    fn from(rgb: Rgb) -> Self {
        Self {
            normalized: rgb.to_hex(),
            rgb,
        }
    }
}

/// Parse a hex color leniently.
///
/// Accepts 3 or 6 digits with an optional `#`; short forms are
/// digit-doubled. Digit pairs that fail to parse, or are missing, become
/// `0`. Never fails.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    let expanded: String = if digits.chars().count() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    let channel = |idx: usize| -> u8 {
        expanded
            .get(idx..idx + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .unwrap_or(0)
    };
    Rgb::new(channel(0), channel(2), channel(4))
}

/// Format an RGB color as `#RRGGBB`.
#[must_use]
pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_hex()
}

/// Convert RGB to HSL.
#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let d = max - min;
    if d.abs() < f64::EPSILON {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if (max - r).abs() < f64::EPSILON {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: (h * 60.0).rem_euclid(360.0),
        s,
        l,
    }
}

/// Convert HSL to RGB.
#[must_use]
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0) / 360.0;
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);

    if s == 0.0 {
        let v = to_channel(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert HSL straight to `#RRGGBB`.
#[must_use]
pub fn hsl_to_hex(hsl: Hsl) -> String {
    hsl_to_rgb(hsl).to_hex()
}

/// Linear per-channel mix from `a` (at `t = 0`) to `b` (at `t = 1`).
///
/// `t` is clamped to `[0, 1]`; channels round to the nearest integer.
#[must_use]
pub fn mix_hex(a: &str, b: &str, t: f64) -> String {
    hex_to_rgb(a).mix(hex_to_rgb(b), t).to_hex()
}
