//! Token synthesis: a full palette from a few tenant brand colors.
//!
//! [`derive_tokens`] is pure. Callers merge its output with the tenant's own
//! tokens (tenant wins) before writing anything; [`apply_tenant_theme`] does
//! both.

use tinta_color::contrast::{WCAG_AA, WCAG_AAA};
use tinta_color::{WHITE, ensure_contrast, hex_to_rgb, mix_hex, pick_on_color, rgb_to_hsl};

use crate::apply::{ApplyReport, StyleSink, apply_theme};
use crate::config::TenantColorConfig;
use crate::keys;
use crate::{TokenMap, merge_tokens};

/// Primary used when the tenant declares none (indigo).
pub const DEFAULT_PRIMARY: &str = "#4F46E5";
/// Surface used when the tenant declares none.
pub const DEFAULT_SURFACE: &str = WHITE;
/// Base text used when the tenant declares none.
pub const DEFAULT_TEXT: &str = "#1A1A1A";

/// Ramp shade names and their lightness offsets from the primary.
pub const RAMP_STEPS: [(u16, f64); 10] = [
    (50, 0.36),
    (100, 0.30),
    (200, 0.22),
    (300, 0.14),
    (400, 0.06),
    (500, 0.0),
    (600, -0.06),
    (700, -0.12),
    (800, -0.19),
    (900, -0.26),
];

const MUTED_MIX: f64 = 0.35;
const WEAK_MIX: f64 = 0.55;
const WEAK_RATIO: f64 = 3.2;
const BORDER_MIX: f64 = 0.88;
const BORDER_STRONG_MIX: f64 = 0.75;
const ELEVATION_MIX: [(&str, f64); 3] = [
    (keys::SURFACE_1, 0.03),
    (keys::SURFACE_2, 0.06),
    (keys::SURFACE_3, 0.10),
];

/// A 10-step tint/shade ramp, lightest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ramp {
    shades: [String; 10],
}

impl Ramp {
    /// The shade for `step` (50, 100, ..., 900). Unknown steps give the 500 shade.
    #[must_use]
    pub fn shade(&self, step: u16) -> &str {
        let idx = RAMP_STEPS
            .iter()
            .position(|(s, _)| *s == step)
            .unwrap_or(5);
        &self.shades[idx]
    }

    /// `(step, shade)` pairs, lightest first.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        RAMP_STEPS
            .iter()
            .zip(self.shades.iter())
            .map(|((step, _), shade)| (*step, shade.as_str()))
    }
}

/// Build the lightness ramp for `primary`.
///
/// Hue is held constant. Saturation is held unless `saturation` overrides it.
#[must_use]
pub fn ramp(primary: &str, saturation: Option<f64>) -> Ramp {
    let hsl = rgb_to_hsl(hex_to_rgb(primary));
    let s = saturation.unwrap_or(hsl.s);
    let shades = RAMP_STEPS.map(|(_, delta)| {
        tinta_color::Hsl::new(hsl.h, s, hsl.l + delta)
            .to_rgb()
            .to_hex()
    });
    Ramp { shades }
}

/// Derive the full token set from tenant base tokens.
#[must_use]
pub fn derive_tokens(base: &TenantColorConfig) -> TokenMap {
    let primary = normalize(base.get(keys::PRIMARY).unwrap_or(DEFAULT_PRIMARY));
    let surface = normalize(base.get(keys::SURFACE).unwrap_or(DEFAULT_SURFACE));
    let base_text = base.get(keys::TEXT).unwrap_or(DEFAULT_TEXT);

    let ramp = ramp(&primary, None);
    let mut out = TokenMap::new();

    out.insert(keys::PRIMARY.to_string(), primary.clone());
    for (step, shade) in ramp.iter() {
        out.insert(keys::primary_shade(step), shade.to_string());
    }

    let on_hint = base.get(keys::ON_PRIMARY).unwrap_or(WHITE);
    let on_primary = repaired(keys::ON_PRIMARY, on_hint, ramp.shade(600), WCAG_AA);
    out.insert(keys::ON_PRIMARY.to_string(), on_primary);

    out.insert(keys::SURFACE.to_string(), surface.clone());
    for (key, t) in ELEVATION_MIX {
        out.insert(key.to_string(), mix_hex(&surface, ramp.shade(900), t));
    }
    let surface_alt = match base.get(keys::SURFACE_ALT) {
        Some(alt) => alt.to_string(),
        None => out[keys::SURFACE_2].clone(),
    };
    out.insert(keys::SURFACE_ALT.to_string(), surface_alt);

    let text = repaired(keys::TEXT, base_text, &surface, WCAG_AAA);
    let muted = repaired(
        keys::TEXT_MUTED,
        &mix_hex(&text, &surface, MUTED_MIX),
        &surface,
        WCAG_AA,
    );
    let weak = repaired(
        keys::TEXT_WEAK,
        &mix_hex(&text, &surface, WEAK_MIX),
        &surface,
        WEAK_RATIO,
    );
    out.insert(
        keys::BORDER.to_string(),
        mix_hex(&text, &surface, BORDER_MIX),
    );
    out.insert(
        keys::BORDER_STRONG.to_string(),
        mix_hex(&text, &surface, BORDER_STRONG_MIX),
    );
    out.insert(keys::TEXT.to_string(), text);
    out.insert(keys::TEXT_MUTED.to_string(), muted);
    out.insert(keys::TEXT_WEAK.to_string(), weak);

    let mut put = |key: &str, derive: &dyn Fn() -> String| -> String {
        let value = match base.get(key) {
            Some(v) => v.to_string(),
            None => derive(),
        };
        out.insert(key.to_string(), value.clone());
        value
    };

    // Navigation
    put(keys::NAV_HOVER_BG, &|| mix_hex(&primary, &surface, 0.92));
    let nav_active_bg = put(keys::NAV_ACTIVE_BG, &|| mix_hex(&primary, &surface, 0.85));
    put(keys::NAV_ACTIVE_TEXT, &|| {
        ensure_contrast(ramp.shade(700), &nav_active_bg, WCAG_AA)
    });

    // Buttons
    let btn_bg = put(keys::BTN_PRIMARY_BG, &|| primary.clone());
    put(keys::BTN_PRIMARY_HOVER, &|| ramp.shade(600).to_string());
    put(keys::BTN_PRIMARY_ACTIVE, &|| ramp.shade(700).to_string());
    put(keys::BTN_PRIMARY_TEXT, &|| pick_on_color(&btn_bg));
    let btn_secondary_bg = put(keys::BTN_SECONDARY_BG, &|| mix_hex(&primary, &surface, 0.90));
    put(keys::BTN_SECONDARY_HOVER, &|| mix_hex(&primary, &surface, 0.80));
    put(keys::BTN_SECONDARY_TEXT, &|| {
        ensure_contrast(ramp.shade(700), &btn_secondary_bg, WCAG_AA)
    });

    // Badges
    let badge_bg = put(keys::BADGE_BG, &|| mix_hex(&primary, &surface, 0.88));
    put(keys::BADGE_BORDER, &|| mix_hex(&primary, &surface, 0.70));
    put(keys::BADGE_TEXT, &|| {
        ensure_contrast(ramp.shade(800), &badge_bg, WCAG_AA)
    });

    tracing::debug!(primary = %primary, surface = %surface, tokens = out.len(), "derived theme tokens");
    out
}

/// Derive, merge with the tenant's own tokens (tenant wins), and apply to `sink`.
pub fn apply_tenant_theme<S: StyleSink + ?Sized>(
    config: &TenantColorConfig,
    sink: &mut S,
) -> ApplyReport {
    let derived = derive_tokens(config);
    let merged = merge_tokens(config.tokens(), &derived);
    apply_theme(&merged, sink)
}

fn normalize(hex: &str) -> String {
    hex_to_rgb(hex).to_hex()
}

fn repaired(key: &str, fg: &str, bg: &str, min_ratio: f64) -> String {
    let fixed = ensure_contrast(fg, bg, min_ratio);
    if fixed != normalize(fg) {
        tracing::debug!(key, from = fg, to = %fixed, bg, min_ratio, "contrast repaired");
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinta_color::contrast_ratio;

    fn scenario() -> TokenMap {
        derive_tokens(&TenantColorConfig::new().with("--primary", "#5B3DF8"))
    }

    #[test]
    fn primary_only_scenario() {
        let tokens = scenario();
        assert_eq!(tokens["--primary"], "#5B3DF8");
        assert_eq!(tokens["--surface"], "#FFFFFF");
        assert!(contrast_ratio(&tokens["--text"], "#FFFFFF") >= 7.0);
        assert!(contrast_ratio(&tokens["--on-primary"], &tokens["--primary-600"]) >= 4.5);
    }

    #[test]
    fn primary_500_is_primary() {
        let tokens = scenario();
        assert_eq!(tokens["--primary-500"], tokens["--primary"]);
    }

    #[test]
    fn ramp_is_lightest_first() {
        let r = ramp("#5B3DF8", None);
        let lightness: Vec<f64> = r.iter().map(|(_, hex)| rgb_to_hsl(hex_to_rgb(hex)).l).collect();
        for pair in lightness.windows(2) {
            assert!(pair[0] >= pair[1], "{lightness:?}");
        }
        assert_eq!(r.iter().count(), 10);
    }

    #[test]
    fn ramp_saturation_override() {
        let gray = ramp("#5B3DF8", Some(0.0));
        for (_, shade) in gray.iter() {
            let rgb = hex_to_rgb(shade);
            assert_eq!(rgb.r, rgb.g);
            assert_eq!(rgb.g, rgb.b);
        }
    }

    #[test]
    fn unknown_ramp_step_falls_back_to_500() {
        let r = ramp("#5B3DF8", None);
        assert_eq!(r.shade(550), r.shade(500));
    }

    #[test]
    fn text_variants_meet_their_targets() {
        let tokens = scenario();
        let surface = &tokens["--surface"];
        assert!(contrast_ratio(&tokens["--text"], surface) >= 7.0);
        assert!(contrast_ratio(&tokens["--text-muted"], surface) >= 4.5);
        assert!(contrast_ratio(&tokens["--text-weak"], surface) >= 3.2);
    }

    #[test]
    fn text_variants_repaired_on_dark_surface() {
        // Dark surface with the default near-black text: everything must flip light.
        let tokens = derive_tokens(
            &TenantColorConfig::new()
                .with("--primary", "#5B3DF8")
                .with("--surface", "#121212"),
        );
        assert!(contrast_ratio(&tokens["--text"], "#121212") >= 7.0);
        assert!(contrast_ratio(&tokens["--text-muted"], "#121212") >= 4.5);
        assert!(contrast_ratio(&tokens["--text-weak"], "#121212") >= 3.2);
    }

    #[test]
    fn borders_sit_between_text_and_surface() {
        let tokens = scenario();
        let text = relative(&tokens["--text"]);
        let border = relative(&tokens["--c-border"]);
        let strong = relative(&tokens["--c-border-strong"]);
        let surface = relative(&tokens["--surface"]);
        assert!(text < strong && strong < border && border < surface);
    }

    #[test]
    fn elevated_surfaces_darken_progressively() {
        let tokens = scenario();
        let s0 = relative(&tokens["--surface"]);
        let s1 = relative(&tokens["--surface-1"]);
        let s2 = relative(&tokens["--surface-2"]);
        let s3 = relative(&tokens["--surface-3"]);
        assert!(s0 > s1 && s1 > s2 && s2 > s3);
        assert_eq!(tokens["--surface-alt"], tokens["--surface-2"]);
    }

    #[test]
    fn surface_alt_passes_through() {
        let tokens = derive_tokens(
            &TenantColorConfig::new()
                .with("--primary", "#5B3DF8")
                .with("--surface-alt", "#F7F5FF"),
        );
        assert_eq!(tokens["--surface-alt"], "#F7F5FF");
    }

    #[test]
    fn overrides_are_used_verbatim() {
        let tokens = derive_tokens(
            &TenantColorConfig::new()
                .with("--primary", "#5B3DF8")
                .with("--nav-active-bg", "#ffeecc")
                .with("--btn-primary-bg", "#000")
                .with("--badge-bg", "#00ff00"),
        );
        assert_eq!(tokens["--nav-active-bg"], "#ffeecc");
        assert_eq!(tokens["--btn-primary-bg"], "#000");
        assert_eq!(tokens["--badge-bg"], "#00ff00");
        // Dependents are derived from the override, not the default.
        assert_eq!(tokens["--btn-primary-text"], "#FFFFFF");
        assert!(contrast_ratio(&tokens["--nav-active-text"], "#ffeecc") >= 4.5);
        assert!(contrast_ratio(&tokens["--badge-text"], "#00ff00") >= 4.5);
    }

    #[test]
    fn feature_text_tokens_meet_aa() {
        let tokens = scenario();
        for (text, bg) in [
            ("--nav-active-text", "--nav-active-bg"),
            ("--btn-primary-text", "--btn-primary-bg"),
            ("--btn-secondary-text", "--btn-secondary-bg"),
            ("--badge-text", "--badge-bg"),
        ] {
            assert!(
                contrast_ratio(&tokens[text], &tokens[bg]) >= 4.5,
                "{text} on {bg}"
            );
        }
    }

    #[test]
    fn empty_config_uses_defaults() {
        let tokens = derive_tokens(&TenantColorConfig::new());
        assert_eq!(tokens["--primary"], DEFAULT_PRIMARY);
        assert_eq!(tokens["--surface"], "#FFFFFF");
        assert_eq!(tokens["--text"], DEFAULT_TEXT);
    }

    #[test]
    fn on_primary_hint_is_kept_when_legible() {
        let tokens = derive_tokens(
            &TenantColorConfig::new()
                .with("--primary", "#5B3DF8")
                .with("--on-primary", "#FFFDF5"),
        );
        assert_eq!(tokens["--on-primary"], "#FFFDF5");
    }

    #[test]
    fn derivation_is_idempotent() {
        assert_eq!(scenario(), scenario());
        let a = serde_json::to_string(&scenario()).unwrap();
        let b = serde_json::to_string(&scenario()).unwrap();
        assert_eq!(a, b);
    }

    fn relative(hex: &str) -> f64 {
        tinta_color::relative_luminance(hex)
    }
}
