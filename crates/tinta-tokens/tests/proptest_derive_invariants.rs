//! Property-based invariant tests for token synthesis.
//!
//! 1. The primary ramp is non-increasing in lightness.
//! 2. Derivation is idempotent (byte-identical output).
//! 3. Text tokens meet their contrast targets on any surface.
//! 4. On-primary meets AA against the 600 shade.
//! 5. Tenant tokens always survive resolution unchanged.
//! 6. Every derived value is a valid `#RRGGBB` color.

use proptest::prelude::*;
use tinta_color::{ColorHex, Rgb, contrast_ratio, hex_to_rgb, rgb_to_hex, rgb_to_hsl};
use tinta_tokens::{
    TenantColorConfig, TenantTheme, ThemePreference, derive_tokens, ramp, resolve_active_tokens,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn hex_strategy() -> impl Strategy<Value = String> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| rgb_to_hex(Rgb::new(r, g, b)))
}

fn config_strategy() -> impl Strategy<Value = TenantColorConfig> {
    (
        hex_strategy(),
        proptest::option::of(hex_strategy()),
        proptest::option::of(hex_strategy()),
    )
        .prop_map(|(primary, surface, text)| {
            let mut config = TenantColorConfig::new().with("--primary", primary);
            if let Some(surface) = surface {
                config.insert("--surface", surface);
            }
            if let Some(text) = text {
                config.insert("--text", text);
            }
            config
        })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Ramp monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ramp_non_increasing_lightness(primary in hex_strategy()) {
        let tokens = derive_tokens(&TenantColorConfig::new().with("--primary", primary.clone()));
        let steps = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];
        let lightness: Vec<f64> = steps
            .iter()
            .map(|s| rgb_to_hsl(hex_to_rgb(&tokens[&format!("--primary-{s}")])).l)
            .collect();
        for pair in lightness.windows(2) {
            prop_assert!(pair[0] + 1e-9 >= pair[1], "{} -> {:?}", primary, lightness);
        }
    }

    #[test]
    fn ramp_helper_agrees_with_tokens(primary in hex_strategy()) {
        let tokens = derive_tokens(&TenantColorConfig::new().with("--primary", primary.clone()));
        for (step, shade) in ramp(&primary, None).iter() {
            prop_assert_eq!(&tokens[&format!("--primary-{step}")], shade);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn derivation_idempotent(config in config_strategy()) {
        let a = serde_json::to_vec(&derive_tokens(&config)).unwrap();
        let b = serde_json::to_vec(&derive_tokens(&config)).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Contrast targets
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn text_tokens_meet_targets_or_best_effort(config in config_strategy()) {
        let tokens = derive_tokens(&config);
        let surface = &tokens["--surface"];
        let best_mono = contrast_ratio("#000000", surface).max(contrast_ratio("#FFFFFF", surface));
        for (key, target) in [("--text", 7.0), ("--text-muted", 4.5), ("--text-weak", 3.2)] {
            let ratio = contrast_ratio(&tokens[key], surface);
            prop_assert!(
                ratio >= target || (ratio - best_mono).abs() < 1e-9,
                "{} = {} on {}: {:.3}", key, tokens[key], surface, ratio
            );
        }
    }

    #[test]
    fn on_primary_meets_aa(config in config_strategy()) {
        let tokens = derive_tokens(&config);
        prop_assert!(contrast_ratio(&tokens["--on-primary"], &tokens["--primary-600"]) >= 4.5);
        prop_assert!(contrast_ratio(&tokens["--btn-primary-text"], &tokens["--btn-primary-bg"]) >= 4.5);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Tenant tokens win
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tenant_tokens_survive(config in config_strategy(), dark in any::<bool>()) {
        let theme = TenantTheme::new(config.clone());
        let tokens = resolve_active_tokens(&theme, ThemePreference::System, dark);
        for (key, value) in config.tokens() {
            prop_assert_eq!(&tokens[key], value);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Output validity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn derived_values_are_valid_hex(config in config_strategy()) {
        for (key, value) in derive_tokens(&config) {
            prop_assert!(key.starts_with("--"));
            prop_assert!(ColorHex::parse(&value).is_ok(), "{} = {}", key, value);
            prop_assert_eq!(value.len(), 7);
        }
    }
}
