//! Property-based invariant tests for color conversion and contrast repair.
//!
//! 1. hex -> RGB -> hex -> RGB is stable.
//! 2. Contrast ratio is order independent and within `[1, 21]`.
//! 3. `ensure_contrast(_, _, 4.5)` always reaches AA.
//! 4. Repair never makes contrast worse.
//! 5. Mixing at 0 and 1 returns the endpoints.
//! 6. HSL round trip stays within one channel step.

use proptest::prelude::*;
use tinta_color::{
    Rgb, contrast_ratio, ensure_contrast, hex_to_rgb, hsl_to_rgb, mix_hex, rgb_to_hex, rgb_to_hsl,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn rgb_strategy() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn hex_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        rgb_strategy().prop_map(rgb_to_hex),
        "#[0-9a-fA-F]{3}",
        "[0-9a-fA-F]{6}",
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Hex round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hex_round_trip(c in hex_strategy()) {
        let rgb = hex_to_rgb(&c);
        prop_assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)), rgb);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Contrast ratio symmetry and bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn contrast_is_symmetric(a in hex_strategy(), b in hex_strategy()) {
        let ab = contrast_ratio(&a, &b);
        let ba = contrast_ratio(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12, "{} vs {}: {} != {}", a, b, ab, ba);
        prop_assert!((1.0 - 1e-12..=21.0 + 1e-9).contains(&ab));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. AA is always reachable
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ensure_contrast_reaches_aa(fg in hex_strategy(), bg in hex_strategy()) {
        let fixed = ensure_contrast(&fg, &bg, 4.5);
        prop_assert!(
            contrast_ratio(&fixed, &bg) >= 4.5,
            "{} on {} repaired to {} ({:.3})",
            fg, bg, fixed, contrast_ratio(&fixed, &bg)
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Repair never regresses
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ensure_contrast_never_regresses(
        fg in hex_strategy(),
        bg in hex_strategy(),
        target in 1.0f64..21.0,
    ) {
        let fixed = ensure_contrast(&fg, &bg, target);
        let before = contrast_ratio(&fg, &bg);
        let after = contrast_ratio(&fixed, &bg);
        prop_assert!(after >= target || after >= before);
        if before >= target {
            prop_assert_eq!(hex_to_rgb(&fixed), hex_to_rgb(&fg));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Mix endpoints
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mix_endpoints(a in rgb_strategy(), b in rgb_strategy()) {
        let a = rgb_to_hex(a);
        let b = rgb_to_hex(b);
        prop_assert_eq!(mix_hex(&a, &b, 0.0), a.clone());
        prop_assert_eq!(mix_hex(&a, &b, 1.0), b.clone());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. HSL round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hsl_round_trip_within_one(rgb in rgb_strategy()) {
        let back = hsl_to_rgb(rgb_to_hsl(rgb));
        prop_assert!((back.r as i16 - rgb.r as i16).abs() <= 1);
        prop_assert!((back.g as i16 - rgb.g as i16).abs() <= 1);
        prop_assert!((back.b as i16 - rgb.b as i16).abs() <= 1);
    }
}
