//! Custom-property names read from tenant config or written by derivation.

/// Tenant brand color; seeds the ramp.
pub const PRIMARY: &str = "--primary";
/// Text on the primary, at least 4.5:1 against `--primary-600`.
pub const ON_PRIMARY: &str = "--on-primary";
/// Page background.
pub const SURFACE: &str = "--surface";
/// Alternate background; defaults to `--surface-2`.
pub const SURFACE_ALT: &str = "--surface-alt";
/// Elevation steps: the surface mixed toward `--primary-900`.
pub const SURFACE_1: &str = "--surface-1";
pub const SURFACE_2: &str = "--surface-2";
pub const SURFACE_3: &str = "--surface-3";
/// Body text, repaired to 7:1 against the surface.
pub const TEXT: &str = "--text";
/// Secondary text (4.5:1).
pub const TEXT_MUTED: &str = "--text-muted";
/// Tertiary text (3.2:1).
pub const TEXT_WEAK: &str = "--text-weak";
/// Borders: text mixed into the surface.
pub const BORDER: &str = "--c-border";
pub const BORDER_STRONG: &str = "--c-border-strong";

/// Navigation item states.
pub const NAV_HOVER_BG: &str = "--nav-hover-bg";
pub const NAV_ACTIVE_BG: &str = "--nav-active-bg";
pub const NAV_ACTIVE_TEXT: &str = "--nav-active-text";

/// Primary and secondary button states.
pub const BTN_PRIMARY_BG: &str = "--btn-primary-bg";
pub const BTN_PRIMARY_HOVER: &str = "--btn-primary-hover";
pub const BTN_PRIMARY_ACTIVE: &str = "--btn-primary-active";
pub const BTN_PRIMARY_TEXT: &str = "--btn-primary-text";
pub const BTN_SECONDARY_BG: &str = "--btn-secondary-bg";
pub const BTN_SECONDARY_HOVER: &str = "--btn-secondary-hover";
pub const BTN_SECONDARY_TEXT: &str = "--btn-secondary-text";

/// Badge background, border and text.
pub const BADGE_BG: &str = "--badge-bg";
pub const BADGE_BORDER: &str = "--badge-border";
pub const BADGE_TEXT: &str = "--badge-text";

/// Name of a primary ramp shade, e.g. `--primary-600`.
#[must_use]
pub fn primary_shade(step: u16) -> String {
    format!("{PRIMARY}-{step}")
}
