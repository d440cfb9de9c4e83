#![forbid(unsafe_code)]

//! Tenant theme tokens.
//!
//! A tenant supplies a handful of brand colors keyed by CSS custom-property
//! name. This crate turns them into a complete, contrast-checked palette and
//! writes it onto a style target.
//!
//! # Example
//! ```
//! use tinta_tokens::{InlineStyle, TenantColorConfig, apply_tenant_theme, derive_tokens};
//!
//! let config = TenantColorConfig::new().with("--primary", "#5B3DF8");
//! let tokens = derive_tokens(&config);
//! assert_eq!(tokens["--surface"], "#FFFFFF");
//!
//! let mut root = InlineStyle::new();
//! let report = apply_tenant_theme(&config, &mut root);
//! assert!(report.skipped.is_empty());
//! assert_eq!(root.get("--primary"), Some("#5B3DF8"));
//! ```

pub mod apply;
pub mod config;
pub mod derive;
pub mod keys;
pub mod mode;

use std::collections::BTreeMap;

pub use apply::{
    ApplyReport, CssBlock, InlineStyle, StyleError, StyleSink, apply_theme, replace_theme,
};
pub use config::{InvalidReason, InvalidToken, TenantColorConfig, TenantTheme, ThemeError};
pub use derive::{Ramp, apply_tenant_theme, derive_tokens, ramp};
pub use mode::{
    ParsePreferenceError, ThemeMode, ThemePreference, resolve_active_tokens, resolve_for_mode,
    resolve_mode,
};

/// Ordered mapping from custom-property name to color value.
///
/// Ordered so that serializing the same derivation twice is byte-identical.
pub type TokenMap = BTreeMap<String, String>;

/// Merge tenant-declared tokens over derived ones. Tenant values win ties.
#[must_use]
pub fn merge_tokens(tenant: &TokenMap, derived: &TokenMap) -> TokenMap {
    let mut merged = derived.clone();
    merged.extend(tenant.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}
