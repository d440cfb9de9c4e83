//! Light/dark/system mode resolution.
//!
//! [`resolve_active_tokens`] is the single place where a preference, the
//! system color scheme and a tenant theme become the token map to apply.
//! The generator, the inline bootstrap script, the runtime store and the
//! DOM adapter all go through it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{TenantColorConfig, TenantTheme};
use crate::derive::derive_tokens;
use crate::{TokenMap, merge_tokens};

/// The user's persisted theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the operating system's color scheme.
    #[default]
    System,
    /// Always light.
    Light,
    /// Always dark.
    Dark,
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 3] = [
        ThemePreference::System,
        ThemePreference::Light,
        ThemePreference::Dark,
    ];

    /// Persisted string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ThemePreference::System => "system",
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Parse a persisted value; anything unrecognized means `System`.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized preference string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePreferenceError(pub String);

impl fmt::Display for ParsePreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown theme preference {:?} (expected system, light or dark)",
            self.0
        )
    }
}

impl std::error::Error for ParsePreferenceError {}

impl FromStr for ThemePreference {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" | "auto" => Ok(ThemePreference::System),
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            _ => Err(ParsePreferenceError(s.to_string())),
        }
    }
}

/// The concrete mode being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Value for the root element's `data-theme` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

impl From<ThemeMode> for ThemePreference {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => ThemePreference::Light,
            ThemeMode::Dark => ThemePreference::Dark,
        }
    }
}

/// Resolve a preference against the system color scheme.
#[must_use]
pub const fn resolve_mode(preference: ThemePreference, system_prefers_dark: bool) -> ThemeMode {
    match preference {
        ThemePreference::Light => ThemeMode::Light,
        ThemePreference::Dark => ThemeMode::Dark,
        ThemePreference::System => {
            if system_prefers_dark {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            }
        }
    }
}

/// Tenant tokens in effect for `mode`: base, or base with dark overrides.
#[must_use]
pub fn mode_config(theme: &TenantTheme, mode: ThemeMode) -> TenantColorConfig {
    match (mode, &theme.dark) {
        (ThemeMode::Dark, Some(dark)) => theme.base.merged_with(dark),
        _ => theme.base.clone(),
    }
}

/// Full token map for a concrete mode (derived, then tenant tokens on top).
#[must_use]
pub fn resolve_for_mode(theme: &TenantTheme, mode: ThemeMode) -> TokenMap {
    let config = mode_config(theme, mode);
    let derived = derive_tokens(&config);
    merge_tokens(config.tokens(), &derived)
}

/// Full token map for a preference and system color scheme.
#[must_use]
pub fn resolve_active_tokens(
    theme: &TenantTheme,
    preference: ThemePreference,
    system_prefers_dark: bool,
) -> TokenMap {
    let mode = resolve_mode(preference, system_prefers_dark);
    tracing::trace!(
        tenant = theme.tenant_key(),
        preference = preference.as_str(),
        system_prefers_dark,
        mode = mode.as_str(),
        "resolving active tokens"
    );
    resolve_for_mode(theme, mode)
}
