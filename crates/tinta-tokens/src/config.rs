//! Tenant color configuration loading and validation.
//!
//! # File format
//!
//! ```json
//! {
//!   "id": "acme",
//!   "name": "Acme Benefits",
//!   "base": { "--primary": "#5B3DF8", "--surface": "#FFFFFF" },
//!   "dark": { "--surface": "#121212", "--text": "#F2F2F2" }
//! }
//! ```
//!
//! Derivation never requires validation: malformed colors degrade through
//! the lenient parser. [`TenantTheme::validate`] exists for callers that
//! want to fail fast (the generator's `--strict` mode).

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tinta_color::{ColorError, ColorHex};

use crate::TokenMap;

/// Tenant-declared tokens for one mode: custom-property name to hex color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantColorConfig(TokenMap);

impl TenantColorConfig {
    /// Create an empty configuration (every token falls back to defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Insert or replace a token.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a token. Blank values count as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// The raw token map.
    #[must_use]
    pub fn tokens(&self) -> &TokenMap {
        &self.0
    }

    /// Number of declared tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no tokens are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy with `overrides` layered on top.
    #[must_use]
    pub fn merged_with(&self, overrides: &TenantColorConfig) -> Self {
        let mut merged = self.0.clone();
        merged.extend(overrides.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(merged)
    }

    /// Check every entry: names must be custom properties, values hex colors.
    #[must_use]
    pub fn invalid_tokens(&self) -> Vec<InvalidToken> {
        self.0
            .iter()
            .filter_map(|(name, value)| {
                if !name.starts_with("--") || name.len() <= 2 {
                    return Some(InvalidToken {
                        name: name.clone(),
                        reason: InvalidReason::Name,
                    });
                }
                ColorHex::parse(value).err().map(|err| InvalidToken {
                    name: name.clone(),
                    reason: InvalidReason::Color(err),
                })
            })
            .collect()
    }
}

impl From<TokenMap> for TenantColorConfig {
    fn from(map: TokenMap) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TenantColorConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A tenant's full theme declaration: base tokens plus optional dark overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantTheme {
    /// Stable tenant identifier (used to key snapshots).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tokens used in light mode and as the base for dark mode.
    #[serde(default)]
    pub base: TenantColorConfig,
    /// Overrides merged over `base` when dark mode is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<TenantColorConfig>,
}

impl TenantTheme {
    /// A theme with only base tokens.
    #[must_use]
    pub fn new(base: TenantColorConfig) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Set the dark-mode overrides.
    #[must_use]
    pub fn with_dark(mut self, dark: TenantColorConfig) -> Self {
        self.dark = Some(dark);
        self
    }

    /// Set the tenant identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Identifier used for snapshot keys; `"default"` when unset.
    #[must_use]
    pub fn tenant_key(&self) -> &str {
        self.id.as_deref().unwrap_or("default")
    }

    /// Parse a theme from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a theme file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let theme = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            tenant = theme.tenant_key(),
            base = theme.base.len(),
            dark = theme.dark.as_ref().map_or(0, TenantColorConfig::len),
            "loaded tenant theme"
        );
        Ok(theme)
    }

    /// Every invalid entry across base and dark tokens.
    #[must_use]
    pub fn invalid_tokens(&self) -> Vec<InvalidToken> {
        let mut invalid = self.base.invalid_tokens();
        if let Some(dark) = &self.dark {
            invalid.extend(dark.invalid_tokens());
        }
        invalid
    }

    /// Fail if any entry is invalid.
    pub fn validate(&self) -> Result<(), ThemeError> {
        let invalid = self.invalid_tokens();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(ThemeError::InvalidTokens(invalid))
        }
    }
}

/// Why a token entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// The name is not a `--custom-property`.
    Name,
    /// The value is not a hex color.
    Color(ColorError),
}

/// A rejected token entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidToken {
    /// Property name as declared.
    pub name: String,
    /// Rejection reason.
    pub reason: InvalidReason,
}

impl fmt::Display for InvalidToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            InvalidReason::Name => write!(f, "{}: not a custom property name", self.name),
            InvalidReason::Color(err) => write!(f, "{}: {err}", self.name),
        }
    }
}

/// Errors from loading or validating a tenant theme.
#[derive(Debug)]
pub enum ThemeError {
    /// Reading the theme file failed.
    Io(std::io::Error),
    /// The theme file is not valid JSON for [`TenantTheme`].
    Json(serde_json::Error),
    /// One or more entries failed validation.
    InvalidTokens(Vec<InvalidToken>),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::Io(e) => write!(f, "I/O error: {e}"),
            ThemeError::Json(e) => write!(f, "invalid theme JSON: {e}"),
            ThemeError::InvalidTokens(list) => {
                write!(f, "{} invalid token(s)", list.len())?;
                for (i, token) in list.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{token}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ThemeError::Io(e) => Some(e),
            ThemeError::Json(e) => Some(e),
            ThemeError::InvalidTokens(_) => None,
        }
    }
}

impl From<std::io::Error> for ThemeError {
    fn from(e: std::io::Error) -> Self {
        ThemeError::Io(e)
    }
}

impl From<serde_json::Error> for ThemeError {
    fn from(e: serde_json::Error) -> Self {
        ThemeError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACME: &str = r##"{
        "id": "acme",
        "name": "Acme Benefits",
        "base": { "--primary": "#5B3DF8" },
        "dark": { "--surface": "#121212", "--text": "#F2F2F2" }
    }"##;

    #[test]
    fn parses_full_theme() {
        let theme = TenantTheme::from_json(ACME).unwrap();
        assert_eq!(theme.tenant_key(), "acme");
        assert_eq!(theme.name.as_deref(), Some("Acme Benefits"));
        assert_eq!(theme.base.get("--primary"), Some("#5B3DF8"));
        assert_eq!(theme.dark.as_ref().unwrap().get("--surface"), Some("#121212"));
        assert!(theme.validate().is_ok());
    }

    #[test]
    fn missing_sections_default() {
        let theme = TenantTheme::from_json("{}").unwrap();
        assert!(theme.base.is_empty());
        assert!(theme.dark.is_none());
        assert_eq!(theme.tenant_key(), "default");
    }

    #[test]
    fn blank_values_count_as_absent() {
        let config = TenantColorConfig::new().with("--primary", "  ");
        assert_eq!(config.get("--primary"), None);
    }

    #[test]
    fn merged_with_prefers_overrides() {
        let base = TenantColorConfig::new()
            .with("--surface", "#FFFFFF")
            .with("--primary", "#5B3DF8");
        let dark = TenantColorConfig::new().with("--surface", "#000000");
        let merged = base.merged_with(&dark);
        assert_eq!(merged.get("--surface"), Some("#000000"));
        assert_eq!(merged.get("--primary"), Some("#5B3DF8"));
    }

    #[test]
    fn validation_lists_every_problem() {
        let theme = TenantTheme::new(
            TenantColorConfig::new()
                .with("--primary", "purple")
                .with("surface", "#FFF"),
        )
        .with_dark(TenantColorConfig::new().with("--text", "#12345"));
        let err = theme.validate().unwrap_err();
        let ThemeError::InvalidTokens(list) = &err else {
            panic!("expected InvalidTokens, got {err:?}");
        };
        assert_eq!(list.len(), 3);
        let text = err.to_string();
        assert!(text.starts_with("3 invalid token(s)"));
        assert!(text.contains("surface: not a custom property name"));
        assert!(text.contains("--primary"));
        assert!(text.contains("--text"));
    }

    #[test]
    fn bad_json_is_json_error() {
        let err = TenantTheme::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ThemeError::Json(_)));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tenant.json");
        std::fs::write(&path, ACME).unwrap();
        let theme = TenantTheme::from_path(&path).unwrap();
        assert_eq!(theme.tenant_key(), "acme");

        let missing = TenantTheme::from_path(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, ThemeError::Io(_)));
    }

    #[test]
    fn serializes_back_to_same_shape() {
        let theme = TenantTheme::from_json(ACME).unwrap();
        let json = serde_json::to_string(&theme).unwrap();
        assert_eq!(TenantTheme::from_json(&json).unwrap(), theme);
    }
}
