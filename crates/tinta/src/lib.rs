#![forbid(unsafe_code)]

//! Tinta public facade crate.
//!
//! Re-exports the color primitives, token derivation and (behind default
//! features) the runtime store and web entry points, plus a prelude for the
//! common path:
//!
//! ```
//! use tinta::prelude::*;
//!
//! let theme = TenantTheme::new(TenantColorConfig::new().with("--primary", "#5B3DF8"));
//! let tokens = resolve_active_tokens(&theme, ThemePreference::System, true);
//! assert!(contrast_ratio(&tokens["--text"], &tokens["--surface"]) >= 7.0);
//! ```

use std::fmt;

// --- Color re-exports ------------------------------------------------------

pub use tinta_color::{
    BLACK, ColorError, ColorHex, ContrastSearch, Hsl, Rgb, WHITE, contrast_ratio,
    ensure_contrast, ensure_contrast_with, hex_to_rgb, hsl_to_hex, mix_hex, pick_on_color,
    relative_luminance, rgb_to_hex, rgb_to_hsl,
};

// --- Token re-exports ------------------------------------------------------

pub use tinta_tokens::{
    ApplyReport, CssBlock, InlineStyle, StyleError, StyleSink, TenantColorConfig, TenantTheme,
    ThemeError, ThemeMode, ThemePreference, TokenMap, apply_tenant_theme, apply_theme,
    derive_tokens, keys, replace_theme, resolve_active_tokens, resolve_for_mode, resolve_mode,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use tinta_runtime::{MemoryStorage, SnapshotBackend, StorageError, ThemeSnapshot, ThemeStore};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use tinta_web::{ThemeBundle, bootstrap_script, bootstrap_script_tag};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Tinta callers.
#[derive(Debug)]
pub enum Error {
    /// Loading or validating a tenant theme failed.
    Theme(ThemeError),
    /// Snapshot storage failed.
    #[cfg(feature = "runtime")]
    Storage(StorageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Theme(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Theme(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ThemeError> for Error {
    fn from(err: ThemeError) -> Self {
        Self::Theme(err)
    }
}

#[cfg(feature = "runtime")]
impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

/// Standard result type for Tinta APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ColorHex, Error, InlineStyle, Result, StyleSink, TenantColorConfig, TenantTheme,
        ThemeMode, ThemePreference, TokenMap, apply_theme, contrast_ratio, derive_tokens,
        ensure_contrast, pick_on_color, resolve_active_tokens,
    };

    #[cfg(feature = "runtime")]
    pub use crate::ThemeStore;

    pub use crate::{color, tokens};
}

pub use tinta_color as color;
pub use tinta_tokens as tokens;
#[cfg(feature = "runtime")]
pub use tinta_runtime as runtime;
#[cfg(feature = "web")]
pub use tinta_web as web;
