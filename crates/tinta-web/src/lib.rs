#![forbid(unsafe_code)]

//! Browser entry points for tenant themes.
//!
//! - [`bootstrap_script`] renders a dependency-free inline script that paints
//!   the tenant's tokens before any bundle loads. It is plain string output
//!   and works on every target.
//! - On `wasm32`, `DomStyle` is a [`StyleSink`](tinta_tokens::StyleSink)
//!   over the document root, and `applyTenantTheme` / `readPreference` /
//!   `writePreference` are exported to JavaScript.

mod bootstrap;

pub use bootstrap::{ThemeBundle, bootstrap_script, bootstrap_script_tag};

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomStyle, apply_tenant_theme, read_preference, write_preference};

/// `localStorage` key used when the host does not choose one.
pub const DEFAULT_STORAGE_KEY: &str = "tinta-theme";
