//! Stateful theme store.
//!
//! The store holds the inputs of [`resolve_active_tokens`] (tenant theme,
//! user preference, system color scheme) and reapplies the result to a
//! [`StyleSink`] whenever one of them changes. Every application is
//! snapshotted so the next [`ThemeStore::bootstrap`] can paint the cached
//! tokens first. Each repaint removes properties the previous map set that
//! the new map lacks.

use std::fmt;

use tinta_tokens::{
    ApplyReport, StyleSink, TenantTheme, ThemeMode, ThemePreference, TokenMap, apply_theme,
    replace_theme, resolve_active_tokens, resolve_mode,
};

use crate::snapshot::{MemoryStorage, SnapshotBackend, ThemeSnapshot};

/// Outcome of [`ThemeStore::bootstrap`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Whether a cached snapshot was applied before recomputing.
    pub restored: bool,
    /// Result of applying the freshly resolved tokens.
    pub applied: ApplyReport,
}

/// Owns the active theme inputs and keeps a style sink in sync with them.
pub struct ThemeStore {
    theme: TenantTheme,
    preference: ThemePreference,
    system_prefers_dark: bool,
    backend: Box<dyn SnapshotBackend>,
    active: Option<(ThemeMode, TokenMap)>,
}

impl ThemeStore {
    /// A store for `theme` persisting through `backend`.
    ///
    /// Starts with the `System` preference and a light system scheme; call
    /// [`bootstrap`](Self::bootstrap) to restore the persisted preference.
    #[must_use]
    pub fn new(theme: TenantTheme, backend: Box<dyn SnapshotBackend>) -> Self {
        Self {
            theme,
            preference: ThemePreference::System,
            system_prefers_dark: false,
            backend,
            active: None,
        }
    }

    /// A store that keeps snapshots in memory only.
    #[must_use]
    pub fn in_memory(theme: TenantTheme) -> Self {
        Self::new(theme, Box::new(MemoryStorage::new()))
    }

    /// Set the initial system color scheme.
    #[must_use]
    pub fn with_system_prefers_dark(mut self, dark: bool) -> Self {
        self.system_prefers_dark = dark;
        self
    }

    #[must_use]
    pub fn theme(&self) -> &TenantTheme {
        &self.theme
    }

    #[must_use]
    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    #[must_use]
    pub fn system_prefers_dark(&self) -> bool {
        self.system_prefers_dark
    }

    /// The mode the current inputs resolve to.
    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        resolve_mode(self.preference, self.system_prefers_dark)
    }

    /// Tokens from the most recent application, if any.
    #[must_use]
    pub fn active_tokens(&self) -> Option<&TokenMap> {
        self.active.as_ref().map(|(_, tokens)| tokens)
    }

    /// First paint for a page load.
    ///
    /// Restores the persisted preference and applies the cached tokens if a
    /// snapshot exists, then resolves and applies fresh tokens on top.
    pub fn bootstrap<S: StyleSink + ?Sized>(&mut self, sink: &mut S) -> BootstrapReport {
        let tenant = self.theme.tenant_key().to_string();
        let cached = match self.backend.load(&tenant) {
            Ok(cached) => cached,
            Err(err) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    tenant = %tenant,
                    error = %err,
                    "failed to load theme snapshot"
                );
                None
            }
        };

        let restored = match cached {
            Some(snapshot) if snapshot.tenant == tenant => {
                self.preference = snapshot.preference;
                let report = apply_theme(&snapshot.tokens, sink);
                tracing::debug!(
                    tenant = %tenant,
                    mode = snapshot.mode.as_str(),
                    applied = report.applied,
                    "applied cached theme snapshot"
                );
                self.active = Some((snapshot.mode, snapshot.tokens));
                true
            }
            _ => false,
        };

        BootstrapReport {
            restored,
            applied: self.apply(sink),
        }
    }

    /// Change the user's preference and reapply.
    pub fn set_preference<S: StyleSink + ?Sized>(
        &mut self,
        preference: ThemePreference,
        sink: &mut S,
    ) -> ApplyReport {
        self.preference = preference;
        self.apply(sink)
    }

    /// Record a system color-scheme change.
    ///
    /// Only reapplies when the preference is `System`; an explicit light or
    /// dark preference is unaffected and `None` is returned.
    pub fn set_system_prefers_dark<S: StyleSink + ?Sized>(
        &mut self,
        dark: bool,
        sink: &mut S,
    ) -> Option<ApplyReport> {
        self.system_prefers_dark = dark;
        if self.preference == ThemePreference::System {
            Some(self.apply(sink))
        } else {
            None
        }
    }

    /// Switch to the opposite of the current mode as an explicit preference.
    pub fn toggle<S: StyleSink + ?Sized>(&mut self, sink: &mut S) -> ApplyReport {
        let next = self.mode().toggled();
        self.set_preference(next.into(), sink)
    }

    /// Replace the tenant theme (e.g. after the tenant edits its colors).
    pub fn set_theme<S: StyleSink + ?Sized>(
        &mut self,
        theme: TenantTheme,
        sink: &mut S,
    ) -> ApplyReport {
        self.theme = theme;
        self.apply(sink)
    }

    fn apply<S: StyleSink + ?Sized>(&mut self, sink: &mut S) -> ApplyReport {
        let mode = self.mode();
        let tokens = resolve_active_tokens(&self.theme, self.preference, self.system_prefers_dark);
        let report = match &self.active {
            Some((_, previous)) => replace_theme(previous, &tokens, sink),
            None => apply_theme(&tokens, sink),
        };

        let snapshot = ThemeSnapshot {
            tenant: self.theme.tenant_key().to_string(),
            preference: self.preference,
            mode,
            tokens: tokens.clone(),
        };
        if let Err(err) = self.backend.save(&snapshot) {
            tracing::warn!(
                backend = self.backend.name(),
                tenant = %snapshot.tenant,
                error = %err,
                "failed to save theme snapshot"
            );
        }

        tracing::debug!(
            tenant = %snapshot.tenant,
            preference = self.preference.as_str(),
            mode = mode.as_str(),
            applied = report.applied,
            removed = report.removed,
            "applied theme"
        );
        self.active = Some((mode, tokens));
        report
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("tenant", &self.theme.tenant_key())
            .field("preference", &self.preference)
            .field("system_prefers_dark", &self.system_prefers_dark)
            .field("backend", &self.backend.name())
            .finish()
    }
}
