//! Inline bootstrap script.
//!
//! The script is meant to be inlined in `<head>` so the tenant's colors are
//! on the document root before first paint. Both modes are resolved ahead of
//! time; the script only picks one:
//!
//! 1. read the persisted preference from `localStorage` (`system` if absent
//!    or unreadable),
//! 2. resolve `system` through `matchMedia('(prefers-color-scheme: dark)')`,
//! 3. write every property on `document.documentElement.style`, each inside
//!    its own `try/catch` so one rejected property never stops the rest.
//!
//! An explicit preference is also mirrored to `data-theme` so the generated
//! stylesheet agrees with the inline values.

use serde::{Deserialize, Serialize};
use tinta_tokens::{TenantTheme, ThemeMode, TokenMap, resolve_for_mode};

/// Both resolved token maps for a tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeBundle {
    pub light: TokenMap,
    pub dark: TokenMap,
}

impl ThemeBundle {
    /// Resolve light and dark tokens for `theme`.
    #[must_use]
    pub fn resolve(theme: &TenantTheme) -> Self {
        Self {
            light: resolve_for_mode(theme, ThemeMode::Light),
            dark: resolve_for_mode(theme, ThemeMode::Dark),
        }
    }

    /// Tokens for `mode`.
    #[must_use]
    pub fn for_mode(&self, mode: ThemeMode) -> &TokenMap {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// JSON object literal safe to embed inside an HTML `<script>` element.
    #[must_use]
    pub fn to_script_json(&self) -> String {
        script_safe(&serde_json::json!({ "light": self.light, "dark": self.dark }).to_string())
    }
}

/// Escape JSON text so it cannot close the surrounding `<script>` element or
/// break older JavaScript parsers.
fn script_safe(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003C"),
            '>' => out.push_str("\\u003E"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Script body (without `<script>` tags) that applies `theme` on load.
#[must_use]
pub fn bootstrap_script(theme: &TenantTheme, storage_key: &str) -> String {
    let bundle = ThemeBundle::resolve(theme).to_script_json();
    let key = script_safe(&serde_json::Value::from(storage_key).to_string());
    format!(
        r#"(function () {{
  var themes = {bundle};
  var pref = "system";
  try {{
    pref = String(window.localStorage.getItem({key}) || "system").trim().toLowerCase();
  }} catch (e) {{}}
  var root = document.documentElement;
  var mode = pref;
  if (pref === "light" || pref === "dark") {{
    root.setAttribute("data-theme", pref);
  }} else {{
    var dark = false;
    try {{
      dark = window.matchMedia("(prefers-color-scheme: dark)").matches;
    }} catch (e) {{}}
    mode = dark ? "dark" : "light";
  }}
  var tokens = themes[mode];
  for (var name in tokens) {{
    if (Object.prototype.hasOwnProperty.call(tokens, name)) {{
      try {{
        root.style.setProperty(name, tokens[name]);
      }} catch (e) {{}}
    }}
  }}
}})();
"#
    )
}

/// [`bootstrap_script`] wrapped in a `<script>` element.
#[must_use]
pub fn bootstrap_script_tag(theme: &TenantTheme, storage_key: &str) -> String {
    format!("<script>\n{}</script>\n", bootstrap_script(theme, storage_key))
}
