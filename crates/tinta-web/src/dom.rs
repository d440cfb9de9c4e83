//! wasm-bindgen DOM adapter: a style sink over the document root and the
//! JavaScript exports built on it.

use tinta_tokens::apply::is_custom_property_name;
use tinta_tokens::{
    StyleError, StyleSink, TenantTheme, ThemePreference, apply_theme, resolve_active_tokens,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CssStyleDeclaration, Element, HtmlElement, Storage, Window};

/// Style sink over an element's inline style (normally `<html>`).
pub struct DomStyle {
    element: Element,
    style: CssStyleDeclaration,
}

impl DomStyle {
    /// Sink for `document.documentElement`.
    pub fn document_root() -> Result<Self, JsValue> {
        let element = window()?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?
            .document_element()
            .ok_or_else(|| JsValue::from_str("no document element"))?;
        let style = element.clone().dyn_into::<HtmlElement>()?.style();
        Ok(Self { element, style })
    }

    /// Mirror an explicit preference to `data-theme`; `system` removes it so
    /// the stylesheet's media query decides.
    pub fn set_theme_attribute(&self, preference: ThemePreference) -> Result<(), JsValue> {
        match preference {
            ThemePreference::System => self.element.remove_attribute("data-theme"),
            explicit => self.element.set_attribute("data-theme", explicit.as_str()),
        }
    }
}

impl StyleSink for DomStyle {
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), StyleError> {
        if !is_custom_property_name(name) {
            return Err(StyleError::InvalidPropertyName(name.to_string()));
        }
        self.style
            .set_property(name, value)
            .map_err(|err| StyleError::Rejected {
                name: name.to_string(),
                reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
            })
    }

    fn remove_property(&mut self, name: &str) -> Result<(), StyleError> {
        if !is_custom_property_name(name) {
            return Err(StyleError::InvalidPropertyName(name.to_string()));
        }
        self.style
            .remove_property(name)
            .map(|_| ())
            .map_err(|err| StyleError::Rejected {
                name: name.to_string(),
                reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
            })
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|mql| mql.matches())
}

/// Apply a tenant theme (JSON, same shape as the generator's input) to the
/// document root. Returns the number of properties written.
#[wasm_bindgen(js_name = applyTenantTheme)]
pub fn apply_tenant_theme(config_json: &str, preference: Option<String>) -> Result<u32, JsValue> {
    let theme =
        TenantTheme::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let preference = preference
        .as_deref()
        .map(ThemePreference::parse_lenient)
        .unwrap_or_default();
    let tokens = resolve_active_tokens(&theme, preference, system_prefers_dark());

    let mut root = DomStyle::document_root()?;
    root.set_theme_attribute(preference)?;
    let report = apply_theme(&tokens, &mut root);
    Ok(u32::try_from(report.applied).unwrap_or(u32::MAX))
}

/// Persisted preference under `storage_key`; `"system"` when absent or
/// storage is unavailable.
#[wasm_bindgen(js_name = readPreference)]
pub fn read_preference(storage_key: &str) -> String {
    local_storage()
        .and_then(|s| s.get_item(storage_key).ok().flatten())
        .map(|v| ThemePreference::parse_lenient(&v))
        .unwrap_or_default()
        .as_str()
        .to_string()
}

/// Persist `preference` under `storage_key` in its canonical form.
#[wasm_bindgen(js_name = writePreference)]
pub fn write_preference(storage_key: &str, preference: &str) -> Result<(), JsValue> {
    let storage = local_storage().ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;
    storage.set_item(
        storage_key,
        ThemePreference::parse_lenient(preference).as_str(),
    )
}
