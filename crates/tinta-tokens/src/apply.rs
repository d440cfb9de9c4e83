//! Writing token maps onto style targets.
//!
//! The target is always an explicit [`StyleSink`]: the document root in a
//! browser, a detached [`InlineStyle`] in tests, or a [`CssBlock`] when
//! generating a stylesheet. [`apply_theme`] never aborts the batch; a
//! property the sink rejects is logged and reported in
//! [`ApplyReport::skipped`]. [`replace_theme`] also removes properties the
//! previous map set that the new one lacks, so a repaint never leaves stale
//! tenant keys behind.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use crate::TokenMap;

/// Failure to set a single property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// Not a valid `--custom-property` identifier.
    InvalidPropertyName(String),
    /// The value would break out of the declaration.
    InvalidValue {
        /// Property name.
        name: String,
        /// Rejected value.
        value: String,
    },
    /// The underlying target refused the write.
    Rejected {
        /// Property name.
        name: String,
        /// Reason reported by the target.
        reason: String,
    },
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleError::InvalidPropertyName(name) => {
                write!(f, "invalid custom property name: {name:?}")
            }
            StyleError::InvalidValue { name, value } => {
                write!(f, "invalid value for {name}: {value:?}")
            }
            StyleError::Rejected { name, reason } => write!(f, "{name} rejected: {reason}"),
        }
    }
}

impl std::error::Error for StyleError {}

/// A style target that accepts custom-property writes.
pub trait StyleSink {
    /// Set `name` to `value`, overwriting any prior value.
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), StyleError>;

    /// Remove `name`. Removing an unset property is not an error.
    fn remove_property(&mut self, name: &str) -> Result<(), StyleError>;
}

impl<S: StyleSink + ?Sized> StyleSink for &mut S {
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), StyleError> {
        (**self).set_property(name, value)
    }

    fn remove_property(&mut self, name: &str) -> Result<(), StyleError> {
        (**self).remove_property(name)
    }
}

/// Outcome of [`apply_theme`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Properties written.
    pub applied: usize,
    /// Stale properties removed by [`replace_theme`].
    pub removed: usize,
    /// Properties the sink rejected, with the reason.
    pub skipped: Vec<(String, StyleError)>,
}

impl ApplyReport {
    /// Whether every property was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Write every token onto `sink`. Rejected properties are skipped, not fatal.
pub fn apply_theme<S: StyleSink + ?Sized>(tokens: &TokenMap, sink: &mut S) -> ApplyReport {
    let mut report = ApplyReport::default();
    for (name, value) in tokens {
        match sink.set_property(name, value) {
            Ok(()) => report.applied += 1,
            Err(err) => {
                tracing::debug!(property = %name, error = %err, "skipping style property");
                report.skipped.push((name.clone(), err));
            }
        }
    }
    if !report.skipped.is_empty() {
        tracing::warn!(
            applied = report.applied,
            skipped = report.skipped.len(),
            "theme applied with skipped properties"
        );
    }
    report
}

/// Write `tokens` onto `sink` after removing every property of `previous`
/// that `tokens` no longer contains.
pub fn replace_theme<S: StyleSink + ?Sized>(
    previous: &TokenMap,
    tokens: &TokenMap,
    sink: &mut S,
) -> ApplyReport {
    let mut stale_skipped = Vec::new();
    let mut removed = 0;
    for name in previous.keys().filter(|name| !tokens.contains_key(*name)) {
        match sink.remove_property(name) {
            Ok(()) => removed += 1,
            Err(err) => {
                tracing::debug!(property = %name, error = %err, "failed to remove stale property");
                stale_skipped.push((name.clone(), err));
            }
        }
    }
    let mut report = apply_theme(tokens, sink);
    report.removed = removed;
    report.skipped.extend(stale_skipped);
    report
}

/// Whether `name` is a `--custom-property` identifier.
#[must_use]
pub fn is_custom_property_name(name: &str) -> bool {
    let Some(rest) = name.strip_prefix("--") else {
        return false;
    };
    !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii())
}

fn validate_declaration(name: &str, value: &str) -> Result<(), StyleError> {
    if !is_custom_property_name(name) {
        return Err(StyleError::InvalidPropertyName(name.to_string()));
    }
    let breaks_out = value
        .chars()
        .any(|c| matches!(c, ';' | '{' | '}' | '<' | '\n' | '\r'));
    if value.trim().is_empty() || breaks_out {
        return Err(StyleError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// A detached inline style: the in-memory equivalent of an element's
/// `style` attribute restricted to custom properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    props: BTreeMap<String, String>,
}

impl InlineStyle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// The current properties as a token map.
    #[must_use]
    pub fn to_tokens(&self) -> TokenMap {
        self.props.clone()
    }

    /// Serialized `style` attribute text, e.g. `--a: #FFF; --b: #000;`.
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.props {
            if !out.is_empty() {
                out.push(' ');
            }
            let _ = write!(out, "{name}: {value};");
        }
        out
    }
}

impl StyleSink for InlineStyle {
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), StyleError> {
        validate_declaration(name, value)?;
        self.props.insert(name.to_string(), value.trim().to_string());
        Ok(())
    }

    fn remove_property(&mut self, name: &str) -> Result<(), StyleError> {
        if !is_custom_property_name(name) {
            return Err(StyleError::InvalidPropertyName(name.to_string()));
        }
        self.props.remove(name);
        Ok(())
    }
}

/// A stylesheet rule accumulating custom-property declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssBlock {
    selector: String,
    decls: BTreeMap<String, String>,
}

impl CssBlock {
    /// An empty rule for `selector`.
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            decls: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Render the rule, indenting every line by `indent` spaces.
    #[must_use]
    pub fn render_indented(&self, indent: usize) -> String {
        let pad = " ".repeat(indent);
        let mut out = format!("{pad}{} {{\n", self.selector);
        for (name, value) in &self.decls {
            let _ = writeln!(out, "{pad}  {name}: {value};");
        }
        let _ = writeln!(out, "{pad}}}");
        out
    }

    /// Render the rule at the top level.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_indented(0)
    }
}

impl StyleSink for CssBlock {
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), StyleError> {
        validate_declaration(name, value)?;
        self.decls.insert(name.to_string(), value.trim().to_string());
        Ok(())
    }

    fn remove_property(&mut self, name: &str) -> Result<(), StyleError> {
        self.decls.remove(name);
        Ok(())
    }
}

impl fmt::Display for CssBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
