//! Artifact rendering and writing.

use std::fmt;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tinta_tokens::{CssBlock, TenantTheme, ThemeError, TokenMap, apply_theme};
use tinta_web::{ThemeBundle, bootstrap_script};

use crate::cli::Opts;

pub const CSS_FILE: &str = "theme.css";
pub const JSON_FILE: &str = "theme.json";
pub const SCRIPT_FILE: &str = "theme-bootstrap.js";

/// Errors from a generator run.
#[derive(Debug)]
pub enum GenError {
    /// No `--config` was given.
    MissingConfig,
    /// The theme could not be loaded or failed `--strict` validation.
    Theme(ThemeError),
    /// `theme.json` could not be encoded.
    Json(serde_json::Error),
    /// Writing an artifact failed.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::MissingConfig => f.write_str("no tenant theme file given"),
            GenError::Theme(e) => write!(f, "tenant theme: {e}"),
            GenError::Json(e) => write!(f, "encoding {JSON_FILE}: {e}"),
            GenError::Io { path, source } => write!(f, "writing {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::MissingConfig => None,
            GenError::Theme(e) => Some(e),
            GenError::Json(e) => Some(e),
            GenError::Io { source, .. } => Some(source),
        }
    }
}

impl From<ThemeError> for GenError {
    fn from(e: ThemeError) -> Self {
        GenError::Theme(e)
    }
}

impl From<serde_json::Error> for GenError {
    fn from(e: serde_json::Error) -> Self {
        GenError::Json(e)
    }
}

/// The three generated files, in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub css: String,
    pub json: String,
    pub script: String,
}

fn block(selector: &str, tokens: &TokenMap) -> CssBlock {
    let mut block = CssBlock::new(selector);
    apply_theme(tokens, &mut block);
    block
}

/// Stylesheet with light tokens on `:root` and dark tokens for both the
/// explicit `data-theme="dark"` attribute and the system dark scheme.
#[must_use]
pub fn render_css(bundle: &ThemeBundle, tenant: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "/* Generated by tinta-gen for tenant {tenant:?}. Do not edit. */");
    out.push('\n');
    out.push_str(&block(":root", &bundle.light).render());
    out.push('\n');
    out.push_str(&block(":root[data-theme=\"dark\"]", &bundle.dark).render());
    out.push('\n');
    out.push_str("@media (prefers-color-scheme: dark) {\n");
    out.push_str(&block(":root:not([data-theme=\"light\"])", &bundle.dark).render_indented(2));
    out.push_str("}\n");
    out
}

/// Render every artifact for `theme`.
pub fn generate(theme: &TenantTheme, storage_key: &str) -> Result<Artifacts, GenError> {
    let bundle = ThemeBundle::resolve(theme);
    let mut json = serde_json::to_string_pretty(&bundle)?;
    json.push('\n');
    Ok(Artifacts {
        css: render_css(&bundle, theme.tenant_key()),
        json,
        script: bootstrap_script(theme, storage_key),
    })
}

/// Write `artifacts` into `out_dir`, creating it if needed. Returns the
/// written paths.
pub fn write_artifacts(artifacts: &Artifacts, out_dir: &Path) -> Result<Vec<PathBuf>, GenError> {
    fs::create_dir_all(out_dir).map_err(|source| GenError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let files = [
        (CSS_FILE, &artifacts.css),
        (JSON_FILE, &artifacts.json),
        (SCRIPT_FILE, &artifacts.script),
    ];
    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = out_dir.join(name);
        fs::write(&path, contents).map_err(|source| GenError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
        written.push(path);
    }
    Ok(written)
}

/// Load, validate, generate and write according to `opts`.
pub fn run(opts: &Opts) -> Result<Vec<PathBuf>, GenError> {
    let path = opts.config.as_ref().ok_or(GenError::MissingConfig)?;
    let theme = TenantTheme::from_path(path)?;

    if opts.strict {
        theme.validate()?;
    } else {
        for invalid in theme.invalid_tokens() {
            tracing::warn!(token = %invalid.name, problem = %invalid, "invalid tenant token, deriving leniently");
        }
    }

    let artifacts = generate(&theme, &opts.storage_key)?;
    let written = write_artifacts(&artifacts, &opts.out_dir)?;
    tracing::info!(
        tenant = theme.tenant_key(),
        out_dir = %opts.out_dir.display(),
        files = written.len(),
        "generated theme"
    );
    Ok(written)
}
