//! Command-line argument parsing for the theme generator.
//!
//! Parses args manually to keep the binary lean. Every option can also be
//! set through a `TINTA_*` environment variable; explicit flags win.

use std::env;
use std::path::PathBuf;
use std::process;

use tinta_web::DEFAULT_STORAGE_KEY;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
tinta-gen: derive a tenant's full color palette and emit theme assets

USAGE:
    tinta-gen --config=PATH [OPTIONS]

OPTIONS:
    --config=PATH        Tenant theme JSON file (required)
    --out-dir=DIR        Directory for generated files (default: .)
    --storage-key=KEY    localStorage key holding the user's preference
                         (default: tinta-theme)
    --strict             Fail on invalid token names or colors instead of
                         warning and deriving leniently
    --log-json           Emit logs as JSON lines
    --help, -h           Show this help message
    --version, -V        Show version

OUTPUT:
    theme.css            :root light tokens, dark tokens for data-theme and
                         prefers-color-scheme
    theme.json           Resolved { light, dark } token maps
    theme-bootstrap.js   Inline script applying the persisted mode

ENVIRONMENT VARIABLES:
    TINTA_CONFIG         Override --config
    TINTA_OUT_DIR        Override --out-dir
    TINTA_STORAGE_KEY    Override --storage-key
    TINTA_STRICT         Set to 1 to enable --strict
    TINTA_LOG_JSON       Set to 1 to enable --log-json
    RUST_LOG             Log filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Tenant theme file.
    pub config: Option<PathBuf>,
    /// Output directory.
    pub out_dir: PathBuf,
    /// `localStorage` key baked into the bootstrap script.
    pub storage_key: String,
    /// Reject invalid tokens instead of warning.
    pub strict: bool,
    /// JSON log output.
    pub log_json: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            config: None,
            out_dir: PathBuf::from("."),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            strict: false,
            log_json: false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version` or a usage error.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |name| env::var(name).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("tinta-gen {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
        }
    }

    /// Parse `args` with `lookup` supplying environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse_from<I, F>(args: I, lookup: F) -> Result<Command, String>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = lookup("TINTA_CONFIG").filter(|v| !v.is_empty()) {
            opts.config = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("TINTA_OUT_DIR").filter(|v| !v.is_empty()) {
            opts.out_dir = PathBuf::from(val);
        }
        if let Some(val) = lookup("TINTA_STORAGE_KEY").filter(|v| !v.is_empty()) {
            opts.storage_key = val;
        }
        if let Some(val) = lookup("TINTA_STRICT") {
            opts.strict = env_flag(&val);
        }
        if let Some(val) = lookup("TINTA_LOG_JSON") {
            opts.log_json = env_flag(&val);
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--strict" => opts.strict = true,
                "--log-json" => opts.log_json = true,
                other => {
                    if let Some(val) = other.strip_prefix("--config=") {
                        opts.config = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--out-dir=") {
                        opts.out_dir = PathBuf::from(val);
                    } else if let Some(val) = other.strip_prefix("--storage-key=") {
                        if val.is_empty() {
                            return Err("Invalid --storage-key value: empty".into());
                        }
                        opts.storage_key = val.to_string();
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        if opts.config.is_none() {
            return Err("Missing tenant theme: pass --config=PATH or set TINTA_CONFIG".into());
        }
        Ok(Command::Run(opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Command, String> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Opts::parse_from(args.iter().map(|s| s.to_string()), |name| {
            env.get(name).cloned()
        })
    }

    fn run_opts(args: &[&str], env: &[(&str, &str)]) -> Opts {
        match parse(args, env) {
            Ok(Command::Run(opts)) => opts,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.config, None);
        assert_eq!(opts.out_dir, PathBuf::from("."));
        assert_eq!(opts.storage_key, "tinta-theme");
        assert!(!opts.strict);
        assert!(!opts.log_json);
    }

    #[test]
    fn flags_parse() {
        let opts = run_opts(
            &[
                "--config=tenant.json",
                "--out-dir=dist",
                "--storage-key=acme-theme",
                "--strict",
                "--log-json",
            ],
            &[],
        );
        assert_eq!(opts.config, Some(PathBuf::from("tenant.json")));
        assert_eq!(opts.out_dir, PathBuf::from("dist"));
        assert_eq!(opts.storage_key, "acme-theme");
        assert!(opts.strict);
        assert!(opts.log_json);
    }

    #[test]
    fn env_fills_in_and_flags_override() {
        let env = [
            ("TINTA_CONFIG", "env.json"),
            ("TINTA_OUT_DIR", "env-out"),
            ("TINTA_STRICT", "1"),
        ];
        let opts = run_opts(&[], &env);
        assert_eq!(opts.config, Some(PathBuf::from("env.json")));
        assert_eq!(opts.out_dir, PathBuf::from("env-out"));
        assert!(opts.strict);

        let opts = run_opts(&["--config=flag.json"], &env);
        assert_eq!(opts.config, Some(PathBuf::from("flag.json")));
        assert_eq!(opts.out_dir, PathBuf::from("env-out"));
    }

    #[test]
    fn env_flag_values() {
        assert!(env_flag("1"));
        assert!(env_flag("TRUE"));
        assert!(env_flag(" yes "));
        assert!(!env_flag("0"));
        assert!(!env_flag(""));
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse(&["--help"], &[]), Ok(Command::Help));
        assert_eq!(parse(&["-V", "--bogus"], &[]), Ok(Command::Version));
    }

    #[test]
    fn missing_config_is_an_error() {
        let err = parse(&["--out-dir=dist"], &[]).unwrap_err();
        assert!(err.contains("--config"));
    }

    #[test]
    fn unknown_and_empty_values_are_errors() {
        assert_eq!(
            parse(&["--config=a.json", "--verbose"], &[]),
            Err("Unknown argument: --verbose".to_string())
        );
        assert!(parse(&["--config=a.json", "--storage-key="], &[]).is_err());
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_lists_every_env_var() {
        for var in [
            "TINTA_CONFIG",
            "TINTA_OUT_DIR",
            "TINTA_STORAGE_KEY",
            "TINTA_STRICT",
            "TINTA_LOG_JSON",
        ] {
            assert!(HELP_TEXT.contains(var), "{var} missing from HELP_TEXT");
        }
    }
}
