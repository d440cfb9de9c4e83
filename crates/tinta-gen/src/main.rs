#![forbid(unsafe_code)]

//! `tinta-gen` binary entry point.

use std::process;

use tinta_gen::cli;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("tinta-gen: logging disabled: {e}");
    }
}

fn main() {
    let opts = cli::Opts::parse();
    init_tracing(opts.log_json);

    match tinta_gen::run(&opts) {
        Ok(written) => {
            for path in written {
                println!("{}", path.display());
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            eprintln!("tinta-gen: {e}");
            process::exit(1);
        }
    }
}
