//! # Ray March Runtime
//!
//! Entry point for the headless driver. See [`runtime::config::Args`] for
//! the flags. Logging follows `RUST_LOG` and defaults to `info`.

use anyhow::Result;
use clap::Parser;
use runtime::config::Args;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    runtime::app::run(&args)
}
