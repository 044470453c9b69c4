//! `ilp-plugin` command line entrypoint.
//!
//! Prints, as JSON, the plugin module and options that `create_plugin` would use given the
//! command line arguments and the environment. Nothing is constructed or connected.
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `PLUGIN_MODULE`, `PLUGIN_OPTIONS`, `PLUGIN_CREDENTIALS`, `PLUGIN_BTP_SERVER`
//! - `RUST_LOG` controls log verbosity (logs go to stderr)

mod cli;

use clap::Parser;
use dotenvy::dotenv;
use ilp_plugin::config::{PluginEnv, resolve};
use ilp_plugin::util::Telemetry;
use std::process;

use crate::cli::CliArgs;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .register();

    let args = CliArgs::parse();
    let config = resolve(&PluginEnv::from_process(), &args.create_options())?;
    tracing::info!(
        "Resolved module '{}' via {}, options via {}",
        config.module,
        config.module_source,
        config.options_source
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&config)?
    } else {
        serde_json::to_string(&config)?
    };
    println!("{output}");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        process::exit(1)
    }
}
