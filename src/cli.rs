//! Command line arguments of the `ilp-plugin` binary.

use clap::Parser;
use ilp_plugin::config::{CreateOptions, PluginOptions};

/// Environment fallbacks are applied by the resolver, not by clap, so that parameters,
/// environment and defaults keep their precedence and source reporting.
#[derive(Parser, Debug)]
#[command(name = "ilp-plugin")]
#[command(about = "Resolve which plugin module would be created, and with which options")]
pub struct CliArgs {
    /// Module identifier of the plugin
    #[arg(long)]
    pub plugin: Option<String>,
    /// Plugin options, as a JSON object
    #[arg(long, value_parser = parse_options)]
    pub options: Option<PluginOptions>,
    /// Deprecated: username in the generated default connection string
    #[arg(long)]
    pub name: Option<String>,
    /// Pretty-print the resolved configuration
    #[arg(long)]
    pub pretty: bool,
}

impl CliArgs {
    pub fn create_options(&self) -> CreateOptions {
        CreateOptions {
            plugin: self.plugin.clone(),
            options: self.options.clone(),
            name: self.name.clone(),
        }
    }
}

fn parse_options(s: &str) -> Result<PluginOptions, String> {
    serde_json::from_str(s).map_err(|e| format!("expected a JSON object: {}", e))
}
