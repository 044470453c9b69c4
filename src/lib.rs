//! Creation of Interledger plugins from configuration.
//!
//! A plugin is the component that moves data and money between two parties (for example a
//! client of the Bilateral Transfer Protocol). This crate does not implement any plugin. It
//! decides which one to create and with which options, constructs it from a registry of
//! known implementations, and checks that the result honours the plugin contract.
//!
//! # Modules
//!
//! - [`config`] - Resolution of module and options from parameters, environment and defaults
//! - [`factory`] - [`create_plugin`] and its error type
//! - [`plugin`] - The [`Plugin`] trait and the [`is_plugin`] conformance guard
//! - [`registry`] - Module identifier to constructor mapping
//! - [`store`] - Key-value store offered to plugins
//! - [`util`] - Logging setup
//!
//! # Example
//!
//! ```ignore
//! use ilp_plugin::{CreateOptions, PluginRegistry, PluginServices, create_plugin_from_env};
//!
//! let registry = PluginRegistry::new().and_register(BtpBlueprint);
//! // Uses PLUGIN_MODULE / PLUGIN_OPTIONS if set, or connects to a local moneyd.
//! let plugin = create_plugin_from_env(&registry, &CreateOptions::new(), PluginServices::new())?;
//! ```

pub mod config;
pub mod factory;
pub mod plugin;
pub mod registry;
pub mod store;
pub mod util;

pub use config::{
    CreateOptions, DEFAULT_PLUGIN_MODULE, PluginEnv, PluginOptions, ResolvedConfig, resolve,
};
pub use factory::{CreatePluginError, PluginServices, create_plugin, create_plugin_from_env};
pub use plugin::{Plugin, PluginValue, is_plugin};
pub use registry::{FnBlueprint, PluginBlueprint, PluginRegistry};
