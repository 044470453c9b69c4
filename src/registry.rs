//! Registry of plugin constructors, keyed by module identifier.
//!
//! Plugins are not discovered at runtime. An application registers every implementation it
//! ships with at startup, and the factory selects one by the identifier resolved from
//! parameters or environment:
//!
//! ```ignore
//! let registry = PluginRegistry::new()
//!     .and_register(BtpBlueprint)
//!     .and_register(FnBlueprint::new("ilp-plugin-mirror", |options, services| {
//!         Ok(MirrorPlugin::new(options, services).into())
//!     }));
//! ```

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;

use crate::config::PluginOptions;
use crate::factory::PluginServices;
use crate::plugin::PluginValue;

/// Error type constructors may fail with. It reaches the caller unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Knows how to construct one plugin module.
pub trait PluginBlueprint: Send + Sync {
    /// Module identifier this blueprint is registered under.
    fn module(&self) -> &str;

    /// Constructs a new, unconnected instance.
    fn build(
        &self,
        options: PluginOptions,
        services: PluginServices,
    ) -> Result<PluginValue, BoxError>;
}

/// [`PluginBlueprint`] backed by a closure.
pub struct FnBlueprint<F> {
    module: String,
    build: F,
}

impl<F> FnBlueprint<F>
where
    F: Fn(PluginOptions, PluginServices) -> Result<PluginValue, BoxError> + Send + Sync,
{
    pub fn new<S: Into<String>>(module: S, build: F) -> Self {
        Self {
            module: module.into(),
            build,
        }
    }
}

impl<F> PluginBlueprint for FnBlueprint<F>
where
    F: Fn(PluginOptions, PluginServices) -> Result<PluginValue, BoxError> + Send + Sync,
{
    fn module(&self) -> &str {
        &self.module
    }

    fn build(
        &self,
        options: PluginOptions,
        services: PluginServices,
    ) -> Result<PluginValue, BoxError> {
        (self.build)(options, services)
    }
}

#[derive(Default)]
pub struct PluginRegistry(HashMap<String, Box<dyn PluginBlueprint>>);

impl Debug for PluginRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PluginRegistry")
            .field(&self.modules())
            .finish()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and_register<B: PluginBlueprint + 'static>(mut self, blueprint: B) -> Self {
        self.register(blueprint);
        self
    }

    /// Registers `blueprint`, replacing any earlier one with the same module identifier.
    pub fn register<B: PluginBlueprint + 'static>(&mut self, blueprint: B) {
        let module = blueprint.module().to_string();
        if self.0.insert(module.clone(), Box::new(blueprint)).is_some() {
            tracing::warn!("Replacing previously registered plugin module '{}'", module);
        }
    }

    pub fn by_module(&self, module: &str) -> Option<&dyn PluginBlueprint> {
        self.0.get(module).map(|v| v.deref())
    }

    /// Registered module identifiers, sorted.
    pub fn modules(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = self.0.keys().map(String::as_str).collect();
        modules.sort_unstable();
        modules
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
