//! Creation of plugin instances.
//!
//! [`create_plugin`] resolves which module to use and with which options (see
//! [`config`](crate::config)), constructs it through the [`PluginRegistry`] and checks the
//! result with [`is_plugin`](crate::plugin::is_plugin) before handing it out.
//!
//! Every call constructs a fresh instance. The instance is returned unconnected; calling
//! [`Plugin::connect`] is up to the caller.
//!
//! ```ignore
//! let registry = PluginRegistry::new().and_register(BtpBlueprint);
//! let plugin = create_plugin_from_env(
//!     &registry,
//!     &CreateOptions::new().with_options(options),
//!     PluginServices::new(),
//! )?;
//! plugin.connect(ConnectOptions::default()).await?;
//! ```

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::config::{ConfigError, CreateOptions, PluginEnv, resolve};
use crate::plugin::Plugin;
use crate::registry::{BoxError, PluginRegistry};
use crate::store::Store;

/// Services shared with the plugin being constructed.
#[derive(Clone, Default)]
pub struct PluginServices {
    pub store: Option<Arc<dyn Store>>,
    /// Span the plugin should log under.
    pub log: Option<tracing::Span>,
}

impl PluginServices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_log(mut self, log: tracing::Span) -> Self {
        self.log = Some(log);
        self
    }
}

impl Debug for PluginServices {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginServices")
            .field("store", &self.store.as_ref().map(|_| "Store"))
            .field("log", &self.log)
            .finish()
    }
}

/// Errors returned by [`create_plugin`].
#[derive(Debug, thiserror::Error)]
pub enum CreatePluginError {
    /// Options taken from the environment are not a JSON object.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// No plugin is registered under the module identifier.
    #[error("Cannot find module '{0}'")]
    ModuleNotFound(String),
    /// The plugin constructor failed. Carries its error unchanged.
    #[error(transparent)]
    Construction(BoxError),
    /// The constructor produced something that is not a plugin.
    #[error("Invalid module: '{0}'")]
    InvalidPlugin(String),
}

/// Creates a plugin, reading configuration fallbacks from the process environment.
pub fn create_plugin_from_env(
    registry: &PluginRegistry,
    params: &CreateOptions,
    services: PluginServices,
) -> Result<Box<dyn Plugin>, CreatePluginError> {
    create_plugin(registry, &PluginEnv::from_process(), params, services)
}

/// Creates a plugin.
///
/// Module and options come from `params`, then `env`, then defaults.
///
/// # Errors
///
/// - [`CreatePluginError::Config`] if options in `env` are malformed,
/// - [`CreatePluginError::ModuleNotFound`] if the module is not registered,
/// - [`CreatePluginError::Construction`] if its constructor fails,
/// - [`CreatePluginError::InvalidPlugin`] if the constructed value is not a plugin.
pub fn create_plugin(
    registry: &PluginRegistry,
    env: &PluginEnv,
    params: &CreateOptions,
    services: PluginServices,
) -> Result<Box<dyn Plugin>, CreatePluginError> {
    let config = resolve(env, params).inspect_err(|err| {
        tracing::error!("Unable to resolve plugin configuration: {}", err);
    })?;
    let module = config.module;
    let _span = tracing::debug_span!("create_plugin", module = %module).entered();

    tracing::debug!("Loading module '{}' defined via {}.", module, config.module_source);
    let Some(blueprint) = registry.by_module(&module) else {
        tracing::error!(
            "Cannot find module '{}'. Registered modules: {:?}",
            module,
            registry.modules()
        );
        return Err(CreatePluginError::ModuleNotFound(module));
    };

    tracing::debug!(
        "Creating plugin using options defined via {}.",
        config.options_source
    );
    let value = blueprint.build(config.options, services).map_err(|err| {
        tracing::error!(
            "Unable to create instance of plugin from '{}' module: {}",
            module,
            err
        );
        CreatePluginError::Construction(err)
    })?;

    value.into_plugin().map_err(move |_| {
        tracing::error!("{} is not a valid plugin.", module);
        CreatePluginError::InvalidPlugin(module)
    })
}
