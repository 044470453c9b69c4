//! The plugin capability contract and the conformance guard.
//!
//! A plugin moves data and money between two parties. Implementations live outside this
//! crate; they only have to implement [`Plugin`] (and thereby [`EventEmitter`]) and be
//! registered under a module identifier in a [`PluginRegistry`](crate::registry::PluginRegistry).
//!
//! Constructors hand back a type-erased [`PluginValue`]. Whether that value actually is a
//! plugin is decided by [`is_plugin`], before anything is returned to the caller.

use futures_util::future::BoxFuture;
use std::any::Any;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Current version of the plugin API.
pub const PLUGIN_API_VERSION: u16 = 2;

/// Handler invoked for every incoming data packet. Returns the response packet.
pub type DataHandler =
    Arc<dyn Fn(Vec<u8>) -> BoxFuture<'static, Result<Vec<u8>, PluginError>> + Send + Sync>;

/// Handler invoked for every incoming settlement. The amount is a decimal string in base units.
pub type MoneyHandler =
    Arc<dyn Fn(String) -> BoxFuture<'static, Result<(), PluginError>> + Send + Sync>;

/// Errors reported by plugin implementations.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Plugin is not connected")]
    NotConnected,
    #[error("Connection timed out after {0:?}")]
    Timeout(Duration),
    #[error("A {0} handler is already registered")]
    HandlerAlreadyRegistered(&'static str),
    #[error("No {0} handler registered")]
    NoHandler(&'static str),
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Options accepted by [`Plugin::connect`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    pub timeout: Option<Duration>,
}

/// Lifecycle events a plugin emits.
#[derive(Debug, Clone)]
pub enum PluginEvent {
    Connect,
    Disconnect,
    Error(Arc<PluginError>),
}

/// Event subscription capability every plugin carries.
pub trait EventEmitter {
    /// Subscribes to the plugin's lifecycle events.
    fn subscribe(&self) -> broadcast::Receiver<PluginEvent>;
}

/// Fan-out of [`PluginEvent`]s, for plugin implementations.
///
/// Emitting without subscribers is not an error; the event is dropped.
#[derive(Debug, Clone)]
pub struct EventBus(broadcast::Sender<PluginEvent>);

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self(sender)
    }

    pub fn emit(&self, event: PluginEvent) {
        let _ = self.0.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}

impl EventEmitter for EventBus {
    fn subscribe(&self) -> broadcast::Receiver<PluginEvent> {
        self.0.subscribe()
    }
}

/// The full plugin capability contract.
///
/// `connect`, `disconnect`, `is_connected`, `send_data`, `send_money`,
/// `register_data_handler`, `deregister_data_handler`, `register_money_handler` and
/// `deregister_money_handler` are required. Admin info is optional.
#[async_trait::async_trait]
pub trait Plugin: EventEmitter + Send + Sync {
    /// Plugin API version implemented.
    fn version(&self) -> u16 {
        PLUGIN_API_VERSION
    }

    async fn connect(&self, options: ConnectOptions) -> Result<(), PluginError>;

    async fn disconnect(&self) -> Result<(), PluginError>;

    fn is_connected(&self) -> bool;

    /// Sends a data packet to the peer and waits for its response.
    async fn send_data(&self, data: Vec<u8>) -> Result<Vec<u8>, PluginError>;

    /// Sends a settlement of `amount` base units to the peer.
    async fn send_money(&self, amount: String) -> Result<(), PluginError>;

    fn register_data_handler(&self, handler: DataHandler) -> Result<(), PluginError>;

    fn deregister_data_handler(&self);

    fn register_money_handler(&self, handler: MoneyHandler) -> Result<(), PluginError>;

    fn deregister_money_handler(&self);

    async fn get_admin_info(&self) -> Result<serde_json::Value, PluginError> {
        Err(PluginError::Unsupported("get_admin_info"))
    }

    async fn send_admin_info(
        &self,
        _info: serde_json::Value,
    ) -> Result<serde_json::Value, PluginError> {
        Err(PluginError::Unsupported("send_admin_info"))
    }
}

/// A value produced by a plugin constructor, not yet checked by [`is_plugin`].
pub struct PluginValue(Box<dyn Any + Send + Sync>);

impl PluginValue {
    /// Wraps a plugin implementation.
    pub fn plugin<P: Plugin + 'static>(plugin: P) -> Self {
        let plugin: Box<dyn Plugin> = Box::new(plugin);
        Self(Box::new(plugin))
    }

    /// Wraps an arbitrary value. It passes the guard only if it is a `Box<dyn Plugin>`.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Consumes the value, yielding the plugin or giving the value back unchanged.
    pub fn into_plugin(self) -> Result<Box<dyn Plugin>, PluginValue> {
        self.0
            .downcast::<Box<dyn Plugin>>()
            .map(|plugin| *plugin)
            .map_err(PluginValue)
    }
}

impl<P: Plugin + 'static> From<P> for PluginValue {
    fn from(plugin: P) -> Self {
        PluginValue::plugin(plugin)
    }
}

impl Debug for PluginValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PluginValue")
            .field(&if is_plugin(self) { "plugin" } else { "opaque" })
            .finish()
    }
}

/// Returns `true` if `value` satisfies the plugin contract.
pub fn is_plugin(value: &PluginValue) -> bool {
    (*value.0).is::<Box<dyn Plugin>>()
}
