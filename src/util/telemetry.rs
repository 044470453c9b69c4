//! Logging setup for the `ilp-plugin` binary.
//!
//! The library itself only emits `tracing` events; installing a subscriber is left to the
//! application. The filter comes from `RUST_LOG`, falling back to the configured default.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Builder for the global `tracing` subscriber.
#[derive(Debug, Clone)]
pub struct Telemetry {
    name: Option<&'static str>,
    version: Option<&'static str>,
    default_filter: String,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            name: None,
            version: None,
            default_filter: "info".to_string(),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_version(mut self, version: &'static str) -> Self {
        self.version = Some(version);
        self
    }

    /// Filter used when `RUST_LOG` is unset or invalid.
    pub fn with_default_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.default_filter = filter.into();
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }

    /// Installs the subscriber globally. Logs go to stderr so stdout stays machine-readable.
    ///
    /// Does nothing if a global subscriber is already set.
    pub fn register(self) -> Self {
        let installed = tracing_subscriber::registry()
            .with(self.env_filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!(
                "Logging initialized for {} {}",
                self.name.unwrap_or("ilp-plugin"),
                self.version.unwrap_or("")
            );
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_settings() {
        let telemetry = Telemetry::new()
            .with_name("ilp-plugin")
            .with_version("0.1.0")
            .with_default_filter("ilp_plugin=debug");
        assert_eq!(telemetry.name, Some("ilp-plugin"));
        assert_eq!(telemetry.version, Some("0.1.0"));
        assert_eq!(telemetry.default_filter, "ilp_plugin=debug");
    }

    #[test]
    fn test_register_twice_is_harmless() {
        Telemetry::new().register();
        Telemetry::new().register();
    }
}
