//! Framework configuration. [ApplicationConfig] is created with opinionated default values, which
//! can then be overwritten by environment variables prefixed with `FERRULE_` or the `ferrule.json`
//! file. [Application](crate::application::Application) uses this config to configure itself and
//! also provides it as a service, so it can be injected into any other service.

use config::{Config, ConfigError, Environment, File};
use ferrule_di::Service;
use serde::Deserialize;

const CONFIG_ENV_PREFIX: &str = "FERRULE";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "ferrule.json";

/// Framework configuration.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, Service)]
pub struct ApplicationConfig {
    /// Should a default tracing logger be installed in the scope of the application.
    pub install_tracing_logger: bool,
    /// Should the service container emit debug events for its decisions.
    pub debug: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            install_tracing_logger: true,
            debug: false,
        }
    }
}

impl From<OptionalApplicationConfig> for ApplicationConfig {
    fn from(value: OptionalApplicationConfig) -> Self {
        let default = Self::default();
        Self {
            install_tracing_logger: value
                .install_tracing_logger
                .unwrap_or(default.install_tracing_logger),
            debug: value.debug.unwrap_or(default.debug),
        }
    }
}

impl ApplicationConfig {
    /// Loads the config from [CONFIG_FILE] and the environment.
    pub fn from_environment() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()
            .and_then(|config| config.try_deserialize::<OptionalApplicationConfig>())
            .map(|config| config.into())
    }
}

#[derive(Deserialize)]
struct OptionalApplicationConfig {
    install_tracing_logger: Option<bool>,
    debug: Option<bool>,
}

#[cfg(test)]
mod tests {
    use crate::config::{ApplicationConfig, OptionalApplicationConfig};

    #[test]
    fn should_fill_missing_values_with_defaults() {
        let config: ApplicationConfig = OptionalApplicationConfig {
            install_tracing_logger: None,
            debug: Some(true),
        }
        .into();

        assert!(config.install_tracing_logger);
        assert!(config.debug);
    }

    #[test]
    fn should_keep_explicit_values() {
        let config: ApplicationConfig = OptionalApplicationConfig {
            install_tracing_logger: Some(false),
            debug: None,
        }
        .into();

        assert_eq!(
            config,
            ApplicationConfig {
                install_tracing_logger: false,
                debug: false,
            }
        );
    }
}
