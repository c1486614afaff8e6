//! Core application framework functionality.

use crate::config::ApplicationConfig;
use crate::runner::ApplicationRunnerPtr;
use config::ConfigError;
use derive_more::Constructor;
use ferrule_di::error::{ErrorPtr, InjectorError, ResolutionError};
use ferrule_di::injector::{Injector, InjectorConfig};
use ferrule_di::resolver::TypedServiceResolver;
use itertools::Itertools;
use std::cmp::Reverse;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Error loading configuration: {0}")]
    ConfigError(#[source] ConfigError),
    #[error("Error registering services: {0}")]
    ServiceError(#[source] InjectorError),
    #[error("Error retrieving runners: {0}")]
    RunnerInjectionError(#[source] ResolutionError),
    #[error("Runner error: {0}")]
    RunnerError(ErrorPtr),
}

/// Main entrypoint for the application. Runs [ApplicationRunners](crate::runner::ApplicationRunner)
/// provided to its [Injector] and shuts the container down afterwards.
#[derive(Constructor)]
pub struct Application {
    injector: Injector,
}

impl Application {
    /// Creates an application with a container configured from `config`. The config itself is
    /// provided as a service.
    pub fn from_config(config: &ApplicationConfig) -> Result<Self, ApplicationError> {
        let injector = Injector::with_config(&InjectorConfig {
            debug: config.debug,
        });

        injector
            .provide(config.clone())
            .map_err(ApplicationError::ServiceError)?;

        Ok(Self::new(injector))
    }

    /// The container to provide services to.
    #[inline]
    pub fn injector(&self) -> &Injector {
        &self.injector
    }

    /// Runs all runners by descending priority, stopping at the first error. The container is
    /// always shut down afterwards.
    pub fn run(&self) -> Result<(), ApplicationError> {
        let result = self.run_runners();

        info!("Shutting down services...");
        self.injector.shutdown();

        result
    }

    fn run_runners(&self) -> Result<(), ApplicationError> {
        info!("Searching for application runners...");

        let runners = self
            .injector
            .get_all::<ApplicationRunnerPtr>()
            .map_err(ApplicationError::RunnerInjectionError)?;

        info!("Running {} application runners...", runners.len());

        runners
            .into_iter()
            .sorted_by_key(|runner| Reverse(runner.priority()))
            .try_for_each(|runner| runner.run().map_err(ApplicationError::RunnerError))
    }
}

/// Installs a global `tracing` subscriber configured from the `RUST_LOG` environment variable.
/// Does nothing if a global subscriber is already installed.
pub fn install_tracing_logger() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Creates an [Application] configured from the environment, installing the tracing logger if
/// enabled in the config.
pub fn create_default() -> Result<Application, ApplicationError> {
    let config = ApplicationConfig::from_environment().map_err(ApplicationError::ConfigError)?;
    if config.install_tracing_logger {
        install_tracing_logger();
    }

    Application::from_config(&config)
}
