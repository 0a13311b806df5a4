//! Core application framework functionality.

use crate::config::{ApplicationConfig, ConfigPropertySource};
use crate::runner::{runner_list_type, ApplicationRunnerPtr};
use config::ConfigError;
use derive_more::Constructor;
use seedling_di::context::Context;
use seedling_di::definition_source::StaticDefinitionSource;
use seedling_di::factory::ContextFactory;
use seedling_di::instance::{ErrorPtr, InstancePtr};
use seedling_di::ContextError;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Error, Debug)]
pub enum ApplicationError {
    #[error("Error creating context: {0}")]
    ContextError(ContextError),
    #[error("Runner error: {0}")]
    RunnerError(ErrorPtr),
}

/// Main entrypoint for the application. Creates the [Context] and runs
/// [ApplicationRunners](crate::runner::ApplicationRunner) found in it.
#[derive(Constructor)]
pub struct Application {
    context_factory: ContextFactory,
    config: ApplicationConfig,
}

impl Application {
    /// Runs the application, returning the created context on success.
    pub fn run(&self) -> Result<Context, ApplicationError> {
        let _logger_guard = self.config.install_tracing_logger.then(|| {
            tracing::subscriber::set_default(
                tracing_subscriber::fmt()
                    .with_env_filter(EnvFilter::from_default_env())
                    .finish(),
            )
        });

        info!("Creating application context...");

        let context = self
            .context_factory
            .create_context()
            .map_err(ApplicationError::ContextError)?;

        let mut runners = context
            .find_list_typed::<InstancePtr<ApplicationRunnerPtr>>(&runner_list_type(), None, None)
            .map_err(ApplicationError::ContextError)?;

        runners.sort_by_key(|runner| -i16::from(runner.priority()));

        info!("Running {} application runners...", runners.len());

        for runner in &runners {
            runner.run().map_err(ApplicationError::RunnerError)?;
        }

        Ok(context)
    }
}

/// Creates an [Application] with statically registered definitions and configuration read from the
/// environment.
pub fn create_default() -> Result<Application, ConfigError> {
    let property_source = ConfigPropertySource::init_from_environment()?;
    let config = property_source.application_config()?;

    Ok(Application::new(
        ContextFactory::new(Box::new(StaticDefinitionSource), Box::new(property_source)),
        config,
    ))
}
