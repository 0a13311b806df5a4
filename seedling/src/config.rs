//! Configuration is read with the [config] crate and exposed to the engine as a
//! [PropertySource] - both for conditional singletons and for property dependencies. The same
//! configuration also yields [ApplicationConfig], used by the
//! [Application](crate::application::Application) itself.
//!
//! By default, values come from an optional `seedling.json` file, overwritten by environment
//! variables prefixed with `SEEDLING_`. Nested keys use `__` as separator, e.g.
//! `SEEDLING_SERVER__PORT` becomes `server.port`.

use config::{Config, ConfigError, Environment, File, Value, ValueKind};
use seedling_di::property::{Property, PropertySource};
use serde::Deserialize;

const CONFIG_ENV_PREFIX: &str = "SEEDLING";
const CONFIG_ENV_SEPARATOR: &str = "__";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "seedling.json";

/// Framework configuration.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApplicationConfig {
    /// Should a default tracing logger be installed in the scope of the application.
    pub install_tracing_logger: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            install_tracing_logger: true,
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
        }
    }
}

#[derive(Deserialize)]
struct OptionalApplicationConfig {
    install_tracing_logger: Option<bool>,
}

/// [PropertySource] backed by a [Config].
#[derive(Clone, Debug)]
pub struct ConfigPropertySource {
    config: Config,
}

impl ConfigPropertySource {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reads configuration from the default file and environment.
    pub fn init_from_environment() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX).separator(CONFIG_ENV_SEPARATOR))
            .build()
            .map(Self::new)
    }

    /// Reads framework configuration, using defaults for missing values.
    pub fn application_config(&self) -> Result<ApplicationConfig, ConfigError> {
        self.config
            .clone()
            .try_deserialize::<OptionalApplicationConfig>()
            .map(|config| config.into())
    }
}

impl PropertySource for ConfigPropertySource {
    fn get_or_none(&self, key: &str) -> Option<Property> {
        self.config
            .get::<Value>(key)
            .ok()
            .and_then(convert_value)
    }
}

/// Converts a config value to a property. Tables and nil values are not properties.
fn convert_value(value: Value) -> Option<Property> {
    match value.kind {
        ValueKind::Nil | ValueKind::Table(_) => None,
        ValueKind::Boolean(value) => Some(Property::Boolean(value)),
        ValueKind::I64(value) => Some(Property::Integer(value)),
        ValueKind::I128(value) => Some(
            i64::try_from(value)
                .map(Property::Integer)
                .unwrap_or_else(|_| Property::String(value.to_string())),
        ),
        ValueKind::U64(value) => Some(
            i64::try_from(value)
                .map(Property::Integer)
                .unwrap_or_else(|_| Property::String(value.to_string())),
        ),
        ValueKind::U128(value) => Some(
            i64::try_from(value)
                .map(Property::Integer)
                .unwrap_or_else(|_| Property::String(value.to_string())),
        ),
        ValueKind::Float(value) => Some(Property::Float(value)),
        ValueKind::String(value) => Some(Property::String(value)),
        ValueKind::Array(values) => Some(Property::List(
            values.into_iter().filter_map(convert_value).collect(),
        )),
    }
}
