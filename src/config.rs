use crate::convert::types::{MiddlewareName, RawConvertConfig, ReplaceValue};
use crate::domain::config_types::{Host, LogFormat, LogLevel, Port};
use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Prefix of environment variables overriding settings, e.g.
/// `CONVERT_HEADER__MIDDLEWARE__FROM_HEADER`
pub const ENV_PREFIX: &str = "CONVERT_HEADER";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub logging: LoggingSettings,
    pub middleware: MiddlewareSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: Host,
    pub port: Port,
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub format: LogFormat,
}

/// The header conversion to run, in snake_case settings form
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MiddlewareSettings {
    pub name: MiddlewareName,
    pub from_header: String,
    pub create_header: String,
    pub convert_type: String,
    pub replace_values: Vec<ReplaceValueSettings>,
    pub prefix: String,
    pub postfix: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ReplaceValueSettings {
    pub old_value: String,
    pub new_value: String,
}

impl MiddlewareSettings {
    /// The unvalidated conversion config these settings describe
    pub fn raw_config(&self) -> RawConvertConfig {
        RawConvertConfig {
            from_header: self.from_header.clone(),
            create_header: self.create_header.clone(),
            convert_type: self.convert_type.clone(),
            replace_values: self
                .replace_values
                .iter()
                .map(|rv| ReplaceValue::new(rv.old_value.clone(), rv.new_value.clone()))
                .collect(),
            prefix: self.prefix.clone(),
            postfix: self.postfix.clone(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Self::builder(&environment)?
            // Add configuration file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    /// A builder holding only the default values
    pub fn builder(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("application.environment", environment)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("middleware.name", MiddlewareName::default().into_inner())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }
}
