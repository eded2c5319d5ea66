use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositorySettings {
    /// "demo" serves the bundled listings; "remote" fetches from `endpoint`
    #[serde(default = "default_repository_source")]
    pub source: String,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            source: default_repository_source(),
            endpoint: None,
            api_key: None,
        }
    }
}

fn default_repository_source() -> String {
    "demo".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub capacity: Option<u64>,
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
    #[serde(default = "default_room_type_weight")]
    pub room_type: f64,
    #[serde(default = "default_dates_weight")]
    pub dates: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            location: default_location_weight(),
            budget: default_budget_weight(),
            room_type: default_room_type_weight(),
            dates: default_dates_weight(),
        }
    }
}

fn default_location_weight() -> f64 { 0.40 }
fn default_budget_weight() -> f64 { 0.30 }
fn default_room_type_weight() -> f64 { 0.20 }
fn default_dates_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with NURSENEST_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with NURSENEST_)
            // e.g., NURSENEST_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("NURSENEST")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("NURSENEST")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply direct environment overrides for the listing repository
///
/// LISTINGS_ENDPOINT / LISTINGS_API_KEY are checked first so deploys can
/// point at a repository without the prefixed double-underscore form.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let endpoint = env::var("LISTINGS_ENDPOINT")
        .or_else(|_| env::var("NURSENEST_REPOSITORY__ENDPOINT"))
        .ok();
    let api_key = env::var("LISTINGS_API_KEY")
        .or_else(|_| env::var("NURSENEST_REPOSITORY__API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = endpoint {
        builder = builder
            .set_override("repository.endpoint", endpoint)?
            .set_override("repository.source", "remote")?;
    }
    if let Some(api_key) = api_key {
        builder = builder.set_override("repository.api_key", api_key)?;
    }

    builder.build()
}
