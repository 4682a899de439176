use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

use crate::domain::FeedbackLimits;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub backend: BackendConfig,
    #[serde(default)]
    pub tags: TagConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TagConfig {
    pub max_tags: usize,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self { max_tags: 5 }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedbackConfig {
    pub max_title_len: usize,
    pub max_content_len: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        let limits = FeedbackLimits::default();
        Self {
            max_title_len: limits.max_title_len,
            max_content_len: limits.max_content_len,
        }
    }
}

impl FeedbackConfig {
    pub fn limits(&self) -> FeedbackLimits {
        FeedbackLimits {
            max_title_len: self.max_title_len,
            max_content_len: self.max_content_len,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "demohub=debug".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // A missing .env is fine
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Start with default values
            .set_default("backend.base_url", "http://localhost:3000")?
            .set_default("backend.timeout_secs", 30)?
            .set_default("tags.max_tags", 5)?
            .set_default("feedback.max_title_len", 200)?
            .set_default("feedback.max_content_len", 5000)?
            .set_default("logging.filter", "demohub=debug")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with DEMOHUB__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("DEMOHUB").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://localhost:3000".to_string(),
                timeout_secs: 30,
            },
            tags: TagConfig::default(),
            feedback: FeedbackConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
