use serde::Deserialize;

use crate::engine::rollup::RollupConfig;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub decode: DecodeConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub rollups: RollupConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DecodeConfig {
    /// On duplicate timestamps keep the first column seen instead of the last
    #[serde(default)]
    pub keep_earliest: bool,
    /// Columns are delivered in descending time order
    #[serde(default)]
    pub reversed: bool,
}

/// Byte widths of the row key components.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub salt_width: usize,
    #[serde(default = "default_uid_width")]
    pub metric_width: usize,
    #[serde(default = "default_uid_width")]
    pub tagk_width: usize,
    #[serde(default = "default_uid_width")]
    pub tagv_width: usize,
}

fn default_uid_width() -> usize {
    3
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            salt_width: 0,
            metric_width: default_uid_width(),
            tagk_width: default_uid_width(),
            tagv_width: default_uid_width(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            stdout_level: "info".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path =
        env::var("TSDB_DECODER_CONFIG").unwrap_or_else(|_| "config".to_string());

    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path))
        .build()?
        .try_deserialize()?;

    settings
        .rollups
        .validate()
        .map_err(|e| config::ConfigError::Message(e.to_string()))?;

    Ok(settings)
}
