use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::types::AnyResult;
use crate::configs::*;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub converter: ConverterSettings,
    #[serde(default)]
    pub job: JobConfig,
}

impl Config {
    /// Load `path`, or the first of `config.toml` / `config.default.toml`.
    pub fn load(path: Option<&str>) -> AnyResult<Self> {
        let config_path = match path {
            Some(p) => p,
            None if Path::new("config.toml").exists() => "config.toml",
            None if Path::new("config.default.toml").exists() => "config.default.toml",
            None => return Err("config.toml or config.default.toml not found".into()),
        };

        eprintln!("Loading configuration from: {}", config_path);

        let config_str = std::fs::read_to_string(config_path)?;
        if config_str.trim().is_empty() {
            return Err(format!("{} is empty", config_path).into());
        }

        Self::parse(&config_str)
    }

    pub fn parse(config_str: &str) -> AnyResult<Self> {
        let config: Config = toml::from_str(config_str)?;
        if config.job.chunk_frames == 0 {
            return Err("job.chunk_frames must be greater than zero".into());
        }
        Ok(config)
    }
}
