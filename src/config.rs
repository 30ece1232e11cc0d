use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub track: TrackConfig,
    #[serde(default)]
    pub default_satellite: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackConfig {
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_step_secs")]
    pub step_secs: u64,
    #[serde(default = "default_cadence_secs")]
    pub cadence_secs: u64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            step_secs: default_step_secs(),
            cadence_secs: default_cadence_secs(),
        }
    }
}

fn default_window_secs() -> u64 {
    7200
}

fn default_step_secs() -> u64 {
    20
}

fn default_cadence_secs() -> u64 {
    1
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
