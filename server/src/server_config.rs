use std::io::ErrorKind;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub cleanup_check_interval_secs: u64,
    pub inactivity_timeout_secs: u64,
    /// When set, every request must carry a matching `x-api-key` header.
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            cleanup_check_interval_secs: 300,
            inactivity_timeout_secs: 3600,
            api_key: None,
        }
    }
}

impl ServerConfig {
    /// Reads the YAML config file. A missing file is not an error; the
    /// server just runs with defaults.
    pub fn load(file_path: &str) -> Result<Self, String> {
        match std::fs::read_to_string(file_path) {
            Ok(content) => Self::parse(&content),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(format!("Failed to read config file: {}", err)),
        }
    }

    fn parse(content: &str) -> Result<Self, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize config: {}", e))
    }

    pub fn cleanup_check_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_check_interval_secs)
    }

    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }
}
