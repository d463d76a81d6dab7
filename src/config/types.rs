use crate::core::hosts::PREDEFINED_HOSTS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub ping: PingConfig,
    pub log: LogConfig,
    pub hosts: HostsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PingConfig {
    pub program: String,
    pub timeout_secs: u64,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            program: "ping".to_string(),
            timeout_secs: 4,
        }
    }
}

impl PingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ping_log.txt"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HostsConfig {
    pub predefined: Vec<String>,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            predefined: PREDEFINED_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}
