use super::types::GlobalConfig;
use crate::core::errors::HostpingError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG: &str = "hostping.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// An explicit path must exist and parse; files found on the default
    /// search path are skipped with a warning when broken
    pub fn load_with_custom_path(custom_path: Option<&Path>) -> Result<GlobalConfig> {
        if let Some(path) = custom_path {
            return Self::load_from_file(path)
                .with_context(|| format!("Failed to load config from {:?}", path));
        }

        for path in Self::default_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from: {:?}", path);
                    return Ok(config);
                }
                Err(e) => {
                    tracing::warn!("Ignoring config {:?}: {:#}", path, e);
                }
            }
        }

        tracing::info!("No configuration file found, using default settings");
        Ok(GlobalConfig::default())
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dirs) = ProjectDirs::from("io", "hostping", "hostping") {
            paths.push(dirs.config_dir().join("config.toml"));
        }
        paths
    }

    fn load_from_file(path: &Path) -> Result<GlobalConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: GlobalConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {:?}", path))?;

        Self::validate_config(&config)?;

        Ok(config)
    }

    fn validate_config(config: &GlobalConfig) -> Result<(), HostpingError> {
        if config.ping.program.trim().is_empty() {
            return Err(HostpingError::Config("ping.program cannot be empty".into()));
        }
        if config.ping.timeout_secs == 0 {
            return Err(HostpingError::Config(
                "ping.timeout_secs must be greater than 0".into(),
            ));
        }
        if config.hosts.predefined.iter().all(|h| h.trim().is_empty()) {
            return Err(HostpingError::Config(
                "hosts.predefined must name at least one host".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert_eq!(config.ping.program, "ping");
        assert_eq!(config.ping.timeout_secs, 4);
        assert_eq!(config.log.path, PathBuf::from("ping_log.txt"));
        assert_eq!(
            config.hosts.predefined,
            vec!["google.com", "yahoo.com", "bing.com", "nonexistent.domain.test", "10.255.255.1"]
        );
    }

    #[test]
    fn test_load_custom_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[ping]
program = "/usr/bin/ping"
timeout_secs = 10

[log]
path = "logs/pings.json"

[hosts]
predefined = ["example.org", "1.1.1.1"]
"#;
        fs::write(&temp_file, config_content).unwrap();

        let config = ConfigLoader::load_with_custom_path(Some(temp_file.path())).unwrap();
        assert_eq!(config.ping.program, "/usr/bin/ping");
        assert_eq!(config.ping.timeout_secs, 10);
        assert_eq!(config.log.path, PathBuf::from("logs/pings.json"));
        assert_eq!(config.hosts.predefined, vec!["example.org", "1.1.1.1"]);
    }

    #[test]
    fn test_validation_errors() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, "[ping]\ntimeout_secs = 0\n").unwrap();

        let result = ConfigLoader::load_with_custom_path(Some(temp_file.path()));
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("ping.timeout_secs must be greater than 0"));
    }

    #[test]
    fn test_echo_count_is_not_configurable() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, "[ping]\ncount = 8\n").unwrap();

        let err = format!(
            "{:#}",
            ConfigLoader::load_with_custom_path(Some(temp_file.path())).unwrap_err()
        );
        assert!(err.contains("count"));
    }

    #[test]
    fn test_empty_predefined_rejected() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, "[hosts]\npredefined = [\" \"]\n").unwrap();

        assert!(ConfigLoader::load_with_custom_path(Some(temp_file.path())).is_err());
    }

    #[test]
    fn test_missing_custom_path_is_error() {
        let result = ConfigLoader::load_with_custom_path(Some(Path::new("/nonexistent/hostping.toml")));
        assert!(result.is_err());
    }
}
