use crate::keywords::DEFAULT_KEYWORDS_FILE;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "phishing-detector.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_keywords_file")]
    pub keywords_file: String,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_keywords_file() -> String {
    DEFAULT_KEYWORDS_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keywords_file: default_keywords_file(),
            logging: Some(LoggingConfig {
                level: "info".to_string(),
            }),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Falls back to `Info` for a missing or unrecognized level.
    pub fn log_level(&self) -> log::LevelFilter {
        self.logging
            .as_ref()
            .and_then(|l| l.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let path = path.to_str().unwrap();

        let config = Config {
            keywords_file: "/var/lib/phishing/keywords.json".to_string(),
            logging: Some(LoggingConfig {
                level: "debug".to_string(),
            }),
        };
        config.to_file(path).unwrap();

        let loaded = Config::from_file(path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("logging:\n  level: verbose\n").unwrap();
        assert_eq!(config.keywords_file, DEFAULT_KEYWORDS_FILE);
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::from_file("/nonexistent/phishing-detector.yaml").is_err());
    }
}
