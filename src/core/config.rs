use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use tracing::Level;
use crate::core::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage_path: PathBuf,   // File used by OPEN and SAVE
    pub prompt: String,          // REPL prompt
    pub confirm_delete: bool,    // Ask Y/N before DELETE
    pub log_level: String,       // tracing level when --verbose is not given
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_path: PathBuf::from("db/P6_5-CMS.txt"),
            prompt: "CMS> ".to_string(),
            confirm_delete: true,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Read a JSON config file. Keys that are missing keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.level()?;
        Ok(config)
    }

    /// `log_level` as a tracing level (trace, debug, info, warn, error)
    pub fn level(&self) -> Result<Level> {
        self.log_level.parse().map_err(|_| {
            Error::parse(format!(
                "Config error: invalid log_level '{}'. Use trace, debug, info, warn or error.",
                self.log_level
            ))
        })
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "prompt": "> " }"#).unwrap();
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.storage_path, PathBuf::from("db/P6_5-CMS.txt"));
        assert!(config.confirm_delete);
        assert_eq!(config.level().unwrap(), Level::WARN);
    }

    #[test]
    fn unknown_log_level_is_a_config_error() {
        let config: Config = serde_json::from_str(r#"{ "log_level": "loud" }"#).unwrap();
        let err = config.level().unwrap_err();
        assert!(err.context.contains("invalid log_level 'loud'"));

        let config: Config = serde_json::from_str(r#"{ "log_level": "DEBUG" }"#).unwrap();
        assert_eq!(config.level().unwrap(), Level::DEBUG);
    }

    #[test]
    fn load_rejects_unknown_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "log_level": "verbose" }"#).unwrap();
        assert!(Config::load(&path).is_err());
    }
}
