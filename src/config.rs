use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the user list is fetched from at startup
    pub source_url: String,
    /// Give up on the fetch after this many seconds. No limit when unset.
    pub request_timeout_secs: Option<u64>,
    /// Default tracing filter, overridden by RUST_LOG
    pub log_level: String,
    pub log_to_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            request_timeout_secs: None,
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".user-admin-tui"))
    }

    pub fn log_dir() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("logs"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config file, falling back to defaults when it is missing or invalid
    pub fn load() -> Config {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    pub fn load_from(path: &Path) -> Config {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/user-admin-tui/config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_partial_file_fills_remaining_fields() {
        let dir = env::temp_dir().join(format!("user-admin-tui-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, r#"{"source_url": "http://localhost:8080/users.json", "request_timeout_secs": 5}"#)
            .unwrap();

        let config = Config::load_from(&path);

        assert_eq!(config.source_url, "http://localhost:8080/users.json");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.log_level, "info");
        assert!(config.log_to_file);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = env::temp_dir().join(format!("user-admin-tui-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, "{not json").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());

        let _ = fs::remove_dir_all(&dir);
    }
}
