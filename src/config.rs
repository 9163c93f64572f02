//! Runtime configuration resolved from environment variables.
//!
//! `main` loads a `.env` file first, so these can live there:
//!
//! ```text
//! OLYMPICS_DATA_SOURCE=data/athlete_events.csv
//! LOG_FILE_PATH=logs/olympics_explorer.log
//! ```

use std::path::Path;

/// Athlete-events document used when nothing else is configured.
pub const DEFAULT_DATA_URL: &str =
    "https://drive.google.com/uc?export=download&id=1ePNeKEvPc_l6SWBcvH-MK0Y8eyu3GapR";

pub const DEFAULT_LOG_FILE_PATH: &str = "logs/olympics_explorer.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// URL or local path of the CSV document.
    pub data_source: String,
    pub log_file_path: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            data_source: get("OLYMPICS_DATA_SOURCE").unwrap_or_else(|| DEFAULT_DATA_URL.to_string()),
            log_file_path: get("LOG_FILE_PATH").unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
        }
    }

    /// Directory and file name for the rolling log appender.
    pub fn log_location(&self) -> (&Path, &Path) {
        let path = Path::new(&self.log_file_path);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("logs"));
        let file = path
            .file_name()
            .map(Path::new)
            .unwrap_or(Path::new("olympics_explorer.log"));
        (dir, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.data_source, DEFAULT_DATA_URL);
        assert_eq!(config.log_file_path, DEFAULT_LOG_FILE_PATH);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("OLYMPICS_DATA_SOURCE", "data/athletes.csv"),
            ("LOG_FILE_PATH", "/var/log/olympics.log"),
        ]));
        assert_eq!(config.data_source, "data/athletes.csv");
        assert_eq!(
            config.log_location(),
            (Path::new("/var/log"), Path::new("olympics.log"))
        );
    }

    #[test]
    fn test_blank_value_falls_back() {
        let config = AppConfig::from_lookup(lookup(&[("OLYMPICS_DATA_SOURCE", "  ")]));
        assert_eq!(config.data_source, DEFAULT_DATA_URL);
    }

    #[test]
    fn test_log_location_without_directory() {
        let config = AppConfig::from_lookup(lookup(&[("LOG_FILE_PATH", "run.log")]));
        assert_eq!(config.log_location(), (Path::new("logs"), Path::new("run.log")));
    }
}
