//! Viewer configuration: which log to read and how to parse it.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::extract::{default_series_name, RecordParser};
use crate::data::model::{ColumnCount, MalformedPolicy};

/// Looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "ppg-viewer.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for one viewer session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Log file to plot.
    pub path: PathBuf,
    /// Leading columns to extract (1 or 2).
    pub columns: ColumnCount,
    pub policy: MalformedPolicy,
    /// Sampling rate used to turn FFT bins into Hz.
    pub sample_rate_hz: f64,
    /// Series names in column order.
    pub labels: Vec<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("log.txt"),
            columns: ColumnCount::One,
            policy: MalformedPolicy::FailFast,
            sample_rate_hz: 100.0,
            labels: Vec::new(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a TOML file.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, config_path)
    }

    fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut config: ViewerConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.labels.truncate(config.columns.get());
        Ok(config)
    }

    /// Resolve the configuration for this run.
    ///
    /// An explicit path must load; otherwise [`DEFAULT_CONFIG_FILE`] in
    /// `cwd` is used when present, then built-in defaults.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::info!("Loading config from {}", path.display());
            return Self::load(path);
        }
        let fallback = cwd.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            log::info!("Loading config from {}", fallback.display());
            return Self::load(&fallback);
        }
        log::debug!("No config file, using defaults");
        Ok(Self::default())
    }

    pub fn parser(&self) -> RecordParser {
        RecordParser::new(self.columns, self.policy)
    }

    /// Series names for every configured column.
    pub fn series_names(&self) -> Vec<String> {
        (0..self.columns.get())
            .map(|i| {
                self.labels
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| default_series_name(i))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_single_column_log_txt() {
        let config = ViewerConfig::default();
        assert_eq!(config.path, PathBuf::from("log.txt"));
        assert_eq!(config.columns, ColumnCount::One);
        assert_eq!(config.policy, MalformedPolicy::FailFast);
        assert_eq!(config.series_names(), vec!["Column 1".to_string()]);
    }

    #[test]
    fn parses_full_toml() {
        let toml = r#"
path = "data/ppg.log"
columns = 2
policy = "skip-malformed"
sample-rate-hz = 50.0
labels = ["IR", "Red", "Green"]
"#;
        let config = ViewerConfig::from_toml(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.path, PathBuf::from("data/ppg.log"));
        assert_eq!(config.columns, ColumnCount::Two);
        assert_eq!(config.policy, MalformedPolicy::SkipMalformed);
        assert_eq!(config.sample_rate_hz, 50.0);
        assert_eq!(config.series_names(), vec!["IR".to_string(), "Red".to_string()]);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ViewerConfig::from_toml("columns = 2\n", Path::new("t.toml")).unwrap();
        assert_eq!(config.path, PathBuf::from("log.txt"));
        assert_eq!(config.sample_rate_hz, 100.0);
        assert_eq!(
            config.series_names(),
            vec!["Column 1".to_string(), "Column 2".to_string()]
        );
    }

    #[test]
    fn rejects_unsupported_column_count() {
        let err = ViewerConfig::from_toml("columns = 3\n", Path::new("t.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("t.toml"));
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = ViewerConfig::from_toml("policy = \"retry\"\n", Path::new("t.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "path = \"other.txt\"").unwrap();
        let dir = tempfile::tempdir().unwrap();

        let config = ViewerConfig::resolve(Some(file.path()), dir.path()).unwrap();
        assert_eq!(config.path, PathBuf::from("other.txt"));
    }

    #[test]
    fn resolve_reads_default_file_from_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "columns = 2\n").unwrap();

        let config = ViewerConfig::resolve(None, dir.path()).unwrap();
        assert_eq!(config.columns, ColumnCount::Two);
    }

    #[test]
    fn resolve_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewerConfig::resolve(None, dir.path()).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn resolve_fails_on_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ViewerConfig::resolve(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
