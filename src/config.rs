//! Runtime settings.
//!
//! Values are resolved with this precedence: command-line flag, then
//! environment variable (handled by clap), then the YAML file passed with
//! `--config`, then the built-in default.
//!
//! ```yaml
//! base_url: https://shedule.uni-dmitrov.ru
//! dump_dir: ./dumps
//! user_agent: schedule_workload
//! format: xlsx
//! ```

use crate::cli::Cli;
use crate::outputs::ExportFormat;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://shedule.uni-dmitrov.ru";
pub const DEFAULT_DUMP_DIR: &str = "dumps";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Contents of a `config.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub dump_dir: Option<String>,
    pub user_agent: Option<String>,
    pub format: Option<ExportFormat>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub dump_dir: String,
    pub user_agent: String,
    pub format: ExportFormat,
}

#[instrument(level = "info")]
pub fn load_config(path: &str) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(Path::new(path)).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    let config = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })?;
    info!("Loaded configuration");
    Ok(config)
}

impl Settings {
    /// Read the config file named by `--config` (if any) and merge it with the CLI.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => load_config(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    pub fn merge(cli: &Cli, file: FileConfig) -> Self {
        Self {
            base_url: cli
                .base_url
                .clone()
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            dump_dir: cli
                .output_dir
                .clone()
                .or(file.dump_dir)
                .unwrap_or_else(|| DEFAULT_DUMP_DIR.to_string()),
            user_agent: cli
                .user_agent
                .clone()
                .or(file.user_agent)
                .unwrap_or_else(|| concat!("schedule_workload/", env!("CARGO_PKG_VERSION")).to_string()),
            format: cli.format.or(file.format).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["schedule_workload", "--from", "23", "--to", "24"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::merge(&cli(&[]), FileConfig::default());
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.dump_dir, DEFAULT_DUMP_DIR);
        assert!(settings.user_agent.starts_with("schedule_workload/"));
        assert_eq!(settings.format, ExportFormat::Xlsx);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            base_url: Some("https://file.example.edu".to_string()),
            dump_dir: Some("/srv/dumps".to_string()),
            user_agent: None,
            format: Some(ExportFormat::Json),
        };
        let settings = Settings::merge(
            &cli(&["--base-url", "https://cli.example.edu", "-f", "csv"]),
            file,
        );

        assert_eq!(settings.base_url, "https://cli.example.edu");
        assert_eq!(settings.dump_dir, "/srv/dumps");
        assert_eq!(settings.format, ExportFormat::Csv);
    }

    #[test]
    fn test_load_config_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://yaml.example.edu\nformat: csv").unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://yaml.example.edu"));
        assert_eq!(config.format, Some(ExportFormat::Csv));
        assert_eq!(config.dump_dir, None);
    }

    #[test]
    fn test_load_config_rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_ulr: typo").unwrap();

        let err = load_config(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
