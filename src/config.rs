//! Configuration file handling for finwin.
//!
//! The configuration file is stored at `$FINWIN_HOME/config.json` and holds the location of the
//! input tables along with report defaults: how many departments the ranking keeps, the width of
//! the moving average and the default output format.

use crate::format::OutputFormat;
use crate::model::{DEPARTMENTS, EXPENSE_CATEGORIES, TRANSACTIONS};
use crate::source::{SAMPLE_DEPARTMENTS, SAMPLE_EXPENSE_CATEGORIES, SAMPLE_TRANSACTIONS};
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "finwin";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA_DIR: &str = "data";
const TOP_N: usize = 10;
const MOVING_AVERAGE_WINDOW: usize = 3;

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FINWIN_HOME` and from there it loads `$FINWIN_HOME/config.json`. It provides the
/// data directory path and the report settings.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    data_dir: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, the data directory and an initial `config.json` with default
    /// settings. When `seed_sample` is true, the data directory is filled with the sample tables.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists in `dir`.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, seed_sample: bool) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the finwin home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display());
        }

        let config_file = ConfigFile::default();
        let data_dir = config_file.data_dir(&root);
        utils::make_dir(&data_dir).await?;
        config_file.save(&config_path).await?;

        if seed_sample {
            for (table, content) in [
                (DEPARTMENTS, SAMPLE_DEPARTMENTS),
                (EXPENSE_CATEGORIES, SAMPLE_EXPENSE_CATEGORIES),
                (TRANSACTIONS, SAMPLE_TRANSACTIONS),
            ] {
                let path = data_dir.join(format!("{table}.csv"));
                utils::write(&path, content).await?;
                debug!("Wrote sample table {}", path.display());
            }
        }

        Ok(Self {
            root,
            config_path,
            data_dir,
            config_file,
        })
    }

    /// This will
    /// - validate that `finwin_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the data directory exists
    /// - return the loaded configuration object
    pub async fn load(finwin_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = finwin_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("finwin home is missing, run 'finwin init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let data_dir = config_file.data_dir(&root);
        if !data_dir.is_dir() {
            bail!("The data directory is missing '{}'", data_dir.display())
        }

        Ok(Self {
            root,
            config_path,
            data_dir,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The directory holding `departments.csv`, `expense_categories.csv` and `transactions.csv`.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The number of departments kept by the ranking report.
    pub fn top_n(&self) -> usize {
        self.config_file.top_n
    }

    /// The number of months averaged by the trend report.
    pub fn moving_average_window(&self) -> NonZeroUsize {
        self.config_file.moving_average_window
    }

    pub fn output_format(&self) -> OutputFormat {
        self.config_file.output_format
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "finwin",
///   "config_version": 1,
///   "data_dir": "data",
///   "top_n": 10,
///   "moving_average_window": 3,
///   "output_format": "table"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "finwin"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Directory holding the input tables (optional, relative to `$FINWIN_HOME` or absolute).
    /// Defaults to `$FINWIN_HOME/data` if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,

    /// Number of departments kept by the ranking report
    #[serde(default = "default_top_n")]
    top_n: usize,

    /// Number of months in the moving average, including the current month
    #[serde(default = "default_moving_average_window")]
    moving_average_window: NonZeroUsize,

    /// Output format used when a command does not pass `--format`
    #[serde(default)]
    output_format: OutputFormat,
}

fn default_top_n() -> usize {
    TOP_N
}

fn default_moving_average_window() -> NonZeroUsize {
    NonZeroUsize::new(MOVING_AVERAGE_WINDOW).unwrap_or(NonZeroUsize::MIN)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_dir: Some(PathBuf::from(DATA_DIR)),
            top_n: default_top_n(),
            moving_average_window: default_moving_average_window(),
            output_format: OutputFormat::default(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if `app_name` is wrong.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .context("Unable to load the config file")?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    /// Resolves the data directory. A relative path is taken relative to `root`.
    fn data_dir(&self, root: &Path) -> PathBuf {
        let p = self
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_DIR));
        if p.is_absolute() {
            p
        } else {
            root.join(p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create_with_sample() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("finwin_home");

        let config = Config::create(&home_dir, true).await.unwrap();

        assert!(config.config_path().is_file());
        assert!(config.data_dir().is_dir());
        assert_eq!(config.data_dir(), config.root().join("data"));
        assert_eq!(config.top_n(), 10);
        assert_eq!(config.moving_average_window().get(), 3);
        assert_eq!(config.output_format(), OutputFormat::Table);

        let transactions = utils::read(&config.data_dir().join("transactions.csv"))
            .await
            .unwrap();
        assert_eq!(transactions, SAMPLE_TRANSACTIONS);
    }

    #[tokio::test]
    async fn test_config_create_without_sample() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), false).await.unwrap();
        assert!(!config.data_dir().join("departments.csv").exists());
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), false).await.unwrap();
        let err = Config::create(dir.path(), false).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path(), true).await.unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.config_file, loaded.config_file);
        assert_eq!(created.data_dir(), loaded.data_dir());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("nope")).await.unwrap_err();
        assert!(err.to_string().contains("finwin init"));
    }

    #[test]
    fn test_config_file_default() {
        let config = ConfigFile::default();
        assert_eq!(config.app_name, "finwin");
        assert_eq!(config.top_n, 10);
        assert_eq!(
            config.data_dir(Path::new("/home/me/finwin")),
            PathBuf::from("/home/me/finwin/data")
        );
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "finwin",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();

        assert_eq!(config.data_dir, None);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.moving_average_window.get(), 3);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(
            config.data_dir(temp_dir.path()),
            temp_dir.path().join("data")
        );
    }

    #[tokio::test]
    async fn test_config_file_custom_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "finwin",
            "config_version": 1,
            "data_dir": "/srv/finance",
            "top_n": 3,
            "moving_average_window": 6,
            "output_format": "json"
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.moving_average_window.get(), 6);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(
            config.data_dir(temp_dir.path()),
            PathBuf::from("/srv/finance")
        );
    }

    #[tokio::test]
    async fn test_config_file_rejects_zero_window() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{"app_name": "finwin", "config_version": 1, "moving_average_window": 0}"#;
        utils::write(&config_path, json).await.unwrap();
        assert!(ConfigFile::load(&config_path).await.is_err());
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{"app_name": "budget", "config_version": 1}"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let t = TempDir::new().unwrap();
        let path = t.path().join("file.json");
        let original = ConfigFile {
            top_n: 5,
            output_format: OutputFormat::Csv,
            ..ConfigFile::default()
        };
        original.save(&path).await.unwrap();
        let read = ConfigFile::load(&path).await.unwrap();
        assert_eq!(original, read);
    }
}
