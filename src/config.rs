use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

// ---------------------------------------------------------------------------
// Configuration tree (mirrors config.yaml)
// ---------------------------------------------------------------------------

/// Settings read once at startup and passed by reference to each stage.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub preview_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Prism - Salary Dashboard".to_string(),
            preview_rows: 5,
        }
    }
}

/// How column headers are rendered to the user.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnNameCase {
    #[default]
    Title,
    Lower,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub source_file: PathBuf,
    pub column_name_case: ColumnNameCase,
    /// `None` falls back to [`crate::data::validate::DEFAULT_REQUIRED_COLUMNS`].
    pub required_columns: Option<Vec<String>>,
    /// chrono `strftime` pattern; date coercion is skipped when unset.
    pub date_format: Option<String>,
    pub group_column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source_file: PathBuf::from("data/salary_dataset.csv"),
            column_name_case: ColumnNameCase::Title,
            required_columns: None,
            date_format: None,
            group_column: "company_name".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter string, e.g. `info` or `salary_prism=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub enum OutlierMethod {
    #[default]
    #[serde(rename = "iqr", alias = "IQR")]
    Iqr,
    #[serde(rename = "z-score", alias = "Z-score", alias = "zscore")]
    ZScore,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub top_n_categories: usize,
    pub outlier_detection_method: OutlierMethod,
    pub outlier_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n_categories: 5,
            outlier_detection_method: OutlierMethod::Iqr,
            outlier_threshold: 1.5,
        }
    }
}

impl Config {
    /// Parse a YAML configuration file. Absent keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping.
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(text)
    }
}
