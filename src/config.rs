//! Runtime configuration from environment variables (and `.env` via dotenvy)

use std::env;
use std::path::PathBuf;

const DEFAULT_MAX_TREND_DAYS: i64 = 366;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value}")]
  InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  /// Overrides the default database location under the app data dir
  pub db_path: Option<PathBuf>,
  /// Longest date range a trend query may span
  pub max_trend_days: i64,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      db_path: None,
      max_trend_days: DEFAULT_MAX_TREND_DAYS,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let db_path = env::var("READINESS_DB_PATH")
      .ok()
      .filter(|v| !v.trim().is_empty())
      .map(PathBuf::from);

    let max_trend_days = match env::var("READINESS_MAX_TREND_DAYS") {
      Ok(raw) => raw
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|days| *days > 0)
        .ok_or(ConfigError::InvalidValue {
          key: "READINESS_MAX_TREND_DAYS",
          value: raw,
        })?,
      Err(_) => DEFAULT_MAX_TREND_DAYS,
    };

    Ok(Self {
      db_path,
      max_trend_days,
    })
  }
}
