use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::PathBuf;
use tauri::Manager;
use tracing::info;

use crate::config::AppConfig;
use crate::store::SqliteAssessmentStore;

pub type DbPool = SqlitePool;

/// Application state holding the database connection pool
pub struct AppState {
  pub db: DbPool,
  pub config: AppConfig,
}

impl AppState {
  pub fn assessments(&self) -> SqliteAssessmentStore {
    SqliteAssessmentStore::new(self.db.clone())
  }
}

/// Get the path to the database file
/// Stored in the platform app data dir unless READINESS_DB_PATH is set
fn get_db_path<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  config: &AppConfig,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
  if let Some(path) = &config.db_path {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    return Ok(path.clone());
  }

  let data_dir = app
    .path()
    .app_data_dir()
    .map_err(|e| format!("Failed to get app data dir: {}", e))?;

  // Create directory if it doesn't exist
  fs::create_dir_all(&data_dir)?;

  Ok(data_dir.join("readiness-coach.db"))
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  config: &AppConfig,
) -> Result<DbPool, Box<dyn std::error::Error>> {
  let db_path = get_db_path(app, config)?;
  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

  info!(path = %db_path.display(), "Initializing database");

  // Create connection pool
  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  // Run migrations
  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");

  Ok(pool)
}
