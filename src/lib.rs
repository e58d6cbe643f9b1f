mod commands;
pub mod config;
mod db;
pub mod models;
pub mod readiness;
pub mod store;

#[cfg(test)]
mod test_utils;

use config::AppConfig;
use db::AppState;
use std::sync::Arc;
use tauri::Manager;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Log filter comes from READINESS_LOG (e.g. "debug" or "readiness_coach_lib=trace")
fn init_logging() {
  let filter = EnvFilter::try_from_env("READINESS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
  let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  init_logging();

  let config = AppConfig::from_env().unwrap_or_else(|e| {
    warn!("{}; falling back to default configuration", e);
    AppConfig::default()
  });

  tauri::Builder::default()
    .plugin(tauri_plugin_opener::init())
    .setup(move |app| {
      // Initialize database
      let app_handle = app.handle().clone();
      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&app_handle, &config).await {
          Ok(pool) => {
            let state = Arc::new(AppState { db: pool, config });
            app_handle.manage(state);
            info!("Database ready");
          }
          Err(e) => {
            error!("Failed to initialize database: {}", e);
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      commands::readiness::create_readiness_assessment,
      commands::readiness::get_readiness_assessment,
      commands::readiness::get_latest_readiness,
      commands::readiness::get_readiness_trend,
      commands::readiness::get_readiness_summary,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
