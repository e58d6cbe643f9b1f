//! Tauri commands for daily readiness check-ins and trend dashboards

use chrono::NaiveDate;
use std::sync::Arc;
use tauri::State;
use tracing::warn;

use crate::db::AppState;
use crate::models::ReadinessAssessment;
use crate::readiness::trend::trend_series;
use crate::readiness::{
  create_assessment, AssessmentOutcome, AssessmentRequest, DateRange, RawWellnessInput,
  ReadinessError, TrendChart, TrendSummary,
};
use crate::store::AssessmentStore;

/// ---------------------------------------------------------------------------
/// Check-in
/// ---------------------------------------------------------------------------

/// Score a client's daily wellness report and store it
#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn create_readiness_assessment(
  state: State<'_, Arc<AppState>>,
  client_id: i64,
  trainer_id: i64,
  date: NaiveDate,
  sleep_hours: f64,
  stress_level: String,
  muscle_soreness: String,
  energy_level: String,
) -> Result<AssessmentOutcome, ReadinessError> {
  let request = AssessmentRequest {
    client_id,
    trainer_id,
    date,
    wellness: RawWellnessInput {
      sleep_hours,
      stress_level,
      muscle_soreness,
      energy_level,
    },
  };

  create_assessment(&state.assessments(), &request)
    .await
    .inspect_err(|e| log_failure("create_readiness_assessment", e))
}

/// ---------------------------------------------------------------------------
/// Lookups
/// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn get_readiness_assessment(
  state: State<'_, Arc<AppState>>,
  id: i64,
) -> Result<ReadinessAssessment, ReadinessError> {
  state
    .assessments()
    .get_assessment(id)
    .await
    .inspect_err(|e| log_failure("get_readiness_assessment", e))
}

#[tauri::command]
pub async fn get_latest_readiness(
  state: State<'_, Arc<AppState>>,
  client_id: i64,
) -> Result<Option<ReadinessAssessment>, ReadinessError> {
  state
    .assessments()
    .latest_assessment(client_id)
    .await
    .inspect_err(|e| log_failure("get_latest_readiness", e))
}

/// ---------------------------------------------------------------------------
/// Trend Dashboard
/// ---------------------------------------------------------------------------

/// Bar chart data for a client's readiness over a date range
#[tauri::command]
pub async fn get_readiness_trend(
  state: State<'_, Arc<AppState>>,
  client_id: i64,
  start_date: NaiveDate,
  end_date: NaiveDate,
) -> Result<TrendChart, ReadinessError> {
  load_trend_chart(
    &state.assessments(),
    client_id,
    start_date,
    end_date,
    state.config.max_trend_days,
  )
  .await
  .inspect_err(|e| log_failure("get_readiness_trend", e))
}

/// Headline numbers for the same range; None when there is no data
#[tauri::command]
pub async fn get_readiness_summary(
  state: State<'_, Arc<AppState>>,
  client_id: i64,
  start_date: NaiveDate,
  end_date: NaiveDate,
) -> Result<Option<TrendSummary>, ReadinessError> {
  load_trend_summary(
    &state.assessments(),
    client_id,
    start_date,
    end_date,
    state.config.max_trend_days,
  )
  .await
  .inspect_err(|e| log_failure("get_readiness_summary", e))
}

pub async fn load_trend_chart<S: AssessmentStore + ?Sized>(
  store: &S,
  client_id: i64,
  start_date: NaiveDate,
  end_date: NaiveDate,
  max_days: i64,
) -> Result<TrendChart, ReadinessError> {
  let range = DateRange::new(start_date, end_date)?.ensure_max_days(max_days)?;
  let series = trend_series(store, client_id, &range).await?;
  Ok(TrendChart::from_series(series))
}

pub async fn load_trend_summary<S: AssessmentStore + ?Sized>(
  store: &S,
  client_id: i64,
  start_date: NaiveDate,
  end_date: NaiveDate,
  max_days: i64,
) -> Result<Option<TrendSummary>, ReadinessError> {
  let range = DateRange::new(start_date, end_date)?.ensure_max_days(max_days)?;
  let assessments = store.query_assessments(client_id, &range).await?;
  Ok(TrendSummary::compute(&assessments))
}

fn log_failure(command: &str, error: &ReadinessError) {
  if !error.is_client_error() {
    warn!(command, error = %error, "Readiness command failed");
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
