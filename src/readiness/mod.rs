//! Readiness assessment & recommendation engine
//!
//! Pipeline for a daily check-in:
//! raw report -> normalize -> score -> recommend -> store
//!
//! Read side: the trend aggregator projects persisted scores into chart
//! series without recomputing anything.

pub mod normalize;
pub mod recommendation;
pub mod scoring;
pub mod trend;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::NewAssessment;
use crate::store::AssessmentStore;

pub use normalize::{normalize, EnergyLevel, MuscleSoreness, NormalizedWellness, RawWellnessInput, StressLevel};
pub use recommendation::{recommend, ReadinessTier, Recommendation};
pub use scoring::FormulaVersion;
pub use trend::{DateRange, TrendChart, TrendPoint, TrendSeries, TrendSummary};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ReadinessError {
  #[error("Invalid input: {0}")]
  InvalidInput(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Storage failure: {0}")]
  StorageFailure(String),
}

impl ReadinessError {
  /// True when the caller sent something wrong (vs. a server-side failure)
  pub fn is_client_error(&self) -> bool {
    matches!(self, Self::InvalidInput(_) | Self::NotFound(_))
  }
}

impl From<sqlx::Error> for ReadinessError {
  fn from(e: sqlx::Error) -> Self {
    ReadinessError::StorageFailure(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Assessment Pipeline
/// ---------------------------------------------------------------------------

/// A normalized report together with its score and recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredWellness {
  pub wellness: NormalizedWellness,
  pub score: u8,
  pub recommendation: Recommendation,
  pub formula_version: FormulaVersion,
}

/// Project an already-normalized report through a formula version
pub fn score_wellness(version: FormulaVersion, wellness: NormalizedWellness) -> ScoredWellness {
  let score = version.score(&wellness);
  ScoredWellness {
    wellness,
    score,
    recommendation: recommend(version, score),
    formula_version: version,
  }
}

/// Normalize, score and recommend. Fails only on invalid input.
pub fn assess(version: FormulaVersion, raw: &RawWellnessInput) -> Result<ScoredWellness, ReadinessError> {
  let wellness = normalize(raw)?;
  Ok(score_wellness(version, wellness))
}

/// Create-assessment request as received from the API boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
  pub client_id: i64,
  pub trainer_id: i64,
  pub date: NaiveDate,
  pub wellness: RawWellnessInput,
}

/// What the mobile client gets back after a check-in is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
  pub id: i64,
  pub score: u8,
  pub tier: ReadinessTier,
  pub recommendation: String,
}

/// Run the pipeline and persist the resulting assessment.
///
/// Invalid input is rejected before the store is touched. Store failures
/// propagate unchanged.
pub async fn create_assessment<S>(
  store: &S,
  request: &AssessmentRequest,
) -> Result<AssessmentOutcome, ReadinessError>
where
  S: AssessmentStore + ?Sized,
{
  let scored = assess(FormulaVersion::CURRENT, &request.wellness)?;
  debug!(
    client_id = request.client_id,
    date = %request.date,
    score = scored.score,
    "Scored readiness check-in"
  );

  let record = NewAssessment::from_scored(request.client_id, request.trainer_id, request.date, &scored);
  let id = store.create_assessment(&record).await?;

  info!(
    id,
    client_id = request.client_id,
    tier = %scored.recommendation.tier,
    "Readiness assessment stored"
  );

  Ok(AssessmentOutcome {
    id,
    score: scored.score,
    tier: scored.recommendation.tier,
    recommendation: scored.recommendation.message,
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
