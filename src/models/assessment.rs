use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::readiness::{
  recommend, score_wellness, EnergyLevel, FormulaVersion, MuscleSoreness, NormalizedWellness,
  ReadinessTier, ScoredWellness, StressLevel,
};

/// A stored daily readiness check-in.
///
/// `score`, `tier` and `recommendation` are a cached projection of the
/// inputs under `formula_version`. Rows are never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessAssessment {
  pub id: i64,
  pub client_id: i64,
  pub trainer_id: i64,
  pub date: NaiveDate,
  pub sleep_hours: f64,
  pub stress_level: StressLevel,
  pub muscle_soreness: MuscleSoreness,
  pub energy_level: EnergyLevel,
  pub score: u8,
  pub tier: ReadinessTier,
  pub recommendation: String,
  pub formula_version: FormulaVersion,
  pub created_at: DateTime<Utc>,
}

impl ReadinessAssessment {
  pub fn wellness(&self) -> NormalizedWellness {
    NormalizedWellness {
      sleep_hours: self.sleep_hours,
      stress: self.stress_level,
      soreness: self.muscle_soreness,
      energy: self.energy_level,
    }
  }

  /// Whether the cached score and recommendation still match the inputs
  pub fn is_consistent(&self) -> bool {
    let score = self.formula_version.score(&self.wellness());
    let expected = recommend(self.formula_version, score);
    score == self.score && expected.tier == self.tier && expected.message == self.recommendation
  }
}

/// For inserting new assessments (without id, created_at)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssessment {
  pub client_id: i64,
  pub trainer_id: i64,
  pub date: NaiveDate,
  pub sleep_hours: f64,
  pub stress_level: StressLevel,
  pub muscle_soreness: MuscleSoreness,
  pub energy_level: EnergyLevel,
  pub score: u8,
  pub tier: ReadinessTier,
  pub recommendation: String,
  pub formula_version: FormulaVersion,
}

impl NewAssessment {
  pub fn from_scored(client_id: i64, trainer_id: i64, date: NaiveDate, scored: &ScoredWellness) -> Self {
    Self {
      client_id,
      trainer_id,
      date,
      sleep_hours: scored.wellness.sleep_hours,
      stress_level: scored.wellness.stress,
      muscle_soreness: scored.wellness.soreness,
      energy_level: scored.wellness.energy,
      score: scored.score,
      tier: scored.recommendation.tier,
      recommendation: scored.recommendation.message.clone(),
      formula_version: scored.formula_version,
    }
  }

  /// Score a normalized report with the current formula
  pub fn scored(client_id: i64, trainer_id: i64, date: NaiveDate, wellness: NormalizedWellness) -> Self {
    let scored = score_wellness(FormulaVersion::CURRENT, wellness);
    Self::from_scored(client_id, trainer_id, date, &scored)
  }
}
