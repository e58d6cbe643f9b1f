//! Readiness scoring model
//!
//! Pure functions from a normalized wellness report to a 0-100 score.
//! Each formula is a free function; `FormulaVersion` only selects which one
//! runs, so a new formula is a new variant plus a new function.
//!
//! Formula v1 point budget (sums to 100):
//! - Sleep: 5 points per hour, plateau at 8h (max 40)
//! - Stress: low 20, medium 10, high 0
//! - Soreness: none 20, mild 13, moderate 6, severe 0
//! - Energy: low 0, medium 10, high 20

use serde::{Deserialize, Serialize};

use super::normalize::NormalizedWellness;

pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

const V1_SLEEP_PLATEAU_TENTHS: i64 = 80;
const V1_SLEEP_MAX_POINTS: i64 = 40;
const V1_STRESS_STEP: i64 = 10;
const V1_SORENESS_MAX_POINTS: i64 = 20;
const V1_SORENESS_MAX_WEIGHT: i64 = 3;
const V1_ENERGY_STEP: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormulaVersion {
  #[default]
  V1,
}

impl FormulaVersion {
  pub const CURRENT: FormulaVersion = FormulaVersion::V1;

  pub fn as_str(self) -> &'static str {
    match self {
      Self::V1 => "v1",
    }
  }

  /// Score a normalized report with this formula
  pub fn score(self, wellness: &NormalizedWellness) -> u8 {
    let (sleep, stress, soreness, energy) = wellness.weights();
    match self {
      Self::V1 => score_v1(sleep, stress, soreness, energy),
    }
  }
}

impl std::fmt::Display for FormulaVersion {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for FormulaVersion {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "v1" => Ok(Self::V1),
      _ => Err(format!("Unknown formula version: {}", s)),
    }
  }
}

/// Formula v1. Out-of-range weights saturate; the result is always clamped.
pub fn score_v1(sleep_hours: f64, stress_weight: u8, soreness_weight: u8, energy_weight: u8) -> u8 {
  // NaN casts to 0
  let sleep_tenths = (sleep_hours * 10.0).round() as i64;
  let sleep_points = sleep_tenths.clamp(0, V1_SLEEP_PLATEAU_TENTHS) * V1_SLEEP_MAX_POINTS
    / V1_SLEEP_PLATEAU_TENTHS;

  let stress_points = (2 - i64::from(stress_weight).min(2)) * V1_STRESS_STEP;

  let soreness_weight = i64::from(soreness_weight).min(V1_SORENESS_MAX_WEIGHT);
  let soreness_points =
    (V1_SORENESS_MAX_WEIGHT - soreness_weight) * V1_SORENESS_MAX_POINTS / V1_SORENESS_MAX_WEIGHT;

  let energy_points = i64::from(energy_weight).min(2) * V1_ENERGY_STEP;

  let total = sleep_points + stress_points + soreness_points + energy_points;
  total.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE)) as u8
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
