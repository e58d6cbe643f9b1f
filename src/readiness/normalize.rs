//! Input normalization for daily wellness reports
//!
//! Raw check-in values arrive as loose numbers and strings from the mobile
//! client. Everything is validated here so the scoring model downstream can
//! be infallible.

use serde::{Deserialize, Serialize};

use super::ReadinessError;

pub const MIN_SLEEP_HOURS: f64 = 0.0;
pub const MAX_SLEEP_HOURS: f64 = 24.0;

/// ---------------------------------------------------------------------------
/// Categorical Wellness Inputs
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
  Low,
  Medium,
  High,
}

impl StressLevel {
  pub const ALL: [StressLevel; 3] = [Self::Low, Self::Medium, Self::High];

  /// Ordinal weight, higher = more stressed
  pub fn weight(self) -> u8 {
    match self {
      Self::Low => 0,
      Self::Medium => 1,
      Self::High => 2,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleSoreness {
  None,
  Mild,
  Moderate,
  Severe,
}

impl MuscleSoreness {
  pub const ALL: [MuscleSoreness; 4] = [Self::None, Self::Mild, Self::Moderate, Self::Severe];

  /// Ordinal weight, higher = more sore
  pub fn weight(self) -> u8 {
    match self {
      Self::None => 0,
      Self::Mild => 1,
      Self::Moderate => 2,
      Self::Severe => 3,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Mild => "mild",
      Self::Moderate => "moderate",
      Self::Severe => "severe",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
  Low,
  Medium,
  High,
}

impl EnergyLevel {
  pub const ALL: [EnergyLevel; 3] = [Self::Low, Self::Medium, Self::High];

  /// Ordinal weight, higher = more energetic
  pub fn weight(self) -> u8 {
    match self {
      Self::Low => 0,
      Self::Medium => 1,
      Self::High => 2,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
    }
  }
}

impl std::fmt::Display for StressLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::fmt::Display for MuscleSoreness {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::fmt::Display for EnergyLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for StressLevel {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "low" => Ok(Self::Low),
      "medium" => Ok(Self::Medium),
      "high" => Ok(Self::High),
      _ => Err(format!("Unknown stress level: {}", s)),
    }
  }
}

impl std::str::FromStr for MuscleSoreness {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "none" => Ok(Self::None),
      "mild" => Ok(Self::Mild),
      "moderate" => Ok(Self::Moderate),
      "severe" => Ok(Self::Severe),
      _ => Err(format!("Unknown muscle soreness: {}", s)),
    }
  }
}

impl std::str::FromStr for EnergyLevel {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "low" => Ok(Self::Low),
      "medium" => Ok(Self::Medium),
      "high" => Ok(Self::High),
      _ => Err(format!("Unknown energy level: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Raw and Normalized Reports
/// ---------------------------------------------------------------------------

/// Wellness report exactly as submitted by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWellnessInput {
  pub sleep_hours: f64,
  pub stress_level: String,
  pub muscle_soreness: String,
  pub energy_level: String,
}

/// Canonical wellness report consumed by the scoring model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWellness {
  pub sleep_hours: f64,
  pub stress: StressLevel,
  pub soreness: MuscleSoreness,
  pub energy: EnergyLevel,
}

impl NormalizedWellness {
  /// (sleep_hours, stress_weight, soreness_weight, energy_weight)
  pub fn weights(&self) -> (f64, u8, u8, u8) {
    (
      self.sleep_hours,
      self.stress.weight(),
      self.soreness.weight(),
      self.energy.weight(),
    )
  }
}

/// Validate a raw report and convert it into canonical form
pub fn normalize(raw: &RawWellnessInput) -> Result<NormalizedWellness, ReadinessError> {
  let sleep_hours = normalize_sleep_hours(raw.sleep_hours)?;
  let stress = raw
    .stress_level
    .parse::<StressLevel>()
    .map_err(|_| unknown_category("stressLevel"))?;
  let soreness = raw
    .muscle_soreness
    .parse::<MuscleSoreness>()
    .map_err(|_| unknown_category("muscleSoreness"))?;
  let energy = raw
    .energy_level
    .parse::<EnergyLevel>()
    .map_err(|_| unknown_category("energyLevel"))?;

  Ok(NormalizedWellness {
    sleep_hours,
    stress,
    soreness,
    energy,
  })
}

/// Range-check sleep and round to one fractional digit
pub fn normalize_sleep_hours(hours: f64) -> Result<f64, ReadinessError> {
  if !hours.is_finite() || !(MIN_SLEEP_HOURS..=MAX_SLEEP_HOURS).contains(&hours) {
    return Err(ReadinessError::InvalidInput("sleepHours out of range".into()));
  }
  Ok((hours * 10.0).round() / 10.0)
}

fn unknown_category(field: &str) -> ReadinessError {
  ReadinessError::InvalidInput(format!("unknown category: {}", field))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
