//! Score to training recommendation mapping
//!
//! Tiers partition 0..=100 with lower-inclusive boundaries, so every score
//! lands in exactly one tier.

use serde::{Deserialize, Serialize};

use super::scoring::FormulaVersion;

const V1_MODERATE_FLOOR: u8 = 40;
const V1_HIGH_FLOOR: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessTier {
  Low,
  Moderate,
  High,
}

impl ReadinessTier {
  pub const ALL: [ReadinessTier; 3] = [Self::Low, Self::Moderate, Self::High];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Moderate => "moderate",
      Self::High => "high",
    }
  }

  /// Prescriptive message shown to the client and trainer
  pub fn message(self) -> &'static str {
    match self {
      Self::Low => "Low readiness: reduce training intensity and prioritise recovery.",
      Self::Moderate => {
        "Moderate readiness: train at reduced volume and monitor how you feel."
      }
      Self::High => "High readiness: proceed with training as planned.",
    }
  }

  /// Bar colour for dashboard charts
  pub fn color(self) -> &'static str {
    match self {
      Self::Low => "#E5484D",
      Self::Moderate => "#F5A524",
      Self::High => "#30A46C",
    }
  }
}

impl std::fmt::Display for ReadinessTier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for ReadinessTier {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "low" => Ok(Self::Low),
      "moderate" => Ok(Self::Moderate),
      "high" => Ok(Self::High),
      _ => Err(format!("Unknown readiness tier: {}", s)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
  pub tier: ReadinessTier,
  pub message: String,
}

impl From<ReadinessTier> for Recommendation {
  fn from(tier: ReadinessTier) -> Self {
    Self {
      tier,
      message: tier.message().to_string(),
    }
  }
}

/// Tier boundaries for formula v1
pub fn tier_v1(score: u8) -> ReadinessTier {
  if score >= V1_HIGH_FLOOR {
    ReadinessTier::High
  } else if score >= V1_MODERATE_FLOOR {
    ReadinessTier::Moderate
  } else {
    ReadinessTier::Low
  }
}

/// Tier for a score under the given formula version
pub fn select_tier(version: FormulaVersion, score: u8) -> ReadinessTier {
  match version {
    FormulaVersion::V1 => tier_v1(score),
  }
}

pub fn recommend(version: FormulaVersion, score: u8) -> Recommendation {
  select_tier(version, score).into()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
