//! Readiness trend aggregation for dashboard charts
//!
//! Reads persisted assessments and reshapes them into `(label, value)` bars.
//! Scores are taken as stored; nothing here re-runs the scoring model.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::recommendation::ReadinessTier;
use super::scoring::MAX_SCORE;
use super::ReadinessError;
use crate::models::ReadinessAssessment;
use crate::store::AssessmentStore;

const LABEL_FORMAT: &str = "%b %-d";
const LABEL_FORMAT_WITH_YEAR: &str = "%b %-d '%y";

/// ---------------------------------------------------------------------------
/// Date Range
/// ---------------------------------------------------------------------------

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DateRangeFields")]
pub struct DateRange {
  start: NaiveDate,
  end: NaiveDate,
}

/// Wire shape of a range; deserialization goes through `DateRange::new`
#[derive(Deserialize)]
struct DateRangeFields {
  start: NaiveDate,
  end: NaiveDate,
}

impl TryFrom<DateRangeFields> for DateRange {
  type Error = ReadinessError;

  fn try_from(fields: DateRangeFields) -> Result<Self, Self::Error> {
    DateRange::new(fields.start, fields.end)
  }
}

impl DateRange {
  pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReadinessError> {
    if start > end {
      return Err(ReadinessError::InvalidInput("dateRange start after end".into()));
    }
    Ok(Self { start, end })
  }

  /// Reject ranges spanning more than `max_days` days
  pub fn ensure_max_days(self, max_days: i64) -> Result<Self, ReadinessError> {
    if self.days() > max_days {
      return Err(ReadinessError::InvalidInput("dateRange too long".into()));
    }
    Ok(self)
  }

  pub fn start(&self) -> NaiveDate {
    self.start
  }

  pub fn end(&self) -> NaiveDate {
    self.end
  }

  /// Number of calendar days covered, both ends included
  pub fn days(&self) -> i64 {
    (self.end - self.start).num_days() + 1
  }

  /// Label format for bars in this range; the year is added once it
  /// spans more than one calendar year so labels stay unique
  pub fn label_format(&self) -> &'static str {
    if self.start.year() == self.end.year() {
      LABEL_FORMAT
    } else {
      LABEL_FORMAT_WITH_YEAR
    }
  }
}

/// ---------------------------------------------------------------------------
/// Trend Points
/// ---------------------------------------------------------------------------

/// One bar in the readiness chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
  pub date: NaiveDate,
  pub label: String,
  pub value: u8,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub color: Option<String>,
}

impl TrendPoint {
  pub fn from_assessment(assessment: &ReadinessAssessment, label_format: &str) -> Self {
    Self {
      date: assessment.date,
      label: assessment.date.format(label_format).to_string(),
      value: assessment.score,
      color: Some(assessment.tier.color().to_string()),
    }
  }
}

/// Lazy projection of stored assessments into trend points.
///
/// Single pass; call `trend_series` again for a fresh one.
#[derive(Debug)]
pub struct TrendSeries {
  assessments: std::vec::IntoIter<ReadinessAssessment>,
  label_format: &'static str,
}

impl TrendSeries {
  pub fn new(assessments: Vec<ReadinessAssessment>, range: &DateRange) -> Self {
    Self {
      assessments: assessments.into_iter(),
      label_format: range.label_format(),
    }
  }
}

impl Iterator for TrendSeries {
  type Item = TrendPoint;

  fn next(&mut self) -> Option<Self::Item> {
    let label_format = self.label_format;
    self
      .assessments
      .next()
      .map(|a| TrendPoint::from_assessment(&a, label_format))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.assessments.size_hint()
  }
}

impl ExactSizeIterator for TrendSeries {}

/// Fetch a client's assessments in `range` (ascending by date) as a series
pub async fn trend_series<S>(
  store: &S,
  client_id: i64,
  range: &DateRange,
) -> Result<TrendSeries, ReadinessError>
where
  S: AssessmentStore + ?Sized,
{
  let assessments = store.query_assessments(client_id, range).await?;
  debug!(
    client_id,
    start = %range.start(),
    end = %range.end(),
    count = assessments.len(),
    "Loaded readiness trend"
  );
  Ok(TrendSeries::new(assessments, range))
}

/// ---------------------------------------------------------------------------
/// Chart Payload and Summary
/// ---------------------------------------------------------------------------

/// Payload for the bar chart component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendChart {
  pub points: Vec<TrendPoint>,
  /// Axis override so bars scale against the full score range
  pub max_value: Option<u8>,
}

impl TrendChart {
  pub fn from_series(series: TrendSeries) -> Self {
    Self {
      points: series.collect(),
      max_value: Some(MAX_SCORE),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }
}

/// Headline numbers for the readiness dashboard card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
  pub count: usize,
  pub average: f64,
  pub min: u8,
  pub max: u8,
  pub latest: u8,
  pub latest_tier: ReadinessTier,
}

impl TrendSummary {
  /// Expects assessments ascending by date. None when empty.
  pub fn compute(assessments: &[ReadinessAssessment]) -> Option<Self> {
    let latest = assessments.last()?;
    let scores: Vec<u8> = assessments.iter().map(|a| a.score).collect();
    let total: u32 = scores.iter().map(|&s| u32::from(s)).sum();
    let average = total as f64 / scores.len() as f64;

    Some(Self {
      count: scores.len(),
      average: (average * 10.0).round() / 10.0,
      min: scores.iter().copied().min().unwrap_or(latest.score),
      max: scores.iter().copied().max().unwrap_or(latest.score),
      latest: latest.score,
      latest_tier: latest.tier,
    })
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
