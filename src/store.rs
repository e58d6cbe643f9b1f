//! Storage boundary for readiness assessments
//!
//! The engine talks to persistence only through `AssessmentStore`. The SQLite
//! implementation keeps every row ever written; same-day corrections are new
//! rows, and reads only surface the newest row per (client, date).

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

use crate::models::{Client, NewAssessment, ReadinessAssessment};
use crate::readiness::{DateRange, ReadinessError};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[async_trait]
pub trait AssessmentStore: Send + Sync {
  /// Persist a new assessment and return its id
  async fn create_assessment(&self, record: &NewAssessment) -> Result<i64, ReadinessError>;

  /// Assessments for a client within `range`, ascending by date.
  /// Unknown clients are `NotFound`.
  async fn query_assessments(
    &self,
    client_id: i64,
    range: &DateRange,
  ) -> Result<Vec<ReadinessAssessment>, ReadinessError>;

  async fn get_assessment(&self, id: i64) -> Result<ReadinessAssessment, ReadinessError>;

  /// Most recent assessment for a client, if any
  async fn latest_assessment(
    &self,
    client_id: i64,
  ) -> Result<Option<ReadinessAssessment>, ReadinessError>;
}

/// ---------------------------------------------------------------------------
/// SQLite Store
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SqliteAssessmentStore {
  pool: SqlitePool,
}

impl SqliteAssessmentStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  async fn load_client(&self, client_id: i64) -> Result<Client, ReadinessError> {
    sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ?")
      .bind(client_id)
      .fetch_optional(&self.pool)
      .await?
      .ok_or_else(|| ReadinessError::NotFound(format!("client {}", client_id)))
  }
}

#[async_trait]
impl AssessmentStore for SqliteAssessmentStore {
  async fn create_assessment(&self, record: &NewAssessment) -> Result<i64, ReadinessError> {
    let result = sqlx::query(
      r#"
      INSERT INTO readiness_assessments (
        client_id, trainer_id, date, sleep_hours, stress_level,
        muscle_soreness, energy_level, score, tier, recommendation,
        formula_version, created_at
      )
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
      "#,
    )
    .bind(record.client_id)
    .bind(record.trainer_id)
    .bind(record.date.format(DATE_FORMAT).to_string())
    .bind(record.sleep_hours)
    .bind(record.stress_level.as_str())
    .bind(record.muscle_soreness.as_str())
    .bind(record.energy_level.as_str())
    .bind(i64::from(record.score))
    .bind(record.tier.as_str())
    .bind(&record.recommendation)
    .bind(record.formula_version.as_str())
    .bind(Utc::now().to_rfc3339())
    .execute(&self.pool)
    .await
    .map_err(|e| match e {
      sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
        ReadinessError::NotFound(format!("client {}", record.client_id))
      }
      other => ReadinessError::from(other),
    })?;

    let id = result.last_insert_rowid();
    debug!(id, client_id = record.client_id, "Inserted readiness assessment");
    Ok(id)
  }

  async fn query_assessments(
    &self,
    client_id: i64,
    range: &DateRange,
  ) -> Result<Vec<ReadinessAssessment>, ReadinessError> {
    self.load_client(client_id).await?;

    let rows = sqlx::query(
      r#"
      SELECT * FROM readiness_assessments
      WHERE id IN (
        SELECT MAX(id) FROM readiness_assessments
        WHERE client_id = ?1 AND date BETWEEN ?2 AND ?3
        GROUP BY date
      )
      ORDER BY date ASC
      "#,
    )
    .bind(client_id)
    .bind(range.start().format(DATE_FORMAT).to_string())
    .bind(range.end().format(DATE_FORMAT).to_string())
    .fetch_all(&self.pool)
    .await?;

    rows.iter().map(assessment_from_row).collect()
  }

  async fn get_assessment(&self, id: i64) -> Result<ReadinessAssessment, ReadinessError> {
    let row = sqlx::query("SELECT * FROM readiness_assessments WHERE id = ?")
      .bind(id)
      .fetch_optional(&self.pool)
      .await?
      .ok_or_else(|| ReadinessError::NotFound(format!("assessment {}", id)))?;

    assessment_from_row(&row)
  }

  async fn latest_assessment(
    &self,
    client_id: i64,
  ) -> Result<Option<ReadinessAssessment>, ReadinessError> {
    self.load_client(client_id).await?;

    let row = sqlx::query(
      r#"
      SELECT * FROM readiness_assessments
      WHERE client_id = ?
      ORDER BY date DESC, id DESC
      LIMIT 1
      "#,
    )
    .bind(client_id)
    .fetch_optional(&self.pool)
    .await?;

    row.as_ref().map(assessment_from_row).transpose()
  }
}

/// ---------------------------------------------------------------------------
/// Row Mapping
/// ---------------------------------------------------------------------------

fn assessment_from_row(row: &SqliteRow) -> Result<ReadinessAssessment, ReadinessError> {
  let id: i64 = row.try_get("id")?;
  let date: String = row.try_get("date")?;
  let stress_level: String = row.try_get("stress_level")?;
  let muscle_soreness: String = row.try_get("muscle_soreness")?;
  let energy_level: String = row.try_get("energy_level")?;
  let score: i64 = row.try_get("score")?;
  let tier: String = row.try_get("tier")?;
  let formula_version: String = row.try_get("formula_version")?;
  let created_at: String = row.try_get("created_at")?;

  let corrupt = |what: String| ReadinessError::StorageFailure(format!("assessment {}: {}", id, what));

  let assessment = ReadinessAssessment {
    id,
    client_id: row.try_get("client_id")?,
    trainer_id: row.try_get("trainer_id")?,
    date: NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| corrupt(e.to_string()))?,
    sleep_hours: row.try_get("sleep_hours")?,
    stress_level: stress_level.parse().map_err(corrupt)?,
    muscle_soreness: muscle_soreness.parse().map_err(corrupt)?,
    energy_level: energy_level.parse().map_err(corrupt)?,
    score: u8::try_from(score).map_err(|e| corrupt(e.to_string()))?,
    tier: tier.parse().map_err(corrupt)?,
    recommendation: row.try_get("recommendation")?,
    formula_version: formula_version.parse().map_err(corrupt)?,
    created_at: DateTime::parse_from_rfc3339(&created_at)
      .map(|dt| dt.with_timezone(&Utc))
      .map_err(|e| corrupt(e.to_string()))?,
  };

  if !assessment.is_consistent() {
    warn!(
      id,
      formula_version = %assessment.formula_version,
      "Stored readiness score no longer matches its inputs"
    );
  }

  Ok(assessment)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::readiness::{EnergyLevel, MuscleSoreness, NormalizedWellness, StressLevel};
  use crate::test_utils::{seed_test_client, setup_test_db, teardown_test_db};

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
  }

  fn record(client_id: i64, date: NaiveDate, sleep_hours: f64) -> NewAssessment {
    NewAssessment::scored(
      client_id,
      1,
      date,
      NormalizedWellness {
        sleep_hours,
        stress: StressLevel::Medium,
        soreness: MuscleSoreness::Mild,
        energy: EnergyLevel::Medium,
      },
    )
  }

  #[tokio::test]
  async fn test_create_and_get_roundtrip() {
    let pool = setup_test_db().await;
    let client_id = seed_test_client(&pool, "Ada").await;
    let store = SqliteAssessmentStore::new(pool.clone());

    let new = record(client_id, day(4), 7.5);
    let id = store.create_assessment(&new).await.expect("Should insert");

    let loaded = store.get_assessment(id).await.expect("Should load");
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.client_id, client_id);
    assert_eq!(loaded.date, day(4));
    assert_eq!(loaded.sleep_hours, 7.5);
    assert_eq!(loaded.stress_level, StressLevel::Medium);
    assert_eq!(loaded.score, new.score);
    assert_eq!(loaded.tier, new.tier);
    assert_eq!(loaded.recommendation, new.recommendation);
    assert!(loaded.is_consistent());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_query_returns_days_in_order_with_stored_scores() {
    let pool = setup_test_db().await;
    let client_id = seed_test_client(&pool, "Ada").await;
    let store = SqliteAssessmentStore::new(pool.clone());

    // Inserted out of order on purpose
    for (d, sleep) in [(5, 4.0), (1, 8.0), (3, 6.0)] {
      store.create_assessment(&record(client_id, day(d), sleep)).await.unwrap();
    }

    let range = DateRange::new(day(1), day(5)).unwrap();
    let rows = store.query_assessments(client_id, &range).await.unwrap();

    let dates: Vec<NaiveDate> = rows.iter().map(|a| a.date).collect();
    assert_eq!(dates, vec![day(1), day(3), day(5)]);
    assert_eq!(rows[0].score, record(client_id, day(1), 8.0).score);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_same_day_correction_supersedes() {
    let pool = setup_test_db().await;
    let client_id = seed_test_client(&pool, "Ada").await;
    let store = SqliteAssessmentStore::new(pool.clone());

    let first = store.create_assessment(&record(client_id, day(2), 4.0)).await.unwrap();
    let correction = store.create_assessment(&record(client_id, day(2), 8.0)).await.unwrap();

    let range = DateRange::new(day(1), day(3)).unwrap();
    let rows = store.query_assessments(client_id, &range).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, correction);

    // Both rows are retained
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM readiness_assessments")
      .fetch_one(&pool)
      .await
      .unwrap();
    assert_eq!(count, 2);
    assert!(store.get_assessment(first).await.is_ok());

    let latest = store.latest_assessment(client_id).await.unwrap().unwrap();
    assert_eq!(latest.id, correction);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_query_excludes_other_clients_and_dates() {
    let pool = setup_test_db().await;
    let ada = seed_test_client(&pool, "Ada").await;
    let bo = seed_test_client(&pool, "Bo").await;
    let store = SqliteAssessmentStore::new(pool.clone());

    store.create_assessment(&record(ada, day(2), 7.0)).await.unwrap();
    store.create_assessment(&record(ada, day(20), 7.0)).await.unwrap();
    store.create_assessment(&record(bo, day(2), 7.0)).await.unwrap();

    let range = DateRange::new(day(1), day(10)).unwrap();
    let rows = store.query_assessments(ada, &range).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].client_id, ada);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_unknown_client_is_not_found() {
    let pool = setup_test_db().await;
    let store = SqliteAssessmentStore::new(pool.clone());
    let range = DateRange::new(day(1), day(5)).unwrap();

    let err = store.query_assessments(404, &range).await.unwrap_err();
    assert_eq!(err, ReadinessError::NotFound("client 404".into()));

    let err = store.create_assessment(&record(404, day(1), 7.0)).await.unwrap_err();
    assert_eq!(err, ReadinessError::NotFound("client 404".into()));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_missing_assessment_is_not_found() {
    let pool = setup_test_db().await;
    let store = SqliteAssessmentStore::new(pool.clone());

    let err = store.get_assessment(99).await.unwrap_err();
    assert!(matches!(err, ReadinessError::NotFound(_)));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_latest_for_client_without_assessments() {
    let pool = setup_test_db().await;
    let client_id = seed_test_client(&pool, "Ada").await;
    let store = SqliteAssessmentStore::new(pool.clone());

    assert!(store.latest_assessment(client_id).await.unwrap().is_none());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_deleting_client_cascades() {
    let pool = setup_test_db().await;
    let client_id = seed_test_client(&pool, "Ada").await;
    let store = SqliteAssessmentStore::new(pool.clone());
    let id = store.create_assessment(&record(client_id, day(1), 7.0)).await.unwrap();

    sqlx::query("DELETE FROM clients WHERE id = ?")
      .bind(client_id)
      .execute(&pool)
      .await
      .unwrap();

    assert!(matches!(store.get_assessment(id).await, Err(ReadinessError::NotFound(_))));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_closed_pool_is_storage_failure() {
    let pool = setup_test_db().await;
    let store = SqliteAssessmentStore::new(pool.clone());
    pool.close().await;

    let err = store.get_assessment(1).await.unwrap_err();
    assert!(matches!(err, ReadinessError::StorageFailure(_)));
  }
}
