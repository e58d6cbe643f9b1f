//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seeders for clients and assessments
//! - Mock data factories

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::ReadinessAssessment;
use crate::readiness::{
  create_assessment, score_wellness, AssessmentOutcome, AssessmentRequest, EnergyLevel,
  FormulaVersion, MuscleSoreness, NormalizedWellness, RawWellnessInput, StressLevel,
};
use crate::store::SqliteAssessmentStore;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Insert a client owned by trainer 1 and return its id
pub async fn seed_test_client(pool: &SqlitePool, name: &str) -> i64 {
  sqlx::query("INSERT INTO clients (trainer_id, name) VALUES (?1, ?2)")
    .bind(1_i64)
    .bind(name)
    .execute(pool)
    .await
    .expect("Failed to insert test client")
    .last_insert_rowid()
}

/// Run check-ins through the real pipeline, one per `(day of March 2025, sleep hours)`.
/// Stress/soreness/energy are fixed at medium/mild/medium (33 points).
pub async fn seed_test_assessments(
  pool: &SqlitePool,
  client_id: i64,
  days: &[(u32, f64)],
) -> Vec<AssessmentOutcome> {
  let store = SqliteAssessmentStore::new(pool.clone());
  let mut outcomes = Vec::new();

  for &(day, sleep_hours) in days {
    let request = AssessmentRequest {
      client_id,
      trainer_id: 1,
      date: NaiveDate::from_ymd_opt(2025, 3, day).expect("Invalid test day"),
      wellness: RawWellnessInput {
        sleep_hours,
        stress_level: "medium".to_string(),
        muscle_soreness: "mild".to_string(),
        energy_level: "medium".to_string(),
      },
    };

    let outcome = create_assessment(&store, &request)
      .await
      .expect("Failed to seed test assessment");
    outcomes.push(outcome);
  }

  outcomes
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// An in-memory assessment with a consistent v1 projection
/// (low stress, no soreness, high energy)
pub fn mock_assessment(id: i64, date: NaiveDate, sleep_hours: f64) -> ReadinessAssessment {
  let wellness = NormalizedWellness {
    sleep_hours,
    stress: StressLevel::Low,
    soreness: MuscleSoreness::None,
    energy: EnergyLevel::High,
  };
  let scored = score_wellness(FormulaVersion::V1, wellness);

  ReadinessAssessment {
    id,
    client_id: 1,
    trainer_id: 1,
    date,
    sleep_hours,
    stress_level: wellness.stress,
    muscle_soreness: wellness.soreness,
    energy_level: wellness.energy,
    score: scored.score,
    tier: scored.recommendation.tier,
    recommendation: scored.recommendation.message,
    formula_version: FormulaVersion::V1,
    created_at: Utc::now(),
  }
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('clients', 'readiness_assessments')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 2, "Expected 2 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seeded_client_is_loadable() {
    let pool = setup_test_db().await;
    let id = seed_test_client(&pool, "Ada").await;

    let client: crate::models::Client = sqlx::query_as("SELECT * FROM clients WHERE id = ?")
      .bind(id)
      .fetch_one(&pool)
      .await
      .expect("Failed to load client");

    assert_eq!(client.name, "Ada");
    assert_eq!(client.trainer_id, 1);
    assert!(client.created_at <= Utc::now());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_assessments_returns_correct_count() {
    let pool = setup_test_db().await;
    let client_id = seed_test_client(&pool, "Ada").await;

    let outcomes = seed_test_assessments(&pool, client_id, &[(1, 8.0), (2, 7.0), (3, 6.0)]).await;
    assert_eq!(outcomes.len(), 3);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM readiness_assessments")
      .fetch_one(&pool)
      .await
      .expect("Failed to count assessments");

    assert_eq!(count, 3);

    teardown_test_db(pool).await;
  }
}
