use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client row owned by the client registry; assessments only reference it
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Client {
  pub id: i64,
  pub trainer_id: i64,
  pub name: String,
  pub created_at: DateTime<Utc>,
}
