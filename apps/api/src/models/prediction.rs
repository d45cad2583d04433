use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored recommendation from `career_predictions`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CareerPredictionRow {
    pub id: i64,
    pub student_id: i64,
    pub quiz_session_id: Uuid,
    pub primary_orientation: String,
    pub secondary_orientation: String,
    pub scores: Value,
    pub careers: Value,
    pub created_at: DateTime<Utc>,
}
