use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One stored answer, as read back from `quiz_answers`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuizAnswerRow {
    pub id: i64,
    pub question_id: String,
    /// Index within a list answer; 0 for a single value.
    pub answer_position: i32,
    /// The value exactly as submitted.
    pub answer_value: Value,
    pub user_id: Option<i64>,
    pub quiz_session_id: Uuid,
    pub created_at: DateTime<Utc>,
}
