//! Raw answer and prediction persistence. Saving is fire-and-forget: the submit
//! response never waits for it and failures only reach the log.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::analysis::traits::{Trait, TraitScores};
use crate::analysis::Recommendation;
use crate::models::prediction::CareerPredictionRow;
use crate::models::quiz::QuizAnswerRow;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

/// A ranked career as kept with a stored prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictedCareer {
    pub rank: u8,
    pub title: &'static str,
    pub match_percentage: u32,
}

/// The scored outcome of one submission for a known student.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub student_id: i64,
    pub quiz_session_id: Uuid,
    pub primary_orientation: Trait,
    pub secondary_orientation: Trait,
    pub scores: TraitScores,
    pub careers: Vec<PredictedCareer>,
    pub created_at: DateTime<Utc>,
}

/// One submission ready to be stored. `answers` holds the JSON values as received.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSubmission {
    pub session_id: Uuid,
    pub user_id: Option<i64>,
    pub answers: Map<String, Value>,
    pub submitted_at: DateTime<Utc>,
    pub prediction: Option<PredictionRecord>,
}

impl QuizSubmission {
    pub fn new(user_id: Option<i64>, answers: Map<String, Value>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_id,
            answers,
            submitted_at: Utc::now(),
            prediction: None,
        }
    }

    /// Keeps the recommendation when the submission names a student.
    pub fn with_recommendation(mut self, recommendation: &Recommendation) -> Self {
        self.prediction = self.user_id.map(|student_id| PredictionRecord {
            student_id,
            quiz_session_id: self.session_id,
            primary_orientation: recommendation.orientation.primary(),
            secondary_orientation: recommendation.orientation.secondary(),
            scores: recommendation.scores,
            careers: recommendation
                .careers
                .iter()
                .map(|c| PredictedCareer {
                    rank: c.rank,
                    title: c.career.title,
                    match_percentage: c.match_percentage,
                })
                .collect(),
            created_at: self.submitted_at,
        });
        self
    }

    /// One `(question_id, position, value)` per submitted value. List answers yield a
    /// row per element; blank question ids are skipped.
    pub fn rows(&self) -> impl Iterator<Item = (&str, i32, &Value)> {
        self.answers
            .iter()
            .filter(|(id, _)| !id.trim().is_empty())
            .flat_map(|(id, value)| {
                let values: Vec<&Value> = match value {
                    Value::Array(items) => items.iter().collect(),
                    single => vec![single],
                };
                values
                    .into_iter()
                    .enumerate()
                    .map(move |(position, v)| (id.as_str(), position as i32, v))
            })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stores
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// Stores every answer of a submission; returns the number of rows written.
    async fn save_submission(&self, submission: &QuizSubmission) -> Result<usize, sqlx::Error>;

    async fn save_prediction(&self, prediction: &PredictionRecord) -> Result<(), sqlx::Error>;

    async fn session_answers(&self, session_id: Uuid) -> Result<Vec<QuizAnswerRow>, sqlx::Error>;

    /// Stored predictions of one student, newest first.
    async fn student_predictions(
        &self,
        student_id: i64,
    ) -> Result<Vec<CareerPredictionRow>, sqlx::Error>;
}

/// Postgres-backed store over `quiz_answers` and `career_predictions`.
pub struct PgAnswerStore {
    pool: PgPool,
}

impl PgAnswerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a small pool. Saves are short and infrequent.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl AnswerStore for PgAnswerStore {
    async fn save_submission(&self, submission: &QuizSubmission) -> Result<usize, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for (question_id, position, value) in submission.rows() {
            sqlx::query(
                r#"
                INSERT INTO quiz_answers
                    (question_id, answer_position, answer_value, user_id, quiz_session_id, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(question_id)
            .bind(position)
            .bind(Json(value))
            .bind(submission.user_id)
            .bind(submission.session_id)
            .bind(submission.submitted_at)
            .execute(&mut *tx)
            .await?;
            written += 1;
        }

        tx.commit().await?;
        Ok(written)
    }

    async fn save_prediction(&self, prediction: &PredictionRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO career_predictions
                (student_id, quiz_session_id, primary_orientation, secondary_orientation,
                 scores, careers, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(prediction.student_id)
        .bind(prediction.quiz_session_id)
        .bind(prediction.primary_orientation.as_str())
        .bind(prediction.secondary_orientation.as_str())
        .bind(Json(&prediction.scores))
        .bind(Json(&prediction.careers))
        .bind(prediction.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn session_answers(&self, session_id: Uuid) -> Result<Vec<QuizAnswerRow>, sqlx::Error> {
        sqlx::query_as::<_, QuizAnswerRow>(
            "SELECT * FROM quiz_answers WHERE quiz_session_id = $1 ORDER BY question_id, answer_position",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn student_predictions(
        &self,
        student_id: i64,
    ) -> Result<Vec<CareerPredictionRow>, sqlx::Error> {
        sqlx::query_as::<_, CareerPredictionRow>(
            "SELECT * FROM career_predictions WHERE student_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
    }
}

/// Saves a submission, then its prediction if any, on a detached task and logs the
/// outcome. A failed answer save does not stop the prediction save.
pub fn spawn_save(store: Arc<dyn AnswerStore>, submission: QuizSubmission) -> JoinHandle<()> {
    tokio::spawn(async move {
        let session_id = submission.session_id;
        match store.save_submission(&submission).await {
            Ok(written) => info!("Saved {written} answers for quiz session {session_id}"),
            Err(e) => error!("Failed to save answers for quiz session {session_id}: {e}"),
        }

        if let Some(prediction) = &submission.prediction {
            match store.save_prediction(prediction).await {
                Ok(()) => info!(
                    "Saved prediction for student {} (session {session_id})",
                    prediction.student_id
                ),
                Err(e) => error!(
                    "Failed to save prediction for student {}: {e}",
                    prediction.student_id
                ),
            }
        }
    })
}
