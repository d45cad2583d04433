//! Axum route handlers for the Quiz API.

use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::careers::RankedCareer;
use crate::analysis::normalizer::RawAnswers;
use crate::analysis::orientation::{LearnerProfile, Orientation};
use crate::analysis::score_and_rank;
use crate::analysis::traits::TraitScores;
use crate::errors::AppError;
use crate::models::prediction::CareerPredictionRow;
use crate::models::quiz::QuizAnswerRow;
use crate::quiz::bank::{category_counts, QuizCategory, QuizQuestion};
use crate::quiz::persistence::{spawn_save, QuizSubmission};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub success: bool,
    pub data: Vec<QuizQuestion>,
    pub total: usize,
    pub categories: BTreeMap<&'static str, usize>,
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub category: QuizCategory,
    pub data: Vec<QuizQuestion>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub quiz_session_id: Uuid,
    pub answers_processed: usize,
    pub scores: TraitScores,
    pub orientation: Orientation,
    pub profile: LearnerProfile,
    pub predictions: Vec<RankedCareer>,
}

/// A submission body: `{student_id?, answers: {...}}` or a flat answer map.
#[derive(Debug, PartialEq)]
pub struct SubmitRequest {
    pub student_id: Option<i64>,
    pub answers: RawAnswers,
    /// The answer map exactly as received, for storage.
    pub raw_answers: Map<String, Value>,
}

const STUDENT_ID_KEYS: [&str; 2] = ["student_id", "studentId"];

impl SubmitRequest {
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        let Value::Object(mut map) = body else {
            return Err(AppError::Validation(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let mut student_id = None;
        for key in STUDENT_ID_KEYS {
            if let Some(value) = map.remove(key) {
                student_id = student_id.or(value.as_i64());
            }
        }

        let answers: Map<String, Value> = match map.remove("answers") {
            Some(Value::Object(answers)) => answers,
            Some(_) => {
                return Err(AppError::Validation(
                    "answers must be a JSON object".to_string(),
                ))
            }
            None => map,
        };

        let raw_answers = answers.clone();
        let answers = serde_json::from_value(Value::Object(answers))
            .map_err(|e| AppError::Validation(format!("Invalid answers: {e}")))?;

        Ok(Self {
            student_id,
            answers,
            raw_answers,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/quiz/questions
///
/// A full 25-question quiz drawn across all categories.
pub async fn handle_all_questions(State(state): State<AppState>) -> Json<QuestionsResponse> {
    let data = {
        let mut rng = rand::thread_rng();
        state.quiz_bank.draw_quiz(&mut rng)
    };
    let categories = category_counts(&data);
    debug!("Serving {} quiz questions", data.len());

    Json(QuestionsResponse {
        success: true,
        total: data.len(),
        data,
        categories,
    })
}

/// GET /api/quiz/questions/:category?count=N
pub async fn handle_category_questions(
    State(state): State<AppState>,
    Path(category): Path<String>,
    query: Result<Query<CountQuery>, QueryRejection>,
) -> Result<Json<CategoryQuestionsResponse>, AppError> {
    let Query(params) = query?;
    let category = category
        .parse::<QuizCategory>()
        .map_err(|e| AppError::NotFound(e.to_string()))?;
    let count = params.count.unwrap_or_else(|| category.draw_count());

    let data = {
        let mut rng = rand::thread_rng();
        state.quiz_bank.draw(category, count, &mut rng)
    };

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        category,
        total: data.len(),
        data,
    }))
}

/// POST /api/quiz/submit
///
/// Scores the answers, ranks careers and attaches roadmaps. Raw answers are saved in
/// the background; the response does not wait for that.
pub async fn handle_submit(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(body) = payload?;
    let request = SubmitRequest::from_body(body)?;
    let answers_processed = request.answers.len();
    info!(
        "Quiz submission with {answers_processed} answers (student: {:?})",
        request.student_id
    );

    let mut recommendation = score_and_rank(&request.answers);

    let submission = QuizSubmission::new(request.student_id, request.raw_answers)
        .with_recommendation(&recommendation);
    let quiz_session_id = submission.session_id;
    match &state.answer_store {
        Some(store) => {
            spawn_save(store.clone(), submission);
        }
        None => debug!("Answer persistence disabled; session {quiz_session_id} not stored"),
    }

    state.roadmaps.attach(&mut recommendation).await;

    Ok(Json(SubmitResponse {
        success: true,
        message: "Quiz submitted successfully".to_string(),
        quiz_session_id,
        answers_processed,
        scores: recommendation.scores,
        orientation: recommendation.orientation,
        profile: recommendation.profile,
        predictions: recommendation.careers,
    }))
}

/// GET /api/quiz/sessions/:session_id/answers
pub async fn handle_session_answers(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<QuizAnswerRow>>, AppError> {
    let store = state
        .answer_store
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Answer persistence is not enabled".to_string()))?;

    let rows = store.session_answers(session_id).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound(format!(
            "No answers stored for session {session_id}"
        )));
    }
    Ok(Json(rows))
}

/// GET /api/students/:student_id/predictions
///
/// Stored recommendations of one student, newest first.
pub async fn handle_student_predictions(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<Vec<CareerPredictionRow>>, AppError> {
    let store = state
        .answer_store
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Answer persistence is not enabled".to_string()))?;

    Ok(Json(store.student_predictions(student_id).await?))
}
