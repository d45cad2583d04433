pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::quiz::handlers as quiz;
use crate::roadmap::handlers as roadmap;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Quiz API
        .route("/api/quiz/questions", get(quiz::handle_all_questions))
        .route(
            "/api/quiz/questions/:category",
            get(quiz::handle_category_questions),
        )
        .route("/api/quiz/submit", post(quiz::handle_submit))
        .route(
            "/api/quiz/sessions/:session_id/answers",
            get(quiz::handle_session_answers),
        )
        .route(
            "/api/students/:student_id/predictions",
            get(quiz::handle_student_predictions),
        )
        // Roadmap / advice API
        .route(
            "/api/roadmap/generate",
            post(roadmap::handle_generate_roadmap),
        )
        .route("/api/careers/advice", get(roadmap::handle_career_advice))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::Config;
    use crate::models::prediction::CareerPredictionRow;
    use crate::models::quiz::QuizAnswerRow;
    use crate::quiz::bank::QuizBank;
    use crate::quiz::persistence::{AnswerStore, PredictionRecord, QuizSubmission};
    use crate::roadmap::RoadmapGenerator;

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Vec<QuizSubmission>>,
        predictions: Mutex<Vec<PredictionRecord>>,
    }

    #[async_trait]
    impl AnswerStore for MemoryStore {
        async fn save_submission(&self, submission: &QuizSubmission) -> Result<usize, sqlx::Error> {
            self.saved.lock().unwrap().push(submission.clone());
            Ok(submission.rows().count())
        }

        async fn save_prediction(&self, prediction: &PredictionRecord) -> Result<(), sqlx::Error> {
            self.predictions.lock().unwrap().push(prediction.clone());
            Ok(())
        }

        async fn student_predictions(
            &self,
            student_id: i64,
        ) -> Result<Vec<CareerPredictionRow>, sqlx::Error> {
            let predictions = self.predictions.lock().unwrap();
            Ok(predictions
                .iter()
                .rev()
                .filter(|p| p.student_id == student_id)
                .map(|p| CareerPredictionRow {
                    id: 0,
                    student_id: p.student_id,
                    quiz_session_id: p.quiz_session_id,
                    primary_orientation: p.primary_orientation.as_str().to_string(),
                    secondary_orientation: p.secondary_orientation.as_str().to_string(),
                    scores: serde_json::to_value(p.scores).unwrap(),
                    careers: serde_json::to_value(&p.careers).unwrap(),
                    created_at: p.created_at,
                })
                .collect())
        }

        async fn session_answers(&self, session_id: Uuid) -> Result<Vec<QuizAnswerRow>, sqlx::Error> {
            let saved = self.saved.lock().unwrap();
            Ok(saved
                .iter()
                .filter(|s| s.session_id == session_id)
                .flat_map(|s| {
                    s.rows().map(|(question_id, position, value)| QuizAnswerRow {
                        id: 0,
                        question_id: question_id.to_string(),
                        answer_position: position,
                        answer_value: value.clone(),
                        user_id: s.user_id,
                        quiz_session_id: s.session_id,
                        created_at: s.submitted_at,
                    })
                })
                .collect())
        }
    }

    fn test_config() -> Config {
        Config {
            port: 0,
            rust_log: "info".to_string(),
            database_url: None,
            llm_base_url: None,
            llm_model: "phi:latest".to_string(),
            llm_timeout: Duration::from_secs(1),
            quiz_bank_dir: PathBuf::from("missing"),
        }
    }

    fn app_with(store: Option<Arc<dyn AnswerStore>>) -> Router {
        build_router(AppState {
            config: test_config(),
            quiz_bank: Arc::new(QuizBank::generated()),
            roadmaps: Arc::new(RoadmapGenerator::structured()),
            answer_store: store,
        })
    }

    fn app() -> Router {
        app_with(None)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["ai_model"], Value::Null);
        assert_eq!(body["persistence"], false);
    }

    #[tokio::test]
    async fn test_all_questions() {
        let (status, body) = send(app(), get_req("/api/quiz/questions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 25);
        assert_eq!(body["categories"]["TechQuiz"], 7);
        assert_eq!(body["categories"]["InterestProfile"], 3);
    }

    #[tokio::test]
    async fn test_category_questions() {
        let (status, body) = send(app(), get_req("/api/quiz/questions/codechallenge?count=2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "CodeChallenge");
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn test_unknown_category_is_404() {
        let (status, body) = send(app(), get_req("/api/quiz/questions/Astrology")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_submit_ranks_and_attaches_roadmaps() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/quiz/submit",
                json!({"answers": {"tq1": 5, "tq2": 4, "pi1": 1}}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["answers_processed"], 3);
        assert_eq!(body["orientation"]["primary"], "TECHNICAL");
        assert_eq!(body["orientation"]["secondary"], "CREATIVE");

        let predictions = body["predictions"].as_array().unwrap();
        assert_eq!(predictions.len(), 3);
        assert_eq!(predictions[0]["title"], "Frontend Developer");
        assert_eq!(predictions[0]["rank"], 1);
        assert_eq!(
            predictions[0]["roadmap"]["title"],
            "Frontend Developer Learning Roadmap"
        );
        assert!(Uuid::parse_str(body["quiz_session_id"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_submit_rejects_non_object() {
        let (status, _) = send(app(), post_json("/api/quiz/submit", json!([5, 4]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submitted_answers_are_stored_in_background() {
        let store = Arc::new(MemoryStore::default());
        let app = app_with(Some(store.clone()));

        let (status, body) = send(
            app.clone(),
            post_json(
                "/api/quiz/submit",
                json!({"student_id": 9, "tq1": 5, "ip1": "7", "pi1": "junk", "cc": [4, 2]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let session = body["quiz_session_id"].as_str().unwrap().to_string();

        wait_for_prediction(&store).await;

        let (status, rows) = send(app, get_req(&format!("/api/quiz/sessions/{session}/answers"))).await;
        assert_eq!(status, StatusCode::OK);
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["question_id"], "cc");
        assert_eq!(rows[0]["answer_value"], 4);
        assert_eq!(rows[1]["answer_position"], 1);
        assert_eq!(rows[1]["answer_value"], 2);
        assert_eq!(rows[2]["question_id"], "ip1");
        assert_eq!(rows[2]["answer_value"], "7");
        assert_eq!(rows[2]["user_id"], 9);
        assert_eq!(rows[3]["answer_value"], "junk");
        assert_eq!(rows[4]["answer_value"], 5);
    }

    // saves run on their own task
    async fn wait_for_prediction(store: &MemoryStore) {
        for _ in 0..100 {
            if !store.predictions.lock().unwrap().is_empty() {
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_student_predictions_are_stored() {
        let store = Arc::new(MemoryStore::default());
        let app = app_with(Some(store.clone()));

        let (status, body) = send(
            app.clone(),
            post_json(
                "/api/quiz/submit",
                json!({"studentId": 21, "answers": {"tq1": 5, "tq2": 4, "pi1": 1}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        wait_for_prediction(&store).await;

        let (status, rows) = send(app.clone(), get_req("/api/students/21/predictions")).await;
        assert_eq!(status, StatusCode::OK);
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["quiz_session_id"], body["quiz_session_id"]);
        assert_eq!(rows[0]["primary_orientation"], "TECHNICAL");
        assert_eq!(rows[0]["secondary_orientation"], "CREATIVE");
        assert_eq!(rows[0]["scores"]["technical"], 6.0);
        assert_eq!(rows[0]["careers"][0]["title"], "Frontend Developer");
        assert_eq!(rows[0]["careers"][2]["rank"], 3);

        let (status, rows) = send(app, get_req("/api/students/22/predictions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rows, json!([]));
    }

    #[tokio::test]
    async fn test_anonymous_submission_stores_no_prediction() {
        let store = Arc::new(MemoryStore::default());
        let app = app_with(Some(store.clone()));

        let (status, _) = send(app, post_json("/api/quiz/submit", json!({"tq1": 5}))).await;
        assert_eq!(status, StatusCode::OK);

        for _ in 0..100 {
            if !store.saved.lock().unwrap().is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(store.saved.lock().unwrap().len(), 1);
        assert!(store.predictions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_student_predictions_without_store_is_404() {
        let (status, _) = send(app(), get_req("/api/students/1/predictions")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_count_is_json_validation_error() {
        let (status, body) = send(app(), get_req("/api/quiz/questions/TechQuiz?count=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_is_json_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/quiz/submit")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"tq1\": "))
            .unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_session_answers_without_store_is_404() {
        let uri = format!("/api/quiz/sessions/{}/answers", Uuid::new_v4());
        let (status, _) = send(app(), get_req(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_roadmap_generate() {
        let (status, body) = send(
            app(),
            post_json("/api/roadmap/generate", json!({"career_title": "Data Scientist"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["roadmap"]["total_phases"], 4);
        assert_eq!(body["roadmap"]["generated_by"], "structured");
        assert_eq!(body["roadmap"]["phases"][0]["skills"][0], "Python");
    }

    #[tokio::test]
    async fn test_roadmap_requires_title() {
        let (status, body) = send(
            app(),
            post_json("/api/roadmap/generate", json!({"career_title": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_career_advice_fallback() {
        let (status, body) = send(app(), get_req("/api/careers/advice?skills=coding")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], "coding");
        assert_eq!(body["generated_by"], "structured");
        assert!(body["advice"].as_str().unwrap().contains("programming"));
    }
}
