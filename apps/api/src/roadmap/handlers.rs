use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::roadmap::{CareerAdvice, Roadmap};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    #[serde(default)]
    pub career_title: String,
}

#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    pub success: bool,
    pub roadmap: Roadmap,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AdviceQuery {
    #[serde(default)]
    pub skills: String,
}

/// POST /api/roadmap/generate
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    payload: Result<Json<RoadmapRequest>, JsonRejection>,
) -> Result<Json<RoadmapResponse>, AppError> {
    let Json(req) = payload?;
    let career_title = req.career_title.trim();
    if career_title.is_empty() {
        return Err(AppError::Validation(
            "career_title cannot be empty".to_string(),
        ));
    }

    let roadmap = state.roadmaps.generate(career_title).await;
    let message = format!(
        "Roadmap generated ({}) for {career_title}",
        roadmap.generated_by.as_str()
    );

    Ok(Json(RoadmapResponse {
        success: true,
        roadmap,
        message,
    }))
}

/// GET /api/careers/advice?skills=...
pub async fn handle_career_advice(
    State(state): State<AppState>,
    query: Result<Query<AdviceQuery>, QueryRejection>,
) -> Result<Json<CareerAdvice>, AppError> {
    let Query(params) = query?;
    Ok(Json(state.roadmaps.advise(params.skills.trim()).await))
}
