//! Recommendation pipeline: raw answers → normalized ratings → trait scores →
//! orientation → three ranked careers.
//!
//! Everything here is synchronous and infallible. Roadmaps are attached afterwards by
//! [`crate::roadmap::RoadmapGenerator::attach`] since that step may await a model.

pub mod careers;
pub mod normalizer;
pub mod orientation;
pub mod traits;

use serde::Serialize;
use tracing::{debug, info};

use careers::{CareerRanker, RankedCareer};
use normalizer::{normalize_answers, RawAnswers};
use orientation::{LearnerProfile, Orientation};
use traits::{score_traits, TraitScores};

/// Full result of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub scores: TraitScores,
    pub orientation: Orientation,
    pub profile: LearnerProfile,
    pub careers: Vec<RankedCareer>,
}

/// Scores a submission against the default career table.
pub fn score_and_rank(answers: &RawAnswers) -> Recommendation {
    score_and_rank_with(&CareerRanker::default(), answers)
}

pub fn score_and_rank_with(ranker: &CareerRanker, answers: &RawAnswers) -> Recommendation {
    let normalized = normalize_answers(answers);
    let scores = score_traits(&normalized);
    debug!(
        "Trait scores for {} answers: technical={} analytical={} creative={} people={} business={}",
        normalized.len(),
        scores.get(traits::Trait::Technical),
        scores.get(traits::Trait::Analytical),
        scores.get(traits::Trait::Creative),
        scores.get(traits::Trait::People),
        scores.get(traits::Trait::Business),
    );

    let orientation = Orientation::classify(&scores);
    let careers = ranker.rank(&orientation, &scores);
    let profile = LearnerProfile::build(&orientation, &scores);

    info!(
        "Orientation {}/{} → top career '{}'",
        orientation.primary(),
        orientation.secondary(),
        careers.first().map(|c| c.career.title).unwrap_or("-")
    );

    Recommendation {
        scores,
        orientation,
        profile,
        careers,
    }
}
