//! Roadmap Generator: a four-phase learning plan per career title.
//!
//! The external text generator is tried first when one is configured. Anything that
//! goes wrong on that path (error, timeout, empty text, no recognisable phases) is
//! logged and answered from the static catalog instead. Callers never see an error.

pub mod catalog;
pub mod handlers;
pub mod parser;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::Recommendation;
use crate::llm_client::{prompts, LlmError, TextGenerator};

pub const PHASE_COUNT: u8 = 4;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Foundation,
    Beginner,
    Intermediate,
    Advanced,
}

impl PhaseKind {
    pub fn for_phase(number: u8) -> Self {
        match number {
            0 | 1 => PhaseKind::Foundation,
            2 => PhaseKind::Beginner,
            3 => PhaseKind::Intermediate,
            _ => PhaseKind::Advanced,
        }
    }
}

/// Which path produced a roadmap or piece of advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    Ai,
    Structured,
}

impl ContentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentSource::Ai => "ai",
            ContentSource::Structured => "structured",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
    pub number: u8,
    pub title: String,
    pub duration: String,
    pub kind: PhaseKind,
    pub description: String,
    pub skills: Vec<String>,
    pub resources: Vec<String>,
    pub projects: Vec<String>,
    pub milestones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roadmap {
    pub title: String,
    pub total_phases: u8,
    pub estimated_time_months: u32,
    pub phases: Vec<Phase>,
    pub generated_by: ContentSource,
}

impl Roadmap {
    pub fn new(career_title: &str, phases: Vec<Phase>, generated_by: ContentSource) -> Self {
        Self {
            title: format!("{} Learning Roadmap", career_title.trim()),
            total_phases: PHASE_COUNT,
            estimated_time_months: catalog::ESTIMATED_MONTHS,
            phases,
            generated_by,
        }
    }
}

/// Short career guidance for a free-text skill list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerAdvice {
    pub skills: String,
    pub advice: String,
    pub generated_by: ContentSource,
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

/// Produces roadmaps and advice. Cheap to share behind an `Arc`.
pub struct RoadmapGenerator {
    llm: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl RoadmapGenerator {
    pub fn new(llm: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        Self { llm, timeout }
    }

    /// Static paths only.
    pub fn structured() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub fn has_model(&self) -> bool {
        self.llm.is_some()
    }

    /// Asks the text generator, bounded by the configured timeout.
    async fn ask(&self, prompt: &str) -> Option<String> {
        let llm = self.llm.as_ref()?;

        let result = match tokio::time::timeout(self.timeout, llm.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout)),
        };

        match result {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                warn!("Text generator returned empty output; using static content");
                None
            }
            Err(e) => {
                warn!("Text generator failed: {e}; using static content");
                None
            }
        }
    }

    /// Always returns a four-phase roadmap.
    pub async fn generate(&self, career_title: &str) -> Roadmap {
        let Some(text) = self.ask(&prompts::roadmap_prompt(career_title)).await else {
            return catalog::structured_roadmap(career_title);
        };

        match roadmap_from_text(career_title, &text) {
            Some(roadmap) => {
                info!("AI roadmap for '{career_title}' parsed");
                roadmap
            }
            None => {
                warn!("No phases found in AI roadmap for '{career_title}'; using structured roadmap");
                debug!("Unparsed roadmap text: {text}");
                catalog::structured_roadmap(career_title)
            }
        }
    }

    /// Fills in `roadmap` for every ranked career, concurrently.
    pub async fn attach(&self, recommendation: &mut Recommendation) {
        let [first, second, third] = match recommendation.careers.as_mut_slice() {
            [a, b, c] => [a, b, c],
            other => {
                for career in other.iter_mut() {
                    career.roadmap = Some(self.generate(career.career.title).await);
                }
                return;
            }
        };

        let (r1, r2, r3) = tokio::join!(
            self.generate(first.career.title),
            self.generate(second.career.title),
            self.generate(third.career.title),
        );
        first.roadmap = Some(r1);
        second.roadmap = Some(r2);
        third.roadmap = Some(r3);
    }

    /// Two or three sentences of guidance; keyword fallback without a model.
    pub async fn advise(&self, skills: &str) -> CareerAdvice {
        let (advice, generated_by) = match self.ask(&prompts::advice_prompt(skills)).await {
            Some(text) => (text.trim().to_string(), ContentSource::Ai),
            None => (fallback_advice(skills).to_string(), ContentSource::Structured),
        };

        CareerAdvice {
            skills: skills.to_string(),
            advice,
            generated_by,
        }
    }
}

/// Builds an AI roadmap, padding missing phases with static ones. `None` when no
/// phase header is found.
fn roadmap_from_text(career_title: &str, text: &str) -> Option<Roadmap> {
    let parsed = parser::parse_phases(text);
    if parsed.is_empty() {
        return None;
    }

    let found = parsed.len();
    let mut phases: Vec<Phase> = parsed
        .into_iter()
        .zip(1..=PHASE_COUNT)
        .map(|(p, number)| {
            let title = if p.title.is_empty() {
                catalog::default_phase_title(number).to_string()
            } else {
                p.title
            };
            let skills = catalog::keyword_skills(&title, number);
            catalog::phase_shell(number, title, p.description, skills)
        })
        .collect();

    for number in (phases.len() as u8 + 1)..=PHASE_COUNT {
        phases.push(catalog::padding_phase(number, career_title));
    }
    if found < usize::from(PHASE_COUNT) {
        debug!("Padded AI roadmap from {found} to {PHASE_COUNT} phases");
    }

    Some(Roadmap::new(career_title, phases, ContentSource::Ai))
}

fn fallback_advice(skills: &str) -> &'static str {
    let skills = skills.trim().to_lowercase();
    if skills.is_empty() {
        "Focus on developing both technical and soft skills to expand your career opportunities."
    } else if skills.contains("programming") || skills.contains("coding") {
        "Your programming skills are valuable. Consider roles in software development, data analysis, or tech consulting."
    } else if skills.contains("design") || skills.contains("creative") {
        "Your creative skills can lead to opportunities in UX/UI design, marketing, or content creation."
    } else if skills.contains("analysis") || skills.contains("data") {
        "Your analytical skills are in high demand. Consider careers in data analysis, business intelligence, or research."
    } else {
        "Your diverse skill set opens up many career paths. Focus on combining your strengths with emerging industry trends."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::analysis::score_and_rank;

    struct Canned(&'static str);

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Unavailable { retries: 2 })
        }
    }

    struct Slow;

    #[async_trait]
    impl TextGenerator for Slow {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Ok("1. Foundation Phase: never returned in time at all".to_string())
        }
    }

    struct Counting(AtomicUsize);

    #[async_trait]
    impl TextGenerator for Counting {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(LlmError::EmptyContent)
        }
    }

    fn with(llm: impl TextGenerator + 'static) -> RoadmapGenerator {
        RoadmapGenerator::new(Some(Arc::new(llm)), Duration::from_secs(120))
    }

    #[tokio::test]
    async fn test_no_model_uses_structured_roadmap() {
        let roadmap = RoadmapGenerator::structured()
            .generate("Data Scientist")
            .await;
        assert_eq!(roadmap, catalog::structured_roadmap("Data Scientist"));
        assert_eq!(roadmap.phases.len(), 4);
    }

    #[tokio::test]
    async fn test_failing_model_falls_back() {
        let roadmap = with(Failing).generate("DevOps Engineer").await;
        assert_eq!(roadmap.generated_by, ContentSource::Structured);
        assert_eq!(roadmap.phases[0].skills[0], "Linux");
    }

    #[tokio::test]
    async fn test_empty_text_falls_back() {
        let roadmap = with(Canned("   \n")).generate("Data Scientist").await;
        assert_eq!(roadmap.generated_by, ContentSource::Structured);
    }

    #[tokio::test]
    async fn test_unparseable_text_falls_back() {
        let roadmap = with(Canned("Just study hard and you will be fine."))
            .generate("Data Scientist")
            .await;
        assert_eq!(roadmap.generated_by, ContentSource::Structured);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_model_times_out_to_structured() {
        let generator = RoadmapGenerator::new(Some(Arc::new(Slow)), Duration::from_secs(120));
        let roadmap = generator.generate("Frontend Developer").await;
        assert_eq!(roadmap.generated_by, ContentSource::Structured);
    }

    #[tokio::test]
    async fn test_partial_ai_roadmap_is_padded() {
        let text = "1. Foundation Phase: Learn the fundamentals of programming well.\n\
                    2. Intermediate Phase: Build several complete portfolio projects.";
        let roadmap = with(Canned(text)).generate("Backend Developer").await;

        assert_eq!(roadmap.generated_by, ContentSource::Ai);
        assert_eq!(roadmap.phases.len(), 4);
        assert_eq!(roadmap.phases[0].skills[0], "Core Fundamentals");
        assert_eq!(roadmap.phases[1].skills[0], "Practical Application");
        // padded phases come from the career's static progression
        assert_eq!(roadmap.phases[2].title, "Advanced Phase");
        assert_eq!(roadmap.phases[2].skills[0], "Microservices");
        assert_eq!(roadmap.phases[3].kind, PhaseKind::Advanced);
    }

    #[tokio::test]
    async fn test_attach_fills_all_three_careers() {
        let generator = RoadmapGenerator::structured();
        let mut rec = score_and_rank(&serde_json::from_value(json!({"tq1": 5})).unwrap());
        generator.attach(&mut rec).await;

        for career in &rec.careers {
            let roadmap = career.roadmap.as_ref().unwrap();
            assert_eq!(
                roadmap.title,
                format!("{} Learning Roadmap", career.career.title)
            );
        }
    }

    #[tokio::test]
    async fn test_attach_calls_model_once_per_career() {
        let counting = Arc::new(Counting(AtomicUsize::new(0)));
        let generator = RoadmapGenerator::new(Some(counting.clone()), Duration::from_secs(5));
        let mut rec = score_and_rank(&Default::default());
        generator.attach(&mut rec).await;
        assert_eq!(counting.0.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_advice_from_model() {
        let advice = with(Canned(" Learn Rust. Build things. ")).advise("coding").await;
        assert_eq!(advice.advice, "Learn Rust. Build things.");
        assert_eq!(advice.generated_by, ContentSource::Ai);
    }

    #[tokio::test]
    async fn test_advice_keyword_fallback() {
        let generator = with(Failing);
        assert!(generator.advise("Coding, SQL").await.advice.contains("programming"));
        assert!(generator.advise("graphic design").await.advice.contains("creative"));
        assert!(generator.advise("data wrangling").await.advice.contains("analytical"));
        assert!(generator.advise("").await.advice.contains("soft skills"));
        assert!(generator.advise("cooking").await.advice.contains("diverse"));
    }
}
