//! Quiz Bank: per-category question sets loaded from JSON at startup.
//!
//! Each category lives in `{dir}/{Category}.json` as `{"questions": [...]}`. A file
//! that is missing, unreadable or empty is replaced by generated rating questions so
//! the quiz is always complete. The bank is read-only after loading.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum QuizBankError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} contains no questions", .0.display())]
    Empty(PathBuf),

    #[error("unknown quiz category '{0}'")]
    UnknownCategory(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Categories
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum QuizCategory {
    TechQuiz,
    CodeChallenge,
    InterestProfile,
    ScenarioSolver,
    Personality,
}

impl QuizCategory {
    pub const ALL: [QuizCategory; 5] = [
        QuizCategory::TechQuiz,
        QuizCategory::CodeChallenge,
        QuizCategory::InterestProfile,
        QuizCategory::ScenarioSolver,
        QuizCategory::Personality,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuizCategory::TechQuiz => "TechQuiz",
            QuizCategory::CodeChallenge => "CodeChallenge",
            QuizCategory::InterestProfile => "InterestProfile",
            QuizCategory::ScenarioSolver => "ScenarioSolver",
            QuizCategory::Personality => "Personality",
        }
    }

    /// Questions drawn from this category for a full quiz.
    pub fn draw_count(self) -> usize {
        match self {
            QuizCategory::TechQuiz => 7,
            QuizCategory::CodeChallenge => 5,
            QuizCategory::InterestProfile => 3,
            QuizCategory::ScenarioSolver => 5,
            QuizCategory::Personality => 5,
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.as_str())
    }

    /// Subjects used by the generated rating questions.
    fn fallback_subjects(self) -> &'static [&'static str] {
        match self {
            QuizCategory::TechQuiz => &[
                "programming",
                "web development",
                "databases",
                "algorithms",
                "system design",
                "debugging",
                "version control",
            ],
            QuizCategory::CodeChallenge => &["JavaScript", "Python", "Java", "SQL", "React"],
            QuizCategory::InterestProfile => {
                &["data analysis", "web design", "mobile development"]
            }
            QuizCategory::ScenarioSolver => &[
                "lead the project",
                "focus on technical implementation",
                "handle client communication",
                "manage the timeline",
                "solve complex problems",
            ],
            QuizCategory::Personality => &[
                "analytical",
                "creative",
                "detail-oriented",
                "collaborative",
                "innovative",
            ],
        }
    }

    fn fallback_question(self, subject: &str) -> String {
        match self {
            QuizCategory::TechQuiz => format!("How comfortable are you with {subject}? (Rate 1-5)"),
            QuizCategory::CodeChallenge => format!("Rate your experience with {subject} (1-5):"),
            QuizCategory::InterestProfile => format!("How interested are you in {subject}? (1-5)"),
            QuizCategory::ScenarioSolver => {
                format!("In a team project, you prefer to {subject} (1-5):")
            }
            QuizCategory::Personality => format!("You consider yourself {subject} (1-5):"),
        }
    }
}

impl fmt::Display for QuizCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizCategory {
    type Err = QuizBankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuizCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QuizBankError::UnknownCategory(s.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Questions
// ────────────────────────────────────────────────────────────────────────────

/// An answer option. Files may give a bare string or `{text, career_weights}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOption")]
pub struct QuizOption {
    pub text: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub career_weights: BTreeMap<String, i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Text(String),
    Weighted {
        #[serde(default)]
        text: String,
        #[serde(default)]
        career_weights: BTreeMap<String, i64>,
    },
}

impl From<RawOption> for QuizOption {
    fn from(raw: RawOption) -> Self {
        match raw {
            RawOption::Text(text) => QuizOption {
                text,
                career_weights: BTreeMap::new(),
            },
            RawOption::Weighted {
                text,
                career_weights,
            } => QuizOption {
                text,
                career_weights,
            },
        }
    }
}

fn default_weight() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub options: Vec<QuizOption>,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuizFile {
    questions: Vec<QuizQuestion>,
}

/// Rating questions used when a category file cannot be loaded.
pub fn fallback_questions(category: QuizCategory, count: usize) -> Vec<QuizQuestion> {
    let subjects = category.fallback_subjects();
    (1..=count)
        .map(|n| {
            let subject = subjects[(n - 1).min(subjects.len() - 1)];
            QuizQuestion {
                id: format!("fallback-{}-{n}", category.as_str().to_lowercase()),
                question: category.fallback_question(subject),
                category: category.as_str().to_string(),
                options: Vec::new(),
                weight: default_weight(),
                difficulty: None,
            }
        })
        .collect()
}

/// Reads one category file. Questions without a category inherit the file's.
pub fn load_category(dir: &Path, category: QuizCategory) -> Result<Vec<QuizQuestion>, QuizBankError> {
    let path = dir.join(category.file_name());
    let raw = std::fs::read_to_string(&path).map_err(|source| QuizBankError::Io {
        path: path.clone(),
        source,
    })?;
    let file: QuizFile = serde_json::from_str(&raw).map_err(|source| QuizBankError::Parse {
        path: path.clone(),
        source,
    })?;
    if file.questions.is_empty() {
        return Err(QuizBankError::Empty(path));
    }

    Ok(file
        .questions
        .into_iter()
        .map(|mut q| {
            if q.category.is_empty() {
                q.category = category.as_str().to_string();
            }
            q
        })
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Bank
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct QuizBank {
    categories: BTreeMap<QuizCategory, Vec<QuizQuestion>>,
}

impl QuizBank {
    /// Loads every category; never fails.
    pub fn load(dir: &Path) -> Self {
        let mut categories = BTreeMap::new();
        for category in QuizCategory::ALL {
            let questions = match load_category(dir, category) {
                Ok(questions) => {
                    info!("Loaded {} {} questions", questions.len(), category);
                    questions
                }
                Err(e) => {
                    warn!("{e}; using generated {category} questions");
                    fallback_questions(category, category.draw_count())
                }
            };
            categories.insert(category, questions);
        }
        Self { categories }
    }

    /// A bank made only of generated questions.
    #[cfg(test)]
    pub fn generated() -> Self {
        let categories = QuizCategory::ALL
            .into_iter()
            .map(|c| (c, fallback_questions(c, c.draw_count())))
            .collect();
        Self { categories }
    }

    pub fn questions(&self, category: QuizCategory) -> &[QuizQuestion] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Up to `count` questions from one category, in random order.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        category: QuizCategory,
        count: usize,
        rng: &mut R,
    ) -> Vec<QuizQuestion> {
        self.questions(category)
            .choose_multiple(rng, count)
            .cloned()
            .collect()
    }

    /// A full quiz: each category's draw count, shuffled together.
    pub fn draw_quiz<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<QuizQuestion> {
        let mut quiz: Vec<QuizQuestion> = QuizCategory::ALL
            .into_iter()
            .flat_map(|c| self.draw(c, c.draw_count(), &mut *rng))
            .collect();
        quiz.shuffle(rng);
        quiz
    }
}

/// Counts questions per category name.
pub fn category_counts(questions: &[QuizQuestion]) -> BTreeMap<&'static str, usize> {
    QuizCategory::ALL
        .into_iter()
        .map(|c| {
            let count = questions.iter().filter(|q| q.category == c.as_str()).count();
            (c.as_str(), count)
        })
        .collect()
}
