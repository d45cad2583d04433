//! Career Ranker: maps an orientation to three ranked careers.
//!
//! The table is keyed by (primary, secondary). Each primary carries an "other" bucket
//! (`secondary: None`) used when its specific secondary is not listed. Business as
//! primary has only the "other" bucket. A table miss returns [`FALLBACK_CAREERS`].
//!
//! Metadata is constant per title; only the match percentage is computed:
//! `base + trunc(primary_score mod m)` with `m` = 10, 8, 6 by rank, clamped to 65–95.

use serde::Serialize;

use crate::analysis::orientation::Orientation;
use crate::analysis::traits::{Trait, TraitScores};
use crate::roadmap::Roadmap;

pub const MIN_MATCH: u32 = 65;
pub const MAX_MATCH: u32 = 95;
/// Jitter modulus per rank (1st, 2nd, 3rd).
const JITTER_MODULI: [u32; 3] = [10, 8, 6];

/// A static career record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareerOption {
    pub title: &'static str,
    #[serde(skip)]
    pub base_match: u32,
    pub icon: &'static str,
    pub description: &'static str,
    pub salary_range: &'static str,
    pub growth_rate: &'static str,
    pub learning_time: &'static str,
    pub difficulty: &'static str,
}

/// One row of the lookup table.
#[derive(Debug)]
pub struct CareerBucket {
    pub primary: Trait,
    /// `None` is the "other" bucket for this primary.
    pub secondary: Option<Trait>,
    pub careers: [CareerOption; 3],
}

/// A career placed in a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCareer {
    pub rank: u8,
    pub match_percentage: u32,
    #[serde(flatten)]
    pub career: &'static CareerOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roadmap: Option<Roadmap>,
}

macro_rules! career {
    ($title:expr, $base:expr, $icon:expr, $desc:expr, $salary:expr, $growth:expr, $time:expr, $difficulty:expr) => {
        CareerOption {
            title: $title,
            base_match: $base,
            icon: $icon,
            description: $desc,
            salary_range: $salary,
            growth_rate: $growth,
            learning_time: $time,
            difficulty: $difficulty,
        }
    };
}

pub static CAREER_TABLE: &[CareerBucket] = &[
    CareerBucket {
        primary: Trait::Technical,
        secondary: Some(Trait::Analytical),
        careers: [
            career!("Data Scientist", 92, "💻",
                "Combine programming skills with statistical analysis to extract insights from data",
                "$80,000 - $150,000", "Very High (25%)", "8-12 months", "Advanced"),
            career!("Software Engineer", 88, "🔧",
                "Build scalable software systems and applications using modern technologies",
                "$70,000 - $130,000", "High (20%)", "6-10 months", "Moderate"),
            career!("Machine Learning Engineer", 85, "🤖",
                "Develop AI models and machine learning systems for real-world applications",
                "$90,000 - $160,000", "Very High (30%)", "10-15 months", "Advanced"),
        ],
    },
    CareerBucket {
        primary: Trait::Technical,
        secondary: Some(Trait::Creative),
        careers: [
            career!("Frontend Developer", 90, "🎨",
                "Create engaging user interfaces combining technical skills with design sense",
                "$65,000 - $120,000", "High (18%)", "4-8 months", "Moderate"),
            career!("UX Engineer", 86, "💻",
                "Bridge design and development to create seamless user experiences",
                "$75,000 - $125,000", "High (22%)", "6-10 months", "Moderate"),
            career!("Game Developer", 82, "🎮",
                "Develop interactive games combining programming with creative storytelling",
                "$60,000 - $110,000", "Moderate (15%)", "8-12 months", "Moderate"),
        ],
    },
    CareerBucket {
        primary: Trait::Technical,
        secondary: None,
        careers: [
            career!("Full Stack Developer", 88, "💻",
                "Work on both frontend and backend development for complete web applications",
                "$70,000 - $125,000", "High (20%)", "6-12 months", "Moderate"),
            career!("DevOps Engineer", 85, "⚙️",
                "Manage infrastructure and deployment pipelines for software applications",
                "$75,000 - $135,000", "Very High (25%)", "8-14 months", "Advanced"),
            career!("Cybersecurity Specialist", 82, "🔒",
                "Protect systems and data from security threats and vulnerabilities",
                "$80,000 - $140,000", "Very High (28%)", "10-16 months", "Advanced"),
        ],
    },
    CareerBucket {
        primary: Trait::Analytical,
        secondary: Some(Trait::Technical),
        careers: [
            career!("Data Analyst", 90, "📊",
                "Analyze business data to provide insights and support decision-making",
                "$60,000 - $100,000", "High (20%)", "4-8 months", "Moderate"),
            career!("Business Intelligence Analyst", 87, "📈",
                "Create dashboards and reports to help businesses understand their performance",
                "$65,000 - $110,000", "High (18%)", "6-10 months", "Moderate"),
            career!("Quantitative Analyst", 84, "🔢",
                "Use mathematical models to analyze financial markets and investment strategies",
                "$85,000 - $150,000", "High (22%)", "10-15 months", "Advanced"),
        ],
    },
    CareerBucket {
        primary: Trait::Analytical,
        secondary: Some(Trait::Business),
        careers: [
            career!("Business Analyst", 89, "💼",
                "Bridge business needs with technical solutions through data analysis",
                "$65,000 - $115,000", "High (19%)", "5-9 months", "Moderate"),
            career!("Management Consultant", 86, "📋",
                "Help organizations solve complex problems and improve efficiency",
                "$80,000 - $140,000", "Moderate (12%)", "8-12 months", "Advanced"),
            career!("Market Research Analyst", 83, "📊",
                "Study market conditions and consumer behavior to guide business strategies",
                "$55,000 - $95,000", "High (18%)", "4-7 months", "Moderate"),
        ],
    },
    CareerBucket {
        primary: Trait::Analytical,
        secondary: None,
        careers: [
            career!("Research Scientist", 87, "🔬",
                "Conduct research and analysis in specialized fields to advance knowledge",
                "$70,000 - $120,000", "Moderate (8%)", "12-24 months", "Advanced"),
            career!("Financial Analyst", 84, "💰",
                "Evaluate investment opportunities and financial performance for organizations",
                "$60,000 - $105,000", "Moderate (15%)", "6-10 months", "Moderate"),
            career!("Operations Research Analyst", 81, "⚡",
                "Use advanced analytics to solve complex business problems",
                "$75,000 - $125,000", "High (25%)", "8-12 months", "Advanced"),
        ],
    },
    CareerBucket {
        primary: Trait::Creative,
        secondary: Some(Trait::Technical),
        careers: [
            career!("UX/UI Designer", 91, "🎨",
                "Design intuitive user interfaces and experiences for digital products",
                "$60,000 - $110,000", "High (16%)", "4-8 months", "Moderate"),
            career!("Product Designer", 88, "🚀",
                "Lead design strategy for products from concept to launch",
                "$70,000 - $125,000", "High (20%)", "6-12 months", "Moderate"),
            career!("Web Designer", 85, "💻",
                "Create visually appealing and functional websites and applications",
                "$50,000 - $90,000", "Moderate (10%)", "3-6 months", "Easy"),
        ],
    },
    CareerBucket {
        primary: Trait::Creative,
        secondary: Some(Trait::People),
        careers: [
            career!("Creative Director", 89, "🎭",
                "Lead creative teams and guide the vision for marketing and design projects",
                "$80,000 - $140,000", "Moderate (12%)", "8-15 months", "Advanced"),
            career!("Content Creator", 86, "📝",
                "Develop engaging content across various media platforms and formats",
                "$45,000 - $85,000", "High (22%)", "3-6 months", "Easy"),
            career!("Brand Manager", 83, "📢",
                "Develop and manage brand strategy and marketing campaigns",
                "$65,000 - $115,000", "Moderate (15%)", "6-10 months", "Moderate"),
        ],
    },
    CareerBucket {
        primary: Trait::Creative,
        secondary: None,
        careers: [
            career!("Graphic Designer", 87, "🎨",
                "Create visual concepts and designs for various media and purposes",
                "$45,000 - $80,000", "Moderate (8%)", "3-6 months", "Easy"),
            career!("Video Editor", 84, "🎬",
                "Edit and produce video content for entertainment, marketing, or educational purposes",
                "$40,000 - $75,000", "High (18%)", "4-8 months", "Moderate"),
            career!("Digital Artist", 81, "🖼️",
                "Create digital artwork and illustrations for games, media, or advertising",
                "$50,000 - $90,000", "Moderate (12%)", "6-12 months", "Moderate"),
        ],
    },
    CareerBucket {
        primary: Trait::People,
        secondary: Some(Trait::Business),
        careers: [
            career!("Human Resources Manager", 89, "👥",
                "Manage employee relations, recruitment, and organizational development",
                "$65,000 - $115,000", "Moderate (12%)", "6-12 months", "Moderate"),
            career!("Sales Manager", 86, "💼",
                "Lead sales teams and develop strategies to drive revenue growth",
                "$70,000 - $130,000", "Moderate (10%)", "4-8 months", "Moderate"),
            career!("Training and Development Specialist", 83, "🎓",
                "Design and deliver training programs to enhance employee skills",
                "$55,000 - $95,000", "High (18%)", "5-10 months", "Moderate"),
        ],
    },
    CareerBucket {
        primary: Trait::People,
        secondary: Some(Trait::Creative),
        careers: [
            career!("Marketing Manager", 88, "📢",
                "Develop and execute marketing strategies to promote products and services",
                "$60,000 - $110,000", "High (16%)", "5-9 months", "Moderate"),
            career!("Public Relations Specialist", 85, "📰",
                "Manage public image and communications for organizations or individuals",
                "$50,000 - $90,000", "Moderate (12%)", "4-8 months", "Moderate"),
            career!("Event Coordinator", 82, "🎉",
                "Plan and execute events, conferences, and special occasions",
                "$40,000 - $70,000", "High (15%)", "3-6 months", "Easy"),
        ],
    },
    CareerBucket {
        primary: Trait::People,
        secondary: None,
        careers: [
            career!("Teacher/Educator", 87, "🎓",
                "Educate and inspire students in academic or professional settings",
                "$45,000 - $80,000", "Stable (5%)", "12-24 months", "Moderate"),
            career!("Social Worker", 84, "🤝",
                "Help individuals and communities overcome challenges and improve their lives",
                "$50,000 - $85,000", "Moderate (10%)", "12-18 months", "Moderate"),
            career!("Customer Success Manager", 81, "😊",
                "Ensure customer satisfaction and drive product adoption and retention",
                "$60,000 - $105,000", "High (20%)", "4-8 months", "Moderate"),
        ],
    },
    CareerBucket {
        primary: Trait::Business,
        secondary: None,
        careers: [
            career!("Project Manager", 88, "📋",
                "Lead and coordinate projects from initiation to completion across various industries",
                "$70,000 - $120,000", "High (20%)", "6-10 months", "Moderate"),
            career!("Business Development Manager", 85, "🚀",
                "Identify growth opportunities and build strategic partnerships",
                "$75,000 - $125,000", "High (18%)", "8-12 months", "Moderate"),
            career!("Operations Manager", 82, "⚙️",
                "Oversee daily operations and optimize business processes for efficiency",
                "$65,000 - $110,000", "Moderate (15%)", "6-12 months", "Moderate"),
        ],
    },
];

/// Returned when no bucket matches.
pub static FALLBACK_CAREERS: [CareerOption; 3] = [
    career!("Software Developer", 85, "💻",
        "Create and maintain software applications using various programming languages and frameworks.",
        "$65,000 - $130,000", "High (22%)", "6-12 months", "Moderate"),
    career!("Data Analyst", 78, "📊",
        "Analyze and interpret complex data to help organizations make informed business decisions.",
        "$55,000 - $95,000", "Very High (25%)", "4-8 months", "Moderate"),
    career!("UX/UI Designer", 72, "🎨",
        "Design user-friendly interfaces and experiences for digital products and applications.",
        "$50,000 - $90,000", "High (13%)", "3-6 months", "Easy to Moderate"),
];

/// Ranks careers against a lookup table. `Default` uses [`CAREER_TABLE`].
#[derive(Debug, Clone, Copy)]
pub struct CareerRanker {
    table: &'static [CareerBucket],
}

impl Default for CareerRanker {
    fn default() -> Self {
        Self::new(CAREER_TABLE)
    }
}

impl CareerRanker {
    pub fn new(table: &'static [CareerBucket]) -> Self {
        Self { table }
    }

    /// Finds the bucket for an orientation: exact secondary first, then "other".
    pub fn lookup(&self, orientation: &Orientation) -> Option<&'static [CareerOption; 3]> {
        let table = self.table;
        let primary = orientation.primary();
        let secondary = orientation.secondary();

        table
            .iter()
            .find(|b| b.primary == primary && b.secondary == Some(secondary))
            .or_else(|| {
                table
                    .iter()
                    .find(|b| b.primary == primary && b.secondary.is_none())
            })
            .map(|b| &b.careers)
    }

    /// Returns exactly three careers in rank order. Never fails.
    pub fn rank(&self, orientation: &Orientation, scores: &TraitScores) -> Vec<RankedCareer> {
        let careers = match self.lookup(orientation) {
            Some(careers) => careers,
            None => {
                tracing::warn!(
                    "No career bucket for {}/{}; using fallback careers",
                    orientation.primary(),
                    orientation.secondary()
                );
                &FALLBACK_CAREERS
            }
        };

        let primary_tenths = scores.tenths(orientation.primary());

        careers
            .iter()
            .zip(JITTER_MODULI)
            .enumerate()
            .map(|(i, (career, modulus))| RankedCareer {
                rank: i as u8 + 1,
                match_percentage: match_percentage(career.base_match, primary_tenths, modulus),
                career,
                roadmap: None,
            })
            .collect()
    }
}

/// `base + trunc(score mod modulus)`, clamped. `score_tenths` is the score × 10.
fn match_percentage(base: u32, score_tenths: u32, modulus: u32) -> u32 {
    let jitter = (score_tenths % (modulus * 10)) / 10;
    (base + jitter).clamp(MIN_MATCH, MAX_MATCH)
}
