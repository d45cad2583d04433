//! Trait Scorer: routes normalized answers into five aptitude buckets.
//!
//! Routing is by question-id prefix (case-insensitive):
//!
//! | prefix          | bucket      |
//! |-----------------|-------------|
//! | `tq`, `cc`      | technical   |
//! | `ip`            | analytical  |
//! | `scenario`      | business    |
//! | `pi`            | creative    |
//! | anything else   | split 0.3 technical / 0.2 creative / 0.3 analytical / 0.2 business |
//!
//! The split path has no `people` share. Nothing currently routes into `people`.
//!
//! Each routed value contributes a step, not its raw rating: `>= 2` earns the bucket
//! bonus, `1` earns one point, anything lower earns nothing.
//!
//! Scores are accumulated as integer tenths so the result does not depend on the
//! order answers are visited.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::analysis::normalizer::NormalizedAnswers;

/// An aptitude dimension. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trait {
    Technical,
    Analytical,
    Creative,
    People,
    Business,
}

impl Trait {
    /// All traits in tie-break order.
    pub const ALL: [Trait; 5] = [
        Trait::Technical,
        Trait::Analytical,
        Trait::Creative,
        Trait::People,
        Trait::Business,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Points awarded for an engaged (`>= 2`) answer.
    fn engaged_bonus(self) -> u32 {
        match self {
            Trait::Business => 2,
            _ => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trait::Technical => "TECHNICAL",
            Trait::Analytical => "ANALYTICAL",
            Trait::Creative => "CREATIVE",
            Trait::People => "PEOPLE",
            Trait::Business => "BUSINESS",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weights (in tenths) for answers whose prefix is not recognised.
const SPLIT_WEIGHTS: [(Trait, u32); 4] = [
    (Trait::Technical, 3),
    (Trait::Creative, 2),
    (Trait::Analytical, 3),
    (Trait::Business, 2),
];

/// Step contribution of one rating to one bucket, in whole points.
fn step_points(value: i64, bucket: Trait) -> u32 {
    if value >= 2 {
        bucket.engaged_bonus()
    } else if value == 1 {
        1
    } else {
        0
    }
}

/// Five accumulated trait scores, stored in tenths of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraitScores {
    tenths: [u32; 5],
}

impl TraitScores {
    pub fn get(&self, t: Trait) -> f64 {
        self.tenths[t.index()] as f64 / 10.0
    }

    /// Exact score in tenths; used for comparisons.
    pub fn tenths(&self, t: Trait) -> u32 {
        self.tenths[t.index()]
    }

    pub fn total(&self) -> f64 {
        Trait::ALL.iter().map(|t| self.get(*t)).sum()
    }

    fn add_tenths(&mut self, t: Trait, amount: u32) {
        self.tenths[t.index()] += amount;
    }

    #[cfg(test)]
    pub fn from_points(points: [(Trait, u32); 5]) -> Self {
        let mut scores = Self::default();
        for (t, p) in points {
            scores.add_tenths(t, p * 10);
        }
        scores
    }
}

impl Serialize for TraitScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(Trait::ALL.len()))?;
        for t in Trait::ALL {
            map.serialize_entry(&t.as_str().to_lowercase(), &self.get(t))?;
        }
        map.end()
    }
}

/// Routes a question id to its bucket, or `None` for the split path.
pub fn route_prefix(question_id: &str) -> Option<Trait> {
    let key = question_id.to_lowercase();
    if key.starts_with("tq") || key.starts_with("cc") {
        Some(Trait::Technical)
    } else if key.starts_with("ip") {
        Some(Trait::Analytical)
    } else if key.starts_with("scenario") {
        Some(Trait::Business)
    } else if key.starts_with("pi") {
        Some(Trait::Creative)
    } else {
        None
    }
}

pub fn score_traits(answers: &NormalizedAnswers) -> TraitScores {
    let mut scores = TraitScores::default();

    for (question_id, &value) in answers {
        match route_prefix(question_id) {
            Some(bucket) => scores.add_tenths(bucket, step_points(value, bucket) * 10),
            None => {
                for (bucket, weight) in SPLIT_WEIGHTS {
                    scores.add_tenths(bucket, step_points(value, bucket) * weight);
                }
            }
        }
    }

    scores
}
