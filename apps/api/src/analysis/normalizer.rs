//! Answer Normalizer: turns raw quiz payload values into a single rating per key.
//!
//! Submissions arrive in two shapes: `question_id → rating` and `category → [ratings]`.
//! Both are resolved once into [`AnswerValue`] at the JSON boundary, then reduced to an
//! integer in `[MIN_RATING, MAX_RATING]`. Nothing here can fail; unreadable input
//! becomes [`NEUTRAL_RATING`].

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;
/// Substituted for anything that cannot be read as a rating.
pub const NEUTRAL_RATING: i64 = 3;

/// A raw answer as submitted, before clamping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum AnswerValue {
    Scalar(i64),
    Series(Vec<i64>),
}

impl From<Value> for AnswerValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => {
                AnswerValue::Series(items.iter().map(read_rating).collect())
            }
            other => AnswerValue::Scalar(read_rating(&other)),
        }
    }
}

impl AnswerValue {
    /// Reduces the value to a single rating in `[1, 5]`.
    pub fn normalize(&self) -> i64 {
        match self {
            AnswerValue::Scalar(v) => clamp_rating(*v),
            AnswerValue::Series(values) if values.is_empty() => NEUTRAL_RATING,
            AnswerValue::Series(values) => {
                // elements are unclamped; i128 cannot overflow for any realistic length
                let sum: i128 = values.iter().map(|v| i128::from(*v)).sum();
                let mean = sum / values.len() as i128;
                clamp_rating(mean.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
            }
        }
    }
}

/// Raw answers keyed by question id (or category key for the list shape).
pub type RawAnswers = BTreeMap<String, AnswerValue>;

/// Normalized answers keyed exactly like the input.
pub type NormalizedAnswers = BTreeMap<String, i64>;

pub fn normalize_answers(raw: &RawAnswers) -> NormalizedAnswers {
    raw.iter()
        .map(|(key, value)| (key.clone(), value.normalize()))
        .collect()
}

/// Reads one JSON value as an unclamped rating. Numbers are truncated, strings are
/// parsed, everything else is neutral.
fn read_rating(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(NEUTRAL_RATING),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(NEUTRAL_RATING),
        _ => NEUTRAL_RATING,
    }
}

fn clamp_rating(v: i64) -> i64 {
    v.clamp(MIN_RATING, MAX_RATING)
}
