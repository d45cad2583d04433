//! Orientation Classifier: picks the primary and secondary trait of a submission.

use serde::Serialize;

use crate::analysis::traits::{Trait, TraitScores};

/// The (primary, secondary) trait pair. The two are never equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Orientation {
    primary: Trait,
    secondary: Trait,
}

impl Orientation {
    /// Classifies five scores.
    ///
    /// Primary: highest score, earliest in [`Trait::ALL`] on ties.
    /// Secondary: highest score strictly below the primary's, earliest on ties. Zero
    /// scores are eligible. When every other trait ties with the primary, the secondary
    /// is the first non-primary trait in order.
    pub fn classify(scores: &TraitScores) -> Self {
        let mut primary = Trait::ALL[0];
        for t in Trait::ALL {
            if scores.tenths(t) > scores.tenths(primary) {
                primary = t;
            }
        }

        let primary_score = scores.tenths(primary);
        let mut secondary: Option<Trait> = None;
        for t in Trait::ALL {
            let score = scores.tenths(t);
            if t == primary || score >= primary_score {
                continue;
            }
            match secondary {
                Some(best) if scores.tenths(best) >= score => {}
                _ => secondary = Some(t),
            }
        }

        let secondary = secondary.unwrap_or_else(|| {
            Trait::ALL
                .into_iter()
                .find(|t| *t != primary)
                .unwrap_or(Trait::Analytical)
        });

        Self { primary, secondary }
    }

    pub fn primary(&self) -> Trait {
        self.primary
    }

    pub fn secondary(&self) -> Trait {
        self.secondary
    }
}

/// Coarse experience band derived from the mean trait score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn from_scores(scores: &TraitScores) -> Self {
        let average = scores.total() / Trait::ALL.len() as f64;
        if average >= 8.0 {
            ExperienceLevel::Advanced
        } else if average >= 6.0 {
            ExperienceLevel::Intermediate
        } else {
            ExperienceLevel::Beginner
        }
    }
}

/// Learner summary shown next to the recommendations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearnerProfile {
    pub top_skills: Vec<&'static str>,
    pub primary_interests: Vec<&'static str>,
    pub experience: ExperienceLevel,
    pub learning_style: &'static str,
}

impl LearnerProfile {
    pub fn build(orientation: &Orientation, scores: &TraitScores) -> Self {
        let (top_skills, primary_interests) = match orientation.primary() {
            Trait::Technical => (
                vec!["Programming", "Problem Solving", "Logical Thinking"],
                vec!["Technology", "Software Development", "Innovation"],
            ),
            Trait::Analytical => (
                vec!["Data Analysis", "Critical Thinking", "Research"],
                vec!["Data", "Research", "Problem Solving"],
            ),
            Trait::Creative => (
                vec!["Design", "Innovation", "Visual Communication"],
                vec!["Design", "Arts", "Creative Expression"],
            ),
            Trait::People => (
                vec!["Communication", "Leadership", "Teamwork"],
                vec!["Human Relations", "Communication", "Community"],
            ),
            Trait::Business => (
                vec!["Strategic Thinking", "Project Management", "Business Acumen"],
                vec!["Business", "Strategy", "Management"],
            ),
        };

        Self {
            top_skills,
            primary_interests,
            experience: ExperienceLevel::from_scores(scores),
            learning_style: "Hands-on and practical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::traits::Trait::*;

    fn scores(t: u32, a: u32, c: u32, p: u32, b: u32) -> TraitScores {
        TraitScores::from_points([
            (Technical, t),
            (Analytical, a),
            (Creative, c),
            (People, p),
            (Business, b),
        ])
    }

    #[test]
    fn test_clear_primary_and_secondary() {
        let o = Orientation::classify(&scores(6, 0, 1, 0, 0));
        assert_eq!(o.primary(), Technical);
        assert_eq!(o.secondary(), Creative);
    }

    #[test]
    fn test_all_zero_uses_fixed_order() {
        let o = Orientation::classify(&TraitScores::default());
        assert_eq!(o.primary(), Technical);
        assert_eq!(o.secondary(), Analytical);
    }

    #[test]
    fn test_all_equal_nonzero_uses_fixed_order() {
        let o = Orientation::classify(&scores(4, 4, 4, 4, 4));
        assert_eq!(o.primary(), Technical);
        assert_eq!(o.secondary(), Analytical);
    }

    #[test]
    fn test_primary_tie_breaks_in_fixed_order() {
        // analytical precedes creative in the tie-break order
        let o = Orientation::classify(&scores(0, 5, 5, 0, 0));
        assert_eq!(o.primary(), Analytical);
        // creative ties with the primary so it is not eligible; zeros are
        assert_eq!(o.secondary(), Technical);
    }

    #[test]
    fn test_secondary_tie_breaks_in_fixed_order() {
        let o = Orientation::classify(&scores(0, 0, 2, 2, 9));
        assert_eq!(o.primary(), Business);
        assert_eq!(o.secondary(), Creative);
    }

    #[test]
    fn test_zero_secondary_when_others_are_zero() {
        let o = Orientation::classify(&scores(0, 0, 0, 3, 0));
        assert_eq!(o.primary(), People);
        assert_eq!(o.secondary(), Technical);
    }

    #[test]
    fn test_fractional_scores_compare_exactly() {
        // split path: technical 0.9, analytical 0.9, creative 0.6, business 0.4
        let answers = [("mystery".to_string(), 4)].into_iter().collect();
        let s = crate::analysis::traits::score_traits(&answers);
        let o = Orientation::classify(&s);
        assert_eq!(o.primary(), Technical);
        assert_eq!(o.secondary(), Creative);
    }

    #[test]
    fn test_primary_never_equals_secondary() {
        for t in 0..4 {
            for a in 0..4 {
                for c in 0..4 {
                    for p in 0..3 {
                        for b in 0..3 {
                            let o = Orientation::classify(&scores(t, a, c, p, b));
                            assert_ne!(o.primary(), o.secondary());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_experience_level_bands() {
        assert_eq!(
            ExperienceLevel::from_scores(&scores(0, 0, 0, 0, 0)),
            ExperienceLevel::Beginner
        );
        assert_eq!(
            ExperienceLevel::from_scores(&scores(6, 6, 6, 6, 6)),
            ExperienceLevel::Intermediate
        );
        assert_eq!(
            ExperienceLevel::from_scores(&scores(12, 9, 6, 6, 9)),
            ExperienceLevel::Advanced
        );
    }

    #[test]
    fn test_profile_follows_primary() {
        let s = scores(0, 0, 9, 0, 0);
        let profile = LearnerProfile::build(&Orientation::classify(&s), &s);
        assert_eq!(profile.top_skills[0], "Design");
        assert_eq!(profile.experience, ExperienceLevel::Beginner);
    }
}
