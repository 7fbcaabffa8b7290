//! Relevance scoring: pluggable scorer trait, overlap-ratio default.
//!
//! `OverlapScorer` computes `|A ∩ B| / max(|A|, |B|)` over the lowercased
//! token sets of the résumé skills (A) and the job description (B). This is
//! not Jaccard: the denominator is the larger set, not the union, so a long
//! posting dilutes the score only through its own token count.

use std::collections::HashSet;

use crate::models::job::Job;
use crate::models::resume::Resume;

/// Implement this to swap scoring backends without touching the matcher or
/// handlers. Carried in `AppState` as `Arc<dyn RelevanceScorer>`.
pub trait RelevanceScorer: Send + Sync {
    /// Score in `[0, 1]`.
    fn score(&self, resume: &Resume, job: &Job) -> f64;
}

pub struct OverlapScorer;

impl RelevanceScorer for OverlapScorer {
    fn score(&self, resume: &Resume, job: &Job) -> f64 {
        overlap_ratio(
            &token_set(&resume.skills.join(" ")),
            &token_set(&job.description),
        )
    }
}

/// Lowercased word tokens split on whitespace and punctuation.
pub fn token_set(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn overlap_ratio(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let denominator = a.len().max(b.len());
    if denominator == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / denominator as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{job, resume_with_skills};
    use proptest::prelude::*;

    #[test]
    fn test_two_of_three_overlap() {
        let resume = resume_with_skills(&["javascript", "react"]);
        let score = OverlapScorer.score(&resume, &job("1", "JavaScript, React and Node"));
        // {javascript, react} vs {javascript, react, and, node} → 2/4
        assert!((score - 0.5).abs() < 1e-9, "score was {score}");

        let score = OverlapScorer.score(&resume, &job("2", "javascript react node"));
        assert!((score - 2.0 / 3.0).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_identical_sets_score_one() {
        let resume = resume_with_skills(&["javascript", "react", "node"]);
        let score = OverlapScorer.score(&resume, &job("1", "Node. React! javascript"));
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_sets_score_zero() {
        let resume = resume_with_skills(&["python"]);
        assert_eq!(OverlapScorer.score(&resume, &job("1", "java spring")), 0.0);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let resume = resume_with_skills(&[]);
        assert_eq!(OverlapScorer.score(&resume, &job("1", "")), 0.0);
        assert_eq!(OverlapScorer.score(&resume, &job("2", "rust")), 0.0);
    }

    #[test]
    fn test_ratio_is_not_jaccard() {
        let a = token_set("a b c");
        let b = token_set("b c d");
        // Jaccard would be 2/4; overlap over the larger set is 2/3
        assert!((overlap_ratio(&a, &b) - 2.0 / 3.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_score_is_bounded(
            a in proptest::collection::vec("[a-z]{1,6}", 0..12),
            b in proptest::collection::vec("[a-z]{1,6}", 0..12),
        ) {
            let score = overlap_ratio(&token_set(&a.join(" ")), &token_set(&b.join(" ")));
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn prop_identical_non_empty_sets_score_one(
            a in proptest::collection::vec("[a-z]{1,6}", 1..12),
        ) {
            let set = token_set(&a.join(" "));
            prop_assert!((overlap_ratio(&set, &set) - 1.0).abs() < 1e-9);
        }
    }
}
