//! Record matching: find the best-scoring candidate for a target name.

use std::cmp::Ordering;

use roster_model::MatchCandidate;

use crate::normalize::normalize;
use crate::score::{AMBIGUITY_GAP, EXACT_MATCH_MIN, MATCH_FLOOR, score_normalized};

/// Outcome of matching one target name against a candidate pool.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// The top-scored candidate, or `None` when nothing cleared the floor.
    /// An unmatched target is an expansion, not an error.
    pub best: Option<MatchCandidate>,
    /// Every candidate above the floor, ranked. Kept so near-misses can be
    /// surfaced for human review instead of silently dropped.
    pub all_scored: Vec<MatchCandidate>,
    /// True when the top two scores are within [`AMBIGUITY_GAP`] of each
    /// other. Must be reported loudly for structural merges.
    pub is_ambiguous: bool,
}

impl MatchOutcome {
    fn unmatched() -> Self {
        Self {
            best: None,
            all_scored: Vec::new(),
            is_ambiguous: false,
        }
    }

    /// True when the best candidate cleared the caller's threshold.
    #[must_use]
    pub fn is_confident(&self) -> bool {
        self.best.as_ref().is_some_and(|c| c.confident)
    }
}

/// Match a target name against candidate names.
///
/// Scores every candidate, retains those above [`MATCH_FLOOR`], and ranks
/// them by score, then match-class priority, then first-seen order. A
/// candidate scoring as exact (≥ 0.99) short-circuits the scan: an exact
/// name hit is assumed unambiguous.
///
/// `threshold` only sets the `confident` flag on candidates; callers choose
/// the structural-merge threshold (0.75) or the forgiving search threshold
/// (0.4).
#[must_use]
pub fn match_target<'a, I>(target: &str, candidates: I, threshold: f64) -> MatchOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let normalized_target = normalize(target);
    if normalized_target.is_empty() {
        return MatchOutcome::unmatched();
    }

    let mut scored = Vec::new();
    for name in candidates {
        let normalized = normalize(name);
        let similarity = score_normalized(&normalized_target, &normalized);
        let candidate = MatchCandidate {
            name: name.to_string(),
            normalized,
            score: similarity.score,
            class: similarity.class,
            confident: similarity.score >= threshold,
        };

        if candidate.score >= EXACT_MATCH_MIN {
            return MatchOutcome {
                best: Some(candidate.clone()),
                all_scored: vec![candidate],
                is_ambiguous: false,
            };
        }

        if candidate.score > MATCH_FLOOR {
            scored.push(candidate);
        }
    }

    rank_candidates(&mut scored);

    let is_ambiguous = match scored.as_slice() {
        [first, second, ..] => (first.score - second.score).abs() < AMBIGUITY_GAP,
        _ => false,
    };

    MatchOutcome {
        best: scored.first().cloned(),
        all_scored: scored,
        is_ambiguous,
    }
}

/// Rank candidates: score descending, then match-class priority, then
/// first-seen order (stable sort preserves pool order for full ties).
pub fn rank_candidates(candidates: &mut [MatchCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.class.rank().cmp(&b.class.rank()))
    });
}
