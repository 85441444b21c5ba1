//! Match candidate types shared by the matcher, the search engine, and the
//! data-quality report.

use serde::{Deserialize, Serialize};

/// Which matching strategy produced a score.
///
/// Ordering matters: when two candidates score equally, the class earlier in
/// this list wins the tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchClass {
    /// Normalized forms are identical.
    Exact,
    /// One normalized form contains the other.
    Substring,
    /// Token sets overlap (nickname equivalence counts as token equality).
    Token,
    /// Edit-distance similarity.
    Fuzzy,
    /// Shared first letter floor.
    FirstLetter,
}

impl MatchClass {
    /// Tie-break rank; lower is stronger.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Exact => 0,
            Self::Substring => 1,
            Self::Token => 2,
            Self::Fuzzy => 3,
            Self::FirstLetter => 4,
        }
    }
}

/// Transient result of scoring one candidate name against a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Candidate name as spelled in the pool.
    pub name: String,
    /// Normalized comparison form.
    pub normalized: String,
    /// Similarity in [0, 1].
    pub score: f64,
    pub class: MatchClass,
    /// True when the score clears the caller's confidence threshold.
    pub confident: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_rank_orders_exact_first() {
        let mut classes = vec![
            MatchClass::Fuzzy,
            MatchClass::Exact,
            MatchClass::FirstLetter,
            MatchClass::Token,
            MatchClass::Substring,
        ];
        classes.sort_by_key(|c| c.rank());
        assert_eq!(
            classes,
            vec![
                MatchClass::Exact,
                MatchClass::Substring,
                MatchClass::Token,
                MatchClass::Fuzzy,
                MatchClass::FirstLetter,
            ]
        );
    }
}
