//! Fuzzy name matching: normalization, layered similarity scoring, and
//! best-candidate selection over a record pool.

pub mod matcher;
pub mod nicknames;
pub mod normalize;
pub mod score;

pub use matcher::{MatchOutcome, match_target, rank_candidates};
pub use nicknames::nickname_equivalent;
pub use normalize::normalize;
pub use score::{
    AMBIGUITY_GAP, EXACT_MATCH_MIN, MATCH_FLOOR, MERGE_THRESHOLD, SEARCH_THRESHOLD, Similarity,
    score, score_normalized,
};
