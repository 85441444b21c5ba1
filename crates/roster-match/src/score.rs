//! Layered similarity scoring between two human names.
//!
//! Strategies are tried in a fixed priority order; the first one that
//! applies wins. The ordering is deliberate: it keeps every match
//! explainable by a single named rule and lets each rule be tested in
//! isolation.

use rapidfuzz::distance::levenshtein;

use roster_model::MatchClass;

use crate::nicknames::nickname_equivalent;
use crate::normalize::{normalize, tokens};

/// Score for an exact normalized match.
pub const EXACT_SCORE: f64 = 1.0;
/// Score when one normalized name contains the other.
pub const SUBSTRING_SCORE: f64 = 0.9;
/// Score when every token of the shorter name matches the longer name.
pub const TOKEN_FULL_SCORE: f64 = 0.85;
/// Lower bound of the interpolated partial token-overlap score.
pub const TOKEN_PARTIAL_MIN: f64 = 0.70;
/// Floor applied when two names agree on their first letter.
pub const FIRST_LETTER_FLOOR: f64 = 0.6;
/// Minimum similarity below which a candidate is not considered at all.
pub const MATCH_FLOOR: f64 = 0.3;
/// Confident-match threshold for structural merging.
pub const MERGE_THRESHOLD: f64 = 0.75;
/// Forgiving threshold used by interactive search.
pub const SEARCH_THRESHOLD: f64 = 0.4;
/// Score considered a perfect match (exact, allowing float fuzz).
pub const EXACT_MATCH_MIN: f64 = 0.99;
/// Two top candidates closer than this are ambiguous.
pub const AMBIGUITY_GAP: f64 = 0.05;

/// Result of scoring one name pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    /// Final similarity in [0, 1], including the first-letter floor.
    pub score: f64,
    /// Score before the first-letter floor. Differs from `score` only when
    /// `class` is [`MatchClass::FirstLetter`]; search uses this to decide
    /// whether a name genuinely matched or merely shares an initial.
    pub base: f64,
    pub class: MatchClass,
}

/// Inputs shared by all strategies: both names pre-normalized and tokenized.
struct Pair<'a> {
    a: &'a str,
    b: &'a str,
    a_tokens: Vec<&'a str>,
    b_tokens: Vec<&'a str>,
}

type Strategy = for<'a> fn(&Pair<'a>) -> Option<(f64, MatchClass)>;

/// Ordered strategy list. First applicable rule wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("exact", exact),
    ("substring", substring),
    ("token_set", token_set),
    ("edit_distance", edit_distance),
];

/// Score two raw names. Symmetric in its arguments; scoring identical
/// non-empty inputs yields exactly 1.0.
#[must_use]
pub fn score(a: &str, b: &str) -> Similarity {
    let na = normalize(a);
    let nb = normalize(b);
    score_normalized(&na, &nb)
}

/// Score two already-normalized names. Callers that precompute normalized
/// forms (the search index, the matcher) use this to avoid re-normalizing
/// per comparison.
#[must_use]
pub fn score_normalized(a: &str, b: &str) -> Similarity {
    let pair = Pair {
        a,
        b,
        a_tokens: tokens(a),
        b_tokens: tokens(b),
    };

    let (base, class) = STRATEGIES
        .iter()
        .find_map(|(_, strategy)| strategy(&pair))
        .unwrap_or((0.0, MatchClass::Fuzzy));

    // First-letter agreement floors a weak fuzzy score.
    if class == MatchClass::Fuzzy && base < FIRST_LETTER_FLOOR && shares_first_letter(a, b) {
        return Similarity {
            score: FIRST_LETTER_FLOOR,
            base,
            class: MatchClass::FirstLetter,
        };
    }

    Similarity {
        score: base,
        base,
        class,
    }
}

fn exact(pair: &Pair<'_>) -> Option<(f64, MatchClass)> {
    (pair.a == pair.b).then_some((EXACT_SCORE, MatchClass::Exact))
}

fn substring(pair: &Pair<'_>) -> Option<(f64, MatchClass)> {
    if pair.a.is_empty() || pair.b.is_empty() {
        return None;
    }
    (pair.a.contains(pair.b) || pair.b.contains(pair.a))
        .then_some((SUBSTRING_SCORE, MatchClass::Substring))
}

/// Token-set comparison. Every token of the shorter name matching the longer
/// name scores [`TOKEN_FULL_SCORE`]; a majority match interpolates between
/// [`TOKEN_PARTIAL_MIN`] and [`TOKEN_FULL_SCORE`] by matched fraction.
/// Nickname equivalence counts as token equality.
fn token_set(pair: &Pair<'_>) -> Option<(f64, MatchClass)> {
    let (shorter, longer) = if pair.a_tokens.len() <= pair.b_tokens.len() {
        (&pair.a_tokens, &pair.b_tokens)
    } else {
        (&pair.b_tokens, &pair.a_tokens)
    };
    if shorter.is_empty() {
        return None;
    }

    let matched = shorter
        .iter()
        .filter(|t| longer.iter().any(|o| token_matches(t, o)))
        .count();
    let fraction = matched as f64 / shorter.len() as f64;
    if fraction <= 0.5 {
        return None;
    }

    let score = TOKEN_PARTIAL_MIN + (TOKEN_FULL_SCORE - TOKEN_PARTIAL_MIN) * fraction;
    Some((score, MatchClass::Token))
}

/// Base fuzzy score: `1 - levenshtein / max_len`. Always applies.
fn edit_distance(pair: &Pair<'_>) -> Option<(f64, MatchClass)> {
    let max_len = pair.a.chars().count().max(pair.b.chars().count());
    if max_len == 0 {
        // Both empty; exact already handled equality, but stay total.
        return Some((EXACT_SCORE, MatchClass::Exact));
    }
    let distance = levenshtein::distance(pair.a.chars(), pair.b.chars());
    let similarity = 1.0 - distance as f64 / max_len as f64;
    Some((similarity.clamp(0.0, 1.0), MatchClass::Fuzzy))
}

/// One token matches another if they are equal, one contains the other, or
/// they are nickname-equivalent.
fn token_matches(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a) || nickname_equivalent(a, b)
}

fn shares_first_letter(a: &str, b: &str) -> bool {
    if a.chars().count() < 2 || b.chars().count() < 2 {
        return false;
    }
    match (a.chars().next(), b.chars().next()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_scores_one() {
        let sim = score("John Smith", "john  smith");
        assert_eq!(sim.score, 1.0);
        assert_eq!(sim.class, MatchClass::Exact);
    }

    #[test]
    fn substring_handles_partial_names() {
        let sim = score("John", "John Smith");
        assert_eq!(sim.score, SUBSTRING_SCORE);
        assert_eq!(sim.class, MatchClass::Substring);
    }

    #[test]
    fn nickname_token_counts_as_match() {
        let sim = score("Bob Smith", "Robert Smith");
        assert!(sim.score >= TOKEN_FULL_SCORE, "got {}", sim.score);
        assert_eq!(sim.class, MatchClass::Token);
    }

    #[test]
    fn initial_token_contained_in_full_token() {
        // "J. Doe" normalizes to "j doe"; "j" is contained in "jane".
        let sim = score("J. Doe", "Jane Doe");
        assert_eq!(sim.class, MatchClass::Token);
        assert!(sim.score >= MERGE_THRESHOLD, "got {}", sim.score);
    }

    #[test]
    fn partial_token_overlap_interpolates() {
        // Two of three tokens match: fraction 2/3.
        let sim = score("anna maria lopez", "anna maria garcia");
        assert_eq!(sim.class, MatchClass::Token);
        let expected = TOKEN_PARTIAL_MIN + (TOKEN_FULL_SCORE - TOKEN_PARTIAL_MIN) * (2.0 / 3.0);
        assert!((sim.score - expected).abs() < 1e-9, "got {}", sim.score);
    }

    #[test]
    fn typo_falls_through_to_first_letter_floor() {
        // No substring or token hit; edit distance is weak but both start
        // with the same letter.
        let sim = score("Jhon", "John Smith");
        assert_eq!(sim.class, MatchClass::FirstLetter);
        assert_eq!(sim.score, FIRST_LETTER_FLOOR);
        assert!(sim.base < SEARCH_THRESHOLD, "base was {}", sim.base);
    }

    #[test]
    fn unrelated_names_score_low() {
        let sim = score("Wanda Maximoff", "Greg House");
        assert!(sim.score < MATCH_FLOOR, "got {}", sim.score);
    }

    #[test]
    fn empty_vs_name_scores_zero() {
        let sim = score("", "John");
        assert_eq!(sim.score, 0.0);
    }

    #[test]
    fn symmetric_examples() {
        for (a, b) in [
            ("Bob Smith", "Robert Smith"),
            ("John", "John Smith"),
            ("Jhon", "John Smith"),
            ("Wanda", "Greg"),
        ] {
            let ab = score(a, b);
            let ba = score(b, a);
            assert_eq!(ab.score, ba.score, "asymmetric for {a:?} / {b:?}");
            assert_eq!(ab.class, ba.class);
        }
    }
}
