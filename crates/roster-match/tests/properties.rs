//! Algebraic properties of normalization and scoring.

use proptest::prelude::*;

use roster_match::{normalize, score};

proptest! {
    /// Normalization is idempotent for arbitrary input.
    #[test]
    fn normalize_idempotent(s in "\\PC*") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Normalized output contains no uppercase, no doubled spaces, and no
    /// leading or trailing whitespace.
    #[test]
    fn normalize_output_is_canonical(s in "\\PC*") {
        let out = normalize(&s);
        prop_assert!(!out.contains("  "));
        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(out.chars().all(|c| !c.is_uppercase()));
    }

    /// Scoring is symmetric.
    #[test]
    fn score_symmetric(a in "[a-zA-Z,. ']{0,24}", b in "[a-zA-Z,. ']{0,24}") {
        let ab = score(&a, &b);
        let ba = score(&b, &a);
        prop_assert_eq!(ab.score, ba.score);
        prop_assert_eq!(ab.class, ba.class);
    }

    /// Any non-empty name scores exactly 1.0 against itself.
    #[test]
    fn score_self_is_exact(a in "[a-zA-Z][a-zA-Z ]{0,24}") {
        let sim = score(&a, &a);
        prop_assert_eq!(sim.score, 1.0);
    }

    /// Scores always land in [0, 1].
    #[test]
    fn score_bounded(a in "\\PC{0,32}", b in "\\PC{0,32}") {
        let sim = score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&sim.score));
        prop_assert!((0.0..=1.0).contains(&sim.base));
    }
}
