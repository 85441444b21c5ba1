//! Fixed nickname-equivalence table for common given-name variants.
//!
//! Consulted by the similarity scorer as an extra token-equality rule; never
//! applied destructively during normalization, so original spellings survive
//! for display.

/// Canonical given name paired with its accepted short forms.
///
/// Entries are lowercase because they are compared against normalized tokens.
const NICKNAMES: &[(&str, &[&str])] = &[
    ("alexander", &["alex", "al"]),
    ("amanda", &["mandy", "mandi"]),
    ("andrew", &["andy", "drew"]),
    ("anthony", &["tony", "ant"]),
    ("benjamin", &["ben", "benny"]),
    ("charles", &["charlie", "chuck"]),
    ("christina", &["chris", "christy"]),
    ("christopher", &["chris", "christy"]),
    ("daniel", &["dan", "danny"]),
    ("david", &["dave", "davey"]),
    ("elizabeth", &["liz", "beth", "betty"]),
    ("james", &["jim", "jimmy", "jamie"]),
    ("jennifer", &["jen", "jenny"]),
    ("jessica", &["jess", "jessie"]),
    ("jonathan", &["jon", "johnny"]),
    ("joseph", &["joe", "joey"]),
    ("katherine", &["kate", "katie", "kat"]),
    ("matthew", &["matt", "matty"]),
    ("michael", &["mike", "mick"]),
    ("michelle", &["mich", "shell"]),
    ("nicholas", &["nick", "nicky"]),
    ("patricia", &["pat", "patty", "tricia"]),
    ("richard", &["rick", "dick", "rich"]),
    ("robert", &["bob", "rob", "bobby"]),
    ("samuel", &["sam", "sammy"]),
    ("sarah", &["sally", "sara"]),
    ("stephanie", &["steph", "stephie"]),
    ("thomas", &["tom", "tommy"]),
    ("timothy", &["tim", "timmy"]),
    ("william", &["will", "bill", "billy"]),
];

/// True when one normalized token is a known nickname of the other.
///
/// Checks canonical-to-variant in both directions. Equal tokens are not this
/// function's concern; callers test plain equality first.
#[must_use]
pub fn nickname_equivalent(a: &str, b: &str) -> bool {
    NICKNAMES.iter().any(|(canonical, variants)| {
        (*canonical == a && variants.contains(&b)) || (*canonical == b && variants.contains(&a))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_matches_variant_both_ways() {
        assert!(nickname_equivalent("robert", "bob"));
        assert!(nickname_equivalent("bob", "robert"));
        assert!(nickname_equivalent("elizabeth", "beth"));
    }

    #[test]
    fn unrelated_names_do_not_match() {
        assert!(!nickname_equivalent("robert", "john"));
        assert!(!nickname_equivalent("bob", "bill"));
    }

    #[test]
    fn variant_to_variant_is_not_equivalent() {
        // bob and rob are both variants of robert, but the table is
        // canonical-to-variant only.
        assert!(!nickname_equivalent("bob", "rob"));
    }
}
