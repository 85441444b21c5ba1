//! Name normalization: canonicalize a human name into a comparison key.

/// Normalize a name for comparison.
///
/// - Reorders a single `"Last, First"` comma form to `"First Last"`
/// - Lowercases
/// - Folds common Latin diacritics to ASCII
/// - Strips punctuation
/// - Collapses whitespace and trims
///
/// Pure and total: any input maps to some output, the empty string maps to
/// itself, and the function is idempotent.
#[must_use]
pub fn normalize(name: &str) -> String {
    let reordered = reorder_comma_form(name.trim());
    let mut out = String::with_capacity(reordered.len());
    for ch in reordered.chars() {
        for lower in ch.to_lowercase() {
            if lower.is_alphanumeric() {
                fold_diacritic(lower, &mut out);
            } else if lower.is_whitespace() {
                out.push(' ');
            }
            // Everything else is punctuation; dropped.
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrite `"Feder, AJ"` as `"AJ Feder"`. Only applies to the single-comma
/// form with non-empty halves; anything else passes through unchanged.
fn reorder_comma_form(name: &str) -> String {
    let mut parts = name.split(',');
    if let (Some(last), Some(first), None) = (parts.next(), parts.next(), parts.next()) {
        let last = last.trim();
        let first = first.trim();
        if !last.is_empty() && !first.is_empty() {
            return format!("{first} {last}");
        }
    }
    name.to_string()
}

/// Fold an already-lowercased character's common diacritic forms to ASCII.
fn fold_diacritic(ch: char, out: &mut String) {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => out.push('a'),
        'è' | 'é' | 'ê' | 'ë' => out.push('e'),
        'ì' | 'í' | 'î' | 'ï' => out.push('i'),
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => out.push('o'),
        'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
        'ý' | 'ÿ' => out.push('y'),
        'ñ' => out.push('n'),
        'ç' => out.push('c'),
        'ß' => out.push_str("ss"),
        'æ' => out.push_str("ae"),
        'œ' => out.push_str("oe"),
        'đ' => out.push('d'),
        other => out.push(other),
    }
}

/// Split a normalized name into its word tokens.
#[must_use]
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_collapses_whitespace() {
        assert_eq!(normalize("O'Brien  Jr."), "obrien jr");
    }

    #[test]
    fn empty_maps_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("...,,,"), "");
    }

    #[test]
    fn reorders_last_comma_first() {
        assert_eq!(normalize("Feder, AJ"), "aj feder");
        // Two commas: not the Last, First form.
        assert_eq!(normalize("a, b, c"), "a b c");
    }

    #[test]
    fn folds_diacritics() {
        assert_eq!(normalize("José Núñez"), "jose nunez");
        assert_eq!(normalize("Größe"), "grosse");
    }

    #[test]
    fn idempotent_on_samples() {
        for sample in ["O'Brien  Jr.", "Feder, AJ", "José Núñez", "", "John Smith"] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn tokens_split_words() {
        assert_eq!(tokens("jane doe"), vec!["jane", "doe"]);
        assert!(tokens("").is_empty());
    }
}
