//! Keystroke-driven fuzzy search over the canonical store.
//!
//! Each call is a pure function of (query, pool); the only precomputed state
//! is the normalized-name index built once when the store is loaded.

use roster_match::{
    EXACT_MATCH_MIN, SEARCH_THRESHOLD, Similarity, normalize, rank_candidates, score_normalized,
};
use roster_model::{CanonicalEmployee, MatchCandidate};

use crate::filter::FacetSelections;

/// How many "did you mean" suggestions to surface on a suspected typo.
const SUGGESTION_LIMIT: usize = 3;

/// One search call's answer.
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    /// Matching employees: name matches first (best first), then free-text
    /// matches in pool order, deduplicated by name.
    pub results: Vec<&'a CanonicalEmployee>,
    /// The query looks like a misspelled name: nothing matched well, but the
    /// query is substantial enough that suggestions are worth showing.
    pub is_typo: bool,
    /// An exact name hit short-circuited everything else.
    pub has_perfect_match: bool,
    /// Top candidates for "did you mean", populated only when `is_typo`.
    pub suggestions: Vec<MatchCandidate>,
}

impl<'a> SearchOutcome<'a> {
    fn plain(results: Vec<&'a CanonicalEmployee>) -> Self {
        Self {
            results,
            is_typo: false,
            has_perfect_match: false,
            suggestions: Vec::new(),
        }
    }
}

/// The canonical store plus each employee's precomputed normalized name.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    employee: CanonicalEmployee,
    normalized_name: String,
}

impl SearchIndex {
    /// Build the index once at load time; pool order is preserved and breaks
    /// ranking ties.
    #[must_use]
    pub fn new(employees: impl IntoIterator<Item = CanonicalEmployee>) -> Self {
        let entries = employees
            .into_iter()
            .map(|employee| IndexEntry {
                normalized_name: normalize(&employee.human_name),
                employee,
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn employees(&self) -> impl Iterator<Item = &CanonicalEmployee> {
        self.entries.iter().map(|e| &e.employee)
    }

    /// Search the whole pool with no facets applied.
    #[must_use]
    pub fn search(&self, query: &str) -> SearchOutcome<'_> {
        self.search_filtered(query, &FacetSelections::default())
    }

    /// Narrow by facets first, then search within the narrowed universe.
    /// Filtering happens before ranking so an explicitly-emptied facet
    /// yields zero results even for a matching query.
    #[must_use]
    pub fn search_filtered(&self, query: &str, selections: &FacetSelections) -> SearchOutcome<'_> {
        let pool: Vec<&IndexEntry> = self
            .entries
            .iter()
            .filter(|e| selections.matches(&e.employee))
            .collect();

        let normalized_query = normalize(query);
        if normalized_query.is_empty() {
            return SearchOutcome::plain(pool.iter().map(|e| &e.employee).collect());
        }

        let mut scored: Vec<(&IndexEntry, Similarity)> = Vec::with_capacity(pool.len());
        for &entry in &pool {
            let similarity = score_normalized(&normalized_query, &entry.normalized_name);
            if similarity.score >= EXACT_MATCH_MIN {
                return SearchOutcome {
                    results: vec![&entry.employee],
                    is_typo: false,
                    has_perfect_match: true,
                    suggestions: Vec::new(),
                };
            }
            scored.push((entry, similarity));
        }

        // Name matches are gated on the pre-floor score: merely sharing a
        // first letter is a suggestion signal, not a match.
        let mut name_matches: Vec<(&IndexEntry, Similarity)> = scored
            .iter()
            .filter(|(_, s)| s.base >= SEARCH_THRESHOLD)
            .copied()
            .collect();
        name_matches.sort_by(|a, b| {
            b.1.score
                .partial_cmp(&a.1.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.class.rank().cmp(&b.1.class.rank()))
        });

        let query_lower = query.trim().to_lowercase();
        let query_words: Vec<&str> = query_lower.split_whitespace().collect();
        let free_text: Vec<&IndexEntry> = pool
            .iter()
            .filter(|e| free_text_matches(&e.employee, &query_lower, &query_words))
            .copied()
            .collect();

        let mut results: Vec<&CanonicalEmployee> = Vec::new();
        for (entry, _) in &name_matches {
            push_unique(&mut results, &entry.employee);
        }
        for entry in &free_text {
            push_unique(&mut results, &entry.employee);
        }

        let best_base = scored
            .iter()
            .map(|(_, s)| s.base)
            .fold(0.0_f64, f64::max);
        let is_typo =
            best_base < SEARCH_THRESHOLD && normalized_query.chars().count() >= 2 && !pool.is_empty();

        let suggestions = if is_typo {
            suggest(&scored)
        } else {
            Vec::new()
        };

        SearchOutcome {
            results,
            is_typo,
            has_perfect_match: false,
            suggestions,
        }
    }
}

fn push_unique<'a>(results: &mut Vec<&'a CanonicalEmployee>, employee: &'a CanonicalEmployee) {
    if !results.iter().any(|r| r.human_name == employee.human_name) {
        results.push(employee);
    }
}

/// Top candidates by floored score: the first-letter floor is exactly what
/// makes a near-miss surface as a suggestion.
fn suggest(scored: &[(&IndexEntry, Similarity)]) -> Vec<MatchCandidate> {
    let mut candidates: Vec<MatchCandidate> = scored
        .iter()
        .filter(|(_, s)| s.score > 0.0)
        .map(|(entry, s)| MatchCandidate {
            name: entry.employee.human_name.clone(),
            normalized: entry.normalized_name.clone(),
            score: s.score,
            class: s.class,
            confident: false,
        })
        .collect();
    rank_candidates(&mut candidates);
    candidates.truncate(SUGGESTION_LIMIT);
    candidates
}

/// Forgiving free-text match over non-name fields: the whole query as a
/// case-insensitive substring of any field, or every query word sharing a
/// containment (either direction) with some field token.
fn free_text_matches(employee: &CanonicalEmployee, query_lower: &str, query_words: &[&str]) -> bool {
    let scalars = [
        employee.position.as_deref(),
        employee.office.as_deref(),
        employee.phone.as_deref(),
        employee.email.as_deref(),
        employee.department.as_deref(),
        employee.bio.as_deref(),
    ];
    let lists = [
        &employee.projects,
        &employee.education,
        &employee.memberships,
    ];
    let fields = scalars
        .iter()
        .flatten()
        .copied()
        .chain(lists.iter().flat_map(|l| l.iter().map(String::as_str)));

    let lowered: Vec<String> = fields.map(str::to_lowercase).collect();
    if lowered.iter().any(|f| f.contains(query_lower)) {
        return true;
    }
    if query_words.is_empty() {
        return false;
    }
    query_words.iter().all(|word| {
        lowered.iter().any(|field| {
            field
                .split_whitespace()
                .any(|token| token.contains(word) || word.contains(token))
        })
    })
}
