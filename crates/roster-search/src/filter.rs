//! Facet filtering: structured narrowing applied before fuzzy search.
//!
//! Selections are explicit values passed per call, never ambient state, so
//! the pipeline is a pure function of its inputs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use roster_model::CanonicalEmployee;

/// The user's current facet choices.
///
/// The position facet distinguishes "not configured" (`None`, every position
/// allowed) from "explicitly deselected everything" (`Some` empty set, zero
/// results). The project facet has no such distinction: selecting nothing
/// means no project constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacetSelections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub projects: BTreeSet<String>,
}

impl FacetSelections {
    /// True when every configured facet admits this employee. Facets are
    /// independent predicates AND'd together.
    #[must_use]
    pub fn matches(&self, employee: &CanonicalEmployee) -> bool {
        self.position_matches(employee) && self.projects_match(employee)
    }

    fn position_matches(&self, employee: &CanonicalEmployee) -> bool {
        let Some(allowed) = &self.positions else {
            return true;
        };
        employee
            .position
            .as_deref()
            .is_some_and(|position| allowed.contains(position))
    }

    /// Every selected project must appear in the employee's project list,
    /// compared case-insensitively.
    fn projects_match(&self, employee: &CanonicalEmployee) -> bool {
        self.projects.iter().all(|selected| {
            employee
                .projects
                .iter()
                .any(|p| p.eq_ignore_ascii_case(selected))
        })
    }
}

/// Narrow `employees` to those admitted by `selections`, preserving order.
pub fn apply<'a, I>(employees: I, selections: &FacetSelections) -> Vec<&'a CanonicalEmployee>
where
    I: IntoIterator<Item = &'a CanonicalEmployee>,
{
    employees
        .into_iter()
        .filter(|e| selections.matches(e))
        .collect()
}
