//! Explicit per-field merge authority.
//!
//! Different sources are authoritative for different facets: the tech list
//! for roles and titles, the directory export for identity and office
//! fields, the scraped profile for contact details. The original system
//! implied this ordering through call order; here it is a declared,
//! serializable table so the rules are visible and overridable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use roster_model::{SourceKind, fields};

/// Per-field source authority. For each scalar field, sources earlier in the
/// list override values set by sources later in (or absent from) the list.
/// Fields without an entry are strictly first-source-wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergePolicy {
    pub authority: BTreeMap<String, Vec<SourceKind>>,
}

impl Default for MergePolicy {
    fn default() -> Self {
        let mut authority = BTreeMap::new();
        let set = |map: &mut BTreeMap<String, Vec<SourceKind>>, field: &str, kinds: &[SourceKind]| {
            map.insert(field.to_string(), kinds.to_vec());
        };
        set(&mut authority, fields::ROLE, &[SourceKind::TechList]);
        set(&mut authority, fields::TITLE, &[SourceKind::TechList]);
        set(
            &mut authority,
            fields::PREFERRED_NAME,
            &[SourceKind::EmployeeList],
        );
        set(&mut authority, fields::OFFICE, &[SourceKind::EmployeeList]);
        set(&mut authority, fields::COMPANY, &[SourceKind::EmployeeList]);
        set(&mut authority, fields::EMAIL, &[SourceKind::ScrapedProfile]);
        set(&mut authority, fields::PHONE, &[SourceKind::ScrapedProfile]);
        set(&mut authority, fields::BIO, &[SourceKind::ScrapedProfile]);
        set(
            &mut authority,
            fields::POSITION,
            &[SourceKind::ScrapedProfile],
        );
        set(
            &mut authority,
            fields::DEPARTMENT,
            &[SourceKind::ScrapedProfile],
        );
        Self { authority }
    }
}

impl MergePolicy {
    /// Authority rank of a source for a field; lower is stronger. Sources
    /// not listed for the field never override an existing value.
    #[must_use]
    pub fn rank(&self, field: &str, kind: SourceKind) -> usize {
        self.authority
            .get(field)
            .and_then(|kinds| kinds.iter().position(|k| *k == kind))
            .unwrap_or(usize::MAX)
    }

    /// True when `incoming` may replace a value currently held by `holder`.
    #[must_use]
    pub fn overrides(&self, field: &str, incoming: SourceKind, holder: SourceKind) -> bool {
        self.rank(field, incoming) < self.rank(field, holder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tech_list_is_authoritative_for_title() {
        let policy = MergePolicy::default();
        assert!(policy.overrides(fields::TITLE, SourceKind::TechList, SourceKind::ScrapedProfile));
        assert!(!policy.overrides(fields::TITLE, SourceKind::GpuInventory, SourceKind::TechList));
    }

    #[test]
    fn unlisted_fields_are_first_source_wins() {
        let policy = MergePolicy {
            authority: BTreeMap::new(),
        };
        assert!(!policy.overrides(fields::TITLE, SourceKind::TechList, SourceKind::GpuInventory));
    }

    #[test]
    fn policy_round_trips_through_json() {
        let policy = MergePolicy::default();
        let json = serde_json::to_string(&policy).expect("serialize policy");
        let round: MergePolicy = serde_json::from_str(&json).expect("deserialize policy");
        assert_eq!(round.rank(fields::ROLE, SourceKind::TechList), 0);
    }
}
