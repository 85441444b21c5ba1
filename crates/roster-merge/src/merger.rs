//! Field-level merging of one source record into a canonical employee.

use roster_model::{CanonicalEmployee, SourceKind, SourceRecord};

use crate::policy::MergePolicy;

/// Merges source records into canonical employees under a [`MergePolicy`].
///
/// Merging never loses list data: computers and membership-style lists
/// accumulate with deduplication, and scalar values are only replaced when
/// the incoming source is declared authoritative for that field. The caller
/// stores the returned record back into the canonical map.
#[derive(Debug, Clone, Default)]
pub struct FieldMerger {
    policy: MergePolicy,
}

impl FieldMerger {
    #[must_use]
    pub fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &MergePolicy {
        &self.policy
    }

    /// Merge `source` into `canonical`, synthesizing a fresh employee seeded
    /// from the source when `canonical` is `None`.
    #[must_use]
    pub fn merge(
        &self,
        canonical: Option<CanonicalEmployee>,
        source: &SourceRecord,
    ) -> CanonicalEmployee {
        let mut employee = canonical.unwrap_or_else(|| {
            CanonicalEmployee::new(source.match_name().unwrap_or_default())
        });

        self.merge_identity(&mut employee, source);
        self.merge_scalars(&mut employee, source);
        merge_computers(&mut employee, source);
        merge_list(&mut employee.projects, &source.projects);
        merge_list(&mut employee.education, &source.education);
        merge_list(&mut employee.licenses, &source.licenses);
        merge_list(&mut employee.memberships, &source.memberships);

        if !employee.created_from.contains(&source.kind) {
            employee.created_from.push(source.kind);
        }
        employee
    }

    /// First/last name handling: the directory export is the system of
    /// record for name spelling; other sources only fill gaps.
    fn merge_identity(&self, employee: &mut CanonicalEmployee, source: &SourceRecord) {
        let authoritative = source.kind == SourceKind::EmployeeList;
        if let Some(first) = &source.first_name {
            if authoritative || employee.first_name.is_none() {
                employee.first_name = Some(first.clone());
            }
        }
        if let Some(last) = &source.last_name {
            if authoritative || employee.last_name.is_none() {
                employee.last_name = Some(last.clone());
            }
        }
    }

    fn merge_scalars(&self, employee: &mut CanonicalEmployee, source: &SourceRecord) {
        for (key, value) in &source.fields {
            let should_set = match employee.scalar(key) {
                None => true,
                Some(existing) if existing.is_empty() => true,
                Some(_) => {
                    let holder = employee.field_sources.get(key).copied();
                    holder.is_some_and(|holder| self.policy.overrides(key, source.kind, holder))
                }
            };
            if should_set {
                employee.set_scalar(key, value.clone());
                employee.field_sources.insert(key.clone(), source.kind);
            }
        }
    }
}

/// Append source computers not already present; dedup key is the
/// case-insensitive computer name. Nameless machines cannot be identified
/// and are always appended.
fn merge_computers(employee: &mut CanonicalEmployee, source: &SourceRecord) {
    for computer in &source.computers {
        let duplicate = !computer.name.is_empty()
            && employee
                .computers
                .iter()
                .any(|existing| existing.name.eq_ignore_ascii_case(&computer.name));
        if !duplicate {
            employee.computers.push(computer.clone());
        }
    }
}

/// Append-and-dedup, preserving first-seen order. Dedup is exact
/// case-insensitive name equality only.
fn merge_list(target: &mut Vec<String>, incoming: &[String]) {
    for item in incoming {
        if !target.iter().any(|t| t.eq_ignore_ascii_case(item)) {
            target.push(item.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::{Computer, fields};

    fn computer(name: &str) -> Computer {
        Computer {
            name: name.to_string(),
            ..Computer::default()
        }
    }

    fn record(kind: SourceKind, name: &str) -> SourceRecord {
        SourceRecord {
            name: name.to_string(),
            kind,
            ..SourceRecord::default()
        }
    }

    #[test]
    fn synthesizes_fresh_employee_from_source() {
        let merger = FieldMerger::default();
        let mut source = record(SourceKind::TechList, "Jane Doe");
        source.set_field(fields::ROLE, "Technology");

        let employee = merger.merge(None, &source);
        assert_eq!(employee.human_name, "Jane Doe");
        assert_eq!(employee.role.as_deref(), Some("Technology"));
        assert_eq!(employee.created_from, vec![SourceKind::TechList]);
    }

    #[test]
    fn first_source_wins_for_unlisted_authority() {
        let merger = FieldMerger::default();
        let mut first = record(SourceKind::ScrapedProfile, "Jane Doe");
        first.set_field(fields::OFFICE, "Shanghai");
        let mut second = record(SourceKind::GpuInventory, "Jane Doe");
        second.set_field(fields::OFFICE, "New York");

        let employee = merger.merge(None, &first);
        let employee = merger.merge(Some(employee), &second);
        assert_eq!(employee.office.as_deref(), Some("Shanghai"));
    }

    #[test]
    fn authoritative_source_overrides_earlier_value() {
        let merger = FieldMerger::default();
        let mut scraped = record(SourceKind::ScrapedProfile, "Jane Doe");
        scraped.set_field(fields::TITLE, "Designer");
        let mut tech = record(SourceKind::TechList, "Jane Doe");
        tech.set_field(fields::TITLE, "Design Technology Director");

        let employee = merger.merge(None, &scraped);
        let employee = merger.merge(Some(employee), &tech);
        assert_eq!(
            employee.title.as_deref(),
            Some("Design Technology Director")
        );
        assert_eq!(
            employee.field_sources.get(fields::TITLE),
            Some(&SourceKind::TechList)
        );
    }

    #[test]
    fn computers_accumulate_and_dedup_by_name() {
        let merger = FieldMerger::default();
        let mut a = record(SourceKind::GpuInventory, "Jane Doe");
        a.computers.push(computer("PC1"));
        let mut b = record(SourceKind::InventorySubmission, "Jane Doe");
        b.computers.push(computer("pc1"));
        b.computers.push(computer("PC2"));

        let employee = merger.merge(None, &a);
        let employee = merger.merge(Some(employee), &b);
        let names: Vec<_> = employee.computers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["PC1", "PC2"]);
    }

    #[test]
    fn computer_accumulation_is_order_independent_by_key_set() {
        let merger = FieldMerger::default();
        let mut a = record(SourceKind::GpuInventory, "Jane Doe");
        a.computers.push(computer("PC1"));
        let mut b = record(SourceKind::InventorySubmission, "Jane Doe");
        b.computers.push(computer("PC2"));

        let ab = merger.merge(Some(merger.merge(None, &a)), &b);
        let ba = merger.merge(Some(merger.merge(None, &b)), &a);

        let mut ab_names: Vec<_> = ab.computers.iter().map(|c| c.name.clone()).collect();
        let mut ba_names: Vec<_> = ba.computers.iter().map(|c| c.name.clone()).collect();
        ab_names.sort();
        ba_names.sort();
        assert_eq!(ab_names, ba_names);
    }

    #[test]
    fn lists_preserve_order_and_dedup_case_insensitively() {
        let merger = FieldMerger::default();
        let mut a = record(SourceKind::ScrapedProfile, "Jane Doe");
        a.projects = vec!["Tower A".to_string(), "Museum B".to_string()];
        let mut b = record(SourceKind::ScrapedProfile, "Jane Doe");
        b.projects = vec!["museum b".to_string(), "Bridge C".to_string()];

        let employee = merger.merge(Some(merger.merge(None, &a)), &b);
        assert_eq!(employee.projects, vec!["Tower A", "Museum B", "Bridge C"]);
    }

    #[test]
    fn provenance_recorded_once_per_source() {
        let merger = FieldMerger::default();
        let source = record(SourceKind::TechList, "Jane Doe");
        let employee = merger.merge(None, &source);
        let employee = merger.merge(Some(employee), &source);
        assert_eq!(employee.created_from, vec![SourceKind::TechList]);
    }
}
