//! The reconciliation engine: one single-threaded pass over all sources,
//! growing a canonical employee map and accounting for every record.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info, warn};

use roster_match::{MERGE_THRESHOLD, match_target};
use roster_merge::FieldMerger;
use roster_model::{
    AmbiguousMatch, CanonicalEmployee, Coverage, DataQualityReport, LowConfidenceMatch,
    RecordFate, SourceCounts, SourceKind, SourceRecord,
};

/// Coverage percentages below these thresholds raise report alerts. The
/// levels mirror what the upstream data has historically supported; dropping
/// under them signals a broken export, not merely sparse data.
const COMPUTER_COVERAGE_WARN_PCT: f64 = 30.0;
const ROLE_COVERAGE_WARN_PCT: f64 = 50.0;
const TITLE_COVERAGE_WARN_PCT: f64 = 40.0;
const COMPLETE_COVERAGE_WARN_PCT: f64 = 20.0;

/// One source's worth of records, tagged with its origin.
#[derive(Debug, Clone)]
pub struct SourceSet {
    pub kind: SourceKind,
    pub records: Vec<SourceRecord>,
}

/// Result of a full reconciliation pass.
#[derive(Debug, Clone)]
pub struct ReconcileOutput {
    pub employees: BTreeMap<String, CanonicalEmployee>,
    pub report: DataQualityReport,
}

/// Orchestrates matching and merging across all sources.
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    merger: FieldMerger,
    merge_threshold: f64,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new(FieldMerger::default())
    }
}

impl ReconciliationEngine {
    #[must_use]
    pub fn new(merger: FieldMerger) -> Self {
        Self {
            merger,
            merge_threshold: MERGE_THRESHOLD,
        }
    }

    /// Override the confident-match threshold (default 0.75).
    #[must_use]
    pub fn with_merge_threshold(mut self, threshold: f64) -> Self {
        self.merge_threshold = threshold;
        self
    }

    /// Run the full pass. Sources are processed in the fixed
    /// [`SourceKind::processing_order`] regardless of the order supplied;
    /// scalar merge outcomes depend on it.
    #[must_use]
    pub fn reconcile(&self, mut sources: Vec<SourceSet>) -> ReconcileOutput {
        let order = SourceKind::processing_order();
        let position = |kind: SourceKind| order.iter().position(|k| *k == kind).unwrap_or(order.len());
        sources.sort_by_key(|s| position(s.kind));

        let mut employees: BTreeMap<String, CanonicalEmployee> = BTreeMap::new();
        let mut per_source: BTreeMap<SourceKind, SourceCounts> = BTreeMap::new();
        let mut ambiguous = Vec::new();
        let mut low_confidence = Vec::new();

        for source in &sources {
            let counts = per_source.entry(source.kind).or_default();
            for record in &source.records {
                let fate = self.reconcile_record(
                    record,
                    &mut employees,
                    &mut ambiguous,
                    &mut low_confidence,
                );
                counts.record(fate);
            }
            info!(
                source = %source.kind,
                total = counts.total,
                merged = counts.merged,
                expanded = counts.expanded,
                skipped = counts.skipped_malformed,
                "reconciled source"
            );
        }

        let report = build_report(&employees, per_source, ambiguous, low_confidence);
        for alert in &report.alerts {
            warn!("{alert}");
        }
        ReconcileOutput { employees, report }
    }

    fn reconcile_record(
        &self,
        record: &SourceRecord,
        employees: &mut BTreeMap<String, CanonicalEmployee>,
        ambiguous: &mut Vec<AmbiguousMatch>,
        low_confidence: &mut Vec<LowConfidenceMatch>,
    ) -> RecordFate {
        let Some(target) = record.match_name() else {
            debug!(kind = %record.kind, "skipping record with no usable name");
            return RecordFate::SkippedMalformed;
        };
        let target = target.to_string();

        let outcome = {
            let names = employees.keys().map(String::as_str);
            match_target(&target, names, self.merge_threshold)
        };

        if outcome.is_ambiguous {
            if let [first, second, ..] = outcome.all_scored.as_slice() {
                warn!(
                    record = %target,
                    first = %first.name,
                    second = %second.name,
                    "ambiguous match; proceeding with tie-break winner"
                );
                ambiguous.push(AmbiguousMatch {
                    source: record.kind,
                    record_name: target.clone(),
                    first_candidate: first.name.clone(),
                    first_score: first.score,
                    second_candidate: second.name.clone(),
                    second_score: second.score,
                });
            }
        }

        if let Some(best) = outcome.best.as_ref().filter(|c| c.confident) {
            let existing = employees.remove(&best.name);
            let merged = self.merger.merge(existing, record);
            employees.insert(best.name.clone(), merged);
            return RecordFate::Merged;
        }

        // Below the merge threshold: favor a duplicate entry over wrongly
        // conflating two different people.
        if let Some(best) = &outcome.best {
            low_confidence.push(LowConfidenceMatch {
                source: record.kind,
                record_name: target.clone(),
                best_candidate: best.name.clone(),
                score: best.score,
            });
        }

        let existing = employees.remove(&target);
        let merged = self.merger.merge(existing, record);
        employees.insert(target, merged);
        RecordFate::Expanded
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn build_report(
    employees: &BTreeMap<String, CanonicalEmployee>,
    per_source: BTreeMap<SourceKind, SourceCounts>,
    ambiguous: Vec<AmbiguousMatch>,
    low_confidence: Vec<LowConfidenceMatch>,
) -> DataQualityReport {
    let total_employees = employees.len();
    let employees_with_computers = employees
        .values()
        .filter(|e| !e.computers.is_empty())
        .count();
    let total_computers = employees.values().map(|e| e.computers.len()).sum();
    let employees_with_roles = employees.values().filter(|e| e.role.is_some()).count();
    let employees_with_titles = employees.values().filter(|e| e.title.is_some()).count();
    let employees_with_complete_data = employees
        .values()
        .filter(|e| e.has_complete_data())
        .count();

    let coverage = Coverage {
        computer_pct: percentage(employees_with_computers, total_employees),
        role_pct: percentage(employees_with_roles, total_employees),
        title_pct: percentage(employees_with_titles, total_employees),
        complete_pct: percentage(employees_with_complete_data, total_employees),
    };

    let mut alerts = Vec::new();
    if coverage.computer_pct < COMPUTER_COVERAGE_WARN_PCT {
        alerts.push(format!(
            "low computer coverage: only {:.1}% of employees have computer data",
            coverage.computer_pct
        ));
    }
    if coverage.role_pct < ROLE_COVERAGE_WARN_PCT {
        alerts.push(format!(
            "low role coverage: only {:.1}% of employees have role information",
            coverage.role_pct
        ));
    }
    if coverage.title_pct < TITLE_COVERAGE_WARN_PCT {
        alerts.push(format!(
            "low title coverage: only {:.1}% of employees have title information",
            coverage.title_pct
        ));
    }
    if coverage.complete_pct < COMPLETE_COVERAGE_WARN_PCT {
        alerts.push(format!(
            "only {:.1}% of employees have complete data from all sources",
            coverage.complete_pct
        ));
    }
    for (kind, counts) in &per_source {
        if counts.skipped_malformed > 0 {
            alerts.push(format!(
                "{} records from {kind} skipped due to missing names",
                counts.skipped_malformed
            ));
        }
    }
    if !low_confidence.is_empty() {
        alerts.push(format!(
            "{} low-confidence matches expanded into separate entries",
            low_confidence.len()
        ));
    }
    if !ambiguous.is_empty() {
        alerts.push(format!(
            "{} ambiguous matches need human review",
            ambiguous.len()
        ));
    }

    DataQualityReport {
        per_source,
        total_employees,
        employees_with_computers,
        total_computers,
        employees_with_roles,
        employees_with_titles,
        employees_with_complete_data,
        coverage,
        ambiguous,
        low_confidence,
        alerts,
        generated_at: Utc::now(),
    }
}
