//! Data-quality reporting over a completed reconciliation pass.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::source::SourceKind;

/// What happened to one source record during reconciliation.
///
/// Every record lands in exactly one of these buckets; the per-source counts
/// in the report account for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordFate {
    /// Confidently matched and merged into an existing canonical entry.
    Merged,
    /// No confident match; a new canonical entry was synthesized.
    Expanded,
    /// No usable name; skipped entirely.
    SkippedMalformed,
}

/// Per-source record accounting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SourceCounts {
    pub total: usize,
    pub merged: usize,
    pub expanded: usize,
    pub skipped_malformed: usize,
}

impl SourceCounts {
    pub fn record(&mut self, fate: RecordFate) {
        self.total += 1;
        match fate {
            RecordFate::Merged => self.merged += 1,
            RecordFate::Expanded => self.expanded += 1,
            RecordFate::SkippedMalformed => self.skipped_malformed += 1,
        }
    }

    /// True when the bucket counts sum back to the total.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.merged + self.expanded + self.skipped_malformed == self.total
    }
}

/// A match where the top two candidates were too close to safely prefer one.
///
/// The engine proceeds with the tie-break winner but surfaces the pair for
/// human review; this list is a future stable-ID migration's worklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbiguousMatch {
    pub source: SourceKind,
    pub record_name: String,
    pub first_candidate: String,
    pub first_score: f64,
    pub second_candidate: String,
    pub second_score: f64,
}

/// A best match that fell below the merge threshold. The record was expanded
/// into a new entry instead of being merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowConfidenceMatch {
    pub source: SourceKind,
    pub record_name: String,
    pub best_candidate: String,
    pub score: f64,
}

/// Fraction of canonical employees possessing data from each facet.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Coverage {
    pub computer_pct: f64,
    pub role_pct: f64,
    pub title_pct: f64,
    pub complete_pct: f64,
}

/// Read-only summary of a completed reconciliation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub per_source: BTreeMap<SourceKind, SourceCounts>,
    pub total_employees: usize,
    pub employees_with_computers: usize,
    pub total_computers: usize,
    pub employees_with_roles: usize,
    pub employees_with_titles: usize,
    pub employees_with_complete_data: usize,
    pub coverage: Coverage,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ambiguous: Vec<AmbiguousMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub low_confidence: Vec<LowConfidenceMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl DataQualityReport {
    #[must_use]
    pub fn counts_for(&self, source: SourceKind) -> SourceCounts {
        self.per_source.get(&source).copied().unwrap_or_default()
    }

    /// Total records seen across all sources.
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.per_source.values().map(|c| c.total).sum()
    }

    #[must_use]
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_counts_stay_balanced() {
        let mut counts = SourceCounts::default();
        counts.record(RecordFate::Merged);
        counts.record(RecordFate::Expanded);
        counts.record(RecordFate::Expanded);
        counts.record(RecordFate::SkippedMalformed);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.merged, 1);
        assert_eq!(counts.expanded, 2);
        assert_eq!(counts.skipped_malformed, 1);
        assert!(counts.is_balanced());
    }
}
