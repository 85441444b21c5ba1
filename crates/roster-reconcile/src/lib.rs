//! Reconciliation of multi-source employee records into one canonical store,
//! with full per-record accounting and a data-quality report.

pub mod engine;

pub use engine::{ReconcileOutput, ReconciliationEngine, SourceSet};
