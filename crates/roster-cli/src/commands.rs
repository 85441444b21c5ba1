use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use roster_ingest::{
    InventoryPayload, load_employee_list, load_gpu_inventory, load_profile, load_tech_list,
};
use roster_model::{CanonicalEmployee, DataQualityReport, SourceKind, SourceRecord};
use roster_reconcile::{ReconcileOutput, ReconciliationEngine, SourceSet};
use roster_search::{FacetSelections, SearchIndex};

use crate::cli::{ReconcileArgs, ReportArgs, SearchArgs};
use crate::summary::{print_report, print_search_results};

/// Everything the summary printer needs after a reconcile run.
pub struct ReconcileRunResult {
    pub output_dir: PathBuf,
    pub store_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub report: DataQualityReport,
    pub employee_count: usize,
}

pub fn run_reconcile(args: &ReconcileArgs) -> Result<ReconcileRunResult> {
    let data_folder = &args.data_folder;
    let span = info_span!("reconcile", data_folder = %data_folder.display());
    let _guard = span.enter();
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| data_folder.join("output"));

    let load_start = Instant::now();
    let sources = load_sources(data_folder)?;
    let record_count: usize = sources.iter().map(|s| s.records.len()).sum();
    info!(
        source_count = sources.len(),
        record_count,
        duration_ms = load_start.elapsed().as_millis(),
        "sources loaded"
    );

    let mut engine = ReconciliationEngine::default();
    if let Some(threshold) = args.merge_threshold {
        engine = engine.with_merge_threshold(threshold);
    }
    let reconcile_start = Instant::now();
    let ReconcileOutput { employees, report } = engine.reconcile(sources);
    info!(
        employee_count = employees.len(),
        duration_ms = reconcile_start.elapsed().as_millis(),
        "reconciliation complete"
    );

    let (store_path, report_path) = if args.dry_run {
        (None, None)
    } else {
        let paths = write_outputs(&output_dir, &employees, &report)?;
        (Some(paths.0), Some(paths.1))
    };

    Ok(ReconcileRunResult {
        output_dir,
        store_path,
        report_path,
        employee_count: employees.len(),
        report,
    })
}

pub fn run_search(args: &SearchArgs) -> Result<()> {
    let json = fs::read_to_string(&args.store)
        .with_context(|| format!("read {}", args.store.display()))?;
    let store: BTreeMap<String, CanonicalEmployee> =
        serde_json::from_str(&json).context("parse canonical store")?;
    let index = SearchIndex::new(store.into_values());

    let selections = FacetSelections {
        positions: if args.positions.is_empty() {
            None
        } else {
            Some(args.positions.iter().cloned().collect())
        },
        projects: args.projects.iter().cloned().collect(),
    };
    let outcome = index.search_filtered(&args.query, &selections);
    print_search_results(&args.query, &outcome, args.limit);
    Ok(())
}

pub fn run_report(args: &ReportArgs) -> Result<()> {
    let json = fs::read_to_string(&args.report)
        .with_context(|| format!("read {}", args.report.display()))?;
    let report: DataQualityReport =
        serde_json::from_str(&json).context("parse quality report")?;
    print_report(&report);
    Ok(())
}

/// Gather every source present in the data folder. Each source is optional;
/// a folder with only a tech list still reconciles.
fn load_sources(data_folder: &Path) -> Result<Vec<SourceSet>> {
    let mut sources = Vec::new();

    if let Some(records) = load_sheet(&data_folder.join("tech_list.csv"), load_tech_list)? {
        sources.push(SourceSet {
            kind: SourceKind::TechList,
            records,
        });
    }
    if let Some(records) = load_sheet(&data_folder.join("employee_list.csv"), load_employee_list)? {
        sources.push(SourceSet {
            kind: SourceKind::EmployeeList,
            records,
        });
    }
    if let Some(records) = load_sheet(&data_folder.join("gpu_inventory.csv"), load_gpu_inventory)? {
        sources.push(SourceSet {
            kind: SourceKind::GpuInventory,
            records,
        });
    }

    let profiles = load_json_dir(&data_folder.join("profiles"), |json| {
        Ok(load_profile(json)?)
    })?;
    if !profiles.is_empty() {
        sources.push(SourceSet {
            kind: SourceKind::ScrapedProfile,
            records: profiles,
        });
    }

    let submissions = load_json_dir(&data_folder.join("submissions"), |json| {
        Ok(InventoryPayload::from_json(json)?.into_source_record())
    })?;
    if !submissions.is_empty() {
        sources.push(SourceSet {
            kind: SourceKind::InventorySubmission,
            records: submissions,
        });
    }

    Ok(sources)
}

fn load_sheet(
    path: &Path,
    loader: fn(File) -> roster_ingest::Result<Vec<SourceRecord>>,
) -> Result<Option<Vec<SourceRecord>>> {
    if !path.is_file() {
        info!(path = %path.display(), "source sheet not present; skipping");
        return Ok(None);
    }
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let records = loader(file).with_context(|| format!("parse {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "loaded sheet");
    Ok(Some(records))
}

/// Parse every `*.json` file in a directory, in sorted order for stable
/// first-seen semantics. A file that fails to parse is logged and skipped;
/// one bad submission must not sink the run.
fn load_json_dir(
    dir: &Path,
    parse: impl Fn(&str) -> Result<SourceRecord>,
) -> Result<Vec<SourceRecord>> {
    let mut records = Vec::new();
    if !dir.is_dir() {
        return Ok(records);
    }
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("read {}", dir.display()))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();
    paths.sort();

    for path in paths {
        let json =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        match parse(&json) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unparseable source file");
            }
        }
    }
    Ok(records)
}

fn write_outputs(
    output_dir: &Path,
    employees: &BTreeMap<String, CanonicalEmployee>,
    report: &DataQualityReport,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    let store_path = output_dir.join("employees.json");
    let store_json = serde_json::to_string_pretty(employees).context("serialize store")?;
    fs::write(&store_path, store_json)
        .with_context(|| format!("write {}", store_path.display()))?;

    let report_path = output_dir.join("quality_report.json");
    let report_json = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(&report_path, report_json)
        .with_context(|| format!("write {}", report_path.display()))?;

    Ok((store_path, report_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ReconcileArgs;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).expect("write fixture");
    }

    #[test]
    fn reconcile_run_writes_store_and_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(
            dir.path(),
            "tech_list.csv",
            "Name,Role,Title\nJane Doe,Technology,Design Technology Director\n",
        );
        write_file(
            dir.path(),
            "gpu_inventory.csv",
            "Name,Computername,GPU Name\nJ. Doe,PC1,RTX 4090\n",
        );

        let args = ReconcileArgs {
            data_folder: dir.path().to_path_buf(),
            output_dir: None,
            merge_threshold: None,
            dry_run: false,
        };
        let result = run_reconcile(&args).expect("reconcile");
        assert_eq!(result.employee_count, 1);

        let store_path = result.store_path.expect("store written");
        let json = fs::read_to_string(store_path).expect("read store");
        let store: BTreeMap<String, CanonicalEmployee> =
            serde_json::from_str(&json).expect("parse store");
        let jane = store.get("Jane Doe").expect("entry keyed by name");
        assert_eq!(jane.computers.len(), 1);

        let report_path = result.report_path.expect("report written");
        assert!(report_path.is_file());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "tech_list.csv", "Name,Role\nJane Doe,Technology\n");

        let args = ReconcileArgs {
            data_folder: dir.path().to_path_buf(),
            output_dir: None,
            merge_threshold: None,
            dry_run: true,
        };
        let result = run_reconcile(&args).expect("reconcile");
        assert!(result.store_path.is_none());
        assert!(!result.output_dir.exists());
    }

    #[test]
    fn missing_sources_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "tech_list.csv", "Name,Role\nJane Doe,Technology\n");

        let args = ReconcileArgs {
            data_folder: dir.path().to_path_buf(),
            output_dir: None,
            merge_threshold: None,
            dry_run: true,
        };
        let result = run_reconcile(&args).expect("reconcile");
        assert_eq!(result.report.total_records(), 1);
    }
}
