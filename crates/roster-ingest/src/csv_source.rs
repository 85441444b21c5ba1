//! CSV spreadsheet loaders for the three roster exports.
//!
//! Headers are normalized (BOM stripped, whitespace collapsed, lowercased)
//! so the loaders tolerate the casing and padding drift these sheets show
//! between exports. Rows with no usable name are still returned; the
//! reconciliation engine counts them as skipped, so no record silently
//! disappears at the ingest boundary.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use roster_model::{Computer, CpuInfo, GpuInfo, SourceKind, SourceRecord, fields};

use crate::error::Result;

/// A parsed CSV sheet: normalized headers mapped onto each row.
#[derive(Debug, Clone)]
pub struct CsvSheet {
    pub rows: Vec<BTreeMap<String, String>>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

impl CsvSheet {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut row = BTreeMap::new();
            for (header, cell) in headers.iter().zip(record.iter()) {
                if header.is_empty() {
                    continue;
                }
                let value = normalize_cell(cell);
                if !value.is_empty() {
                    row.insert(header.clone(), value);
                }
            }
            rows.push(row);
        }
        debug!(rows = rows.len(), "parsed csv sheet");
        Ok(Self { rows })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }
}

fn cell<'a>(row: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    row.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Parse a memory cell that may be a plain integer or a float rendering.
fn parse_memory(raw: &str) -> Option<u64> {
    if let Ok(value) = raw.parse::<u64>() {
        return Some(value);
    }
    raw.parse::<f64>().ok().filter(|v| *v >= 0.0).map(|v| v as u64)
}

/// Master technology list: the base roster. Columns: Name, Role, Title,
/// Office Location.
pub fn load_tech_list<R: Read>(reader: R) -> Result<Vec<SourceRecord>> {
    let sheet = CsvSheet::from_reader(reader)?;
    let records = sheet
        .rows
        .into_iter()
        .map(|row| {
            let mut record = SourceRecord {
                name: cell(&row, "name").unwrap_or_default().to_string(),
                kind: SourceKind::TechList,
                ..SourceRecord::default()
            };
            if let Some(role) = cell(&row, "role") {
                record.set_field(fields::ROLE, role);
            }
            if let Some(title) = cell(&row, "title") {
                record.set_field(fields::TITLE, title);
            }
            if let Some(office) = cell(&row, "office location") {
                record.set_field(fields::OFFICE, office);
            }
            record
        })
        .collect();
    Ok(records)
}

/// Employee directory export. Columns: First Name, Last Name, Preferred
/// Name, Company, Office.
pub fn load_employee_list<R: Read>(reader: R) -> Result<Vec<SourceRecord>> {
    let sheet = CsvSheet::from_reader(reader)?;
    let records = sheet
        .rows
        .into_iter()
        .map(|row| {
            let first = cell(&row, "first name").map(str::to_string);
            let last = cell(&row, "last name").map(str::to_string);
            let name = match (&first, &last) {
                (Some(f), Some(l)) => format!("{f} {l}"),
                (Some(f), None) => f.clone(),
                (None, Some(l)) => l.clone(),
                (None, None) => String::new(),
            };
            let mut record = SourceRecord {
                name,
                first_name: first,
                last_name: last,
                kind: SourceKind::EmployeeList,
                ..SourceRecord::default()
            };
            if let Some(preferred) = cell(&row, "preferred name") {
                record.set_field(fields::PREFERRED_NAME, preferred);
            }
            if let Some(company) = cell(&row, "company") {
                record.set_field(fields::COMPANY, company);
            }
            if let Some(office) = cell(&row, "office") {
                record.set_field(fields::OFFICE, office);
            }
            record
        })
        .collect();
    Ok(records)
}

/// GPU-by-user inventory: one machine per row. Falls back to the Username
/// column as the match key when the Name cell is blank.
pub fn load_gpu_inventory<R: Read>(reader: R) -> Result<Vec<SourceRecord>> {
    let sheet = CsvSheet::from_reader(reader)?;
    let records = sheet
        .rows
        .into_iter()
        .map(|row| {
            let mut computer = Computer {
                name: cell(&row, "computername").unwrap_or_default().to_string(),
                username: cell(&row, "username").map(str::to_string),
                os: cell(&row, "os").map(str::to_string),
                manufacturer: cell(&row, "manufacturer").map(str::to_string),
                model: cell(&row, "model").map(str::to_string),
                serial_number: cell(&row, "serial number").map(str::to_string),
                memory_bytes: cell(&row, "total physical memory").and_then(parse_memory),
                collected_at: cell(&row, "date").map(str::to_string),
                ..Computer::default()
            };
            if let Some(gpu_name) = cell(&row, "gpu name") {
                computer.gpus.push(GpuInfo {
                    name: gpu_name.to_string(),
                    processor: cell(&row, "gpu processor").map(str::to_string),
                    driver: cell(&row, "gpu driver").map(str::to_string),
                    memory_bytes: cell(&row, "gpu memory").and_then(parse_memory),
                    ..GpuInfo::default()
                });
            }
            if let Some(cpu_name) = cell(&row, "cpu") {
                computer.cpus.push(CpuInfo {
                    name: cpu_name.to_string(),
                    ..CpuInfo::default()
                });
            }

            SourceRecord {
                name: cell(&row, "name").unwrap_or_default().to_string(),
                username: cell(&row, "username").map(str::to_string),
                computers: vec![computer],
                kind: SourceKind::GpuInventory,
                ..SourceRecord::default()
            }
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_normalized() {
        let csv = "\u{feff} Name , Role ,Title,Office Location\nJane Doe,Technology,Director,New York\n";
        let records = load_tech_list(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Jane Doe");
        assert_eq!(records[0].field(fields::ROLE), Some("Technology"));
        assert_eq!(records[0].field(fields::OFFICE), Some("New York"));
    }

    #[test]
    fn employee_list_builds_full_name() {
        let csv = "First Name,Last Name,Preferred Name,Company,Office\nJane,Doe,JD,Acme,NY\n,,,Acme,NY\n";
        let records = load_employee_list(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Jane Doe");
        assert_eq!(records[0].field(fields::PREFERRED_NAME), Some("JD"));
        // The nameless row survives ingest; the engine counts it as skipped.
        assert!(records[1].is_malformed());
    }

    #[test]
    fn gpu_row_builds_computer_with_gpu_and_cpu() {
        let csv = "Name,Username,Computername,OS,Manufacturer,Model,Total Physical Memory,CPU,Serial Number,GPU Name,GPU Processor,GPU Driver,GPU Memory,Date\n\
            Jane Doe,jdoe,EA-100,Windows 11,Dell,OptiPlex,34359738368,Intel i7,SN1,RTX 3060,NVIDIA,31.0,8589934592,2024-01-15\n";
        let records = load_gpu_inventory(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        let computer = &records[0].computers[0];
        assert_eq!(computer.name, "EA-100");
        assert_eq!(computer.memory_bytes, Some(34_359_738_368));
        assert_eq!(computer.gpus[0].name, "RTX 3060");
        assert_eq!(computer.cpus[0].name, "Intel i7");
    }

    #[test]
    fn gpu_row_without_name_keeps_username_fallback() {
        let csv = "Name,Username,Computername\n,jdoe,EA-101\n";
        let records = load_gpu_inventory(csv.as_bytes()).unwrap();
        assert_eq!(records[0].match_name(), Some("jdoe"));
    }

    #[test]
    fn memory_parses_float_renderings() {
        assert_eq!(parse_memory("34359738368"), Some(34_359_738_368));
        assert_eq!(parse_memory("34359738368.0"), Some(34_359_738_368));
        assert_eq!(parse_memory("not a number"), None);
    }
}
