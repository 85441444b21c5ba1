//! User-submitted machine inventory payloads.
//!
//! Two wire schemas exist: a legacy flat form with spreadsheet-style keys
//! ("GPU Name", "Total Physical Memory") and a structured form carrying
//! `system_info` / `all_gpus` / `all_cpus` maps. Both are modeled as one
//! union and flattened through a single adapter, so merge logic never
//! sees the difference: primary GPU is the highest-priority entry, primary
//! CPU is the first entry, memory comes from `system_info`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use roster_model::{Computer, CpuInfo, GpuInfo, SourceKind, SourceRecord};

use crate::error::Result;

/// One inventory submission, in either supported schema.
///
/// Untagged: the structured form is distinguished by its required
/// `system_info` object, so legacy payloads fall through to the flat form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InventoryPayload {
    Structured(StructuredPayload),
    Legacy(LegacyPayload),
}

/// Structured schema produced by current inventory clients.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredPayload {
    #[serde(alias = "Computername")]
    pub computername: Option<String>,
    #[serde(alias = "Username")]
    pub username: Option<String>,
    #[serde(alias = "human_name", alias = "Name")]
    pub name: Option<String>,
    #[serde(alias = "OS")]
    pub os: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    #[serde(alias = "Collection Date")]
    pub collection_date: Option<String>,
    pub system_info: SystemInfo,
    #[serde(default)]
    pub all_gpus: BTreeMap<String, GpuEntry>,
    #[serde(default)]
    pub all_cpus: BTreeMap<String, CpuEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemInfo {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_memory_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GpuEntry {
    pub name: Option<String>,
    pub processor: Option<String>,
    pub driver: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub memory_bytes: Option<u64>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub is_virtual: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CpuEntry {
    pub name: Option<String>,
    pub cores: Option<u32>,
    pub logical_processors: Option<u32>,
    pub max_clock_speed: Option<u32>,
    pub release_date: Option<String>,
}

/// Legacy flat schema with spreadsheet-style keys.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyPayload {
    #[serde(alias = "Computername")]
    pub computername: Option<String>,
    #[serde(alias = "Username")]
    pub username: Option<String>,
    #[serde(alias = "human_name", alias = "Name")]
    pub name: Option<String>,
    #[serde(alias = "OS")]
    pub os: Option<String>,
    #[serde(alias = "Manufacturer")]
    pub manufacturer: Option<String>,
    #[serde(alias = "Model")]
    pub model: Option<String>,
    #[serde(alias = "Serial Number")]
    pub serial_number: Option<String>,
    #[serde(alias = "GPU Name")]
    pub gpu_name: Option<String>,
    #[serde(alias = "GPU Driver")]
    pub gpu_driver: Option<String>,
    #[serde(default, alias = "GPU Memory", deserialize_with = "lenient_u64")]
    pub gpu_memory: Option<u64>,
    #[serde(alias = "CPU Name", alias = "CPU")]
    pub cpu_name: Option<String>,
    #[serde(default, alias = "Total Physical Memory", deserialize_with = "lenient_u64")]
    pub total_physical_memory: Option<u64>,
    #[serde(alias = "Date")]
    pub date: Option<String>,
}

impl InventoryPayload {
    /// Parse a payload from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Flatten into the common source-record shape used by reconciliation.
    #[must_use]
    pub fn into_source_record(self) -> SourceRecord {
        match self {
            Self::Structured(payload) => payload.into_source_record(),
            Self::Legacy(payload) => payload.into_source_record(),
        }
    }
}

impl StructuredPayload {
    fn into_source_record(self) -> SourceRecord {
        let gpus = self
            .all_gpus
            .into_values()
            .filter_map(|entry| {
                let name = entry.name?;
                Some(GpuInfo {
                    name,
                    processor: entry.processor,
                    driver: entry.driver,
                    memory_bytes: entry.memory_bytes,
                    release_date: entry.release_date,
                    priority: entry.priority,
                    is_virtual: entry.is_virtual,
                })
            })
            .collect();
        let cpus = self
            .all_cpus
            .into_values()
            .filter_map(|entry| {
                let name = entry.name?;
                Some(CpuInfo {
                    name,
                    cores: entry.cores,
                    logical_processors: entry.logical_processors,
                    max_clock_speed_mhz: entry.max_clock_speed,
                    release_date: entry.release_date,
                })
            })
            .collect();

        let computer = Computer {
            name: self.computername.unwrap_or_default(),
            username: self.username.clone(),
            os: self.os,
            manufacturer: self.manufacturer,
            model: self.model,
            serial_number: self.serial_number,
            memory_bytes: self.system_info.total_memory_bytes,
            gpus,
            cpus,
            collected_at: self.collection_date,
        };

        SourceRecord {
            name: self.name.unwrap_or_default(),
            username: self.username,
            computers: vec![computer],
            kind: SourceKind::InventorySubmission,
            ..SourceRecord::default()
        }
    }
}

impl LegacyPayload {
    fn into_source_record(self) -> SourceRecord {
        let gpus = self
            .gpu_name
            .map(|name| {
                vec![GpuInfo {
                    name,
                    driver: self.gpu_driver,
                    memory_bytes: self.gpu_memory,
                    ..GpuInfo::default()
                }]
            })
            .unwrap_or_default();
        let cpus = self
            .cpu_name
            .map(|name| {
                vec![CpuInfo {
                    name,
                    ..CpuInfo::default()
                }]
            })
            .unwrap_or_default();

        let computer = Computer {
            name: self.computername.unwrap_or_default(),
            username: self.username.clone(),
            os: self.os,
            manufacturer: self.manufacturer,
            model: self.model,
            serial_number: self.serial_number,
            memory_bytes: self.total_physical_memory,
            gpus,
            cpus,
            collected_at: self.date,
        };

        SourceRecord {
            name: self.name.unwrap_or_default(),
            username: self.username,
            computers: vec![computer],
            kind: SourceKind::InventorySubmission,
            ..SourceRecord::default()
        }
    }
}

/// Accept a u64 from a JSON number (integer or float) or a numeric string.
/// Inventory clients have historically sent all three.
fn lenient_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
        Null(()),
    }

    let value = Option::<Raw>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Raw::Null(())) => None,
        Some(Raw::Int(v)) => Some(v),
        Some(Raw::Float(v)) if v >= 0.0 => Some(v as u64),
        Some(Raw::Float(_)) => None,
        Some(Raw::Text(raw)) => {
            let raw = raw.trim();
            raw.parse::<u64>()
                .ok()
                .or_else(|| raw.parse::<f64>().ok().filter(|v| *v >= 0.0).map(|v| v as u64))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_payload_flattens_with_priority_selection() {
        let json = r#"{
            "Computername": "TEST-WS-01",
            "Username": "test.user",
            "human_name": "Test User",
            "os": "Windows 11 Pro",
            "system_info": { "total_memory_bytes": 34359738368 },
            "all_gpus": {
                "gpu_1": { "name": "Intel UHD Graphics", "priority": 1, "release_date": "2017-01-03T00:00:00" },
                "gpu_2": { "name": "NVIDIA GeForce RTX 4070", "priority": 3, "memory_bytes": 8589934592 }
            },
            "all_cpus": {
                "cpu_1": { "name": "Intel Core i7-13700", "cores": 16, "logical_processors": 24 }
            }
        }"#;
        let payload = InventoryPayload::from_json(json).unwrap();
        assert!(matches!(payload, InventoryPayload::Structured(_)));

        let record = payload.into_source_record();
        assert_eq!(record.name, "Test User");
        assert_eq!(record.kind, SourceKind::InventorySubmission);

        let computer = &record.computers[0];
        assert_eq!(computer.name, "TEST-WS-01");
        assert_eq!(computer.memory_bytes, Some(34_359_738_368));
        assert_eq!(computer.gpus.len(), 2);
        assert_eq!(
            computer.primary_gpu().unwrap().name,
            "NVIDIA GeForce RTX 4070"
        );
        assert_eq!(computer.primary_cpu().unwrap().name, "Intel Core i7-13700");
    }

    #[test]
    fn legacy_payload_flattens_flat_keys() {
        let json = r#"{
            "Computername": "LEGACY-WS-01",
            "Username": "legacy.user",
            "human_name": "Legacy User",
            "OS": "Windows 10 Pro",
            "GPU Name": "Intel UHD Graphics 630",
            "GPU Driver": "27.20.100.8681",
            "CPU Name": "Intel Core i5-10210U",
            "Total Physical Memory": "17179869184"
        }"#;
        let payload = InventoryPayload::from_json(json).unwrap();
        assert!(matches!(payload, InventoryPayload::Legacy(_)));

        let record = payload.into_source_record();
        assert_eq!(record.name, "Legacy User");
        let computer = &record.computers[0];
        assert_eq!(computer.name, "LEGACY-WS-01");
        // Memory arrives as a string in legacy payloads.
        assert_eq!(computer.memory_bytes, Some(17_179_869_184));
        assert_eq!(computer.primary_gpu().unwrap().name, "Intel UHD Graphics 630");
        assert_eq!(computer.primary_cpu().unwrap().name, "Intel Core i5-10210U");
    }

    #[test]
    fn gpu_with_null_memory_is_kept() {
        let json = r#"{
            "system_info": {},
            "all_gpus": { "gpu_1": { "name": "Intel UHD", "priority": 1, "memory_bytes": null } }
        }"#;
        let record = InventoryPayload::from_json(json).unwrap().into_source_record();
        let gpu = record.computers[0].primary_gpu().unwrap();
        assert_eq!(gpu.name, "Intel UHD");
        assert_eq!(gpu.memory_bytes, None);
    }

    #[test]
    fn payload_without_name_falls_back_to_username() {
        let json = r#"{ "Computername": "WS", "Username": "jdoe", "system_info": {} }"#;
        let record = InventoryPayload::from_json(json).unwrap().into_source_record();
        assert_eq!(record.match_name(), Some("jdoe"));
    }
}
