//! Hardware sub-entities nested under a canonical employee.

use serde::{Deserialize, Serialize};

/// One GPU reported for a machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_bytes: Option<u64>,
    /// Vendor release date, when the source provides it (ISO-8601 string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Selection priority among several GPUs on one machine. Higher wins.
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub is_virtual: bool,
}

/// One CPU reported for a machine. The first entry is the primary CPU.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_processors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_clock_speed_mhz: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// One machine belonging to an employee, keyed by computer name.
///
/// Computer entries accumulate across sources rather than overwrite; the
/// dedup key during merging is `name` (case-insensitive).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Computer {
    /// Machine identity and dedup key.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gpus: Vec<GpuInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cpus: Vec<CpuInfo>,
    /// When the source collected this machine's data (ISO-8601 string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_at: Option<String>,
}

impl Computer {
    /// The representative GPU: highest `priority`, ties broken by
    /// first-seen order.
    #[must_use]
    pub fn primary_gpu(&self) -> Option<&GpuInfo> {
        let mut best: Option<&GpuInfo> = None;
        for gpu in &self.gpus {
            match best {
                Some(current) if gpu.priority <= current.priority => {}
                _ => best = Some(gpu),
            }
        }
        best
    }

    /// The representative CPU: the first reported entry.
    #[must_use]
    pub fn primary_cpu(&self) -> Option<&CpuInfo> {
        self.cpus.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpu(name: &str, priority: i64) -> GpuInfo {
        GpuInfo {
            name: name.to_string(),
            priority,
            ..GpuInfo::default()
        }
    }

    #[test]
    fn primary_gpu_highest_priority_wins() {
        let computer = Computer {
            name: "WS-1".to_string(),
            gpus: vec![gpu("Intel UHD Graphics", 1), gpu("NVIDIA RTX 4070", 3)],
            ..Computer::default()
        };
        assert_eq!(computer.primary_gpu().unwrap().name, "NVIDIA RTX 4070");
    }

    #[test]
    fn primary_gpu_tie_keeps_first_seen() {
        let computer = Computer {
            name: "WS-2".to_string(),
            gpus: vec![gpu("first", 2), gpu("second", 2)],
            ..Computer::default()
        };
        assert_eq!(computer.primary_gpu().unwrap().name, "first");
    }

    #[test]
    fn primary_cpu_is_first_entry() {
        let computer = Computer {
            name: "WS-3".to_string(),
            cpus: vec![
                CpuInfo {
                    name: "Intel Core i7-13700".to_string(),
                    ..CpuInfo::default()
                },
                CpuInfo {
                    name: "secondary".to_string(),
                    ..CpuInfo::default()
                },
            ],
            ..Computer::default()
        };
        assert_eq!(computer.primary_cpu().unwrap().name, "Intel Core i7-13700");
    }

    #[test]
    fn no_gpus_yields_none() {
        let computer = Computer::default();
        assert!(computer.primary_gpu().is_none());
        assert!(computer.primary_cpu().is_none());
    }
}
