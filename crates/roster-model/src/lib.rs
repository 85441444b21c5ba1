pub mod employee;
pub mod hardware;
pub mod matching;
pub mod report;
pub mod source;

pub use employee::CanonicalEmployee;
pub use hardware::{Computer, CpuInfo, GpuInfo};
pub use matching::{MatchCandidate, MatchClass};
pub use report::{
    AmbiguousMatch, Coverage, DataQualityReport, LowConfidenceMatch, RecordFate, SourceCounts,
};
pub use source::{SourceKind, SourceRecord, fields};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_serializes_round_trip() {
        let mut employee = CanonicalEmployee::new("Jane Doe");
        employee.role = Some("Technology".to_string());
        employee.computers.push(Computer {
            name: "EA-100".to_string(),
            gpus: vec![GpuInfo {
                name: "NVIDIA RTX 4070".to_string(),
                priority: 3,
                ..GpuInfo::default()
            }],
            ..Computer::default()
        });
        employee.created_from.push(SourceKind::TechList);

        let json = serde_json::to_string(&employee).expect("serialize employee");
        let round: CanonicalEmployee = serde_json::from_str(&json).expect("deserialize employee");
        assert_eq!(round.human_name, "Jane Doe");
        assert_eq!(round.computers.len(), 1);
        assert_eq!(round.created_from, vec![SourceKind::TechList]);
    }

    #[test]
    fn source_kind_serializes_snake_case() {
        let json = serde_json::to_string(&SourceKind::GpuInventory).expect("serialize kind");
        assert_eq!(json, "\"gpu_inventory\"");
    }

    #[test]
    fn processing_order_starts_with_base_roster() {
        let order = SourceKind::processing_order();
        assert_eq!(order[0], SourceKind::TechList);
        assert_eq!(order[order.len() - 1], SourceKind::InventorySubmission);
    }
}
