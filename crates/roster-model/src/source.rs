//! Source record types: one record from one input origin, prior to merging.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hardware::Computer;

/// Origin of a source record.
///
/// The reconciliation engine processes sources in the order returned by
/// [`SourceKind::processing_order`]: the base roster first, then hardware
/// inventories, then supplementary sources. Scalar merge decisions are
/// order-sensitive, so this order is part of the engine's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Master technology list spreadsheet (base roster; roles and titles).
    TechList,
    /// Employee directory spreadsheet (names, offices, companies).
    EmployeeList,
    /// GPU-by-user inventory spreadsheet (one computer per row).
    GpuInventory,
    /// Profile scraped from the HTML directory.
    ScrapedProfile,
    /// User-submitted machine inventory payload.
    InventorySubmission,
}

impl SourceKind {
    /// Fixed order in which sources are reconciled.
    #[must_use]
    pub fn processing_order() -> [SourceKind; 5] {
        [
            Self::TechList,
            Self::EmployeeList,
            Self::GpuInventory,
            Self::ScrapedProfile,
            Self::InventorySubmission,
        ]
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TechList => "tech_list",
            Self::EmployeeList => "employee_list",
            Self::GpuInventory => "gpu_inventory",
            Self::ScrapedProfile => "scraped_profile",
            Self::InventorySubmission => "inventory_submission",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record from one origin, immutable once loaded.
///
/// Scalar attributes live in `fields`, keyed by the canonical field names in
/// [`crate::fields`]. A record with an empty `name` and no `username` is
/// malformed and is skipped (with a report count) by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Raw display name as the source spelled it.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Login name, used as a fallback match target when `name` is blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Scalar source-specific fields (position, office, company, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
    /// Hardware reported by this record (zero or more machines).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub computers: Vec<Computer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub memberships: Vec<String>,
    pub kind: SourceKind,
}

impl Default for SourceKind {
    fn default() -> Self {
        Self::TechList
    }
}

impl SourceRecord {
    /// The name this record should be matched under: the display name when
    /// present, otherwise the username.
    #[must_use]
    pub fn match_name(&self) -> Option<&str> {
        let name = self.name.trim();
        if !name.is_empty() {
            return Some(name);
        }
        self.username.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// True when the record carries no usable match key at all.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.match_name().is_none()
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn set_field(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.fields.insert(key.to_string(), value);
        }
    }
}

/// Canonical scalar field names shared between source records, the merge
/// policy, and the canonical employee.
pub mod fields {
    pub const PREFERRED_NAME: &str = "preferred_name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const POSITION: &str = "position";
    pub const TITLE: &str = "title";
    pub const ROLE: &str = "role";
    pub const DEPARTMENT: &str = "department";
    pub const OFFICE: &str = "office";
    pub const COMPANY: &str = "company";
    pub const BIO: &str = "bio";

    /// All scalar fields subject to merge-priority rules.
    pub const ALL: [&str; 10] = [
        PREFERRED_NAME,
        EMAIL,
        PHONE,
        POSITION,
        TITLE,
        ROLE,
        DEPARTMENT,
        OFFICE,
        COMPANY,
        BIO,
    ];
}
