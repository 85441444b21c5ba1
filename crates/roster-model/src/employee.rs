//! The canonical employee record: the merged, durable output entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hardware::Computer;
use crate::source::SourceKind;

/// The single merged record representing one person, keyed by display name.
///
/// Invariants:
/// - `human_name` is unique in the canonical store.
/// - `computers` accumulates across sources; entries are deduplicated by
///   computer name, never overwritten.
/// - List fields preserve first-seen order and deduplicate only by exact
///   case-insensitive name.
/// - `created_from` records every source kind that contributed, once each.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanonicalEmployee {
    /// Join key across all sources.
    pub human_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
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
    /// Which sources contributed to this record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created_from: Vec<SourceKind>,
    /// Which source currently holds each scalar field. Drives the
    /// priority-override rule in the field merger.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_sources: BTreeMap<String, SourceKind>,
}

impl CanonicalEmployee {
    #[must_use]
    pub fn new(human_name: impl Into<String>) -> Self {
        Self {
            human_name: human_name.into(),
            ..Self::default()
        }
    }

    /// Read a scalar field by its canonical key from [`crate::fields`].
    #[must_use]
    pub fn scalar(&self, key: &str) -> Option<&str> {
        use crate::source::fields as f;
        let value = match key {
            f::PREFERRED_NAME => &self.preferred_name,
            f::EMAIL => &self.email,
            f::PHONE => &self.phone,
            f::POSITION => &self.position,
            f::TITLE => &self.title,
            f::ROLE => &self.role,
            f::DEPARTMENT => &self.department,
            f::OFFICE => &self.office,
            f::COMPANY => &self.company,
            f::BIO => &self.bio,
            _ => return None,
        };
        value.as_deref()
    }

    /// Write a scalar field by its canonical key. Unknown keys are ignored.
    pub fn set_scalar(&mut self, key: &str, value: String) {
        use crate::source::fields as f;
        let slot = match key {
            f::PREFERRED_NAME => &mut self.preferred_name,
            f::EMAIL => &mut self.email,
            f::PHONE => &mut self.phone,
            f::POSITION => &mut self.position,
            f::TITLE => &mut self.title,
            f::ROLE => &mut self.role,
            f::DEPARTMENT => &mut self.department,
            f::OFFICE => &mut self.office,
            f::COMPANY => &mut self.company,
            f::BIO => &mut self.bio,
            _ => return,
        };
        *slot = Some(value);
    }

    /// True when the record has data from every facet tracked by the
    /// coverage report: a computer, a role, and roster identity fields.
    #[must_use]
    pub fn has_complete_data(&self) -> bool {
        !self.computers.is_empty() && self.role.is_some() && self.first_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fields;

    #[test]
    fn scalar_roundtrip_through_key() {
        let mut employee = CanonicalEmployee::new("Jane Doe");
        employee.set_scalar(fields::TITLE, "Design Technologist".to_string());
        assert_eq!(employee.scalar(fields::TITLE), Some("Design Technologist"));
        assert_eq!(employee.title.as_deref(), Some("Design Technologist"));
    }

    #[test]
    fn unknown_scalar_key_is_ignored() {
        let mut employee = CanonicalEmployee::new("Jane Doe");
        employee.set_scalar("favorite_color", "green".to_string());
        assert!(employee.scalar("favorite_color").is_none());
    }
}
