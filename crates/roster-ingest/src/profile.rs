//! Scraped directory profile loader.
//!
//! Profiles arrive as one JSON object per employee, with contact and
//! biography fields plus an optional nested `computer_info` block captured
//! by the inventory server.

use serde::Deserialize;

use roster_model::{Computer, CpuInfo, GpuInfo, SourceKind, SourceRecord, fields};

use crate::error::Result;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileJson {
    #[serde(alias = "real_name")]
    pub human_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub office: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub memberships: Vec<String>,
    pub computer_info: Option<ProfileComputerInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileComputerInfo {
    pub computername: Option<String>,
    pub os: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub cpu: Option<String>,
    pub gpu_name: Option<String>,
    pub gpu_driver: Option<String>,
    pub memory_bytes: Option<u64>,
    pub serial_number: Option<String>,
    pub last_updated: Option<String>,
}

/// Parse one scraped profile from its JSON text.
pub fn load_profile(json: &str) -> Result<SourceRecord> {
    let profile: ProfileJson = serde_json::from_str(json)?;
    Ok(profile.into_source_record())
}

impl ProfileJson {
    #[must_use]
    pub fn into_source_record(self) -> SourceRecord {
        let email = self.email.clone();
        let mut record = SourceRecord {
            name: self.human_name.unwrap_or_default(),
            first_name: self.first_name,
            last_name: self.last_name,
            // Directory logins are the local part of the email address.
            username: email
                .as_deref()
                .and_then(|e| e.split('@').next())
                .filter(|u| !u.is_empty())
                .map(str::to_string),
            projects: self.projects,
            education: self.education,
            licenses: self.licenses,
            memberships: self.memberships,
            kind: SourceKind::ScrapedProfile,
            ..SourceRecord::default()
        };
        if let Some(email) = email {
            record.set_field(fields::EMAIL, email);
        }
        if let Some(phone) = self.phone {
            record.set_field(fields::PHONE, phone);
        }
        if let Some(position) = self.position {
            record.set_field(fields::POSITION, position);
        }
        if let Some(department) = self.department {
            record.set_field(fields::DEPARTMENT, department);
        }
        if let Some(office) = self.office {
            record.set_field(fields::OFFICE, office);
        }
        if let Some(bio) = self.bio {
            record.set_field(fields::BIO, bio);
        }
        if let Some(info) = self.computer_info {
            if let Some(computer) = info.into_computer() {
                record.computers.push(computer);
            }
        }
        record
    }
}

impl ProfileComputerInfo {
    fn into_computer(self) -> Option<Computer> {
        let name = self.computername?;
        let gpus = self
            .gpu_name
            .map(|gpu| {
                vec![GpuInfo {
                    name: gpu,
                    driver: self.gpu_driver,
                    ..GpuInfo::default()
                }]
            })
            .unwrap_or_default();
        let cpus = self
            .cpu
            .map(|cpu| {
                vec![CpuInfo {
                    name: cpu,
                    ..CpuInfo::default()
                }]
            })
            .unwrap_or_default();
        Some(Computer {
            name,
            os: self.os,
            manufacturer: self.manufacturer,
            model: self.model,
            serial_number: self.serial_number,
            memory_bytes: self.memory_bytes,
            gpus,
            cpus,
            collected_at: self.last_updated,
            ..Computer::default()
        })
    }
}
