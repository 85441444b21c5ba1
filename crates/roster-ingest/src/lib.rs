//! Source loaders for reconciliation: spreadsheet CSV exports, scraped
//! directory profiles, and user-submitted inventory payloads. Every loader
//! produces the same [`roster_model::SourceRecord`] shape, so the engine is
//! format-agnostic.

pub mod csv_source;
pub mod error;
pub mod payload;
pub mod profile;

pub use csv_source::{CsvSheet, load_employee_list, load_gpu_inventory, load_tech_list};
pub use error::{IngestError, Result};
pub use payload::{InventoryPayload, LegacyPayload, StructuredPayload};
pub use profile::{ProfileJson, load_profile};
