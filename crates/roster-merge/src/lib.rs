//! Merging source records into canonical employees: append-and-dedup for
//! list fields, declared source authority for scalar fields.

pub mod merger;
pub mod policy;

pub use merger::FieldMerger;
pub use policy::MergePolicy;
