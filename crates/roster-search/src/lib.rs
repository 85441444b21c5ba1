//! Interactive search over the canonical employee store: facet narrowing,
//! fuzzy name ranking, free-text field matching, and typo suggestions.

pub mod filter;
pub mod index;

pub use filter::FacetSelections;
pub use index::{SearchIndex, SearchOutcome};
