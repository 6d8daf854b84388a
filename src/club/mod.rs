//! Club roster and bout records
//!
//! This module owns the fencer roster and the per-weapon bout lists, with
//! validation of operator input and cascade deletes.

pub mod draft;
pub mod records;

// Re-export commonly used types
pub use draft::{BoutDraft, MAX_BOUT_SCORE};
pub use records::{ClubRecords, BOUTS_KEY, FENCERS_KEY};
