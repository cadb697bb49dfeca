//! Core traits for record persistence
//!
//! This module defines the seam between the session state machine and
//! wherever the account records actually live, so the session can be driven
//! against the file-backed store or an in-memory one.

use crate::core::RecordSet;
use crate::types::AtmError;

/// Trait for loading and saving the whole record set
///
/// Implementations load the full bounded set in one go and persist it by
/// rewriting everything; there is no per-record update.
pub trait AccountStore {
    /// Load every record, in stored order, up to the configured capacity
    fn load(&self) -> Result<RecordSet, AtmError>;

    /// Replace the stored records with `records`
    fn save(&self, records: &RecordSet) -> Result<(), AtmError>;
}
