//! ATM Simulator Library
//! # Overview
//!
//! This library provides a single-user terminal banking session over a small
//! set of account records persisted in a flat text file.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (AccountRecord, MenuChoice, AtmError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::record_set`] - Bounded record collection and balance operations
//!   - [`core::session`] - Login and menu state machine
//!   - [`core::traits`] - Persistence seam between session and store
//! - [`io`] - Backing file format, file-backed store and console input
//!
//! # Session Flow
//!
//! - **Loading**: read every record from the backing file (abort if missing or malformed)
//! - **Authenticating**: one PIN attempt; the first matching record becomes active
//! - **Menu**: withdraw, deposit, check balance or exit, until exit
//!
//! # Backing File
//!
//! One `<pin>,<name>,<balance>` record per line, e.g. `1234,Alice,500.00`.
//! The whole file is rewritten after every withdrawal and deposit.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{AccountStore, RecordSet, Session, SessionOutcome};
pub use crate::io::{RecordStore, StoreConfig};
pub use crate::types::{AccountRecord, AtmError, MenuChoice, Pin};
