//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account record and money helpers
//! - `menu`: Choices offered by the authenticated menu
//! - `error`: Error types for the ATM simulator

pub mod account;
pub mod error;
pub mod menu;

pub use account::{round_money, AccountRecord, Pin, MAX_NAME_LEN, MONEY_SCALE};
pub use error::AtmError;
pub use menu::MenuChoice;
