//! Error types for the ATM simulator
//!
//! This module defines every error that can occur while loading the record
//! store, authenticating, or running a transaction.
//!
//! # Error Categories
//!
//! - **Store Errors**: missing or corrupt backing file, failed saves
//! - **Authentication Errors**: non-numeric PIN, unknown PIN
//! - **Menu Errors**: bad menu choice, bad amount, insufficient funds
//! - **Arithmetic Errors**: overflow in balance calculations

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ATM simulator
///
/// Load-time and authentication errors end a session. Everything raised from
/// the menu is recovered locally by reporting and re-prompting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmError {
    /// Backing file absent at load
    ///
    /// Fatal: the session aborts before authentication.
    #[error("Account file not found: {path}")]
    StoreNotFound {
        /// The path that was not found
        path: String,
    },

    /// A line of the backing file failed the three-field parse
    ///
    /// Fatal: the whole load is discarded.
    #[error("Malformed account data at line {line}: {message}")]
    StoreCorrupt {
        /// Physical line number in the backing file (1-based)
        line: u64,
        /// Description of the parsing error
        message: String,
    },

    /// The backing file could not be written
    ///
    /// Reported to the user, but the in-memory balance change stands.
    #[error("Cannot save account data to {path}: {message}")]
    StoreWriteFailed {
        /// The path that could not be written
        path: String,
        /// Description of the I/O error
        message: String,
    },

    /// The entered PIN is not an integer
    #[error("Invalid PIN input '{input}'")]
    AuthInputInvalid {
        /// The rejected input line
        input: String,
    },

    /// No record carries the entered PIN
    #[error("No account matches the entered PIN")]
    AuthPinMismatch,

    /// Non-numeric or out-of-range menu choice
    #[error("Invalid menu choice '{input}'")]
    MenuInputInvalid {
        /// The rejected input line
        input: String,
    },

    /// Non-numeric or non-positive transaction amount
    #[error("Invalid amount '{input}'")]
    AmountInvalid {
        /// The rejected input line
        input: String,
    },

    /// Withdrawal exceeds the active balance
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Current balance
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Insertion into a record set that is already full
    #[error("Record set is full (capacity {capacity})")]
    CapacityReached {
        /// Maximum number of records the set accepts
        capacity: usize,
    },

    /// No record at the given position
    #[error("No account record at position {index}")]
    RecordNotFound {
        /// Position looked up in the record set
        index: usize,
    },

    /// Checked arithmetic failed while updating a balance
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// Console read or write failure
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to AtmError
impl From<std::io::Error> for AtmError {
    fn from(error: std::io::Error) -> Self {
        AtmError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to AtmError
impl From<csv::Error> for AtmError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line()).unwrap_or_default();

        AtmError::StoreCorrupt {
            line,
            message: error.to_string(),
        }
    }
}

impl AtmError {
    /// Create a StoreNotFound error
    pub fn store_not_found(path: &std::path::Path) -> Self {
        AtmError::StoreNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a StoreCorrupt error
    pub fn store_corrupt(line: u64, message: impl Into<String>) -> Self {
        AtmError::StoreCorrupt {
            line,
            message: message.into(),
        }
    }

    /// Create a StoreWriteFailed error
    pub fn store_write_failed(path: &std::path::Path, message: impl ToString) -> Self {
        AtmError::StoreWriteFailed {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(balance: Decimal, requested: Decimal) -> Self {
        AtmError::InsufficientFunds { balance, requested }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        AtmError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Message shown to the person at the terminal
    ///
    /// Kept short and free of internal detail; the full error goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            AtmError::StoreNotFound { path } => format!("Account file not found ({}).", path),
            AtmError::StoreCorrupt { line, .. } => {
                format!("Error reading data near line {}.", line)
            }
            AtmError::StoreWriteFailed { .. } => "Cannot save account data.".to_string(),
            AtmError::AuthInputInvalid { .. } => "Invalid PIN.".to_string(),
            AtmError::AuthPinMismatch => "Incorrect PIN.".to_string(),
            // A number that is simply not on the menu gets a different wording
            AtmError::MenuInputInvalid { input } if input.parse::<i32>().is_ok() => {
                "Invalid option.".to_string()
            }
            AtmError::MenuInputInvalid { .. } => "Invalid input.".to_string(),
            AtmError::AmountInvalid { .. } => "Invalid amount.".to_string(),
            AtmError::InsufficientFunds { .. } => "Insufficient balance.".to_string(),
            AtmError::CapacityReached { .. }
            | AtmError::RecordNotFound { .. }
            | AtmError::ArithmeticOverflow { .. }
            | AtmError::Io { .. } => format!("Transaction failed: {}", self),
        }
    }
}
