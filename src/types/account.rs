//! Account-related types for the ATM simulator
//!
//! This module defines the AccountRecord structure persisted in the
//! backing file and the identifiers used to look it up.

use rust_decimal::{Decimal, RoundingStrategy};

/// Personal identification number
///
/// Doubles as the authentication secret and the lookup key of a record.
pub type Pin = i32;

/// Longest name (in characters) a record may carry
pub const MAX_NAME_LEN: usize = 49;

/// Fractional digits kept for balances and amounts
pub const MONEY_SCALE: u32 = 2;

/// A single account as stored in the backing file
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    /// The PIN used to log in to this account
    ///
    /// Not required to be unique; the first matching record wins on login.
    pub pin: Pin,

    /// Display name of the account holder (1-49 characters, no comma)
    pub name: String,

    /// Current balance, kept at two fractional digits
    pub balance: Decimal,
}

impl AccountRecord {
    /// Create a record, rounding the balance to cents
    pub fn new(pin: Pin, name: impl Into<String>, balance: Decimal) -> Self {
        AccountRecord {
            pin,
            name: name.into(),
            balance: round_money(balance),
        }
    }
}

/// Round a monetary value to two fractional digits, midpoint away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
