//! Record set module
//!
//! This module provides the `RecordSet` struct which holds the ordered,
//! bounded collection of account records loaded from the backing file.
//!
//! The RecordSet is responsible for:
//! - Enforcing the capacity bound at insertion time
//! - Preserving file order for lookups and saves
//! - Locating the first record that matches a PIN
//! - Applying balance changes by position, with checked arithmetic

use crate::types::{round_money, AccountRecord, AtmError, Pin};
use rust_decimal::Decimal;

/// Default maximum number of records held in memory
pub const DEFAULT_CAPACITY: usize = 10;

/// Ordered, capacity-bounded collection of account records
///
/// Records are addressed by their position. Callers that need to refer to a
/// record across operations keep its index rather than a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    records: Vec<AccountRecord>,
    capacity: usize,
}

impl RecordSet {
    /// Create an empty RecordSet that accepts at most `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        RecordSet {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record at the end of the set
    ///
    /// # Errors
    ///
    /// Returns `CapacityReached` if the set already holds `capacity` records.
    pub fn push(&mut self, record: AccountRecord) -> Result<(), AtmError> {
        if self.is_full() {
            return Err(AtmError::CapacityReached {
                capacity: self.capacity,
            });
        }
        self.records.push(record);
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// Get the record at `index`, if any
    pub fn get(&self, index: usize) -> Option<&AccountRecord> {
        self.records.get(index)
    }

    /// Iterate over the records in file order
    pub fn iter(&self) -> std::slice::Iter<'_, AccountRecord> {
        self.records.iter()
    }

    /// Find the position of the first record whose PIN equals `pin`
    ///
    /// Linear scan in file order, so duplicated PINs resolve to the earliest
    /// record.
    pub fn find_by_pin(&self, pin: Pin) -> Option<usize> {
        self.records.iter().position(|record| record.pin == pin)
    }

    /// Deposit funds into the record at `index`
    ///
    /// The amount is assumed to be validated (strictly positive, two
    /// fractional digits) by the caller.
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `index` is out of range
    /// - Adding the amount would overflow
    pub fn deposit(&mut self, index: usize, amount: Decimal) -> Result<Decimal, AtmError> {
        let record = self.record_mut(index)?;

        let new_balance = record
            .balance
            .checked_add(amount)
            .ok_or_else(|| AtmError::arithmetic_overflow("deposit"))?;

        record.balance = round_money(new_balance);
        Ok(record.balance)
    }

    /// Withdraw funds from the record at `index`
    ///
    /// Withdrawing the entire balance is allowed and leaves it at zero.
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `index` is out of range
    /// - The amount exceeds the current balance
    /// - Subtracting the amount would overflow
    pub fn withdraw(&mut self, index: usize, amount: Decimal) -> Result<Decimal, AtmError> {
        let record = self.record_mut(index)?;

        if amount > record.balance {
            return Err(AtmError::insufficient_funds(record.balance, amount));
        }

        let new_balance = record
            .balance
            .checked_sub(amount)
            .ok_or_else(|| AtmError::arithmetic_overflow("withdrawal"))?;

        record.balance = round_money(new_balance);
        Ok(record.balance)
    }

    fn record_mut(&mut self, index: usize) -> Result<&mut AccountRecord, AtmError> {
        self.records
            .get_mut(index)
            .ok_or(AtmError::RecordNotFound { index })
    }
}

impl Default for RecordSet {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a AccountRecord;
    type IntoIter = std::slice::Iter<'a, AccountRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
