//! Menu-related types for the ATM simulator
//!
//! This module defines the choices offered once a user is authenticated.

use std::fmt;

/// Options of the authenticated menu
///
/// Each variant maps to the number the user types at the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Debit funds from the active account (option 1)
    ///
    /// Requires a strictly positive amount not exceeding the balance.
    /// Persists the record set on success.
    Withdraw,

    /// Credit funds to the active account (option 2)
    ///
    /// Requires a strictly positive amount. Persists the record set on success.
    Deposit,

    /// Report the current balance (option 3)
    CheckBalance,

    /// End the session (option 4)
    Exit,
}

impl MenuChoice {
    /// All choices in menu order
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::Withdraw,
        MenuChoice::Deposit,
        MenuChoice::CheckBalance,
        MenuChoice::Exit,
    ];

    /// Number typed at the prompt to select this choice
    pub fn number(self) -> i32 {
        match self {
            MenuChoice::Withdraw => 1,
            MenuChoice::Deposit => 2,
            MenuChoice::CheckBalance => 3,
            MenuChoice::Exit => 4,
        }
    }

    /// Map a typed number back to a choice, if it is in range
    pub fn from_number(number: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.number() == number)
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuChoice::Withdraw => "Withdraw",
            MenuChoice::Deposit => "Deposit",
            MenuChoice::CheckBalance => "Check Balance",
            MenuChoice::Exit => "Exit",
        };
        f.write_str(label)
    }
}
