//! Interactive session state machine
//!
//! This module provides the Session that drives one terminal run:
//!
//! ```text
//! Loading -> Authenticating -> AuthenticatedMenu -> Terminated
//!    \              \
//!     +--------------+--> Aborted
//! ```
//!
//! The session enforces these rules:
//! - Nothing runs unless the record store loaded cleanly
//! - Authentication is a single attempt; the first record with the PIN wins
//! - Menu-time errors are reported and the menu is shown again
//! - Every successful withdrawal or deposit rewrites the whole store
//!
//! A failed save is reported but the in-memory balance change is kept, so
//! the running session and the file disagree until the next successful save.

use crate::core::{AccountStore, RecordSet};
use crate::io::{LineInput, ReadOutcome};
use crate::types::{round_money, AccountRecord, AtmError, MenuChoice, Pin};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

/// Why a session ended before reaching the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    StoreNotFound,
    StoreCorrupt,
    AuthInputInvalid,
    AuthPinMismatch,
}

impl AbortReason {
    /// Map a fatal load or login error to its abort reason
    pub fn from_error(error: &AtmError) -> Option<Self> {
        match error {
            AtmError::StoreNotFound { .. } => Some(AbortReason::StoreNotFound),
            AtmError::StoreCorrupt { .. } => Some(AbortReason::StoreCorrupt),
            AtmError::AuthInputInvalid { .. } => Some(AbortReason::AuthInputInvalid),
            AtmError::AuthPinMismatch => Some(AbortReason::AuthPinMismatch),
            _ => None,
        }
    }
}

/// Current position in the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Authenticating,
    /// Logged in; `active` is the position of the active record
    AuthenticatedMenu {
        active: usize,
    },
    Terminated,
    Aborted(AbortReason),
}

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user chose Exit, or input ended at the menu
    Terminated,
    /// Loading or authentication failed
    Aborted(AbortReason),
}

/// One interactive ATM session
///
/// Owns the loaded record set and refers to the active record by position.
/// All balance changes go through the owned set.
pub struct Session<S, R, W> {
    store: S,
    input: LineInput<R>,
    output: W,
    records: RecordSet,
    state: SessionState,
}

impl<S, R, W> Session<S, R, W>
where
    S: AccountStore,
    R: BufRead,
    W: Write,
{
    /// Create a session in the `Loading` state
    ///
    /// # Arguments
    ///
    /// * `store` - Where records are loaded from and saved to
    /// * `input` - Source of the user's answers, read one line at a time
    /// * `output` - Destination of prompts and messages
    pub fn new(store: S, input: R, output: W) -> Self {
        Session {
            store,
            input: LineInput::new(input),
            output,
            records: RecordSet::default(),
            state: SessionState::Loading,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The record the user logged in to, once authenticated
    pub fn active_record(&self) -> Option<&AccountRecord> {
        match self.state {
            SessionState::AuthenticatedMenu { active } => self.records.get(active),
            _ => None,
        }
    }

    /// Run the session until it terminates or aborts
    ///
    /// # Returns
    ///
    /// * `Ok(SessionOutcome)` once a terminal state is reached
    /// * `Err(AtmError::Io)` if the console cannot be read or written
    pub fn run(&mut self) -> Result<SessionOutcome, AtmError> {
        loop {
            match self.state {
                SessionState::Loading => self.load()?,
                SessionState::Authenticating => self.authenticate()?,
                SessionState::AuthenticatedMenu { active } => self.menu_round(active)?,
                SessionState::Terminated => return Ok(SessionOutcome::Terminated),
                SessionState::Aborted(reason) => return Ok(SessionOutcome::Aborted(reason)),
            }
        }
    }

    fn load(&mut self) -> Result<(), AtmError> {
        match self.store.load() {
            Ok(records) => {
                writeln!(self.output, "Loaded {} account(s).", records.len())?;
                self.records = records;
                self.state = SessionState::Authenticating;
                Ok(())
            }
            Err(e) => self.abort(e),
        }
    }

    fn authenticate(&mut self) -> Result<(), AtmError> {
        writeln!(self.output, "\n--- sharcodec ATM Login ---")?;
        self.prompt("Enter your PIN: ")?;

        let pin = match self.input.read_parsed::<Pin>()? {
            ReadOutcome::Value(pin) => pin,
            ReadOutcome::Invalid(input) => {
                return self.abort(AtmError::AuthInputInvalid { input });
            }
            ReadOutcome::Eof => {
                return self.abort(AtmError::AuthInputInvalid {
                    input: String::new(),
                });
            }
        };

        let Some(active) = self.records.find_by_pin(pin) else {
            return self.abort(AtmError::AuthPinMismatch);
        };

        info!("Authenticated account at position {}", active);
        self.state = SessionState::AuthenticatedMenu { active };

        let name = self.holder_name(active);
        writeln!(self.output, "\nWelcome {}!", name)?;
        Ok(())
    }

    fn menu_round(&mut self, active: usize) -> Result<(), AtmError> {
        self.show_menu()?;

        let choice = match self.input.read_parsed::<i32>()? {
            ReadOutcome::Value(number) => match MenuChoice::from_number(number) {
                Some(choice) => choice,
                None => {
                    return self.report(&AtmError::MenuInputInvalid {
                        input: number.to_string(),
                    });
                }
            },
            ReadOutcome::Invalid(input) => {
                return self.report(&AtmError::MenuInputInvalid { input });
            }
            ReadOutcome::Eof => return self.end_of_input(),
        };

        debug!("Menu choice: {}", choice);
        match choice {
            MenuChoice::Withdraw => self.withdraw(active),
            MenuChoice::Deposit => self.deposit(active),
            MenuChoice::CheckBalance => self.check_balance(active),
            MenuChoice::Exit => self.exit(active),
        }
    }

    fn withdraw(&mut self, active: usize) -> Result<(), AtmError> {
        let amount = match self.read_amount("Enter amount to withdraw: ")? {
            ReadOutcome::Value(amount) => amount,
            ReadOutcome::Invalid(input) => return self.report(&AtmError::AmountInvalid { input }),
            ReadOutcome::Eof => return self.end_of_input(),
        };

        match self.records.withdraw(active, amount) {
            Ok(balance) => {
                debug!("Withdrawal of {:.2} applied", amount);
                writeln!(
                    self.output,
                    "Withdrawn ${:.2}. New balance: ${:.2}",
                    amount, balance
                )?;
                self.persist()
            }
            Err(e) => self.report(&e),
        }
    }

    fn deposit(&mut self, active: usize) -> Result<(), AtmError> {
        let amount = match self.read_amount("Enter amount to deposit: ")? {
            ReadOutcome::Value(amount) => amount,
            ReadOutcome::Invalid(input) => return self.report(&AtmError::AmountInvalid { input }),
            ReadOutcome::Eof => return self.end_of_input(),
        };

        match self.records.deposit(active, amount) {
            Ok(balance) => {
                debug!("Deposit of {:.2} applied", amount);
                writeln!(
                    self.output,
                    "Deposited ${:.2}. New balance: ${:.2}",
                    amount, balance
                )?;
                self.persist()
            }
            Err(e) => self.report(&e),
        }
    }

    fn check_balance(&mut self, active: usize) -> Result<(), AtmError> {
        let balance = self
            .records
            .get(active)
            .map(|record| record.balance)
            .ok_or(AtmError::RecordNotFound { index: active })?;
        writeln!(self.output, "Current balance: ${:.2}", balance)?;
        Ok(())
    }

    fn exit(&mut self, active: usize) -> Result<(), AtmError> {
        let name = self.holder_name(active);
        writeln!(self.output, "Thank you, {}. Goodbye!", name)?;
        self.state = SessionState::Terminated;
        Ok(())
    }

    /// Prompt for an amount, rounded to cents, that must be strictly positive
    fn read_amount(&mut self, prompt: &str) -> Result<ReadOutcome<Decimal>, AtmError> {
        self.prompt(prompt)?;

        Ok(match self.input.read_parsed::<Decimal>()? {
            ReadOutcome::Value(amount) => {
                let amount = round_money(amount);
                if amount > Decimal::ZERO {
                    ReadOutcome::Value(amount)
                } else {
                    ReadOutcome::Invalid(amount.to_string())
                }
            }
            other => other,
        })
    }

    /// Save the whole record set, keeping the in-memory change on failure
    fn persist(&mut self) -> Result<(), AtmError> {
        if let Err(e) = self.store.save(&self.records) {
            warn!("{}; keeping unsaved in-memory balance", e);
            self.output_message(&e)?;
        }
        Ok(())
    }

    fn abort(&mut self, error: AtmError) -> Result<(), AtmError> {
        let Some(reason) = AbortReason::from_error(&error) else {
            return Err(error);
        };
        warn!("Session aborted: {}", error);
        self.output_message(&error)?;
        self.state = SessionState::Aborted(reason);
        Ok(())
    }

    fn report(&mut self, error: &AtmError) -> Result<(), AtmError> {
        debug!("Recovered from: {}", error);
        self.output_message(error)
    }

    fn end_of_input(&mut self) -> Result<(), AtmError> {
        info!("Input closed, ending session");
        self.state = SessionState::Terminated;
        Ok(())
    }

    fn output_message(&mut self, error: &AtmError) -> Result<(), AtmError> {
        writeln!(self.output, "{}", error.user_message())?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<(), AtmError> {
        writeln!(self.output, "\n--- Sharcodec ATM Menu ---")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice)?;
        }
        self.prompt("Choose option (1-4): ")
    }

    fn prompt(&mut self, text: &str) -> Result<(), AtmError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    fn holder_name(&self, active: usize) -> String {
        self.records
            .get(active)
            .map(|record| record.name.clone())
            .unwrap_or_default()
    }
}
