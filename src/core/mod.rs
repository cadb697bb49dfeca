//! Core business logic module
//!
//! This module contains the session components:
//! - `traits` - Persistence seam used by the session
//! - `record_set` - Bounded, ordered record collection and balance operations
//! - `session` - Login and menu state machine

pub mod record_set;
pub mod session;
pub mod traits;

pub use record_set::{RecordSet, DEFAULT_CAPACITY};
pub use session::{AbortReason, Session, SessionOutcome, SessionState};
pub use traits::AccountStore;
