//! Terminal ATM simulator
//!
//! Interactive program that logs a user in by PIN against a plain text
//! account file and lets them withdraw, deposit and check their balance.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-file accounts.txt --max-records 20
//! RUST_LOG=debug cargo run
//! ```
//!
//! # Exit Codes
//!
//! - 0: Always, whether the session ended normally or was aborted
//! - 2: Malformed command-line flags (reported by clap)

use atm_simulator::cli;
use atm_simulator::core::Session;
use atm_simulator::io::RecordStore;
use log::error;
use std::io;

fn main() {
    env_logger::init();

    let args = cli::parse_args();
    let store = RecordStore::new(args.to_store_config());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(store, stdin.lock(), stdout.lock());

    // Every outcome, aborted or not, already reported itself on stdout
    if let Err(e) = session.run() {
        error!("Session ended on console error: {}", e);
    }
}
