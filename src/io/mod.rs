//! I/O module
//!
//! Handles the backing file and the interactive console.
//!
//! # Components
//!
//! - `record_format` - Line format handling (row conversion, set serialization)
//! - `record_store` - File-backed load and save of the record set
//! - `console` - Line-oriented reader for interactive prompts

pub mod console;
pub mod record_format;
pub mod record_store;

pub use console::{LineInput, ReadOutcome};
pub use record_format::{read_records, write_records, RecordRow};
pub use record_store::{RecordStore, StoreConfig, DEFAULT_DATA_FILE};
