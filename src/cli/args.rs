use crate::core::DEFAULT_CAPACITY;
use crate::io::{StoreConfig, DEFAULT_DATA_FILE};
use clap::Parser;
use std::path::PathBuf;

/// Terminal ATM backed by a plain text account file
#[derive(Parser, Debug)]
#[command(name = "atm-simulator")]
#[command(about = "Terminal ATM backed by a plain text account file", long_about = None)]
pub struct CliArgs {
    /// Backing file holding one `<pin>,<name>,<balance>` record per line
    #[arg(
        long = "data-file",
        value_name = "PATH",
        default_value = DEFAULT_DATA_FILE,
        help = "Path to the account file"
    )]
    pub data_file: PathBuf,

    /// Maximum number of records loaded from the backing file
    #[arg(
        long = "max-records",
        value_name = "COUNT",
        default_value_t = DEFAULT_CAPACITY,
        help = "Maximum number of accounts loaded (default: 10)"
    )]
    pub max_records: usize,
}

impl CliArgs {
    /// Create a StoreConfig from CLI arguments
    ///
    /// A zero record limit falls back to the default capacity with a warning.
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.data_file, self.max_records)
    }
}
