//! # dbr
//!
//! Command-line front end for the data broker.
//!
//! ```text
//! dbr iterate-demo
//! dbr --data-dir ./data create jobs
//! dbr --data-dir ./data put jobs job:1 hello
//! dbr --data-dir ./data get jobs job:1
//! dbr --data-dir ./data query jobs
//! ```
//!
//! ## Environment
//!
//! - `DBR_DATA_DIR`, `DBR_TIMEOUT_MS`, `DBR_MAX_KEY_LEN`, `DBR_MAX_VALUE_SIZE`:
//!   broker configuration, overridden by the matching flags
//! - `DBR_LOG_LEVEL` / `RUST_LOG`: log filter (default `warn`)

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use dbr_broker::{BrokerConfig, DataBroker};
use std::time::Duration;

use crate::cli::{Args, Command};
use crate::logging::LogConfig;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut log_config = LogConfig::from_env();
    if let Some(level) = &args.log_level {
        log_config = log_config.with_level(level.clone());
    }
    logging::init(&log_config)?;

    let mut config = BrokerConfig::from_env();
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(ms) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::IterateDemo { name } => {
            let broker = DataBroker::new_in_memory(config);
            commands::iterate_demo(&broker, &name, &mut out)
        }
        command => commands::run_store_command(config, command, &mut out),
    }
}
