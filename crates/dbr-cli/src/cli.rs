//! Command-line arguments.

use clap::{Parser, Subcommand};
use dbr_types::PersistLevel;
use std::path::PathBuf;

/// dbr: data broker command-line tool
#[derive(Parser, Debug)]
#[command(name = "dbr", version)]
#[command(about = "Create namespaces and move tuples through a data broker")]
pub struct Args {
    /// Snapshot directory for persistent namespaces (overrides DBR_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Blocking get/read timeout in milliseconds (overrides DBR_TIMEOUT_MS)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Log filter, e.g. `info` or `dbr_broker=debug` (overrides DBR_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Put ten keys into a volatile namespace, iterate and get them all back
    IterateDemo {
        /// Namespace name
        #[arg(long, default_value = "DBRtestname")]
        name: String,
    },

    /// Create a persistent namespace
    Create {
        name: String,

        /// Persistence level: temporary or permanent
        #[arg(long, default_value = "permanent")]
        level: PersistLevel,

        /// Groups to admit besides the empty group
        #[arg(long = "group", value_delimiter = ',')]
        groups: Vec<u32>,
    },

    /// Delete a namespace and its snapshot
    Delete { name: String },

    /// Append a value under a key
    Put {
        name: String,
        key: String,
        value: String,

        #[arg(long, default_value_t = 0)]
        group: u32,
    },

    /// Pop the oldest value under a key
    Get {
        name: String,
        key: String,

        #[arg(long, default_value_t = 0)]
        group: u32,

        /// Wait for a value instead of failing straight away
        #[arg(long)]
        wait: bool,
    },

    /// Print the oldest value under a key without removing it
    Read {
        name: String,
        key: String,

        #[arg(long, default_value_t = 0)]
        group: u32,

        #[arg(long)]
        wait: bool,
    },

    /// Drop every value under a key
    Remove {
        name: String,
        key: String,

        #[arg(long, default_value_t = 0)]
        group: u32,
    },

    /// List keys
    Dir {
        name: String,

        /// Only keys starting with this prefix
        #[arg(long, default_value = "")]
        prefix: String,

        #[arg(long, default_value_t = 0)]
        group: u32,

        /// Maximum number of keys
        #[arg(long, default_value_t = 100)]
        count: usize,
    },

    /// Print namespace state as JSON
    Query { name: String },
}
