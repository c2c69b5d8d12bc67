//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::commands::Command;

/// API root used when neither `--api` nor `SCHEDULE_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Client for the university schedule backend.
#[derive(Parser, Debug)]
#[command(name = "schedule")]
#[command(author, version = env!("SCHEDULE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub target: Target,

    #[command(subcommand)]
    pub command: Command,
}

/// Where to send requests and where to keep credentials.
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// API root URL
    #[arg(long, env = "SCHEDULE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api: String,

    /// Directory holding stored credentials
    #[arg(long, env = "SCHEDULE_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}
