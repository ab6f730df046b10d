use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ProberConfig;

#[derive(Debug, Parser)]
#[command(name = "esprober")]
#[command(about = "Probes Elasticsearch search latency and appends per-query timings to CSV")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ensure the workspace exists, then probe until the duration elapses
    Run(RunArgs),
    /// Create the workspace directory (no-op when it already exists)
    Init(WorkspaceArgs),
    /// Remove the workspace directory and everything inside it
    Clean(WorkspaceArgs),
    /// Check configuration, workspace and cluster reachability
    Doctor(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Elasticsearch base URL (overrides ESPROBER_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// API key sent as `Authorization: ApiKey ...` (overrides ESPROBER_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Seconds slept after every probe (overrides ESPROBER_QUERY_INTERVAL)
    #[arg(long)]
    pub interval: Option<f64>,

    /// Stop after this many seconds; 0 runs until interrupted
    #[arg(long)]
    pub duration: Option<f64>,

    /// Per-request timeout in seconds (overrides ESPROBER_REQUEST_TIMEOUT)
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Workspace directory holding the CSV output and run log
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    /// CSV output file (defaults to <workspace>/esprober.csv)
    #[arg(long)]
    pub csv_file: Option<PathBuf>,

    /// Run log file (defaults to <workspace>/esprober.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// TOML query catalog; the built-in catalog is used when omitted
    #[arg(long)]
    pub queries: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU/memory usage per cycle")]
    pub monitor: bool,
}

impl RunArgs {
    pub fn into_config(self) -> ProberConfig {
        let mut config = ProberConfig::from_env();

        if let Some(url) = self.api_url {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = self.api_key {
            let key = key.trim().to_string();
            config.api_key = if key.is_empty() { None } else { Some(key) };
        }
        if let Some(interval) = self.interval {
            config.query_interval = interval;
        }
        if let Some(duration) = self.duration {
            config.test_duration = if duration > 0.0 { Some(duration) } else { None };
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout = timeout;
        }
        if let Some(workspace) = self.workspace {
            config.workspace = workspace;
        }
        if self.csv_file.is_some() {
            config.csv_file = self.csv_file;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file;
        }
        config.queries_file = self.queries;
        config.verbose = self.verbose;
        config.monitor = self.monitor;

        config
    }
}

#[derive(Debug, Args)]
pub struct WorkspaceArgs {
    /// Workspace directory (overrides ESPROBER_WORKSPACE)
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl WorkspaceArgs {
    pub fn into_config(self) -> ProberConfig {
        let mut config = ProberConfig::from_env();
        if let Some(workspace) = self.workspace {
            config.workspace = workspace;
        }
        config.verbose = self.verbose;
        config
    }
}
