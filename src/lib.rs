pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command, RunArgs, WorkspaceArgs};

pub use adapters::{csv_sink::CsvFileSink, elastic::EsSearchClient};
pub use config::{catalog::Catalog, ProberConfig};
pub use core::{prober::ProberEngine, workspace::Workspace};
pub use domain::model::{ProbeRecord, ProbeSummary, Query, QueryStats};
pub use utils::error::{ProberError, Result};
