pub mod prober;
pub mod workspace;

pub use crate::domain::model::{ProbeRecord, ProbeSummary, Query, QueryStats};
pub use crate::domain::ports::{ResultSink, SearchClient};
pub use crate::utils::error::Result;
