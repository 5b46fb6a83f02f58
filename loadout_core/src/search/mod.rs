//! Search - Exhaustive cross-product enumeration with top-K ranking

mod cancel;
mod combinations;
mod optimizer;
mod ranking;
mod result;

pub use cancel::CancelToken;
pub use optimizer::{optimize, Optimizer, SearchPhase};
pub use ranking::TopK;
pub use result::{RankedResult, SearchOutcome};

use crate::config::ConfigError;
use thiserror::Error;

/// Search failure
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Search cancelled after {evaluated} combinations")]
    Cancelled { evaluated: u64 },
    #[error("Optimizer has already run")]
    AlreadyRun,
    #[error("Search space too large to enumerate")]
    SearchSpaceOverflow,
}
