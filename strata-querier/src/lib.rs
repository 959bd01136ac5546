pub mod cli;
pub mod config;
pub mod consistency;
pub mod error;
pub mod snapshot;

pub use config::ConsistencyCheckConfig;
pub use consistency::{BlocksConsistencyChecker, ConsistencyReport, MissingBlock, QueriedBlocks};
pub use error::{ConsistencyError, QuerierError};
