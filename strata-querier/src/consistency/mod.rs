//! Post-query audit of fan-out reads.
//!
//! After a query has been spread over the serving nodes, the querier knows
//! which blocks should have been covered and which blocks each node actually
//! answered for. [`BlocksConsistencyChecker`] compares the two and reports any
//! block that nobody served, ignoring blocks that are too young to have been
//! discovered everywhere and blocks that were marked for deletion long enough
//! ago that nodes may already have dropped them.

pub mod checker;
pub mod report;

use std::collections::HashMap;

use strata_common::{BlockId, NodeId};

pub use checker::BlocksConsistencyChecker;
pub use report::{ConsistencyReport, MissingBlock};

/// Blocks each node reported as queried, keyed by node address.
pub type QueriedBlocks = HashMap<NodeId, Vec<BlockId>>;
