use serde::{Deserialize, Serialize};
use strata_common::{BlockId, NodeId};

use crate::error::ConsistencyError;

/// A known block that no node returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingBlock {
    pub id: BlockId,

    pub compaction_level: u32,

    /// Nodes that answered the query without including this block, sorted.
    pub responders: Vec<NodeId>,
}

/// Outcome of one consistency evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Blocks that passed both filters and were looked up.
    pub checked: usize,

    /// Blocks younger than the upload grace period.
    pub skipped_fresh: usize,

    /// Blocks whose deletion mark is older than half the deletion delay.
    pub skipped_deleted: usize,

    /// Missing blocks, in the order the known blocks were given.
    pub missing: Vec<MissingBlock>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing_ids(&self) -> impl Iterator<Item = &BlockId> {
        self.missing.iter().map(|m| &m.id)
    }

    pub fn into_result(self) -> Result<(), ConsistencyError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ConsistencyError::MissingBlocks(self.missing))
        }
    }
}
