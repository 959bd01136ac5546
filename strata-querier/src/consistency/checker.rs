use std::{collections::HashMap, time::Duration};

use chrono::{DateTime, Utc};
use strata_common::{BlockId, BlockMeta, DeletionMark, NodeId};
use tracing::{debug, warn};

use super::{ConsistencyReport, MissingBlock, QueriedBlocks};
use crate::error::ConsistencyError;

/// Checks that a fan-out query covered every block expected to be queryable.
///
/// Holds only the two grace windows; every call is an independent, pure
/// evaluation over the inputs it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlocksConsistencyChecker {
    upload_grace_period: Duration,
    deletion_marks_delay: Duration,
}

impl BlocksConsistencyChecker {
    pub fn new(upload_grace_period: Duration, deletion_marks_delay: Duration) -> Self {
        Self {
            upload_grace_period,
            deletion_marks_delay,
        }
    }

    pub fn upload_grace_period(&self) -> Duration {
        self.upload_grace_period
    }

    pub fn deletion_marks_delay(&self) -> Duration {
        self.deletion_marks_delay
    }

    /// Runs the check against the current wall-clock time.
    pub fn check(
        &self,
        known_blocks: &[BlockMeta],
        known_deletion_marks: &HashMap<BlockId, DeletionMark>,
        queried: &QueriedBlocks,
    ) -> Result<(), ConsistencyError> {
        self.check_at(Utc::now(), known_blocks, known_deletion_marks, queried)
    }

    /// Runs the check as of `now` and logs the outcome.
    pub fn check_at(
        &self,
        now: DateTime<Utc>,
        known_blocks: &[BlockMeta],
        known_deletion_marks: &HashMap<BlockId, DeletionMark>,
        queried: &QueriedBlocks,
    ) -> Result<(), ConsistencyError> {
        let report = self.evaluate(now, known_blocks, known_deletion_marks, queried);

        debug!(
            nodes = queried.len(),
            checked = report.checked,
            skipped_fresh = report.skipped_fresh,
            skipped_deleted = report.skipped_deleted,
            "blocks consistency check evaluated"
        );

        if !report.is_consistent() {
            for block in &report.missing {
                warn!(
                    block = %block.id,
                    compaction_level = block.compaction_level,
                    responders = block.responders.len(),
                    "block not returned by any node"
                );
            }
            let ids: Vec<String> = report.missing_ids().map(|id| id.to_string()).collect();
            warn!(missing = %ids.join(" "), "blocks consistency check failed");
        }

        report.into_result()
    }

    /// Evaluates which known blocks were not returned by any node.
    ///
    /// A block is skipped when it is younger than the upload grace period, or
    /// when it carries a deletion mark set more than half the deletion delay
    /// before `now`. Every other known block must appear in at least one
    /// node's result. Blocks reported by nodes but absent from `known_blocks`
    /// are ignored. An id dated after `now` has a negative age and is skipped
    /// as fresh.
    pub fn evaluate(
        &self,
        now: DateTime<Utc>,
        known_blocks: &[BlockMeta],
        known_deletion_marks: &HashMap<BlockId, DeletionMark>,
        queried: &QueriedBlocks,
    ) -> ConsistencyReport {
        // Invert node -> blocks so each lookup also knows who served the block.
        let mut actual_blocks: HashMap<&BlockId, Vec<&NodeId>> = HashMap::new();
        for (node, blocks) in queried {
            for id in blocks {
                actual_blocks.entry(id).or_default().push(node);
            }
        }

        let mut responders: Vec<NodeId> = queried.keys().cloned().collect();
        responders.sort();

        let now_ms = now.timestamp_millis();
        let upload_grace_ms = duration_millis(self.upload_grace_period);
        let deletion_grace_ms = duration_millis(self.deletion_marks_delay / 2);

        let mut report = ConsistencyReport::default();

        for meta in known_blocks {
            let age_ms = now_ms.saturating_sub(meta.created_at_ms() as i64);
            if age_ms < upload_grace_ms {
                report.skipped_fresh += 1;
                continue;
            }

            if let Some(mark) = known_deletion_marks.get(&meta.id) {
                let marked_for_ms = now_ms.saturating_sub(mark.deletion_time.saturating_mul(1000));
                if marked_for_ms > deletion_grace_ms {
                    report.skipped_deleted += 1;
                    continue;
                }
            }

            report.checked += 1;
            if !actual_blocks.contains_key(&meta.id) {
                report.missing.push(MissingBlock {
                    id: meta.id,
                    compaction_level: meta.compaction_level,
                    responders: responders.clone(),
                });
            }
        }

        report
    }
}

fn duration_millis(d: Duration) -> i64 {
    i64::try_from(d.as_millis()).unwrap_or(i64::MAX)
}
