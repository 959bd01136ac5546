use std::{collections::HashMap, fs, path::Path};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use strata_common::{BlockId, BlockMeta, DeletionMark};

use crate::{consistency::QueriedBlocks, error::QuerierError};

/// The inputs of one consistency check, recorded for offline auditing.
///
/// It includes:
/// - The blocks the querier expected to exist.
/// - The deletion marks known for those blocks.
/// - The blocks each node returned.
/// - Optionally, the instant the check was run at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckSnapshot {
    pub known_blocks: Vec<BlockMeta>,

    #[serde(default)]
    pub deletion_marks: Vec<DeletionMark>,

    #[serde(default)]
    pub queried: QueriedBlocks,

    /// UNIX milliseconds of the recorded check; wall clock when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now_ms: Option<i64>,
}

impl CheckSnapshot {
    /// Deletion marks keyed by block, the shape the checker consumes.
    /// A later mark for the same block replaces an earlier one.
    pub fn deletion_mark_index(&self) -> HashMap<BlockId, DeletionMark> {
        self.deletion_marks
            .iter()
            .map(|mark| (mark.id, mark.clone()))
            .collect()
    }

    pub fn now(&self) -> Result<DateTime<Utc>, QuerierError> {
        match self.now_ms {
            None => Ok(Utc::now()),
            Some(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| QuerierError::Snapshot(format!("now_ms out of range: {}", ms))),
        }
    }
}

pub fn save_snapshot<P: AsRef<Path>>(
    path: P,
    snapshot: &CheckSnapshot,
) -> Result<(), QuerierError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<CheckSnapshot, QuerierError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json)
        .map_err(|e| QuerierError::Snapshot(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_common::NodeId;
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_and_load_snapshot() {
        let served = BlockId::from_timestamp_ms(1_000);
        let marked = BlockId::from_timestamp_ms(2_000);

        let mut queried = QueriedBlocks::new();
        queried.insert("gw-1:9095".into(), vec![served]);

        let snapshot = CheckSnapshot {
            known_blocks: vec![BlockMeta::new(served), BlockMeta::new(marked)],
            deletion_marks: vec![
                DeletionMark::new(marked, 1_600_000_000),
                DeletionMark::new(marked, 1_700_000_000),
            ],
            queried,
            now_ms: Some(1_700_000_000_000),
        };

        let file = NamedTempFile::new().expect("Failed to create temp file");
        save_snapshot(file.path(), &snapshot).expect("Failed to save snapshot");
        let loaded = load_snapshot(file.path()).expect("Failed to load snapshot");

        assert_eq!(loaded.known_blocks.len(), 2);
        assert_eq!(loaded.known_blocks[0].id, served);
        assert_eq!(loaded.queried[&NodeId::from("gw-1:9095")], vec![served]);
        assert_eq!(loaded.deletion_marks.len(), 2);

        let marks = loaded.deletion_mark_index();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[&marked].deletion_time, 1_700_000_000);
        assert_eq!(loaded.now().unwrap().timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_minimal_snapshot_uses_defaults() {
        let json = r#"{"known_blocks":[]}"#;
        let snapshot: CheckSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.queried.is_empty());
        assert!(snapshot.deletion_marks.is_empty());
        assert!(snapshot.now_ms.is_none());
    }

    #[test]
    fn test_snapshot_without_instant_uses_wall_clock() {
        let before = Utc::now();
        let now = CheckSnapshot::default().now().unwrap();
        assert!(now >= before);
    }

    #[test]
    fn test_out_of_range_instant_is_a_snapshot_error() {
        let snapshot = CheckSnapshot {
            now_ms: Some(i64::MAX),
            ..Default::default()
        };

        let err = snapshot.now().unwrap_err();
        assert!(matches!(err, QuerierError::Snapshot(_)));
        assert!(err.to_string().starts_with("Invalid snapshot: now_ms out of range"));
    }

    #[test]
    fn test_malformed_snapshot_error_names_the_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{ not json").unwrap();

        let err = load_snapshot(file.path()).unwrap_err();
        assert!(matches!(err, QuerierError::Snapshot(_)));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
