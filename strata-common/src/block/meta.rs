use serde::{Deserialize, Serialize};

use super::id::BlockId;

/// Metadata of a block known to exist in the object store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMeta {
    pub id: BlockId,

    /// 1 for freshly ingested blocks, incremented by each compaction pass.
    #[serde(default = "default_compaction_level")]
    pub compaction_level: u32,
}

fn default_compaction_level() -> u32 {
    1
}

impl BlockMeta {
    pub fn new(id: BlockId) -> Self {
        BlockMeta {
            id,
            compaction_level: default_compaction_level(),
        }
    }

    pub fn with_compaction_level(mut self, level: u32) -> Self {
        self.compaction_level = level;
        self
    }

    /// Creation time of the block, read from its identifier.
    pub fn created_at_ms(&self) -> u64 {
        self.id.timestamp_ms()
    }
}

/// Marks a block for physical removal after the configured deletion delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionMark {
    pub id: BlockId,

    /// UNIX seconds at which the block was marked.
    pub deletion_time: i64,
}

impl DeletionMark {
    pub fn new(id: BlockId, deletion_time: i64) -> Self {
        DeletionMark { id, deletion_time }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_at_comes_from_id() {
        let meta = BlockMeta::new(BlockId::from_timestamp_ms(5_000)).with_compaction_level(2);
        assert_eq!(meta.created_at_ms(), 5_000);
        assert_eq!(meta.compaction_level, 2);
    }

    #[test]
    fn test_meta_defaults_when_fields_missing() {
        let json = r#"{"id":"018bcfe5-6800-7000-8000-000000000001"}"#;
        let meta: BlockMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.compaction_level, 1);
    }

    #[test]
    fn test_deletion_mark_from_json() {
        let json = r#"{"id":"018bcfe5-6800-7000-8000-000000000001","deletion_time":1700000000}"#;
        let mark: DeletionMark = serde_json::from_str(json).unwrap();
        assert_eq!(mark.deletion_time, 1_700_000_000);
    }
}
