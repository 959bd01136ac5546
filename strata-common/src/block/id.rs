//! Time-sortable block identifiers.
//!
//! A `BlockId` is a 128-bit value whose 48 most significant bits hold the
//! millisecond UNIX timestamp at which the block was created, the rest being
//! random. The layout matches UUIDv7, so identifiers sort by creation time and
//! the age of a block can be read straight out of its identifier.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

use super::errors::BlockIdError;
use crate::utils::time::current_time_millis;

const TIMESTAMP_SHIFT: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    /// Generates an identifier stamped with the current wall-clock time.
    pub fn new() -> Self {
        Self::from_timestamp_ms(current_time_millis())
    }

    /// Generates an identifier stamped with `millis`, random in the low bits.
    pub fn from_timestamp_ms(millis: u64) -> Self {
        let random: [u8; 10] = rand::random();
        BlockId(Builder::from_unix_timestamp_millis(millis, &random).into_uuid())
    }

    /// Creation time embedded in the identifier, in UNIX milliseconds.
    pub fn timestamp_ms(&self) -> u64 {
        (self.0.as_u128() >> TIMESTAMP_SHIFT) as u64
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for BlockId {
    type Err = BlockIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(BlockId)
            .map_err(|source| BlockIdError::Malformed {
                input: s.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_embedded() {
        let id = BlockId::from_timestamp_ms(1_700_000_000_123);
        assert_eq!(id.timestamp_ms(), 1_700_000_000_123);
    }

    #[test]
    fn test_ids_sort_by_creation_time() {
        let older = BlockId::from_timestamp_ms(1_000);
        let newer = BlockId::from_timestamp_ms(2_000);
        assert!(older < newer);
    }

    #[test]
    fn test_same_millisecond_ids_differ() {
        let a = BlockId::from_timestamp_ms(42);
        let b = BlockId::from_timestamp_ms(42);
        assert_ne!(a, b);
        assert_eq!(a.timestamp_ms(), b.timestamp_ms());
    }

    #[test]
    fn test_new_uses_wall_clock() {
        let before = current_time_millis();
        let id = BlockId::new();
        let after = current_time_millis();
        assert!(id.timestamp_ms() >= before && id.timestamp_ms() <= after);
    }

    #[test]
    fn test_parse_and_display() {
        let text = "018bcfe5-6800-7000-8000-000000000001";
        let id: BlockId = text.parse().unwrap();
        assert_eq!(id.to_string(), text);
        assert_eq!(id.timestamp_ms(), 0x018b_cfe5_6800);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "not-a-block".parse::<BlockId>().unwrap_err();
        assert!(err.to_string().contains("not-a-block"));
    }

    #[test]
    fn test_serializes_as_string() {
        let id: BlockId = "018bcfe5-6800-7000-8000-000000000001".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"018bcfe5-6800-7000-8000-000000000001\"");
        let back: BlockId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
