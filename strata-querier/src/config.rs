use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{consistency::BlocksConsistencyChecker, error::QuerierError};

pub const DEFAULT_UPLOAD_GRACE_PERIOD_SECS: u64 = 30 * 60;
pub const DEFAULT_DELETION_MARKS_DELAY_SECS: u64 = 12 * 60 * 60;

/// Grace windows used by the blocks consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsistencyCheckConfig {
    /// Minimum block age before its absence from query results counts.
    pub upload_grace_period_secs: u64,

    /// Delay between a deletion mark and the block's physical removal.
    /// Half of it is granted to nodes before marked blocks are skipped.
    pub deletion_marks_delay_secs: u64,
}

impl Default for ConsistencyCheckConfig {
    fn default() -> Self {
        Self {
            upload_grace_period_secs: DEFAULT_UPLOAD_GRACE_PERIOD_SECS,
            deletion_marks_delay_secs: DEFAULT_DELETION_MARKS_DELAY_SECS,
        }
    }
}

impl ConsistencyCheckConfig {
    pub fn upload_grace_period(&self) -> Duration {
        Duration::from_secs(self.upload_grace_period_secs)
    }

    pub fn deletion_marks_delay(&self) -> Duration {
        Duration::from_secs(self.deletion_marks_delay_secs)
    }

    pub fn build_checker(&self) -> BlocksConsistencyChecker {
        BlocksConsistencyChecker::new(self.upload_grace_period(), self.deletion_marks_delay())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), QuerierError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, QuerierError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| QuerierError::Config(format!("{}: {}", path.display(), e)))?;
        info!(
            "📝 Loaded consistency check config from {} (upload grace {}s, deletion delay {}s)",
            path.display(),
            config.upload_grace_period_secs,
            config.deletion_marks_delay_secs
        );
        Ok(config)
    }
}
