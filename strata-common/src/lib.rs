//! Types shared by every Strata component: block identifiers and metadata,
//! deletion marks, node identifiers and time helpers.

pub mod block;
pub mod utils;

pub use block::{BlockId, BlockIdError, BlockMeta, DeletionMark};
pub use utils::NodeId;
