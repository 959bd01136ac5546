//! utils
//!
//! Small helpers shared across Strata: node identifiers and wall-clock access.

pub mod node_id;
pub use node_id::NodeId;

pub mod time;
