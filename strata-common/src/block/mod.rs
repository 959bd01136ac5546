pub mod errors;
pub mod id;
pub mod meta;

pub use errors::BlockIdError;
pub use id::BlockId;
pub use meta::{BlockMeta, DeletionMark};
