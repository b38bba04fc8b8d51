pub mod mps;
pub mod truncation;

pub use mps::{Tensor3, Topology, C64, MPS};
pub use truncation::{truncate, TruncatedBlock, Truncation, TruncationError};
