//! Small list helpers shared by the catalogue code.

pub mod chunk;
pub mod providers;

pub use chunk::{chunkify, ChunkError, Chunks};
pub use providers::unique_list;
