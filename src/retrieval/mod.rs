//! Per-domain vector similarity index over corpus chunks.

mod index;

pub use index::{RetrievalIndex, ScoredChunk};
