//! Knowledge base loading: PDF extraction, JSON fact flattening,
//! corpus assembly and chunking, and a content-hash cache over the
//! file loads.

mod cache;
mod corpus;
mod facts;
mod pdf;

pub use cache::KnowledgeCache;
pub use corpus::{assemble_corpus, Chunk, Chunker};
pub use facts::load_json_facts;
pub use pdf::extract_pdf_text;
