pub mod chat;
pub mod core;
pub mod domains;
pub mod knowledge;
pub mod llm;
pub mod retrieval;
pub mod server;
pub mod session;
pub mod state;
