//! Storage layer
//!
//! Books live in an in-memory collection; todos live in an embedded SQLite
//! table. Both sit behind the same `RecordStore` port.

pub mod db;
pub mod memory;

pub use db::{Database, TodoTable};
pub use memory::MemoryStore;
