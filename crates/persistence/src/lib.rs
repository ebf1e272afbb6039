//! FitLedger Persistence - Key-value storage port and adapters

pub mod memory;
pub mod sqlite;
pub mod store;

pub use memory::MemoryStore;
pub use sqlite::Database;
pub use store::KeyValueStore;
