//! SQLite-backed key-value store

mod connection;
mod kv;

pub use connection::Database;
pub use kv::*;
