//! The key-value persistence port consumed by the ledger

use async_trait::async_trait;
use fitledger_core::Result;

/// Device-local key-value storage.
///
/// All values are opaque strings; the ledger serializes to JSON itself.
/// Adapters must treat missing keys as `None` rather than an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, or `None` when the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a single value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Write several values so that either all or none become visible.
    /// Mutations that pair a debit with a minted code go through here.
    async fn set_many(&self, entries: &[(String, String)]) -> Result<()>;

    /// Delete the given keys; unknown keys are ignored
    async fn remove_many(&self, keys: &[&str]) -> Result<()>;
}
