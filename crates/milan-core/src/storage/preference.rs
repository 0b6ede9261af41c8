//! Preference store trait.

use milan_types::error::StorageError;

/// Trait for persisted string preferences, keyed by name.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// The file-backed implementation lives in milan-infra.
pub trait PreferenceStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}
