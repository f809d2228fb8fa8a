//! Storage collaborator trait
//!
//! The validator never owns persistence. Existence and uniqueness checks are
//! delegated to a read-only lookup service; implementations live in the
//! `storage` module.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

/// Read-only lookups against external collections
///
/// Collections consulted by the shipped rule tables are `organizations`,
/// `employees`, `loans` and `users`. A returned error is a collaborator
/// failure: the engine aborts the validation call with a storage error
/// rather than recording a validation outcome.
#[async_trait]
pub trait LookupService: Send + Sync {
    /// Whether a row exists in `collection` with `key` equal to `value`
    async fn exists(&self, collection: &str, key: &str, value: &Value) -> Result<bool>;

    /// Whether any row other than `excluding` shares `value` in `key`
    async fn find_conflicting(
        &self,
        collection: &str,
        key: &str,
        value: &Value,
        excluding: Option<Uuid>,
    ) -> Result<bool>;
}
