//! In-memory implementation of LookupService for testing and development

use crate::core::service::LookupService;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// A row in an in-memory collection
#[derive(Debug, Clone)]
pub struct Row {
    pub id: Uuid,
    pub fields: Value,
}

/// In-memory lookup service implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryLookupService {
    collections: Arc<RwLock<HashMap<String, Vec<Row>>>>,
}

impl InMemoryLookupService {
    /// Create a new in-memory lookup service
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row into a collection
    pub fn insert(&self, collection: &str, id: Uuid, fields: Value) -> Result<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        collections
            .entry(collection.to_string())
            .or_default()
            .push(Row { id, fields });

        Ok(())
    }

    /// Number of rows in a collection
    pub fn count(&self, collection: &str) -> Result<usize> {
        let collections = self
            .collections
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(collections.get(collection).map_or(0, Vec::len))
    }
}

/// Whether a row matches `key == value`
///
/// The `id` key matches against the row's primary key; submitted ids are
/// UUID strings.
fn row_matches(row: &Row, key: &str, value: &Value) -> bool {
    if key == "id" {
        return value
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .is_some_and(|id| id == row.id);
    }
    row.fields.get(key) == Some(value)
}

#[async_trait]
impl LookupService for InMemoryLookupService {
    async fn exists(&self, collection: &str, key: &str, value: &Value) -> Result<bool> {
        let collections = self
            .collections
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(collections
            .get(collection)
            .is_some_and(|rows| rows.iter().any(|row| row_matches(row, key, value))))
    }

    async fn find_conflicting(
        &self,
        collection: &str,
        key: &str,
        value: &Value,
        excluding: Option<Uuid>,
    ) -> Result<bool> {
        let collections = self
            .collections
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(collections.get(collection).is_some_and(|rows| {
            rows.iter().any(|row| {
                row_matches(row, key, value) && excluding.is_none_or(|ex| row.id != ex)
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_exists_by_field() {
        let store = InMemoryLookupService::new();
        store
            .insert("employees", Uuid::new_v4(), json!({"email": "a@x.com"}))
            .unwrap();

        assert!(
            store
                .exists("employees", "email", &json!("a@x.com"))
                .await
                .unwrap()
        );
        assert!(
            !store
                .exists("employees", "email", &json!("b@x.com"))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_exists_by_id() {
        let store = InMemoryLookupService::new();
        let id = Uuid::new_v4();
        store
            .insert("organizations", id, json!({"name": "Acme"}))
            .unwrap();

        assert!(
            store
                .exists("organizations", "id", &json!(id.to_string()))
                .await
                .unwrap()
        );
        assert!(
            !store
                .exists("organizations", "id", &json!(Uuid::new_v4().to_string()))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_exists_rejects_malformed_ids() {
        let store = InMemoryLookupService::new();
        store
            .insert("organizations", Uuid::new_v4(), json!({}))
            .unwrap();

        assert!(
            !store
                .exists("organizations", "id", &json!("not-a-uuid"))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_find_conflicting_excludes_current_row() {
        let store = InMemoryLookupService::new();
        let id = Uuid::new_v4();
        store
            .insert("employees", id, json!({"email": "a@x.com"}))
            .unwrap();

        // The row collides with itself only when not excluded.
        assert!(
            store
                .find_conflicting("employees", "email", &json!("a@x.com"), None)
                .await
                .unwrap()
        );
        assert!(
            !store
                .find_conflicting("employees", "email", &json!("a@x.com"), Some(id))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_find_conflicting_other_row_still_conflicts() {
        let store = InMemoryLookupService::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        store
            .insert("employees", first, json!({"email": "a@x.com"}))
            .unwrap();
        store
            .insert("employees", second, json!({"email": "a@x.com"}))
            .unwrap();

        assert!(
            store
                .find_conflicting("employees", "email", &json!("a@x.com"), Some(first))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = InMemoryLookupService::new();
        assert!(
            !store
                .exists("loans", "loan_number", &json!("LN-1"))
                .await
                .unwrap()
        );
        assert_eq!(store.count("loans").unwrap(), 0);
    }
}
