//! Persistent store: per-user JSON documents plus the append-only application log.
//!
//! Documents carry a version so read-modify-write callers (the calendar) can
//! commit optimistically and retry on conflict instead of losing updates.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::job::Application;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub const CALENDAR_KEY: &str = "calendar";
pub const PREFERENCES_KEY: &str = "job_preferences";
pub const RESUME_REF_KEY: &str = "resume_ref";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("document '{key}' changed since it was read")]
    VersionConflict { key: String },
}

/// A stored value with its version. Version 0 means "not stored yet".
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: i64,
}

/// Write precondition for [`KvStore::put`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Last writer wins.
    Overwrite,
    /// Succeeds only if the stored version still equals this one (0 = absent).
    IfVersion(i64),
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, user_id: Uuid, key: &str) -> Result<Option<Versioned<Value>>, StoreError>;

    /// Writes `value` and returns the new version.
    async fn put(
        &self,
        user_id: Uuid,
        key: &str,
        value: &Value,
        mode: WriteMode,
    ) -> Result<i64, StoreError>;

    async fn append_application(
        &self,
        user_id: Uuid,
        application: &Application,
    ) -> Result<(), StoreError>;

    async fn list_applications(&self, user_id: Uuid) -> Result<Vec<Application>, StoreError>;
}

/// Loads a typed document. An absent key yields `T::default()` at version 0.
pub async fn load_document<T>(
    store: &dyn KvStore,
    user_id: Uuid,
    key: &str,
) -> Result<Versioned<T>, StoreError>
where
    T: DeserializeOwned + Default,
{
    match store.get(user_id, key).await? {
        Some(doc) => Ok(Versioned {
            value: serde_json::from_value(doc.value)?,
            version: doc.version,
        }),
        None => Ok(Versioned {
            value: T::default(),
            version: 0,
        }),
    }
}

/// Loads a typed document that has no meaningful default.
pub async fn load_optional<T: DeserializeOwned>(
    store: &dyn KvStore,
    user_id: Uuid,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(user_id, key).await? {
        Some(doc) => Ok(Some(serde_json::from_value(doc.value)?)),
        None => Ok(None),
    }
}

pub async fn save_document<T: Serialize>(
    store: &dyn KvStore,
    user_id: Uuid,
    key: &str,
    value: &T,
    mode: WriteMode,
) -> Result<i64, StoreError> {
    let value = serde_json::to_value(value)?;
    store.put(user_id, key, &value, mode).await
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use crate::models::calendar::Calendar;
    use crate::models::job::JobPreferences;

    #[tokio::test]
    async fn test_absent_document_defaults_to_empty_at_version_zero() {
        let store = MemoryStore::default();
        let doc = load_document::<Calendar>(&store, Uuid::new_v4(), CALENDAR_KEY)
            .await
            .unwrap();
        assert!(doc.value.events.is_empty());
        assert_eq!(doc.version, 0);
    }

    #[tokio::test]
    async fn test_typed_round_trip_bumps_version() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();
        let prefs = JobPreferences {
            keywords: vec!["rust".to_string()],
            ..Default::default()
        };
        let v1 = save_document(&store, user, PREFERENCES_KEY, &prefs, WriteMode::Overwrite)
            .await
            .unwrap();
        let v2 = save_document(&store, user, PREFERENCES_KEY, &prefs, WriteMode::Overwrite)
            .await
            .unwrap();
        assert_eq!((v1, v2), (1, 2));

        let loaded = load_document::<JobPreferences>(&store, user, PREFERENCES_KEY)
            .await
            .unwrap();
        assert_eq!(loaded.value, prefs);
        assert_eq!(loaded.version, 2);
    }

    #[tokio::test]
    async fn test_stale_version_is_rejected() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();
        let calendar = Calendar::default();
        save_document(&store, user, CALENDAR_KEY, &calendar, WriteMode::IfVersion(0))
            .await
            .unwrap();

        let err = save_document(&store, user, CALENDAR_KEY, &calendar, WriteMode::IfVersion(0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { .. }));
    }

    #[tokio::test]
    async fn test_load_optional_absent_is_none() {
        let store = MemoryStore::default();
        let value: Option<crate::models::resume::ResumeRef> =
            load_optional(&store, Uuid::new_v4(), RESUME_REF_KEY)
                .await
                .unwrap();
        assert!(value.is_none());
    }
}
