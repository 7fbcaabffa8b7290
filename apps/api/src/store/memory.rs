use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{KvStore, StoreError, Versioned, WriteMode};
use crate::models::job::Application;

/// In-process store used by tests.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<(Uuid, String), Versioned<Value>>>,
    applications: Mutex<HashMap<Uuid, Vec<Application>>>,
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, user_id: Uuid, key: &str) -> Result<Option<Versioned<Value>>, StoreError> {
        let documents = self.documents.lock().unwrap();
        Ok(documents.get(&(user_id, key.to_string())).cloned())
    }

    async fn put(
        &self,
        user_id: Uuid,
        key: &str,
        value: &Value,
        mode: WriteMode,
    ) -> Result<i64, StoreError> {
        let mut documents = self.documents.lock().unwrap();
        let slot = (user_id, key.to_string());
        let current = documents.get(&slot).map(|d| d.version).unwrap_or(0);
        if let WriteMode::IfVersion(expected) = mode {
            if expected != current {
                return Err(StoreError::VersionConflict {
                    key: key.to_string(),
                });
            }
        }
        let version = current + 1;
        documents.insert(
            slot,
            Versioned {
                value: value.clone(),
                version,
            },
        );
        Ok(version)
    }

    async fn append_application(
        &self,
        user_id: Uuid,
        application: &Application,
    ) -> Result<(), StoreError> {
        self.applications
            .lock()
            .unwrap()
            .entry(user_id)
            .or_default()
            .push(application.clone());
        Ok(())
    }

    async fn list_applications(&self, user_id: Uuid) -> Result<Vec<Application>, StoreError> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}
