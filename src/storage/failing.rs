use async_trait::async_trait;
use std::sync::Mutex;

use super::repo::*;

/// Test storage whose reads always fail. Writes are recorded.
#[derive(Default)]
pub struct FailingStorage {
    writes: Mutex<Vec<(String, String)>>,
}

impl FailingStorage {
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocalStorage for FailingStorage {
    async fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}
