use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::repo::*;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS localstorage (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL
)";

pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub async fn new(db_path: &str) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?.create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(5);
        if db_path.contains(":memory:") {
            // An in-memory database lives and dies with its single connection.
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;

        sqlx::query(SCHEMA).execute(&pool).await?;

        info!("Local storage initialized at {}", db_path);

        Ok(Self { pool })
    }
}

#[async_trait]
impl LocalStorage for SqliteStorage {
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM localstorage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        sqlx::query("INSERT OR REPLACE INTO localstorage (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let storage = SqliteStorage::new("sqlite::memory:").await.unwrap();

        assert_eq!(storage.get_item("favorites").await.unwrap(), None);

        storage.set_item("favorites", "[]").await.unwrap();
        storage.set_item("favorites", "[1]").await.unwrap();
        assert_eq!(
            storage.get_item("favorites").await.unwrap().as_deref(),
            Some("[1]")
        );
        assert_eq!(storage.get_item("other").await.unwrap(), None);
    }
}
