use async_trait::async_trait;
use bingo_types::StorageError;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};

use crate::entities::{kv_entries, prelude::*};
use crate::store::KeyValueStore;

/// Key-value store backed by a single SQLite table
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entry = KvEntries::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(StorageError::backend)?;

        Ok(entry.map(|model| model.value))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let entry = kv_entries::ActiveModel {
            key: ActiveValue::Set(key.to_string()),
            value: ActiveValue::Set(value),
            updated_at: ActiveValue::Set(chrono::Utc::now()),
        };

        KvEntries::insert(entry)
            .on_conflict(
                OnConflict::column(kv_entries::Column::Key)
                    .update_columns([kv_entries::Column::Value, kv_entries::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(StorageError::backend)?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        KvEntries::delete_by_id(key.to_string())
            .exec(&self.db)
            .await
            .map_err(StorageError::backend)?;

        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        KvEntries::find()
            .select_only()
            .column(kv_entries::Column::Key)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(StorageError::backend)
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let keys = KvEntries::find()
            .select_only()
            .column(kv_entries::Column::Key)
            .filter(kv_entries::Column::Key.starts_with(prefix))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(StorageError::backend)?;

        // LIKE treats '_' as a wildcard, so re-check the literal prefix
        Ok(keys.into_iter().filter(|k| k.starts_with(prefix)).collect())
    }
}
