//! SQLite settings store implementation.

use std::collections::HashMap;

use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::SettingRow;
use crate::adapter::outbound::sqlite::database::schema::settings;
use crate::error::{Result, StorageError};
use crate::port::outbound::store::SettingStore;

/// SQLite-backed key/value settings store.
///
/// Values are written with `REPLACE INTO`, so every save is an upsert and
/// the key stays unique.
pub struct SqliteSettingStore {
    pool: DbPool,
}

impl SqliteSettingStore {
    /// Create a new SQLite settings store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl SettingStore for SqliteSettingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let row: Option<SettingRow> = settings::table
            .find(key)
            .first(&mut conn)
            .optional()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(row.map(|r| r.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let row = SettingRow {
            key: key.to_string(),
            value: value.to_string(),
        };
        diesel::replace_into(settings::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn all(&self) -> Result<HashMap<String, String>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let rows: Vec<SettingRow> = settings::table
            .load(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|r| (r.key, r.value)).collect())
    }
}
