//! SQLite strategy store implementation.

use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::StrategyRow;
use crate::adapter::outbound::sqlite::database::schema::strategies;
use crate::domain::id::StrategyId;
use crate::domain::strategy::{MarketTag, Strategy};
use crate::error::{Result, StorageError};
use crate::port::outbound::store::StrategyStore;

/// SQLite-backed strategy store.
pub struct SqliteStrategyStore {
    pool: DbPool,
}

impl SqliteStrategyStore {
    /// Create a new SQLite strategy store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(strategy: &Strategy) -> StrategyRow {
        StrategyRow {
            id: strategy.id.to_string(),
            name: strategy.name.clone(),
            market: strategy.market.as_str().to_string(),
            styles: strategy.styles.join(","),
            timeframes: strategy.timeframes.join(","),
            description: strategy.description.clone(),
            checklist: strategy.checklist.clone(),
            image_ref: strategy.image_ref.clone(),
            created_at: strategy.created_at_ms,
            updated_at: strategy.updated_at_ms,
        }
    }

    fn from_row(row: StrategyRow) -> Strategy {
        Strategy {
            id: StrategyId::from(row.id),
            name: row.name,
            market: MarketTag::from_raw(&row.market),
            styles: split_list(&row.styles),
            timeframes: split_list(&row.timeframes),
            description: row.description,
            checklist: row.checklist,
            image_ref: row.image_ref,
            created_at_ms: row.created_at,
            updated_at_ms: row.updated_at,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl StrategyStore for SqliteStrategyStore {
    async fn upsert(&self, strategy: &Strategy) -> Result<()> {
        let row = Self::to_row(strategy);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        diesel::replace_into(strategies::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: &StrategyId) -> Result<Option<Strategy>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let row: Option<StrategyRow> = strategies::table
            .find(id.to_string())
            .first(&mut conn)
            .optional()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(row.map(Self::from_row))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Strategy>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let row: Option<StrategyRow> = strategies::table
            .filter(strategies::name.eq(name))
            .first(&mut conn)
            .optional()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(row.map(Self::from_row))
    }

    async fn list(&self) -> Result<Vec<Strategy>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let rows: Vec<StrategyRow> = strategies::table
            .order(strategies::created_at.desc())
            .load(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::from_row).collect())
    }

    async fn delete(&self, id: &StrategyId) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let deleted = diesel::delete(strategies::table.find(id.to_string()))
            .execute(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(deleted > 0)
    }
}
