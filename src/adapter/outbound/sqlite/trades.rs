//! SQLite trade store implementation.

use std::str::FromStr;

use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::TradeRow;
use crate::adapter::outbound::sqlite::database::schema::trades;
use crate::domain::day::DayWindow;
use crate::domain::id::{StrategyId, TradeId};
use crate::domain::rulebreak::RuleBreak;
use crate::domain::trade::{format_tags, parse_tags, Trade};
use crate::error::{Error, Result, StorageError};
use crate::port::outbound::store::TradeStore;

/// SQLite-backed trade store.
pub struct SqliteTradeStore {
    pool: DbPool,
}

impl SqliteTradeStore {
    /// Create a new SQLite trade store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(trade: &Trade) -> TradeRow {
        TradeRow {
            id: trade.id.to_string(),
            created_at: trade.created_at_ms,
            result_r: trade.result_r.to_string(),
            risk_r: trade.risk_r.map(|r| r.to_string()),
            session: trade.session.clone(),
            timeframe: trade.timeframe.clone(),
            bias: trade.bias.clone(),
            strategy_id: trade.strategy_id.as_ref().map(ToString::to_string),
            strategy_name: trade.strategy_name.clone(),
            notes: trade.notes.clone(),
            tags: format_tags(&trade.tags),
            rule_breaks: RuleBreak::format_list(&trade.rule_breaks),
        }
    }

    fn from_row(row: TradeRow) -> Result<Trade> {
        let result_r = Decimal::from_str(&row.result_r)
            .map_err(|e| Error::Parse(format!("result_r {:?}: {e}", row.result_r)))?;
        let risk_r = row
            .risk_r
            .as_deref()
            .map(|raw| {
                Decimal::from_str(raw).map_err(|e| Error::Parse(format!("risk_r {raw:?}: {e}")))
            })
            .transpose()?;

        Ok(Trade {
            id: TradeId::from(row.id),
            created_at_ms: row.created_at,
            result_r,
            risk_r,
            session: row.session,
            timeframe: row.timeframe,
            bias: row.bias,
            strategy_id: row.strategy_id.map(StrategyId::from),
            strategy_name: row.strategy_name,
            notes: row.notes,
            tags: parse_tags(&row.tags),
            rule_breaks: RuleBreak::parse_list(&row.rule_breaks),
        })
    }
}

impl TradeStore for SqliteTradeStore {
    async fn insert(&self, trade: &Trade) -> Result<()> {
        let row = Self::to_row(trade);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        diesel::insert_into(trades::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: &TradeId) -> Result<Option<Trade>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let row: Option<TradeRow> = trades::table
            .find(id.to_string())
            .first(&mut conn)
            .optional()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn delete(&self, id: &TradeId) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let deleted = diesel::delete(trades::table.find(id.to_string()))
            .execute(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(deleted > 0)
    }

    async fn update_annotations(&self, trade: &Trade) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let updated = diesel::update(trades::table.find(trade.id.to_string()))
            .set((
                trades::tags.eq(format_tags(&trade.tags)),
                trades::rule_breaks.eq(RuleBreak::format_list(&trade.rule_breaks)),
                trades::notes.eq(&trade.notes),
            ))
            .execute(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(updated > 0)
    }

    async fn list_window(&self, window: &DayWindow) -> Result<Vec<Trade>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let rows: Vec<TradeRow> = trades::table
            .filter(trades::created_at.ge(window.start_ms))
            .filter(trades::created_at.lt(window.end_ms))
            .order(trades::created_at.desc())
            .load(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Trade>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let rows: Vec<TradeRow> = trades::table
            .order(trades::created_at.desc())
            .limit(limit)
            .load(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }
}
