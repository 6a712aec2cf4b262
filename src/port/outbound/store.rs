//! Persistence ports for the journal.

use std::collections::HashMap;
use std::future::Future;

use crate::domain::day::{DayKey, DayWindow};
use crate::domain::id::{StrategyId, TradeId};
use crate::domain::plan::{DailyCloseout, DailyPlan};
use crate::domain::strategy::Strategy;
use crate::domain::trade::Trade;
use crate::error::Result;

/// Key/value settings persistence.
///
/// Values are raw strings; typed parsing happens in
/// [`crate::domain::settings`]. Callers re-read on every evaluation, so
/// implementations must not cache.
pub trait SettingStore: Send + Sync {
    /// Get one setting value, `None` if never written.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Upsert one setting value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    /// Snapshot of all settings.
    fn all(&self) -> impl Future<Output = Result<HashMap<String, String>>> + Send;
}

/// Storage operations for trades.
pub trait TradeStore: Send + Sync {
    /// Insert a new trade.
    fn insert(&self, trade: &Trade) -> impl Future<Output = Result<()>> + Send;

    /// Get a trade by ID.
    fn get(&self, id: &TradeId) -> impl Future<Output = Result<Option<Trade>>> + Send;

    /// Delete a trade by ID (hard delete).
    fn delete(&self, id: &TradeId) -> impl Future<Output = Result<bool>> + Send;

    /// Persist post-creation mutations: tags, rule breaks, notes.
    fn update_annotations(&self, trade: &Trade) -> impl Future<Output = Result<bool>> + Send;

    /// All trades created within the window, newest first.
    fn list_window(&self, window: &DayWindow) -> impl Future<Output = Result<Vec<Trade>>> + Send;

    /// The most recent trades across all days, newest first.
    fn list_recent(&self, limit: i64) -> impl Future<Output = Result<Vec<Trade>>> + Send;
}

/// Storage operations for daily plans and closeouts.
pub trait JournalStore: Send + Sync {
    /// Save a plan, replacing any existing row for its day.
    fn upsert_plan(&self, plan: &DailyPlan) -> impl Future<Output = Result<()>> + Send;

    /// Get the plan for a day.
    fn plan(&self, day: &DayKey) -> impl Future<Output = Result<Option<DailyPlan>>> + Send;

    /// Whether a plan exists for a day.
    fn has_plan(&self, day: &DayKey) -> impl Future<Output = Result<bool>> + Send;

    /// Save a closeout, replacing any existing row for its day.
    fn upsert_closeout(&self, closeout: &DailyCloseout)
        -> impl Future<Output = Result<()>> + Send;

    /// Get the closeout for a day.
    fn closeout(&self, day: &DayKey)
        -> impl Future<Output = Result<Option<DailyCloseout>>> + Send;

    /// Whether a closeout exists for a day.
    fn has_closeout(&self, day: &DayKey) -> impl Future<Output = Result<bool>> + Send;
}

/// Storage operations for strategies.
pub trait StrategyStore: Send + Sync {
    /// Save a strategy, replacing if it exists.
    fn upsert(&self, strategy: &Strategy) -> impl Future<Output = Result<()>> + Send;

    /// Get a strategy by ID.
    fn get(&self, id: &StrategyId) -> impl Future<Output = Result<Option<Strategy>>> + Send;

    /// Find a strategy by exact name.
    fn find_by_name(&self, name: &str)
        -> impl Future<Output = Result<Option<Strategy>>> + Send;

    /// List all strategies, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<Strategy>>> + Send;

    /// Delete a strategy by ID. Trades keep their denormalized name.
    fn delete(&self, id: &StrategyId) -> impl Future<Output = Result<bool>> + Send;
}
