//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! Provides in-memory implementations of every storage port plus a
//! controllable clock, so gate and entry flows can be exercised without
//! touching SQLite or the wall clock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::app::clock::Clock;
use crate::domain::day::{DayKey, DayWindow};
use crate::domain::id::{StrategyId, TradeId};
use crate::domain::plan::{DailyCloseout, DailyPlan, Mood};
use crate::domain::strategy::Strategy;
use crate::domain::trade::Trade;
use crate::error::Result;
use crate::port::outbound::store::{JournalStore, SettingStore, StrategyStore, TradeStore};

/// Deterministic clock pinned to an epoch-ms instant (UTC offset).
#[derive(Debug)]
pub struct TestClock {
    now_ms: AtomicI64,
}

impl TestClock {
    #[must_use]
    pub fn at(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    /// Move the clock forward (or backward with a negative delta).
    pub fn advance_ms(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc.timestamp_millis_opt(self.now_ms.load(Ordering::SeqCst))
            .single()
            .expect("epoch-ms timestamps are always representable")
            .fixed_offset()
    }
}

/// In-memory settings store.
#[derive(Debug, Default)]
pub struct InMemorySettingStore {
    values: RwLock<HashMap<String, String>>,
}

impl SettingStore for InMemorySettingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn all(&self) -> Result<HashMap<String, String>> {
        Ok(self.values.read().clone())
    }
}

/// In-memory trade store.
#[derive(Debug, Default)]
pub struct InMemoryTradeStore {
    trades: RwLock<Vec<Trade>>,
}

impl InMemoryTradeStore {
    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.read().is_empty()
    }

    /// Seed a bare trade at a given instant.
    pub async fn seed_trade(&self, created_at_ms: i64, result_r: Decimal) -> TradeId {
        let trade = Trade {
            id: TradeId::new(),
            created_at_ms,
            result_r,
            risk_r: None,
            session: String::new(),
            timeframe: String::new(),
            bias: String::new(),
            strategy_id: None,
            strategy_name: None,
            notes: String::new(),
            tags: Vec::new(),
            rule_breaks: Vec::new(),
        };
        let id = trade.id.clone();
        self.insert(&trade).await.expect("in-memory insert");
        id
    }
}

impl TradeStore for InMemoryTradeStore {
    async fn insert(&self, trade: &Trade) -> Result<()> {
        self.trades.write().push(trade.clone());
        Ok(())
    }

    async fn get(&self, id: &TradeId) -> Result<Option<Trade>> {
        Ok(self.trades.read().iter().find(|t| &t.id == id).cloned())
    }

    async fn delete(&self, id: &TradeId) -> Result<bool> {
        let mut trades = self.trades.write();
        let before = trades.len();
        trades.retain(|t| &t.id != id);
        Ok(trades.len() < before)
    }

    async fn update_annotations(&self, trade: &Trade) -> Result<bool> {
        let mut trades = self.trades.write();
        match trades.iter_mut().find(|t| t.id == trade.id) {
            Some(existing) => {
                existing.tags = trade.tags.clone();
                existing.rule_breaks = trade.rule_breaks.clone();
                existing.notes = trade.notes.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_window(&self, window: &DayWindow) -> Result<Vec<Trade>> {
        let mut trades: Vec<Trade> = self
            .trades
            .read()
            .iter()
            .filter(|t| window.contains(t.created_at_ms))
            .cloned()
            .collect();
        trades.sort_by_key(|t| std::cmp::Reverse(t.created_at_ms));
        Ok(trades)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Trade>> {
        let mut trades: Vec<Trade> = self.trades.read().clone();
        trades.sort_by_key(|t| std::cmp::Reverse(t.created_at_ms));
        trades.truncate(limit.max(0) as usize);
        Ok(trades)
    }
}

/// In-memory plan/closeout store.
#[derive(Debug, Default)]
pub struct InMemoryJournalStore {
    plans: RwLock<HashMap<DayKey, DailyPlan>>,
    closeouts: RwLock<HashMap<DayKey, DailyCloseout>>,
}

impl InMemoryJournalStore {
    /// Seed today's plan and yesterday's closeout so no soft warnings fire.
    pub async fn seed_today_and_yesterday(&self, now: &DateTime<FixedOffset>) {
        let today = DayKey::from_datetime(now);
        let plan = DailyPlan {
            day: today,
            bias: "seeded".to_string(),
            news_caution: false,
            key_levels: String::new(),
            scenarios: String::new(),
            created_at_ms: now.timestamp_millis(),
        };
        let closeout = DailyCloseout {
            day: today.prev(),
            mood: Mood::try_new(3).expect("3 is in range"),
            grade: "B".to_string(),
            review: String::new(),
            created_at_ms: now.timestamp_millis(),
        };
        self.upsert_plan(&plan).await.expect("in-memory upsert");
        self.upsert_closeout(&closeout)
            .await
            .expect("in-memory upsert");
    }
}

impl JournalStore for InMemoryJournalStore {
    async fn upsert_plan(&self, plan: &DailyPlan) -> Result<()> {
        self.plans.write().insert(plan.day, plan.clone());
        Ok(())
    }

    async fn plan(&self, day: &DayKey) -> Result<Option<DailyPlan>> {
        Ok(self.plans.read().get(day).cloned())
    }

    async fn has_plan(&self, day: &DayKey) -> Result<bool> {
        Ok(self.plans.read().contains_key(day))
    }

    async fn upsert_closeout(&self, closeout: &DailyCloseout) -> Result<()> {
        self.closeouts
            .write()
            .insert(closeout.day, closeout.clone());
        Ok(())
    }

    async fn closeout(&self, day: &DayKey) -> Result<Option<DailyCloseout>> {
        Ok(self.closeouts.read().get(day).cloned())
    }

    async fn has_closeout(&self, day: &DayKey) -> Result<bool> {
        Ok(self.closeouts.read().contains_key(day))
    }
}

/// In-memory strategy store.
#[derive(Debug, Default)]
pub struct InMemoryStrategyStore {
    strategies: RwLock<Vec<Strategy>>,
}

impl InMemoryStrategyStore {
    /// Seed an existing strategy.
    pub async fn seed(&self, strategy: Strategy) {
        self.upsert(&strategy).await.expect("in-memory upsert");
    }
}

impl StrategyStore for InMemoryStrategyStore {
    async fn upsert(&self, strategy: &Strategy) -> Result<()> {
        let mut strategies = self.strategies.write();
        strategies.retain(|s| s.id != strategy.id);
        strategies.push(strategy.clone());
        Ok(())
    }

    async fn get(&self, id: &StrategyId) -> Result<Option<Strategy>> {
        Ok(self.strategies.read().iter().find(|s| &s.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Strategy>> {
        Ok(self
            .strategies
            .read()
            .iter()
            .find(|s| s.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Strategy>> {
        let mut strategies = self.strategies.read().clone();
        strategies.sort_by_key(|s| std::cmp::Reverse(s.created_at_ms));
        Ok(strategies)
    }

    async fn delete(&self, id: &StrategyId) -> Result<bool> {
        let mut strategies = self.strategies.write();
        let before = strategies.len();
        strategies.retain(|s| &s.id != id);
        Ok(strategies.len() < before)
    }
}

/// Convenience alias used across service tests.
pub type SharedTestClock = Arc<TestClock>;
