//! End-to-end gate behavior over real SQLite stores.
//!
//! Exercises the discipline gate the way the CLI does - SQLite-backed
//! stores, fresh reads per evaluation - but with a controllable clock.

use std::sync::Arc;

use chrono::TimeZone;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use tiltguard::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use tiltguard::adapter::outbound::sqlite::{
    SqliteJournalStore, SqliteSettingStore, SqliteStrategyStore, SqliteTradeStore,
};
use tiltguard::app::entry::{EntryOutcome, EntryService, TradeDraft};
use tiltguard::app::gate::{GateService, OverrideOutcome, OVERRIDE_COOLDOWN_MS, OVERRIDE_WINDOW_MS};
use tiltguard::domain::id::TradeId;
use tiltguard::domain::plan::{DailyCloseout, DailyPlan, Mood};
use tiltguard::domain::rulebreak::RuleBreak;
use tiltguard::domain::settings::keys;
use tiltguard::domain::trade::Trade;
use tiltguard::port::outbound::store::{JournalStore, SettingStore, TradeStore};
use tiltguard::testkit::TestClock;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// 2026-08-07 15:00:00 UTC - a mid-day instant, so nearby offsets stay on
/// the same calendar day.
fn noonish_ms() -> i64 {
    chrono::Utc
        .with_ymd_and_hms(2026, 8, 7, 15, 0, 0)
        .unwrap()
        .timestamp_millis()
}

struct Harness {
    _dir: TempDir,
    settings: Arc<SqliteSettingStore>,
    trades: Arc<SqliteTradeStore>,
    journal: Arc<SqliteJournalStore>,
    strategies: Arc<SqliteStrategyStore>,
    clock: Arc<TestClock>,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("gate.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("pool");
        run_migrations(&pool).expect("migrations");

        Self {
            _dir: dir,
            settings: Arc::new(SqliteSettingStore::new(pool.clone())),
            trades: Arc::new(SqliteTradeStore::new(pool.clone())),
            journal: Arc::new(SqliteJournalStore::new(pool.clone())),
            strategies: Arc::new(SqliteStrategyStore::new(pool)),
            clock: Arc::new(TestClock::at(noonish_ms())),
        }
    }

    fn gate(
        &self,
    ) -> GateService<SqliteSettingStore, SqliteTradeStore, SqliteJournalStore, TestClock> {
        GateService::new(
            Arc::clone(&self.settings),
            Arc::clone(&self.trades),
            Arc::clone(&self.journal),
            Arc::clone(&self.clock),
        )
    }

    fn entry(
        &self,
    ) -> EntryService<
        SqliteSettingStore,
        SqliteTradeStore,
        SqliteJournalStore,
        SqliteStrategyStore,
        TestClock,
    > {
        EntryService::new(
            self.gate(),
            Arc::clone(&self.trades),
            Arc::clone(&self.strategies),
            Arc::clone(&self.clock),
        )
    }

    async fn set_settings(&self, pairs: &[(&str, &str)]) {
        for (key, value) in pairs {
            self.settings.set(key, value).await.expect("set setting");
        }
    }

    /// Insert a bare trade `minutes_ago` relative to the harness clock.
    async fn seed_trade(&self, minutes_ago: i64, result_r: Decimal) -> TradeId {
        let trade = Trade {
            id: TradeId::new(),
            created_at_ms: noonish_ms() - minutes_ago * 60_000,
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
        self.trades.insert(&trade).await.expect("insert trade");
        id
    }

    async fn seed_plan_and_closeout(&self) {
        let now = tiltguard::app::clock::Clock::now(&*self.clock);
        let today = tiltguard::domain::day::DayKey::from_datetime(&now);
        self.journal
            .upsert_plan(&DailyPlan {
                day: today,
                bias: "long".into(),
                news_caution: false,
                key_levels: String::new(),
                scenarios: String::new(),
                created_at_ms: now.timestamp_millis(),
            })
            .await
            .expect("plan");
        self.journal
            .upsert_closeout(&DailyCloseout {
                day: today.prev(),
                mood: Mood::try_new(3).unwrap(),
                grade: "B".into(),
                review: String::new(),
                created_at_ms: now.timestamp_millis(),
            })
            .await
            .expect("closeout");
    }
}

// ---------------------------------------------------------------------------
// Property 1: demo bypass
// ---------------------------------------------------------------------------

#[tokio::test]
async fn demo_mode_is_fully_permitted_no_matter_what() {
    let h = Harness::new();
    // No mode setting at all: default is demo. Blow through every limit.
    for i in 0..5 {
        h.seed_trade(i + 1, dec!(-2)).await;
    }

    let decision = h.gate().evaluate().await.unwrap();
    assert!(decision.can_trade);
    assert!(decision.reasons.is_empty());
    assert!(decision.soft_warnings.is_empty());
    assert!(!decision.override_active);
    // Stats still flow through for display.
    assert_eq!(decision.stats.trade_count, 5);
    assert_eq!(decision.stats.sum_r, dec!(-10));
}

// ---------------------------------------------------------------------------
// Property 2: trade-count limit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn trade_count_limit_locks_and_deleting_unlocks() {
    let h = Harness::new();
    h.set_settings(&[
        (keys::APP_MODE, "real"),
        (keys::REQUIRE_DAILY_PLAN, "0"),
        (keys::REQUIRE_DAILY_CLOSEOUT, "0"),
    ])
    .await;

    h.seed_trade(30, dec!(1)).await;
    h.seed_trade(20, dec!(1)).await;
    let last = h.seed_trade(10, dec!(1)).await;

    let decision = h.gate().evaluate().await.unwrap();
    assert!(!decision.can_trade);
    assert!(decision.reasons.iter().any(|r| r.contains("max trades")));

    h.trades.delete(&last).await.unwrap();
    let decision = h.gate().evaluate().await.unwrap();
    assert!(decision.can_trade);
}

// ---------------------------------------------------------------------------
// Property 3: loss limit boundary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn loss_limit_boundary_is_inclusive() {
    let h = Harness::new();
    h.set_settings(&[
        (keys::APP_MODE, "real"),
        (keys::REQUIRE_DAILY_PLAN, "0"),
        (keys::REQUIRE_DAILY_CLOSEOUT, "0"),
        // Isolate the loss rule.
        (keys::MAX_TRADES_PER_DAY, "0"),
        (keys::MAX_CONSECUTIVE_LOSSES, "0"),
    ])
    .await;

    // Exactly on the limit: -2.0 with maxDailyLossR=2 blocks.
    h.seed_trade(30, dec!(-0.5)).await;
    let on_boundary = h.seed_trade(20, dec!(-1.5)).await;
    let decision = h.gate().evaluate().await.unwrap();
    assert_eq!(decision.stats.sum_r, dec!(-2.0));
    assert!(!decision.can_trade);
    assert!(decision.reasons.iter().any(|r| r.contains("loss limit")));

    // One cent short of the limit stays open.
    h.trades.delete(&on_boundary).await.unwrap();
    h.seed_trade(10, dec!(-1.49)).await;
    let decision = h.gate().evaluate().await.unwrap();
    assert_eq!(decision.stats.sum_r, dec!(-1.99));
    assert!(decision.can_trade);
}

// ---------------------------------------------------------------------------
// Property 4: consecutive-loss streak
// ---------------------------------------------------------------------------

#[tokio::test]
async fn losing_streak_locks_and_a_win_resets_it() {
    let h = Harness::new();
    h.set_settings(&[
        (keys::APP_MODE, "real"),
        (keys::REQUIRE_DAILY_PLAN, "0"),
        (keys::REQUIRE_DAILY_CLOSEOUT, "0"),
        (keys::MAX_TRADES_PER_DAY, "0"),
        (keys::MAX_DAILY_LOSS_R, "0"),
    ])
    .await;

    // Chronological: win, loss, loss.
    h.seed_trade(30, dec!(1)).await;
    h.seed_trade(20, dec!(-0.5)).await;
    h.seed_trade(10, dec!(-0.5)).await;

    let decision = h.gate().evaluate().await.unwrap();
    assert_eq!(decision.stats.consecutive_losses, 2);
    assert!(!decision.can_trade);

    // A new win resets the streak going forward.
    h.seed_trade(5, dec!(2)).await;
    let decision = h.gate().evaluate().await.unwrap();
    assert_eq!(decision.stats.consecutive_losses, 0);
    assert!(decision.can_trade);
}

// ---------------------------------------------------------------------------
// Property 5: override bypass + cooldown
// ---------------------------------------------------------------------------

#[tokio::test]
async fn override_bypasses_for_an_hour_and_cooldown_outlives_it() {
    let h = Harness::new();
    h.set_settings(&[
        (keys::APP_MODE, "real"),
        (keys::REQUIRE_DAILY_PLAN, "0"),
        (keys::REQUIRE_DAILY_CLOSEOUT, "0"),
    ])
    .await;

    // Lock the day on trade count.
    for i in 0..3 {
        h.seed_trade(i + 1, dec!(0.1)).await;
    }
    let gate = h.gate();
    assert!(!gate.evaluate().await.unwrap().can_trade);

    // Activation bypasses the lock.
    let outcome = gate.activate_override().await.unwrap();
    assert_eq!(
        outcome,
        OverrideOutcome::Activated {
            until_ms: noonish_ms() + OVERRIDE_WINDOW_MS,
            cooldown_until_ms: noonish_ms() + OVERRIDE_COOLDOWN_MS,
        }
    );
    let decision = gate.evaluate().await.unwrap();
    assert!(decision.override_active);
    assert!(decision.can_trade);

    // At +2h the override has expired but activation is still refused.
    h.clock.advance_ms(2 * HOUR_MS);
    let decision = gate.evaluate().await.unwrap();
    assert!(!decision.override_active);
    assert!(!decision.can_trade);
    assert_eq!(
        gate.activate_override().await.unwrap(),
        OverrideOutcome::CooldownActive {
            until_ms: noonish_ms() + OVERRIDE_COOLDOWN_MS,
        }
    );

    // Past +24h (from activation) it is available again.
    h.clock.advance_ms(OVERRIDE_COOLDOWN_MS - 2 * HOUR_MS);
    assert!(matches!(
        gate.activate_override().await.unwrap(),
        OverrideOutcome::Activated { .. }
    ));
}

// ---------------------------------------------------------------------------
// Property 6: soft warnings never block
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_plan_warns_without_blocking() {
    let h = Harness::new();
    h.set_settings(&[(keys::APP_MODE, "real")]).await;

    let decision = h.gate().evaluate().await.unwrap();
    assert!(decision.can_trade);
    assert_eq!(
        decision.soft_warnings,
        vec![RuleBreak::PlanMissing, RuleBreak::CloseoutMissing]
    );

    // Writing today's plan and yesterday's closeout clears both.
    h.seed_plan_and_closeout().await;
    let decision = h.gate().evaluate().await.unwrap();
    assert!(decision.soft_warnings.is_empty());
    assert!(decision.requirements.plan_done);
    assert!(decision.requirements.closeout_done);
}

#[tokio::test]
async fn entry_flow_stamps_acknowledged_warnings_and_override_use() {
    let h = Harness::new();
    h.set_settings(&[(keys::APP_MODE, "real")]).await;
    let entry = h.entry();

    // Unacknowledged warnings hold the trade back.
    let outcome = entry
        .record(
            TradeDraft {
                result_r: dec!(-0.5),
                ..TradeDraft::default()
            },
            false,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, EntryOutcome::WarningsPending(_)));

    // Acknowledged, the warnings land on the trade as rule breaks.
    let outcome = entry
        .record(
            TradeDraft {
                result_r: dec!(-0.5),
                tags: "fomo".into(),
                ..TradeDraft::default()
            },
            true,
        )
        .await
        .unwrap();
    let EntryOutcome::Recorded { trade, .. } = outcome else {
        panic!("expected Recorded, got {outcome:?}");
    };
    assert_eq!(
        trade.rule_breaks,
        vec![RuleBreak::PlanMissing, RuleBreak::CloseoutMissing]
    );
    assert_eq!(trade.tags, vec!["FOMO"]);

    // Lock the day, override, and the next entry carries OVERRIDE_USED.
    h.seed_trade(40, dec!(0.1)).await;
    h.seed_trade(50, dec!(0.1)).await;
    let gate = h.gate();
    assert!(!gate.evaluate().await.unwrap().can_trade);
    gate.activate_override().await.unwrap();

    let outcome = entry
        .record(
            TradeDraft {
                result_r: dec!(1),
                ..TradeDraft::default()
            },
            true,
        )
        .await
        .unwrap();
    let EntryOutcome::Recorded { trade, .. } = outcome else {
        panic!("expected Recorded, got {outcome:?}");
    };
    assert!(trade.rule_breaks.contains(&RuleBreak::OverrideUsed));
}

#[tokio::test]
async fn hard_lock_refuses_the_entry_outright() {
    let h = Harness::new();
    h.set_settings(&[
        (keys::APP_MODE, "real"),
        (keys::REQUIRE_DAILY_PLAN, "0"),
        (keys::REQUIRE_DAILY_CLOSEOUT, "0"),
        (keys::MAX_TRADES_PER_DAY, "1"),
    ])
    .await;
    h.seed_trade(10, dec!(1)).await;

    let outcome = h
        .entry()
        .record(
            TradeDraft {
                result_r: dec!(1),
                ..TradeDraft::default()
            },
            true,
        )
        .await
        .unwrap();
    let EntryOutcome::Blocked(decision) = outcome else {
        panic!("expected Blocked, got {outcome:?}");
    };
    assert!(!decision.can_trade);
    assert_eq!(h.trades.list_recent(10).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Property 7: idempotent aggregation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn evaluation_is_idempotent_without_intervening_writes() {
    let h = Harness::new();
    h.set_settings(&[(keys::APP_MODE, "real")]).await;
    h.seed_trade(30, dec!(1.5)).await;
    h.seed_trade(20, dec!(-0.25)).await;
    h.seed_trade(10, dec!(-0.25)).await;

    let gate = h.gate();
    let first = gate.evaluate().await.unwrap();
    let second = gate.evaluate().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.stats.sum_r, dec!(1.0));
    assert_eq!(first.stats.consecutive_losses, 2);
}

// ---------------------------------------------------------------------------
// Yesterday boundary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn closeout_check_looks_at_yesterday_not_today() {
    let h = Harness::new();
    h.set_settings(&[(keys::APP_MODE, "real"), (keys::REQUIRE_DAILY_PLAN, "0")])
        .await;

    // A closeout for *today* does not satisfy the check.
    let now = tiltguard::app::clock::Clock::now(&*h.clock);
    let today = tiltguard::domain::day::DayKey::from_datetime(&now);
    h.journal
        .upsert_closeout(&DailyCloseout {
            day: today,
            mood: Mood::try_new(3).unwrap(),
            grade: String::new(),
            review: String::new(),
            created_at_ms: 0,
        })
        .await
        .unwrap();
    let decision = h.gate().evaluate().await.unwrap();
    assert_eq!(decision.soft_warnings, vec![RuleBreak::CloseoutMissing]);

    // Yesterday's does.
    h.journal
        .upsert_closeout(&DailyCloseout {
            day: today.prev(),
            mood: Mood::try_new(3).unwrap(),
            grade: String::new(),
            review: String::new(),
            created_at_ms: 0,
        })
        .await
        .unwrap();
    let decision = h.gate().evaluate().await.unwrap();
    assert!(decision.soft_warnings.is_empty());
}
