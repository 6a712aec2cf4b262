//! Database model types for Diesel ORM.
//!
//! All decimals are stored as their canonical string form so R-multiple
//! comparisons stay exact through a round trip; timestamps are epoch ms.

use diesel::prelude::*;

use super::schema::{daily_closeouts, daily_plans, settings, strategies, trades};

/// Database row for a settings entry.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SettingRow {
    pub key: String,
    pub value: String,
}

/// Database row for a trade.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeRow {
    pub id: String,
    pub created_at: i64,
    pub result_r: String,
    pub risk_r: Option<String>,
    pub session: String,
    pub timeframe: String,
    pub bias: String,
    pub strategy_id: Option<String>,
    pub strategy_name: Option<String>,
    pub notes: String,
    pub tags: String,
    pub rule_breaks: String,
}

/// Database row for a daily plan.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = daily_plans)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DailyPlanRow {
    pub day: String,
    pub bias: String,
    pub news_caution: i32,
    pub key_levels: String,
    pub scenarios: String,
    pub created_at: i64,
}

/// Database row for a daily closeout.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = daily_closeouts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DailyCloseoutRow {
    pub day: String,
    pub mood: i32,
    pub grade: String,
    pub review: String,
    pub created_at: i64,
}

/// Database row for a strategy.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = strategies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StrategyRow {
    pub id: String,
    pub name: String,
    pub market: String,
    pub styles: String,
    pub timeframes: String,
    pub description: String,
    pub checklist: String,
    pub image_ref: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
