//! Journal domain: models and the discipline-gate decision logic.

pub mod day;
pub mod error;
pub mod gate;
pub mod id;
pub mod plan;
pub mod rulebreak;
pub mod settings;
pub mod stats;
pub mod strategy;
pub mod trade;

// Core domain types
pub use day::{DayKey, DayWindow};
pub use gate::{evaluate, GateDecision, Requirements};
pub use id::{StrategyId, TradeId};
pub use plan::{DailyCloseout, DailyPlan, Mood};
pub use rulebreak::RuleBreak;
pub use settings::{AppMode, GateSettings};
pub use stats::DayStats;
pub use strategy::{MarketTag, Strategy};
pub use trade::Trade;
