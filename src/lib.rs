//! Tiltguard - a trading-discipline journal with a rule-enforcement gate.
//!
//! This crate lets a discretionary trader log trades, strategies, daily
//! plans, and daily closeouts into a local SQLite database, and decides on
//! every evaluation whether trading is still permitted today.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - **`domain`** - pure types and decision logic, no I/O
//!   - `gate` - the discipline gate: settings + daily stats -> decision
//!   - `stats` - per-day trade aggregation (R sum, losing streak, win rate)
//!   - `rulebreak` - closed rule-break code set with legacy normalization
//! - **`port`** - trait contracts the core depends on (storage)
//! - **`adapter`** - SQLite persistence (outbound) and the CLI (inbound)
//! - **`app`** - services wiring domain logic to live collaborators
//!
//! # Modules
//!
//! - [`config`] - TOML configuration loading with per-field defaults
//! - [`domain`] - journal models and the gate state machine
//! - [`error`] - error types for the crate
//! - [`port`] - storage trait definitions
//! - [`adapter`] - SQLite stores and the clap CLI
//! - [`app`] - gate evaluation, override lifecycle, trade-entry flow
//!
//! # Example
//!
//! ```no_run
//! use tiltguard::domain::gate::{evaluate, Requirements};
//! use tiltguard::domain::settings::GateSettings;
//! use tiltguard::domain::stats::DayStats;
//!
//! let decision = evaluate(
//!     &GateSettings::default(),
//!     &DayStats::default(),
//!     Requirements { plan_done: true, closeout_done: true },
//!     0,
//! );
//! assert!(decision.can_trade);
//! ```

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
