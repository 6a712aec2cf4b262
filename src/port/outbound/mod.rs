//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the journal's infrastructure dependencies -
//! today that is storage only.

pub mod store;

pub use store::{JournalStore, SettingStore, StrategyStore, TradeStore};
