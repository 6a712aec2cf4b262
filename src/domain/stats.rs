//! Per-day trade aggregation.
//!
//! Aggregates are recomputed from the day's trades on every evaluation;
//! nothing here is cached or maintained incrementally.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::trade::Trade;

/// The losing-streak scan only looks at the most recent trades of the day,
/// so an arbitrarily long history cannot degrade the lookback cost.
pub const STREAK_SCAN_CAP: usize = 50;

/// Aggregate statistics for one local calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub trade_count: u32,
    /// Arithmetic sum of the day's R-multiples.
    pub sum_r: Decimal,
    /// Run length of most-recent trades with `result_r < 0`.
    pub consecutive_losses: u32,
    pub wins: u32,
    /// `wins / trade_count`; 0 when the day has no trades.
    pub win_rate: f64,
    /// `sum_r / trade_count`; 0 when the day has no trades.
    pub avg_r: Decimal,
}

impl DayStats {
    /// Compute stats over one day's trades, ordered newest first.
    #[must_use]
    pub fn from_trades(trades: &[Trade]) -> Self {
        let trade_count = trades.len() as u32;
        let sum_r: Decimal = trades.iter().map(|t| t.result_r).sum();
        let wins = trades.iter().filter(|t| t.is_win()).count() as u32;

        let consecutive_losses = trades
            .iter()
            .take(STREAK_SCAN_CAP)
            .take_while(|t| t.is_loss())
            .count() as u32;

        let (win_rate, avg_r) = if trade_count == 0 {
            (0.0, Decimal::ZERO)
        } else {
            (
                f64::from(wins) / f64::from(trade_count),
                sum_r / Decimal::from(trade_count),
            )
        };

        Self {
            trade_count,
            sum_r,
            consecutive_losses,
            wins,
            win_rate,
            avg_r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::TradeId;
    use rust_decimal_macros::dec;

    fn trade(result_r: Decimal) -> Trade {
        Trade {
            id: TradeId::new(),
            created_at_ms: 0,
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
        }
    }

    fn trades(rs: &[Decimal]) -> Vec<Trade> {
        rs.iter().copied().map(trade).collect()
    }

    #[test]
    fn empty_day_is_all_zeros_not_nan() {
        let stats = DayStats::from_trades(&[]);
        assert_eq!(stats, DayStats::default());
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.avg_r, Decimal::ZERO);
    }

    #[test]
    fn sums_and_rates_over_a_mixed_day() {
        // Newest first: loss, win, breakeven, win.
        let stats = DayStats::from_trades(&trades(&[dec!(-1), dec!(2), dec!(0), dec!(0.5)]));
        assert_eq!(stats.trade_count, 4);
        assert_eq!(stats.sum_r, dec!(1.5));
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.win_rate, 0.5);
        assert_eq!(stats.avg_r, dec!(0.375));
    }

    #[test]
    fn streak_counts_most_recent_losses_only() {
        // Newest first: two losses, then a win, then another loss.
        let stats = DayStats::from_trades(&trades(&[dec!(-0.5), dec!(-1), dec!(1), dec!(-1)]));
        assert_eq!(stats.consecutive_losses, 2);
    }

    #[test]
    fn streak_stops_at_breakeven() {
        // Zero is a non-loss; it terminates the run.
        let stats = DayStats::from_trades(&trades(&[dec!(-1), dec!(0), dec!(-1)]));
        assert_eq!(stats.consecutive_losses, 1);
    }

    #[test]
    fn a_new_win_resets_the_streak() {
        let stats = DayStats::from_trades(&trades(&[dec!(1), dec!(-1), dec!(-1)]));
        assert_eq!(stats.consecutive_losses, 0);
    }

    #[test]
    fn streak_scan_is_capped() {
        let all_losses: Vec<Decimal> = std::iter::repeat(dec!(-0.1)).take(80).collect();
        let stats = DayStats::from_trades(&trades(&all_losses));
        assert_eq!(stats.trade_count, 80);
        assert_eq!(stats.consecutive_losses, STREAK_SCAN_CAP as u32);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let day = trades(&[dec!(-1), dec!(2), dec!(-0.5)]);
        assert_eq!(DayStats::from_trades(&day), DayStats::from_trades(&day));
    }
}
