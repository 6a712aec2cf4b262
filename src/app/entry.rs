//! Trade-entry flow.
//!
//! Entry re-evaluates the gate at submission time, enforces the hard lock,
//! and translates "soft warning present + trader proceeded anyway" into
//! rule-break stamps on the persisted trade. The gate itself never writes
//! anything; this flow is the only writer of automatic rule breaks.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::app::clock::Clock;
use crate::app::gate::GateService;
use crate::domain::error::DomainError;
use crate::domain::gate::GateDecision;
use crate::domain::id::TradeId;
use crate::domain::rulebreak::RuleBreak;
use crate::domain::trade::{parse_tags, Trade};
use crate::error::Result;
use crate::port::outbound::store::{JournalStore, SettingStore, StrategyStore, TradeStore};

/// What the trader submits; everything else is derived at entry.
#[derive(Debug, Clone, Default)]
pub struct TradeDraft {
    pub result_r: Decimal,
    pub risk_r: Option<Decimal>,
    pub session: String,
    pub timeframe: String,
    pub bias: String,
    /// Strategy reference by id or exact name.
    pub strategy: Option<String>,
    pub notes: String,
    /// Raw comma-separated tag input.
    pub tags: String,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    /// The trade was persisted.
    Recorded {
        trade: Trade,
        decision: GateDecision,
    },
    /// Hard-locked; nothing was inserted.
    Blocked(GateDecision),
    /// Soft warnings are present and the trader has not acknowledged them;
    /// nothing was inserted.
    WarningsPending(GateDecision),
}

/// Records trades behind the gate.
pub struct EntryService<S, T, J, R, C> {
    gate: GateService<S, T, J, C>,
    trades: Arc<T>,
    strategies: Arc<R>,
    clock: Arc<C>,
}

impl<S, T, J, R, C> EntryService<S, T, J, R, C>
where
    S: SettingStore,
    T: TradeStore,
    J: JournalStore,
    R: StrategyStore,
    C: Clock,
{
    pub fn new(
        gate: GateService<S, T, J, C>,
        trades: Arc<T>,
        strategies: Arc<R>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            gate,
            trades,
            strategies,
            clock,
        }
    }

    /// Submit a trade.
    ///
    /// `acknowledged` means the trader has already seen the current soft
    /// warnings and chosen to proceed; the warnings are then stamped onto
    /// the trade as rule breaks.
    pub async fn record(&self, draft: TradeDraft, acknowledged: bool) -> Result<EntryOutcome> {
        let decision = self.gate.evaluate().await?;

        if decision.is_locked() {
            info!(reasons = ?decision.reasons, "trade blocked by gate");
            return Ok(EntryOutcome::Blocked(decision));
        }
        if !decision.soft_warnings.is_empty() && !acknowledged {
            return Ok(EntryOutcome::WarningsPending(decision));
        }

        let (strategy_id, strategy_name) = match &draft.strategy {
            Some(reference) => {
                let strategy = self.resolve_strategy(reference).await?;
                (Some(strategy.id), Some(strategy.name))
            }
            None => (None, None),
        };

        let mut trade = Trade {
            id: TradeId::new(),
            created_at_ms: self.clock.now_ms(),
            result_r: draft.result_r,
            risk_r: draft.risk_r,
            session: draft.session,
            timeframe: draft.timeframe,
            bias: draft.bias,
            strategy_id,
            strategy_name,
            notes: draft.notes,
            tags: parse_tags(&draft.tags),
            rule_breaks: Vec::new(),
        };

        for warning in &decision.soft_warnings {
            trade.stamp_rule_break(*warning);
        }
        if decision.override_active {
            trade.stamp_rule_break(RuleBreak::OverrideUsed);
        }

        self.trades.insert(&trade).await?;
        info!(id = %trade.id, result_r = %trade.result_r, "trade recorded");
        Ok(EntryOutcome::Recorded { trade, decision })
    }

    async fn resolve_strategy(
        &self,
        reference: &str,
    ) -> Result<crate::domain::strategy::Strategy> {
        if let Some(strategy) = self.strategies.get(&reference.into()).await? {
            return Ok(strategy);
        }
        if let Some(strategy) = self.strategies.find_by_name(reference).await? {
            return Ok(strategy);
        }
        Err(DomainError::UnknownStrategy {
            reference: reference.to_string(),
        }
        .into())
    }
}
