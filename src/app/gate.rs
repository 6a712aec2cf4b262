//! Gate evaluation and override lifecycle over live collaborators.
//!
//! Every evaluation re-reads settings and recomputes today's aggregates;
//! there is deliberately no cache, so staleness is resolved by "always
//! recompute" instead of invalidation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::clock::Clock;
use crate::domain::day::DayKey;
use crate::domain::gate::{evaluate, GateDecision, Requirements};
use crate::domain::settings::{keys, GateSettings};
use crate::domain::stats::DayStats;
use crate::error::Result;
use crate::port::outbound::store::{JournalStore, SettingStore, TradeStore};

/// The emergency override lasts one hour.
pub const OVERRIDE_WINDOW_MS: i64 = 60 * 60 * 1000;

/// Re-activation is locked for 24 hours from the moment of activation,
/// not from expiry.
pub const OVERRIDE_COOLDOWN_MS: i64 = 24 * 60 * 60 * 1000;

/// Result of an override activation attempt.
///
/// Refusals are ordinary outcomes, not errors: activating during cooldown is
/// an anticipated user action and stays a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideOutcome {
    Activated {
        until_ms: i64,
        cooldown_until_ms: i64,
    },
    CooldownActive {
        until_ms: i64,
    },
    DemoMode,
}

/// Evaluates the discipline gate against the live stores.
pub struct GateService<S, T, J, C> {
    settings: Arc<S>,
    trades: Arc<T>,
    journal: Arc<J>,
    clock: Arc<C>,
}

impl<S, T, J, C> GateService<S, T, J, C>
where
    S: SettingStore,
    T: TradeStore,
    J: JournalStore,
    C: Clock,
{
    pub fn new(settings: Arc<S>, trades: Arc<T>, journal: Arc<J>, clock: Arc<C>) -> Self {
        Self {
            settings,
            trades,
            journal,
            clock,
        }
    }

    /// Evaluate the gate for right now.
    ///
    /// Storage failures abort the evaluation; a failed read must never be
    /// treated as "no trades".
    pub async fn evaluate(&self) -> Result<GateDecision> {
        let now = self.clock.now();
        let now_ms = now.timestamp_millis();

        let settings = GateSettings::from_map(&self.settings.all().await?);

        let today = DayKey::from_datetime(&now);
        let window = today.window(*now.offset());
        let trades = self.trades.list_window(&window).await?;
        let stats = DayStats::from_trades(&trades);

        // The plan is for today's session; the closeout should have wrapped
        // up yesterday's.
        let requirements = Requirements {
            plan_done: self.journal.has_plan(&today).await?,
            closeout_done: self.journal.has_closeout(&today.prev()).await?,
        };

        let decision = evaluate(&settings, &stats, requirements, now_ms);
        debug!(
            can_trade = decision.can_trade,
            reasons = decision.reasons.len(),
            warnings = decision.soft_warnings.len(),
            "gate evaluated"
        );
        Ok(decision)
    }

    /// Attempt to activate the emergency override.
    pub async fn activate_override(&self) -> Result<OverrideOutcome> {
        let now_ms = self.clock.now_ms();
        let settings = GateSettings::from_map(&self.settings.all().await?);

        if !settings.mode.is_real() {
            return Ok(OverrideOutcome::DemoMode);
        }
        if now_ms < settings.override_cooldown_until_ms {
            return Ok(OverrideOutcome::CooldownActive {
                until_ms: settings.override_cooldown_until_ms,
            });
        }

        let until_ms = now_ms + OVERRIDE_WINDOW_MS;
        let cooldown_until_ms = now_ms + OVERRIDE_COOLDOWN_MS;
        self.settings
            .set(keys::OVERRIDE_UNTIL, &until_ms.to_string())
            .await?;
        self.settings
            .set(keys::OVERRIDE_COOLDOWN_UNTIL, &cooldown_until_ms.to_string())
            .await?;

        info!(until_ms, cooldown_until_ms, "override activated");
        Ok(OverrideOutcome::Activated {
            until_ms,
            cooldown_until_ms,
        })
    }

    /// End the active override window early. The cooldown is untouched;
    /// there is no path to shorten it.
    pub async fn clear_override(&self) -> Result<()> {
        self.settings.set(keys::OVERRIDE_UNTIL, "0").await?;
        info!("override window cleared");
        Ok(())
    }
}
