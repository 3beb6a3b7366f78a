//! Reference price transitions driven once per bar, before the action loop.
//!
//! The reference is "the last price at which an action occurred". Two
//! mode-driven resets keep it reachable:
//!
//! - recovery: with no open lots in a rallying market, chase the price by
//!   re-anchoring to today's high instead of waiting for a buy trigger
//!   computed from a stale reference;
//! - falling-market: with lots open and a sharp drop, re-anchor to today's
//!   close so the buy ladder does not drift out of reach.

use crate::domain::bar::PriceBar;
use crate::domain::config::GridConfig;
use crate::domain::ledger::Ledger;

/// Apply the per-bar mode transitions and return the adjusted reference.
pub fn bar_transition(
    reference: f64,
    ledger: &Ledger,
    bar: &PriceBar,
    config: &GridConfig,
) -> f64 {
    if ledger.is_empty() {
        if bar.close > reference * config.recovery_rally_multiplier && bar.close > reference {
            return bar.high;
        }
    } else if bar.close < reference * config.falling_market_multiplier {
        return bar.close;
    }
    reference
}
