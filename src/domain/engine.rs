//! Trading action engine: the per-bar sell/buy cascade.
//!
//! Each bar first applies the reference transitions, then runs a bounded
//! fixed-point loop alternating a sell pass and a buy pass. The loop repeats
//! because a sell raises the reference and can immediately unlock a buy,
//! which lowers it again and can unlock another sell, all within one day.
//! A pass that produces no action terminates the bar; a bar that is still
//! acting at the pass cap is flagged on the result and processing moves on.

use chrono::NaiveDate;

use crate::domain::bar::PriceBar;
use crate::domain::config::GridConfig;
use crate::domain::error::GridError;
use crate::domain::ledger::{Ledger, Lot, LEVEL_TOLERANCE};
use crate::domain::reference;
use crate::domain::summary::{summarize, ResultsSummary};
use crate::domain::transaction::{SellFill, Transaction};

/// Slack for trigger comparisons so that a high of exactly
/// `entry * (1 + threshold)` fires despite binary rounding.
const TRIGGER_EPSILON: f64 = 1e-9;

/// Run-local simulation state, threaded explicitly through
/// [`process_bar`]. One instance per run; nothing survives the call.
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub ledger: Ledger,
    pub reference_price: f64,
    pub transactions: Vec<Transaction>,
    /// Bars whose cascade was still acting at the pass cap. Non-fatal.
    pub loop_limit_dates: Vec<NaiveDate>,
    /// Prices executed during the current bar; cleared at each new bar.
    day_levels: Vec<f64>,
}

impl SimulationState {
    pub fn new() -> Self {
        SimulationState::default()
    }

    fn level_executed_today(&self, price: f64) -> bool {
        self.day_levels
            .iter()
            .any(|&level| (level - price).abs() < LEVEL_TOLERANCE)
    }

    fn record_execution(&mut self, price: f64) {
        self.day_levels.push(price);
    }
}

/// Simulation output: the summary plus the loop-limit anomaly flag.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub summary: ResultsSummary,
    pub loop_limit_dates: Vec<NaiveDate>,
}

/// Simulate the whole series and fold the outcome into a report.
pub fn run_simulation(
    bars: &[PriceBar],
    config: &GridConfig,
) -> Result<SimulationReport, GridError> {
    let (first, last) = match (bars.first(), bars.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(GridError::EmptySeries),
    };

    let mut state = SimulationState::new();
    for bar in bars {
        process_bar(&mut state, bar, config);
    }

    let summary = summarize(
        state.ledger.all(),
        &state.transactions,
        last.close,
        first.date,
        last.date,
        config,
    );

    Ok(SimulationReport {
        summary,
        loop_limit_dates: state.loop_limit_dates,
    })
}

/// Advance the state by one bar.
pub fn process_bar(state: &mut SimulationState, bar: &PriceBar, config: &GridConfig) {
    state.day_levels.clear();

    if state.transactions.is_empty() {
        // The very first action of the series is always a buy at the first
        // bar's open, seeding the reference.
        execute_buy(state, bar, bar.open, config.base_threshold, config);
    } else {
        state.reference_price =
            reference::bar_transition(state.reference_price, &state.ledger, bar, config);
    }

    let mut quiesced = false;
    for _ in 0..config.max_passes_per_bar {
        let mut acted = false;

        while sell_pass(state, bar) {
            acted = true;
        }
        if buy_pass(state, bar, config) {
            acted = true;
        }

        if !acted {
            quiesced = true;
            break;
        }
    }
    if !quiesced {
        state.loop_limit_dates.push(bar.date);
    }
}

/// Lowest-entry-price lot eligible to sell today. Lots bought today are
/// locked; a locked lowest lot is skipped, not a reason to stall.
fn sell_candidate(ledger: &Ledger, today: NaiveDate) -> Option<Lot> {
    ledger
        .sorted_ascending()
        .into_iter()
        .find(|lot| lot.entry_date != today)
}

/// Attempt one sell. Returns whether a lot was closed.
fn sell_pass(state: &mut SimulationState, bar: &PriceBar) -> bool {
    let Some(lot) = sell_candidate(&state.ledger, bar.date) else {
        return false;
    };

    let target = lot.sell_target();
    if bar.high < target - TRIGGER_EPSILON {
        return false;
    }

    let Some(closed) = state.ledger.close(lot.entry_price, lot.entry_date) else {
        return false;
    };

    let profit = closed.shares as f64 * (target - closed.entry_price);
    state.transactions.push(Transaction::sell(
        bar.date,
        target,
        closed.shares,
        SellFill {
            matched_entry_price: closed.entry_price,
            matched_entry_date: closed.entry_date,
            profit,
            threshold_used: closed.threshold,
        },
    ));
    state.reference_price = target;
    state.record_execution(target);
    true
}

/// Attempt one buy. Returns whether a lot was opened.
fn buy_pass(state: &mut SimulationState, bar: &PriceBar, config: &GridConfig) -> bool {
    if state.ledger.len() >= config.max_open_lots {
        return false;
    }

    let threshold = config.threshold_for(state.ledger.len());
    let trigger = state.reference_price * (1.0 - threshold);
    if bar.low > trigger + TRIGGER_EPSILON {
        return false;
    }

    // Gap-down: the trigger never traded intraday because the whole range
    // opened below it; fill at the close instead.
    let price = if trigger > bar.high + TRIGGER_EPSILON {
        bar.close
    } else {
        trigger
    };

    if state.ledger.has_level(price, LEVEL_TOLERANCE) || state.level_executed_today(price) {
        return false;
    }

    execute_buy(state, bar, price, threshold, config);
    true
}

fn execute_buy(
    state: &mut SimulationState,
    bar: &PriceBar,
    price: f64,
    threshold: f64,
    config: &GridConfig,
) {
    let shares = (config.notional_per_lot / price).floor() as i64;
    state.ledger.open(Lot {
        entry_price: price,
        shares,
        entry_date: bar.date,
        threshold,
    });
    state.transactions.push(Transaction::buy(bar.date, price, shares));
    state.reference_price = price;
    state.record_execution(price);
}
