//! Results aggregation: folds the final ledger and transaction history
//! into a read-only summary.

use chrono::NaiveDate;

use crate::domain::config::GridConfig;
use crate::domain::ledger::Lot;
use crate::domain::transaction::Transaction;

/// Headline figures plus the full audit trail. `total_profit` counts
/// realized sell profit only; unrealized P/L on open lots is excluded by
/// design.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsSummary {
    pub total_invested: f64,
    pub total_realized: f64,
    pub current_holdings_value: f64,
    pub total_value: f64,
    pub total_profit: f64,
    pub profit_percentage: f64,
    pub annualized_roi: f64,
    pub transactions: Vec<Transaction>,
    pub open_lots: Vec<Lot>,
    pub trade_count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

/// Pure fold over `(lots, transactions, last close)`; running it twice on
/// the same inputs yields identical summaries.
pub fn summarize(
    open_lots: &[Lot],
    transactions: &[Transaction],
    last_close: f64,
    first_date: NaiveDate,
    last_date: NaiveDate,
    config: &GridConfig,
) -> ResultsSummary {
    let total_invested: f64 = transactions
        .iter()
        .filter(|t| t.is_buy())
        .map(|t| t.amount)
        .sum();

    let total_realized: f64 = transactions
        .iter()
        .filter(|t| t.is_sell())
        .map(|t| t.amount)
        .sum();

    let total_profit: f64 = transactions
        .iter()
        .filter_map(|t| t.fill.as_ref())
        .map(|f| f.profit)
        .sum();

    let current_holdings_value: f64 = open_lots.iter().map(|l| l.market_value(last_close)).sum();

    let profit_percentage = if total_invested > 0.0 {
        total_profit / total_invested * 100.0
    } else {
        0.0
    };

    let years_elapsed = (last_date - first_date).num_days() as f64 / 365.0;
    let annualized_roi = if years_elapsed > 0.0 {
        (total_profit / years_elapsed) * 100.0 / config.roi_normalization_base
    } else {
        0.0
    };

    ResultsSummary {
        total_invested,
        total_realized,
        current_holdings_value,
        total_value: total_realized + current_holdings_value,
        total_profit,
        profit_percentage,
        annualized_roi,
        transactions: transactions.to_vec(),
        open_lots: open_lots.to_vec(),
        trade_count: transactions.len(),
        first_date,
        last_date,
    }
}
