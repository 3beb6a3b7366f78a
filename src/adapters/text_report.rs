//! Plain-text report adapter.

use std::fmt::Write as _;
use std::fs;

use crate::domain::summary::ResultsSummary;
use crate::domain::transaction::Side;
use crate::domain::error::GridError;
use crate::ports::report_port::ReportPort;

pub struct TextReport;

/// Render the summary as a fixed-width text report.
pub fn render(summary: &ResultsSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Grid Simulation Report");
    let _ = writeln!(out, "======================");
    let _ = writeln!(out, "Period:           {} to {}", summary.first_date, summary.last_date);
    let _ = writeln!(out, "Transactions:     {}", summary.trade_count);
    let _ = writeln!(out, "Total invested:   {:>14.2}", summary.total_invested);
    let _ = writeln!(out, "Total realized:   {:>14.2}", summary.total_realized);
    let _ = writeln!(out, "Holdings value:   {:>14.2}", summary.current_holdings_value);
    let _ = writeln!(out, "Total value:      {:>14.2}", summary.total_value);
    let _ = writeln!(out, "Realized profit:  {:>14.2}", summary.total_profit);
    let _ = writeln!(out, "Profit:           {:>13.2}%", summary.profit_percentage);
    let _ = writeln!(out, "Annualized ROI:   {:>13.2}%", summary.annualized_roi);

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<12} {:<4} {:>12} {:>8} {:>14} {:>12}",
        "date", "side", "price", "shares", "amount", "profit");
    for tx in &summary.transactions {
        let side = match tx.side {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        };
        let profit = tx
            .fill
            .as_ref()
            .map(|f| format!("{:.2}", f.profit))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<12} {:<4} {:>12.4} {:>8} {:>14.2} {:>12}",
            tx.date, side, tx.price, tx.shares, tx.amount, profit
        );
    }

    if !summary.open_lots.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Open lots:");
        let _ = writeln!(out, "{:<12} {:>12} {:>8} {:>10}",
            "entry date", "entry price", "shares", "threshold");
        for lot in &summary.open_lots {
            let _ = writeln!(
                out,
                "{:<12} {:>12.4} {:>8} {:>9.0}%",
                lot.entry_date,
                lot.entry_price,
                lot.shares,
                lot.threshold * 100.0
            );
        }
    }

    out
}

impl ReportPort for TextReport {
    fn write(&self, summary: &ResultsSummary, output_path: &str) -> Result<(), GridError> {
        fs::write(output_path, render(summary))?;
        Ok(())
    }
}
