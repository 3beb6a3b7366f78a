//! Open-lot ledger.
//!
//! The ledger only stores lots; refusing duplicate price levels and
//! same-day round-trips is the action engine's responsibility, checked
//! through [`Ledger::has_level`] and the lots' entry dates.

use chrono::NaiveDate;

/// Two lots closer than this in entry price count as the same level.
pub const LEVEL_TOLERANCE: f64 = 0.01;

/// One open purchase. `threshold` is the fractional move in effect when the
/// lot was bought; it fixes this lot's sell target forever.
#[derive(Debug, Clone, PartialEq)]
pub struct Lot {
    pub entry_price: f64,
    pub shares: i64,
    pub entry_date: NaiveDate,
    pub threshold: f64,
}

impl Lot {
    pub fn sell_target(&self) -> f64 {
        self.entry_price * (1.0 + self.threshold)
    }

    pub fn market_value(&self, price: f64) -> f64 {
        self.shares as f64 * price
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    lots: Vec<Lot>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger { lots: Vec::new() }
    }

    pub fn open(&mut self, lot: Lot) {
        self.lots.push(lot);
    }

    /// Remove and return the lot identified by `(entry_price, entry_date)`.
    pub fn close(&mut self, entry_price: f64, entry_date: NaiveDate) -> Option<Lot> {
        let idx = self.lots.iter().position(|l| {
            (l.entry_price - entry_price).abs() < 1e-9 && l.entry_date == entry_date
        })?;
        Some(self.lots.remove(idx))
    }

    pub fn has_level(&self, price: f64, tolerance: f64) -> bool {
        self.lots
            .iter()
            .any(|l| (l.entry_price - price).abs() < tolerance)
    }

    /// Open lots ordered by entry price ascending. Sells are evaluated
    /// lowest-entry-price-first, so this ordering is load-bearing.
    pub fn sorted_ascending(&self) -> Vec<Lot> {
        let mut sorted = self.lots.clone();
        sorted.sort_by(|a, b| a.entry_price.total_cmp(&b.entry_price));
        sorted
    }

    pub fn lowest_priced(&self) -> Option<&Lot> {
        self.lots
            .iter()
            .min_by(|a, b| a.entry_price.total_cmp(&b.entry_price))
    }

    pub fn all(&self) -> &[Lot] {
        &self.lots
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }
}
