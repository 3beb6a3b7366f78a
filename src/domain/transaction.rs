//! Append-only transaction records: the simulation's audit trail.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// Sell-specific details: which lot was closed and what it yielded.
#[derive(Debug, Clone, PartialEq)]
pub struct SellFill {
    pub matched_entry_price: f64,
    pub matched_entry_date: NaiveDate,
    pub profit: f64,
    pub threshold_used: f64,
}

/// One executed action. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub side: Side,
    pub price: f64,
    pub shares: i64,
    pub amount: f64,
    /// Present on sells only.
    pub fill: Option<SellFill>,
}

impl Transaction {
    pub fn buy(date: NaiveDate, price: f64, shares: i64) -> Self {
        Transaction {
            date,
            side: Side::Buy,
            price,
            shares,
            amount: price * shares as f64,
            fill: None,
        }
    }

    pub fn sell(date: NaiveDate, price: f64, shares: i64, fill: SellFill) -> Self {
        Transaction {
            date,
            side: Side::Sell,
            price,
            shares,
            amount: price * shares as f64,
            fill: Some(fill),
        }
    }

    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.side == Side::Sell
    }
}
