#![allow(dead_code)]

use chrono::NaiveDate;
use gridtrader::domain::bar::{PriceBar, RawBar};
use gridtrader::domain::config::GridConfig;
use gridtrader::domain::error::GridError;
use gridtrader::ports::data_port::BarSource;

pub struct MockBarSource {
    pub bars: Vec<RawBar>,
    pub error: Option<String>,
}

impl MockBarSource {
    pub fn new(bars: Vec<RawBar>) -> Self {
        Self { bars, error: None }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            bars: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl BarSource for MockBarSource {
    fn fetch_bars(&self) -> Result<Vec<RawBar>, GridError> {
        if let Some(reason) = &self.error {
            return Err(GridError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.bars.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn raw_bar(date: &str, open: &str, high: &str, low: &str, close: &str) -> RawBar {
    RawBar {
        date: date.into(),
        open: open.into(),
        high: high.into(),
        low: low.into(),
        close: close.into(),
    }
}

pub fn bar(day: u32, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
    PriceBar {
        date: date(2024, 1, 1) + chrono::Duration::days(day as i64 - 1),
        open,
        high,
        low,
        close,
    }
}

pub fn flat_bar(day: u32, price: f64) -> PriceBar {
    bar(day, price, price, price, price)
}

pub fn default_config() -> GridConfig {
    GridConfig::default()
}
