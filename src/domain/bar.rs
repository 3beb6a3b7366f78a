//! Price bar representation and series normalization.
//!
//! Source series are commonly delivered newest-first and with grouping
//! separators in the numeric text (e.g. "1,150.00"). Normalization restores
//! chronological ascending order and converts every field to a numeric type,
//! failing loudly on anything that is not a clean decimal.

use chrono::NaiveDate;

use crate::domain::error::GridError;

/// A bar exactly as delivered by the ingestion collaborator: all text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBar {
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

/// One trading day, fully parsed. `low <= open,close <= high` is assumed
/// but not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Parse a price field that may carry grouping separators.
///
/// Separators are stripped before parsing so that "1,150.00" yields 1150.0.
/// Anything that still fails to parse afterwards (or parses to a
/// non-positive or non-finite value) is a [`GridError::MalformedPrice`] —
/// never a silently truncated magnitude.
pub fn parse_price(field: &str, value: &str) -> Result<f64, GridError> {
    let malformed = || GridError::MalformedPrice {
        field: field.to_string(),
        value: value.to_string(),
    };

    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return Err(malformed());
    }

    let price: f64 = cleaned.parse().map_err(|_| malformed())?;
    if !price.is_finite() || price <= 0.0 {
        return Err(malformed());
    }
    Ok(price)
}

fn parse_date(value: &str) -> Result<NaiveDate, GridError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| GridError::MalformedDate {
        value: value.to_string(),
    })
}

/// Convert raw textual bars into an oldest-first [`PriceBar`] sequence.
pub fn normalize(raw: &[RawBar]) -> Result<Vec<PriceBar>, GridError> {
    if raw.is_empty() {
        return Err(GridError::EmptySeries);
    }

    let mut bars = raw
        .iter()
        .map(|r| {
            Ok(PriceBar {
                date: parse_date(&r.date)?,
                open: parse_price("open", &r.open)?,
                high: parse_price("high", &r.high)?,
                low: parse_price("low", &r.low)?,
                close: parse_price("close", &r.close)?,
            })
        })
        .collect::<Result<Vec<_>, GridError>>()?;

    bars.sort_by_key(|b| b.date);
    Ok(bars)
}
