//! CSV file bar source.
//!
//! Validates the header contract (DATE, OPEN, HIGH, LOW, CLOSE must all be
//! present, case-insensitively, in any column order) before the engine ever
//! sees a bar, and hands the fields through as raw text so the normalizer
//! owns all numeric parsing.

use std::path::{Path, PathBuf};

use crate::domain::bar::RawBar;
use crate::domain::error::GridError;
use crate::ports::data_port::BarSource;

pub struct CsvBarSource {
    path: PathBuf,
}

struct ColumnIndices {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
}

impl CsvBarSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn locate_columns(headers: &csv::StringRecord) -> Result<ColumnIndices, GridError> {
        let find = |name: &str| -> Result<usize, GridError> {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| GridError::MissingColumn {
                    column: name.to_uppercase(),
                })
        };
        Ok(ColumnIndices {
            date: find("date")?,
            open: find("open")?,
            high: find("high")?,
            low: find("low")?,
            close: find("close")?,
        })
    }
}

impl BarSource for CsvBarSource {
    fn fetch_bars(&self) -> Result<Vec<RawBar>, GridError> {
        let mut rdr = csv::Reader::from_path(&self.path).map_err(|e| GridError::Data {
            reason: format!("failed to open {}: {}", self.path.display(), e),
        })?;

        let headers = rdr.headers().map_err(|e| GridError::Data {
            reason: format!("CSV header error: {}", e),
        })?;
        let columns = Self::locate_columns(headers)?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| GridError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let field = |idx: usize, name: &str| -> Result<String, GridError> {
                record
                    .get(idx)
                    .map(|s| s.to_string())
                    .ok_or_else(|| GridError::Data {
                        reason: format!("row {:?} is missing the {} field", record.position(), name),
                    })
            };

            bars.push(RawBar {
                date: field(columns.date, "date")?,
                open: field(columns.open, "open")?,
                high: field(columns.high, "high")?,
                low: field(columns.low, "low")?,
                close: field(columns.close, "close")?,
            });
        }

        Ok(bars)
    }
}
