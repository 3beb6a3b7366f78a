//! Bar ingestion port trait.

use crate::domain::bar::RawBar;
use crate::domain::error::GridError;

/// Source of raw textual bars. Implementations guarantee the presence of
/// the date/open/high/low/close fields; ordering and numeric parsing are
/// the normalizer's job.
pub trait BarSource {
    fn fetch_bars(&self) -> Result<Vec<RawBar>, GridError>;
}
