//! Report generation port trait.

use crate::domain::error::GridError;
use crate::domain::summary::ResultsSummary;

/// Port for writing simulation reports.
pub trait ReportPort {
    fn write(&self, summary: &ResultsSummary, output_path: &str) -> Result<(), GridError>;
}
