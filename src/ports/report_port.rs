//! Report generation port trait.

use crate::domain::error::PairsimError;
use crate::domain::performance::PerformanceReport;

/// What the report is about, alongside the computed performance.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSubject {
    pub pair_id: String,
    pub instrument_filter: String,
}

/// Port for writing performance reports.
pub trait ReportPort {
    fn write(
        &self,
        report: &PerformanceReport,
        subject: &ReportSubject,
        output_path: &str,
    ) -> Result<(), PairsimError>;
}
