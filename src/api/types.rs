//! API response and query types.
//!
//! Per-year records reuse the `AnnualResult` field names, matching the
//! CSV export schema so both output formats stay consistent.

use serde::{Deserialize, Serialize};

use crate::sim::kpi::SummaryReport;
use crate::sim::types::{AnnualResult, ClimateScenario, Region};

/// Run parameters echoed back by the API.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunInfo {
    /// Region under simulation.
    pub region: Region,
    /// Climate scenario under simulation.
    pub climate: ClimateScenario,
    /// Projection horizon in years.
    pub horizon_years: usize,
    /// Compound annual demand growth rate.
    pub growth_rate: f64,
    /// First calendar year of the projection.
    pub anchor_year: i32,
}

/// Combined summary response: run parameters, totals, and final-year record.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Run parameters.
    pub run: RunInfo,
    /// Aggregate summary report.
    pub summary: SummaryReport,
    /// Final-year record, `null` for an empty run.
    pub final_year: Option<AnnualResult>,
}

/// Query parameters for `/results` range filtering.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    /// First calendar year to include (inclusive).
    pub from_year: Option<i32>,
    /// Last calendar year to include (inclusive).
    pub to_year: Option<i32>,
}

/// Error payload for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}
