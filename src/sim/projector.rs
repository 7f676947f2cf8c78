//! Compound-growth demand projection.

use super::tables::SystemTables;
use super::types::{ProjectionRow, Region, SimError};

/// Projects regional demand over a horizon under compound annual growth.
///
/// Produces exactly `horizon_years` rows with consecutive calendar-year
/// labels starting at the tables' anchor year, where
/// `demand(i) = base_demand * (1 + growth_rate)^i`.
///
/// Pure and deterministic: identical inputs always yield identical rows.
///
/// # Arguments
///
/// * `tables` - System tables supplying base demand and the anchor year
/// * `region` - Region whose base demand seeds the projection
/// * `horizon_years` - Number of years to project (must be >= 1)
/// * `growth_rate` - Compound annual growth rate (must be finite and >= -1)
///
/// # Errors
///
/// Returns `SimError::InvalidParameter` if `horizon_years` is zero or
/// `growth_rate` is non-finite or below -1.
pub fn project(
    tables: &SystemTables,
    region: Region,
    horizon_years: usize,
    growth_rate: f64,
) -> Result<Vec<ProjectionRow>, SimError> {
    if horizon_years == 0 {
        return Err(SimError::InvalidParameter {
            param: "horizon_years",
            message: "must be >= 1".to_string(),
        });
    }
    if !growth_rate.is_finite() || growth_rate < -1.0 {
        return Err(SimError::InvalidParameter {
            param: "growth_rate",
            message: format!("must be finite and >= -1, got {growth_rate}"),
        });
    }

    let base = tables.region(region).base_demand_mwh;
    let rows = (0..horizon_years)
        .map(|i| ProjectionRow {
            year: tables.anchor_year + i as i32,
            demand_mwh: base * (1.0 + growth_rate).powi(i as i32),
        })
        .collect();
    Ok(rows)
}
