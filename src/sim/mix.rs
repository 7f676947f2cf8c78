//! Generation-mix simulation for a single demand value.

use serde::Serialize;

use super::tables::SystemTables;
use super::types::{Region, SimError, Technology};

/// Generation split and derived metrics for one demand value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MixBreakdown {
    /// Hydro generation after capacity clamp (MWh).
    pub hydro_mwh: f64,
    /// Solar generation after capacity clamp (MWh).
    pub solar_mwh: f64,
    /// Thermal generation after capacity clamp (MWh).
    pub thermal_mwh: f64,
    /// Unmet demand (MWh, >= 0).
    pub deficit_mwh: f64,
    /// Total emissions (tCO2e).
    pub emissions_tco2e: f64,
    /// Total generation cost (USD).
    pub cost_usd: f64,
    /// Average marginal cost (USD/MWh); 0 when demand is 0.
    pub marginal_cost_usd_per_mwh: f64,
}

/// Simulates the generation mix for one region and demand value.
///
/// Renewables take their base share of demand scaled by the climate
/// factor, each clamped to regional capacity. Thermal absorbs the
/// residual, clamped to `[0, capacity]`: when renewables alone exceed
/// demand the residual is negative and thermal output is zero, never
/// negative. Whatever remains uncovered is the deficit.
///
/// # Arguments
///
/// * `tables` - System tables supplying capacities and technology factors
/// * `region` - Region whose capacity ceilings apply
/// * `demand_mwh` - Demand to cover (must be finite and >= 0)
/// * `climate_factor` - Renewable availability multiplier (must be finite and > 0)
///
/// # Errors
///
/// Returns `SimError::InvalidParameter` if `demand_mwh` is negative or
/// non-finite, or `climate_factor` is non-positive or non-finite.
pub fn simulate(
    tables: &SystemTables,
    region: Region,
    demand_mwh: f64,
    climate_factor: f64,
) -> Result<MixBreakdown, SimError> {
    if !demand_mwh.is_finite() || demand_mwh < 0.0 {
        return Err(SimError::InvalidParameter {
            param: "demand_mwh",
            message: format!("must be finite and >= 0, got {demand_mwh}"),
        });
    }
    if !climate_factor.is_finite() || climate_factor <= 0.0 {
        return Err(SimError::InvalidParameter {
            param: "climate_factor",
            message: format!("must be finite and > 0, got {climate_factor}"),
        });
    }

    let caps = tables.region(region);

    let raw_hydro = demand_mwh * tables.technology(Technology::Hydro).base_share;
    let raw_solar = demand_mwh * tables.technology(Technology::Solar).base_share;
    let hydro_mwh = (raw_hydro * climate_factor).min(caps.hydro_capacity_mwh);
    let solar_mwh = (raw_solar * climate_factor).min(caps.solar_capacity_mwh);

    // Residual can go negative when renewables overshoot demand.
    let residual = demand_mwh - hydro_mwh - solar_mwh;
    let thermal_mwh = residual.min(caps.thermal_capacity_mwh).max(0.0);

    let deficit_mwh = (demand_mwh - (hydro_mwh + solar_mwh + thermal_mwh)).max(0.0);

    let mut emissions_tco2e = 0.0;
    let mut cost_usd = 0.0;
    for tech in Technology::ALL {
        let generated = match tech {
            Technology::Hydro => hydro_mwh,
            Technology::Solar => solar_mwh,
            Technology::Thermal => thermal_mwh,
        };
        let spec = tables.technology(tech);
        emissions_tco2e += generated * spec.emission_factor_tco2e_per_mwh;
        cost_usd += generated * spec.unit_cost_usd_per_mwh;
    }

    let marginal_cost_usd_per_mwh = if demand_mwh > 0.0 {
        cost_usd / demand_mwh
    } else {
        0.0
    };

    Ok(MixBreakdown {
        hydro_mwh,
        solar_mwh,
        thermal_mwh,
        deficit_mwh,
        emissions_tco2e,
        cost_usd,
        marginal_cost_usd_per_mwh,
    })
}
