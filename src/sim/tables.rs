//! Static region, technology, and climate tables injected into the engine.

use serde::Serialize;

use super::types::{ClimateScenario, Region, Technology};

/// Anchor year for projection labels when none is configured.
pub const DEFAULT_ANCHOR_YEAR: i32 = 2025;

/// Per-region base demand and capacity ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionSpec {
    /// Year-0 demand (MWh, positive).
    pub base_demand_mwh: f64,
    /// Maximum hydro generation (MWh).
    pub hydro_capacity_mwh: f64,
    /// Maximum solar generation (MWh).
    pub solar_capacity_mwh: f64,
    /// Maximum thermal generation (MWh).
    pub thermal_capacity_mwh: f64,
}

impl RegionSpec {
    /// Capacity ceiling for one technology (MWh).
    pub fn capacity_mwh(&self, tech: Technology) -> f64 {
        match tech {
            Technology::Hydro => self.hydro_capacity_mwh,
            Technology::Solar => self.solar_capacity_mwh,
            Technology::Thermal => self.thermal_capacity_mwh,
        }
    }
}

/// Per-technology emission, cost, and initial-share factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TechnologySpec {
    /// Emissions per unit of generation (tCO2e/MWh, >= 0).
    pub emission_factor_tco2e_per_mwh: f64,
    /// Cost per unit of generation (USD/MWh, >= 0).
    pub unit_cost_usd_per_mwh: f64,
    /// Fraction of demand allocated before clamping; shares sum to 1.0.
    pub base_share: f64,
}

/// Immutable configuration tables shared by the projector and simulator.
///
/// Constructed once at startup and passed by reference, so tests can
/// substitute alternate tables without touching global state.
/// [`SystemTables::default`] yields the reference data set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemTables {
    /// First calendar year of every projection.
    pub anchor_year: i32,
    costa: RegionSpec,
    sierra: RegionSpec,
    selva: RegionSpec,
    hydro: TechnologySpec,
    solar: TechnologySpec,
    thermal: TechnologySpec,
    optimistic_factor: f64,
    normal_factor: f64,
    critical_factor: f64,
}

impl SystemTables {
    /// Builds tables from explicit per-region and per-technology entries.
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        anchor_year: i32,
        costa: RegionSpec,
        sierra: RegionSpec,
        selva: RegionSpec,
        hydro: TechnologySpec,
        solar: TechnologySpec,
        thermal: TechnologySpec,
        optimistic_factor: f64,
        normal_factor: f64,
        critical_factor: f64,
    ) -> Self {
        Self {
            anchor_year,
            costa,
            sierra,
            selva,
            hydro,
            solar,
            thermal,
            optimistic_factor,
            normal_factor,
            critical_factor,
        }
    }

    /// Region entry lookup.
    pub fn region(&self, region: Region) -> &RegionSpec {
        match region {
            Region::Costa => &self.costa,
            Region::Sierra => &self.sierra,
            Region::Selva => &self.selva,
        }
    }

    /// Technology entry lookup.
    pub fn technology(&self, tech: Technology) -> &TechnologySpec {
        match tech {
            Technology::Hydro => &self.hydro,
            Technology::Solar => &self.solar,
            Technology::Thermal => &self.thermal,
        }
    }

    /// Renewable availability multiplier for a climate scenario.
    pub fn climate_factor(&self, scenario: ClimateScenario) -> f64 {
        match scenario {
            ClimateScenario::Optimistic => self.optimistic_factor,
            ClimateScenario::Normal => self.normal_factor,
            ClimateScenario::Critical => self.critical_factor,
        }
    }
}

impl Default for SystemTables {
    fn default() -> Self {
        Self {
            anchor_year: DEFAULT_ANCHOR_YEAR,
            costa: RegionSpec {
                base_demand_mwh: 12_000.0,
                hydro_capacity_mwh: 15_000.0,
                solar_capacity_mwh: 8_000.0,
                thermal_capacity_mwh: 12_000.0,
            },
            sierra: RegionSpec {
                base_demand_mwh: 7_000.0,
                hydro_capacity_mwh: 20_000.0,
                solar_capacity_mwh: 3_000.0,
                thermal_capacity_mwh: 8_000.0,
            },
            selva: RegionSpec {
                base_demand_mwh: 4_000.0,
                hydro_capacity_mwh: 10_000.0,
                solar_capacity_mwh: 1_000.0,
                thermal_capacity_mwh: 5_000.0,
            },
            hydro: TechnologySpec {
                emission_factor_tco2e_per_mwh: 0.02,
                unit_cost_usd_per_mwh: 30.0,
                base_share: 0.5,
            },
            solar: TechnologySpec {
                emission_factor_tco2e_per_mwh: 0.03,
                unit_cost_usd_per_mwh: 40.0,
                base_share: 0.2,
            },
            thermal: TechnologySpec {
                emission_factor_tco2e_per_mwh: 0.8,
                unit_cost_usd_per_mwh: 90.0,
                base_share: 0.3,
            },
            optimistic_factor: 1.1,
            normal_factor: 1.0,
            critical_factor: 0.8,
        }
    }
}
