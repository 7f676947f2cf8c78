//! Orchestration of the demand projector and mix simulator.

use super::mix::simulate;
use super::projector::project;
use super::tables::SystemTables;
use super::types::{AnnualResult, ClimateScenario, Region, SimError};

/// Simulation engine owning the tables and run parameters.
///
/// Runs the projector once, then the mix simulator per projected year
/// under the scenario's fixed climate factor. Every year is independent,
/// so the run is a straight iteration with no carried state.
pub struct Engine {
    tables: SystemTables,
    region: Region,
    scenario: ClimateScenario,
    horizon_years: usize,
    growth_rate: f64,
}

impl Engine {
    /// Creates an engine for one region, scenario, horizon, and growth rate.
    pub fn new(
        tables: SystemTables,
        region: Region,
        scenario: ClimateScenario,
        horizon_years: usize,
        growth_rate: f64,
    ) -> Self {
        Self {
            tables,
            region,
            scenario,
            horizon_years,
            growth_rate,
        }
    }

    /// System tables in use.
    pub fn tables(&self) -> &SystemTables {
        &self.tables
    }

    /// Region under simulation.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Climate scenario under simulation.
    pub fn scenario(&self) -> ClimateScenario {
        self.scenario
    }

    /// Runs the full projection and returns one result per year, in order.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidParameter` if the horizon or growth rate
    /// is out of range; the per-year simulation cannot fail on projector
    /// output since projected demand is always non-negative.
    pub fn run(&self) -> Result<Vec<AnnualResult>, SimError> {
        let factor = self.tables.climate_factor(self.scenario);
        let rows = project(
            &self.tables,
            self.region,
            self.horizon_years,
            self.growth_rate,
        )?;

        rows.iter()
            .map(|row| {
                let mix = simulate(&self.tables, self.region, row.demand_mwh, factor)?;
                Ok(AnnualResult {
                    year: row.year,
                    demand_mwh: row.demand_mwh,
                    climate_factor: factor,
                    hydro_mwh: mix.hydro_mwh,
                    solar_mwh: mix.solar_mwh,
                    thermal_mwh: mix.thermal_mwh,
                    deficit_mwh: mix.deficit_mwh,
                    emissions_tco2e: mix.emissions_tco2e,
                    cost_usd: mix.cost_usd,
                    marginal_cost_usd_per_mwh: mix.marginal_cost_usd_per_mwh,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costa_engine() -> Engine {
        Engine::new(
            SystemTables::default(),
            Region::Costa,
            ClimateScenario::Normal,
            10,
            0.04,
        )
    }

    #[test]
    fn run_produces_one_result_per_year() {
        let results = costa_engine().run().unwrap();
        assert_eq!(results.len(), 10);
        let years: Vec<i32> = results.iter().map(|r| r.year).collect();
        assert_eq!(years, (2025..2035).collect::<Vec<i32>>());
    }

    #[test]
    fn first_year_matches_reference_case() {
        let results = costa_engine().run().unwrap();
        let first = &results[0];
        assert_eq!(first.demand_mwh, 12_000.0);
        assert_eq!(first.hydro_mwh, 6_000.0);
        assert_eq!(first.solar_mwh, 2_400.0);
        assert_eq!(first.thermal_mwh, 3_600.0);
        assert!((first.marginal_cost_usd_per_mwh - 50.0).abs() < 1e-9);
    }

    #[test]
    fn scenario_factor_is_applied_to_every_year() {
        let engine = Engine::new(
            SystemTables::default(),
            Region::Selva,
            ClimateScenario::Critical,
            6,
            0.0,
        );
        let results = engine.run().unwrap();
        for r in &results {
            assert_eq!(r.climate_factor, 0.8);
            assert!((r.hydro_mwh - 1_600.0).abs() < 1e-9);
            assert!((r.solar_mwh - 640.0).abs() < 1e-9);
        }
    }

    #[test]
    fn run_is_deterministic() {
        let a = costa_engine().run().unwrap();
        let b = costa_engine().run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_horizon_propagates() {
        let engine = Engine::new(
            SystemTables::default(),
            Region::Costa,
            ClimateScenario::Normal,
            0,
            0.04,
        );
        assert!(matches!(
            engine.run(),
            Err(SimError::InvalidParameter {
                param: "horizon_years",
                ..
            })
        ));
    }

    #[test]
    fn deficit_stays_non_negative_across_scenarios() {
        for region in Region::ALL {
            for scenario in ClimateScenario::ALL {
                let engine =
                    Engine::new(SystemTables::default(), region, scenario, 20, 0.10);
                for r in engine.run().unwrap() {
                    assert!(r.deficit_mwh >= 0.0);
                }
            }
        }
    }
}
