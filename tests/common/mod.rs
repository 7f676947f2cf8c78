//! Shared test fixtures for integration tests.

use gridmix::sim::engine::Engine;
use gridmix::sim::tables::SystemTables;
use gridmix::sim::types::{ClimateScenario, Region};

/// Default system tables (reference region/technology/climate data).
pub fn default_tables() -> SystemTables {
    SystemTables::default()
}

/// Engine over the default tables for the given run parameters.
pub fn engine_for(
    region: Region,
    scenario: ClimateScenario,
    horizon_years: usize,
    growth_rate: f64,
) -> Engine {
    Engine::new(default_tables(), region, scenario, horizon_years, growth_rate)
}

/// Baseline engine: Costa, normal climate, 10 years at 4% growth.
pub fn baseline_engine() -> Engine {
    engine_for(Region::Costa, ClimateScenario::Normal, 10, 0.04)
}
