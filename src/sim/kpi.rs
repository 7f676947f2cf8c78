//! Post-hoc summary aggregation over a completed projection run.

use std::fmt;

use serde::Serialize;

use super::types::AnnualResult;

/// Aggregate figures derived from a complete run.
///
/// Computed post-hoc from `Vec<AnnualResult>` to ensure consistency
/// between the stored per-year rows and the reported totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    /// Demand in the final projected year (MWh).
    pub final_demand_mwh: f64,
    /// Cost summed over all years (USD).
    pub total_cost_usd: f64,
    /// Emissions summed over all years (tCO2e).
    pub cumulative_emissions_tco2e: f64,
    /// Deficit summed over all years (MWh).
    pub total_deficit_mwh: f64,
    /// Number of years with any unmet demand.
    pub deficit_years: usize,
    /// Marginal cost in the final projected year (USD/MWh).
    pub final_marginal_cost_usd_per_mwh: f64,
    /// Hydro share of final-year generation (%).
    pub final_hydro_share_pct: f64,
    /// Solar share of final-year generation (%).
    pub final_solar_share_pct: f64,
    /// Thermal share of final-year generation (%).
    pub final_thermal_share_pct: f64,
}

impl SummaryReport {
    /// Computes the summary from the complete result vector.
    ///
    /// Empty input yields an all-zero report.
    pub fn from_results(results: &[AnnualResult]) -> Self {
        let Some(last) = results.last() else {
            return Self {
                final_demand_mwh: 0.0,
                total_cost_usd: 0.0,
                cumulative_emissions_tco2e: 0.0,
                total_deficit_mwh: 0.0,
                deficit_years: 0,
                final_marginal_cost_usd_per_mwh: 0.0,
                final_hydro_share_pct: 0.0,
                final_solar_share_pct: 0.0,
                final_thermal_share_pct: 0.0,
            };
        };

        let mut total_cost = 0.0;
        let mut total_emissions = 0.0;
        let mut total_deficit = 0.0;
        let mut deficit_years = 0;
        for r in results {
            total_cost += r.cost_usd;
            total_emissions += r.emissions_tco2e;
            total_deficit += r.deficit_mwh;
            if r.deficit_mwh > 0.0 {
                deficit_years += 1;
            }
        }

        let final_generation = last.generation_mwh();
        let share = |generated: f64| {
            if final_generation > 0.0 {
                100.0 * generated / final_generation
            } else {
                0.0
            }
        };

        Self {
            final_demand_mwh: last.demand_mwh,
            total_cost_usd: total_cost,
            cumulative_emissions_tco2e: total_emissions,
            total_deficit_mwh: total_deficit,
            deficit_years,
            final_marginal_cost_usd_per_mwh: last.marginal_cost_usd_per_mwh,
            final_hydro_share_pct: share(last.hydro_mwh),
            final_solar_share_pct: share(last.solar_mwh),
            final_thermal_share_pct: share(last.thermal_mwh),
        }
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Projection Summary ---")?;
        writeln!(f, "Final-year demand:        {:.1} MWh", self.final_demand_mwh)?;
        writeln!(f, "Total cost:               {:.0} USD", self.total_cost_usd)?;
        writeln!(
            f,
            "Cumulative emissions:     {:.1} tCO2e",
            self.cumulative_emissions_tco2e
        )?;
        writeln!(
            f,
            "Total deficit:            {:.1} MWh ({} deficit years)",
            self.total_deficit_mwh, self.deficit_years
        )?;
        writeln!(
            f,
            "Final-year mix:           hydro {:.1}% / solar {:.1}% / thermal {:.1}%",
            self.final_hydro_share_pct, self.final_solar_share_pct, self.final_thermal_share_pct
        )?;
        write!(
            f,
            "Final-year marginal cost: {:.2} USD/MWh",
            self.final_marginal_cost_usd_per_mwh
        )
    }
}
