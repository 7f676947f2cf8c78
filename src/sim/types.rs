//! Core simulation types: regions, technologies, scenarios, and result records.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Errors produced at the projector and simulator boundaries.
///
/// All validation happens up front; once inputs pass, the computation
/// itself cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A numeric input is out of range or non-finite.
    InvalidParameter {
        /// Name of the offending parameter.
        param: &'static str,
        /// Human-readable constraint description.
        message: String,
    },
    /// A region name did not match any known region.
    UnknownRegion(String),
    /// A technology name did not match any known technology.
    UnknownTechnology(String),
    /// A climate scenario name did not match any known scenario.
    UnknownScenario(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { param, message } => {
                write!(f, "invalid parameter `{param}`: {message}")
            }
            Self::UnknownRegion(name) => {
                write!(f, "unknown region \"{name}\" (expected costa, sierra, or selva)")
            }
            Self::UnknownTechnology(name) => {
                write!(
                    f,
                    "unknown technology \"{name}\" (expected hydro, solar, or thermal)"
                )
            }
            Self::UnknownScenario(name) => {
                write!(
                    f,
                    "unknown climate scenario \"{name}\" (expected optimistic, normal, or critical)"
                )
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Geographic region with its own base demand and capacity limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Costa,
    Sierra,
    Selva,
}

impl Region {
    /// All regions, in display order.
    pub const ALL: [Self; 3] = [Self::Costa, Self::Sierra, Self::Selva];

    /// Lowercase name used in config files and CLI arguments.
    pub fn name(self) -> &'static str {
        match self {
            Self::Costa => "costa",
            Self::Sierra => "sierra",
            Self::Selva => "selva",
        }
    }
}

impl FromStr for Region {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "costa" => Ok(Self::Costa),
            "sierra" => Ok(Self::Sierra),
            "selva" => Ok(Self::Selva),
            _ => Err(SimError::UnknownRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generation technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    Hydro,
    Solar,
    Thermal,
}

impl Technology {
    /// All technologies, in dispatch order (renewables first, thermal last).
    pub const ALL: [Self; 3] = [Self::Hydro, Self::Solar, Self::Thermal];

    /// Lowercase name used in config files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hydro => "hydro",
            Self::Solar => "solar",
            Self::Thermal => "thermal",
        }
    }

    /// Whether this technology's output is scaled by the climate factor.
    ///
    /// Thermal is never scaled; it absorbs residual demand instead.
    pub fn is_renewable(self) -> bool {
        !matches!(self, Self::Thermal)
    }
}

impl FromStr for Technology {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hydro" => Ok(Self::Hydro),
            "solar" => Ok(Self::Solar),
            "thermal" => Ok(Self::Thermal),
            _ => Err(SimError::UnknownTechnology(s.to_string())),
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Climate scenario selecting the renewable availability factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimateScenario {
    Optimistic,
    Normal,
    Critical,
}

impl ClimateScenario {
    /// All scenarios, in display order.
    pub const ALL: [Self; 3] = [Self::Optimistic, Self::Normal, Self::Critical];

    /// Lowercase name used in config files and CLI arguments.
    pub fn name(self) -> &'static str {
        match self {
            Self::Optimistic => "optimistic",
            Self::Normal => "normal",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for ClimateScenario {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "optimistic" => Ok(Self::Optimistic),
            "normal" => Ok(Self::Normal),
            "critical" => Ok(Self::Critical),
            _ => Err(SimError::UnknownScenario(s.to_string())),
        }
    }
}

impl fmt::Display for ClimateScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One projected year: calendar label and demand before climate adjustment.
///
/// Immutable once produced by the projector; consumed by the mix simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionRow {
    /// Calendar year label.
    pub year: i32,
    /// Projected demand (MWh).
    pub demand_mwh: f64,
}

/// Complete record of one simulated year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualResult {
    /// Calendar year label.
    pub year: i32,
    /// Projected demand (MWh).
    pub demand_mwh: f64,
    /// Climate factor in effect for this year.
    pub climate_factor: f64,
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

impl AnnualResult {
    /// Total generation across all technologies (MWh).
    pub fn generation_mwh(&self) -> f64 {
        self.hydro_mwh + self.solar_mwh + self.thermal_mwh
    }

    /// Generation for a single technology (MWh).
    pub fn generation(&self, tech: Technology) -> f64 {
        match tech {
            Technology::Hydro => self.hydro_mwh,
            Technology::Solar => self.solar_mwh,
            Technology::Thermal => self.thermal_mwh,
        }
    }
}

impl fmt::Display for AnnualResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | demand={:>9.1} MWh | hydro={:>8.1}  solar={:>7.1}  thermal={:>8.1} | \
             deficit={:>7.1} | cost={:>11.0} USD  emissions={:>8.1} t  cmp={:>6.2} USD/MWh",
            self.year,
            self.demand_mwh,
            self.hydro_mwh,
            self.solar_mwh,
            self.thermal_mwh,
            self.deficit_mwh,
            self.cost_usd,
            self.emissions_tco2e,
            self.marginal_cost_usd_per_mwh,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_round_trips_through_str() {
        for region in Region::ALL {
            assert_eq!(region.name().parse::<Region>(), Ok(region));
        }
    }

    #[test]
    fn region_parse_is_case_insensitive() {
        assert_eq!("Costa".parse::<Region>(), Ok(Region::Costa));
        assert_eq!("SELVA".parse::<Region>(), Ok(Region::Selva));
    }

    #[test]
    fn unknown_region_is_rejected() {
        let err = "atlantis".parse::<Region>();
        assert_eq!(err, Err(SimError::UnknownRegion("atlantis".to_string())));
    }

    #[test]
    fn scenario_round_trips_through_str() {
        for scenario in ClimateScenario::ALL {
            assert_eq!(scenario.name().parse::<ClimateScenario>(), Ok(scenario));
        }
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        assert!("rainy".parse::<ClimateScenario>().is_err());
    }

    #[test]
    fn unknown_technology_is_rejected() {
        assert!("wind".parse::<Technology>().is_err());
    }

    #[test]
    fn thermal_is_not_renewable() {
        assert!(Technology::Hydro.is_renewable());
        assert!(Technology::Solar.is_renewable());
        assert!(!Technology::Thermal.is_renewable());
    }

    #[test]
    fn error_messages_name_the_offender() {
        let err = SimError::UnknownRegion("atlantis".to_string());
        assert!(format!("{err}").contains("atlantis"));

        let err = SimError::InvalidParameter {
            param: "demand_mwh",
            message: "must be >= 0".to_string(),
        };
        let rendered = format!("{err}");
        assert!(rendered.contains("demand_mwh"));
        assert!(rendered.contains("must be >= 0"));
    }

    #[test]
    fn annual_result_display_does_not_panic() {
        let r = AnnualResult {
            year: 2025,
            demand_mwh: 12000.0,
            climate_factor: 1.0,
            hydro_mwh: 6000.0,
            solar_mwh: 2400.0,
            thermal_mwh: 3600.0,
            deficit_mwh: 0.0,
            emissions_tco2e: 3072.0,
            cost_usd: 600_000.0,
            marginal_cost_usd_per_mwh: 50.0,
        };
        let s = format!("{r}");
        assert!(s.contains("2025"));
        assert!(!s.is_empty());
    }

    #[test]
    fn generation_total_sums_all_technologies() {
        let r = AnnualResult {
            year: 2025,
            demand_mwh: 100.0,
            climate_factor: 1.0,
            hydro_mwh: 50.0,
            solar_mwh: 20.0,
            thermal_mwh: 30.0,
            deficit_mwh: 0.0,
            emissions_tco2e: 0.0,
            cost_usd: 0.0,
            marginal_cost_usd_per_mwh: 0.0,
        };
        assert_eq!(r.generation_mwh(), 100.0);
        assert_eq!(r.generation(Technology::Solar), 20.0);
    }
}
