//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sim::engine::Engine;
use crate::sim::tables::{RegionSpec, SystemTables, TechnologySpec};
use crate::sim::types::{ClimateScenario, Region, SimError};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Run parameters: region, scenario, horizon, growth rate.
    #[serde(default)]
    pub run: RunConfig,
    /// Per-region base demand and capacity tables.
    #[serde(default)]
    pub regions: RegionsConfig,
    /// Per-technology emission, cost, and share tables.
    #[serde(default)]
    pub technologies: TechnologiesConfig,
    /// Climate scenario multipliers for renewable output.
    #[serde(default)]
    pub climate_factors: ClimateFactorsConfig,
}

/// Run parameters selecting what to simulate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Region name: `"costa"`, `"sierra"`, or `"selva"`.
    pub region: String,
    /// Climate scenario name: `"optimistic"`, `"normal"`, or `"critical"`.
    pub climate: String,
    /// Projection horizon in years (must be >= 1).
    pub horizon_years: usize,
    /// Compound annual demand growth rate (must be >= -1).
    pub growth_rate: f64,
    /// First calendar year of the projection.
    pub anchor_year: i32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            region: "costa".to_string(),
            climate: "normal".to_string(),
            horizon_years: 10,
            growth_rate: 0.04,
            anchor_year: 2025,
        }
    }
}

/// One region's demand and capacity entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionConfig {
    /// Year-0 demand (MWh, must be > 0).
    pub base_demand_mwh: f64,
    /// Maximum hydro generation (MWh).
    pub hydro_capacity_mwh: f64,
    /// Maximum solar generation (MWh).
    pub solar_capacity_mwh: f64,
    /// Maximum thermal generation (MWh).
    pub thermal_capacity_mwh: f64,
}

/// Region table with one entry per region.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionsConfig {
    /// Coastal region entry.
    pub costa: RegionConfig,
    /// Highland region entry.
    pub sierra: RegionConfig,
    /// Rainforest region entry.
    pub selva: RegionConfig,
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            costa: RegionConfig {
                base_demand_mwh: 12_000.0,
                hydro_capacity_mwh: 15_000.0,
                solar_capacity_mwh: 8_000.0,
                thermal_capacity_mwh: 12_000.0,
            },
            sierra: RegionConfig {
                base_demand_mwh: 7_000.0,
                hydro_capacity_mwh: 20_000.0,
                solar_capacity_mwh: 3_000.0,
                thermal_capacity_mwh: 8_000.0,
            },
            selva: RegionConfig {
                base_demand_mwh: 4_000.0,
                hydro_capacity_mwh: 10_000.0,
                solar_capacity_mwh: 1_000.0,
                thermal_capacity_mwh: 5_000.0,
            },
        }
    }
}

/// One technology's emission, cost, and share entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TechnologyConfig {
    /// Emissions per unit of generation (tCO2e/MWh, >= 0).
    pub emission_factor_tco2e_per_mwh: f64,
    /// Cost per unit of generation (USD/MWh, >= 0).
    pub unit_cost_usd_per_mwh: f64,
    /// Fraction of demand allocated before clamping (shares sum to 1.0).
    pub base_share: f64,
}

/// Technology table with one entry per technology.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TechnologiesConfig {
    /// Hydro entry.
    pub hydro: TechnologyConfig,
    /// Solar entry.
    pub solar: TechnologyConfig,
    /// Thermal entry.
    pub thermal: TechnologyConfig,
}

impl Default for TechnologiesConfig {
    fn default() -> Self {
        Self {
            hydro: TechnologyConfig {
                emission_factor_tco2e_per_mwh: 0.02,
                unit_cost_usd_per_mwh: 30.0,
                base_share: 0.5,
            },
            solar: TechnologyConfig {
                emission_factor_tco2e_per_mwh: 0.03,
                unit_cost_usd_per_mwh: 40.0,
                base_share: 0.2,
            },
            thermal: TechnologyConfig {
                emission_factor_tco2e_per_mwh: 0.8,
                unit_cost_usd_per_mwh: 90.0,
                base_share: 0.3,
            },
        }
    }
}

/// Renewable availability multipliers per climate scenario.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClimateFactorsConfig {
    /// Multiplier under the optimistic scenario.
    pub optimistic: f64,
    /// Multiplier under the normal scenario.
    pub normal: f64,
    /// Multiplier under the critical scenario.
    pub critical: f64,
}

impl Default for ClimateFactorsConfig {
    fn default() -> Self {
        Self {
            optimistic: 1.1,
            normal: 1.0,
            critical: 0.8,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"run.horizon_years"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: Costa, normal climate, 10 years at 4%.
    pub fn baseline() -> Self {
        Self {
            run: RunConfig::default(),
            regions: RegionsConfig::default(),
            technologies: TechnologiesConfig::default(),
            climate_factors: ClimateFactorsConfig::default(),
        }
    }

    /// Returns the coastal-surge preset: fast coastal growth under an
    /// optimistic climate, demand outrunning capacity late in the horizon.
    pub fn coastal_surge() -> Self {
        Self {
            run: RunConfig {
                region: "costa".to_string(),
                climate: "optimistic".to_string(),
                horizon_years: 15,
                growth_rate: 0.08,
                ..RunConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the drought-stress preset: rainforest region under the
    /// critical climate with growth strong enough to open a deficit.
    pub fn drought_stress() -> Self {
        Self {
            run: RunConfig {
                region: "selva".to_string(),
                climate: "critical".to_string(),
                horizon_years: 12,
                growth_rate: 0.10,
                ..RunConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "coastal_surge", "drought_stress"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "coastal_surge" => Ok(Self::coastal_surge()),
            "drought_stress" => Ok(Self::drought_stress()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Parses the configured region name.
    ///
    /// # Errors
    ///
    /// Returns `SimError::UnknownRegion` for an unrecognized name.
    pub fn region(&self) -> Result<Region, SimError> {
        self.run.region.parse()
    }

    /// Parses the configured climate scenario name.
    ///
    /// # Errors
    ///
    /// Returns `SimError::UnknownScenario` for an unrecognized name.
    pub fn climate(&self) -> Result<ClimateScenario, SimError> {
        self.run.climate.parse()
    }

    /// Builds the immutable system tables from the configured entries.
    pub fn tables(&self) -> SystemTables {
        let region = |r: &RegionConfig| RegionSpec {
            base_demand_mwh: r.base_demand_mwh,
            hydro_capacity_mwh: r.hydro_capacity_mwh,
            solar_capacity_mwh: r.solar_capacity_mwh,
            thermal_capacity_mwh: r.thermal_capacity_mwh,
        };
        let tech = |t: &TechnologyConfig| TechnologySpec {
            emission_factor_tco2e_per_mwh: t.emission_factor_tco2e_per_mwh,
            unit_cost_usd_per_mwh: t.unit_cost_usd_per_mwh,
            base_share: t.base_share,
        };
        SystemTables::new(
            self.run.anchor_year,
            region(&self.regions.costa),
            region(&self.regions.sierra),
            region(&self.regions.selva),
            tech(&self.technologies.hydro),
            tech(&self.technologies.solar),
            tech(&self.technologies.thermal),
            self.climate_factors.optimistic,
            self.climate_factors.normal,
            self.climate_factors.critical,
        )
    }

    /// Builds a ready-to-run engine from this configuration.
    ///
    /// # Errors
    ///
    /// Returns a `SimError` if the region or climate name does not parse;
    /// call [`ScenarioConfig::validate`] first for full diagnostics.
    pub fn engine(&self) -> Result<Engine, SimError> {
        Ok(Engine::new(
            self.tables(),
            self.region()?,
            self.climate()?,
            self.run.horizon_years,
            self.run.growth_rate,
        ))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let run = &self.run;

        if let Err(e) = self.region() {
            errors.push(ConfigError {
                field: "run.region".into(),
                message: e.to_string(),
            });
        }
        if let Err(e) = self.climate() {
            errors.push(ConfigError {
                field: "run.climate".into(),
                message: e.to_string(),
            });
        }
        if run.horizon_years == 0 {
            errors.push(ConfigError {
                field: "run.horizon_years".into(),
                message: "must be >= 1".into(),
            });
        }
        if !run.growth_rate.is_finite() || run.growth_rate < -1.0 {
            errors.push(ConfigError {
                field: "run.growth_rate".into(),
                message: format!("must be finite and >= -1, got {}", run.growth_rate),
            });
        }

        for (name, region) in [
            ("regions.costa", &self.regions.costa),
            ("regions.sierra", &self.regions.sierra),
            ("regions.selva", &self.regions.selva),
        ] {
            if !region.base_demand_mwh.is_finite() || region.base_demand_mwh <= 0.0 {
                errors.push(ConfigError {
                    field: format!("{name}.base_demand_mwh"),
                    message: "must be > 0".into(),
                });
            }
            for (cap_name, cap) in [
                ("hydro_capacity_mwh", region.hydro_capacity_mwh),
                ("solar_capacity_mwh", region.solar_capacity_mwh),
                ("thermal_capacity_mwh", region.thermal_capacity_mwh),
            ] {
                if !cap.is_finite() || cap < 0.0 {
                    errors.push(ConfigError {
                        field: format!("{name}.{cap_name}"),
                        message: "must be >= 0".into(),
                    });
                }
            }
        }

        let mut share_sum = 0.0;
        for (name, tech) in [
            ("technologies.hydro", &self.technologies.hydro),
            ("technologies.solar", &self.technologies.solar),
            ("technologies.thermal", &self.technologies.thermal),
        ] {
            if !tech.emission_factor_tco2e_per_mwh.is_finite()
                || tech.emission_factor_tco2e_per_mwh < 0.0
            {
                errors.push(ConfigError {
                    field: format!("{name}.emission_factor_tco2e_per_mwh"),
                    message: "must be >= 0".into(),
                });
            }
            if !tech.unit_cost_usd_per_mwh.is_finite() || tech.unit_cost_usd_per_mwh < 0.0 {
                errors.push(ConfigError {
                    field: format!("{name}.unit_cost_usd_per_mwh"),
                    message: "must be >= 0".into(),
                });
            }
            if !tech.base_share.is_finite() || !(0.0..=1.0).contains(&tech.base_share) {
                errors.push(ConfigError {
                    field: format!("{name}.base_share"),
                    message: "must be in [0.0, 1.0]".into(),
                });
            }
            share_sum += tech.base_share;
        }
        if (share_sum - 1.0).abs() > 1e-6 {
            errors.push(ConfigError {
                field: "technologies".into(),
                message: format!("base shares must sum to 1.0, got {share_sum}"),
            });
        }

        for (name, factor) in [
            ("climate_factors.optimistic", self.climate_factors.optimistic),
            ("climate_factors.normal", self.climate_factors.normal),
            ("climate_factors.critical", self.climate_factors.critical),
        ] {
            if !factor.is_finite() || factor <= 0.0 {
                errors.push(ConfigError {
                    field: name.into(),
                    message: "must be > 0".into(),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_baseline() {
        let cfg = ScenarioConfig::from_preset("baseline");
        assert!(cfg.is_ok());
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[run]
region = "sierra"
climate = "critical"
horizon_years = 8
growth_rate = 0.05
anchor_year = 2030

[regions.costa]
base_demand_mwh = 11000.0
hydro_capacity_mwh = 14000.0
solar_capacity_mwh = 7500.0
thermal_capacity_mwh = 11000.0

[technologies.thermal]
emission_factor_tco2e_per_mwh = 0.75
unit_cost_usd_per_mwh = 85.0
base_share = 0.3

[climate_factors]
optimistic = 1.15
normal = 1.0
critical = 0.75
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| &*c.run.region), Some("sierra"));
        assert_eq!(cfg.as_ref().map(|c| c.run.horizon_years), Some(8));
        assert_eq!(cfg.as_ref().map(|c| c.climate_factors.critical), Some(0.75));
        assert_eq!(
            cfg.as_ref().map(|c| c.regions.costa.base_demand_mwh),
            Some(11_000.0)
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[run]
region = "costa"
bogus_field = true
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_zero_horizon() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.run.horizon_years = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "run.horizon_years"));
    }

    #[test]
    fn validation_catches_unknown_region() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.run.region = "atlantis".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "run.region"));
    }

    #[test]
    fn validation_catches_unknown_climate() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.run.climate = "rainy".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "run.climate"));
    }

    #[test]
    fn validation_catches_growth_below_minus_one() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.run.growth_rate = -2.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "run.growth_rate"));
    }

    #[test]
    fn validation_catches_negative_capacity() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.regions.selva.solar_capacity_mwh = -1.0;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "regions.selva.solar_capacity_mwh")
        );
    }

    #[test]
    fn validation_catches_shares_not_summing_to_one() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.technologies.hydro.base_share = 0.6;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "technologies"));
    }

    #[test]
    fn validation_catches_non_positive_climate_factor() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.climate_factors.critical = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "climate_factors.critical"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn coastal_surge_grows_faster_than_baseline() {
        let base = ScenarioConfig::baseline();
        let surge = ScenarioConfig::coastal_surge();
        assert!(surge.run.growth_rate > base.run.growth_rate);
        assert_eq!(surge.run.climate, "optimistic");
    }

    #[test]
    fn drought_stress_targets_selva_under_critical_climate() {
        let cfg = ScenarioConfig::drought_stress();
        assert_eq!(cfg.run.region, "selva");
        assert_eq!(cfg.run.climate, "critical");
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[run]
growth_rate = 0.07
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // growth_rate overridden
        assert_eq!(cfg.as_ref().map(|c| c.run.growth_rate), Some(0.07));
        // region kept default
        assert_eq!(cfg.as_ref().map(|c| &*c.run.region), Some("costa"));
        // tables kept default
        assert_eq!(
            cfg.as_ref().map(|c| c.regions.sierra.hydro_capacity_mwh),
            Some(20_000.0)
        );
    }

    #[test]
    fn tables_round_trip_configured_values() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.regions.costa.base_demand_mwh = 13_500.0;
        cfg.run.anchor_year = 2030;
        let tables = cfg.tables();
        assert_eq!(tables.region(Region::Costa).base_demand_mwh, 13_500.0);
        assert_eq!(tables.anchor_year, 2030);
    }

    #[test]
    fn engine_builds_from_valid_config() {
        let cfg = ScenarioConfig::baseline();
        let engine = cfg.engine();
        assert!(engine.is_ok());
        assert_eq!(engine.map(|e| e.region()), Ok(Region::Costa));
    }

    #[test]
    fn engine_rejects_unknown_region() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.run.region = "atlantis".to_string();
        assert!(matches!(cfg.engine(), Err(SimError::UnknownRegion(_))));
    }
}
