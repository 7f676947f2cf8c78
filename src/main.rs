//! gridmix entry point — CLI wiring and config-driven projection runs.

use std::path::Path;
use std::process;

use gridmix::config::ScenarioConfig;
use gridmix::io::export::export_csv;
use gridmix::sim::kpi::SummaryReport;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    region: Option<String>,
    climate: Option<String>,
    horizon: Option<usize>,
    growth: Option<f64>,
    results_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("gridmix — Regional demand projection and generation-mix simulator");
    eprintln!();
    eprintln!("Usage: gridmix [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>     Load scenario from TOML config file");
    eprintln!("  --preset <name>       Use a built-in preset (baseline, coastal_surge, drought_stress)");
    eprintln!("  --region <name>       Override region (costa, sierra, selva)");
    eprintln!("  --climate <name>      Override climate scenario (optimistic, normal, critical)");
    eprintln!("  --horizon <years>     Override projection horizon");
    eprintln!("  --growth <rate>       Override annual demand growth rate");
    eprintln!("  --results-out <path>  Export per-year results to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve               Start REST API server after the run");
        eprintln!("  --port <u16>          API server port (default: 3000)");
    }
    eprintln!("  --help                Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        region: None,
        climate: None,
        horizon: None,
        growth: None,
        results_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--region" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --region requires a name argument");
                    process::exit(1);
                }
                cli.region = Some(args[i].clone());
            }
            "--climate" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --climate requires a name argument");
                    process::exit(1);
                }
                cli.climate = Some(args[i].clone());
            }
            "--horizon" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --horizon requires a year-count argument");
                    process::exit(1);
                }
                if let Ok(h) = args[i].parse::<usize>() {
                    cli.horizon = Some(h);
                } else {
                    eprintln!("error: --horizon value \"{}\" is not a valid year count", args[i]);
                    process::exit(1);
                }
            }
            "--growth" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --growth requires a rate argument");
                    process::exit(1);
                }
                if let Ok(g) = args[i].parse::<f64>() {
                    cli.growth = Some(g);
                } else {
                    eprintln!("error: --growth value \"{}\" is not a valid rate", args[i]);
                    process::exit(1);
                }
            }
            "--results-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --results-out requires a path argument");
                    process::exit(1);
                }
                cli.results_out = Some(args[i].clone());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply CLI overrides
    if let Some(region) = cli.region {
        scenario.run.region = region;
    }
    if let Some(climate) = cli.climate {
        scenario.run.climate = climate;
    }
    if let Some(horizon) = cli.horizon {
        scenario.run.horizon_years = horizon;
    }
    if let Some(growth) = cli.growth {
        scenario.run.growth_rate = growth;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build and run
    let engine = match scenario.engine() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    let results = match engine.run() {
        Ok(results) => results,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    let summary = SummaryReport::from_results(&results);

    // Print per-year results
    println!(
        "Projection for {} under {} climate:",
        engine.region(),
        engine.scenario()
    );
    for r in &results {
        println!("{r}");
    }

    // Print summary report
    println!("\n{summary}");

    // Export CSV if requested
    if let Some(ref path) = cli.results_out {
        if let Err(e) = export_csv(&results, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Results written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(gridmix::api::AppState {
            run: gridmix::api::RunInfo {
                region: engine.region(),
                climate: engine.scenario(),
                horizon_years: scenario.run.horizon_years,
                growth_rate: scenario.run.growth_rate,
                anchor_year: scenario.run.anchor_year,
            },
            summary,
            results,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(gridmix::api::serve(state, addr));
    }
}
