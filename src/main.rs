//! Plant balance entry point — CLI wiring and config-driven engine construction.

use std::path::Path;
use std::process;

use nexus_sim::config::PlantConfig;
use nexus_sim::io::export::{export_stage_csv, export_sweep_csv};
use nexus_sim::sim::engine::BalanceEngine;
use nexus_sim::sim::sweep::{SweepParameter, run_sweep};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    csv_out: Option<String>,
    sweep: Option<String>,
    sweep_from: Option<f32>,
    sweep_to: Option<f32>,
    sweep_points: usize,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("nexus-sim — HTC/AD biomass plant steady-state balance engine");
    eprintln!();
    eprintln!("Usage: nexus-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        PlantConfig::PRESETS.join(", ")
    );
    eprintln!("  --csv-out <path>         Export results to CSV");
    eprintln!(
        "  --sweep <param>          Sweep one parameter ({})",
        SweepParameter::NAMES.join(", ")
    );
    eprintln!("  --sweep-from <f32>       Sweep range start");
    eprintln!("  --sweep-to <f32>         Sweep range end");
    eprintln!("  --sweep-points <n>       Number of sweep points (default: 11)");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the run");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_f32_arg(args: &[String], i: usize, flag: &str) -> f32 {
    if i >= args.len() {
        eprintln!("error: {flag} requires a numeric argument");
        process::exit(1);
    }
    match args[i].parse::<f32>() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("error: {flag} value \"{}\" is not a valid number", args[i]);
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        csv_out: None,
        sweep: None,
        sweep_from: None,
        sweep_to: None,
        sweep_points: 11,
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
            "--csv-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --csv-out requires a path argument");
                    process::exit(1);
                }
                cli.csv_out = Some(args[i].clone());
            }
            "--sweep" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --sweep requires a parameter name");
                    process::exit(1);
                }
                cli.sweep = Some(args[i].clone());
            }
            "--sweep-from" => {
                i += 1;
                cli.sweep_from = Some(parse_f32_arg(&args, i, "--sweep-from"));
            }
            "--sweep-to" => {
                i += 1;
                cli.sweep_to = Some(parse_f32_arg(&args, i, "--sweep-to"));
            }
            "--sweep-points" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --sweep-points requires a count argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<usize>() {
                    cli.sweep_points = n;
                } else {
                    eprintln!(
                        "error: --sweep-points value \"{}\" is not a valid count",
                        args[i]
                    );
                    process::exit(1);
                }
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

/// Runs a parameter sweep and writes or prints the resulting table.
fn run_sweep_mode(cli: &CliArgs, engine: &BalanceEngine, config: &PlantConfig, param_name: &str) {
    let parameter: SweepParameter = match param_name.parse() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let (Some(from), Some(to)) = (cli.sweep_from, cli.sweep_to) else {
        eprintln!("error: --sweep requires --sweep-from and --sweep-to");
        process::exit(1);
    };

    let rows = match run_sweep(
        engine,
        &config.inputs(),
        parameter,
        from,
        to,
        cli.sweep_points,
    ) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_sweep_csv(parameter.name(), &rows, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Sweep written to {path}");
    } else {
        println!(
            "{:>12}  {:>12}  {:>12}  {:>12}  {:>10}",
            parameter.name(),
            "gas kW",
            "steam kW",
            "net kW",
            "eta"
        );
        for r in &rows {
            println!(
                "{:>12.3}  {:>12.1}  {:>12.1}  {:>12.1}  {:>10.4}",
                r.value, r.gas_power_kw, r.steam_power_kw, r.net_power_kw, r.overall_efficiency
            );
        }
    }
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let config = if let Some(ref path) = cli.scenario_path {
        match PlantConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match PlantConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        PlantConfig::baseline()
    };

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let engine = BalanceEngine::new(config.engine_constants());

    // Sweep mode: evaluate the axis and exit
    if let Some(ref param_name) = cli.sweep {
        run_sweep_mode(&cli, &engine, &config, param_name);
        return;
    }

    // Single evaluation
    let inputs = config.inputs();
    let outputs = match engine.compute(&inputs) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    println!("{outputs}");

    // Export CSV if requested
    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_stage_csv(&outputs, Path::new(path)) {
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

        let state = Arc::new(nexus_sim::api::AppState {
            engine,
            inputs,
            outputs,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(nexus_sim::api::serve(state, addr));
    }
}
