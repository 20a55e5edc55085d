use env_logger::Env;
use vault_runner::{DashboardState, ScenarioConfig};

fn print_help() {
    eprintln!(
        r#"Vault Runner - DeFi vault risk model dashboard

USAGE:
    vault-runner [OPTIONS]

OPTIONS:
    --config <PATH>     Load scenario from JSON file
    --strict            Reject out-of-range parameters instead of clamping
    --pretty            Pretty-print the JSON report
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Report for the default vault
    vault-runner --pretty

    # Report for a scenario, failing on invalid parameters
    vault-runner --config vault.json --strict
"#
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut strict = false;
    let mut pretty = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--strict" => strict = true,
            "--pretty" => pretty = true,
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let scenario = match config_path {
        Some(path) => {
            log::info!("Loading scenario from: {}", path);
            ScenarioConfig::from_file(&path)?
        }
        None => {
            log::info!("Using default scenario");
            ScenarioConfig::default()
        }
    };

    let state = if strict {
        DashboardState::strict(scenario)?
    } else {
        DashboardState::new(scenario)
    };

    let report = state.report();
    log::info!("Scenario: {}", report.name);
    log::info!(
        "Pools: {} (cap {} bp, allocated {} bp)",
        report.allocation.pools.len(),
        report.allocation.max_weight_bp,
        report.allocation.total_weight_bp
    );
    log::info!(
        "Liquidity: target {} bp, triggers [{}, {}] bp",
        report.liquidity.target_ratio_bp,
        report.liquidity.low_trigger_bp,
        report.liquidity.high_trigger_bp
    );
    log::info!(
        "Transaction: ratioDiff0 {} bp, slippage {} bp",
        report.slippage.ratio_diff0_bp,
        report.slippage.slippage_bp
    );

    println!("{}", state.report_json(pretty)?);
    Ok(())
}
