//! Placement simulator CLI
//!
//! Parses and validates the configuration surface, runs the core
//! simulation, and prints the final statistics and comparison table.
//! Validation failures are fatal here; the core assumes a valid
//! configuration and never re-checks it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use placement_simulator_core_rs::{
    JobMix, Simulation, SimulationConfig, PREFILL_HORIZON, SAMPLE_INTERVAL,
};

#[derive(Parser, Debug)]
#[command(
    name = "placement-sim",
    about = "Compare First/Next/Best/Worst Fit placement under one synthetic workload",
    version
)]
struct Args {
    /// Name reported in diagnostics and the completion banner
    #[arg(long, default_value = "defaultTest")]
    test_name: String,

    /// Seed for the deterministic draw source
    #[arg(long, default_value_t = 125)]
    seed: u64,

    /// Percentage of small jobs in the mix
    #[arg(long, default_value_t = 33)]
    percent_small: u32,

    /// Percentage of medium jobs in the mix
    #[arg(long, default_value_t = 33)]
    percent_medium: u32,

    /// Percentage of large jobs in the mix
    #[arg(long, default_value_t = 34)]
    percent_large: u32,

    /// Bytes per pool unit (positive multiple of 8)
    #[arg(long, default_value_t = 8)]
    unit_size: u64,

    /// Number of units in each policy's pool
    #[arg(long, default_value_t = 5000)]
    unit_count: usize,

    /// Destination for the summary rows
    #[arg(long, default_value = "out/summary.csv")]
    summary_file: PathBuf,

    /// Destination for the First Fit allocation/free log
    #[arg(long, default_value = "out/log_firstfit.csv")]
    log_first_fit: PathBuf,

    /// Destination for the Next Fit allocation/free log
    #[arg(long, default_value = "out/log_nextfit.csv")]
    log_next_fit: PathBuf,

    /// Destination for the Best Fit allocation/free log
    #[arg(long, default_value = "out/log_bestfit.csv")]
    log_best_fit: PathBuf,

    /// Destination for the Worst Fit allocation/free log
    #[arg(long, default_value = "out/log_worstfit.csv")]
    log_worst_fit: PathBuf,
}

/// Configuration surface violations. All fatal.
#[derive(Debug, Error)]
enum ConfigError {
    #[error("job mix percentages must sum to exactly 100, got {0}")]
    MixSum(u32),

    #[error("unit size must be positive, got {0}")]
    UnitSizeZero(u64),

    #[error("unit size must be a multiple of 8, got {0}")]
    UnitSizeAlignment(u64),

    #[error("unit count must be positive")]
    UnitCountZero,
}

fn validate(args: &Args) -> Result<(), ConfigError> {
    let mix_sum = args.percent_small + args.percent_medium + args.percent_large;
    if mix_sum != 100 {
        return Err(ConfigError::MixSum(mix_sum));
    }
    if args.unit_size == 0 {
        return Err(ConfigError::UnitSizeZero(args.unit_size));
    }
    if args.unit_size % 8 != 0 {
        return Err(ConfigError::UnitSizeAlignment(args.unit_size));
    }
    if args.unit_count == 0 {
        return Err(ConfigError::UnitCountZero);
    }
    Ok(())
}

fn print_configuration(args: &Args) {
    println!("Configuration:");
    println!("Test name: {}", args.test_name);
    println!("Seed: {}", args.seed);
    println!("Percent small jobs: {}", args.percent_small);
    println!("Percent medium jobs: {}", args.percent_medium);
    println!("Percent large jobs: {}", args.percent_large);
    println!("Memory unit size (in bytes): {}", args.unit_size);
    println!("Memory unit count: {}", args.unit_count);
    println!("Prefill time: {}", PREFILL_HORIZON);
    println!("Sampling interval: {}", SAMPLE_INTERVAL);
    println!();
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    validate(&args)?;
    print_configuration(&args);

    let config = SimulationConfig {
        test_name: args.test_name.clone(),
        job_mix: JobMix {
            percent_small: args.percent_small,
            percent_medium: args.percent_medium,
            percent_large: args.percent_large,
        },
        unit_size: args.unit_size,
        unit_count: args.unit_count,
        seed: args.seed,
        summary_path: args.summary_file,
        log_first_fit: args.log_first_fit,
        log_next_fit: args.log_next_fit,
        log_best_fit: args.log_best_fit,
        log_worst_fit: args.log_worst_fit,
    };

    log::info!(
        "starting run '{}' (seed {}, pool {} x {} bytes)",
        config.test_name,
        config.seed,
        config.unit_count,
        config.unit_size
    );
    log::debug!("summary -> {}", config.summary_path.display());

    let mut simulation = Simulation::new(config);
    let report = simulation.run()?;

    log::info!(
        "run complete: {} samples over {} time steps",
        report.sample_count,
        report.total_time_steps
    );

    print!("{}", report.render());
    println!();
    println!("Simulation complete for test: {}", args.test_name);

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
