use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use sensor_data_logger::control_lib::run_control_loop;
use sensor_data_logger::logger_lib::SensorDataLogger;

#[derive(Parser)]
#[command(about = "Appends simulated environment sensor readings to a CSV log")]
struct Cli {
    /// CSV file the readings are appended to
    #[arg(short, long, default_value = "sensor_data.csv")]
    output: PathBuf,

    /// Skip the header row when starting a brand-new file
    #[arg(long)]
    no_header: bool,

    /// Seed for the sensor simulation, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut logger = SensorDataLogger::open(&cli.output, !cli.no_header, rng)
        .with_context(|| format!("cannot log to {}", cli.output.display()))?;

    let stdin = io::stdin();
    let logged = run_control_loop(&mut stdin.lock(), &mut logger)?;
    logger.close()?;

    info!("{logged} readings appended to {}", cli.output.display());
    Ok(())
}
