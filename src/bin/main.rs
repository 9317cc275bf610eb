//! CLI tool for the telemetry monitor

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use telmon::config::Config;
use telmon::monitor::Monitor;
use telmon::sensors::SensorSource;
use telmon::staticinfo::StaticInfoSnapshot;

#[derive(Parser)]
#[command(name = "telmon")]
#[command(
    about = "Telemetry Monitor: scrolling terminal display of hardware sensors with CSV session recording",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Poll interval in seconds
    #[arg(short, long, global = true)]
    interval: Option<f64>,

    /// Path to a configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive terminal display (default)
    Tui,
    /// Print one snapshot of all sensor readings
    Snapshot {
        /// Output format (json or text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Record a session without the display, then stop
    Record {
        /// Recording duration in seconds
        #[arg(short, long, default_value = "60")]
        duration: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(interval) = cli.interval {
        config.general.update_interval_ms = ((interval * 1000.0) as u64).max(1);
    }

    let source = build_sensor_source()?;
    let static_info = StaticInfoSnapshot::collect();
    let mut monitor = Monitor::new(source, static_info, &config);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => telmon::tui::run(&mut monitor, &config)?,
        Commands::Snapshot { format } => run_snapshot(&mut monitor, &config, &format)?,
        Commands::Record { duration } => run_record(&mut monitor, &config, duration),
    }

    Ok(())
}

fn build_sensor_source() -> telmon::Result<Box<dyn SensorSource>> {
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(telmon::sensors::LinuxSensors::new()?))
    }
    #[cfg(not(target_os = "linux"))]
    {
        Err(telmon::MonitorError::UnsupportedPlatform(
            "no sensor source is available for this platform".to_string(),
        ))
    }
}

/// Poll once and print every reading
fn run_snapshot(
    monitor: &mut Monitor,
    config: &Config,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    monitor.tick();
    let snapshot = monitor.snapshot();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    for component in &snapshot.components {
        println!("{}", component.name);
        for sensor in &component.sensors {
            let value = match sensor.value {
                Some(v) => format!("{:.4}", v),
                None => config.general.missing_placeholder.clone(),
            };
            println!("  {:<28}{:<14}{:>14}", sensor.name, sensor.kind.to_string(), value);
        }
        println!();
    }

    Ok(())
}

/// Record for a fixed duration without the display
fn run_record(monitor: &mut Monitor, config: &Config, duration: u64) {
    let tick = Duration::from_millis(config.general.update_interval_ms.max(1));

    monitor.start_recording();
    if let Some(file) = monitor.current_file() {
        println!("Recording to {}", file.display());
    }

    let deadline = Instant::now() + Duration::from_secs(duration);
    while Instant::now() < deadline {
        monitor.tick();
        std::thread::sleep(tick);
    }

    monitor.stop_recording();
    println!("Recording complete");
}
