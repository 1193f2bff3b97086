use crate::config::{parse_period_ms, parse_port, Options};
use crate::logging::LogLevel;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Drivetrain controller simulator
#[derive(Parser, Debug, Default)]
#[command(name = "chassis")]
#[command(version = "0.3.0")]
#[command(about = "Tank drive robot controller with F310 gamepad input", long_about = None)]
pub struct Cli {
    /// Configuration file (key = value)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Gamepad input script replayed on the driver port
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Number of control cycles to run (default: script length, or 50)
    #[arg(short = 'n', long, value_name = "N")]
    pub cycles: Option<usize>,

    /// Control loop period in milliseconds
    #[arg(short, long = "period-ms", value_name = "MS")]
    pub period_ms: Option<String>,

    /// Log level (nothing, user, error, warning, info, debug, all or 0-6)
    #[arg(long, value_name = "LEVEL")]
    pub loglevel: Option<String>,

    /// Log file path
    #[arg(short, long, value_name = "FILE")]
    pub logfile: Option<PathBuf>,

    /// Driver gamepad port (0-5)
    #[arg(short, long = "drive-stick", value_name = "PORT")]
    pub drive_stick: Option<String>,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref period) = self.period_ms {
            opts.period = parse_period_ms(period)?;
        }

        if let Some(ref level) = self.loglevel {
            opts.log_level = level.parse::<LogLevel>()?;
        }

        if let Some(ref log_file) = self.logfile {
            opts.log_file = Some(log_file.clone());
        }

        if let Some(ref port) = self.drive_stick {
            opts.drive_stick = parse_port(port).context("Invalid --drive-stick")?;
        }

        opts.validate().context("Invalid options")?;

        Ok(opts)
    }
}
