use anyhow::{Context, Result};
use clap::Parser;

use chassis::config;
use chassis::drive::Drivetrain;
use chassis::hardware::{MotorController, MotorProbe, SimMotor};
use chassis::input::{load_script, ScriptedSource};
use chassis::logging;
use chassis::{Cli, Robot, Side};

/// Cycles run without a script or --cycles
const DEFAULT_CYCLES: usize = 50;

fn sim_motors(ids: [u32; 2], probes: &mut Vec<MotorProbe>) -> Vec<Box<dyn MotorController>> {
    ids.into_iter()
        .map(|id| {
            let (motor, probe) = SimMotor::with_probe(id);
            probes.push(probe);
            Box::new(motor) as Box<dyn MotorController>
        })
        .collect()
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Config file first, command line overrides it
    let options = config::load_config(cli.config.as_deref())?;
    let options = cli.merge_into_options(options)?;

    logging::init_logging(options.log_level, options.log_file.as_deref())?;
    log::info!("chassis {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = logging::log_file_path() {
        log::info!("Logging to {}", path.display());
    }

    let mut probes = Vec::new();
    let left = sim_motors(options.drive.left(), &mut probes);
    let right = sim_motors(options.drive.right(), &mut probes);
    let drivetrain = Drivetrain::new(left, right).context("Failed to build drivetrain")?;
    for side in [Side::Left, Side::Right] {
        let group = drivetrain.group(side);
        log::info!(
            "{} side: motors {:?}, inverted={}",
            group.side(),
            group.motor_ids(),
            group.is_inverted()
        );
    }

    let source = match &cli.script {
        Some(path) => {
            let cycles = load_script(path)?;
            log::info!("Loaded {} cycles from {}", cycles.len(), path.display());
            ScriptedSource::new(options.drive_stick, cycles)
        }
        None => ScriptedSource::idle(options.drive_stick, cli.cycles.unwrap_or(DEFAULT_CYCLES)),
    };
    let cycles = cli.cycles.unwrap_or(source.remaining());

    let mut robot = Robot::new(drivetrain, &options, source);
    robot.run(cycles, options.period);
    robot.disable();

    for probe in &probes {
        let state = probe.state();
        log::info!(
            "motor {}: output {:+.3}, neutral {}, {} output commands",
            probe.id(),
            state.output,
            state
                .neutral_mode
                .map_or_else(|| "unset".to_string(), |m| m.to_string()),
            state.output_commands
        );
    }

    Ok(())
}
