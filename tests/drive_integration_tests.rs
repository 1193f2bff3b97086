//! Integration tests for the drivetrain and the control loop
//!
//! Uses simulated motors and watches them through probes.

use std::io::Write;
use std::time::Duration;

use chassis::config::{load_config, Options};
use chassis::drive::{DriveError, Drivetrain};
use chassis::hardware::{MotorController, MotorProbe, NeutralMode, SimMotor};
use chassis::input::{load_script, ScriptedSource};
use chassis::{Robot, Side};

fn build(ids: [u32; 4]) -> (Result<Drivetrain, DriveError>, Vec<MotorProbe>) {
    let mut probes = Vec::new();
    let mut motors: Vec<Box<dyn MotorController>> = Vec::new();
    for id in ids {
        let (motor, probe) = SimMotor::with_probe(id);
        motors.push(Box::new(motor));
        probes.push(probe);
    }
    let right = motors.split_off(2);
    (Drivetrain::new(motors, right), probes)
}

fn outputs(probes: &[MotorProbe]) -> Vec<f64> {
    probes.iter().map(|p| p.output()).collect()
}

#[test]
fn test_drive_then_stop() {
    let (drivetrain, probes) = build([1, 2, 3, 4]);
    let mut drivetrain = drivetrain.unwrap();

    drivetrain.drive(0.5, -0.5);
    assert_eq!(outputs(&probes), vec![-0.5, -0.5, 0.5, 0.5]);
    assert!(!drivetrain.is_braking());

    drivetrain.stop();
    assert_eq!(outputs(&probes), vec![0.0; 4]);
    assert!(drivetrain.is_braking());
    for probe in &probes {
        assert_eq!(probe.neutral_mode(), Some(NeutralMode::Brake));
    }
}

#[test]
fn test_new_drivetrain_coasts() {
    let (drivetrain, probes) = build([1, 2, 3, 4]);
    let drivetrain = drivetrain.unwrap();

    assert!(!drivetrain.is_braking());
    assert_eq!(drivetrain.neutral_mode(), NeutralMode::Coast);
    for probe in &probes {
        assert_eq!(probe.neutral_mode(), Some(NeutralMode::Coast));
        assert_eq!(probe.state().output_commands, 0);
    }
    assert_eq!(drivetrain.group(Side::Left).motor_ids(), vec![1, 2]);
    assert_eq!(drivetrain.group(Side::Right).motor_ids(), vec![3, 4]);
}

#[test]
fn test_out_of_range_speeds_clamp() {
    let (drivetrain, probes) = build([1, 2, 3, 4]);
    let mut drivetrain = drivetrain.unwrap();

    drivetrain.drive(3.0, -7.5);
    assert_eq!(outputs(&probes), vec![-1.0, -1.0, 1.0, 1.0]);
}

#[test]
fn test_duplicate_motor_rejected() {
    let (drivetrain, _) = build([1, 2, 3, 1]);
    assert_eq!(drivetrain.unwrap_err(), DriveError::DuplicateMotor(1));
}

#[test]
fn test_scripted_run_from_config() {
    let dir = tempfile::tempdir().unwrap();

    let config_path = dir.path().join("robot.cfg");
    let mut config = std::fs::File::create(&config_path).unwrap();
    writeln!(config, "drive.left_front = 11").unwrap();
    writeln!(config, "drive.left_rear = 12").unwrap();
    writeln!(config, "drive.right_front = 13").unwrap();
    writeln!(config, "drive.right_rear = 14").unwrap();
    writeln!(config, "input.drive_stick = 2").unwrap();
    writeln!(config, "input.manipulator_stick = 3").unwrap();
    writeln!(config, "bind.brake = A").unwrap();

    let script_path = dir.path().join("drive.txt");
    let mut script = std::fs::File::create(&script_path).unwrap();
    writeln!(script, "# forward, then brake while turning").unwrap();
    writeln!(script, "a1=-0.6 a5=-0.6 *3").unwrap();
    writeln!(script, "A a1=-0.6 a5=0.6").unwrap();

    let options = load_config(Some(&config_path)).unwrap();
    assert!(options.validate().is_ok());

    let mut probes = Vec::new();
    let mut sides = Vec::new();
    for ids in [options.drive.left(), options.drive.right()] {
        let mut motors: Vec<Box<dyn MotorController>> = Vec::new();
        for id in ids {
            let (motor, probe) = SimMotor::with_probe(id);
            motors.push(Box::new(motor));
            probes.push(probe);
        }
        sides.push(motors);
    }
    let right = sides.pop().unwrap();
    let left = sides.pop().unwrap();
    let drivetrain = Drivetrain::new(left, right).unwrap();

    let source = ScriptedSource::new(options.drive_stick, load_script(&script_path).unwrap());
    let mut robot = Robot::new(drivetrain, &options, source);
    robot.run(4, Duration::ZERO);

    assert_eq!(robot.cycles(), 4);
    assert!(robot.drivetrain().is_braking());
    assert_eq!(outputs(&probes), vec![-0.6, -0.6, 0.6, 0.6]);
    assert_eq!(
        probes.iter().map(|p| p.id()).collect::<Vec<_>>(),
        vec![11, 12, 13, 14]
    );

    robot.disable();
    assert_eq!(outputs(&probes), vec![0.0; 4]);
}

#[test]
fn test_default_options_wiring() {
    let options = Options::default();
    assert_eq!(options.drive.left(), [1, 2]);
    assert_eq!(options.drive.right(), [3, 4]);
    assert_eq!(options.drive_stick, 0);
    assert_eq!(options.manipulator_stick, 1);
}
