//! Robot container and the fixed-rate control loop.
//!
//! One cycle reads both gamepads, applies the button bindings and tank
//! drives from the driver's sticks. If the driver's gamepad stops
//! delivering samples the drivetrain is stopped until it comes back.

use std::thread;
use std::time::{Duration, Instant};

use crate::config::Options;
use crate::drive::Drivetrain;
use crate::input::{Action, ControlBindings, F310Controller, HidSource};
use crate::side::Side;

/// What a single control cycle did with the drivetrain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Tank drive from the sticks
    Driven,
    /// Stop binding held
    Stopped,
    /// Driver gamepad had no data
    DriverLost,
}

pub struct Robot<S: HidSource> {
    drivetrain: Drivetrain,
    driver: F310Controller,
    manipulator: F310Controller,
    bindings: ControlBindings,
    source: S,
    cycles: u64,
}

impl<S: HidSource> Robot<S> {
    pub fn new(drivetrain: Drivetrain, options: &Options, source: S) -> Self {
        log::info!(
            "Robot ready: driver on port {}, manipulator on port {}",
            options.drive_stick,
            options.manipulator_stick
        );
        for (action, button) in options.bindings.iter() {
            log::info!("  {} -> {}", action, button);
        }
        Self {
            drivetrain,
            driver: F310Controller::new(options.drive_stick),
            manipulator: F310Controller::new(options.manipulator_stick),
            bindings: options.bindings.clone(),
            source,
            cycles: 0,
        }
    }

    pub fn drivetrain(&self) -> &Drivetrain {
        &self.drivetrain
    }

    pub fn drivetrain_mut(&mut self) -> &mut Drivetrain {
        &mut self.drivetrain
    }

    pub fn driver(&self) -> &F310Controller {
        &self.driver
    }

    pub fn manipulator(&self) -> &F310Controller {
        &self.manipulator
    }

    pub fn bindings(&self) -> &ControlBindings {
        &self.bindings
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Cycles run so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one control cycle
    pub fn run_cycle(&mut self) -> CycleOutcome {
        self.cycles += 1;

        let driver_ok = self.driver.poll(&mut self.source);
        self.manipulator.poll(&mut self.source);

        let outcome = if !driver_ok {
            self.drivetrain.stop();
            CycleOutcome::DriverLost
        } else {
            self.apply_bindings()
        };

        self.drivetrain.periodic();
        outcome
    }

    // Brake and coast act on the press edge; coast wins if both are pressed
    // in the same cycle. Stop acts while held.
    fn apply_bindings(&mut self) -> CycleOutcome {
        if self
            .driver
            .pressed_since_last_poll(self.bindings.button(Action::Brake))
        {
            self.drivetrain.set_braking(true);
        }
        if self
            .driver
            .pressed_since_last_poll(self.bindings.button(Action::Coast))
        {
            self.drivetrain.set_braking(false);
        }

        if self.driver.is_down(self.bindings.button(Action::Stop)) {
            self.drivetrain.stop();
            return CycleOutcome::Stopped;
        }

        // Pushing a stick forward reads negative
        let left = -self.driver.y(Side::Left);
        let right = -self.driver.y(Side::Right);
        self.drivetrain.drive(left, right);
        CycleOutcome::Driven
    }

    /// Leave the enabled state
    pub fn disable(&mut self) {
        log::info!("Robot disabled after {} cycles", self.cycles);
        self.drivetrain.stop();
    }

    /// Run `cycles` control cycles, one every `period`.
    ///
    /// A zero period runs the cycles back to back.
    pub fn run(&mut self, cycles: usize, period: Duration) {
        log::info!("Running {} cycles at {:?}", cycles, period);
        let mut overruns = 0usize;

        for _ in 0..cycles {
            let start = Instant::now();
            self.run_cycle();

            if period.is_zero() {
                continue;
            }
            let elapsed = start.elapsed();
            match period.checked_sub(elapsed) {
                Some(rest) => thread::sleep(rest),
                None => {
                    overruns += 1;
                    log::warn!(
                        "Cycle {} overran: {:?} > {:?}",
                        self.cycles,
                        elapsed,
                        period
                    );
                }
            }
        }

        if overruns > 0 {
            log::warn!("{} of {} cycles overran", overruns, cycles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{MotorController, MotorProbe, SimMotor};
    use crate::input::{parse_script, Button, ScriptedSource};

    struct Rig {
        robot: Robot<ScriptedSource>,
        probes: Vec<MotorProbe>,
    }

    impl Rig {
        fn new(script: &str) -> Self {
            Self::with_options(script, Options::default())
        }

        fn with_options(script: &str, options: Options) -> Self {
            let mut probes = Vec::new();
            let mut motors: Vec<Box<dyn MotorController>> = Vec::new();
            for id in 1..=4 {
                let (motor, probe) = SimMotor::with_probe(id);
                motors.push(Box::new(motor));
                probes.push(probe);
            }
            let right = motors.split_off(2);
            let drivetrain = Drivetrain::new(motors, right).unwrap();
            let source = ScriptedSource::new(options.drive_stick, parse_script(script).unwrap());

            Self {
                robot: Robot::new(drivetrain, &options, source),
                probes,
            }
        }

        fn outputs(&self) -> Vec<f64> {
            self.probes.iter().map(|p| p.output()).collect()
        }
    }

    #[test]
    fn test_sticks_drive_tank() {
        let mut rig = Rig::new("a1=-0.5 a5=0.25");
        assert_eq!(rig.robot.run_cycle(), CycleOutcome::Driven);
        // drive(0.5, -0.25), both sides inverted
        assert_eq!(rig.outputs(), vec![-0.5, -0.5, 0.25, 0.25]);
        assert!(!rig.robot.drivetrain().is_braking());
    }

    #[test]
    fn test_brake_and_coast_on_press() {
        let mut rig = Rig::new("X\nX\nidle\nY");
        rig.robot.run_cycle();
        assert!(rig.robot.drivetrain().is_braking());

        rig.robot.drivetrain_mut().set_braking(false);
        rig.robot.run_cycle();
        // Still held, no new press
        assert!(!rig.robot.drivetrain().is_braking());

        rig.robot.drivetrain_mut().set_braking(true);
        rig.robot.run_cycle();
        rig.robot.run_cycle();
        assert!(!rig.robot.drivetrain().is_braking());
    }

    #[test]
    fn test_stop_while_held() {
        let mut rig = Rig::new("a1=-1.0 a5=-1.0\nB a1=-1.0 a5=-1.0\na1=-1.0 a5=-1.0");
        rig.robot.run_cycle();
        assert_eq!(rig.outputs(), vec![-1.0; 4]);

        assert_eq!(rig.robot.run_cycle(), CycleOutcome::Stopped);
        assert_eq!(rig.outputs(), vec![0.0; 4]);
        assert!(rig.robot.drivetrain().is_braking());

        // Released: driving resumes, braking stays
        assert_eq!(rig.robot.run_cycle(), CycleOutcome::Driven);
        assert_eq!(rig.outputs(), vec![-1.0; 4]);
        assert!(rig.robot.drivetrain().is_braking());
    }

    #[test]
    fn test_rebound_stop_button() {
        let mut options = Options::default();
        options.bindings.bind(Action::Stop, Button::Start);
        let mut rig = Rig::with_options("B a1=-1.0\nStart a1=-1.0", options);

        assert_eq!(rig.robot.run_cycle(), CycleOutcome::Driven);
        assert_eq!(rig.robot.run_cycle(), CycleOutcome::Stopped);
    }

    #[test]
    fn test_driver_lost_stops() {
        let mut rig = Rig::new("a1=-0.8 a5=-0.8\ndisconnect\na1=-0.8 a5=-0.8");
        rig.robot.run_cycle();
        assert_eq!(rig.outputs(), vec![-0.8; 4]);

        assert_eq!(rig.robot.run_cycle(), CycleOutcome::DriverLost);
        assert_eq!(rig.outputs(), vec![0.0; 4]);
        assert!(rig.robot.drivetrain().is_braking());
        assert!(!rig.robot.driver().is_connected());

        assert_eq!(rig.robot.run_cycle(), CycleOutcome::Driven);
        assert!(rig.robot.driver().is_connected());
    }

    #[test]
    fn test_exhausted_script_counts_as_lost() {
        let mut rig = Rig::new("a1=-0.5");
        rig.robot.run_cycle();
        assert_eq!(rig.robot.run_cycle(), CycleOutcome::DriverLost);
        assert_eq!(rig.outputs(), vec![0.0; 4]);
    }

    #[test]
    fn test_manipulator_port_has_no_data() {
        let mut rig = Rig::new("idle");
        rig.robot.run_cycle();
        assert_eq!(rig.robot.manipulator().port(), 1);
        assert!(!rig.robot.manipulator().is_connected());
        assert_eq!(rig.robot.driver().port(), 0);
    }

    #[test]
    fn test_disable_stops() {
        let mut rig = Rig::new("a1=-0.5 a5=-0.5");
        rig.robot.run_cycle();
        rig.robot.disable();
        assert_eq!(rig.outputs(), vec![0.0; 4]);
        assert!(rig.robot.drivetrain().is_braking());
    }

    #[test]
    fn test_run_counts_cycles() {
        let mut rig = Rig::new("idle *5");
        rig.robot.run(5, Duration::ZERO);
        assert_eq!(rig.robot.cycles(), 5);
        assert_eq!(rig.robot.source().remaining(), 0);
    }

    #[test]
    fn test_run_with_period() {
        let mut rig = Rig::new("idle *3");
        let start = Instant::now();
        rig.robot.run(3, Duration::from_millis(2));
        assert!(start.elapsed() >= Duration::from_millis(6));
        assert_eq!(rig.robot.cycles(), 3);
    }

    #[test]
    fn test_idle_sample_drives_zero() {
        let mut rig = Rig::new("idle");
        rig.robot.run_cycle();
        assert_eq!(rig.outputs(), vec![0.0; 4]);
        assert_eq!(rig.robot.driver().y(Side::Left), 0.0);
        assert!(rig.robot.driver().held_buttons().is_empty());
    }
}
