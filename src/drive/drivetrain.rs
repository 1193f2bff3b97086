//! Tank drivetrain with a persistent braking mode.

use std::collections::HashSet;

use super::{clamp_speed, DriveError, MotorGroup};
use crate::hardware::{MotorController, NeutralMode};
use crate::side::Side;

/// A differential drivetrain controller.
///
/// Owns the left and right [`MotorGroup`]s and the braking flag. Both
/// groups are inverted because of the way the gearboxes are mounted. A new
/// drivetrain coasts.
///
/// Only the braking flag affects later commands. Whether the last command
/// was non-zero is tracked for logging.
#[derive(Debug)]
pub struct Drivetrain {
    left: MotorGroup,
    right: MotorGroup,
    braking: bool,
    moving: bool,
}

impl Drivetrain {
    /// Build a drivetrain from the motors on each side.
    ///
    /// Fails fast if either side has no motors or a motor id appears twice.
    /// All motors are put in coast mode.
    ///
    /// # Example
    ///
    /// ```
    /// use chassis::drive::Drivetrain;
    /// use chassis::hardware::{MotorController, SimMotor};
    ///
    /// let left: Vec<Box<dyn MotorController>> =
    ///     vec![Box::new(SimMotor::new(1)), Box::new(SimMotor::new(2))];
    /// let right: Vec<Box<dyn MotorController>> =
    ///     vec![Box::new(SimMotor::new(3)), Box::new(SimMotor::new(4))];
    /// let mut drivetrain = Drivetrain::new(left, right).unwrap();
    /// drivetrain.drive(0.5, 0.5);
    /// assert!(!drivetrain.is_braking());
    /// ```
    pub fn new(
        left: Vec<Box<dyn MotorController>>,
        right: Vec<Box<dyn MotorController>>,
    ) -> Result<Self, DriveError> {
        let mut seen = HashSet::new();
        for id in left.iter().chain(right.iter()).map(|m| m.id()) {
            if !seen.insert(id) {
                return Err(DriveError::DuplicateMotor(id));
            }
        }

        let mut drivetrain = Self {
            left: MotorGroup::new(Side::Left, left, true)?,
            right: MotorGroup::new(Side::Right, right, true)?,
            braking: false,
            moving: false,
        };
        drivetrain.apply_neutral_mode();

        Ok(drivetrain)
    }

    /// Tank drive: command each side independently.
    ///
    /// Inputs are clamped to [-1.0, 1.0] before the group inversion is
    /// applied.
    pub fn drive(&mut self, left: f64, right: f64) {
        self.left.set(left);
        self.right.set(right);
        self.moving = clamp_speed(left) != 0.0 || clamp_speed(right) != 0.0;
    }

    /// Arcade drive: forward speed plus rotation, mixed into tank commands.
    ///
    /// - left = speed + rotation
    /// - right = speed - rotation
    ///
    /// If either side would exceed 1.0 in magnitude both are scaled down by
    /// the same factor, so the turn ratio is kept.
    pub fn arcade(&mut self, speed: f64, rotation: f64) {
        let speed = clamp_speed(speed);
        let rotation = clamp_speed(rotation);

        let mut left = speed + rotation;
        let mut right = speed - rotation;

        let max = left.abs().max(right.abs());
        if max > 1.0 {
            left /= max;
            right /= max;
        }

        self.drive(left, right);
    }

    /// Set the braking flag and push the matching neutral mode to all motors.
    ///
    /// Repeating the same value re-sends the same mode.
    pub fn set_braking(&mut self, enabled: bool) {
        if self.braking != enabled {
            log::info!(
                "drivetrain neutral mode: {}",
                NeutralMode::from_braking(enabled)
            );
        } else {
            log::debug!(
                "drivetrain neutral mode unchanged: {}",
                NeutralMode::from_braking(enabled)
            );
        }

        self.braking = enabled;
        self.apply_neutral_mode();
    }

    /// Enum form of [`Drivetrain::set_braking`]
    pub fn set_neutral_mode(&mut self, mode: NeutralMode) {
        self.set_braking(mode.is_brake());
    }

    pub fn is_braking(&self) -> bool {
        self.braking
    }

    pub fn neutral_mode(&self) -> NeutralMode {
        NeutralMode::from_braking(self.braking)
    }

    /// Emergency halt: zero both sides and force braking.
    ///
    /// Logged at info only when it halts motion or engages the brake;
    /// repeated stops (held stop button, lost gamepad) log at debug.
    pub fn stop(&mut self) {
        if self.stop_changes_state() {
            log::info!("drivetrain stop");
        } else {
            log::debug!("drivetrain stop (already stopped)");
        }
        self.drive(0.0, 0.0);
        self.set_braking(true);
    }

    fn stop_changes_state(&self) -> bool {
        self.moving || !self.braking
    }

    /// Called once per control cycle by the scheduler.
    ///
    /// Nothing to do yet; reserved for telemetry and safety checks.
    pub fn periodic(&mut self) {}

    /// The motor group on one side
    pub fn group(&self, side: Side) -> &MotorGroup {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn apply_neutral_mode(&mut self) {
        let mode = self.neutral_mode();
        self.left.set_neutral_mode(mode);
        self.right.set_neutral_mode(mode);
    }
}
