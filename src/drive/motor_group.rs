//! Motor groups
//!
//! All motors on one side of the drivetrain, commanded in lockstep.

use super::{clamp_speed, DriveError};
use crate::hardware::{MotorController, NeutralMode};
use crate::side::Side;

/// One side of the drivetrain.
///
/// Every motor receives the same output and the same neutral mode. The
/// group's forward direction may be inverted relative to raw motor polarity
/// to compensate for mounting; the inversion cannot change after
/// construction.
pub struct MotorGroup {
    side: Side,
    motors: Vec<Box<dyn MotorController>>,
    inverted: bool,
}

impl MotorGroup {
    /// Create a group. Fails if `motors` is empty.
    pub fn new(
        side: Side,
        motors: Vec<Box<dyn MotorController>>,
        inverted: bool,
    ) -> Result<Self, DriveError> {
        if motors.is_empty() {
            return Err(DriveError::EmptyGroup(side));
        }

        let ids: Vec<u32> = motors.iter().map(|m| m.id()).collect();
        log::info!(
            "{} motor group: motors {:?}, inverted={}",
            side,
            ids,
            inverted
        );

        Ok(Self {
            side,
            motors,
            inverted,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Ids of the motors in wiring order
    pub fn motor_ids(&self) -> Vec<u32> {
        self.motors.iter().map(|m| m.id()).collect()
    }

    /// Command the group. The speed is clamped, then inverted if needed.
    pub fn set(&mut self, speed: f64) {
        let clamped = clamp_speed(speed);
        if clamped != speed && !speed.is_nan() {
            log::debug!("{} speed {} clamped to {}", self.side, speed, clamped);
        }

        let output = if self.inverted { -clamped } else { clamped };
        for motor in &mut self.motors {
            motor.set_output(output);
        }
    }

    /// Apply a neutral mode to every motor in the group
    pub fn set_neutral_mode(&mut self, mode: NeutralMode) {
        for motor in &mut self.motors {
            motor.set_neutral_mode(mode);
        }
    }
}

impl std::fmt::Debug for MotorGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotorGroup")
            .field("side", &self.side)
            .field("motors", &self.motor_ids())
            .field("inverted", &self.inverted)
            .finish()
    }
}
