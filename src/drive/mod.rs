//! Differential drivetrain
//!
//! Two [`MotorGroup`]s, one per [`Side`], commanded as a tank drive, plus a
//! single braking flag applied uniformly to every motor.
//!
//! # Behavior
//!
//! - Speeds are clamped to [-1.0, 1.0]; out-of-range input never fails.
//! - Each group applies a fixed inversion chosen at construction.
//! - `stop()` zeroes both sides and forces braking, whatever the prior mode.
//!
//! The only failure is construction-time misconfiguration, reported as
//! [`DriveError`].

pub mod drivetrain;
pub mod motor_group;

pub use drivetrain::Drivetrain;
pub use motor_group::MotorGroup;

use crate::side::Side;

/// Construction-time drivetrain misconfiguration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriveError {
    /// A motor group was given no motors
    #[error("{0} motor group has no motors")]
    EmptyGroup(Side),

    /// The same motor id was wired twice
    #[error("motor id {0} is used more than once")]
    DuplicateMotor(u32),
}

/// Clamp a speed command into [-1.0, 1.0]. NaN becomes 0.0.
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        return 0.0;
    }
    speed.clamp(-1.0, 1.0)
}
