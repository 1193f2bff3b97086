//! Hardware collaborators
//!
//! Traits for the devices the control core drives, plus simulated
//! implementations used by the simulator binary and the tests.

pub mod motor;

pub use motor::{MotorController, MotorProbe, MotorState, NeutralMode, SimMotor};
