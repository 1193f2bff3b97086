//! Motor controller interface
//!
//! The drivetrain talks to motor controllers only through [`MotorController`]:
//! a normalized output in [-1.0, 1.0] and a neutral mode. Nothing is read
//! back from the controller.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// What a motor controller does when commanded zero output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NeutralMode {
    /// Actively resist motion
    Brake,
    /// Spin freely
    #[default]
    Coast,
}

impl NeutralMode {
    /// Mode for a braking flag
    pub fn from_braking(braking: bool) -> Self {
        if braking {
            NeutralMode::Brake
        } else {
            NeutralMode::Coast
        }
    }

    pub fn is_brake(self) -> bool {
        self == NeutralMode::Brake
    }
}

impl fmt::Display for NeutralMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeutralMode::Brake => f.write_str("brake"),
            NeutralMode::Coast => f.write_str("coast"),
        }
    }
}

/// A single motor output on the robot.
///
/// Implementations wrap a CAN or PWM motor driver. The drivetrain owns its
/// controllers exclusively and calls them from the control loop thread.
pub trait MotorController: Send {
    /// Device id on the bus (used for diagnostics and duplicate checks)
    fn id(&self) -> u32;

    /// Command a normalized output. Callers pass values already in [-1.0, 1.0].
    fn set_output(&mut self, speed: f64);

    /// Select the neutral behavior
    fn set_neutral_mode(&mut self, mode: NeutralMode);
}

// ==============================================================================
// Simulated motor
// ==============================================================================

/// Last commands seen by a simulated motor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotorState {
    /// Last commanded output
    pub output: f64,
    /// Last neutral mode, `None` until one has been applied
    pub neutral_mode: Option<NeutralMode>,
    /// Number of `set_output` calls
    pub output_commands: u64,
    /// Number of `set_neutral_mode` calls
    pub mode_commands: u64,
}

/// In-memory motor controller used by the simulator and tests.
#[derive(Debug)]
pub struct SimMotor {
    id: u32,
    state: Arc<Mutex<MotorState>>,
}

impl SimMotor {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            state: Arc::new(Mutex::new(MotorState::default())),
        }
    }

    /// Create a motor and a probe observing it
    pub fn with_probe(id: u32) -> (Self, MotorProbe) {
        let motor = Self::new(id);
        let probe = motor.probe();
        (motor, probe)
    }

    /// Handle that keeps observing this motor after it is boxed and moved
    pub fn probe(&self) -> MotorProbe {
        MotorProbe {
            id: self.id,
            state: Arc::clone(&self.state),
        }
    }
}

impl MotorController for SimMotor {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_output(&mut self, speed: f64) {
        let mut state = self.state.lock();
        state.output = speed;
        state.output_commands += 1;
    }

    fn set_neutral_mode(&mut self, mode: NeutralMode) {
        let mut state = self.state.lock();
        state.neutral_mode = Some(mode);
        state.mode_commands += 1;
    }
}

/// Read-only view of a [`SimMotor`]
#[derive(Debug, Clone)]
pub struct MotorProbe {
    id: u32,
    state: Arc<Mutex<MotorState>>,
}

impl MotorProbe {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Copy of the current state
    pub fn state(&self) -> MotorState {
        *self.state.lock()
    }

    pub fn output(&self) -> f64 {
        self.state.lock().output
    }

    pub fn neutral_mode(&self) -> Option<NeutralMode> {
        self.state.lock().neutral_mode
    }
}
