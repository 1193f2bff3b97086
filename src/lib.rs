// Chassis: tank drive robot controller
// Drivetrain, F310 gamepad mapping and the control loop

pub mod cli;
pub mod config;
pub mod drive;
pub mod hardware;
pub mod input;
pub mod logging;
pub mod propfile;
pub mod robot;
pub mod side;

pub use cli::Cli;
pub use config::Options;
pub use drive::{Drivetrain, MotorGroup};
pub use input::F310Controller;
pub use logging::LogLevel;
pub use robot::Robot;
pub use side::Side;
