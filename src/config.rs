use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::input::hid::MAX_PORTS;
use crate::input::{Action, Button, ControlBindings};
use crate::logging::LogLevel;
use crate::propfile::PropertyFile;

/// Drive motor controller ids on the CAN bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveWiring {
    pub left_front: u32,
    pub left_rear: u32,
    pub right_front: u32,
    pub right_rear: u32,
}

impl Default for DriveWiring {
    fn default() -> Self {
        Self {
            left_front: 1,
            left_rear: 2,
            right_front: 3,
            right_rear: 4,
        }
    }
}

impl DriveWiring {
    pub fn left(&self) -> [u32; 2] {
        [self.left_front, self.left_rear]
    }

    pub fn right(&self) -> [u32; 2] {
        [self.right_front, self.right_rear]
    }
}

/// Robot options that can be set via config file or CLI
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub drive: DriveWiring,
    /// Driver station port of the driver's gamepad
    pub drive_stick: u32,
    /// Driver station port of the manipulator's gamepad
    pub manipulator_stick: u32,
    /// Control loop period
    pub period: Duration,
    pub bindings: ControlBindings,
    pub log_level: LogLevel,
    pub log_file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            drive: DriveWiring::default(),
            drive_stick: 0,
            manipulator_stick: 1,
            period: Duration::from_millis(20),
            bindings: ControlBindings::default(),
            log_level: LogLevel::Info,
            log_file: None,
        }
    }
}

/// Reject options the robot cannot start with
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("motor id {0} is assigned to more than one drive motor")]
    DuplicateMotorId(u32),
    #[error("joystick port {port} out of range (0..{max})")]
    PortOutOfRange { port: u32, max: u32 },
    #[error("driver and manipulator share joystick port {0}")]
    SharedPort(u32),
    #[error("loop period must be positive")]
    ZeroPeriod,
}

impl Options {
    /// Check wiring and ports
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for id in self.drive.left().into_iter().chain(self.drive.right()) {
            if !seen.insert(id) {
                return Err(ConfigError::DuplicateMotorId(id));
            }
        }

        for port in [self.drive_stick, self.manipulator_stick] {
            if port >= MAX_PORTS {
                return Err(ConfigError::PortOutOfRange {
                    port,
                    max: MAX_PORTS,
                });
            }
        }
        if self.drive_stick == self.manipulator_stick {
            return Err(ConfigError::SharedPort(self.drive_stick));
        }

        if self.period.is_zero() {
            return Err(ConfigError::ZeroPeriod);
        }

        Ok(())
    }

    /// Apply the entries of a property file on top of these options
    pub fn apply_properties(&mut self, props: &PropertyFile) -> Result<()> {
        for key in props.keys() {
            let value = props.get(key).unwrap_or_default();
            let line = props.line_of(key).unwrap_or(0);
            self.apply_property(key, value)
                .with_context(|| format!("line {}: {} = {}", line, key, value))?;
        }
        Ok(())
    }

    fn apply_property(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "drive.left_front" => self.drive.left_front = parse_id(value)?,
            "drive.left_rear" => self.drive.left_rear = parse_id(value)?,
            "drive.right_front" => self.drive.right_front = parse_id(value)?,
            "drive.right_rear" => self.drive.right_rear = parse_id(value)?,
            "input.drive_stick" => self.drive_stick = parse_port(value)?,
            "input.manipulator_stick" => self.manipulator_stick = parse_port(value)?,
            "loop.period_ms" => self.period = parse_period_ms(value)?,
            "log.level" => self.log_level = value.parse()?,
            "log.file" => {
                self.log_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            _ => {
                if let Some(action) = key.strip_prefix("bind.") {
                    let action = Action::from_name(action)
                        .with_context(|| format!("Unknown action '{}'", action))?;
                    self.bindings.bind(action, parse_button(value)?);
                } else {
                    log::warn!("Ignoring unknown config key '{}'", key);
                }
            }
        }
        Ok(())
    }
}

/// Load options from a property file; `None` gives the defaults
pub fn load_config(path: Option<&Path>) -> Result<Options> {
    let mut options = Options::default();

    if let Some(path) = path {
        let props = PropertyFile::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        if props.is_empty() {
            log::warn!("Config {} has no entries", path.display());
        }
        options
            .apply_properties(&props)
            .with_context(|| format!("Invalid config {}", path.display()))?;
    }

    Ok(options)
}

/// Parse a motor controller id
pub fn parse_id(s: &str) -> Result<u32> {
    s.trim().parse().context("Invalid motor id")
}

/// Parse a joystick port (0-5)
pub fn parse_port(s: &str) -> Result<u32> {
    let port: u32 = s.trim().parse().context("Invalid joystick port")?;
    if port >= MAX_PORTS {
        anyhow::bail!("Joystick port must be 0 to {}", MAX_PORTS - 1);
    }
    Ok(port)
}

/// Parse a loop period in milliseconds
pub fn parse_period_ms(s: &str) -> Result<Duration> {
    let ms: u64 = s.trim().parse().context("Invalid loop period")?;
    if ms == 0 {
        anyhow::bail!("Loop period must be positive");
    }
    Ok(Duration::from_millis(ms))
}

/// Parse a button name
pub fn parse_button(s: &str) -> Result<Button> {
    Button::from_name(s).with_context(|| format!("Unknown button '{}'", s.trim()))
}
