//! Left/right indexing convention
//!
//! `Side` selects a drivetrain half, an analog stick, a trigger, a bumper
//! or a stick button. Every side-qualified query in the crate takes one.

use std::fmt;

/// One half of the robot or one hand of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Lowercase name used in logs and config keys
    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(format!("{}", Side::Right), "right");
    }
}
