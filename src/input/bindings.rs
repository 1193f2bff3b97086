//! Driver button bindings
//!
//! Which buttons on the driver's gamepad change the drivetrain mode.

use std::collections::BTreeMap;
use std::fmt;

use super::buttons::Button;

/// A drivetrain action triggered from the gamepad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// On press: switch to brake mode
    Brake,
    /// On press: switch to coast mode
    Coast,
    /// While held: stop instead of driving
    Stop,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Brake, Action::Coast, Action::Stop];

    /// Name used in config keys (`bind.<name>`)
    pub fn name(self) -> &'static str {
        match self {
            Action::Brake => "brake",
            Action::Coast => "coast",
            Action::Stop => "stop",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Button assigned to each action.
///
/// Every action always has exactly one button. Two actions may share a
/// button; the robot then applies both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlBindings {
    buttons: BTreeMap<Action, Button>,
}

impl Default for ControlBindings {
    fn default() -> Self {
        let mut buttons = BTreeMap::new();
        buttons.insert(Action::Brake, Button::X);
        buttons.insert(Action::Coast, Button::Y);
        buttons.insert(Action::Stop, Button::B);
        Self { buttons }
    }
}

impl ControlBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Button bound to an action
    pub fn button(&self, action: Action) -> Button {
        self.buttons[&action]
    }

    /// Rebind an action, returning the previous button
    pub fn bind(&mut self, action: Action, button: Button) -> Button {
        self.buttons.insert(action, button).unwrap_or(button)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, Button)> + '_ {
        self.buttons.iter().map(|(&a, &b)| (a, b))
    }
}
