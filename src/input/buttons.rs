//! Gamepad button names
//!
//! Maps the ten named buttons of the Logitech F310 (XInput mode) to their
//! raw button indices and back.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Name reported for a raw index with no assigned button
pub const UNKNOWN_BUTTON: &str = "Unknown";

/// A named digital button. The discriminant is the raw button index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum Button {
    A = 1,
    B = 2,
    X = 3,
    Y = 4,
    BumperLeft = 5,
    BumperRight = 6,
    Back = 7,
    Start = 8,
    StickLeft = 9,
    StickRight = 10,
}

/// Raw index to button
static BUTTONS_BY_INDEX: LazyLock<HashMap<u32, Button>> =
    LazyLock::new(|| Button::ALL.iter().map(|&b| (b.raw_index(), b)).collect());

/// Lowercase name to button
static BUTTONS_BY_NAME: LazyLock<HashMap<String, Button>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    for button in Button::ALL {
        m.insert(button.name().to_lowercase(), button);
    }

    // Common aliases
    m.insert("lb".to_string(), Button::BumperLeft);
    m.insert("rb".to_string(), Button::BumperRight);
    m.insert("select".to_string(), Button::Back);
    m.insert("l3".to_string(), Button::StickLeft);
    m.insert("r3".to_string(), Button::StickRight);

    m
});

impl Button {
    /// All buttons in raw index order
    pub const ALL: [Button; 10] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::BumperLeft,
        Button::BumperRight,
        Button::Back,
        Button::Start,
        Button::StickLeft,
        Button::StickRight,
    ];

    /// Raw button index on the device (1-based)
    pub fn raw_index(self) -> u32 {
        self as u32
    }

    /// Button at a raw index, if one is assigned
    pub fn from_raw(index: u32) -> Option<Button> {
        BUTTONS_BY_INDEX.get(&index).copied()
    }

    /// Look up a button by name or alias, ignoring case
    pub fn from_name(name: &str) -> Option<Button> {
        BUTTONS_BY_NAME.get(&name.trim().to_lowercase()).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Button::A => "A",
            Button::B => "B",
            Button::X => "X",
            Button::Y => "Y",
            Button::BumperLeft => "BumperLeft",
            Button::BumperRight => "BumperRight",
            Button::Back => "Back",
            Button::Start => "Start",
            Button::StickLeft => "StickLeft",
            Button::StickRight => "StickRight",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of the button at a raw index, or [`UNKNOWN_BUTTON`]
pub fn button_name(index: u32) -> &'static str {
    match Button::from_raw(index) {
        Some(button) => button.name(),
        None => {
            log::debug!("no button assigned to raw index {}", index);
            UNKNOWN_BUTTON
        }
    }
}
