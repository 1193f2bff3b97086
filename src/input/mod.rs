//! Gamepad input
//!
//! This module turns raw, index-based controller samples into named
//! controls for the driver.
//!
//! # Architecture
//!
//! - [`hid`]: the raw interface ([`RawInput`]), the per-cycle transport
//!   ([`HidSource`]) and the polling layer ([`GenericHid`]) that keeps the
//!   press/release edge latches for each button.
//! - [`buttons`]: the ten named buttons and their fixed raw indices.
//! - [`f310`]: [`F310Controller`], the named API over one gamepad (sticks,
//!   triggers, buttons, side-qualified bumpers and stick clicks).
//! - [`bindings`]: which buttons trigger drivetrain actions.
//! - [`script`]: text scripts of samples, replayed by the simulator.
//!
//! # Threading
//!
//! Controllers are used from the control loop thread only. The edge
//! latches are not synchronized; sharing a controller with another thread
//! needs a lock around the whole controller.

pub mod bindings;
pub mod buttons;
pub mod f310;
pub mod hid;
pub mod script;

pub use bindings::{Action, ControlBindings};
pub use buttons::{button_name, Button, UNKNOWN_BUTTON};
pub use f310::F310Controller;
pub use hid::{GenericHid, HidSample, HidSource, RawInput};
pub use script::{load_script, parse_script, ScriptError, ScriptedSource};
