//! Scripted gamepad input
//!
//! A plain-text script drives the simulator: one line per control cycle.
//!
//! ```text
//! # drive forward for 50 cycles, then press X
//! a1=-0.5 a5=-0.5 *50
//! X
//! idle *10
//! disconnect
//! ```
//!
//! Tokens on a line:
//! - `aN=V`       raw axis `N` reads `V`
//! - `bN`         raw button `N` is held
//! - a button name (`A`, `BumperLeft`, `lb`, ...) is held
//! - `idle`       nothing held, all axes zero
//! - `disconnect` no sample this cycle (must be the only input token)
//! - `*N`         repeat the line `N` times
//!
//! Everything after `#` is a comment. Blank lines are skipped.

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use super::buttons::Button;
use super::hid::{HidSample, HidSource, MAX_AXES, MAX_BUTTONS};

/// Largest `*N` repeat count accepted on one line
pub const MAX_REPEAT: usize = 100_000;

/// Error in a script line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("script line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Parse a script into per-cycle samples (`None` = disconnected cycle)
pub fn parse_script(text: &str) -> Result<Vec<Option<HidSample>>, ScriptError> {
    let mut cycles = Vec::new();

    for (number, raw_line) in text.lines().enumerate() {
        let line_no = number + 1;
        let line = match raw_line.split_once('#') {
            Some((before, _)) => before,
            None => raw_line,
        };
        if line.trim().is_empty() {
            continue;
        }

        let mut sample = HidSample::new();
        let mut disconnect = false;
        let mut inputs = 0usize;
        let mut repeat = 1usize;

        for token in line.split_whitespace() {
            if let Some(count) = token.strip_prefix('*') {
                repeat = count
                    .parse()
                    .map_err(|_| ScriptError::new(line_no, format!("bad repeat count '{}'", token)))?;
                if repeat > MAX_REPEAT {
                    return Err(ScriptError::new(
                        line_no,
                        format!("repeat count too large ({} > {})", repeat, MAX_REPEAT),
                    ));
                }
                continue;
            }

            inputs += 1;
            if token.eq_ignore_ascii_case("disconnect") {
                disconnect = true;
            } else if token.eq_ignore_ascii_case("idle") {
                // neutral sample
            } else if let Some((axis, value)) = parse_axis(token) {
                let axis = axis.map_err(|m| ScriptError::new(line_no, m))?;
                let value = value.map_err(|m| ScriptError::new(line_no, m))?;
                sample.set_axis(axis, value);
            } else if let Some(button) = parse_raw_button(token) {
                let button = button.map_err(|m| ScriptError::new(line_no, m))?;
                sample.set_button(button, true);
            } else if let Some(button) = Button::from_name(token) {
                sample.set_button(button.raw_index(), true);
            } else {
                return Err(ScriptError::new(line_no, format!("unknown token '{}'", token)));
            }
        }

        if disconnect && inputs > 1 {
            return Err(ScriptError::new(
                line_no,
                "'disconnect' cannot be combined with other input",
            ));
        }
        if inputs == 0 {
            return Err(ScriptError::new(line_no, "repeat without input"));
        }

        let cycle = if disconnect { None } else { Some(sample) };
        cycles.extend(std::iter::repeat(cycle).take(repeat));
    }

    Ok(cycles)
}

type Parsed<T> = std::result::Result<T, String>;

/// `aN=V`
fn parse_axis(token: &str) -> Option<(Parsed<usize>, Parsed<f64>)> {
    let rest = token.strip_prefix('a').or_else(|| token.strip_prefix('A'))?;
    let (index, value) = rest.split_once('=')?;

    let index = match index.parse::<usize>() {
        Ok(i) if i < MAX_AXES => Ok(i),
        Ok(i) => Err(format!("axis {} out of range (0..{})", i, MAX_AXES)),
        Err(_) => Err(format!("bad axis index in '{}'", token)),
    };
    let value = value
        .parse::<f64>()
        .map_err(|_| format!("bad axis value in '{}'", token));

    Some((index, value))
}

/// `bN`; `None` if the token is not of that shape (so `B` stays a name)
fn parse_raw_button(token: &str) -> Option<Parsed<u32>> {
    let digits = token.strip_prefix('b')?;
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(match digits.parse::<u32>() {
        Ok(n) if (1..=MAX_BUTTONS).contains(&n) => Ok(n),
        _ => Err(format!("button {} out of range (1..={})", digits, MAX_BUTTONS)),
    })
}

/// Read and parse a script file
pub fn load_script(path: &Path) -> Result<Vec<Option<HidSample>>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input script {}", path.display()))?;
    let cycles = parse_script(&text)
        .with_context(|| format!("Invalid input script {}", path.display()))?;
    Ok(cycles)
}

/// Transport that replays a script on one port.
///
/// Each `read` of the scripted port consumes one cycle. Other ports, and
/// the scripted port once the script is exhausted, have no data.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    port: u32,
    cycles: VecDeque<Option<HidSample>>,
}

impl ScriptedSource {
    pub fn new(port: u32, cycles: Vec<Option<HidSample>>) -> Self {
        Self {
            port,
            cycles: cycles.into(),
        }
    }

    /// Source producing `cycles` neutral samples
    pub fn idle(port: u32, cycles: usize) -> Self {
        Self::new(port, vec![Some(HidSample::new()); cycles])
    }

    /// Cycles not yet read
    pub fn remaining(&self) -> usize {
        self.cycles.len()
    }
}

impl HidSource for ScriptedSource {
    fn read(&mut self, port: u32) -> Option<HidSample> {
        if port != self.port {
            return None;
        }
        self.cycles.pop_front().flatten()
    }
}
