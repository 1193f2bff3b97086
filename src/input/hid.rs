//! Raw human-interface device access
//!
//! [`RawInput`] is the index-based interface the controller mappers consume.
//! [`GenericHid`] implements it on top of samples delivered by a
//! [`HidSource`] transport, tracking press/release edges per button.
//!
//! # Edge latches
//!
//! Each raw button has a rising-edge latch and a falling-edge latch. A new
//! sample sets the latches for every button that changed since the
//! previous sample; reading a latch clears it. So a press is reported
//! exactly once, on the first query after it happened, and a second query
//! in the same cycle reports nothing.

/// Maximum number of axes a sample carries
pub const MAX_AXES: usize = 12;

/// Maximum number of buttons a sample carries (raw indices 1..=32)
pub const MAX_BUTTONS: u32 = 32;

/// Number of joystick ports the transport exposes
pub const MAX_PORTS: u32 = 6;

/// One snapshot of a device's axes and buttons.
///
/// Buttons are numbered from 1; button `n` is bit `n - 1` of `buttons`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HidSample {
    pub axes: [f64; MAX_AXES],
    pub buttons: u32,
}

impl HidSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style axis setter; out-of-range indices are ignored
    pub fn with_axis(mut self, axis: usize, value: f64) -> Self {
        self.set_axis(axis, value);
        self
    }

    /// Builder-style button setter; out-of-range indices are ignored
    pub fn with_button(mut self, button: u32, pressed: bool) -> Self {
        self.set_button(button, pressed);
        self
    }

    pub fn set_axis(&mut self, axis: usize, value: f64) {
        if let Some(slot) = self.axes.get_mut(axis) {
            *slot = value;
        }
    }

    pub fn set_button(&mut self, button: u32, pressed: bool) {
        if let Some(mask) = button_mask(button) {
            if pressed {
                self.buttons |= mask;
            } else {
                self.buttons &= !mask;
            }
        }
    }

    /// Axis value, 0.0 for indices past the end
    pub fn axis(&self, axis: usize) -> f64 {
        self.axes.get(axis).copied().unwrap_or(0.0)
    }

    /// Button state, false for index 0 or past the end
    pub fn button(&self, button: u32) -> bool {
        button_mask(button).is_some_and(|mask| self.buttons & mask != 0)
    }
}

fn button_mask(button: u32) -> Option<u32> {
    if button == 0 || button > MAX_BUTTONS {
        None
    } else {
        Some(1 << (button - 1))
    }
}

/// Index-based access to a polled controller.
///
/// `raw_button_pressed` / `raw_button_released` consume the edge they
/// report, hence `&mut self`.
pub trait RawInput {
    /// Port the device is plugged into
    fn port(&self) -> u32;

    /// Current value of an axis, normally in [-1.0, 1.0]
    fn raw_axis(&self, axis: usize) -> f64;

    /// Current state of a button (1-based index)
    fn raw_button(&self, button: u32) -> bool;

    /// Whether the button was pressed since this was last asked
    fn raw_button_pressed(&mut self, button: u32) -> bool;

    /// Whether the button was released since this was last asked
    fn raw_button_released(&mut self, button: u32) -> bool;
}

/// Delivers samples for a port, once per control cycle.
///
/// `None` means no fresh data is available for the port (unplugged,
/// transport down). Staleness detection belongs to the transport.
pub trait HidSource {
    fn read(&mut self, port: u32) -> Option<HidSample>;
}

/// A polled controller at a fixed port.
///
/// Holds the latest sample and the per-button edge latches. Two instances
/// never share edge history.
#[derive(Debug, Clone)]
pub struct GenericHid {
    /// Port index
    port: u32,
    /// Device name for diagnostics
    name: String,
    /// Number of axes the device reports
    num_axes: usize,
    /// Number of buttons the device reports
    num_buttons: u32,
    /// Latest sample
    current: HidSample,
    /// Rising edges not yet consumed
    pressed: u32,
    /// Falling edges not yet consumed
    released: u32,
    /// Did the last poll deliver a sample?
    connected: bool,
}

impl GenericHid {
    /// Create a device with no sample yet (all axes 0, all buttons up)
    pub fn new(port: u32, name: &str, num_axes: usize, num_buttons: u32) -> Self {
        Self {
            port,
            name: name.to_string(),
            num_axes: num_axes.min(MAX_AXES),
            num_buttons: num_buttons.min(MAX_BUTTONS),
            current: HidSample::default(),
            pressed: 0,
            released: 0,
            connected: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_axes(&self) -> usize {
        self.num_axes
    }

    pub fn num_buttons(&self) -> u32 {
        self.num_buttons
    }

    /// Whether the most recent poll delivered a sample
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Take a new sample and latch the edges since the previous one
    ///
    /// Axes and buttons past the device's counts are dropped, so they read
    /// 0.0 / released and never produce edges.
    pub fn update(&mut self, mut sample: HidSample) {
        sample.axes[self.num_axes..].fill(0.0);
        sample.buttons &= self.button_bits();

        let previous = self.current.buttons;
        let now = sample.buttons;

        self.pressed |= !previous & now;
        self.released |= previous & !now;
        self.current = sample;
    }

    /// Read this device's port from the transport.
    ///
    /// Returns false if the transport had nothing; the last sample is kept
    /// and no edges are generated.
    pub fn poll(&mut self, source: &mut dyn HidSource) -> bool {
        match source.read(self.port) {
            Some(sample) => {
                if !self.connected {
                    log::info!("{} on port {} connected", self.name, self.port);
                }
                self.connected = true;
                self.update(sample);
                true
            }
            None => {
                if self.connected {
                    log::warn!("{} on port {} lost", self.name, self.port);
                }
                self.connected = false;
                false
            }
        }
    }

    fn button_bits(&self) -> u32 {
        match self.num_buttons {
            MAX_BUTTONS => u32::MAX,
            n => (1 << n) - 1,
        }
    }

    fn take_edge(latches: &mut u32, button: u32) -> bool {
        match button_mask(button) {
            Some(mask) => {
                let set = *latches & mask != 0;
                *latches &= !mask;
                set
            }
            None => false,
        }
    }
}

impl RawInput for GenericHid {
    fn port(&self) -> u32 {
        self.port
    }

    fn raw_axis(&self, axis: usize) -> f64 {
        self.current.axis(axis)
    }

    fn raw_button(&self, button: u32) -> bool {
        self.current.button(button)
    }

    fn raw_button_pressed(&mut self, button: u32) -> bool {
        Self::take_edge(&mut self.pressed, button)
    }

    fn raw_button_released(&mut self, button: u32) -> bool {
        Self::take_edge(&mut self.released, button)
    }
}
