//! Logitech F310 gamepad mapping
//!
//! Names the raw axes and buttons of an F310 in XInput mode. The axis
//! layout is fixed by the hardware:
//!
//! | Control        | Left | Right |
//! |----------------|------|-------|
//! | stick X        | 0    | 4     |
//! | stick Y        | 1    | 5     |
//! | trigger        | 2    | 3     |
//! | bumper         | 5    | 6     | (button)
//! | stick click    | 9    | 10    | (button)
//!
//! Other HID layouts place these differently; this table is specific to
//! the F310 and is not derived from any formula.

use super::buttons::{self, Button};
use super::hid::{GenericHid, HidSource, RawInput};
use crate::side::Side;

/// Axes and buttons held by one hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hand {
    stick_x: usize,
    stick_y: usize,
    trigger: usize,
    bumper: Button,
    stick_click: Button,
}

const LEFT_HAND: Hand = Hand {
    stick_x: 0,
    stick_y: 1,
    trigger: 2,
    bumper: Button::BumperLeft,
    stick_click: Button::StickLeft,
};

const RIGHT_HAND: Hand = Hand {
    stick_x: 4,
    stick_y: 5,
    trigger: 3,
    bumper: Button::BumperRight,
    stick_click: Button::StickRight,
};

fn hand(side: Side) -> &'static Hand {
    match side {
        Side::Left => &LEFT_HAND,
        Side::Right => &RIGHT_HAND,
    }
}

/// Device name reported in logs
pub const F310_NAME: &str = "Logitech F310";
/// Axes reported by the F310
pub const F310_AXES: usize = 6;
/// Buttons reported by the F310
pub const F310_BUTTONS: u32 = 10;

/// An F310 gamepad at a fixed port.
///
/// Every button has three queries: whether it is down, whether it was
/// pressed since the last such query, and whether it was released since
/// the last such query. Edge queries only make sense once per control
/// cycle, after the device has been polled.
#[derive(Debug, Clone)]
pub struct F310Controller<H: RawInput = GenericHid> {
    hid: H,
}

impl F310Controller<GenericHid> {
    /// Controller on a port of the driver station
    pub fn new(port: u32) -> Self {
        Self {
            hid: GenericHid::new(port, F310_NAME, F310_AXES, F310_BUTTONS),
        }
    }

    /// Read this cycle's sample. Must run before any edge query in the cycle.
    pub fn poll(&mut self, source: &mut dyn HidSource) -> bool {
        self.hid.poll(source)
    }

    pub fn is_connected(&self) -> bool {
        self.hid.is_connected()
    }
}

impl<H: RawInput> F310Controller<H> {
    /// Wrap an existing raw device
    pub fn with_hid(hid: H) -> Self {
        Self { hid }
    }

    pub fn port(&self) -> u32 {
        self.hid.port()
    }

    pub fn hid(&self) -> &H {
        &self.hid
    }

    pub fn hid_mut(&mut self) -> &mut H {
        &mut self.hid
    }

    // === Axes ===

    /// Stick X axis for a hand
    pub fn x(&self, side: Side) -> f64 {
        self.hid.raw_axis(hand(side).stick_x)
    }

    /// Stick Y axis for a hand. Pushing the stick away reads negative.
    pub fn y(&self, side: Side) -> f64 {
        self.hid.raw_axis(hand(side).stick_y)
    }

    /// Trigger axis for a hand
    pub fn trigger_axis(&self, side: Side) -> f64 {
        self.hid.raw_axis(hand(side).trigger)
    }

    // === Named buttons ===

    pub fn is_down(&self, button: Button) -> bool {
        self.hid.raw_button(button.raw_index())
    }

    /// Rising edge since this button's press state was last queried
    pub fn pressed_since_last_poll(&mut self, button: Button) -> bool {
        self.hid.raw_button_pressed(button.raw_index())
    }

    /// Falling edge since this button's release state was last queried
    pub fn released_since_last_poll(&mut self, button: Button) -> bool {
        self.hid.raw_button_released(button.raw_index())
    }

    // === Side-qualified buttons ===

    pub fn bumper(&self, side: Side) -> bool {
        self.is_down(hand(side).bumper)
    }

    pub fn bumper_pressed(&mut self, side: Side) -> bool {
        self.pressed_since_last_poll(hand(side).bumper)
    }

    pub fn bumper_released(&mut self, side: Side) -> bool {
        self.released_since_last_poll(hand(side).bumper)
    }

    pub fn stick_button(&self, side: Side) -> bool {
        self.is_down(hand(side).stick_click)
    }

    pub fn stick_button_pressed(&mut self, side: Side) -> bool {
        self.pressed_since_last_poll(hand(side).stick_click)
    }

    pub fn stick_button_released(&mut self, side: Side) -> bool {
        self.released_since_last_poll(hand(side).stick_click)
    }

    /// Diagnostic name for a raw button index; "Unknown" when unassigned
    pub fn button_name(&self, index: u32) -> &'static str {
        buttons::button_name(index)
    }

    /// Names of all buttons currently held
    pub fn held_buttons(&self) -> Vec<Button> {
        Button::ALL
            .into_iter()
            .filter(|&b| self.is_down(b))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::hid::HidSample;
    use rstest::rstest;
    use std::cell::Cell;

    /// Raw device that records which button index was read last
    struct Recorder {
        last: Cell<Option<u32>>,
    }

    impl RawInput for Recorder {
        fn port(&self) -> u32 {
            3
        }
        fn raw_axis(&self, axis: usize) -> f64 {
            axis as f64
        }
        fn raw_button(&self, button: u32) -> bool {
            self.last.set(Some(button));
            false
        }
        fn raw_button_pressed(&mut self, button: u32) -> bool {
            self.last.set(Some(button));
            false
        }
        fn raw_button_released(&mut self, button: u32) -> bool {
            self.last.set(Some(button));
            false
        }
    }

    fn recorder() -> F310Controller<Recorder> {
        F310Controller::with_hid(Recorder {
            last: Cell::new(None),
        })
    }

    fn controller_with(sample: HidSample) -> F310Controller {
        let mut controller = F310Controller::new(0);
        controller.hid_mut().update(sample);
        controller
    }

    #[rstest]
    #[case(Side::Left, 0, 1, 2)]
    #[case(Side::Right, 4, 5, 3)]
    fn test_axis_table(
        #[case] side: Side,
        #[case] x: usize,
        #[case] y: usize,
        #[case] trigger: usize,
    ) {
        let controller = recorder();
        assert_eq!(controller.x(side), x as f64);
        assert_eq!(controller.y(side), y as f64);
        assert_eq!(controller.trigger_axis(side), trigger as f64);
    }

    #[test]
    fn test_axes_from_sample() {
        let sample = HidSample::new()
            .with_axis(0, 0.1)
            .with_axis(1, -0.2)
            .with_axis(2, 0.3)
            .with_axis(3, 0.4)
            .with_axis(4, -0.5)
            .with_axis(5, 0.6);
        let controller = controller_with(sample);

        assert_eq!(controller.x(Side::Left), 0.1);
        assert_eq!(controller.y(Side::Left), -0.2);
        assert_eq!(controller.trigger_axis(Side::Left), 0.3);
        assert_eq!(controller.trigger_axis(Side::Right), 0.4);
        assert_eq!(controller.x(Side::Right), -0.5);
        assert_eq!(controller.y(Side::Right), 0.6);
    }

    #[rstest]
    #[case(Side::Left, 5)]
    #[case(Side::Right, 6)]
    fn test_bumper_indices(#[case] side: Side, #[case] index: u32) {
        let mut controller = recorder();

        controller.bumper(side);
        assert_eq!(controller.hid().last.get(), Some(index));
        controller.bumper_pressed(side);
        assert_eq!(controller.hid().last.get(), Some(index));
        controller.bumper_released(side);
        assert_eq!(controller.hid().last.get(), Some(index));
    }

    #[rstest]
    #[case(Side::Left, 9)]
    #[case(Side::Right, 10)]
    fn test_stick_button_indices(#[case] side: Side, #[case] index: u32) {
        let mut controller = recorder();

        controller.stick_button(side);
        assert_eq!(controller.hid().last.get(), Some(index));
        controller.stick_button_pressed(side);
        assert_eq!(controller.hid().last.get(), Some(index));
        controller.stick_button_released(side);
        assert_eq!(controller.hid().last.get(), Some(index));
    }

    #[test]
    fn test_bumpers_read_distinct_indices() {
        let mut controller = recorder();
        controller.bumper(Side::Left);
        let left = controller.hid().last.get();
        controller.bumper(Side::Right);
        let right = controller.hid().last.get();
        assert_ne!(left, right);
    }

    #[test]
    fn test_named_button_queries() {
        let mut controller = controller_with(HidSample::new().with_button(3, true));

        assert!(controller.is_down(Button::X));
        assert!(!controller.is_down(Button::A));
        assert!(controller.pressed_since_last_poll(Button::X));
        assert!(!controller.pressed_since_last_poll(Button::X));
        assert!(!controller.released_since_last_poll(Button::X));

        controller.hid_mut().update(HidSample::new());
        assert!(controller.released_since_last_poll(Button::X));
    }

    #[test]
    fn test_side_buttons_from_sample() {
        let mut controller = controller_with(
            HidSample::new().with_button(6, true).with_button(9, true),
        );

        assert!(!controller.bumper(Side::Left));
        assert!(controller.bumper(Side::Right));
        assert!(controller.stick_button(Side::Left));
        assert!(!controller.stick_button(Side::Right));
        assert!(controller.bumper_pressed(Side::Right));
        assert!(controller.stick_button_pressed(Side::Left));
        assert!(!controller.bumper_pressed(Side::Left));
    }

    #[test]
    fn test_held_buttons() {
        let controller = controller_with(
            HidSample::new()
                .with_button(1, true)
                .with_button(8, true)
                .with_button(12, true),
        );
        assert_eq!(controller.held_buttons(), vec![Button::A, Button::Start]);
    }

    #[test]
    fn test_button_name_diagnostics() {
        let controller = F310Controller::new(1);
        assert_eq!(controller.port(), 1);
        assert_eq!(controller.button_name(5), "BumperLeft");
        assert_eq!(controller.button_name(11), "Unknown");
    }
}
