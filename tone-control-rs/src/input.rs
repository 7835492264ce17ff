//! Encoder and button decoding.
//!
//! Turns raw pin levels into the three abstract events the controller
//! understands. Nothing here touches hardware; the firmware samples the
//! pins and feeds the levels in.

/// Abstract user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Encoder moved clockwise by at least one detent.
    Increment,
    /// Encoder moved counter-clockwise by at least one detent.
    Decrement,
    /// Button completed a press and release.
    CycleSelection,
}

// ── Quadrature decoding ──────────────────────────────────────────────

/// Pulse delta indexed by `(previous_state << 2) | current_state`, where a
/// state is `(a << 1) | b`. Double transitions are treated as noise.
const QUADRATURE_TABLE: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

/// Gray-code decoder for the two encoder lines.
///
/// Call [`update()`](Self::update) on every edge of either line. A
/// standard detented encoder produces four pulses per detent.
#[derive(Debug, Clone, Copy)]
pub struct QuadratureDecoder {
    state: u8,
}

impl QuadratureDecoder {
    /// Create a decoder from the current line levels.
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            state: Self::encode(a, b),
        }
    }

    /// Feed the new line levels and return the pulse delta (-1, 0 or +1).
    pub fn update(&mut self, a: bool, b: bool) -> i8 {
        let next = Self::encode(a, b);
        let delta = QUADRATURE_TABLE[usize::from((self.state << 2) | next)];
        self.state = next;
        delta
    }

    fn encode(a: bool, b: bool) -> u8 {
        (u8::from(a) << 1) | u8::from(b)
    }
}

// ── Detent quantisation ──────────────────────────────────────────────

/// Converts the running pulse count into at most one step event per tick.
///
/// Only the sign of the movement matters: if the encoder moved several
/// detents between two ticks a single event is still produced.
#[derive(Debug, Clone, Copy)]
pub struct DetentTracker {
    pulses_per_detent: i32,
    /// Detent position seen on the previous tick. `None` until the first
    /// sample establishes a baseline.
    previous: Option<i32>,
}

impl DetentTracker {
    /// Create a tracker. `pulses_per_detent` below 1 is treated as 1.
    pub fn new(pulses_per_detent: i32) -> Self {
        Self {
            pulses_per_detent: pulses_per_detent.max(1),
            previous: None,
        }
    }

    /// Feed the accumulated pulse counter and return the resulting event.
    pub fn update(&mut self, pulses: i32) -> Option<InputEvent> {
        let detent = pulses.div_euclid(self.pulses_per_detent);
        let previous = self.previous.replace(detent)?;

        match detent.cmp(&previous) {
            core::cmp::Ordering::Greater => Some(InputEvent::Increment),
            core::cmp::Ordering::Less => Some(InputEvent::Decrement),
            core::cmp::Ordering::Equal => None,
        }
    }
}

// ── Button ───────────────────────────────────────────────────────────

/// Detects a completed press-and-release of the selection button.
///
/// A press edge and a release edge must both be seen before a cycle is
/// reported; a half press leaves nothing pending but the recorded edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonCycle {
    previous: bool,
    pressed_seen: bool,
    released_seen: bool,
}

impl ButtonCycle {
    /// Create a detector assuming the button starts released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current button state (`true` = pressed). Returns `true`
    /// once per completed cycle.
    pub fn update(&mut self, pressed: bool) -> bool {
        if pressed != self.previous {
            if pressed {
                self.pressed_seen = true;
            } else {
                self.released_seen = true;
            }
        }
        self.previous = pressed;

        if self.pressed_seen && self.released_seen {
            self.pressed_seen = false;
            self.released_seen = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Quadrature ───────────────────────────────────────────────────

    #[test]
    fn full_cycle_clockwise_is_four_pulses() {
        let mut decoder = QuadratureDecoder::new(false, false);
        let total: i32 = [(true, false), (true, true), (false, true), (false, false)]
            .iter()
            .map(|&(a, b)| i32::from(decoder.update(a, b)))
            .sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn full_cycle_counter_clockwise_is_minus_four() {
        let mut decoder = QuadratureDecoder::new(false, false);
        let total: i32 = [(false, true), (true, true), (true, false), (false, false)]
            .iter()
            .map(|&(a, b)| i32::from(decoder.update(a, b)))
            .sum();
        assert_eq!(total, -4);
    }

    #[test]
    fn double_transition_and_repeat_are_ignored() {
        let mut decoder = QuadratureDecoder::new(false, false);
        assert_eq!(decoder.update(true, true), 0);
        assert_eq!(decoder.update(true, true), 0);
    }

    // ── Detents ──────────────────────────────────────────────────────

    #[test]
    fn first_sample_sets_baseline() {
        let mut tracker = DetentTracker::new(4);
        assert_eq!(tracker.update(400), None);
        assert_eq!(tracker.update(400), None);
    }

    #[test]
    fn one_event_per_tick_regardless_of_distance() {
        let mut tracker = DetentTracker::new(4);
        tracker.update(0);
        assert_eq!(tracker.update(3), None);
        assert_eq!(tracker.update(4), Some(InputEvent::Increment));
        assert_eq!(tracker.update(40), Some(InputEvent::Increment));
        assert_eq!(tracker.update(-40), Some(InputEvent::Decrement));
    }

    #[test]
    fn no_dead_zone_around_zero() {
        let mut tracker = DetentTracker::new(4);
        tracker.update(0);
        assert_eq!(tracker.update(-1), Some(InputEvent::Decrement));
        assert_eq!(tracker.update(-4), None);
        assert_eq!(tracker.update(0), Some(InputEvent::Increment));
    }

    #[test]
    fn zero_pulses_per_detent_is_clamped() {
        let mut tracker = DetentTracker::new(0);
        tracker.update(0);
        assert_eq!(tracker.update(1), Some(InputEvent::Increment));
    }

    // ── Button ───────────────────────────────────────────────────────

    #[test]
    fn press_and_release_completes_cycle() {
        let mut button = ButtonCycle::new();
        assert!(!button.update(true));
        assert!(!button.update(true));
        assert!(button.update(false));
        assert!(!button.update(false));
    }

    #[test]
    fn press_without_release_does_nothing() {
        let mut button = ButtonCycle::new();
        for _ in 0..10 {
            assert!(!button.update(true));
        }
    }

    #[test]
    fn idle_released_button_does_nothing() {
        let mut button = ButtonCycle::new();
        for _ in 0..10 {
            assert!(!button.update(false));
        }
    }

    #[test]
    fn consecutive_cycles_each_report_once() {
        let mut button = ButtonCycle::new();
        let mut cycles = 0;
        for level in [true, false, true, false, true, false] {
            if button.update(level) {
                cycles += 1;
            }
        }
        assert_eq!(cycles, 3);
    }
}
