//! One polling-loop iteration.
//!
//! [`ToneController`] owns the parameter store, the selection cursor and
//! the input decoders. The firmware samples the pins, calls
//! [`ToneController::tick()`] and then performs whatever I/O the returned
//! [`TickOutcome`] asks for. Keeping the I/O outside makes the whole
//! state machine testable on the host.

use crate::config::ControllerConfig;
use crate::input::{ButtonCycle, DetentTracker, InputEvent};
use crate::tone_state::{Direction, ParameterStore, RegisterUpdate, SelectionCursor};

/// Pin state captured at the start of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSample {
    /// Running quadrature pulse count published by the encoder monitor.
    pub encoder_pulses: i32,
    /// Raw level of the button line.
    pub button_level: bool,
}

/// What the firmware has to do after a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Register byte to write to the chip this tick, if any.
    pub transmit: Option<RegisterUpdate>,
    /// The encoder moved; the value readout needs a redraw.
    pub value_changed: bool,
    /// The selection moved; the marker and readout need a redraw.
    pub selection_changed: bool,
}

/// Volume / tone state machine driven one tick at a time.
pub struct ToneController {
    config: ControllerConfig,
    store: ParameterStore,
    cursor: SelectionCursor,
    detents: DetentTracker,
    button: ButtonCycle,
}

impl ToneController {
    /// Create a controller with every parameter at its default and the
    /// cursor on Volume.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            store: ParameterStore::new(),
            cursor: SelectionCursor::new(),
            detents: DetentTracker::new(config.pulses_per_detent),
            button: ButtonCycle::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Parameter state.
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    /// Mutable parameter state, for consuming display change flags.
    pub fn store_mut(&mut self) -> &mut ParameterStore {
        &mut self.store
    }

    /// Selection state.
    pub fn cursor(&self) -> &SelectionCursor {
        &self.cursor
    }

    /// Mutable selection state, for consuming the selection-changed flag.
    pub fn cursor_mut(&mut self) -> &mut SelectionCursor {
        &mut self.cursor
    }

    /// Apply one abstract input event.
    ///
    /// Returns `true` if any state changed.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Increment => self.store.step(self.cursor.selected(), Direction::Up),
            InputEvent::Decrement => self.store.step(self.cursor.selected(), Direction::Down),
            InputEvent::CycleSelection => {
                let _selected = self.cursor.cycle();
                #[cfg(feature = "defmt")]
                defmt::debug!("Selected {}", _selected);
                true
            }
        }
    }

    /// Run one polling-loop iteration.
    ///
    /// Order matches the loop: encoder, then button, then at most one
    /// queued register byte is taken for transmission.
    ///
    /// # Examples
    ///
    /// ```
    /// use tone_control::{ControllerConfig, InputSample, ToneController};
    /// use tone_control::tone_state::Channel;
    ///
    /// let mut controller = ToneController::new(ControllerConfig::default());
    /// controller.tick(InputSample::default());
    ///
    /// // Press and release the button: Volume -> Treble.
    /// controller.tick(InputSample { encoder_pulses: 0, button_level: true });
    /// let outcome = controller.tick(InputSample { encoder_pulses: 0, button_level: false });
    /// assert!(outcome.selection_changed);
    /// assert_eq!(controller.cursor().selected(), Channel::Treble);
    /// ```
    pub fn tick(&mut self, sample: InputSample) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if let Some(event) = self.detents.update(sample.encoder_pulses) {
            self.apply(event);
            outcome.value_changed = true;
        }

        if self.button.update(self.config.button_pressed(sample.button_level)) {
            self.apply(InputEvent::CycleSelection);
            outcome.selection_changed = true;
        }

        outcome.transmit = self.store.take_queued_update();
        outcome
    }
}
