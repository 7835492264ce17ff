use super::channel::{Channel, Direction};
use super::codec;

/// One audio parameter with its register byte and change tracking.
///
/// `value` and `register_byte` are only ever changed together by
/// [`step()`](Self::step), so the byte sent to the chip always matches the
/// value on the display.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Parameter {
    channel: Channel,
    /// Current value in hundredths of a dB, always within the channel range.
    value: i32,
    /// Chip encoding of `value`.
    register_byte: u8,
    /// Flag indicating the register byte still has to be sent to the chip.
    pub update_queued: bool,
    /// Flag indicating the display still has to redraw this parameter.
    pub changed: bool,
}

impl Parameter {
    /// Create a parameter at the channel's power-on default, with no flags set.
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            value: channel.default_value(),
            register_byte: channel.default_byte(),
            update_queued: false,
            changed: false,
        }
    }

    /// Channel this parameter controls.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Current value in hundredths of a dB.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Register byte matching the current value.
    pub fn register_byte(&self) -> u8 {
        self.register_byte
    }

    /// Move one step in `direction`.
    ///
    /// Returns `false` and leaves the parameter untouched (no flags set)
    /// when the step would leave the channel range. Otherwise updates the
    /// value and register byte and sets **both** `update_queued` and
    /// `changed`.
    pub fn step(&mut self, direction: Direction) -> bool {
        let next = self.value + direction.sign() * self.channel.step();
        if next < self.channel.min_value() || next > self.channel.max_value() {
            return false;
        }

        let action = codec::transition(self.channel, direction, self.value);
        self.register_byte = action.apply(self.register_byte);
        self.value = next;
        self.update_queued = true;
        self.changed = true;
        true
    }
}
