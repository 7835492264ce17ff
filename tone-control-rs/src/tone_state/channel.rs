use super::codec::{self, ToneCodes, BASS_CODES, TREBLE_CODES};
use super::CHANNEL_COUNT;

/// One of the three parameters the encoder can adjust.
///
/// The discriminant is the fixed scan order used by the tick drain and the
/// LCD row of the parameter's bar graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Master volume (attenuation only).
    Volume = 0,
    /// Treble boost / cut.
    Treble = 1,
    /// Bass boost / cut.
    Bass = 2,
}

impl Channel {
    /// All channels in drain priority order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::Volume, Channel::Treble, Channel::Bass];

    /// Position of this channel in [`Channel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The channel after this one, wrapping Bass back to Volume.
    pub fn next(self) -> Self {
        match self {
            Channel::Volume => Channel::Treble,
            Channel::Treble => Channel::Bass,
            Channel::Bass => Channel::Volume,
        }
    }

    /// Lowest allowed value in hundredths of a dB (inclusive).
    pub fn min_value(self) -> i32 {
        match self {
            Channel::Volume => -7500,
            Channel::Treble | Channel::Bass => -1400,
        }
    }

    /// Highest allowed value in hundredths of a dB (inclusive).
    pub fn max_value(self) -> i32 {
        match self {
            Channel::Volume => 0,
            Channel::Treble | Channel::Bass => 1400,
        }
    }

    /// Size of one encoder detent in hundredths of a dB.
    pub fn step(self) -> i32 {
        match self {
            Channel::Volume => 125,
            Channel::Treble | Channel::Bass => 200,
        }
    }

    /// Power-on value: -40 dB volume, flat tone.
    pub fn default_value(self) -> i32 {
        match self {
            Channel::Volume => -4000,
            Channel::Treble | Channel::Bass => 0,
        }
    }

    /// Register byte matching [`default_value()`](Self::default_value).
    pub fn default_byte(self) -> u8 {
        codec::encode(self, self.default_value())
    }

    /// Fixed tone register codes, or `None` for the volume channel.
    pub fn tone_codes(self) -> Option<&'static ToneCodes> {
        match self {
            Channel::Volume => None,
            Channel::Treble => Some(&TREBLE_CODES),
            Channel::Bass => Some(&BASS_CODES),
        }
    }
}

/// Direction of a single encoder detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Louder / more boost.
    Up,
    /// Quieter / more cut.
    Down,
}

impl Direction {
    /// `+1` for [`Up`](Direction::Up), `-1` for [`Down`](Direction::Down).
    pub fn sign(self) -> i32 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_channels() {
        assert_eq!(Channel::Volume.next(), Channel::Treble);
        assert_eq!(Channel::Treble.next(), Channel::Bass);
        assert_eq!(Channel::Bass.next(), Channel::Volume);
    }

    #[test]
    fn index_matches_all_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn default_bytes() {
        assert_eq!(Channel::Volume.default_byte(), 32);
        assert_eq!(Channel::Treble.default_byte(), 127);
        assert_eq!(Channel::Bass.default_byte(), 111);
    }

    #[test]
    fn ranges_are_whole_steps() {
        for channel in Channel::ALL {
            let span = channel.max_value() - channel.min_value();
            assert_eq!(span % channel.step(), 0);
            assert_eq!((channel.default_value() - channel.min_value()) % channel.step(), 0);
        }
    }
}
