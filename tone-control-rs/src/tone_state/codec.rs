//! TDA7313 register encoding for volume and tone steps.
//!
//! The chip's volume register is a plain attenuation counter, but the tone
//! registers split boost and cut into two disjoint code ranges that only
//! meet at flat:
//!
//! ```text
//!            cut                 flat           boost
//! dB     -14 ... -2        0 (either code)    +2 ... +14
//! treble 0x70 .. 0x76      0x77 / 0x7F        0x7E .. 0x78
//! bass   0x60 .. 0x66      0x67 / 0x6F        0x6E .. 0x68
//! ```
//!
//! Stepping inside one range is a +/-1 on the byte (inverted in the boost
//! range), and so is climbing from -2 dB back to flat, which lands on the
//! cut-side flat code. Leaving flat is a jump to a fixed code. The
//! [`transition()`] table spells out every case. [`encode()`] gives the
//! canonical byte for any value and [`decode()`] reads either flat code
//! back as 0 dB, so the table can be checked against both.

use super::channel::{Channel, Direction};

/// Boost-select bit (`C3`) in a tone register byte.
const TONE_BOOST_BIT: u8 = 0b0000_1000;

/// Magnitude field of a tone register byte. Holds `7 - |dB| / 2`.
const TONE_MAGNITUDE_MASK: u8 = 0b0000_0111;

/// Fixed register codes for one tone channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneCodes {
    /// 0 dB, boost bit set.
    pub flat: u8,
    /// +2 dB, the first code of the boost range.
    pub boost_2db: u8,
    /// -2 dB, the first code of the cut range.
    pub cut_2db: u8,
}

impl ToneCodes {
    /// Upper nibble selecting the register.
    fn base(&self) -> u8 {
        self.flat & 0xF0
    }
}

/// Treble register codes (`0b0111_xxxx`).
pub const TREBLE_CODES: ToneCodes = ToneCodes {
    flat: 0b0111_1111,
    boost_2db: 0b0111_1110,
    cut_2db: 0b0111_0110,
};

/// Bass register codes (`0b0110_xxxx`).
pub const BASS_CODES: ToneCodes = ToneCodes {
    flat: 0b0110_1111,
    boost_2db: 0b0110_1110,
    cut_2db: 0b0110_0110,
};

/// Where a single tone step starts and ends relative to flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneRegion {
    /// Both ends are boosted.
    Boost,
    /// Both ends are cut.
    Cut,
    /// Starts at flat.
    LeaveFlat,
    /// Ends at flat.
    ReturnToFlat,
}

impl ToneRegion {
    /// Classify a step of `step` hundredths of a dB from `value`.
    pub fn of_step(value: i32, direction: Direction, step: i32) -> Self {
        let next = value + direction.sign() * step;
        if value == 0 {
            ToneRegion::LeaveFlat
        } else if next == 0 {
            ToneRegion::ReturnToFlat
        } else if value > 0 {
            ToneRegion::Boost
        } else {
            ToneRegion::Cut
        }
    }
}

/// Change applied to a register byte by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteAction {
    /// Add one to the byte.
    Increment,
    /// Subtract one from the byte.
    Decrement,
    /// Replace the byte with a fixed code.
    Set(u8),
}

impl ByteAction {
    /// Apply this action to `byte`.
    pub fn apply(self, byte: u8) -> u8 {
        match self {
            ByteAction::Increment => byte.wrapping_add(1),
            ByteAction::Decrement => byte.wrapping_sub(1),
            ByteAction::Set(code) => code,
        }
    }
}

/// Byte action for one in-range step of `channel` from `value`.
///
/// Callers must check the range first; this function does not clamp.
///
/// # Examples
///
/// ```
/// use tone_control::tone_state::{transition, ByteAction, Channel, Direction};
///
/// // Leaving flat jumps straight to the +2 dB code.
/// assert_eq!(transition(Channel::Treble, Direction::Up, 0), ByteAction::Set(126));
/// // Volume attenuation falls as loudness rises.
/// assert_eq!(transition(Channel::Volume, Direction::Up, -4000), ByteAction::Decrement);
/// ```
pub fn transition(channel: Channel, direction: Direction, value: i32) -> ByteAction {
    let Some(codes) = channel.tone_codes() else {
        return match direction {
            Direction::Up => ByteAction::Decrement,
            Direction::Down => ByteAction::Increment,
        };
    };

    match (direction, ToneRegion::of_step(value, direction, channel.step())) {
        // Boost magnitude grows as the byte falls.
        (Direction::Up, ToneRegion::Boost) => ByteAction::Decrement,
        (Direction::Down, ToneRegion::Boost) => ByteAction::Increment,
        (Direction::Up, ToneRegion::Cut) => ByteAction::Increment,
        (Direction::Down, ToneRegion::Cut) => ByteAction::Decrement,
        (Direction::Up, ToneRegion::LeaveFlat) => ByteAction::Set(codes.boost_2db),
        (Direction::Down, ToneRegion::LeaveFlat) => ByteAction::Set(codes.cut_2db),
        // -2 dB climbs onto the cut-side flat code (0x77 / 0x67).
        (Direction::Up, ToneRegion::ReturnToFlat) => ByteAction::Increment,
        (Direction::Down, ToneRegion::ReturnToFlat) => ByteAction::Set(codes.flat),
    }
}

/// Canonical register byte for `value` on `channel`.
///
/// `value` is in hundredths of a dB and must be an in-range multiple of the
/// channel step.
///
/// # Examples
///
/// ```
/// use tone_control::tone_state::{encode, Channel};
///
/// assert_eq!(encode(Channel::Volume, -4000), 32);
/// assert_eq!(encode(Channel::Treble, 0), 0b0111_1111);
/// assert_eq!(encode(Channel::Bass, -1400), 0b0110_0000);
/// ```
pub fn encode(channel: Channel, value: i32) -> u8 {
    let Some(codes) = channel.tone_codes() else {
        return (-value / channel.step()) as u8 & 0b0011_1111;
    };

    if value == 0 {
        return codes.flat;
    }
    let steps = (value.abs() / channel.step()) as u8;
    let magnitude = 7u8.saturating_sub(steps) & TONE_MAGNITUDE_MASK;
    if value > 0 {
        codes.base() | TONE_BOOST_BIT | magnitude
    } else {
        codes.base() | magnitude
    }
}

/// Value in hundredths of a dB that `byte` selects on `channel`.
///
/// Both tone flat codes decode to 0. Volume bytes past the 60-step floor
/// decode below the channel range; callers only feed bytes from
/// [`encode()`] or [`transition()`].
///
/// # Examples
///
/// ```
/// use tone_control::tone_state::{decode, Channel};
///
/// assert_eq!(decode(Channel::Volume, 32), -4000);
/// assert_eq!(decode(Channel::Treble, 0x7F), 0);
/// assert_eq!(decode(Channel::Treble, 0x77), 0);
/// assert_eq!(decode(Channel::Bass, 0x6E), 200);
/// ```
pub fn decode(channel: Channel, byte: u8) -> i32 {
    if channel.tone_codes().is_none() {
        return -i32::from(byte & 0b0011_1111) * channel.step();
    }

    let magnitude = i32::from(7 - (byte & TONE_MAGNITUDE_MASK)) * channel.step();
    if byte & TONE_BOOST_BIT != 0 {
        magnitude
    } else {
        -magnitude
    }
}
