//! TDA7313 register layouts.
//!
//! Every register is one byte. The high bits select the function:
//!
//! ```text
//! 00xx_xxxx  volume            (1.25 dB attenuation steps)
//! 100x_xxxx  speaker LF        (1.25 dB steps, 11111 = mute)
//! 101x_xxxx  speaker RF
//! 110x_xxxx  speaker LR
//! 111x_xxxx  speaker RR
//! 010g_glss  audio switch      (gain, loudness, input)
//! 0110_cmmm  bass              (c = boost, mmm = 7 - |dB|/2)
//! 0111_cmmm  treble
//! ```

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// 7-bit I2C address of the TDA7313 (`0b100_0100`).
pub const DEFAULT_ADDRESS: u8 = 0x44;

// ---------------------------------------------------------------------------
// Audio switch
// ---------------------------------------------------------------------------

/// Function bits of the audio switch register.
const AUDIO_SWITCH: u8 = 0b0100_0000;

/// Loudness-off bit. Loudness is enabled while this bit is clear.
const LOUDNESS_OFF: u8 = 0b0000_0100;

/// Stereo input selected by the audio switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioInput {
    /// Stereo input 1.
    Input1 = 0b00,
    /// Stereo input 2.
    Input2 = 0b01,
    /// Stereo input 3.
    Input3 = 0b10,
}

/// Input gain applied before the volume stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputGain {
    /// +11.25 dB.
    Plus11_25Db = 0b00,
    /// +7.5 dB.
    Plus7_5Db = 0b01,
    /// +3.75 dB.
    Plus3_75Db = 0b10,
    /// 0 dB.
    ZeroDb = 0b11,
}

/// Audio switch register contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AudioSwitch {
    /// Selected stereo input.
    pub input: AudioInput,
    /// Input gain.
    pub gain: InputGain,
    /// Loudness compensation.
    pub loudness: bool,
}

impl Default for AudioSwitch {
    /// Input 2, +11.25 dB gain, loudness off (`0x45`).
    fn default() -> Self {
        Self {
            input: AudioInput::Input2,
            gain: InputGain::Plus11_25Db,
            loudness: false,
        }
    }
}

impl AudioSwitch {
    /// Encode as a register byte.
    pub fn to_byte(self) -> u8 {
        let loudness = if self.loudness { 0 } else { LOUDNESS_OFF };
        AUDIO_SWITCH | ((self.gain as u8) << 3) | loudness | self.input as u8
    }
}

// ---------------------------------------------------------------------------
// Speaker attenuators
// ---------------------------------------------------------------------------

/// Attenuation value that mutes a speaker output.
pub const SPEAKER_MUTE: u8 = 0b1_1111;

/// One of the four speaker attenuator outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speaker {
    /// Left front.
    LeftFront = 0b100,
    /// Right front.
    RightFront = 0b101,
    /// Left rear.
    LeftRear = 0b110,
    /// Right rear.
    RightRear = 0b111,
}

impl Speaker {
    /// All outputs in init-sequence order.
    pub const ALL: [Speaker; 4] = [
        Speaker::LeftFront,
        Speaker::RightFront,
        Speaker::LeftRear,
        Speaker::RightRear,
    ];

    /// Encode an attenuator byte. `steps` is in 1.25 dB units and must be
    /// at most [`SPEAKER_MUTE`]; returns `None` otherwise.
    pub fn byte(self, steps: u8) -> Option<u8> {
        (steps <= SPEAKER_MUTE).then(|| ((self as u8) << 5) | steps)
    }
}

// ---------------------------------------------------------------------------
// Power-on sequence
// ---------------------------------------------------------------------------

/// Number of bytes written by [`InitSequence::to_bytes()`].
pub const INIT_SEQUENCE_LEN: usize = 8;

/// Register contents written once at power-on, in a single transaction.
///
/// The bass, treble and volume bytes come from the user-interface state so
/// the chip starts out matching what the display shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitSequence {
    /// Input select / gain / loudness.
    pub audio_switch: AudioSwitch,
    /// Bass register byte.
    pub bass: u8,
    /// Treble register byte.
    pub treble: u8,
    /// Attenuation steps per speaker, in [`Speaker::ALL`] order.
    pub speakers: [u8; 4],
    /// Volume register byte.
    pub volume: u8,
}

impl InitSequence {
    /// Default routing (input 2, front outputs muted, rear outputs at
    /// 0 dB) with the given tone and volume bytes.
    pub fn new(bass: u8, treble: u8, volume: u8) -> Self {
        Self {
            audio_switch: AudioSwitch::default(),
            bass,
            treble,
            speakers: [SPEAKER_MUTE, SPEAKER_MUTE, 0, 0],
            volume,
        }
    }

    /// Bytes in transmission order: audio switch, bass, treble, LF, RF, LR,
    /// RR, volume.
    ///
    /// Speaker values above [`SPEAKER_MUTE`] are written as mute.
    pub fn to_bytes(&self) -> [u8; INIT_SEQUENCE_LEN] {
        let mut speakers = [0u8; 4];
        for ((byte, speaker), &steps) in speakers.iter_mut().zip(Speaker::ALL).zip(&self.speakers) {
            *byte = speaker.byte(steps.min(SPEAKER_MUTE)).unwrap_or(SPEAKER_MUTE);
        }

        [
            self.audio_switch.to_byte(),
            self.bass,
            self.treble,
            speakers[0],
            speakers[1],
            speakers[2],
            speakers[3],
            self.volume,
        ]
    }
}
