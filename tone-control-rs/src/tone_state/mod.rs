//! Volume / treble / bass state with TDA7313 register tracking.
//!
//! This module provides the [`ParameterStore`] that holds the three audio
//! parameters and the [`SelectionCursor`] that decides which of them the
//! rotary encoder adjusts. Together they are the single source of truth for
//! the display and the I2C transmission path.
//!
//! # Representation
//!
//! Every parameter carries two views of the same setting that always move
//! together:
//!
//! ```text
//! Channel   value (0.01 dB)      register byte
//! Volume    -7500 ..= 0          0b00xx_xxxx   attenuation steps, 1.25 dB each
//! Treble    -1400 ..= 1400       0b0111_cmmm   c = boost, mmm = 7 - |dB|/2
//! Bass      -1400 ..= 1400       0b0110_cmmm
//! ```
//!
//! Values are held in hundredths of a decibel so that Volume's 1.25 dB steps
//! stay exact in integer arithmetic.
//!
//! # Change Tracking
//!
//! Each parameter carries two independent flags:
//!
//! - **`update_queued`** — the register byte has not been sent to the chip
//!   yet. Drained one parameter per tick by
//!   [`ParameterStore::take_queued_update()`].
//! - **`changed`** — the display has not redrawn this parameter yet.
//!   Consumed by [`ParameterStore::take_display_changes()`].

mod channel;
mod codec;
mod cursor;
mod parameter;
mod store;

pub use channel::{Channel, Direction};
pub use codec::{decode, encode, transition, ByteAction, ToneCodes, ToneRegion, BASS_CODES, TREBLE_CODES};
pub use cursor::SelectionCursor;
pub use parameter::Parameter;
pub use store::{ParameterChange, ParameterStore, RegisterUpdate};

/// Number of adjustable channels.
pub const CHANNEL_COUNT: usize = 3;

/// Short labels shown at the start of each LCD row, indexed by
/// [`Channel::index()`].
pub const CHANNEL_LABELS: [&str; CHANNEL_COUNT] = ["VOL", "TRB", "BAS"];
