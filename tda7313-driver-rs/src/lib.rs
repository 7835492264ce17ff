//! Async driver for the ST TDA7313 digital audio processor.
//!
//! The TDA7313 is a write-only I2C device: every register is a single byte
//! whose top bits select the function (volume, speaker attenuators, audio
//! switch, bass, treble). There is no read path and no auto-increment
//! addressing; a transaction may simply carry several register bytes in a
//! row.
//!
//! # Architecture
//!
//! - **[`registers`]** — bit layouts and builders for the fixed-function
//!   registers, plus the power-on [`InitSequence`].
//! - **[`Tda7313`]** — owns the I2C peripheral and writes bytes to the chip.
//!
//! Volume and tone bytes are computed elsewhere (they depend on the user
//! interface state) and handed to [`Tda7313::send_byte()`].
//!
//! # Quick start
//!
//! ```no_run
//! use tda7313_driver::{InitSequence, Tda7313, DEFAULT_ADDRESS};
//!
//! # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
//! let mut tda = Tda7313::new(i2c, DEFAULT_ADDRESS);
//! tda.init(&InitSequence::new(0x6F, 0x7F, 0x20)).await.ok();
//! tda.send_byte(0x1F).await.ok();
//! # }
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on public types
//!   for embedded logging.

#![cfg_attr(not(test), no_std)]

pub use error::Tda7313Error;
pub use registers::{
    AudioInput, AudioSwitch, InitSequence, InputGain, Speaker, DEFAULT_ADDRESS,
    INIT_SEQUENCE_LEN, SPEAKER_MUTE,
};
pub use tda7313::Tda7313;

mod error;
pub mod registers;
mod tda7313;
