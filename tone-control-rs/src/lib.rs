//! Core state machine for a TDA7313 volume / tone controller.
//!
//! The crate is split into four layers, leaf-first:
//!
//! - [`tone_state`] — channels, the register codec, the parameter store and
//!   the selection cursor. Pure data, no I/O.
//! - [`input`] — quadrature decoding, detent quantisation and button cycle
//!   detection, producing abstract [`InputEvent`]s.
//! - [`controller`] — [`ToneController`], which runs one polling-loop tick
//!   and reports which byte to transmit and what to redraw.
//! - [`config`] — compile-time tunables with sensible defaults.
//!
//! # Example
//!
//! ```
//! use tone_control::{ControllerConfig, InputSample, ToneController};
//!
//! let mut controller = ToneController::new(ControllerConfig::default());
//!
//! // First sample only establishes the encoder baseline.
//! controller.tick(InputSample { encoder_pulses: 0, button_level: false });
//!
//! // One detent clockwise raises the volume by 1.25 dB.
//! let outcome = controller.tick(InputSample { encoder_pulses: 4, button_level: false });
//! assert_eq!(outcome.transmit.map(|u| u.byte), Some(31));
//! ```
//!
//! # Features
//!
//! - **`defmt`** — `defmt::Format` on public types and debug logging of
//!   state transitions.

#![no_std]

pub mod config;
pub mod controller;
pub mod input;
pub mod tone_state;

pub use config::ControllerConfig;
pub use controller::{InputSample, TickOutcome, ToneController};
pub use input::InputEvent;
