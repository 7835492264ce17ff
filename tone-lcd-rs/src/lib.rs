//! HD44780 character LCD front panel for the TDA7313 tone controller.
//!
//! The crate is split into a pure drawing half and a hardware half:
//!
//! - [`layout`] — the [`Screen`] buffer with per-row dirty tracking, the
//!   [`LcdConfig`] geometry and value formatting.
//! - [`render`] — draws [`ToneController`] state into a [`Screen`],
//!   consuming its display change flags.
//! - [`driver`] — [`Hd44780`], an async 4-bit parallel driver that flushes
//!   dirty rows to the glass.
//! - [`panel`] — [`TonePanel`], the two halves bundled for the main loop.
//!
//! # Quick Start
//!
//! ```ignore
//! use tone_lcd::{Hd44780, LcdConfig, TonePanel};
//!
//! let lcd = Hd44780::new(rs, en, [d4, d5, d6, d7], embassy_time::Delay);
//! let mut panel = TonePanel::new(lcd, LcdConfig::default());
//! panel.start(&mut controller).await?;
//!
//! loop {
//!     let outcome = controller.tick(sample);
//!     panel.refresh(&mut controller, &outcome).await?;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — `defmt::Format` on public types and driver logging.
//!
//! [`ToneController`]: tone_control::ToneController

#![cfg_attr(not(test), no_std)]

pub mod driver;
pub mod error;
pub mod layout;
pub mod panel;
pub mod render;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use driver::Hd44780;
pub use error::LcdError;
pub use layout::{LcdConfig, Screen, GRAPH_BLOCK, GRAPH_BLOCK_PATTERN};
pub use panel::TonePanel;
pub use render::{render_initial, render_tick};
