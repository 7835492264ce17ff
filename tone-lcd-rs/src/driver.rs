//! HD44780 character LCD driver in 4-bit parallel mode.
//!
//! [`Hd44780`] manages the controller lifecycle: construction without pin
//! traffic, explicit async initialisation, custom glyph upload and flushing
//! dirty rows of a [`Screen`].

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal_async::delay::DelayNs;

use crate::error::LcdError;
use crate::layout::{Screen, COLUMNS, ROWS};

// ── Commands ─────────────────────────────────────────────────────────────

const CMD_CLEAR: u8 = 0x01;
/// Entry mode: increment address, no display shift.
const CMD_ENTRY_MODE: u8 = 0x06;
/// Display on, cursor off, blink off.
const CMD_DISPLAY_ON: u8 = 0x0C;
/// 4-bit bus, two line mode, 5×8 font.
const CMD_FUNCTION_SET: u8 = 0x28;
const CMD_SET_CGRAM: u8 = 0x40;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of the first cell of each row on a 20×4 module.
const ROW_OFFSETS: [u8; ROWS] = [0x00, 0x40, 0x14, 0x54];

/// Number of CGRAM glyph slots.
const GLYPH_SLOTS: u8 = 8;

/// Async driver for an HD44780-compatible 20×4 character LCD.
///
/// All six control lines share one pin type `P` (RS, E, D4–D7); R/W is
/// assumed tied low. Timing uses an async [`DelayNs`] source.
///
/// # Lifecycle
///
/// 1. [`Hd44780::new()`]: takes the pins, no traffic.
/// 2. [`Hd44780::init()`]: 4-bit wake-up sequence, clears the display.
/// 3. [`Hd44780::create_glyph()`]: optional custom characters.
/// 4. [`Hd44780::flush()`]: resend dirty rows of a [`Screen`].
pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    /// D4, D5, D6, D7.
    data: [P; 4],
    delay: D,
    /// Set to `true` after a successful `init()` call.
    initialized: bool,
}

impl<P, D> Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Construct an uninitialised driver. No pins are touched.
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        Self {
            rs,
            en,
            data,
            delay,
            initialized: false,
        }
    }

    /// Run the 4-bit initialisation sequence and clear the display.
    ///
    /// # Errors
    ///
    /// Returns [`LcdError::Pin`] if any line cannot be driven.
    pub async fn init(&mut self) -> Result<(), LcdError<P::Error>> {
        // Power-on settle time.
        self.delay.delay_ms(50).await;
        self.rs.set_low()?;
        self.en.set_low()?;

        // Three 8-bit "function set" nibbles resynchronise the controller
        // whatever state it is in, then switch to 4-bit.
        for wait_us in [4500, 150, 150] {
            self.write_nibble(0x3).await?;
            self.delay.delay_us(wait_us).await;
        }
        self.write_nibble(0x2).await?;

        self.command(CMD_FUNCTION_SET).await?;
        self.command(CMD_DISPLAY_ON).await?;
        self.command(CMD_CLEAR).await?;
        self.delay.delay_us(2000).await;
        self.command(CMD_ENTRY_MODE).await?;

        self.initialized = true;
        Ok(())
    }

    /// Check whether the display has been successfully initialised.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Upload a 5×8 bitmap into CGRAM `slot` (0–7). Only the low five bits
    /// of each row are used.
    ///
    /// # Errors
    ///
    /// [`LcdError::InvalidGlyph`] if `slot > 7`, [`LcdError::Pin`] on a
    /// pin failure.
    pub async fn create_glyph(&mut self, slot: u8, pattern: &[u8; 8]) -> Result<(), LcdError<P::Error>> {
        if slot >= GLYPH_SLOTS {
            return Err(LcdError::InvalidGlyph);
        }
        self.command(CMD_SET_CGRAM | (slot << 3)).await?;
        self.rs.set_high()?;
        for &row in pattern {
            self.write_byte(row & 0b1_1111).await?;
        }
        Ok(())
    }

    /// Move the DDRAM cursor to (`col`, `row`).
    ///
    /// # Errors
    ///
    /// [`LcdError::OutOfBounds`] outside the 20×4 area.
    pub async fn set_cursor(&mut self, col: usize, row: usize) -> Result<(), LcdError<P::Error>> {
        let offset = ROW_OFFSETS.get(row).ok_or(LcdError::OutOfBounds)?;
        if col >= COLUMNS {
            return Err(LcdError::OutOfBounds);
        }
        self.command(CMD_SET_DDRAM | (offset + col as u8)).await
    }

    /// Write character codes at the cursor. Codes 0–7 show custom glyphs.
    pub async fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LcdError<P::Error>> {
        self.rs.set_high()?;
        for &byte in bytes {
            self.write_byte(byte).await?;
        }
        Ok(())
    }

    /// Resend every dirty row of `screen` and clear its dirty flags.
    ///
    /// Rows are rewritten whole; at 20 cells a row this is cheaper than
    /// tracking individual spans.
    ///
    /// # Errors
    ///
    /// Returns [`LcdError::NotInitialized`] if [`init()`](Self::init) has
    /// not been called, or [`LcdError::Pin`] on a pin failure. On error the
    /// remaining rows stay clean in `screen` but may be stale on the glass;
    /// callers should mark the screen for a full redraw.
    pub async fn flush(&mut self, screen: &mut Screen) -> Result<(), LcdError<P::Error>> {
        if !self.initialized {
            return Err(LcdError::NotInitialized);
        }
        for (row, dirty) in screen.take_dirty_rows().into_iter().enumerate() {
            if let (true, Some(cells)) = (dirty, screen.row(row)) {
                let cells = *cells;
                self.set_cursor(0, row).await?;
                self.write_bytes(&cells).await?;
            }
        }
        Ok(())
    }

    /// Release the pins and delay source.
    pub fn release(self) -> (P, P, [P; 4], D) {
        (self.rs, self.en, self.data, self.delay)
    }

    // ── Bus primitives ───────────────────────────────────────────────

    async fn command(&mut self, byte: u8) -> Result<(), LcdError<P::Error>> {
        self.rs.set_low()?;
        self.write_byte(byte).await
    }

    async fn write_byte(&mut self, byte: u8) -> Result<(), LcdError<P::Error>> {
        self.write_nibble(byte >> 4).await?;
        self.write_nibble(byte & 0x0F).await
    }

    async fn write_nibble(&mut self, nibble: u8) -> Result<(), LcdError<P::Error>> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(PinState::from((nibble >> bit) & 1 == 1))?;
        }
        self.en.set_high()?;
        self.delay.delay_us(1).await;
        self.en.set_low()?;
        // Longest non-clear command takes 37 µs.
        self.delay.delay_us(50).await;
        Ok(())
    }
}
