//! Screen buffer, layout geometry and value formatting.
//!
//! This module defines the [`Screen`] character buffer with per-row dirty
//! tracking, the [`LcdConfig`] geometry and the pure helpers that turn
//! parameter values into text and bar-graph lengths.

use core::fmt::Write;

use heapless::String;
use tone_control::tone_state::Channel;

/// Character columns on the display.
pub const COLUMNS: usize = 20;

/// Character rows on the display.
pub const ROWS: usize = 4;

/// Character code of the bar-graph glyph (CGRAM slot 0).
pub const GRAPH_BLOCK: u8 = 0;

/// Bar-graph glyph bitmap: a solid 5×7 block with the cursor row blank.
pub const GRAPH_BLOCK_PATTERN: [u8; 8] = [
    0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b00000,
];

/// Character drawn next to the selected channel's label.
pub const SELECTION_MARKER: u8 = b'>';

/// Volume positions at or below this many dB leave the graph untouched.
const VOLUME_GRAPH_FLOOR_DB: i32 = -50;

// ── LcdConfig ────────────────────────────────────────────────────────────

/// Layout geometry for the tone controller screen.
///
/// [`LcdConfig::default()`] reproduces the 20×4 layout:
///
/// ```text
/// col  0123456789012345678 9
///     ┌────────────────────┐
///   0 │VOL>|██            |│
///   1 │TRB |     FLAT     |│
///   2 │BAS |     FLAT     |│
///   3 │            -40.00dB│
///     └────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdConfig {
    /// Column of the selection marker. Default: 3.
    pub marker_col: usize,
    /// First column of each bar graph. Default: 5.
    pub graph_col: usize,
    /// Bar graph width in cells. Default: 14.
    pub graph_width: usize,
    /// Row holding the numeric readout. Default: 3.
    pub readout_row: usize,
    /// First column of the numeric readout field. Default: 10.
    pub readout_col: usize,
    /// Width of the readout field; the value is right-aligned in it. Default: 8.
    pub readout_width: usize,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            marker_col: 3,
            graph_col: 5,
            graph_width: 14,
            readout_row: 3,
            readout_col: 10,
            readout_width: 8,
        }
    }
}

impl LcdConfig {
    /// Column of the "dB" unit, directly after the readout field.
    pub fn unit_col(&self) -> usize {
        self.readout_col + self.readout_width
    }
}

// ── Screen ───────────────────────────────────────────────────────────────

/// In-memory copy of the display contents.
///
/// Cells hold HD44780 character codes, so glyph slot 0 is stored as the
/// byte `0`. Writes that change a cell mark its row dirty;
/// [`take_dirty_rows()`](Self::take_dirty_rows) tells the driver which rows
/// to resend. Writes outside the display are clipped.
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    cells: [[u8; COLUMNS]; ROWS],
    dirty: [bool; ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// A blank screen with every row dirty, so the first flush clears the
    /// display.
    pub fn new() -> Self {
        Self {
            cells: [[b' '; COLUMNS]; ROWS],
            dirty: [true; ROWS],
        }
    }

    /// Character codes of one row, or `None` if `row` is off-screen.
    pub fn row(&self, row: usize) -> Option<&[u8; COLUMNS]> {
        self.cells.get(row)
    }

    /// Row as text, with glyph cells shown as `#`. Intended for tests and
    /// logging.
    pub fn row_text(&self, row: usize) -> String<COLUMNS> {
        let mut text = String::new();
        for &code in self.row(row).into_iter().flatten() {
            let c = if code == GRAPH_BLOCK { '#' } else { char::from(code) };
            let _ = text.push(c);
        }
        text
    }

    /// Write raw character codes starting at (`col`, `row`).
    pub fn put_bytes(&mut self, col: usize, row: usize, bytes: &[u8]) {
        let Some(cells) = self.cells.get_mut(row) else {
            return;
        };
        for (cell, &byte) in cells.iter_mut().skip(col).zip(bytes) {
            if *cell != byte {
                *cell = byte;
                self.dirty[row] = true;
            }
        }
    }

    /// Write ASCII text starting at (`col`, `row`).
    pub fn put_str(&mut self, col: usize, row: usize, text: &str) {
        self.put_bytes(col, row, text.as_bytes());
    }

    /// Fill `count` cells with `code` starting at (`col`, `row`).
    pub fn fill(&mut self, col: usize, row: usize, count: usize, code: u8) {
        let Some(cells) = self.cells.get_mut(row) else {
            return;
        };
        for cell in cells.iter_mut().skip(col).take(count) {
            if *cell != code {
                *cell = code;
                self.dirty[row] = true;
            }
        }
    }

    /// Read and clear the per-row dirty flags.
    pub fn take_dirty_rows(&mut self) -> [bool; ROWS] {
        core::mem::replace(&mut self.dirty, [false; ROWS])
    }

    /// Queue every row for resend, e.g. after a failed flush.
    pub fn mark_all_dirty(&mut self) {
        self.dirty = [true; ROWS];
    }

    /// Returns `true` if any row needs to be resent.
    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(|&d| d)
    }
}

// ── Formatting ───────────────────────────────────────────────────────────

/// Format a value for the numeric readout.
///
/// Volume is shown with two decimals (`-38.75`, `0.00`); tone values as
/// whole dB (`-14`, `2`). `value` is in hundredths of a dB.
pub fn format_value(channel: Channel, value: i32) -> String<8> {
    let mut buf: String<8> = String::new();
    // core::fmt::Write, no alloc needed.
    let _ = match channel {
        Channel::Volume => {
            let sign = if value < 0 { "-" } else { "" };
            let abs = value.unsigned_abs();
            write!(buf, "{}{}.{:02}", sign, abs / 100, abs % 100)
        }
        Channel::Treble | Channel::Bass => write!(buf, "{}", value / 100),
    };
    buf
}

/// Number of filled cells in a tone graph, or `None` at flat (drawn as
/// text instead).
///
/// Each 2 dB step adds one cell; the centre cell is skipped so that -2 dB
/// and +2 dB are visibly different lengths.
pub fn tone_graph_blocks(value: i32) -> Option<usize> {
    let db = value / 100;
    match db {
        0 => None,
        d if d < 0 => Some(((d + 16) / 2).max(0) as usize),
        d => Some(((d + 14) / 2) as usize),
    }
}

/// Number of filled cells in the volume graph, or `None` when the graph
/// should be left as it is.
///
/// The mapping only covers positions above -50 dB; the fractional part
/// of the volume is dropped before mapping.
pub fn volume_graph_segments(value: i32) -> Option<usize> {
    let db = value / 100;
    if db <= VOLUME_GRAPH_FLOOR_DB {
        return None;
    }
    let span = -VOLUME_GRAPH_FLOOR_DB;
    Some(((span - db.abs()) * 14 / span) as usize)
}

// ── Tests ────────────────────────────────────────────────────────────────
