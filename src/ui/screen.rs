//! Character-display contract and the fixed screen layout.
//!
//! ```text
//! row 0  Gain: x25
//! row 1  Lux: 1234
//! ```

use heapless::String;

use crate::config::{
    DISPLAY_COLUMNS, GAIN_ROW, LUX_PREFIX, LUX_ROW, READING_ERROR_TEXT, SENSOR_ERROR_TEXT,
    SPLASH_TEXT,
};
use crate::gain::GainProfile;

/// A text display addressed by character cells.
///
/// Text is written from the cursor onward with no wrapping; stale
/// characters are only erased by [`CharDisplay::clear`] or by
/// overwriting them.
pub trait CharDisplay {
    fn clear(&mut self);
    fn set_cursor(&mut self, col: u8, row: u8);
    fn print(&mut self, text: &str);
}

/// One full display line.
pub type Line = String<{ DISPLAY_COLUMNS as usize }>;

/// Render the startup screen.
pub fn draw_splash<D: CharDisplay>(display: &mut D) {
    display.clear();
    display.set_cursor(0, 0);
    display.print(SPLASH_TEXT);
}

/// Render the fatal sensor error screen.
pub fn draw_sensor_error<D: CharDisplay>(display: &mut D) {
    display.clear();
    display.set_cursor(0, 0);
    display.print(SENSOR_ERROR_TEXT);
}

/// Write the gain label to its row.
pub fn draw_gain<D: CharDisplay>(display: &mut D, profile: &GainProfile) {
    display.set_cursor(0, GAIN_ROW);
    display.print(profile.label);
}

/// The reading row, which remembers how much it printed last time so a
/// shorter value fully covers a longer one.
#[derive(Debug, Default)]
pub struct ReadingRow {
    last_len: usize,
}

impl ReadingRow {
    pub const fn new() -> Self {
        Self { last_len: 0 }
    }

    /// Call after the display has been cleared.
    pub fn forget(&mut self) {
        self.last_len = 0;
    }

    /// Show a formatted value, or the reading error when `text` is `None`.
    pub fn draw<D: CharDisplay>(&mut self, display: &mut D, text: Option<&str>) {
        let mut line = Line::new();
        match text {
            Some(value) => {
                push_clipped(&mut line, LUX_PREFIX);
                push_clipped(&mut line, value);
            }
            None => push_clipped(&mut line, READING_ERROR_TEXT),
        }

        let content_len = line.len();
        while line.len() < self.last_len {
            if line.push(' ').is_err() {
                break;
            }
        }
        self.last_len = content_len;

        display.set_cursor(0, LUX_ROW);
        display.print(&line);
    }
}

fn push_clipped(line: &mut Line, text: &str) {
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
}
