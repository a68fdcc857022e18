//! SSD1306 OLED display wrapper.
//!
//! The light meter writes text by character cell, like on an HD44780
//! module. [`OledText`] keeps a cursor and maps cells onto the 128×64
//! panel with a 6×10 font, flushing after every change.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use luxmeter::config::{DISPLAY_COLUMNS, DISPLAY_ROWS};
use luxmeter::CharDisplay;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral (or a shared-bus device).
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

const CELL_WIDTH: u32 = 6;
const CELL_HEIGHT: u32 = 10;

/// Character-cell view of the OLED.
pub struct OledText<I2C> {
    display: Display<I2C>,
    col: u8,
    row: u8,
}

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> OledText<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().is_err() {
        defmt::warn!("Display: init failed");
    }
    display.clear_buffer();
    let _ = display.flush();
    OledText {
        display,
        col: 0,
        row: 0,
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Longest prefix of `text` with at most `cells` characters.
fn clip(text: &str, cells: usize) -> (&str, usize) {
    match text.char_indices().nth(cells) {
        Some((end, _)) => (&text[..end], cells),
        None => (text, text.chars().count()),
    }
}

impl<I2C> CharDisplay for OledText<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) {
        self.display.clear_buffer();
        let _ = self.display.flush();
        self.col = 0;
        self.row = 0;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col.min(DISPLAY_COLUMNS);
        self.row = row.min(DISPLAY_ROWS - 1);
    }

    fn print(&mut self, text: &str) {
        let free = usize::from(DISPLAY_COLUMNS - self.col);
        let (visible, cells) = clip(text, free);
        if cells == 0 {
            return;
        }

        let origin = Point::new(
            (u32::from(self.col) * CELL_WIDTH) as i32,
            (u32::from(self.row) * CELL_HEIGHT) as i32,
        );

        // Overwrite the cells, like a character LCD would.
        let _ = Rectangle::new(origin, Size::new(cells as u32 * CELL_WIDTH, CELL_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(&mut self.display);
        let _ = Text::with_baseline(visible, origin, text_style(), Baseline::Top)
            .draw(&mut self.display);

        if self.display.flush().is_err() {
            defmt::warn!("Display: flush failed");
        }
        self.col += cells as u8;
    }
}
