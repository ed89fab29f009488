//! Numeric readout rasterizer.
//!
//! Turns a measurement into a [`Frame`] showing up to two integer digits, a
//! decimal point and one fractional digit, e.g. `"23.5"`:
//!
//! ```text
//!  col  0   4   8 9
//!       ### ### . ###
//! ```
//!
//! Nothing here fails. Out-of-range values are clamped and pixels that fall
//! off the matrix are dropped, so a headless display always shows something.

use core::fmt::{self, Write};

use embedded_graphics::prelude::Point;
use heapless::String;

use crate::font::{GLYPH_HEIGHT, GLYPH_WIDTH, glyph_bit, glyph_rows};
use crate::frame::Frame;

/// Smallest displayable value.
pub const MIN_VALUE: f64 = 0.0;
/// Largest displayable value.
pub const MAX_VALUE: f64 = 99.9;

/// Where each element of the readout is placed, as (column, row) origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub tens: Point,
    pub units: Point,
    pub decimal_point: Point,
    pub decimal: Point,
}

impl Layout {
    pub const DEFAULT: Self = Self {
        tens: Point::new(0, 1),
        units: Point::new(4, 1),
        decimal_point: Point::new(8, 6),
        decimal: Point::new(9, 1),
    };

    /// Shift every element by `offset`.
    pub const fn translate(self, offset: Point) -> Self {
        Self {
            tens: Point::new(self.tens.x + offset.x, self.tens.y + offset.y),
            units: Point::new(self.units.x + offset.x, self.units.y + offset.y),
            decimal_point: Point::new(
                self.decimal_point.x + offset.x,
                self.decimal_point.y + offset.y,
            ),
            decimal: Point::new(self.decimal.x + offset.x, self.decimal.y + offset.y),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A value broken down into the three digits the matrix shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readout {
    pub tens: u8,
    pub units: u8,
    pub decimal: u8,
}

impl Readout {
    /// Clamp `value` to [`MIN_VALUE`, `MAX_VALUE`] and round it half up to
    /// one decimal place. NaN reads as [`MIN_VALUE`].
    pub fn from_value(value: f64) -> Self {
        let clamped = if value.is_nan() {
            MIN_VALUE
        } else {
            value.clamp(MIN_VALUE, MAX_VALUE)
        };

        #[cfg(feature = "defmt")]
        if clamped != value {
            defmt::trace!("readout value {} clamped to {}", value, clamped);
        }

        // Truncation after +0.5 rounds half up; the clamp keeps this <= 999.
        Self::from_tenths((clamped * 10.0 + 0.5) as u16)
    }

    /// Build from a value already scaled by ten. Values above 999 saturate.
    pub fn from_tenths(tenths: u16) -> Self {
        let scaled = tenths.min(999);
        Self {
            tens: (scaled / 100) as u8,
            units: ((scaled / 10) % 10) as u8,
            decimal: (scaled % 10) as u8,
        }
    }

    pub fn tenths(&self) -> u16 {
        self.tens as u16 * 100 + self.units as u16 * 10 + self.decimal as u16
    }

    /// The readout as text with the leading zero suppressed, e.g. `"7.5"`.
    pub fn text(&self) -> String<4> {
        let mut buf = String::new();
        // Four bytes always hold "dd.d".
        let _ = write!(buf, "{self}");
        buf
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tens > 0 {
            write!(f, "{}", self.tens)?;
        }
        write!(f, "{}.{}", self.units, self.decimal)
    }
}

/// Draw the 3x5 glyph for `digit` with its top-left corner at `origin`.
///
/// Digits outside 0-9 draw nothing. Pixels past the matrix edge are dropped.
pub fn draw_digit(frame: &mut Frame, digit: u8, origin: Point) {
    let Some(rows) = glyph_rows(digit) else {
        return;
    };
    for row in 0..GLYPH_HEIGHT {
        for col in 0..GLYPH_WIDTH {
            if glyph_bit(rows, col, row) {
                frame.set_pixel(origin + Point::new(col as i32, row as i32));
            }
        }
    }
}

/// Light a single pixel, ignoring points off the matrix.
pub fn draw_pixel(frame: &mut Frame, point: Point) {
    frame.set_pixel(point);
}

/// Renders readouts with a fixed [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rasterizer {
    layout: Layout,
}

impl Rasterizer {
    pub const fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn render_value(&self, value: f64) -> Frame {
        self.render_readout(&Readout::from_value(value))
    }

    pub fn render_readout(&self, readout: &Readout) -> Frame {
        let mut frame = Frame::new();

        if readout.tens > 0 {
            draw_digit(&mut frame, readout.tens, self.layout.tens);
        }
        draw_digit(&mut frame, readout.units, self.layout.units);
        draw_pixel(&mut frame, self.layout.decimal_point);
        draw_digit(&mut frame, readout.decimal, self.layout.decimal);

        frame
    }
}

/// Render `value` with the default layout.
pub fn render_value(value: f64) -> Frame {
    Rasterizer::new(Layout::DEFAULT).render_value(value)
}
