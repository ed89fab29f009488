//! 3x5 micro font for the decimal digits.
//!
//! Each glyph is five rows from top to bottom. Only the low three bits of a
//! row are used; bit 2 is the leftmost column.

/// Glyph width in pixels.
pub const GLYPH_WIDTH: usize = 3;
/// Glyph height in pixels.
pub const GLYPH_HEIGHT: usize = 5;

pub type GlyphRows = [u8; GLYPH_HEIGHT];

#[rustfmt::skip]
pub static DIGIT_FONT: [GlyphRows; 10] = [
    [0x7, 0x5, 0x5, 0x5, 0x7], // 0
    [0x2, 0x2, 0x2, 0x2, 0x2], // 1
    [0x7, 0x1, 0x7, 0x4, 0x7], // 2
    [0x7, 0x1, 0x7, 0x1, 0x7], // 3
    [0x5, 0x5, 0x7, 0x1, 0x1], // 4
    [0x7, 0x4, 0x7, 0x1, 0x7], // 5
    [0x7, 0x4, 0x7, 0x5, 0x7], // 6
    [0x7, 0x1, 0x1, 0x1, 0x1], // 7
    [0x7, 0x5, 0x7, 0x5, 0x7], // 8
    [0x7, 0x5, 0x7, 0x1, 0x7], // 9
];

/// Look up the rows of a digit, `None` outside 0-9.
pub fn glyph_rows(digit: u8) -> Option<&'static GlyphRows> {
    DIGIT_FONT.get(digit as usize)
}

/// Whether the glyph pixel at (`col`, `row`) is set.
pub const fn glyph_bit(rows: &GlyphRows, col: usize, row: usize) -> bool {
    (rows[row] >> (GLYPH_WIDTH - 1 - col)) & 0x01 != 0
}
