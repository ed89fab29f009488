use core::convert::Infallible;
use core::fmt;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// Matrix height in LEDs.
pub const ROWS: usize = 8;
/// Matrix width in LEDs.
pub const COLS: usize = 12;

/// Number of `u32` words in a packed frame (96 bits).
pub const WORDS: usize = ROWS * COLS / 32;

/// One 8x12 monochrome frame of the LED matrix.
///
/// Row-major, stack allocated and `Copy`. A new frame is all unlit. Writes
/// outside the matrix are discarded, never wrapped.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Frame {
    pixels: [[bool; COLS]; ROWS],
}

impl Frame {
    pub const fn new() -> Self {
        Self {
            pixels: [[false; COLS]; ROWS],
        }
    }

    /// Map a point to (row, col) indices if it lies on the matrix.
    fn index(point: Point) -> Option<(usize, usize)> {
        let (col, row) = (usize::try_from(point.x).ok()?, usize::try_from(point.y).ok()?);
        (row < ROWS && col < COLS).then_some((row, col))
    }

    /// Light the pixel at `point` (x = column, y = row).
    pub fn set_pixel(&mut self, point: Point) {
        self.set(point, true);
    }

    pub fn set(&mut self, point: Point, lit: bool) {
        if let Some((row, col)) = Self::index(point) {
            self.pixels[row][col] = lit;
        }
    }

    /// Off-matrix points read as unlit.
    pub fn is_lit(&self, point: Point) -> bool {
        Self::index(point).is_some_and(|(row, col)| self.pixels[row][col])
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; COLS]; ROWS];
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().flatten().filter(|&&lit| lit).count()
    }

    pub fn rows(&self) -> &[[bool; COLS]; ROWS] {
        &self.pixels
    }

    /// Iterate over every lit pixel in row-major order.
    pub fn lit_pixels(&self) -> impl Iterator<Item = Point> + '_ {
        self.pixels.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, lit)| **lit)
                .map(move |(col, _)| Point::new(col as i32, row as i32))
        })
    }

    /// Byte-per-pixel bitmap, `1` for lit.
    pub fn to_bitmap(&self) -> [[u8; COLS]; ROWS] {
        let mut bitmap = [[0u8; COLS]; ROWS];
        for (dst, src) in bitmap.iter_mut().zip(self.pixels.iter()) {
            for (d, &lit) in dst.iter_mut().zip(src.iter()) {
                *d = lit as u8;
            }
        }
        bitmap
    }

    /// Pack the frame into three words, row-major, most significant bit first.
    pub fn to_words(&self) -> [u32; WORDS] {
        let mut words = [0u32; WORDS];
        for (i, &lit) in self.pixels.iter().flatten().enumerate() {
            if lit {
                words[i / 32] |= 1 << (31 - (i % 32));
            }
        }
        words
    }

    pub fn from_words(words: [u32; WORDS]) -> Self {
        let mut frame = Self::new();
        for (i, lit) in frame.pixels.iter_mut().flatten().enumerate() {
            *lit = words[i / 32] & (1 << (31 - (i % 32))) != 0;
        }
        frame
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frame [")?;
        for row in self.pixels.iter() {
            f.write_str("  ")?;
            for &lit in row.iter() {
                f.write_str(if lit { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        f.write_str("]")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, f: defmt::Formatter) {
        let [a, b, c] = self.to_words();
        defmt::write!(f, "Frame({=u32:#x} {=u32:#x} {=u32:#x})", a, b, c)
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(COLS as u32, ROWS as u32)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels = [[color.is_on(); COLS]; ROWS];
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

    #[test]
    fn new_frame_is_dark() {
        let frame = Frame::new();
        assert_eq!(frame.lit_count(), 0);
        assert_eq!(frame, Frame::default());
        assert_eq!(frame.to_words(), [0; WORDS]);
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut frame = Frame::new();
        frame.set_pixel(Point::new(COLS as i32, 0));
        frame.set_pixel(Point::new(0, ROWS as i32));
        frame.set_pixel(Point::new(-1, 3));
        frame.set_pixel(Point::new(3, -1));
        assert_eq!(frame.lit_count(), 0);

        frame.set_pixel(Point::new(11, 7));
        assert!(frame.is_lit(Point::new(11, 7)));
        assert!(!frame.is_lit(Point::new(12, 7)));
        assert_eq!(frame.lit_count(), 1);
    }

    #[test]
    fn bitmap_is_row_major() {
        let mut frame = Frame::new();
        frame.set_pixel(Point::new(8, 6));
        let bitmap = frame.to_bitmap();
        assert_eq!(bitmap[6][8], 1);
        assert_eq!(bitmap.iter().flatten().map(|&b| b as usize).sum::<usize>(), 1);
    }

    #[test]
    fn words_pack_msb_first() {
        let mut frame = Frame::new();
        frame.set_pixel(Point::new(0, 0)); // bit 0
        frame.set_pixel(Point::new(8, 2)); // bit 32
        frame.set_pixel(Point::new(11, 7)); // bit 95
        assert_eq!(frame.to_words(), [0x8000_0000, 0x8000_0000, 0x0000_0001]);
        assert_eq!(Frame::from_words(frame.to_words()), frame);
    }

    #[test]
    fn lit_pixels_in_row_major_order() {
        let mut frame = Frame::new();
        frame.set_pixel(Point::new(5, 4));
        frame.set_pixel(Point::new(2, 1));
        frame.set_pixel(Point::new(9, 1));
        let lit: std::vec::Vec<Point> = frame.lit_pixels().collect();
        assert_eq!(lit, [Point::new(2, 1), Point::new(9, 1), Point::new(5, 4)]);
    }

    #[test]
    fn primitives_are_clipped_to_the_matrix() {
        let mut frame = Frame::new();
        Line::new(Point::new(-4, 0), Point::new(20, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.lit_count(), COLS);

        Rectangle::new(Point::new(10, 6), Size::new(5, 5))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.lit_count(), COLS + 4);
    }

    #[test]
    fn clear_resets_every_pixel() {
        let mut frame = Frame::new();
        DrawTarget::clear(&mut frame, BinaryColor::On).unwrap();
        assert_eq!(frame.lit_count(), ROWS * COLS);
        frame.clear();
        assert_eq!(frame.lit_count(), 0);
    }

    #[test]
    fn debug_draws_the_grid() {
        let mut frame = Frame::new();
        frame.set_pixel(Point::new(0, 0));
        let text = std::format!("{frame:?}");
        assert!(text.contains("#..........."));
        assert_eq!(text.matches('\n').count(), ROWS + 1);
    }
}
