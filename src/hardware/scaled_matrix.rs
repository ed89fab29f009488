use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};

use super::traits::MatrixDriver;
use crate::frame::{COLS, Frame, ROWS};

/// Mirrors the LED matrix on a monochrome graphics target.
///
/// Every LED becomes a `scale` x `scale` block, so with a scale of 8 the
/// matrix covers 96x64 pixels of a 128x64 SSD1306.
///
/// # Type parameters
/// - `T`: any `embedded-graphics` target with `BinaryColor` pixels
pub struct ScaledMatrix<T> {
    target: T,
    origin: Point,
    scale: u32,
}

impl<T> ScaledMatrix<T>
where
    T: DrawTarget<Color = BinaryColor>,
{
    /// A zero `scale` is bumped to 1.
    pub fn new(target: T, origin: Point, scale: u32) -> Self {
        Self {
            target,
            origin,
            scale: scale.max(1),
        }
    }

    /// Area of the target covered by the matrix.
    pub fn bounding_box(&self) -> Rectangle {
        Rectangle::new(
            self.origin,
            Size::new(COLS as u32 * self.scale, ROWS as u32 * self.scale),
        )
    }

    /// Area of the target covered by the LED at (`col`, `row`).
    pub fn led_area(&self, col: usize, row: usize) -> Rectangle {
        let step = self.scale as i32;
        Rectangle::new(
            self.origin + Point::new(col as i32 * step, row as i32 * step),
            Size::new_equal(self.scale),
        )
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn release(self) -> T {
        self.target
    }
}

impl<T> MatrixDriver for ScaledMatrix<T>
where
    T: DrawTarget<Color = BinaryColor>,
{
    type Error = T::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        let area = self.bounding_box();
        self.target.fill_solid(&area, BinaryColor::Off)
    }

    fn render(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        for (row, cols) in frame.rows().iter().enumerate() {
            for (col, &lit) in cols.iter().enumerate() {
                let area = self.led_area(col, row);
                self.target.fill_solid(&area, BinaryColor::from(lit))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    fn mock() -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display
    }

    #[test]
    fn begin_blanks_the_matrix_area() {
        let mut matrix = ScaledMatrix::new(mock(), Point::new(2, 3), 4);
        matrix.begin().unwrap();
        let display = matrix.release();
        assert_eq!(display.affected_area(), Rectangle::new(Point::new(2, 3), Size::new(48, 32)));
        assert_eq!(display.get_pixel(Point::new(2, 3)), Some(BinaryColor::Off));
        assert_eq!(display.get_pixel(Point::new(1, 3)), None);
    }

    #[test]
    fn lit_leds_become_filled_blocks() {
        let mut frame = Frame::new();
        frame.set_pixel(Point::new(11, 7));
        frame.set_pixel(Point::new(0, 0));

        let mut matrix = ScaledMatrix::new(mock(), Point::zero(), 5);
        matrix.render(&frame).unwrap();
        let display = matrix.release();

        for (x, y) in [(0, 0), (4, 4), (55, 35), (59, 39)] {
            assert_eq!(display.get_pixel(Point::new(x, y)), Some(BinaryColor::On), "({x}, {y})");
        }
        for (x, y) in [(5, 0), (0, 5), (54, 35), (30, 20)] {
            assert_eq!(display.get_pixel(Point::new(x, y)), Some(BinaryColor::Off), "({x}, {y})");
        }
    }

    #[test]
    fn zero_scale_still_draws() {
        let mut frame = Frame::new();
        frame.set_pixel(Point::new(3, 2));
        let mut matrix = ScaledMatrix::new(mock(), Point::zero(), 0);
        matrix.render(&frame).unwrap();
        assert_eq!(matrix.bounding_box().size, Size::new(12, 8));
        assert_eq!(matrix.target_mut().get_pixel(Point::new(3, 2)), Some(BinaryColor::On));
    }
}
