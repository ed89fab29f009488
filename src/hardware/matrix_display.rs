use super::traits::MatrixDriver;
use crate::frame::Frame;
use crate::rasterizer::{Layout, Rasterizer, Readout};

/// Numeric readout on an LED matrix.
///
/// Pairs the [`Rasterizer`] with a [`MatrixDriver`]: values go in, frames go
/// out to the hardware.
pub struct MatrixDisplay<D> {
    driver: D,
    rasterizer: Rasterizer,
}

impl<D: MatrixDriver> MatrixDisplay<D> {
    pub fn new(driver: D) -> Self {
        Self::with_layout(driver, Layout::DEFAULT)
    }

    pub fn with_layout(driver: D, layout: Layout) -> Self {
        Self {
            driver,
            rasterizer: Rasterizer::new(layout),
        }
    }

    pub fn begin(&mut self) -> Result<(), D::Error> {
        self.driver.begin()?;
        #[cfg(feature = "defmt")]
        defmt::debug!("matrix display ready");
        Ok(())
    }

    /// Show `value` rounded to one decimal and clamped to 0.0..=99.9.
    ///
    /// # Returns
    /// The digits that were put on the matrix.
    pub fn show_float(&mut self, value: f64) -> Result<Readout, D::Error> {
        let readout = Readout::from_value(value);
        let frame = self.rasterizer.render_readout(&readout);
        self.driver.render(&frame)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("matrix shows {}", readout);
        Ok(readout)
    }

    pub fn show_frame(&mut self, frame: &Frame) -> Result<(), D::Error> {
        self.driver.render(frame)
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn release(self) -> D {
        self.driver
    }
}
