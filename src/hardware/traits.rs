use crate::frame::Frame;

/// Something that can put a [`Frame`] on physical LEDs.
pub trait MatrixDriver {
    type Error;

    /// Bring the hardware up. Called once before the first frame.
    fn begin(&mut self) -> Result<(), Self::Error>;

    fn render(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

impl<D: MatrixDriver + ?Sized> MatrixDriver for &mut D {
    type Error = D::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        (**self).begin()
    }

    fn render(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        (**self).render(frame)
    }
}
