use smart_leds::{SmartLedsWrite, brightness};

use crate::OutputDriver;
use crate::color::Rgb;

/// [`OutputDriver`] over any `smart-leds` strip driver
///
/// The global brightness is applied while streaming the pixels out; channel
/// order on the wire is left to the inner driver.
pub struct StripWriter<W> {
    inner: W,
}

impl<W> StripWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W> OutputDriver for StripWriter<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    type Error = W::Error;

    fn write(&mut self, colors: &[Rgb], level: u8) -> Result<(), Self::Error> {
        self.inner.write(brightness(colors.iter().copied(), level))
    }
}
