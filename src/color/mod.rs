use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use smart_leds::hsv::hsv2rgb;

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Black pixel
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Add an HSV color on top of a pixel
///
/// Channels saturate at 255, so overlapping paints sum instead of
/// replacing each other.
#[inline]
pub fn add_hsv(pixel: Rgb, color: Hsv) -> Rgb {
    let rgb = hsv2rgb(color);
    Rgb {
        r: pixel.r.saturating_add(rgb.r),
        g: pixel.g.saturating_add(rgb.g),
        b: pixel.b.saturating_add(rgb.b),
    }
}
