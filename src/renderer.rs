//! Sub-pixel light bar renderer
//!
//! A bar of `length` pixels at a fractional position touches `length + 1`
//! pixels. The head and tail pixels share one pixel's worth of light
//! according to the fractional part, which makes the motion smooth.

use crate::bar::BarState;
use crate::color::{BLACK, Hsv, Rgb, add_hsv};
use crate::config::SUBPIXELS;

/// Brightness of the middle pixels
pub const FULL_LEVEL: u8 = 255;

/// Iterator over `(pixel index, level)` pairs of a bar
#[derive(Debug, Clone)]
pub struct BarLevels {
    start: usize,
    head: u8,
    length: u8,
    slot: u8,
    strip_len: usize,
}

/// Geometry of a bar at `pos16` without painting it
///
/// Yields `length + 1` slots starting at the head, wrapped onto a strip of
/// `strip_len` pixels.
#[allow(clippy::cast_possible_truncation)]
pub fn bar_levels(pos16: u16, length: u8, strip_len: usize) -> BarLevels {
    let frac = pos16 % SUBPIXELS;
    BarLevels {
        start: usize::from(pos16 / SUBPIXELS),
        head: FULL_LEVEL - (frac * SUBPIXELS) as u8,
        length,
        slot: 0,
        strip_len,
    }
}

impl Iterator for BarLevels {
    type Item = (usize, u8);

    fn next(&mut self) -> Option<Self::Item> {
        if self.strip_len == 0 || self.slot > self.length {
            return None;
        }
        let level = if self.slot == 0 {
            self.head
        } else if self.slot == self.length {
            FULL_LEVEL - self.head
        } else {
            FULL_LEVEL
        };
        let index = (self.start + usize::from(self.slot)) % self.strip_len;
        self.slot += 1;
        Some((index, level))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.strip_len == 0 {
            0
        } else {
            (usize::from(self.length) + 1).saturating_sub(usize::from(self.slot))
        };
        (remaining, Some(remaining))
    }
}

/// Paint a light bar on top of `pixels`
///
/// The buffer is not cleared; colors add with saturation.
pub fn draw_light_bar(pixels: &mut [Rgb], pos16: u16, length: u8, hue: u8) {
    for (index, level) in bar_levels(pos16, length, pixels.len()) {
        let pixel = &mut pixels[index];
        *pixel = add_hsv(
            *pixel,
            Hsv {
                hue,
                sat: 255,
                val: level,
            },
        );
    }
}

/// Owns the frame buffer of an `N` pixel strip
pub struct Renderer<const N: usize> {
    frame_buffer: [Rgb; N],
}

impl<const N: usize> Default for Renderer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Renderer<N> {
    pub const fn new() -> Self {
        Self {
            frame_buffer: [BLACK; N],
        }
    }

    /// Render one frame of the bar at nominal brightness
    ///
    /// Depends only on position, length and hue. Global brightness, and so
    /// the dark idle frame, is applied by the output driver.
    pub fn render(&mut self, bar: &BarState<N>) -> &[Rgb] {
        self.frame_buffer.fill(BLACK);
        draw_light_bar(&mut self.frame_buffer, bar.pos16(), bar.length(), bar.hue());
        &self.frame_buffer
    }

    /// Last rendered frame
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer
    }
}
