//! Per-frame state of the light bar
//!
//! Selecting a target holds the bar at full brightness; releasing it lets
//! the brightness decay frame by frame, which gives the afterglow.

use crate::config::{SUBPIXELS, SwordConfig};
use crate::sensor::Selection;

/// Audio cue requested on a rising edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueRequest {
    pub track: u16,
}

/// Bar state for a strip of `N` pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarState<const N: usize> {
    /// Head position in sixteenths of a pixel, always `< N * 16`
    pos16: u16,
    length: u8,
    hue: u8,
    brightness: u8,
    was_active: bool,
}

impl<const N: usize> Default for BarState<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BarState<N> {
    /// Number of distinct bar positions
    #[allow(clippy::cast_possible_truncation)]
    pub const POSITIONS: u16 = N as u16 * SUBPIXELS;

    /// Dark bar at pixel 0
    pub const fn new() -> Self {
        Self {
            pos16: 0,
            length: 1,
            hue: 0,
            brightness: 0,
            was_active: false,
        }
    }

    /// Move the bar head, wrapping around the strip
    #[must_use]
    pub const fn with_position(mut self, pos16: u16) -> Self {
        self.pos16 = pos16 % Self::POSITIONS;
        self
    }

    pub const fn pos16(&self) -> u16 {
        self.pos16
    }

    pub const fn length(&self) -> u8 {
        self.length
    }

    pub const fn hue(&self) -> u8 {
        self.hue
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn was_active(&self) -> bool {
        self.was_active
    }

    /// Whether the bar contributes any light
    pub const fn is_lit(&self) -> bool {
        self.brightness > 0
    }

    /// Apply the sampled selection
    ///
    /// Returns the cue to play when a target is acquired after a frame with
    /// none. The position is not advanced here; see [`BarState::advance`].
    pub fn update(&mut self, selection: Selection, config: &SwordConfig) -> Option<CueRequest> {
        let mut cue = None;
        match selection.index() {
            Some(index) => {
                if !self.was_active {
                    self.pos16 = 0;
                    cue = Some(CueRequest {
                        track: config.cue_track,
                    });
                }
                if let Some(target) = config.targets.get(index) {
                    self.length = target.length;
                    self.hue = target.hue;
                }
                self.brightness = config.max_brightness;
            }
            None => {
                self.brightness = fade(self.brightness, config.fade_factor);
            }
        }
        self.was_active = selection.is_active();
        cue
    }

    /// Advance the bar by `delta16` sixteenths of a pixel
    pub fn advance(&mut self, delta16: u16) {
        let positions = u32::from(Self::POSITIONS);
        #[allow(clippy::cast_possible_truncation)]
        {
            self.pos16 = ((u32::from(self.pos16) + u32::from(delta16)) % positions) as u16;
        }
    }
}

/// One step of the idle fade: `floor(brightness * factor)`
///
/// Never negative and never brighter than the input.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fade(brightness: u8, factor: f32) -> u8 {
    let faded = libm::floorf(f32::from(brightness) * factor);
    if faded.is_nan() || faded < 0.0 {
        return 0;
    }
    (faded as u8).min(brightness)
}
