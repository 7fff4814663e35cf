//! Compile-time configuration of the sword
//!
//! Everything here is fixed for the life of the device. The default
//! configuration is checked while compiling, so a bar that would not fit
//! on the strip never reaches the renderer.

use core::fmt;

use embassy_time::Duration;

/// Number of pixels on the strip
pub const STRIP_LEN: usize = 12;

/// Number of sensors, one per target symbol
pub const NUM_TARGETS: usize = 6;

/// Hue (0-255) of the bar for each target
pub const TARGET_HUES: [u8; NUM_TARGETS] = [0, 24, 50, 90, 120, 160];

/// Bar length in whole pixels for each target
pub const TARGET_LENGTHS: [u8; NUM_TARGETS] = [2, 3, 4, 5, 6, 7];

/// Input lines of the sensors, read active-low with pull-up
pub const SENSOR_PINS: [u8; NUM_TARGETS] = [2, 3, 4, 5, 6, 7];

/// Nominal delay between frames
pub const FRAME_PERIOD_MS: u64 = 10;

/// Per-frame brightness decay while no target is selected
pub const FADE_FACTOR: f32 = 0.8;

/// Strip brightness while a target is selected
pub const MAX_BRIGHTNESS: u8 = 255;

/// Strip brightness before the first frame is drawn
pub const STARTUP_BRIGHTNESS: u8 = 128;

/// Volume sent to the audio player at startup
pub const GLOBAL_VOLUME: u8 = 30;

/// Highest volume the audio player accepts
pub const MAX_VOLUME: u8 = 30;

/// Track played when a target is acquired
pub const CUE_TRACK: u16 = 1;

/// Bar advance per frame, in sixteenths of a pixel
pub const DELTA16: u16 = 1;

/// Sub-pixel steps per pixel
pub const SUBPIXELS: u16 = 16;

/// Properties of the bar drawn for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub hue: u8,
    pub length: u8,
}

/// Targets in sensor order
pub const TARGETS: [Target; NUM_TARGETS] = zip_targets(&TARGET_HUES, &TARGET_LENGTHS);

const fn zip_targets(
    hues: &[u8; NUM_TARGETS],
    lengths: &[u8; NUM_TARGETS],
) -> [Target; NUM_TARGETS] {
    let mut targets = [Target { hue: 0, length: 1 }; NUM_TARGETS];
    let mut i = 0;
    while i < NUM_TARGETS {
        targets[i] = Target {
            hue: hues[i],
            length: lengths[i],
        };
        i += 1;
    }
    targets
}

/// Configuration consumed by the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwordConfig {
    pub targets: [Target; NUM_TARGETS],
    pub fade_factor: f32,
    pub max_brightness: u8,
    pub startup_brightness: u8,
    pub volume: u8,
    pub cue_track: u16,
    pub delta16: u16,
    pub frame_duration: Duration,
}

impl SwordConfig {
    /// Configuration built from the crate constants
    pub const DEFAULT: Self = Self {
        targets: TARGETS,
        fade_factor: FADE_FACTOR,
        max_brightness: MAX_BRIGHTNESS,
        startup_brightness: STARTUP_BRIGHTNESS,
        volume: GLOBAL_VOLUME,
        cue_track: CUE_TRACK,
        delta16: DELTA16,
        frame_duration: Duration::from_millis(FRAME_PERIOD_MS),
    };

    /// Check the configuration against a strip of `N` pixels
    #[allow(clippy::cast_possible_truncation)]
    pub const fn validate<const N: usize>(&self) -> Result<(), ConfigError> {
        if N == 0 || N > (u16::MAX / SUBPIXELS) as usize {
            return Err(ConfigError::StripLength(N));
        }
        let mut i = 0;
        while i < NUM_TARGETS {
            let length = self.targets[i].length;
            if length == 0 || length as usize >= N {
                return Err(ConfigError::BarLength { target: i, length });
            }
            i += 1;
        }
        if !(self.fade_factor > 0.0 && self.fade_factor < 1.0) {
            return Err(ConfigError::FadeFactor);
        }
        if self.max_brightness == 0 {
            return Err(ConfigError::MaxBrightness);
        }
        if self.volume > MAX_VOLUME {
            return Err(ConfigError::Volume(self.volume));
        }
        if self.delta16 >= N as u16 * SUBPIXELS {
            return Err(ConfigError::Delta(self.delta16));
        }
        Ok(())
    }
}

impl Default for SwordConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const _: () = assert!(SwordConfig::DEFAULT.validate::<STRIP_LEN>().is_ok());

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Strip has no pixels or too many to address in sixteenths
    StripLength(usize),
    /// Bar length must satisfy `1 <= length < strip length`
    BarLength { target: usize, length: u8 },
    /// Fade factor must lie strictly between 0 and 1
    FadeFactor,
    /// Maximum brightness is zero
    MaxBrightness,
    /// Volume exceeds [`MAX_VOLUME`]
    Volume(u8),
    /// Per-frame advance covers the whole strip
    Delta(u16),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::StripLength(len) => write!(f, "unsupported strip length {len}"),
            ConfigError::BarLength { target, length } => {
                write!(f, "target {target}: bar length {length} does not fit the strip")
            }
            ConfigError::FadeFactor => write!(f, "fade factor must be between 0 and 1"),
            ConfigError::MaxBrightness => write!(f, "maximum brightness must be non-zero"),
            ConfigError::Volume(volume) => {
                write!(f, "volume {volume} exceeds {MAX_VOLUME}")
            }
            ConfigError::Delta(delta) => write!(f, "bar advance {delta} wraps the whole strip"),
        }
    }
}
