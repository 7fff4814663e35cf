//! Shared collaborators for the integration tests

#![allow(dead_code, unreachable_pub)] // Items used across multiple test files; Rust analyzes per-file

use core::convert::Infallible;

use slipring_sword::config::{NUM_TARGETS, STRIP_LEN};
use slipring_sword::{AudioPlayer, OutputDriver, Rgb, SwordConfig, SwordEngine};

// ============================================================================
// Mock audio player
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCall {
    Configure(u8),
    SetSynchronous(bool),
    PlayTrack(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerError;

/// Capacity of the player call log
pub const CALL_LOG_LEN: usize = 1024;

/// Records every request; can be told to reject them
///
/// Overflowing the call log fails the test instead of dropping calls.
#[derive(Default)]
pub struct MockPlayer {
    pub calls: heapless::Vec<PlayerCall, CALL_LOG_LEN>,
    pub failing: bool,
}

impl MockPlayer {
    pub fn plays(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, PlayerCall::PlayTrack(_)))
            .count()
    }
}

impl AudioPlayer for MockPlayer {
    type Error = PlayerError;

    fn configure(&mut self, volume: u8) -> Result<(), Self::Error> {
        self.record(PlayerCall::Configure(volume))
    }

    fn set_synchronous(&mut self, synchronous: bool) -> Result<(), Self::Error> {
        self.record(PlayerCall::SetSynchronous(synchronous))
    }

    fn play_track(&mut self, track: u16) -> Result<(), Self::Error> {
        self.record(PlayerCall::PlayTrack(track))
    }
}

impl MockPlayer {
    fn record(&mut self, call: PlayerCall) -> Result<(), PlayerError> {
        self.calls.push(call).expect("player call log full");
        if self.failing { Err(PlayerError) } else { Ok(()) }
    }
}

// ============================================================================
// Mock LED strip
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripError;

/// Keeps the last frame and brightness it was given
#[derive(Default)]
pub struct MockStrip {
    pub last_frame: heapless::Vec<Rgb, STRIP_LEN>,
    pub last_brightness: u8,
    pub writes: usize,
    pub failing: bool,
}

impl MockStrip {
    /// Last frame as it would appear on the strip
    pub fn shown(&self) -> heapless::Vec<Rgb, STRIP_LEN> {
        self.last_frame
            .iter()
            .map(|pixel| {
                if self.last_brightness == 0 {
                    Rgb::default()
                } else {
                    *pixel
                }
            })
            .collect()
    }
}

impl OutputDriver for MockStrip {
    type Error = StripError;

    fn write(&mut self, colors: &[Rgb], brightness: u8) -> Result<(), Self::Error> {
        self.writes += 1;
        if self.failing {
            return Err(StripError);
        }
        self.last_frame.clear();
        self.last_frame
            .extend_from_slice(colors)
            .expect("frame longer than the strip");
        self.last_brightness = brightness;
        Ok(())
    }
}

// ============================================================================
// Mock input pin
// ============================================================================

/// Input pin with a fixed level
pub struct MockPin {
    pub low: bool,
    pub broken: bool,
}

#[derive(Debug)]
pub struct PinError;

impl embedded_hal::digital::Error for PinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = PinError;
}

impl embedded_hal::digital::InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        if self.broken { Err(PinError) } else { Ok(self.low) }
    }
}

/// Pin that is never read
pub struct IdlePin;

impl embedded_hal::digital::ErrorType for IdlePin {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for IdlePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

// ============================================================================
// Engine helpers
// ============================================================================

pub type TestEngine = SwordEngine<[bool; NUM_TARGETS], MockPlayer, MockStrip, STRIP_LEN>;

pub fn engine() -> TestEngine {
    SwordEngine::new(
        SwordConfig::DEFAULT,
        [false; NUM_TARGETS],
        MockPlayer::default(),
        MockStrip::default(),
    )
}

/// Assert only `sensors`, release everything else
pub fn hold(engine: &mut TestEngine, sensors: &[usize]) {
    let inputs = engine.inputs_mut();
    *inputs = [false; NUM_TARGETS];
    for &sensor in sensors {
        inputs[sensor] = true;
    }
}

pub fn is_black(pixel: Rgb) -> bool {
    pixel.r == 0 && pixel.g == 0 && pixel.b == 0
}
