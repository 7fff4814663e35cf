//! Frame scheduling and timing utilities.
//!
//! Provides deadline-based frame pacing without async/await or
//! platform-specific timers. The caller is responsible for sleeping between
//! frames, or hands a delay provider to [`FrameScheduler::run`].

use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;

use crate::OutputDriver;
use crate::audio::AudioPlayer;
use crate::engine::{FrameReport, SwordEngine};
use crate::sensor::SensorInputs;

/// Number of frame periods we may fall behind before the backlog is dropped.
pub const MAX_DRIFT_FRAMES: u32 = 2;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// What happened during the frame.
    pub report: FrameReport,
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks frame deadlines with drift correction
/// - Steps the sword engine once per frame
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(engine);
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()));
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<S, A, O, const N: usize> {
    engine: SwordEngine<S, A, O, N>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<S, A, O, const N: usize> FrameScheduler<S, A, O, N>
where
    S: SensorInputs,
    A: AudioPlayer,
    O: OutputDriver,
{
    /// Create a new frame scheduler.
    ///
    /// Uses the frame duration from the engine's configuration.
    pub fn new(engine: SwordEngine<S, A, O, N>) -> Self {
        let frame_duration = engine.config().frame_duration;
        Self::with_frame_duration(engine, frame_duration)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(engine: SwordEngine<S, A, O, N>, frame_duration: Duration) -> Self {
        Self {
            engine,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Steps the engine
    /// 3. Returns the deadline for the next frame
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Skip the backlog after a long stall instead of bursting frames
        let max_drift = self.frame_duration * MAX_DRIFT_FRAMES;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        let report = self.engine.step();

        self.next_frame += self.frame_duration;
        let sleep_duration = self.next_frame.saturating_duration_since(now);

        FrameResult {
            report,
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Run forever, sleeping until each frame deadline.
    pub fn run<C, D>(&mut self, mut clock: C, delay: &mut D) -> !
    where
        C: FnMut() -> Instant,
        D: DelayNs,
    {
        loop {
            let result = self.tick(clock());
            let sleep_us = u32::try_from(result.sleep_duration.as_micros()).unwrap_or(u32::MAX);
            if sleep_us > 0 {
                delay.delay_us(sleep_us);
            }
        }
    }

    /// Get a reference to the engine.
    pub fn engine(&self) -> &SwordEngine<S, A, O, N> {
        &self.engine
    }

    /// Get a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut SwordEngine<S, A, O, N> {
        &mut self.engine
    }
}
