use embedded_hal::delay::DelayNs;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::audio::{AudioPlayer, CueTrigger};
use crate::bar::{BarState, CueRequest};
use crate::color::{BLACK, Rgb};
use crate::config::SwordConfig;
use crate::renderer::Renderer;
use crate::sensor::{Selection, SensorInputs, SensorSampler};

/// Observable outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Target selected by the sensors
    pub selection: Selection,
    /// Position the bar was rendered at
    pub pos16: u16,
    pub length: u8,
    pub hue: u8,
    /// Global brightness shipped with the frame
    pub brightness: u8,
    /// Cue requested on this frame, if any
    pub cue: Option<CueRequest>,
    /// Whether the strip accepted the frame
    pub shipped: bool,
}

/// Sword engine - binds sensors, bar state, renderer, audio and strip
///
/// One call to [`SwordEngine::step`] is one frame:
/// sample, update, render, ship, advance.
pub struct SwordEngine<S, A, O, const N: usize> {
    // External dependencies and configuration
    config: SwordConfig,
    sampler: SensorSampler<S>,
    cue: CueTrigger<A>,
    output: O,

    // Internal state
    bar: BarState<N>,
    renderer: Renderer<N>,
    frames: u32,
}

impl<S, A, O, const N: usize> SwordEngine<S, A, O, N>
where
    S: SensorInputs,
    A: AudioPlayer,
    O: OutputDriver,
{
    /// Create the engine and run the startup sequence
    ///
    /// Sets up the audio player and ships a dark frame so the strip starts
    /// from a known state.
    pub fn new(config: SwordConfig, inputs: S, player: A, output: O) -> Self {
        debug_assert!(config.validate::<N>().is_ok());
        #[cfg(feature = "esp32-log")]
        println!(
            "[SwordEngine] {} {} ({} pixels)",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            N
        );

        let mut engine = Self {
            config,
            sampler: SensorSampler::new(inputs),
            cue: CueTrigger::new(player),
            output,
            bar: BarState::new(),
            renderer: Renderer::new(),
            frames: 0,
        };
        engine.cue.init(&engine.config);
        let _ = engine
            .output
            .write(&[BLACK; N], engine.config.startup_brightness);
        engine
    }

    /// Process one frame
    pub fn step(&mut self) -> FrameReport {
        let selection = self.sampler.sample();

        let cue = self.bar.update(selection, &self.config);
        if let Some(request) = cue {
            #[cfg(feature = "esp32-log")]
            println!("[SwordEngine.step] target {:?} acquired", selection.index());
            self.cue.request_cue(request.track);
        }

        let frame = self.renderer.render(&self.bar);
        let shipped = self.output.write(frame, self.bar.brightness()).is_ok();
        #[cfg(feature = "esp32-log")]
        {
            if !shipped {
                println!("[SwordEngine.step] strip write failed");
            }
        }

        let report = FrameReport {
            selection,
            pos16: self.bar.pos16(),
            length: self.bar.length(),
            hue: self.bar.hue(),
            brightness: self.bar.brightness(),
            cue,
            shipped,
        };

        self.bar.advance(self.config.delta16);
        self.frames = self.frames.wrapping_add(1);

        report
    }

    /// Run forever with a fixed delay after each frame
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> ! {
        let period_us = u32::try_from(self.config.frame_duration.as_micros()).unwrap_or(u32::MAX);
        loop {
            self.step();
            delay.delay_us(period_us);
        }
    }

    pub fn config(&self) -> &SwordConfig {
        &self.config
    }

    pub fn bar(&self) -> &BarState<N> {
        &self.bar
    }

    /// Last frame handed to the output driver, before brightness
    pub fn frame(&self) -> &[Rgb] {
        self.renderer.frame()
    }

    /// Number of frames processed
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    pub fn inputs(&self) -> &S {
        self.sampler.inputs()
    }

    pub fn inputs_mut(&mut self) -> &mut S {
        self.sampler.inputs_mut()
    }

    pub fn cue_trigger(&self) -> &CueTrigger<A> {
        &self.cue
    }

    pub fn cue_trigger_mut(&mut self) -> &mut CueTrigger<A> {
        &mut self.cue
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
