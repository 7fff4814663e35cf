#![no_std]

pub mod audio;
pub mod bar;
pub mod color;
pub mod config;
pub mod engine;
pub mod frame_scheduler;
pub mod output;
pub mod renderer;
pub mod sensor;

pub use audio::{AudioPlayer, CueTrigger};
pub use bar::{BarState, CueRequest, fade};
pub use config::{ConfigError, SwordConfig, Target};
pub use engine::{FrameReport, SwordEngine};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use output::StripWriter;
pub use renderer::{Renderer, bar_levels, draw_light_bar};
pub use sensor::{PinSensors, Selection, SensorInputs, SensorSampler};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip driver trait
///
/// Implement this trait to support different hardware platforms.
/// The driver presents the pixels scaled by the global brightness.
pub trait OutputDriver {
    type Error;

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb], brightness: u8) -> Result<(), Self::Error>;
}
