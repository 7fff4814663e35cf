//! Desktop preview app for the slipring sword
//!
//! Simulates the blade over the six targets: toggles stand in for the
//! sensors, the strip is drawn as a ring, and audio cues are counted.

use std::convert::Infallible;
use std::time::Instant as StdInstant;

use eframe::egui::{self};
use slipring_sword::config::{NUM_TARGETS, SENSOR_PINS, STRIP_LEN, TARGETS};
use slipring_sword::{
    AudioPlayer, FrameScheduler, Hsv, Instant, OutputDriver, Rgb, SwordConfig, SwordEngine,
    color::hsv2rgb,
};

/// Radius of each LED circle in pixels
const LED_RADIUS: f32 = 14.0;

/// Radius of the ring the LEDs sit on
const RING_RADIUS: f32 = 120.0;

/// Frames processed per UI update before the backlog is dropped
const MAX_CATCH_UP_FRAMES: u32 = 100;

/// How long the cue indicator stays lit
const CUE_FLASH_MS: u64 = 300;

/// Audio player that only counts requests
#[derive(Default)]
struct PreviewPlayer {
    volume: u8,
    plays: u32,
}

impl AudioPlayer for PreviewPlayer {
    type Error = Infallible;

    fn configure(&mut self, volume: u8) -> Result<(), Self::Error> {
        self.volume = volume;
        Ok(())
    }

    fn set_synchronous(&mut self, _synchronous: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn play_track(&mut self, _track: u16) -> Result<(), Self::Error> {
        self.plays += 1;
        Ok(())
    }
}

/// Strip that keeps the last frame with brightness applied
struct PreviewStrip {
    shown: [Rgb; STRIP_LEN],
    brightness: u8,
}

impl OutputDriver for PreviewStrip {
    type Error = Infallible;

    fn write(&mut self, colors: &[Rgb], brightness: u8) -> Result<(), Self::Error> {
        self.brightness = brightness;
        for (shown, color) in self.shown.iter_mut().zip(colors) {
            *shown = Rgb {
                r: scale(color.r, brightness),
                g: scale(color.g, brightness),
                b: scale(color.b, brightness),
            };
        }
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn scale(value: u8, brightness: u8) -> u8 {
    ((u16::from(value) * (u16::from(brightness) + 1)) >> 8) as u8
}

type PreviewScheduler =
    FrameScheduler<[bool; NUM_TARGETS], PreviewPlayer, PreviewStrip, STRIP_LEN>;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 560.0])
            .with_title("Slipring Sword Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "slipring-sword-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    /// Engine driven at the configured frame rate
    scheduler: PreviewScheduler,
    /// Deadline of the next frame in synthetic time
    next_frame_ms: u64,
    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether animation is playing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Synthetic time of the last cue
    last_cue_ms: Option<u64>,
}

impl PreviewApp {
    fn new() -> Self {
        let engine = SwordEngine::new(
            SwordConfig::DEFAULT,
            [false; NUM_TARGETS],
            PreviewPlayer::default(),
            PreviewStrip {
                shown: [Rgb::default(); STRIP_LEN],
                brightness: 0,
            },
        );

        Self {
            scheduler: FrameScheduler::new(engine),
            next_frame_ms: 0,
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            last_cue_ms: None,
        }
    }

    /// Point the blade at `target`, or away from all targets
    fn point_at(&mut self, target: Option<usize>) {
        let inputs = self.scheduler.engine_mut().inputs_mut();
        *inputs = [false; NUM_TARGETS];
        if let Some(index) = target {
            inputs[index] = true;
        }
    }

    /// Toggle playing state
    fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            let delta_ms_f64 = if delta_ms_f64.is_finite() {
                #[allow(clippy::cast_precision_loss)]
                delta_ms_f64.clamp(0.0, u64::MAX as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = delta_ms_f64 as u64;
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
    }

    /// Run every frame that is due in synthetic time
    fn run_frames(&mut self) {
        let mut frames = 0;
        while self.next_frame_ms <= self.t_ms {
            if frames == MAX_CATCH_UP_FRAMES {
                self.next_frame_ms = self.t_ms;
            }
            let result = self.scheduler.tick(Instant::from_millis(self.next_frame_ms));
            if result.report.cue.is_some() {
                self.last_cue_ms = Some(self.next_frame_ms);
            }
            self.next_frame_ms = result.next_deadline.as_millis();
            frames += 1;
        }
    }
}

fn target_color(index: usize) -> egui::Color32 {
    let rgb = hsv2rgb(Hsv {
        hue: TARGETS[index].hue,
        sat: 255,
        val: 255,
    });
    egui::Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.run_frames();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            // <PlaybackControls>
            ui.horizontal(|ui| {
                if ui
                    .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                    .clicked()
                {
                    self.toggle_playing();
                }

                ui.add_space(8.0);

                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));
            });
            // </PlaybackControls>

            ui.add_space(8.0);

            // <TargetSelector>
            let engine = self.scheduler.engine();
            let selected = engine.inputs().iter().position(|asserted| *asserted);
            let mut pointed = selected;
            ui.horizontal(|ui| {
                ui.label("Blade over:");
                ui.selectable_value(&mut pointed, None, "nothing");
                for index in 0..NUM_TARGETS {
                    let pin = SENSOR_PINS[index];
                    let text = egui::RichText::new(format!("target {index} (pin {pin})"))
                        .color(target_color(index));
                    ui.selectable_value(&mut pointed, Some(index), text);
                }
            });
            // </TargetSelector>

            ui.add_space(8.0);

            let bar = *engine.bar();
            let plays = engine.cue_trigger().player().plays;
            let volume = engine.cue_trigger().player().volume;
            let shown = engine.output().shown;
            let cue_lit = self
                .last_cue_ms
                .is_some_and(|at| self.t_ms.saturating_sub(at) < CUE_FLASH_MS);

            ui.horizontal(|ui| {
                ui.label(format!("pos16: {:3}", bar.pos16()));
                ui.add_space(8.0);
                ui.label(format!("brightness: {:3}", bar.brightness()));
                ui.add_space(8.0);
                let cue_text = egui::RichText::new(format!("♪ cues: {plays} (vol {volume})"));
                ui.label(if cue_lit { cue_text.strong() } else { cue_text });
            });

            ui.add_space(16.0);

            // === LED Ring ===
            let size = 2.0 * (RING_RADIUS + LED_RADIUS) + 8.0;
            let (response, painter) =
                ui.allocate_painter(egui::vec2(size, size), egui::Sense::hover());
            let center = response.rect.center();

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in shown.iter().enumerate() {
                let angle = std::f32::consts::TAU * i as f32 / STRIP_LEN as f32
                    - std::f32::consts::FRAC_PI_2;
                let position = center + RING_RADIUS * egui::vec2(angle.cos(), angle.sin());
                let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                painter.circle_filled(position, LED_RADIUS, color);
                painter.circle_stroke(
                    position,
                    LED_RADIUS,
                    egui::Stroke::new(1.0, egui::Color32::from_gray(60)),
                );
            }

            if pointed != selected {
                self.point_at(pointed);
            }
        });
    }
}
