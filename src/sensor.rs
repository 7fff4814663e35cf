//! Six-way target selector
//!
//! Sensors are plain discrete inputs sampled once per frame. There is no
//! debouncing: the frame cadence is the sampling rate.

use embedded_hal::digital::InputPin;

/// Discrete inputs, one per target
pub trait SensorInputs {
    /// Number of inputs
    fn count(&self) -> usize;

    /// Returns `true` if the input at `index` is asserted
    fn is_asserted(&mut self, index: usize) -> bool;
}

/// Active-low sensors on `embedded-hal` input pins
///
/// Pins are expected to be configured as inputs with pull-up, so an
/// unconnected line reads deasserted. A failed read counts as deasserted.
pub struct PinSensors<P, const N: usize> {
    pins: [P; N],
}

impl<P: InputPin, const N: usize> PinSensors<P, N> {
    pub const fn new(pins: [P; N]) -> Self {
        Self { pins }
    }
}

impl<P: InputPin, const N: usize> SensorInputs for PinSensors<P, N> {
    fn count(&self) -> usize {
        N
    }

    fn is_asserted(&mut self, index: usize) -> bool {
        self.pins
            .get_mut(index)
            .is_some_and(|pin| pin.is_low().unwrap_or(false))
    }
}

/// Inputs held in memory, `true` meaning asserted
impl<const N: usize> SensorInputs for [bool; N] {
    fn count(&self) -> usize {
        N
    }

    fn is_asserted(&mut self, index: usize) -> bool {
        self.get(index).copied().unwrap_or(false)
    }
}

/// Result of one sampling pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<usize>);

impl Selection {
    /// No sensor asserted
    pub const NONE: Self = Self(None);

    /// Sensor `index` selected
    pub const fn target(index: usize) -> Self {
        Self(Some(index))
    }

    /// Whether any sensor was asserted
    pub const fn is_active(self) -> bool {
        self.0.is_some()
    }

    /// Index of the selected target
    pub const fn index(self) -> Option<usize> {
        self.0
    }
}

/// Samples the sensors and picks the active target
pub struct SensorSampler<S> {
    inputs: S,
}

impl<S: SensorInputs> SensorSampler<S> {
    pub const fn new(inputs: S) -> Self {
        Self { inputs }
    }

    /// Read every input in order
    ///
    /// When several sensors assert in the same frame the highest index wins.
    pub fn sample(&mut self) -> Selection {
        let mut selected = None;
        for index in 0..self.inputs.count() {
            if self.inputs.is_asserted(index) {
                selected = Some(index);
            }
        }
        Selection(selected)
    }

    pub fn inputs(&self) -> &S {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut S {
        &mut self.inputs
    }
}
