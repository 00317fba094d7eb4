//! Sample-and-hold bitcrusher.
//!
//! Holds each latched frame for `period` frames, a zero-order hold that
//! lowers the effective sample rate to `sample_rate / period` and folds
//! high frequencies back as aliasing.
//!
//! The hold counter is fractional: a new frame is latched whenever the
//! counter reaches `period`, and the remainder carries over. Integer
//! periods hold exactly `period` frames; a period of 2.5 alternates holds of
//! 3 and 2 frames.

use voltex_core::{Effect, ParamDescriptor, ParameterInfo};

/// Largest accepted period in frames.
pub const MAX_PERIOD: f32 = 4096.0;

/// Sample-and-hold downsampler.
///
/// A period below 1 disables the effect.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Period | 0.0–4096.0 frames | 0.0 (off) |
#[derive(Debug, Clone, Default)]
pub struct BitCrusher {
    period: f32,
    counter: f32,
    held: (f32, f32),
}

impl BitCrusher {
    /// Creates a disabled bitcrusher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hold period in frames; values below 1 bypass the effect.
    pub fn set_period(&mut self, period: f32) {
        let was_enabled = self.is_enabled();
        self.period = period.clamp(0.0, MAX_PERIOD);
        if !was_enabled || self.counter > self.period {
            // Latch on the next frame.
            self.counter = self.period;
        }
    }

    /// Hold period in frames.
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Returns `true` when `period >= 1`.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.period >= 1.0
    }
}

impl Effect for BitCrusher {
    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        if !self.is_enabled() {
            return (left, right);
        }
        if self.counter >= self.period {
            self.held = (left, right);
            self.counter -= self.period;
            if self.counter >= self.period {
                self.counter = 0.0;
            }
        }
        self.counter += 1.0;
        self.held
    }

    fn reset(&mut self) {
        self.counter = self.period;
        self.held = (0.0, 0.0);
    }
}

impl ParameterInfo for BitCrusher {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::samples("Period", "Period", MAX_PERIOD, 0.0).with_step(0.5)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.period,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.set_period(value);
        }
    }
}
