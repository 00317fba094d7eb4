//! Flanger: a short, LFO-swept delay mixed with the dry signal.
//!
//! The delay time moves between `min_delay` and `max_delay` frames
//! following a triangle LFO (`|2·phase − 1|`), so the comb-filter notches
//! sweep linearly up and down. Reads use linear interpolation between
//! frames; below one frame of delay the read blends the current input with
//! the previous frame, so a `min_delay` of 0 reaches the dry signal.
//! Feedback recirculates the delayed signal into the line.

use voltex_core::{
    Effect, Lfo, LfoWaveform, ParamDescriptor, ParameterInfo, RingBuffer, seconds_to_samples,
    wet_dry_mix_stereo,
};

/// Largest period accepted through [`ParameterInfo`], in frames.
pub const MAX_PERIOD: f32 = 960_000.0;

const DEFAULT_MIX: f32 = 0.5;
const MAX_FEEDBACK: f32 = 0.95;

/// Extra frames kept past `max_delay` for the interpolation neighbour.
const GUARD_FRAMES: usize = 2;

/// Triangle-swept flanger.
///
/// A `max_delay` of 0 bypasses the effect.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Mix | 0.0–1.0 | 0.5 |
/// | 1 | Feedback | 0.0–0.95 | 0.0 |
/// | 2 | Period | 0–960000 frames | 1 s |
///
/// The delay range sizes the line and is set through
/// [`set_delay_range`](Self::set_delay_range) only.
///
/// # Example
///
/// ```rust
/// use voltex_core::Effect;
/// use voltex_effects::Flanger;
///
/// let mut flanger = Flanger::new(48000.0);
/// flanger.set_delay_range(48.0, 240.0);
///
/// let mut block = [0.25; 128];
/// flanger.process(&mut block, 64);
/// assert!(flanger.delay() >= 48.0 && flanger.delay() <= 240.0);
/// ```
#[derive(Debug, Clone)]
pub struct Flanger {
    ring: RingBuffer,
    lfo: Lfo,
    min_delay: f32,
    max_delay: f32,
    delay: f32,
    mix: f32,
    feedback: f32,
}

impl Flanger {
    /// Creates a flanger sweeping 1–5 ms over one second.
    pub fn new(sample_rate: f32) -> Self {
        let mut flanger = Self {
            ring: RingBuffer::default(),
            lfo: Lfo::new(seconds_to_samples(1.0, sample_rate), LfoWaveform::Triangle),
            min_delay: 0.0,
            max_delay: 0.0,
            delay: 0.0,
            mix: DEFAULT_MIX,
            feedback: 0.0,
        };
        flanger.set_delay_range(
            seconds_to_samples(0.001, sample_rate) as f32,
            seconds_to_samples(0.005, sample_rate) as f32,
        );
        flanger
    }

    /// Set the sweep range in frames and clear the line.
    ///
    /// Allocates only when the line grows.
    pub fn set_delay_range(&mut self, min: f32, max: f32) {
        let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        let min = if min.is_finite() { min.clamp(0.0, max) } else { 0.0 };
        self.min_delay = min;
        self.max_delay = max;
        self.delay = max;
        let len = if max > 0.0 {
            libm::ceilf(max) as usize + GUARD_FRAMES
        } else {
            0
        };
        self.ring.resize(len);
    }

    /// Sweep range in frames.
    pub fn delay_range(&self) -> (f32, f32) {
        (self.min_delay, self.max_delay)
    }

    /// Delay used for the most recent frame.
    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Set the sweep period in frames.
    pub fn set_period(&mut self, period: usize) {
        self.lfo.set_period(period);
    }

    /// Sweep period in frames.
    pub fn period(&self) -> usize {
        self.lfo.period()
    }

    /// Set wet/dry mix, clamped to `[0, 1]`.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Wet/dry mix.
    pub fn mix(&self) -> f32 {
        self.mix
    }

    /// Set feedback, clamped to `[0, 0.95]`.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, MAX_FEEDBACK);
    }

    /// Feedback amount.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }
}

impl Default for Flanger {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Effect for Flanger {
    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        if self.ring.is_empty() {
            return (left, right);
        }

        let sweep = self.lfo.next();
        self.delay = self.min_delay + (self.max_delay - self.min_delay) * sweep;

        // read_delayed(0) is the frame pushed one frame ago.
        let (wet_l, wet_r) = if self.delay < 1.0 {
            let (prev_l, prev_r) = self.ring.read_delayed(0.0);
            (
                left + (prev_l - left) * self.delay,
                right + (prev_r - right) * self.delay,
            )
        } else {
            self.ring.read_delayed(self.delay - 1.0)
        };
        self.ring
            .push((left + wet_l * self.feedback, right + wet_r * self.feedback));

        wet_dry_mix_stereo(left, right, wet_l, wet_r, self.mix)
    }

    fn reset(&mut self) {
        self.ring.clear();
        self.lfo.reset();
    }
}

impl ParameterInfo for Flanger {
    fn param_count(&self) -> usize {
        3
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::mix(DEFAULT_MIX)),
            1 => Some(ParamDescriptor::custom("Feedback", "Fdbk", 0.0, MAX_FEEDBACK, 0.0)),
            2 => Some(ParamDescriptor::samples("Period", "Period", MAX_PERIOD, 48000.0)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.mix,
            1 => self.feedback,
            2 => self.lfo.period() as f32,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_mix(value),
            1 => self.set_feedback(value),
            2 => {
                let period = libm::roundf(value.clamp(0.0, MAX_PERIOD)) as usize;
                if period != self.lfo.period() {
                    self.set_period(period);
                }
            }
            _ => {}
        }
    }
}
