//! Wobble: an LFO-swept low-pass filter.
//!
//! A triangle LFO over `period` frames drives the cutoff of an internal
//! [`BiquadFilter`]. The triangle is squared before mapping to frequency so
//! the sweep spends more time near the bottom, which reads as the familiar
//! "wub":
//!
//! ```text
//! t      = |2·phase − 1|
//! cutoff = min_freq + (max_freq − min_freq) · t²
//! ```
//!
//! Coefficients are recomputed every [`COEFF_UPDATE_INTERVAL`] frames.

use crate::BiquadFilter;
use voltex_core::{
    Effect, Lfo, LfoWaveform, ParamDescriptor, ParamUnit, ParameterInfo, wet_dry_mix_stereo,
};

/// Frames between cutoff updates.
pub const COEFF_UPDATE_INTERVAL: usize = 16;

/// Largest period accepted through [`ParameterInfo`], in frames.
pub const MAX_PERIOD: f32 = 960_000.0;

const DEFAULT_MIN_FREQ: f32 = 500.0;
const DEFAULT_MAX_FREQ: f32 = 20000.0;
const DEFAULT_Q: f32 = 1.414;

/// LFO-modulated low-pass filter.
///
/// Period 0 bypasses the effect.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Min Freq | 20.0–20000.0 Hz | 500.0 |
/// | 1 | Max Freq | 20.0–20000.0 Hz | 20000.0 |
/// | 2 | Q | 0.1–20.0 | 1.414 |
/// | 3 | Mix | 0.0–1.0 | 1.0 |
/// | 4 | Period | 0–960000 frames | 0 |
///
/// # Example
///
/// ```rust
/// use voltex_core::Effect;
/// use voltex_effects::Wobble;
///
/// let mut wobble = Wobble::new(48000.0);
/// wobble.set_period(12000);
///
/// let mut block = [0.5; 256];
/// wobble.process(&mut block, 128);
/// assert!(block.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct Wobble {
    filter: BiquadFilter,
    lfo: Lfo,
    min_freq: f32,
    max_freq: f32,
    q: f32,
    mix: f32,
    update_counter: usize,
}

impl Wobble {
    /// Creates a bypassed wobble (period 0).
    pub fn new(sample_rate: f32) -> Self {
        Self {
            filter: BiquadFilter::new(sample_rate),
            lfo: Lfo::new(0, LfoWaveform::Triangle),
            min_freq: DEFAULT_MIN_FREQ,
            max_freq: DEFAULT_MAX_FREQ,
            q: DEFAULT_Q,
            mix: 1.0,
            update_counter: 0,
        }
    }

    /// Set the LFO period in frames. 0 bypasses the effect.
    pub fn set_period(&mut self, period: usize) {
        self.lfo.set_period(period);
        self.update_counter = 0;
    }

    /// LFO period in frames.
    pub fn period(&self) -> usize {
        self.lfo.period()
    }

    /// Set the bottom of the sweep in Hz.
    pub fn set_min_freq(&mut self, freq: f32) {
        self.min_freq = freq.clamp(20.0, 20000.0);
        self.update_counter = 0;
    }

    /// Bottom of the sweep in Hz.
    pub fn min_freq(&self) -> f32 {
        self.min_freq
    }

    /// Set the top of the sweep in Hz.
    pub fn set_max_freq(&mut self, freq: f32) {
        self.max_freq = freq.clamp(20.0, 20000.0);
        self.update_counter = 0;
    }

    /// Top of the sweep in Hz.
    pub fn max_freq(&self) -> f32 {
        self.max_freq
    }

    /// Set filter resonance.
    pub fn set_q(&mut self, q: f32) {
        self.q = q.clamp(0.1, 20.0);
        self.update_counter = 0;
    }

    /// Filter resonance.
    pub fn q(&self) -> f32 {
        self.q
    }

    /// Set wet/dry mix, clamped to `[0, 1]`.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Wet/dry mix.
    pub fn mix(&self) -> f32 {
        self.mix
    }

    /// Cutoff most recently applied to the filter, in Hz.
    pub fn cutoff(&self) -> f32 {
        self.filter.frequency()
    }

    /// Cutoff the sweep maps LFO value `t` to.
    #[inline]
    pub fn cutoff_for(&self, t: f32) -> f32 {
        self.min_freq + (self.max_freq - self.min_freq) * t * t
    }
}

impl Default for Wobble {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Effect for Wobble {
    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        if self.lfo.period() == 0 {
            return (left, right);
        }

        let t = self.lfo.next();
        if self.update_counter == 0 {
            let cutoff = self.cutoff_for(t);
            self.filter.set_low_pass(self.q, cutoff);
        }
        self.update_counter += 1;
        if self.update_counter >= COEFF_UPDATE_INTERVAL {
            self.update_counter = 0;
        }

        let (wet_l, wet_r) = self.filter.process_frame(left, right);
        wet_dry_mix_stereo(left, right, wet_l, wet_r, self.mix)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.filter.set_sample_rate(sample_rate);
        self.update_counter = 0;
    }

    fn reset(&mut self) {
        self.filter.reset();
        self.lfo.reset();
        self.update_counter = 0;
    }
}

impl ParameterInfo for Wobble {
    fn param_count(&self) -> usize {
        5
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::frequency(
                "Min Freq",
                "MinFreq",
                20.0,
                20000.0,
                DEFAULT_MIN_FREQ,
            )),
            1 => Some(ParamDescriptor::frequency(
                "Max Freq",
                "MaxFreq",
                20.0,
                20000.0,
                DEFAULT_MAX_FREQ,
            )),
            2 => Some(
                ParamDescriptor::custom("Q", "Q", 0.1, 20.0, DEFAULT_Q).with_unit(ParamUnit::Ratio),
            ),
            3 => Some(ParamDescriptor::mix(1.0)),
            4 => Some(ParamDescriptor::samples("Period", "Period", MAX_PERIOD, 0.0)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.min_freq,
            1 => self.max_freq,
            2 => self.q,
            3 => self.mix,
            4 => self.lfo.period() as f32,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_min_freq(value),
            1 => self.set_max_freq(value),
            2 => self.set_q(value),
            3 => self.set_mix(value),
            4 => {
                let period = libm::roundf(value.clamp(0.0, MAX_PERIOD)) as usize;
                if period != self.lfo.period() {
                    self.set_period(period);
                }
            }
            _ => {}
        }
    }
}
