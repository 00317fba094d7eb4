//! Six-stage stereo phaser.
//!
//! Each channel runs through a cascade of first-order all-pass stages
//! whose shared corner frequency is swept by a sine LFO. Mixing the
//! phase-shifted signal back with the dry input produces notches that move
//! with the sweep. The last stage output is fed back into the cascade input.
//!
//! Per frame:
//!
//! ```text
//! d  = (min_freq + (max_freq − min_freq) · lfo) / (sample_rate / 2)
//! a1 = (1 − d) / (1 + d)
//! y  = allpass⁶(in + feedback · y_prev)
//! out = in · (1 − depth/2) + y · depth/2
//! ```

use voltex_core::{
    Effect, Lfo, LfoWaveform, ParamDescriptor, ParameterInfo, flush_denormal, seconds_to_samples,
};

/// All-pass stages per channel.
pub const STAGES: usize = 6;

/// Largest period accepted through [`ParameterInfo`], in frames.
pub const MAX_PERIOD: f32 = 960_000.0;

const DEFAULT_MIN_FREQ: f32 = 1000.0;
const DEFAULT_MAX_FREQ: f32 = 4000.0;
const DEFAULT_FEEDBACK: f32 = 0.2;
const MAX_FEEDBACK: f32 = 0.95;

/// First-order all-pass section.
///
/// ```text
/// out = −a1 · in + za
/// za  = in + a1 · out
/// ```
///
/// Unity magnitude at every frequency for `|a1| < 1`; only the phase
/// changes, reaching −90° at the corner frequency.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllpassStage {
    a1: f32,
    za: f32,
}

impl AllpassStage {
    /// Creates a stage with `a1 = 0` (one-frame delay).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the coefficient directly.
    #[inline]
    pub fn set_coefficient(&mut self, a1: f32) {
        self.a1 = a1;
    }

    /// Current coefficient.
    pub fn coefficient(&self) -> f32 {
        self.a1
    }

    /// Coefficient for a corner at `freq` Hz.
    #[inline]
    pub fn coefficient_for(freq: f32, sample_rate: f32) -> f32 {
        let d = freq / (sample_rate * 0.5);
        (1.0 - d) / (1.0 + d)
    }

    /// Processes one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = -self.a1 * input + self.za;
        self.za = flush_denormal(input + self.a1 * output);
        output
    }

    /// Clears the state.
    pub fn clear(&mut self) {
        self.za = 0.0;
    }
}

/// Phaser with sine-swept all-pass cascade and feedback.
///
/// Depth 0 leaves the input unchanged.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Min Freq | 20.0–20000.0 Hz | 1000.0 |
/// | 1 | Max Freq | 20.0–20000.0 Hz | 4000.0 |
/// | 2 | Feedback | 0.0–0.95 | 0.2 |
/// | 3 | Depth | 0.0–1.0 | 1.0 |
/// | 4 | Period | 0–960000 frames | 1 s |
///
/// # Example
///
/// ```rust
/// use voltex_core::Effect;
/// use voltex_effects::Phaser;
///
/// let mut phaser = Phaser::new(48000.0);
/// let (l, r) = phaser.process_frame(0.5, 0.5);
/// assert!(l.is_finite() && r.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Phaser {
    stages: [[AllpassStage; STAGES]; 2],
    feedback_state: [f32; 2],
    lfo: Lfo,
    min_freq: f32,
    max_freq: f32,
    feedback: f32,
    depth: f32,
    sample_rate: f32,
}

impl Phaser {
    /// Creates a phaser with a one-second sweep.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            stages: [[AllpassStage::new(); STAGES]; 2],
            feedback_state: [0.0; 2],
            lfo: Lfo::new(seconds_to_samples(1.0, sample_rate), LfoWaveform::Sine),
            min_freq: DEFAULT_MIN_FREQ,
            max_freq: DEFAULT_MAX_FREQ,
            feedback: DEFAULT_FEEDBACK,
            depth: 1.0,
            sample_rate,
        }
    }

    /// Set the sweep period in frames.
    pub fn set_period(&mut self, period: usize) {
        self.lfo.set_period(period);
    }

    /// Sweep period in frames.
    pub fn period(&self) -> usize {
        self.lfo.period()
    }

    /// Set the bottom of the sweep in Hz.
    pub fn set_min_freq(&mut self, freq: f32) {
        self.min_freq = freq.clamp(20.0, 20000.0);
    }

    /// Bottom of the sweep in Hz.
    pub fn min_freq(&self) -> f32 {
        self.min_freq
    }

    /// Set the top of the sweep in Hz.
    pub fn set_max_freq(&mut self, freq: f32) {
        self.max_freq = freq.clamp(20.0, 20000.0);
    }

    /// Top of the sweep in Hz.
    pub fn max_freq(&self) -> f32 {
        self.max_freq
    }

    /// Set feedback, clamped to `[0, 0.95]`.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, MAX_FEEDBACK);
    }

    /// Feedback amount.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Set depth, clamped to `[0, 1]`.
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth.clamp(0.0, 1.0);
    }

    /// Depth.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    #[inline]
    fn process_channel(&mut self, ch: usize, input: f32) -> f32 {
        let mut y = input + self.feedback_state[ch] * self.feedback;
        for stage in &mut self.stages[ch] {
            y = stage.process(y);
        }
        self.feedback_state[ch] = flush_denormal(y);
        input * (1.0 - self.depth * 0.5) + y * self.depth * 0.5
    }
}

impl Default for Phaser {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Effect for Phaser {
    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        let sweep = self.lfo.next();
        let freq = self.min_freq + (self.max_freq - self.min_freq) * sweep;
        let a1 = AllpassStage::coefficient_for(freq, self.sample_rate);
        for stage in self.stages.iter_mut().flatten() {
            stage.set_coefficient(a1);
        }

        let out_l = self.process_channel(0, left);
        let out_r = self.process_channel(1, right);
        (out_l, out_r)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    fn reset(&mut self) {
        for stage in self.stages.iter_mut().flatten() {
            stage.clear();
        }
        self.feedback_state = [0.0; 2];
        self.lfo.reset();
    }
}

impl ParameterInfo for Phaser {
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
            2 => Some(ParamDescriptor::custom(
                "Feedback",
                "Fdbk",
                0.0,
                MAX_FEEDBACK,
                DEFAULT_FEEDBACK,
            )),
            3 => Some(ParamDescriptor::ratio("Depth", "Depth", 1.0)),
            4 => Some(ParamDescriptor::samples("Period", "Period", MAX_PERIOD, 48000.0)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.min_freq,
            1 => self.max_freq,
            2 => self.feedback,
            3 => self.depth,
            4 => self.lfo.period() as f32,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_min_freq(value),
            1 => self.set_max_freq(value),
            2 => self.set_feedback(value),
            3 => self.set_depth(value),
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
