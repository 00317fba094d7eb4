//! Stereo biquad filter effect.
//!
//! Wraps two [`Biquad`]s (one per channel) and derives their coefficients
//! from one of four cookbook designs. Switching design or moving a parameter
//! only replaces coefficients; the per-channel history is kept, so the
//! filter state stays continuous across changes.

use voltex_core::{
    Biquad, Effect, ParamDescriptor, ParamUnit, ParameterInfo, bandpass_coefficients_bw,
    highpass_coefficients, lowpass_coefficients, peaking_coefficients_bw,
};

/// Active coefficient design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Identity coefficients, `y[n] = x[n]`.
    #[default]
    Identity,
    /// Peaking EQ (bandwidth in octaves, gain in dB).
    Peaking,
    /// Low-pass (Q).
    LowPass,
    /// High-pass (Q).
    HighPass,
    /// Band-pass with 0 dB peak (bandwidth in octaves).
    BandPass,
}

/// Stereo biquad filter.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Frequency | 10.0–22000.0 Hz | 1000.0 |
/// | 1 | Q | 0.1–20.0 | 0.707 |
/// | 2 | Bandwidth | 0.05–8.0 oct | 1.0 |
/// | 3 | Gain | −48.0–48.0 dB | 0.0 |
///
/// Parameter writes re-derive coefficients in the active [`FilterMode`].
/// Frequencies are clamped to `[10 Hz, 0.49 · sample_rate]` when the
/// coefficients are computed.
///
/// # Example
///
/// ```rust
/// use voltex_core::Effect;
/// use voltex_effects::BiquadFilter;
///
/// let mut filter = BiquadFilter::new(48000.0);
/// filter.set_low_pass(0.707, 2000.0);
///
/// let mut block = [0.5, 0.5, 0.25, 0.25];
/// filter.process(&mut block, 2);
/// ```
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    biquads: [Biquad; 2],
    mode: FilterMode,
    frequency: f32,
    q: f32,
    bandwidth: f32,
    gain_db: f32,
    sample_rate: f32,
}

impl BiquadFilter {
    /// Creates a filter with identity coefficients.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            biquads: [Biquad::new(), Biquad::new()],
            mode: FilterMode::Identity,
            frequency: 1000.0,
            q: 0.707,
            bandwidth: 1.0,
            gain_db: 0.0,
            sample_rate,
        }
    }

    /// Peaking EQ around `freq` with `bandwidth` octaves and `gain` dB.
    pub fn set_peaking(&mut self, bandwidth: f32, freq: f32, gain: f32) {
        self.mode = FilterMode::Peaking;
        self.bandwidth = bandwidth;
        self.frequency = freq;
        self.gain_db = gain;
        self.update_coefficients();
    }

    /// Low-pass at `freq` with resonance `q`.
    pub fn set_low_pass(&mut self, q: f32, freq: f32) {
        self.mode = FilterMode::LowPass;
        self.q = q;
        self.frequency = freq;
        self.update_coefficients();
    }

    /// High-pass at `freq` with resonance `q`.
    pub fn set_high_pass(&mut self, q: f32, freq: f32) {
        self.mode = FilterMode::HighPass;
        self.q = q;
        self.frequency = freq;
        self.update_coefficients();
    }

    /// Band-pass around `freq` with `bandwidth` octaves.
    pub fn set_band_pass(&mut self, bandwidth: f32, freq: f32) {
        self.mode = FilterMode::BandPass;
        self.bandwidth = bandwidth;
        self.frequency = freq;
        self.update_coefficients();
    }

    /// Back to identity coefficients.
    pub fn set_identity(&mut self) {
        self.mode = FilterMode::Identity;
        self.update_coefficients();
    }

    /// Active design.
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Center or cutoff frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Left-channel biquad, for coefficient inspection.
    pub fn biquad(&self) -> &Biquad {
        &self.biquads[0]
    }

    fn update_coefficients(&mut self) {
        let freq = self.frequency.clamp(10.0, self.sample_rate * 0.49);
        let q = self.q.max(1e-3);
        let bandwidth = self.bandwidth.max(1e-3);
        let sr = self.sample_rate;

        let coeffs = match self.mode {
            FilterMode::Identity => (1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
            FilterMode::Peaking => peaking_coefficients_bw(freq, bandwidth, self.gain_db, sr),
            FilterMode::LowPass => lowpass_coefficients(freq, q, sr),
            FilterMode::HighPass => highpass_coefficients(freq, q, sr),
            FilterMode::BandPass => bandpass_coefficients_bw(freq, bandwidth, sr),
        };
        for biquad in &mut self.biquads {
            biquad.set(coeffs);
        }
    }
}

impl Default for BiquadFilter {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Effect for BiquadFilter {
    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        (self.biquads[0].process(left), self.biquads[1].process(right))
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }

    fn reset(&mut self) {
        for biquad in &mut self.biquads {
            biquad.clear();
        }
    }
}

impl ParameterInfo for BiquadFilter {
    fn param_count(&self) -> usize {
        4
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::frequency(
                "Frequency",
                "Freq",
                10.0,
                22000.0,
                1000.0,
            )),
            1 => Some(ParamDescriptor::custom("Q", "Q", 0.1, 20.0, 0.707)),
            2 => Some(ParamDescriptor {
                name: "Bandwidth",
                short_name: "BW",
                unit: ParamUnit::None,
                min: 0.05,
                max: 8.0,
                default: 1.0,
                step: 0.05,
            }),
            3 => Some(ParamDescriptor::gain_db("Gain", "Gain", -48.0, 48.0, 0.0)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.frequency,
            1 => self.q,
            2 => self.bandwidth,
            3 => self.gain_db,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.frequency = value.clamp(10.0, 22000.0),
            1 => self.q = value.clamp(0.1, 20.0),
            2 => self.bandwidth = value.clamp(0.05, 8.0),
            3 => self.gain_db = value.clamp(-48.0, 48.0),
            _ => return,
        }
        self.update_coefficients();
    }
}
