//! Scheduled sidechain ducking.
//!
//! Every `length` frames the level dips to `gain` and recovers, the
//! "pumping" of a kick-keyed compressor without a key input. One cycle:
//!
//! ```text
//! r < A:   g = lerp(1, gain, r / A)                    linear dip
//! r >= A:  g = gain + (1 − gain) · x²,  x = (r − A) / (1 − A)
//! ```
//!
//! with `r` the normalized position in the cycle and `A` =
//! [`ATTACK_FRACTION`]. The squared recovery stays low for most of the
//! cycle and snaps back just before the next dip.

use voltex_core::{Effect, ParamDescriptor, ParameterInfo, lerp};

/// Share of the cycle spent dipping to `gain`.
pub const ATTACK_FRACTION: f32 = 1.0 / 16.0;
/// Default ducked level.
pub const DEFAULT_GAIN: f32 = 0.5;

/// Periodic gain ducker.
///
/// Gain 1 or length 0 leave the input untouched.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Gain | 0.0–1.0 | 0.5 |
///
/// # Example
///
/// ```rust
/// use voltex_effects::Sidechain;
///
/// let mut sidechain = Sidechain::new();
/// sidechain.set_length(1600);
/// assert_eq!(sidechain.gain_at(0), 1.0);
/// assert_eq!(sidechain.gain_at(100), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Sidechain {
    length: usize,
    time: usize,
    gain: f32,
}

impl Sidechain {
    /// Creates a bypassed sidechain (length 0).
    pub fn new() -> Self {
        Self {
            length: 0,
            time: 0,
            gain: DEFAULT_GAIN,
        }
    }

    /// Set the cycle length in frames and restart the cycle.
    pub fn set_length(&mut self, length: usize) {
        self.length = length;
        self.time = 0;
    }

    /// Cycle length in frames.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Set the ducked level, clamped to `[0, 1]`.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    /// Ducked level.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Start a new dip on the next frame.
    pub fn trigger(&mut self) {
        self.time = 0;
    }

    /// Position within the current cycle.
    pub fn position(&self) -> usize {
        self.time
    }

    /// Gain at `pos` frames into a cycle (taken modulo length).
    pub fn gain_at(&self, pos: usize) -> f32 {
        if self.length == 0 {
            return 1.0;
        }
        let r = (pos % self.length) as f32 / self.length as f32;
        if r < ATTACK_FRACTION {
            lerp(1.0, self.gain, r / ATTACK_FRACTION)
        } else {
            let x = (r - ATTACK_FRACTION) / (1.0 - ATTACK_FRACTION);
            self.gain + (1.0 - self.gain) * x * x
        }
    }
}

impl Default for Sidechain {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Sidechain {
    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        if self.length == 0 {
            return (left, right);
        }
        let g = self.gain_at(self.time);
        self.time += 1;
        if self.time >= self.length {
            self.time = 0;
        }
        (left * g, right * g)
    }

    fn reset(&mut self) {
        self.time = 0;
    }
}

impl ParameterInfo for Sidechain {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::ratio("Gain", "Gain", DEFAULT_GAIN)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.gain,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.set_gain(value);
        }
    }
}
