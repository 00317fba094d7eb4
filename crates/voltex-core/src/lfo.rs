//! Low Frequency Oscillator for modulation effects.
//!
//! Unlike a free-running Hz oscillator, this LFO counts whole frames over a
//! period given in samples, so a chain driven by beat lengths stays locked
//! to the song position and two blocks of any size produce the same curve.
//!
//! Output is unipolar `[0, 1]`:
//!
//! - **Sine**: `(sin(2π·phase) + 1) / 2`
//! - **Triangle**: `|2·phase − 1|` (starts at the top, reaches 0 mid-cycle)

use core::f32::consts::TAU;
use libm::sinf;

/// LFO waveform type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LfoWaveform {
    /// Smooth sine.
    #[default]
    Sine,
    /// Linear ramps down then up.
    Triangle,
}

/// Frame-counting low frequency oscillator.
///
/// # Example
///
/// ```rust
/// use voltex_core::{Lfo, LfoWaveform};
///
/// let mut lfo = Lfo::new(4, LfoWaveform::Triangle);
/// let values: Vec<f32> = (0..4).map(|_| lfo.next()).collect();
/// assert_eq!(values, [1.0, 0.5, 0.0, 0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    position: usize,
    period: usize,
    waveform: LfoWaveform,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(0, LfoWaveform::Sine)
    }
}

impl Lfo {
    /// Creates an LFO with a period in frames. Period 0 holds phase 0.
    pub fn new(period: usize, waveform: LfoWaveform) -> Self {
        Self {
            position: 0,
            period,
            waveform,
        }
    }

    /// Sets the period in frames, keeping the position wrapped into it.
    pub fn set_period(&mut self, period: usize) {
        self.period = period;
        if period == 0 {
            self.position = 0;
        } else {
            self.position %= period;
        }
    }

    /// Period in frames.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Set waveform.
    pub fn set_waveform(&mut self, waveform: LfoWaveform) {
        self.waveform = waveform;
    }

    /// Current waveform.
    pub fn waveform(&self) -> LfoWaveform {
        self.waveform
    }

    /// Frames elapsed within the current cycle.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Phase in `[0, 1)`.
    #[inline]
    pub fn phase(&self) -> f32 {
        if self.period == 0 {
            0.0
        } else {
            self.position as f32 / self.period as f32
        }
    }

    /// Value at the current position without advancing.
    #[inline]
    pub fn value(&self) -> f32 {
        let phase = self.phase();
        match self.waveform {
            LfoWaveform::Sine => (sinf(TAU * phase) + 1.0) * 0.5,
            LfoWaveform::Triangle => (2.0 * phase - 1.0).abs(),
        }
    }

    /// Advances one frame.
    #[inline]
    pub fn advance(&mut self) {
        if self.period == 0 {
            return;
        }
        self.position += 1;
        if self.position >= self.period {
            self.position = 0;
        }
    }

    /// Returns the current value, then advances one frame.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let value = self.value();
        self.advance();
        value
    }

    /// Rewind to phase 0.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}
