//! Biquad (bi-quadratic) filter structure.
//!
//! Provides a generic second-order IIR filter plus the RBJ Audio EQ
//! Cookbook coefficient formulas used by the filter and wobble effects.
//!
//! Band-pass and peaking designs take their width in octaves; the
//! corresponding alpha is
//!
//! ```text
//! alpha = sin(w0) * sinh(ln(2)/2 * bw * w0 / sin(w0))
//! ```

use core::f32::consts::{LN_2, PI};
use libm::{cosf, powf, sinf, sinhf};

/// Raw cookbook coefficients `(b0, b1, b2, a0, a1, a2)`.
pub type Coefficients = (f32, f32, f32, f32, f32, f32);

/// One channel of a Direct Form I biquad.
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// Coefficients are stored pre-normalized by `a0`, so the recurrence has no
/// division. The raw `a0` is remembered for [`coefficients`](Self::coefficients).
#[derive(Debug, Clone)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    raw_a0: f32,

    /// Input history: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output history: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a biquad with identity coefficients (`y[n] = x[n]`).
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            raw_a0: 1.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Sets the coefficients, normalizing by `a0`.
    ///
    /// History is left untouched so coefficient changes mid-stream do not
    /// click. A non-finite or zero `a0` is ignored.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        if a0 == 0.0 || !a0.is_finite() {
            return;
        }
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
        self.raw_a0 = a0;
    }

    /// Applies a coefficient tuple from one of the cookbook functions.
    #[inline]
    pub fn set(&mut self, coefficients: Coefficients) {
        let (b0, b1, b2, a0, a1, a2) = coefficients;
        self.set_coefficients(b0, b1, b2, a0, a1, a2);
    }

    /// Returns the current coefficients as `(b0, b1, b2, a0, a1, a2)`.
    ///
    /// The values are scaled back by the raw `a0` so they match what was
    /// passed to [`set_coefficients`](Self::set_coefficients).
    pub fn coefficients(&self) -> Coefficients {
        let a0 = self.raw_a0;
        (
            self.b0 * a0,
            self.b1 * a0,
            self.b2 * a0,
            a0,
            self.a1 * a0,
            self.a2 * a0,
        )
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the history without changing coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn omega(frequency: f32, sample_rate: f32) -> f32 {
    2.0 * PI * frequency / sample_rate
}

#[inline]
fn bandwidth_alpha(omega: f32, bandwidth: f32) -> f32 {
    let sin_omega = sinf(omega);
    sin_omega * sinhf(LN_2 / 2.0 * bandwidth * omega / sin_omega)
}

/// Low-pass coefficients.
///
/// * `frequency` - Cutoff in Hz
/// * `q` - Resonance (0.707 is Butterworth)
pub fn lowpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> Coefficients {
    let omega = omega(frequency, sample_rate);
    let cos_omega = cosf(omega);
    let alpha = sinf(omega) / (2.0 * q);

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// High-pass coefficients.
///
/// * `frequency` - Cutoff in Hz
/// * `q` - Resonance (0.707 is Butterworth)
pub fn highpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> Coefficients {
    let omega = omega(frequency, sample_rate);
    let cos_omega = cosf(omega);
    let alpha = sinf(omega) / (2.0 * q);

    let b0 = (1.0 + cos_omega) / 2.0;
    let b1 = -(1.0 + cos_omega);
    let b2 = (1.0 + cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Band-pass coefficients with constant 0 dB peak gain.
///
/// * `frequency` - Center in Hz
/// * `bandwidth` - Width in octaves
pub fn bandpass_coefficients_bw(frequency: f32, bandwidth: f32, sample_rate: f32) -> Coefficients {
    let omega = omega(frequency, sample_rate);
    let cos_omega = cosf(omega);
    let alpha = bandwidth_alpha(omega, bandwidth);

    let b0 = alpha;
    let b1 = 0.0;
    let b2 = -alpha;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Peaking EQ coefficients.
///
/// * `frequency` - Center in Hz
/// * `bandwidth` - Width in octaves
/// * `gain_db` - Boost (positive) or cut (negative); 0 dB is flat
pub fn peaking_coefficients_bw(
    frequency: f32,
    bandwidth: f32,
    gain_db: f32,
    sample_rate: f32,
) -> Coefficients {
    let a = powf(10.0, gain_db / 40.0);
    let omega = omega(frequency, sample_rate);
    let cos_omega = cosf(omega);
    let alpha = bandwidth_alpha(omega, bandwidth);

    let b0 = 1.0 + alpha * a;
    let b1 = -2.0 * cos_omega;
    let b2 = 1.0 - alpha * a;
    let a0 = 1.0 + alpha / a;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha / a;

    (b0, b1, b2, a0, a1, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_gain(biquad: &mut Biquad, freq: f32, sample_rate: f32) -> f32 {
        let mut peak_in = 0.0f32;
        let mut peak_out = 0.0f32;
        for i in 0..8192 {
            let x = sinf(2.0 * PI * freq * i as f32 / sample_rate);
            let y = biquad.process(x);
            if i > 4096 {
                peak_in = peak_in.max(x.abs());
                peak_out = peak_out.max(y.abs());
            }
        }
        peak_out / peak_in
    }

    #[test]
    fn test_biquad_passthrough() {
        let mut biquad = Biquad::new();
        for i in 0..10 {
            let input = i as f32 * 0.1;
            assert!((biquad.process(input) - input).abs() < 0.0001);
        }
    }

    #[test]
    fn test_biquad_clear() {
        let mut biquad = Biquad::new();
        for _ in 0..10 {
            biquad.process(1.0);
        }
        biquad.clear();
        assert_eq!(biquad.x1, 0.0);
        assert_eq!(biquad.x2, 0.0);
        assert_eq!(biquad.y1, 0.0);
        assert_eq!(biquad.y2, 0.0);
    }

    #[test]
    fn test_coefficients_are_prenormalized() {
        let mut biquad = Biquad::new();
        let coeffs = lowpass_coefficients(1000.0, 0.707, 44100.0);
        biquad.set(coeffs);
        let (b0, _, _, a0, a1, _) = biquad.coefficients();
        assert!((a0 - coeffs.3).abs() < 1e-6);
        assert!((b0 - coeffs.0).abs() < 1e-6);
        assert!((a1 - coeffs.4).abs() < 1e-6);
        assert!((biquad.b0 - coeffs.0 / coeffs.3).abs() < 1e-6);
    }

    #[test]
    fn test_zero_a0_ignored() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(2.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(biquad.coefficients(), (1.0, 0.0, 0.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn test_setting_coefficients_keeps_history() {
        let mut biquad = Biquad::new();
        biquad.process(0.5);
        biquad.set(highpass_coefficients(200.0, 0.707, 48000.0));
        assert_eq!(biquad.x1, 0.5);
        assert_eq!(biquad.y1, 0.5);
    }

    #[test]
    fn test_lowpass_dc_pass() {
        let mut biquad = Biquad::new();
        biquad.set(lowpass_coefficients(1000.0, 0.707, 44100.0));
        let mut output = 0.0;
        for _ in 0..1000 {
            output = biquad.process(1.0);
        }
        assert!((output - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut biquad = Biquad::new();
        biquad.set(highpass_coefficients(1000.0, 0.707, 44100.0));
        let mut output = 1.0;
        for _ in 0..4000 {
            output = biquad.process(1.0);
        }
        assert!(output.abs() < 0.01, "DC leaked: {}", output);
    }

    #[test]
    fn test_bandpass_unity_at_center() {
        let mut biquad = Biquad::new();
        biquad.set(bandpass_coefficients_bw(1000.0, 1.0, 48000.0));
        let gain = sine_gain(&mut biquad, 1000.0, 48000.0);
        assert!((gain - 1.0).abs() < 0.05, "center gain {}", gain);
    }

    #[test]
    fn test_peaking_flat_at_zero_gain() {
        let mut biquad = Biquad::new();
        biquad.set(peaking_coefficients_bw(1000.0, 1.0, 0.0, 48000.0));
        let gain = sine_gain(&mut biquad, 8000.0, 48000.0);
        assert!((gain - 1.0).abs() < 0.01, "gain {}", gain);
    }

    #[test]
    fn test_peaking_boost_at_center() {
        let mut biquad = Biquad::new();
        biquad.set(peaking_coefficients_bw(1000.0, 1.0, 6.0, 48000.0));
        let gain = sine_gain(&mut biquad, 1000.0, 48000.0);
        assert!((gain - 2.0).abs() < 0.1, "gain {}", gain);
    }
}
