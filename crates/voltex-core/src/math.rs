//! Mathematical utility functions for DSP.
//!
//! All functions are allocation-free and `no_std` compatible.
//!
//! - [`db_to_linear`] / [`linear_to_db`] - level conversions
//! - [`lerp`] - linear interpolation
//! - [`wet_dry_mix`] / [`wet_dry_mix_stereo`] - dry/wet blends
//! - [`flush_denormal`] - keeps feedback paths out of subnormal range
//! - [`seconds_to_samples`] - time conversion used by effect setters

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// ```rust
/// use voltex_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels. Input is floored at `1e-10`.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Linear interpolation from `a` (t = 0) to `b` (t = 1).
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Angular frequency in radians per sample.
#[inline]
pub fn hz_to_omega(freq_hz: f32, sample_rate: f32) -> f32 {
    core::f32::consts::TAU * freq_hz / sample_rate
}

/// Seconds to a whole number of sample frames (rounded, never negative).
#[inline]
pub fn seconds_to_samples(seconds: f32, sample_rate: f32) -> usize {
    let samples = seconds * sample_rate;
    if samples.is_finite() && samples > 0.0 {
        libm::roundf(samples) as usize
    } else {
        0
    }
}

/// Flush values below `1e-20` to zero.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Blend dry and wet: `mix = 0` is fully dry, `mix = 1` fully wet.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

/// Stereo version of [`wet_dry_mix`].
#[inline]
pub fn wet_dry_mix_stereo(dry_l: f32, dry_r: f32, wet_l: f32, wet_r: f32, mix: f32) -> (f32, f32) {
    (
        wet_dry_mix(dry_l, wet_l, mix),
        wet_dry_mix(dry_r, wet_r, mix),
    )
}
