//! Peak limiter with instant attack and linear release.
//!
//! # Algorithm
//!
//! The limiter tracks the loudest recent peak `max_volume` and a release
//! timer counting frames since that peak. The effective envelope is
//!
//! ```text
//! env = lerp(max_volume, 1.0, timer / release_samples)
//! ```
//!
//! so it falls linearly from the peak back to unity over `release_time`
//! seconds. Each frame:
//!
//! 1. `peak = max(|L|, |R|)` (stereo linked).
//! 2. If `peak > env`, snap: `max_volume = peak`, `timer = 0`, `env = peak`.
//! 3. Output `input / env`, then advance the timer.
//!
//! Because `env >= peak` after step 2, every output sample has magnitude
//! at most 1.0. Input that stays within `[-1, 1]` is untouched once the
//! release has run out.

use voltex_core::{Effect, ParamDescriptor, ParamUnit, ParameterInfo, lerp, seconds_to_samples};

/// Default release time in seconds.
pub const DEFAULT_RELEASE_TIME: f32 = 0.1;

/// Peak limiter.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Release | 0.0–5.0 s | 0.1 |
///
/// # Example
///
/// ```rust
/// use voltex_core::Effect;
/// use voltex_effects::Limiter;
///
/// let mut limiter = Limiter::new(48000.0);
/// let (l, r) = limiter.process_frame(2.0, -0.5);
/// assert_eq!(l, 1.0);
/// assert_eq!(r, -0.25);
/// ```
#[derive(Debug, Clone)]
pub struct Limiter {
    release_time: f32,
    release_samples: usize,
    max_volume: f32,
    timer: usize,
    sample_rate: f32,
}

impl Limiter {
    /// Creates a limiter with a 0.1 s release.
    pub fn new(sample_rate: f32) -> Self {
        let release_samples = seconds_to_samples(DEFAULT_RELEASE_TIME, sample_rate);
        Self {
            release_time: DEFAULT_RELEASE_TIME,
            release_samples,
            max_volume: 1.0,
            timer: release_samples,
            sample_rate,
        }
    }

    /// Set the release time in seconds (clamped to `[0, 5]`).
    pub fn set_release_time(&mut self, seconds: f32) {
        self.release_time = seconds.clamp(0.0, 5.0);
        self.release_samples = seconds_to_samples(self.release_time, self.sample_rate);
        self.timer = self.timer.min(self.release_samples);
    }

    /// Release time in seconds.
    pub fn release_time(&self) -> f32 {
        self.release_time
    }

    /// Release time in frames at the current sample rate.
    pub fn release_samples(&self) -> usize {
        self.release_samples
    }

    /// Current envelope (divisor), always `>= 1.0`.
    #[inline]
    pub fn envelope(&self) -> f32 {
        if self.timer >= self.release_samples {
            1.0
        } else {
            lerp(
                self.max_volume,
                1.0,
                self.timer as f32 / self.release_samples as f32,
            )
        }
    }
}

impl Default for Limiter {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Effect for Limiter {
    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        let peak = left.abs().max(right.abs());
        let mut env = self.envelope();
        if peak > env {
            self.max_volume = peak;
            self.timer = 0;
            env = peak;
        }
        if self.timer < self.release_samples {
            self.timer += 1;
        }
        (left / env, right / env)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.set_release_time(self.release_time);
    }

    fn reset(&mut self) {
        self.max_volume = 1.0;
        self.timer = self.release_samples;
    }
}

impl ParameterInfo for Limiter {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(
                ParamDescriptor::custom("Release", "Release", 0.0, 5.0, DEFAULT_RELEASE_TIME)
                    .with_unit(ParamUnit::Seconds),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.release_time,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.set_release_time(value);
        }
    }
}
