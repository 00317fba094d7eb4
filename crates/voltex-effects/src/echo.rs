//! Fixed-length feedback echo.
//!
//! A ring of `length` frames holds the recirculating tail. Each frame the
//! oldest entry is added to the input, and the sum, scaled by `feedback`,
//! replaces it:
//!
//! ```text
//! d        = ring[offset]
//! ring[offset] = (in + d) · feedback
//! out      = in + d
//! ```
//!
//! An impulse therefore repeats at `k · length` with amplitude `feedback^k`.

use voltex_core::{Effect, ParamDescriptor, ParameterInfo, RingBuffer};

/// Default feedback amount.
pub const DEFAULT_FEEDBACK: f32 = 0.1;
/// Upper feedback bound; keeps the tail decaying.
pub const MAX_FEEDBACK: f32 = 0.99;

/// Feedback echo.
///
/// Length 0 bypasses the effect.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Feedback | 0.0–0.99 | 0.1 |
///
/// # Example
///
/// ```rust
/// use voltex_core::Effect;
/// use voltex_effects::Echo;
///
/// let mut echo = Echo::new();
/// echo.set_length(2);
/// echo.set_feedback(0.5);
///
/// let mut block = [1.0, 1.0, 0.0, 0.0, 0.0, 0.0];
/// echo.process(&mut block, 3);
/// assert_eq!(block, [1.0, 1.0, 0.0, 0.0, 0.5, 0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct Echo {
    ring: RingBuffer,
    feedback: f32,
}

impl Echo {
    /// Creates a bypassed echo (length 0).
    pub fn new() -> Self {
        Self {
            ring: RingBuffer::default(),
            feedback: DEFAULT_FEEDBACK,
        }
    }

    /// Set the echo length in frames and clear the tail.
    ///
    /// Allocates only when the ring grows.
    pub fn set_length(&mut self, length: usize) {
        self.ring.resize(length);
    }

    /// Echo length in frames.
    pub fn length(&self) -> usize {
        self.ring.len()
    }

    /// Set feedback, clamped to `[0, 0.99]`.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, MAX_FEEDBACK);
    }

    /// Feedback amount.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }
}

impl Default for Echo {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Echo {
    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        if self.ring.is_empty() {
            return (left, right);
        }
        let (dl, dr) = self.ring.current();
        let out = (left + dl, right + dr);
        self.ring.push((out.0 * self.feedback, out.1 * self.feedback));
        out
    }

    fn reset(&mut self) {
        self.ring.clear();
    }
}

impl ParameterInfo for Echo {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::custom(
                "Feedback",
                "Fdbk",
                0.0,
                MAX_FEEDBACK,
                DEFAULT_FEEDBACK,
            )),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.feedback,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.set_feedback(value);
        }
    }
}
