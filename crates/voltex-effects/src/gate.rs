//! Rhythmic trapezoid gate.
//!
//! Multiplies both channels by a periodic envelope. One cycle of `length`
//! frames is split by three marks:
//!
//! ```text
//!   1 |    ________________
//!     |   /                \
//!     |  /                  \
//! low |_/                    \_____________
//!     0  fade_in        halfway  fade_out  length
//!        (L/10)         (L/2)   (L/2+L/10)
//! ```
//!
//! The envelope rises from `low` to 1 over `[0, fade_in)`, holds 1 through
//! `halfway`, falls back to `low` by `fade_out` and holds `low` for the
//! rest of the cycle.

use voltex_core::{Effect, ParamDescriptor, ParameterInfo};

/// Default floor level of the envelope.
pub const DEFAULT_LOW: f32 = 0.1;

/// Periodic trapezoid gate.
///
/// Length 0 bypasses the effect.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Low | 0.0–1.0 | 0.1 |
///
/// # Example
///
/// ```rust
/// use voltex_effects::Gate;
///
/// let mut gate = Gate::new();
/// gate.set_length(100);
/// assert!((gate.envelope_at(0) - 0.1).abs() < 1e-6);
/// assert_eq!(gate.envelope_at(50), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Gate {
    length: usize,
    low: f32,
    fade_in: f32,
    halfway: f32,
    fade_out: f32,
    current_sample: usize,
}

impl Gate {
    /// Creates a gate with length 0 (bypassed).
    pub fn new() -> Self {
        Self {
            length: 0,
            low: DEFAULT_LOW,
            fade_in: 0.0,
            halfway: 0.0,
            fade_out: 0.0,
            current_sample: 0,
        }
    }

    /// Set the cycle length in frames and restart the cycle.
    pub fn set_length(&mut self, length: usize) {
        let len = length as f32;
        self.length = length;
        self.fade_in = len / 10.0;
        self.halfway = len / 2.0;
        self.fade_out = self.halfway + len / 10.0;
        self.current_sample = 0;
    }

    /// Cycle length in frames.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Set the floor level, clamped to `[0, 1]`.
    pub fn set_low(&mut self, low: f32) {
        self.low = low.clamp(0.0, 1.0);
    }

    /// Floor level.
    pub fn low(&self) -> f32 {
        self.low
    }

    /// Position within the current cycle.
    pub fn position(&self) -> usize {
        self.current_sample
    }

    /// Envelope value at `pos` frames into a cycle (taken modulo length).
    pub fn envelope_at(&self, pos: usize) -> f32 {
        if self.length == 0 {
            return 1.0;
        }
        let pos = (pos % self.length) as f32;
        let low = self.low;
        if pos < self.fade_in {
            low + (1.0 - low) * (pos / self.fade_in)
        } else if pos <= self.halfway {
            1.0
        } else if pos <= self.fade_out {
            let fall = self.fade_out - self.halfway;
            1.0 - (1.0 - low) * ((pos - self.halfway) / fall)
        } else {
            low
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Gate {
    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        if self.length == 0 {
            return (left, right);
        }
        let env = self.envelope_at(self.current_sample);
        self.current_sample += 1;
        if self.current_sample >= self.length {
            self.current_sample = 0;
        }
        (left * env, right * env)
    }

    fn reset(&mut self) {
        self.current_sample = 0;
    }
}

impl ParameterInfo for Gate {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::ratio("Low", "Low", DEFAULT_LOW)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.low,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.set_low(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks() {
        let mut gate = Gate::new();
        gate.set_length(100);
        assert!((gate.envelope_at(0) - 0.1).abs() < 1e-6);
        assert!((gate.envelope_at(5) - 0.55).abs() < 1e-6);
        assert_eq!(gate.envelope_at(10), 1.0);
        assert_eq!(gate.envelope_at(50), 1.0);
        assert!((gate.envelope_at(55) - 0.55).abs() < 1e-6);
        assert!((gate.envelope_at(60) - 0.1).abs() < 1e-6);
        assert_eq!(gate.envelope_at(99), 0.1);
    }

    #[test]
    fn test_periodic() {
        let mut gate = Gate::new();
        gate.set_length(100);
        for pos in 0..100 {
            assert_eq!(gate.envelope_at(pos), gate.envelope_at(pos + 100));
        }
    }

    #[test]
    fn test_process_follows_envelope() {
        let mut gate = Gate::new();
        gate.set_length(100);
        for cycle in 0..3 {
            for pos in 0..100 {
                let (l, r) = gate.process_frame(1.0, -1.0);
                assert_eq!(l, gate.envelope_at(pos), "cycle {} pos {}", cycle, pos);
                assert_eq!(r, -l);
            }
        }
    }

    #[test]
    fn test_zero_length_bypass() {
        let mut gate = Gate::new();
        assert_eq!(gate.process_frame(0.7, -0.7), (0.7, -0.7));
    }

    #[test]
    fn test_low_one_is_transparent() {
        let mut gate = Gate::new();
        gate.set_length(64);
        gate.set_low(1.0);
        for i in 0..200 {
            let x = i as f32 * 0.01;
            assert_eq!(gate.process_frame(x, x), (x, x));
        }
    }

    #[test]
    fn test_set_length_restarts() {
        let mut gate = Gate::new();
        gate.set_length(100);
        for _ in 0..30 {
            gate.process_frame(1.0, 1.0);
        }
        gate.set_length(80);
        assert_eq!(gate.position(), 0);
    }
}
