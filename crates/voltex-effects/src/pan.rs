//! Stereo panner with a linear pan law.

use voltex_core::{Effect, ParamDescriptor, ParameterInfo};

/// Linear-law panner.
///
/// `left *= min(1, 1 - pan)`, `right *= min(1, 1 + pan)`. At `pan = 0`
/// both gains are exactly 1; at the extremes the opposite channel is
/// silenced and the near channel stays at unity. Stateless.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Pan | −1.0–1.0 | 0.0 |
#[derive(Debug, Clone, Default)]
pub struct Panner {
    pan: f32,
}

impl Panner {
    /// Creates a centered panner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set pan position, clamped to `[-1, 1]`.
    pub fn set_pan(&mut self, pan: f32) {
        self.pan = pan.clamp(-1.0, 1.0);
    }

    /// Current pan position.
    pub fn pan(&self) -> f32 {
        self.pan
    }

    /// Channel gains `(left, right)` for the current position.
    #[inline]
    pub fn gains(&self) -> (f32, f32) {
        ((1.0 - self.pan).min(1.0), (1.0 + self.pan).min(1.0))
    }
}

impl Effect for Panner {
    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        let (gl, gr) = self.gains();
        (left * gl, right * gr)
    }

    fn reset(&mut self) {}
}

impl ParameterInfo for Panner {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::custom("Pan", "Pan", -1.0, 1.0, 0.0)),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.pan,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.set_pan(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_unity() {
        let mut pan = Panner::new();
        assert_eq!(pan.process_frame(0.3, -0.7), (0.3, -0.7));
    }

    #[test]
    fn test_hard_left_and_right() {
        let mut pan = Panner::new();
        pan.set_pan(-1.0);
        assert_eq!(pan.process_frame(1.0, 1.0), (1.0, 0.0));
        pan.set_pan(1.0);
        assert_eq!(pan.process_frame(1.0, 1.0), (0.0, 1.0));
    }

    #[test]
    fn test_half_right() {
        let mut pan = Panner::new();
        pan.set_pan(0.5);
        assert_eq!(pan.gains(), (0.5, 1.0));
    }

    #[test]
    fn test_pan_clamped() {
        let mut pan = Panner::new();
        pan.set_param(0, 3.0);
        assert_eq!(pan.get_param(0), 1.0);
    }
}
