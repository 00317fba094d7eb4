//! Tape stop: playback slows to a halt over a fixed number of frames.
//!
//! Incoming frames are recorded into a [`CaptureBuffer`] while a read head
//! walks through them at a decaying rate:
//!
//! ```text
//! rate(n) = 1 - n / length
//! ```
//!
//! The read head reads with linear interpolation, so the pitch glides down
//! like a motor spinning out. Once `length` frames have passed the effect is
//! pass-through until [`TapeStop::restart`] or a new `set_length`.

use voltex_core::{CaptureBuffer, Effect, ParamDescriptor, ParameterInfo};

/// Tape-stop effect.
///
/// Length 0 bypasses the effect. Exposes no live parameters; the stop
/// duration is a reconfiguration event set through [`set_length`](Self::set_length).
///
/// # Example
///
/// ```rust
/// use voltex_core::Effect;
/// use voltex_effects::TapeStop;
///
/// let mut stop = TapeStop::new();
/// stop.set_length(4);
/// let mut block = [1.0; 12];
/// stop.process(&mut block, 6);
/// assert!(stop.is_finished());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TapeStop {
    capture: CaptureBuffer,
    length: usize,
    current_sample: usize,
    sample_idx: f32,
}

impl TapeStop {
    /// Creates a bypassed tape stop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stop duration in frames and restart.
    ///
    /// Sizes the capture buffer; allocates only when growing.
    pub fn set_length(&mut self, length: usize) {
        self.length = length;
        self.capture.resize(length);
        self.restart();
    }

    /// Stop duration in frames.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Start a new stop from the next frame.
    pub fn restart(&mut self) {
        self.capture.clear();
        self.current_sample = 0;
        self.sample_idx = 0.0;
    }

    /// Current playback rate, 1.0 at the start falling to 0.
    pub fn rate(&self) -> f32 {
        if self.is_finished() {
            1.0
        } else {
            1.0 - self.current_sample as f32 / self.length as f32
        }
    }

    /// Read head position in captured frames.
    pub fn read_position(&self) -> f32 {
        self.sample_idx
    }

    /// Returns `true` once the stop has run its course (or length is 0).
    pub fn is_finished(&self) -> bool {
        self.current_sample >= self.length
    }
}

impl Effect for TapeStop {
    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        if self.is_finished() {
            return (left, right);
        }
        self.capture.record((left, right));
        let rate = self.rate();
        let out = self.capture.read_linear(self.sample_idx);
        self.sample_idx += rate;
        self.current_sample += 1;
        out
    }

    fn reset(&mut self) {
        self.restart();
    }
}

impl ParameterInfo for TapeStop {
    fn param_count(&self) -> usize {
        0
    }

    fn param_info(&self, _index: usize) -> Option<ParamDescriptor> {
        None
    }

    fn get_param(&self, _index: usize) -> f32 {
        0.0
    }

    fn set_param(&mut self, _index: usize, _value: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_bypass() {
        let mut stop = TapeStop::new();
        assert_eq!(stop.process_frame(0.3, 0.4), (0.3, 0.4));
    }

    #[test]
    fn test_read_head_slows_down() {
        let mut stop = TapeStop::new();
        stop.set_length(100);
        let mut last_step = f32::MAX;
        let mut last_pos = 0.0;
        for i in 0..100 {
            stop.process_frame(i as f32, 0.0);
            let step = stop.read_position() - last_pos;
            assert!(step <= last_step);
            last_step = step;
            last_pos = stop.read_position();
        }
        // Sum of (1 - n/100) for n in 0..100 is 50.5.
        assert!((stop.read_position() - 50.5).abs() < 1e-3);
    }

    #[test]
    fn test_output_lags_input_on_ramp() {
        let mut stop = TapeStop::new();
        stop.set_length(100);
        for i in 0..100 {
            let (l, _) = stop.process_frame(i as f32, 0.0);
            assert!(l <= i as f32);
            assert!(l >= 0.0);
        }
        // After the stop, pass-through.
        assert_eq!(stop.process_frame(7.0, 8.0), (7.0, 8.0));
    }

    #[test]
    fn test_first_frames_follow_input() {
        let mut stop = TapeStop::new();
        stop.set_length(1000);
        let (l, r) = stop.process_frame(0.25, -0.25);
        assert_eq!((l, r), (0.25, -0.25));
    }

    #[test]
    fn test_restart_replays() {
        let mut stop = TapeStop::new();
        stop.set_length(10);
        let first: Vec<f32> = (0..10).map(|i| stop.process_frame(i as f32, 0.0).0).collect();
        stop.reset();
        let second: Vec<f32> = (0..10).map(|i| stop.process_frame(i as f32, 0.0).0).collect();
        assert_eq!(first, second);
    }
}
