//! Core Effect trait.
//!
//! The [`Effect`] trait is the processing contract every effect in the chain
//! implements. Audio arrives as an interleaved stereo block
//! `[L0, R0, L1, R1, ...]` owned by the caller and borrowed for a single
//! call; effects transform it in place.
//!
//! ## Design Decisions
//!
//! - **Stereo frames**: the unit of processing is a frame (one left/right
//!   pair). Effects that treat the channels independently just keep two
//!   copies of their per-channel state.
//!
//! - **Object-safe**: chains store `Box<dyn EffectWithParams + Send>`, so
//!   the trait has no generic methods.
//!
//! - **No allocations**: `process` and `process_frame` never allocate and
//!   never retain the buffer. Anything that must allocate (buffer sizing)
//!   happens in dedicated setters between blocks.

/// Core trait for all audio effects.
///
/// # Example
///
/// ```rust
/// use voltex_core::Effect;
///
/// struct Swap;
///
/// impl Effect for Swap {
///     fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
///         (right, left)
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut buffer = [1.0, 2.0, 3.0, 4.0];
/// Swap.process(&mut buffer, 2);
/// assert_eq!(buffer, [2.0, 1.0, 4.0, 3.0]);
/// ```
pub trait Effect {
    /// Process one stereo frame and return the new frame.
    ///
    /// Advances all internal counters by exactly one frame.
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process an interleaved stereo block in place.
    ///
    /// Processes `min(frames, buffer.len() / 2)` frames; a trailing odd
    /// sample is left untouched. `frames == 0` leaves both the buffer and
    /// the effect state unchanged.
    fn process(&mut self, buffer: &mut [f32], frames: usize) {
        for frame in buffer.chunks_exact_mut(2).take(frames) {
            let (l, r) = self.process_frame(frame[0], frame[1]);
            frame[0] = l;
            frame[1] = r;
        }
    }

    /// Update the sample rate.
    ///
    /// Effects with parameters in seconds or Hz recompute their derived
    /// sample counts and coefficients here. Effects whose parameters are
    /// already in samples keep the default no-op.
    fn set_sample_rate(&mut self, _sample_rate: f32) {}

    /// Clear internal state (history, buffers, counters) without changing
    /// parameters.
    fn reset(&mut self);

    /// Processing latency in frames. Default 0.
    fn latency_samples(&self) -> usize {
        0
    }
}

/// Number of whole frames that a call to [`Effect::process`] will touch.
#[inline]
pub fn frames_in(buffer: &[f32], frames: usize) -> usize {
    frames.min(buffer.len() / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gain(f32);

    impl Effect for Gain {
        fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
            (left * self.0, right * self.0)
        }
        fn reset(&mut self) {}
    }

    struct Counter(usize);

    impl Effect for Counter {
        fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
            self.0 += 1;
            (left, right)
        }
        fn reset(&mut self) {
            self.0 = 0;
        }
    }

    #[test]
    fn test_process_interleaved() {
        let mut buffer = [1.0, -1.0, 0.5, -0.5];
        Gain(2.0).process(&mut buffer, 2);
        assert_eq!(buffer, [2.0, -2.0, 1.0, -1.0]);
    }

    #[test]
    fn test_zero_frames_is_noop() {
        let mut buffer = [1.0, 2.0, 3.0, 4.0];
        let mut counter = Counter(0);
        counter.process(&mut buffer, 0);
        assert_eq!(buffer, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(counter.0, 0);
    }

    #[test]
    fn test_frames_clamped_to_buffer() {
        let mut buffer = [1.0, 1.0, 1.0, 1.0, 1.0];
        let mut counter = Counter(0);
        counter.process(&mut buffer, 10);
        assert_eq!(counter.0, 2);
        assert_eq!(frames_in(&buffer, 10), 2);
    }

    #[test]
    fn test_partial_block() {
        let mut buffer = [1.0, 1.0, 1.0, 1.0];
        Gain(0.0).process(&mut buffer, 1);
        assert_eq!(buffer, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_default_latency() {
        assert_eq!(Gain(1.0).latency_samples(), 0);
    }
}
