//! Retrigger (stutter): capture a short segment and loop it.
//!
//! An effect window of `length` frames is divided into `loops` segments of
//! `gate_length = length / loops` frames. During the first segment the live
//! input passes through and is recorded; the remaining segments replay the
//! recording. Within each segment, frames past `gate · gate_length` are
//! muted, which gives the classic chopped stutter. The segment plays exactly
//! `loops` times; any remainder of `length` that does not fill a whole
//! segment passes through, as does everything after the window, until the
//! effect is restarted.

use voltex_core::{CaptureBuffer, Effect, ParamDescriptor, ParameterInfo};

/// Default number of segments per window.
pub const DEFAULT_LOOPS: usize = 4;
/// Default audible fraction of each segment.
pub const DEFAULT_GATE: f32 = 0.75;
/// Largest accepted loop count.
pub const MAX_LOOPS: usize = 64;

/// Phase of the retrigger window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetriggerState {
    /// Recording the first segment.
    Capturing,
    /// Replaying the captured segment.
    Looping,
    /// Window finished or length 0.
    PassThrough,
}

/// Loop-and-gate stutter effect.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Gate | 0.0–1.0 | 0.75 |
/// | 1 | Loops | 1–64 | 4 |
///
/// Changing the loop count restarts the window. It never allocates: the
/// capture buffer is sized for the whole window by [`set_length`](Self::set_length).
#[derive(Debug, Clone)]
pub struct Retrigger {
    capture: CaptureBuffer,
    length: usize,
    loops: usize,
    gate_length: usize,
    gate: f32,
    current_sample: usize,
}

impl Retrigger {
    /// Creates a bypassed retrigger (length 0).
    pub fn new() -> Self {
        Self {
            capture: CaptureBuffer::default(),
            length: 0,
            loops: DEFAULT_LOOPS,
            gate_length: 0,
            gate: DEFAULT_GATE,
            current_sample: 0,
        }
    }

    /// Set the window length in frames and restart.
    ///
    /// Reserves capture space for the whole window; allocates only when
    /// growing.
    pub fn set_length(&mut self, length: usize) {
        self.length = length;
        self.capture.resize(length);
        self.update_gate_length();
    }

    /// Window length in frames.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Set the number of segments per window (clamped to `1..=64`) and
    /// restart.
    pub fn set_loops(&mut self, loops: usize) {
        self.loops = loops.clamp(1, MAX_LOOPS);
        self.update_gate_length();
    }

    /// Segments per window.
    pub fn loops(&self) -> usize {
        self.loops
    }

    /// Captured segment size in frames.
    pub fn gate_length(&self) -> usize {
        self.gate_length
    }

    /// Set the audible fraction of each segment, clamped to `[0, 1]`.
    pub fn set_gate(&mut self, gate: f32) {
        self.gate = gate.clamp(0.0, 1.0);
    }

    /// Audible fraction of each segment.
    pub fn gate(&self) -> f32 {
        self.gate
    }

    /// Restart the window from the next frame.
    pub fn restart(&mut self) {
        self.capture.clear();
        self.current_sample = 0;
    }

    /// Frames covered by the repeats: `gate_length · loops`, never past
    /// `length`.
    pub fn active_length(&self) -> usize {
        (self.gate_length * self.loops).min(self.length)
    }

    /// Current phase.
    pub fn state(&self) -> RetriggerState {
        if self.length == 0 || self.current_sample >= self.active_length() {
            RetriggerState::PassThrough
        } else if self.current_sample < self.gate_length {
            RetriggerState::Capturing
        } else {
            RetriggerState::Looping
        }
    }

    fn update_gate_length(&mut self) {
        self.gate_length = if self.length == 0 {
            0
        } else {
            (self.length / self.loops).max(1)
        };
        // Shrinking within the capacity reserved by set_length.
        self.capture.resize(self.gate_length);
        self.restart();
    }
}

impl Default for Retrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Retrigger {
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        let state = self.state();
        if state == RetriggerState::PassThrough {
            return (left, right);
        }
        let pos = self.current_sample % self.gate_length;
        let frame = if state == RetriggerState::Capturing {
            self.capture.record((left, right));
            (left, right)
        } else {
            self.capture.get(pos)
        };
        self.current_sample += 1;

        if pos as f32 >= self.gate_length as f32 * self.gate {
            (0.0, 0.0)
        } else {
            frame
        }
    }

    fn reset(&mut self) {
        self.restart();
    }
}

impl ParameterInfo for Retrigger {
    fn param_count(&self) -> usize {
        2
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::ratio("Gate", "Gate", DEFAULT_GATE)),
            1 => Some(
                ParamDescriptor::custom("Loops", "Loops", 1.0, MAX_LOOPS as f32, 4.0)
                    .with_step(1.0),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.gate,
            1 => self.loops as f32,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_gate(value),
            1 => {
                let loops = libm::roundf(value.clamp(1.0, MAX_LOOPS as f32)) as usize;
                if loops != self.loops {
                    self.set_loops(loops);
                }
            }
            _ => {}
        }
    }
}
