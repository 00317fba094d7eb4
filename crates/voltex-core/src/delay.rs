//! Stereo frame buffers for time-based effects.
//!
//! # Types
//!
//! - [`RingBuffer`] - circular buffer of frames with a wrapping offset
//!   (echo, flanger)
//! - [`CaptureBuffer`] - linear record-then-replay buffer (tape stop,
//!   retrigger)
//!
//! Both are sized by `resize`, which is a reconfiguration event: it may
//! allocate when the requested length exceeds the current capacity and must
//! therefore be called between blocks. Reading and writing never allocate.
//!
//! # Offsets
//!
//! The ring offset always stays in `[0, len)`. A ring of length 0 is valid
//! and inert: every read returns silence and writes are dropped.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// One stereo frame `(left, right)`.
pub type Frame = (f32, f32);

const SILENCE: Frame = (0.0, 0.0);

/// Circular buffer of stereo frames.
///
/// # Example
///
/// ```rust
/// use voltex_core::RingBuffer;
///
/// let mut ring = RingBuffer::new(3);
/// ring.push((1.0, -1.0));
/// ring.push((0.0, 0.0));
/// ring.push((0.0, 0.0));
///
/// // After one full lap the oldest frame is back under the offset.
/// assert_eq!(ring.current(), (1.0, -1.0));
/// assert_eq!(ring.offset(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RingBuffer {
    buffer: Vec<Frame>,
    offset: usize,
}

impl RingBuffer {
    /// Creates a ring holding `len` frames of silence.
    pub fn new(len: usize) -> Self {
        let mut ring = Self::default();
        ring.resize(len);
        ring
    }

    /// Changes the length, clears the contents and rewinds the offset.
    ///
    /// Only allocates when `len` exceeds the current capacity.
    pub fn resize(&mut self, len: usize) {
        self.buffer.clear();
        self.buffer.resize(len, SILENCE);
        self.offset = 0;
    }

    /// Active length in frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the ring has length 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Allocated capacity in frames.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Current offset, always `< len()` (or 0 when empty).
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Frame under the offset: the one written `len()` frames ago.
    #[inline]
    pub fn current(&self) -> Frame {
        self.buffer.get(self.offset).copied().unwrap_or(SILENCE)
    }

    /// Writes a frame under the offset and advances it.
    #[inline]
    pub fn push(&mut self, frame: Frame) {
        let len = self.buffer.len();
        if len == 0 {
            return;
        }
        self.buffer[self.offset] = frame;
        self.offset += 1;
        if self.offset == len {
            self.offset = 0;
        }
    }

    /// Reads `delay` frames behind the most recently written frame with
    /// linear interpolation.
    ///
    /// `delay = 0` is the last pushed frame. The delay is clamped to
    /// `len() - 1`.
    #[inline]
    pub fn read_delayed(&self, delay: f32) -> Frame {
        let len = self.buffer.len();
        if len == 0 {
            return SILENCE;
        }
        let delay = delay.clamp(0.0, (len - 1) as f32);
        let delay_int = delay as usize;
        let frac = delay - delay_int as f32;

        let pos = (self.offset + len - delay_int - 1) % len;
        let older = (pos + len - 1) % len;

        let (al, ar) = self.buffer[pos];
        let (bl, br) = self.buffer[older];
        (al + (bl - al) * frac, ar + (br - ar) * frac)
    }

    /// Silences the contents and rewinds the offset.
    pub fn clear(&mut self) {
        self.buffer.fill(SILENCE);
        self.offset = 0;
    }
}

/// Linear buffer that records frames once and replays them by position.
///
/// # Example
///
/// ```rust
/// use voltex_core::CaptureBuffer;
///
/// let mut capture = CaptureBuffer::new(2);
/// capture.record((0.0, 0.0));
/// capture.record((1.0, 1.0));
/// capture.record((9.0, 9.0)); // full, dropped
///
/// assert_eq!(capture.recorded(), 2);
/// assert_eq!(capture.read_linear(0.5), (0.5, 0.5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    buffer: Vec<Frame>,
    len: usize,
    recorded: usize,
}

impl CaptureBuffer {
    /// Creates a capture buffer for `len` frames.
    pub fn new(len: usize) -> Self {
        let mut capture = Self::default();
        capture.resize(len);
        capture
    }

    /// Changes the length and discards anything recorded.
    ///
    /// Only allocates when `len` exceeds the current capacity.
    pub fn resize(&mut self, len: usize) {
        self.buffer.clear();
        self.buffer.resize(len, SILENCE);
        self.len = len;
        self.recorded = 0;
    }

    /// Length in frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer has length 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of frames recorded since the last `clear`/`resize`.
    #[inline]
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Returns `true` once every slot has been recorded.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.recorded >= self.len
    }

    /// Appends a frame; ignored once full.
    #[inline]
    pub fn record(&mut self, frame: Frame) {
        if self.recorded < self.len {
            self.buffer[self.recorded] = frame;
            self.recorded += 1;
        }
    }

    /// Frame at `index`, silence if not yet recorded.
    #[inline]
    pub fn get(&self, index: usize) -> Frame {
        if index < self.recorded {
            self.buffer[index]
        } else {
            SILENCE
        }
    }

    /// Reads at a fractional position with linear interpolation between
    /// `floor(pos)` and the next recorded frame.
    #[inline]
    pub fn read_linear(&self, pos: f32) -> Frame {
        if self.recorded == 0 || pos < 0.0 {
            return SILENCE;
        }
        let index = pos as usize;
        if index >= self.recorded {
            return SILENCE;
        }
        let frac = pos - index as f32;
        let (al, ar) = self.buffer[index];
        let (bl, br) = if index + 1 < self.recorded {
            self.buffer[index + 1]
        } else {
            (al, ar)
        };
        (al + (bl - al) * frac, ar + (br - ar) * frac)
    }

    /// Forgets recorded frames without changing the length.
    pub fn clear(&mut self) {
        self.buffer.fill(SILENCE);
        self.recorded = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_wraps_offset() {
        let mut ring = RingBuffer::new(4);
        for i in 0..10 {
            ring.push((i as f32, 0.0));
            assert!(ring.offset() < ring.len());
        }
        assert_eq!(ring.offset(), 2);
    }

    #[test]
    fn test_ring_current_is_len_frames_old() {
        let mut ring = RingBuffer::new(3);
        for i in 0..7 {
            ring.push((i as f32, -(i as f32)));
        }
        // Written: ..., 4, 5, 6; the slot under the offset holds 4.
        assert_eq!(ring.current(), (4.0, -4.0));
    }

    #[test]
    fn test_ring_read_delayed() {
        let mut ring = RingBuffer::new(8);
        for i in 0..5 {
            ring.push((i as f32, i as f32 * 10.0));
        }
        assert_eq!(ring.read_delayed(0.0), (4.0, 40.0));
        assert_eq!(ring.read_delayed(2.0), (2.0, 20.0));
        let (l, r) = ring.read_delayed(1.5);
        assert!((l - 2.5).abs() < 1e-6);
        assert!((r - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_ring_read_clamped() {
        let mut ring = RingBuffer::new(2);
        ring.push((1.0, 1.0));
        ring.push((2.0, 2.0));
        assert_eq!(ring.read_delayed(100.0), (1.0, 1.0));
    }

    #[test]
    fn test_empty_ring_is_inert() {
        let mut ring = RingBuffer::new(0);
        ring.push((1.0, 1.0));
        assert_eq!(ring.current(), (0.0, 0.0));
        assert_eq!(ring.read_delayed(3.0), (0.0, 0.0));
        assert_eq!(ring.offset(), 0);
    }

    #[test]
    fn test_resize_keeps_capacity_when_shrinking() {
        let mut ring = RingBuffer::new(64);
        let cap = ring.capacity();
        ring.resize(16);
        assert_eq!(ring.len(), 16);
        assert_eq!(ring.capacity(), cap);
        assert_eq!(ring.current(), (0.0, 0.0));
    }

    #[test]
    fn test_capture_record_and_replay() {
        let mut capture = CaptureBuffer::new(3);
        assert!(!capture.is_empty());
        capture.record((1.0, 2.0));
        capture.record((3.0, 4.0));
        assert_eq!(capture.get(1), (3.0, 4.0));
        assert_eq!(capture.get(2), (0.0, 0.0));
        capture.record((5.0, 6.0));
        assert!(capture.is_full());
        assert_eq!(capture.read_linear(1.5), (4.0, 5.0));
        // Past the end holds the last frame.
        assert_eq!(capture.read_linear(2.5), (5.0, 6.0));
    }

    #[test]
    fn test_capture_clear() {
        let mut capture = CaptureBuffer::new(2);
        capture.record((1.0, 1.0));
        capture.clear();
        assert_eq!(capture.recorded(), 0);
        assert_eq!(capture.len(), 2);
        assert_eq!(capture.read_linear(0.0), (0.0, 0.0));
    }
}
