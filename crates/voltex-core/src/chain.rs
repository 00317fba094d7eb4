//! Ordered effect chain.
//!
//! [`EffectChain`] holds a sequence of [`ChainSlot`]s, each owning one boxed
//! effect and its bypass flag. A block is handed to every active slot in
//! order, all operating in place on the same interleaved buffer.
//!
//! Structure edits (`push`, `insert`, `remove`, `move_slot`) may allocate
//! and must happen between blocks. Bypass toggles and parameter writes are
//! allocation-free.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use crate::effect::Effect;
use crate::effect_with_params::EffectWithParams;

/// Errors from chain structure edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    /// Slot index is past the end of the chain.
    SlotOutOfRange {
        /// Requested index.
        index: usize,
        /// Chain length at the time of the call.
        len: usize,
    },
}

impl core::fmt::Display for ChainError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SlotOutOfRange { index, len } => {
                write!(f, "slot {index} out of range for chain of length {len}")
            }
        }
    }
}

impl core::error::Error for ChainError {}

/// A single slot in the effect chain.
pub struct ChainSlot {
    /// The effect instance.
    pub effect: Box<dyn EffectWithParams + Send>,
    /// Effect identifier (e.g. `"echo"`, `"phaser"`).
    pub id: &'static str,
    /// Whether this slot is skipped during processing.
    pub bypassed: bool,
}

impl core::fmt::Debug for ChainSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChainSlot")
            .field("id", &self.id)
            .field("bypassed", &self.bypassed)
            .finish_non_exhaustive()
    }
}

/// Ordered chain of effects processed in place.
///
/// # Example
///
/// ```rust
/// use voltex_core::{Effect, EffectChain, ParameterInfo, ParamDescriptor};
///
/// struct Half;
/// impl Effect for Half {
///     fn process_frame(&mut self, l: f32, r: f32) -> (f32, f32) { (l * 0.5, r * 0.5) }
///     fn reset(&mut self) {}
/// }
/// impl ParameterInfo for Half {
///     fn param_count(&self) -> usize { 0 }
///     fn param_info(&self, _: usize) -> Option<ParamDescriptor> { None }
///     fn get_param(&self, _: usize) -> f32 { 0.0 }
///     fn set_param(&mut self, _: usize, _: f32) {}
/// }
///
/// let mut chain = EffectChain::new();
/// chain.push("half", Box::new(Half));
/// chain.push("half", Box::new(Half));
///
/// let mut buffer = [1.0, 1.0];
/// chain.process(&mut buffer, 1);
/// assert_eq!(buffer, [0.25, 0.25]);
/// ```
#[derive(Debug, Default)]
pub struct EffectChain {
    slots: Vec<ChainSlot>,
}

impl EffectChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the chain has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Appends an effect, returning its slot index.
    pub fn push(&mut self, id: &'static str, effect: Box<dyn EffectWithParams + Send>) -> usize {
        self.slots.push(ChainSlot {
            effect,
            id,
            bypassed: false,
        });
        #[cfg(feature = "tracing")]
        tracing::debug!(id, slot = self.slots.len() - 1, "effect appended");
        self.slots.len() - 1
    }

    /// Inserts an effect at `index`, shifting later slots back.
    pub fn insert(
        &mut self,
        index: usize,
        id: &'static str,
        effect: Box<dyn EffectWithParams + Send>,
    ) -> Result<(), ChainError> {
        if index > self.slots.len() {
            return Err(ChainError::SlotOutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        self.slots.insert(
            index,
            ChainSlot {
                effect,
                id,
                bypassed: false,
            },
        );
        #[cfg(feature = "tracing")]
        tracing::debug!(id, slot = index, "effect inserted");
        Ok(())
    }

    /// Removes and returns the slot at `index`.
    pub fn remove(&mut self, index: usize) -> Result<ChainSlot, ChainError> {
        self.check(index)?;
        let slot = self.slots.remove(index);
        #[cfg(feature = "tracing")]
        tracing::debug!(id = slot.id, slot = index, "effect removed");
        Ok(slot)
    }

    /// Moves the slot at `from` so that it ends up at index `to`.
    pub fn move_slot(&mut self, from: usize, to: usize) -> Result<(), ChainError> {
        self.check(from)?;
        self.check(to)?;
        let slot = self.slots.remove(from);
        self.slots.insert(to, slot);
        #[cfg(feature = "tracing")]
        tracing::debug!(from, to, "effect moved");
        Ok(())
    }

    /// Sets the bypass flag of a slot.
    pub fn set_bypassed(&mut self, index: usize, bypassed: bool) -> Result<(), ChainError> {
        self.check(index)?;
        let slot = &mut self.slots[index];
        if slot.bypassed != bypassed {
            slot.bypassed = bypassed;
            #[cfg(feature = "tracing")]
            tracing::debug!(id = slot.id, slot = index, bypassed, "bypass changed");
        }
        Ok(())
    }

    /// Returns whether a slot is bypassed; `false` for out-of-range indices.
    pub fn is_bypassed(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.bypassed)
    }

    /// Returns the slot at `index`.
    pub fn slot(&self, index: usize) -> Option<&ChainSlot> {
        self.slots.get(index)
    }

    /// Returns the slot at `index` mutably.
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut ChainSlot> {
        self.slots.get_mut(index)
    }

    /// Iterates over the slots in processing order.
    pub fn slots(&self) -> impl Iterator<Item = &ChainSlot> {
        self.slots.iter()
    }

    /// Pushes the values and bypass flags held by `bridge` into the chain.
    ///
    /// Call once per block on the audio thread before [`process`](Effect::process).
    #[cfg(feature = "std")]
    pub fn sync_from(&mut self, bridge: &crate::bridge::ParamBridge) {
        bridge.sync_to_chain(self);
    }

    fn check(&self, index: usize) -> Result<(), ChainError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(ChainError::SlotOutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }
}

impl Effect for EffectChain {
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        let mut frame = (left, right);
        for slot in self.slots.iter_mut().filter(|s| !s.bypassed) {
            frame = slot.effect.process_frame(frame.0, frame.1);
        }
        frame
    }

    fn process(&mut self, buffer: &mut [f32], frames: usize) {
        if frames == 0 {
            return;
        }
        for slot in self.slots.iter_mut().filter(|s| !s.bypassed) {
            slot.effect.process(buffer, frames);
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        for slot in &mut self.slots {
            slot.effect.set_sample_rate(sample_rate);
        }
    }

    fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.effect.reset();
        }
    }

    fn latency_samples(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| !s.bypassed)
            .map(|s| s.effect.latency_samples())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param_info::{ParamDescriptor, ParameterInfo};

    struct Add(f32);

    impl Effect for Add {
        fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
            (left + self.0, right + self.0)
        }
        fn reset(&mut self) {}
        fn latency_samples(&self) -> usize {
            3
        }
    }

    impl ParameterInfo for Add {
        fn param_count(&self) -> usize {
            1
        }
        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            (index == 0).then(|| ParamDescriptor::custom("Offset", "Offset", -1.0, 1.0, 0.0))
        }
        fn get_param(&self, index: usize) -> f32 {
            if index == 0 { self.0 } else { 0.0 }
        }
        fn set_param(&mut self, index: usize, value: f32) {
            if index == 0 {
                self.0 = value.clamp(-1.0, 1.0);
            }
        }
    }

    struct Double;

    impl Effect for Double {
        fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
            (left * 2.0, right * 2.0)
        }
        fn reset(&mut self) {}
    }

    impl ParameterInfo for Double {
        fn param_count(&self) -> usize {
            0
        }
        fn param_info(&self, _: usize) -> Option<ParamDescriptor> {
            None
        }
        fn get_param(&self, _: usize) -> f32 {
            0.0
        }
        fn set_param(&mut self, _: usize, _: f32) {}
    }

    fn chain() -> EffectChain {
        let mut chain = EffectChain::new();
        chain.push("add", Box::new(Add(1.0)));
        chain.push("double", Box::new(Double));
        chain
    }

    #[test]
    fn test_processes_in_order() {
        let mut chain = chain();
        let mut buffer = [1.0, 0.0];
        chain.process(&mut buffer, 1);
        assert_eq!(buffer, [4.0, 2.0]);
    }

    #[test]
    fn test_bypass_skips_slot() {
        let mut chain = chain();
        chain.set_bypassed(0, true).unwrap();
        let mut buffer = [1.0, 0.0];
        chain.process(&mut buffer, 1);
        assert_eq!(buffer, [2.0, 0.0]);
        assert!(chain.is_bypassed(0));
        assert_eq!(chain.latency_samples(), 0);
    }

    #[test]
    fn test_move_slot_reorders() {
        let mut chain = chain();
        chain.move_slot(1, 0).unwrap();
        assert_eq!(chain.slot(0).map(|s| s.id), Some("double"));
        let mut buffer = [1.0, 0.0];
        chain.process(&mut buffer, 1);
        assert_eq!(buffer, [3.0, 1.0]);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut chain = chain();
        chain.insert(0, "double", Box::new(Double)).unwrap();
        assert_eq!(chain.len(), 3);
        let removed = chain.remove(2).unwrap();
        assert_eq!(removed.id, "double");
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_out_of_range_errors() {
        let mut chain = chain();
        assert_eq!(
            chain.remove(5).unwrap_err(),
            ChainError::SlotOutOfRange { index: 5, len: 2 }
        );
        assert!(chain.set_bypassed(2, true).is_err());
        assert!(chain.move_slot(0, 2).is_err());
        assert!(chain.insert(3, "double", Box::new(Double)).is_err());
        assert!(!chain.is_bypassed(9));
    }

    #[test]
    fn test_zero_frames_is_noop() {
        let mut chain = chain();
        let mut buffer = [0.5, 0.5];
        chain.process(&mut buffer, 0);
        assert_eq!(buffer, [0.5, 0.5]);
    }

    #[test]
    fn test_params_through_slot() {
        let mut chain = chain();
        let slot = chain.slot_mut(0).unwrap();
        slot.effect.effect_set_param(0, 5.0);
        assert_eq!(slot.effect.effect_get_param(0), 1.0);
        assert_eq!(chain.latency_samples(), 3);
    }

    #[test]
    fn test_error_display() {
        let err = ChainError::SlotOutOfRange { index: 4, len: 2 };
        assert_eq!(
            format!("{err}"),
            "slot 4 out of range for chain of length 2"
        );
    }
}
