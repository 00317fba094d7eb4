//! Lock-free parameter hand-off between the game thread and the audio thread.
//!
//! [`ParamBridge`] stores one atomic `f32` per [`ParameterInfo`] parameter
//! of every chain slot, plus an atomic bypass flag. The game thread calls
//! [`set`](ParamBridge::set) and [`set_bypassed`](ParamBridge::set_bypassed)
//! at any time; the audio thread calls
//! [`EffectChain::sync_from`](crate::EffectChain::sync_from) once per block.
//!
//! Only scalars cross threads. Derived state such as biquad coefficients is
//! recomputed by the effect on the audio thread inside `set_param`, so a
//! block never sees half of a coefficient set. Two different scalars written
//! in quick succession may land in different blocks.
//!
//! Slots are protected by a `parking_lot::RwLock`: value and bypass access
//! take a shared lock, adding and removing slots takes an exclusive lock.
//! The audio-side sync only ever tries the lock; while the game thread is
//! restructuring slots it skips that block and picks the values up on the
//! next one.
//!
//! [`ParameterInfo`]: crate::ParameterInfo

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::RwLock;

use crate::chain::EffectChain;
use crate::param_info::ParamDescriptor;

struct SlotState {
    id: &'static str,
    /// f32 bits, one per parameter.
    values: Vec<AtomicU32>,
    descriptors: Vec<ParamDescriptor>,
    bypassed: AtomicBool,
}

impl SlotState {
    fn new(id: &'static str, descriptors: Vec<ParamDescriptor>, bypassed: bool) -> Self {
        let values = descriptors
            .iter()
            .map(|d| AtomicU32::new(d.default.to_bits()))
            .collect();
        Self {
            id,
            values,
            descriptors,
            bypassed: AtomicBool::new(bypassed),
        }
    }
}

/// Thread-safe parameter store mirroring an [`EffectChain`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use voltex_core::{EffectChain, ParamBridge};
///
/// let mut chain = EffectChain::new();
/// let bridge = Arc::new(ParamBridge::from_chain(&chain));
///
/// let game = Arc::clone(&bridge);
/// std::thread::spawn(move || game.set_bypassed(0, true)).join().unwrap();
///
/// chain.sync_from(&bridge);
/// ```
#[derive(Default)]
pub struct ParamBridge {
    slots: RwLock<Vec<SlotState>>,
}

impl ParamBridge {
    /// Creates an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bridge with one slot per chain slot, initialized to the
    /// effects' current values and bypass flags.
    pub fn from_chain(chain: &EffectChain) -> Self {
        let slots = chain
            .slots()
            .map(|slot| {
                let descriptors: Vec<ParamDescriptor> = (0..slot.effect.effect_param_count())
                    .filter_map(|i| slot.effect.effect_param_info(i))
                    .collect();
                let state = SlotState::new(slot.id, descriptors, slot.bypassed);
                for (i, value) in state.values.iter().enumerate() {
                    value.store(slot.effect.effect_get_param(i).to_bits(), Ordering::Relaxed);
                }
                state
            })
            .collect();
        Self {
            slots: RwLock::new(slots),
        }
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.read().len()
    }

    /// Effect identifier of a slot, `""` if out of range.
    pub fn effect_id(&self, slot: usize) -> &'static str {
        self.slots.read().get(slot).map_or("", |s| s.id)
    }

    /// Parameter count of a slot, 0 if out of range.
    pub fn param_count(&self, slot: usize) -> usize {
        self.slots.read().get(slot).map_or(0, |s| s.descriptors.len())
    }

    /// Descriptor of a parameter.
    pub fn param_descriptor(&self, slot: usize, param: usize) -> Option<ParamDescriptor> {
        self.slots.read()
            .get(slot)
            .and_then(|s| s.descriptors.get(param))
            .copied()
    }

    /// Reads a parameter value; `0.0` if out of range.
    pub fn get(&self, slot: usize, param: usize) -> f32 {
        self.slots.read()
            .get(slot)
            .and_then(|s| s.values.get(param))
            .map_or(0.0, |v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Writes a parameter value, clamped to the descriptor range.
    /// Out-of-range indices are ignored.
    pub fn set(&self, slot: usize, param: usize, value: f32) {
        let slots = self.slots.read();
        if let Some(s) = slots.get(slot)
            && let Some((atomic, desc)) = s.values.get(param).zip(s.descriptors.get(param))
        {
            atomic.store(desc.clamp(value).to_bits(), Ordering::Release);
        }
    }

    /// Whether a slot is bypassed; `false` if out of range.
    pub fn is_bypassed(&self, slot: usize) -> bool {
        self.slots.read()
            .get(slot)
            .is_some_and(|s| s.bypassed.load(Ordering::Acquire))
    }

    /// Sets the bypass flag of a slot.
    pub fn set_bypassed(&self, slot: usize, bypassed: bool) {
        if let Some(s) = self.slots.read().get(slot) {
            s.bypassed.store(bypassed, Ordering::Release);
        }
    }

    /// Appends a slot, returning its index. Values start at the defaults.
    pub fn add_slot(&self, id: &'static str, descriptors: Vec<ParamDescriptor>) -> usize {
        let mut slots = self.slots.write();
        slots.push(SlotState::new(id, descriptors, false));
        slots.len() - 1
    }

    /// Removes a slot, shifting later slots forward like
    /// [`EffectChain::remove`].
    pub fn remove_slot(&self, slot: usize) {
        let mut slots = self.slots.write();
        if slot < slots.len() {
            slots.remove(slot);
        }
    }

    /// Pushes every value and bypass flag into the matching chain slot.
    ///
    /// Parameters whose value already matches are skipped, so effects only
    /// re-derive coefficients on actual changes. Never blocks: if a slot is
    /// being added or removed, nothing is pushed for this block.
    pub fn sync_to_chain(&self, chain: &mut EffectChain) {
        let Some(slots) = self.slots.try_read() else {
            return;
        };
        for (index, state) in slots.iter().enumerate() {
            let Some(slot) = chain.slot_mut(index) else {
                break;
            };
            slot.bypassed = state.bypassed.load(Ordering::Acquire);
            for (param, atomic) in state.values.iter().enumerate() {
                let value = f32::from_bits(atomic.load(Ordering::Acquire));
                if slot.effect.effect_get_param(param) != value {
                    slot.effect.effect_set_param(param, value);
                }
            }
        }
    }
}

impl core::fmt::Debug for ParamBridge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParamBridge")
            .field("slots", &self.slot_count())
            .finish()
    }
}
