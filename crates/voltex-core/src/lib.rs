//! Voltex Core - DSP primitives for the rhythm-game effect chain
//!
//! This crate provides the processing contract and building blocks shared by
//! every effect: interleaved stereo blocks processed in place, with zero
//! allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait: `process_frame`, `process(buffer, frames)`
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Index-based live parameters
//! - [`EffectWithParams`] - Boxed access to both
//! - [`EffectChain`] - Ordered slots with per-slot bypass
//! - [`ParamBridge`] - Atomic parameter hand-off from the game thread (`std`)
//!
//! ## Filters
//!
//! - [`Biquad`] - Direct Form I second-order IIR, RBJ cookbook coefficients
//!
//! ## Buffers
//!
//! - [`RingBuffer`] - Circular stereo frame buffer
//! - [`CaptureBuffer`] - Record-once, replay-by-position buffer
//!
//! ## Modulation
//!
//! - [`Lfo`] - Frame-counting oscillator (sine, triangle)
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for `no_std` + `alloc`
//! targets. [`ParamBridge`] requires `std`.
//!
//! ```toml
//! [dependencies]
//! voltex-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use voltex_core::{Effect, EffectChain, ParamBridge};
//!
//! let mut chain = EffectChain::new();
//! chain.push("echo", Box::new(echo));
//! chain.push("limiter", Box::new(limiter));
//!
//! let bridge = ParamBridge::from_chain(&chain);
//!
//! // audio callback
//! chain.sync_from(&bridge);
//! chain.process(&mut interleaved, frames);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
#[cfg(feature = "std")]
pub mod bridge;
pub mod chain;
pub mod delay;
pub mod effect;
pub mod effect_with_params;
pub mod lfo;
pub mod math;
pub mod param_info;

pub use biquad::{
    Biquad, Coefficients, bandpass_coefficients_bw, highpass_coefficients, lowpass_coefficients,
    peaking_coefficients_bw,
};
#[cfg(feature = "std")]
pub use bridge::ParamBridge;
pub use chain::{ChainError, ChainSlot, EffectChain};
pub use delay::{CaptureBuffer, Frame, RingBuffer};
pub use effect::{Effect, frames_in};
pub use effect_with_params::EffectWithParams;
pub use lfo::{Lfo, LfoWaveform};
pub use math::{
    db_to_linear, flush_denormal, hz_to_omega, lerp, linear_to_db, seconds_to_samples,
    wet_dry_mix, wet_dry_mix_stereo,
};
pub use param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
