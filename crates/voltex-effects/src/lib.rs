//! Voltex Effects - the rhythm-game effect set
//!
//! Every effect implements [`voltex_core::Effect`] (interleaved stereo,
//! processed in place) and [`voltex_core::ParameterInfo`] for live control:
//!
//! - [`BiquadFilter`] - Peaking / low-pass / high-pass / band-pass biquad
//! - [`Panner`] - Linear stereo balance
//! - [`Limiter`] - Instant-attack peak limiter with linear release
//! - [`BitCrusher`] - Sample-and-hold downsampler
//! - [`Gate`] - Periodic trapezoid gate
//! - [`TapeStop`] - Slows playback to a halt
//! - [`Retrigger`] - Captures a segment and loops it
//! - [`Wobble`] - LFO-swept low-pass
//! - [`Phaser`] - Swept all-pass cascade with feedback
//! - [`Flanger`] - Swept short delay with feedback
//! - [`Echo`] - Fixed-length feedback echo
//! - [`Sidechain`] - Scheduled gain ducking
//!
//! Lengths, periods and delays are in frames. Converting seconds or beat
//! divisions to frames is left to the host (see `voltex-config`).
//!
//! ## Example
//!
//! ```rust
//! use voltex_core::{Effect, EffectChain};
//! use voltex_effects::{Echo, Limiter, Sidechain};
//!
//! let mut echo = Echo::new();
//! echo.set_length(12000);
//! echo.set_feedback(0.4);
//!
//! let mut sidechain = Sidechain::new();
//! sidechain.set_length(24000);
//!
//! let mut chain = EffectChain::new();
//! chain.push("echo", Box::new(echo));
//! chain.push("sidechain", Box::new(sidechain));
//! chain.push("limiter", Box::new(Limiter::new(48000.0)));
//!
//! let mut block = vec![0.0f32; 512];
//! chain.process(&mut block, 256);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bitcrusher;
pub mod echo;
pub mod filter;
pub mod flanger;
pub mod gate;
pub mod limiter;
pub mod pan;
pub mod phaser;
pub mod retrigger;
pub mod sidechain;
pub mod tape_stop;
pub mod wobble;

pub use bitcrusher::BitCrusher;
pub use echo::Echo;
pub use filter::{BiquadFilter, FilterMode};
pub use flanger::Flanger;
pub use gate::Gate;
pub use limiter::Limiter;
pub use pan::Panner;
pub use phaser::{AllpassStage, Phaser};
pub use retrigger::{Retrigger, RetriggerState};
pub use sidechain::Sidechain;
pub use tape_stop::TapeStop;
pub use wobble::Wobble;
