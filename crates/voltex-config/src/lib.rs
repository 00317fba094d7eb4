//! Preset files and chain construction for voltex effects.
//!
//! The DSP crates take every length in sample frames. This crate is where
//! musical units become frames: preset parameters may be written as
//! seconds, milliseconds, Hz, dB, percentages or beat divisions, and are
//! converted against the preset's sample rate and tempo when the chain is
//! built.
//!
//! # Features
//!
//! - **Presets**: Load and save effect chains as TOML
//! - **Units**: [`parse_param_value`] and [`ParamValue::to_samples`]
//! - **Registry**: [`EffectKind`] names every effect and maps beatmap
//!   hold-effect codes onto them
//! - **Validation**: Report every unknown effect, unknown parameter and
//!   out-of-range value in a preset
//!
//! # Example
//!
//! ```rust
//! use voltex_config::{EffectConfig, Preset, build_chain};
//! use voltex_core::Effect;
//!
//! let preset = Preset::new("Drop")
//!     .with_bpm(174.0)
//!     .with_effect(
//!         EffectConfig::new("echo")
//!             .with_param("length", "3/16")
//!             .with_param("feedback", "40%"),
//!     )
//!     .with_effect(EffectConfig::new("sidechain").with_param("length", "1/4"))
//!     .with_effect(EffectConfig::new("limiter"));
//!
//! let mut chain = build_chain(&preset).unwrap();
//! let mut block = vec![0.0f32; 1024];
//! chain.process(&mut block, 512);
//! ```

mod builder;
mod effect_config;
mod error;
mod preset;
mod registry;

/// Effect and preset validation.
pub mod validation;

pub use builder::{build_chain, build_effect, effect_kind, parse_filter_mode};
pub use effect_config::{EffectConfig, ParamValue, parse_param_value};
pub use error::ConfigError;
pub use preset::{DEFAULT_SAMPLE_RATE, Preset};
pub use registry::EffectKind;
pub use validation::{
    ValidationError, ValidationResult, validate_effect, validate_effect_config, validate_preset,
};
