//! Parameter introspection for effects.
//!
//! [`ParameterInfo`] exposes an effect's live scalar parameters by index so
//! that presets, the cross-thread [`ParamBridge`](crate::ParamBridge) and
//! gameplay code can read and write them without knowing the concrete type.
//!
//! Only parameters that are safe to change between any two blocks are
//! exposed here. Parameters that size internal buffers (`set_length`,
//! `set_delay_range`) are reconfiguration events and live on dedicated
//! setters of each effect instead.
//!
//! # Example
//!
//! ```rust
//! use voltex_core::{ParameterInfo, ParamDescriptor};
//!
//! struct Trim {
//!     gain: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::custom("Gain", "Gain", 0.0, 2.0, 1.0)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain = value.clamp(0.0, 2.0);
//!         }
//!     }
//! }
//!
//! let mut trim = Trim { gain: 1.0 };
//! trim.set_param(0, 5.0);
//! assert_eq!(trim.get_param(0), 2.0);
//! assert_eq!(trim.find_param_by_name("gain"), Some(0));
//! ```

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

/// Unit type for parameter display and config parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels, for gain parameters.
    Decibels,
    /// Hertz, for filter frequencies.
    Hertz,
    /// Seconds, for time parameters that are not buffer lengths.
    Seconds,
    /// Sample frames, for LFO periods and similar counters.
    Samples,
    /// Normalized amount in `[0, 1]` (mix, depth, feedback).
    Ratio,
    /// No unit.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use voltex_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Seconds => " s",
            ParamUnit::Samples => " smp",
            ParamUnit::Ratio | ParamUnit::None => "",
        }
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name (e.g. "Feedback").
    pub name: &'static str,
    /// Short name, max 8 characters. Also accepted as a lookup key.
    pub short_name: &'static str,
    /// Unit type for formatting and parsing.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value after construction.
    pub default: f32,
    /// Recommended increment for stepped controls.
    pub step: f32,
}

impl ParamDescriptor {
    /// Unitless parameter with custom range.
    pub const fn custom(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
        }
    }

    /// Normalized amount in `[0, 1]`.
    pub const fn ratio(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self::custom(name, short_name, 0.0, 1.0, default).with_unit(ParamUnit::Ratio)
    }

    /// Standard wet/dry mix in `[0, 1]`.
    pub const fn mix(default: f32) -> Self {
        Self::ratio("Mix", "Mix", default)
    }

    /// Frequency parameter in Hz.
    pub const fn frequency(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::custom(name, short_name, min, max, default)
            .with_unit(ParamUnit::Hertz)
            .with_step(1.0)
    }

    /// Gain parameter in dB.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::custom(name, short_name, min, max, default)
            .with_unit(ParamUnit::Decibels)
            .with_step(0.1)
    }

    /// Period in sample frames.
    pub const fn samples(
        name: &'static str,
        short_name: &'static str,
        max: f32,
        default: f32,
    ) -> Self {
        Self::custom(name, short_name, 0.0, max, default)
            .with_unit(ParamUnit::Samples)
            .with_step(1.0)
    }

    /// Replaces the unit.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Replaces the step size.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Clamps a value to `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Maps a plain value to `[0, 1]`.
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (value - self.min) / range
    }

    /// Inverse of [`normalize`](Self::normalize).
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized * (self.max - self.min)
    }

    /// Formats a value with the unit suffix.
    ///
    /// ```rust
    /// use voltex_core::ParamDescriptor;
    ///
    /// let freq = ParamDescriptor::frequency("Frequency", "Freq", 20.0, 20000.0, 1000.0);
    /// assert_eq!(freq.format_value(440.0), "440 Hz");
    /// ```
    pub fn format_value(&self, value: f32) -> String {
        match self.unit {
            ParamUnit::Hertz | ParamUnit::Samples => {
                format!("{:.0}{}", value, self.unit.suffix())
            }
            ParamUnit::Decibels => format!("{:.1}{}", value, self.unit.suffix()),
            _ => format!("{:.2}{}", value, self.unit.suffix()),
        }
    }
}

/// Trait for effects that expose introspectable parameters.
///
/// Indices are stable for the lifetime of an effect instance.
/// Implementations clamp on `set_param` and ignore out-of-range indices.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index`; `0.0` if out of range.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamped to its range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Finds a parameter index by name or short name (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name) || desc.short_name.eq_ignore_ascii_case(name)
            })
        })
    }
}
