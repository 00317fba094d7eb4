//! Effect and preset validation.
//!
//! Validation reports every problem in a preset at once, where
//! [`build_chain`](crate::build_chain) stops at the first hard error and
//! silently clamps out-of-range values.
//!
//! # Example
//!
//! ```rust
//! use voltex_config::{validate_effect, validate_preset, EffectConfig, Preset};
//!
//! validate_effect("phaser").expect("phaser should exist");
//!
//! let preset = Preset::new("Check")
//!     .with_effect(EffectConfig::new("echo").with_param("feedback", "2.0"));
//! assert!(validate_preset(&preset).is_err());
//! ```

use thiserror::Error;

use crate::builder::parse_filter_mode;
use crate::effect_config::{EffectConfig, ParamValue, parse_param_value};
use crate::preset::Preset;
use crate::registry::{EffectKind, find_param};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown effect type.
    #[error("unknown effect type: {0}")]
    UnknownEffect(String),

    /// Unknown parameter name.
    #[error("unknown parameter '{param}' for effect '{effect}'")]
    UnknownParameter {
        /// Name of the effect.
        effect: String,
        /// Name of the unrecognized parameter.
        param: String,
    },

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate that an effect type exists.
///
/// ```rust
/// use voltex_config::validate_effect;
///
/// assert!(validate_effect("tape_stop").is_ok());
/// assert!(validate_effect("reverb").is_err());
/// ```
pub fn validate_effect(effect_type: &str) -> ValidationResult<()> {
    EffectKind::from_name(effect_type)
        .map(|_| ())
        .ok_or_else(|| ValidationError::UnknownEffect(effect_type.to_string()))
}

/// Validate one effect configuration at the given sample rate and tempo.
pub fn validate_effect_config(
    config: &EffectConfig,
    sample_rate: f32,
    bpm: Option<f32>,
) -> ValidationResult<()> {
    let mut errors = Vec::new();
    check_effect_config(config, sample_rate, bpm, &mut errors);
    into_result(errors)
}

/// Validate a preset's effects and parameters.
///
/// Checks that every effect exists, every parameter key names a parameter
/// of its effect, every value parses into a unit that parameter accepts,
/// and every live value lies within its descriptor's range.
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let sample_rate = preset.sample_rate as f32;
    let mut errors = Vec::new();

    if sample_rate <= 0.0 {
        errors.push(ValidationError::InvalidFormat {
            param: "sample_rate".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if let Some(bpm) = preset.bpm
        && !(bpm.is_finite() && bpm > 0.0)
    {
        errors.push(ValidationError::InvalidFormat {
            param: "bpm".to_string(),
            reason: format!("{bpm} is not a positive tempo"),
        });
    }

    for config in &preset.effects {
        check_effect_config(config, sample_rate, preset.bpm, &mut errors);
    }
    into_result(errors)
}

fn check_effect_config(
    config: &EffectConfig,
    sample_rate: f32,
    bpm: Option<f32>,
    errors: &mut Vec<ValidationError>,
) {
    let name = config.canonical_type();
    let Some(kind) = EffectKind::from_name(name) else {
        errors.push(ValidationError::UnknownEffect(name.to_string()));
        return;
    };
    let effect = kind.create(sample_rate);

    let mut keys: Vec<&String> = config.params.keys().collect();
    keys.sort();

    for key in keys {
        let raw = &config.params[key];

        if kind.setup_keys().contains(&key.as_str()) {
            if let Err(e) = check_setup_value(key, raw, sample_rate, bpm) {
                errors.push(e);
            }
            continue;
        }

        let Some(desc) = find_param(effect.as_ref(), key).and_then(|i| effect.effect_param_info(i))
        else {
            errors.push(ValidationError::UnknownParameter {
                effect: kind.name().to_string(),
                param: key.clone(),
            });
            continue;
        };

        let Some(value) = parse_param_value(raw) else {
            errors.push(invalid_format(key, format!("cannot parse '{raw}'")));
            continue;
        };
        let Some(resolved) = value.resolve(&desc, sample_rate, bpm) else {
            errors.push(invalid_format(
                key,
                format!("'{raw}' is not a valid {} value", desc.name),
            ));
            continue;
        };
        if !desc.contains(resolved) {
            errors.push(ValidationError::OutOfRange {
                param: key.clone(),
                value: resolved,
                min: desc.min,
                max: desc.max,
            });
        }
    }
}

fn check_setup_value(
    key: &str,
    raw: &str,
    sample_rate: f32,
    bpm: Option<f32>,
) -> ValidationResult<()> {
    if key == "mode" {
        return parse_filter_mode(raw)
            .map(|_| ())
            .ok_or_else(|| invalid_format(key, format!("'{raw}' is not a filter mode")));
    }

    match parse_param_value(raw) {
        Some(ParamValue::Number(n)) if n < 0.0 => {
            Err(invalid_format(key, format!("length {n} is negative")))
        }
        Some(ParamValue::Number(_)) => Ok(()),
        Some(value) => value.to_samples(sample_rate, bpm).map(|_| ()).ok_or_else(|| {
            invalid_format(
                key,
                format!("'{raw}' is not a length (use frames, seconds, or a beat division with bpm set)"),
            )
        }),
        None => Err(invalid_format(key, format!("cannot parse '{raw}'"))),
    }
}

fn invalid_format(param: &str, reason: String) -> ValidationError {
    ValidationError::InvalidFormat {
        param: param.to_string(),
        reason,
    }
}

fn into_result(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_known_effects() {
        for kind in EffectKind::ALL {
            assert!(validate_effect(kind.name()).is_ok(), "{kind}");
        }
        assert_eq!(
            validate_effect("chorus"),
            Err(ValidationError::UnknownEffect("chorus".to_string()))
        );
    }

    #[test]
    fn test_valid_config() {
        let config = EffectConfig::new("flanger")
            .with_param("min_delay", "1ms")
            .with_param("max_delay", "240")
            .with_param("mix", "50%")
            .with_param("period", "2s");
        assert_eq!(validate_effect_config(&config, 48000.0, None), Ok(()));
    }

    #[test]
    fn test_unknown_parameter() {
        let config = EffectConfig::new("gate").with_param("attack", "0.5");
        assert_eq!(
            validate_effect_config(&config, 48000.0, None),
            Err(ValidationError::UnknownParameter {
                effect: "gate".to_string(),
                param: "attack".to_string(),
            })
        );
    }

    #[test]
    fn test_out_of_range() {
        let config = EffectConfig::new("panner").with_param("pan", "1.5");
        assert_eq!(
            validate_effect_config(&config, 48000.0, None),
            Err(ValidationError::OutOfRange {
                param: "pan".to_string(),
                value: 1.5,
                min: -1.0,
                max: 1.0,
            })
        );
    }

    #[test]
    fn test_setup_values() {
        let beat = EffectConfig::new("retrigger").with_param("length", "1/4");
        assert!(validate_effect_config(&beat, 48000.0, None).is_err());
        assert!(validate_effect_config(&beat, 48000.0, Some(120.0)).is_ok());

        let negative = EffectConfig::new("echo").with_param("length", "-10");
        assert!(matches!(
            validate_effect_config(&negative, 48000.0, None),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let mode = EffectConfig::new("filter").with_param("mode", "notch");
        assert!(validate_effect_config(&mode, 48000.0, None).is_err());
    }

    #[test]
    fn test_preset_collects_all_errors() {
        let preset = Preset::new("Broken")
            .with_effect(EffectConfig::new("reverb"))
            .with_effect(EffectConfig::new("echo").with_param("feedback", "loud"))
            .with_effect(EffectConfig::new("limiter").with_param("release", "0.1"));

        match validate_preset(&preset) {
            Err(ValidationError::Multiple(errors)) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0], ValidationError::UnknownEffect("reverb".to_string()));
                assert!(matches!(errors[1], ValidationError::InvalidFormat { .. }));
            }
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn test_preset_tempo_checked() {
        let preset = Preset::new("Tempo").with_bpm(-10.0);
        assert!(matches!(
            validate_preset(&preset),
            Err(ValidationError::InvalidFormat { ref param, .. }) if param == "bpm"
        ));
    }

    #[test]
    fn test_multiple_display() {
        let err = ValidationError::Multiple(vec![
            ValidationError::UnknownEffect("a".to_string()),
            ValidationError::UnknownEffect("b".to_string()),
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: unknown effect type: a; unknown effect type: b"
        );
    }
}
