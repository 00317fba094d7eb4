//! Building effects and chains from configuration.
//!
//! Setup keys (`length`, `min_delay`/`max_delay`, `mode`) are applied first
//! through the effects' own setters, since they resize buffers or change
//! the filter design. Every other key is matched against the effect's
//! parameter descriptors, converted to the descriptor's unit and clamped.

use voltex_core::{EffectChain, EffectWithParams};
use voltex_effects::{
    BiquadFilter, BitCrusher, Echo, FilterMode, Flanger, Gate, Limiter, Panner, Phaser,
    Retrigger, Sidechain, TapeStop, Wobble,
};

use crate::effect_config::{EffectConfig, ParamValue, parse_param_value};
use crate::error::ConfigError;
use crate::preset::Preset;
use crate::registry::{EffectKind, find_param};

/// Resolve the effect kind a configuration names.
pub fn effect_kind(config: &EffectConfig) -> Result<EffectKind, ConfigError> {
    let name = config.canonical_type();
    EffectKind::from_name(name).ok_or_else(|| ConfigError::UnknownEffect(name.to_string()))
}

/// Build one configured effect.
///
/// `bpm` is needed only when a length or period is written as a beat
/// division. Unknown parameter keys and out-of-range values are logged and
/// skipped or clamped; values that cannot be parsed are errors.
///
/// # Example
///
/// ```rust
/// use voltex_config::{EffectConfig, build_effect};
///
/// let config = EffectConfig::new("echo")
///     .with_param("length", "1/8")
///     .with_param("feedback", "0.4");
/// let echo = build_effect(&config, 48000.0, Some(120.0)).unwrap();
/// assert_eq!(echo.effect_get_param(0), 0.4);
/// ```
pub fn build_effect(
    config: &EffectConfig,
    sample_rate: f32,
    bpm: Option<f32>,
) -> Result<Box<dyn EffectWithParams + Send>, ConfigError> {
    let kind = effect_kind(config)?;
    let frames = |key: &str| frames_param(config, key, sample_rate, bpm);
    let length = |key: &str| frames(key).map(|f| f.map(|f| f.round() as usize));

    let mut effect: Box<dyn EffectWithParams + Send> = match kind {
        EffectKind::Filter => {
            let mut filter = BiquadFilter::new(sample_rate);
            if let Some(raw) = config.get_param("mode") {
                let mode = parse_filter_mode(raw).ok_or_else(|| {
                    ConfigError::invalid_param(
                        kind.name(),
                        "mode",
                        format!(
                            "'{raw}' is not a filter mode (use: peaking, lowpass, highpass, bandpass, identity)"
                        ),
                    )
                })?;
                apply_filter_mode(&mut filter, mode);
            }
            Box::new(filter)
        }
        EffectKind::Panner => Box::new(Panner::new()),
        EffectKind::Limiter => Box::new(Limiter::new(sample_rate)),
        EffectKind::BitCrusher => Box::new(BitCrusher::new()),
        EffectKind::Gate => {
            let mut gate = Gate::new();
            if let Some(len) = length("length")? {
                gate.set_length(len);
            }
            Box::new(gate)
        }
        EffectKind::TapeStop => {
            let mut stop = TapeStop::new();
            if let Some(len) = length("length")? {
                stop.set_length(len);
            }
            Box::new(stop)
        }
        EffectKind::Retrigger => {
            let mut retrigger = Retrigger::new();
            if let Some(len) = length("length")? {
                retrigger.set_length(len);
            }
            Box::new(retrigger)
        }
        EffectKind::Wobble => Box::new(Wobble::new(sample_rate)),
        EffectKind::Phaser => Box::new(Phaser::new(sample_rate)),
        EffectKind::Flanger => {
            let mut flanger = Flanger::new(sample_rate);
            let (min, max) = flanger.delay_range();
            let min = frames("min_delay")?.unwrap_or(min);
            let max = frames("max_delay")?.unwrap_or(max);
            flanger.set_delay_range(min, max);
            Box::new(flanger)
        }
        EffectKind::Echo => {
            let mut echo = Echo::new();
            if let Some(len) = length("length")? {
                echo.set_length(len);
            }
            Box::new(echo)
        }
        EffectKind::Sidechain => {
            let mut sidechain = Sidechain::new();
            if let Some(len) = length("length")? {
                sidechain.set_length(len);
            }
            Box::new(sidechain)
        }
    };

    apply_params(effect.as_mut(), kind, config, sample_rate, bpm)?;

    tracing::debug!(
        effect = kind.name(),
        params = config.params.len(),
        sample_rate,
        "built effect"
    );
    Ok(effect)
}

/// Build the processing chain a preset describes.
///
/// Slots keep preset order and use [`EffectKind::name`] as their id.
/// Effects marked bypassed are built and left bypassed in the chain.
pub fn build_chain(preset: &Preset) -> Result<EffectChain, ConfigError> {
    let sample_rate = preset.sample_rate as f32;
    let mut chain = EffectChain::new();

    for config in &preset.effects {
        let kind = effect_kind(config)?;
        let effect = build_effect(config, sample_rate, preset.bpm)?;
        let index = chain.push(kind.name(), effect);
        if config.is_bypassed() {
            chain.set_bypassed(index, true)?;
        }
    }

    tracing::debug!(preset = %preset.name, slots = chain.len(), "built chain");
    Ok(chain)
}

/// Parse a filter design name.
pub fn parse_filter_mode(value: &str) -> Option<FilterMode> {
    let mode = match value.trim().to_ascii_lowercase().as_str() {
        "peaking" | "peak" | "eq" => FilterMode::Peaking,
        "lowpass" | "lpf" | "lp" => FilterMode::LowPass,
        "highpass" | "hpf" | "hp" => FilterMode::HighPass,
        "bandpass" | "bpf" | "bp" => FilterMode::BandPass,
        "identity" | "off" | "none" => FilterMode::Identity,
        _ => return None,
    };
    Some(mode)
}

fn apply_filter_mode(filter: &mut BiquadFilter, mode: FilterMode) {
    let freq = filter.frequency();
    match mode {
        FilterMode::Identity => filter.set_identity(),
        FilterMode::Peaking => filter.set_peaking(1.0, freq, 0.0),
        FilterMode::LowPass => filter.set_low_pass(0.707, freq),
        FilterMode::HighPass => filter.set_high_pass(0.707, freq),
        FilterMode::BandPass => filter.set_band_pass(1.0, freq),
    }
}

/// A length-like setup value in frames. Plain numbers are frame counts.
fn frames_param(
    config: &EffectConfig,
    key: &str,
    sample_rate: f32,
    bpm: Option<f32>,
) -> Result<Option<f32>, ConfigError> {
    let Some(raw) = config.get_param(key) else {
        return Ok(None);
    };
    let value = parse_param_value(raw).ok_or_else(|| {
        ConfigError::invalid_param(config.canonical_type(), key, format!("cannot parse '{raw}'"))
    })?;

    let frames = match value {
        ParamValue::Number(n) => n.max(0.0),
        _ => value.to_samples(sample_rate, bpm).ok_or_else(|| {
            ConfigError::invalid_param(
                config.canonical_type(),
                key,
                format!("'{raw}' is not a length (use frames, seconds, or a beat division with bpm set)"),
            )
        })? as f32,
    };
    Ok(Some(frames))
}

fn apply_params(
    effect: &mut (dyn EffectWithParams + Send),
    kind: EffectKind,
    config: &EffectConfig,
    sample_rate: f32,
    bpm: Option<f32>,
) -> Result<(), ConfigError> {
    let mut keys: Vec<&String> = config.params.keys().collect();
    keys.sort();

    for key in keys {
        if kind.setup_keys().contains(&key.as_str()) {
            continue;
        }
        let Some(index) = find_param(effect, key) else {
            tracing::warn!(effect = kind.name(), param = %key, "ignoring unknown parameter");
            continue;
        };
        let Some(desc) = effect.effect_param_info(index) else {
            continue;
        };

        let raw = &config.params[key];
        let value = parse_param_value(raw).ok_or_else(|| {
            ConfigError::invalid_param(kind.name(), key.as_str(), format!("cannot parse '{raw}'"))
        })?;
        let resolved = value.resolve(&desc, sample_rate, bpm).ok_or_else(|| {
            ConfigError::invalid_param(
                kind.name(),
                key.as_str(),
                format!("'{raw}' is not a valid {} value", desc.name),
            )
        })?;

        if !desc.contains(resolved) {
            tracing::warn!(
                effect = kind.name(),
                param = %key,
                value = resolved,
                min = desc.min,
                max = desc.max,
                "clamping parameter"
            );
        }
        effect.effect_set_param(index, desc.clamp(resolved));
    }
    Ok(())
}
