//! Integration tests for voltex-config.
//!
//! These tests verify end-to-end functionality across modules: preset
//! files on disk, unit conversion into effect settings, and chain building.

use proptest::prelude::*;
use tempfile::TempDir;
use voltex_config::{
    ConfigError, EffectConfig, EffectKind, ParamValue, Preset, build_chain, build_effect,
    parse_param_value, validate_preset,
};
use voltex_core::Effect;

const PRESET_TOML: &str = r#"
name = "Chorus Drop"
description = "Gated echo with a ducked tail"
sample_rate = 48000
bpm = 150.0

[[effects]]
type = "gate"
[effects.params]
length = "1/16"
low = "20%"

[[effects]]
type = "echo"
[effects.params]
length = "3/16"
feedback = "0.45"

[[effects]]
type = "!phaser"
[effects.params]
period = "1/2"
depth = "80%"

[[effects]]
type = "limiter"
[effects.params]
release = "200ms"
"#;

fn sine_block(frames: usize) -> Vec<f32> {
    (0..frames)
        .flat_map(|i| {
            let s = (i as f32 * 0.05).sin() * 0.8;
            [s, s]
        })
        .collect()
}

/// Save to a nested path, reload, and compare.
#[test]
fn test_preset_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("presets").join("drop.toml");

    let preset = Preset::from_toml(PRESET_TOML).unwrap();
    preset.save(&path).unwrap();
    assert!(path.exists());

    let loaded = Preset::load(&path).unwrap();
    assert_eq!(loaded, preset);
    assert_eq!(loaded.effect_types(), vec!["gate", "echo", "!phaser", "limiter"]);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Preset::load(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn test_load_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "name = [unterminated").unwrap();
    assert!(matches!(Preset::load(&path), Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_preset_to_chain_processing() {
    let preset = Preset::from_toml(PRESET_TOML).unwrap();
    assert_eq!(validate_preset(&preset), Ok(()));

    let mut chain = build_chain(&preset).unwrap();
    assert_eq!(chain.len(), 4);
    assert!(chain.is_bypassed(2));

    let mut buffer = sine_block(4096);
    chain.process(&mut buffer, 4096);

    assert!(buffer.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
    assert!(buffer.iter().any(|&s| s != 0.0));
}

/// A quarter note at 120 BPM is 24000 frames at 48 kHz, so the first
/// repeat of an impulse lands exactly there.
#[test]
fn test_beat_length_sets_echo_delay() {
    let config = EffectConfig::new("echo")
        .with_param("length", "1/4")
        .with_param("feedback", "0.5");
    let mut echo = build_effect(&config, 48000.0, Some(120.0)).unwrap();

    let frames = 24001;
    let mut buffer = vec![0.0f32; frames * 2];
    buffer[0] = 1.0;
    buffer[1] = 1.0;
    echo.process(&mut buffer, frames);

    assert_eq!(buffer[0], 1.0);
    assert!(buffer[2..48000].iter().all(|&s| s == 0.0));
    assert_eq!(buffer[48000], 0.5);
    assert_eq!(buffer[48001], 0.5);
}

#[test]
fn test_seconds_and_beats_to_samples() {
    assert_eq!(
        parse_param_value("250ms").unwrap().to_samples(44100.0, None),
        Some(11025)
    );
    assert_eq!(
        parse_param_value("1/8").unwrap().to_samples(48000.0, Some(150.0)),
        Some(9600)
    );
    assert_eq!(
        parse_param_value("1920").unwrap().to_samples(48000.0, None),
        Some(1920)
    );
    assert_eq!(parse_param_value("1/8").unwrap().to_samples(48000.0, None), None);
}

#[test]
fn test_unknown_effect_error() {
    let preset = Preset::new("Bad").with_effect(EffectConfig::new("reverb"));
    let err = build_chain(&preset).unwrap_err();
    assert_eq!(err.to_string(), "unknown effect type: reverb");
    assert!(validate_preset(&preset).is_err());
}

/// Every hold-note effect code builds a working effect by name.
#[test]
fn test_hold_effect_codes_build() {
    let mut built = 0;
    for code in 0..=20u8 {
        let Some(kind) = EffectKind::from_hold_effect_code(code) else {
            continue;
        };
        let config = EffectConfig::new(kind.name());
        let mut effect = build_effect(&config, 48000.0, None).unwrap();
        let mut buffer = sine_block(256);
        effect.process(&mut buffer, 256);
        assert!(buffer.iter().all(|s| s.is_finite()), "code {code}");
        built += 1;
    }
    assert_eq!(built, 13);
}

proptest! {
    /// Seconds convert to the nearest whole frame.
    #[test]
    fn seconds_round_to_nearest_frame(
        seconds in 0.0f32..10.0,
        sample_rate in prop::sample::select(vec![22050.0f32, 44100.0, 48000.0, 96000.0]),
    ) {
        let samples = ParamValue::Seconds(seconds).to_samples(sample_rate, None).unwrap();
        let exact = seconds * sample_rate;
        prop_assert!((samples as f32 - exact).abs() <= 0.5 + exact * 1e-6);
    }

    /// Arbitrary strings never panic the parser.
    #[test]
    fn parser_never_panics(input in ".{0,16}") {
        let _ = parse_param_value(&input);
    }
}
