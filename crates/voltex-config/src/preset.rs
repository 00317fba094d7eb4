//! Chart presets: the effect chain a song section runs through.
//!
//! A preset names its effects in processing order and carries the two
//! numbers every length depends on, the sample rate and the song tempo.
//! Parameters stay as strings until [`build_chain`](crate::build_chain)
//! resolves them, so a file written for 120 BPM can be re-timed by editing
//! `bpm` alone.
//!
//! ```toml
//! name = "Break 2"
//! bpm = 174.0
//!
//! [[effects]]
//! type = "retrigger"
//! [effects.params]
//! length = "1/4"
//! loops = "8"
//!
//! [[effects]]
//! type = "!echo"        # present but bypassed
//! [effects.params]
//! length = "3/16"
//! ```
//!
//! Omitted `sample_rate` means 48 kHz. Omitted `bpm` is fine as long as no
//! parameter is written as a beat division.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::effect_config::{EffectConfig, parse_param_value};
use crate::error::ConfigError;

/// Sample rate assumed when a preset file does not give one.
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// An ordered effect chain plus the timing it is written against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Display name.
    pub name: String,

    /// Free-form note, omitted from the file when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Frames per second the chain runs at.
    #[serde(default = "Preset::default_sample_rate")]
    pub sample_rate: u32,

    /// Song tempo; required only by beat-division values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f32>,

    /// Effects, first to last.
    #[serde(default)]
    pub effects: Vec<EffectConfig>,
}

impl Preset {
    fn default_sample_rate() -> u32 {
        DEFAULT_SAMPLE_RATE
    }

    /// An empty chain at 48 kHz with no tempo.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            bpm: None,
            effects: Vec::new(),
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Run the chain at another sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the song tempo.
    pub fn with_bpm(mut self, bpm: f32) -> Self {
        self.bpm = Some(bpm);
        self
    }

    /// Append an effect after the current last one.
    pub fn with_effect(mut self, effect: EffectConfig) -> Self {
        self.effects.push(effect);
        self
    }

    /// Parse a preset held in memory.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(ConfigError::from)
    }

    /// Serialize as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::from)
    }

    /// Read and parse a preset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let preset = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::read_file(path, e))
            .and_then(|source| Self::from_toml(&source))?;

        tracing::info!(
            path = %path.display(),
            name = %preset.name,
            effects = preset.effects.len(),
            bpm = ?preset.bpm,
            "loaded preset"
        );
        Ok(preset)
    }

    /// Write the preset to `path`, creating missing directories on the way.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let source = self.to_toml()?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| ConfigError::create_dir(dir, e))?;
        }
        std::fs::write(path, source).map_err(|e| ConfigError::write_file(path, e))?;

        tracing::debug!(path = %path.display(), name = %self.name, "saved preset");
        Ok(())
    }

    /// Resolve a length string (`"1/8"`, `"250ms"`, `"1920"`) to frames at
    /// this preset's sample rate and tempo.
    ///
    /// `None` if the string does not parse, names a non-length unit, or is a
    /// beat division while `bpm` is unset.
    ///
    /// ```rust
    /// use voltex_config::Preset;
    ///
    /// let preset = Preset::new("Verse").with_bpm(120.0);
    /// assert_eq!(preset.frames("1/4"), Some(24000));
    /// assert_eq!(Preset::new("No tempo").frames("1/4"), None);
    /// ```
    pub fn frames(&self, length: &str) -> Option<usize> {
        parse_param_value(length)?.to_samples(self.sample_rate as f32, self.bpm)
    }

    /// Number of effects.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the chain has no effects.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Effect types as written, bypassed ones shown with a leading `!`.
    pub fn effect_types(&self) -> Vec<String> {
        self.effects.iter().map(EffectConfig::display_type).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAK: &str = r#"
name = "Break 2"
bpm = 174.0

[[effects]]
type = "retrigger"
[effects.params]
length = "1/4"
loops = "8"

[[effects]]
type = "echo"
bypassed = true
[effects.params]
length = "3/16"
"#;

    #[test]
    fn test_file_fields_and_defaults() {
        let preset = Preset::from_toml(BREAK).unwrap();
        assert_eq!(preset.name, "Break 2");
        assert_eq!(preset.description, None);
        assert_eq!(preset.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(preset.bpm, Some(174.0));
        assert_eq!(preset.len(), 2);

        let retrigger = &preset.effects[0];
        assert_eq!(retrigger.get_param("loops"), Some("8"));
        assert!(!retrigger.is_bypassed());
        assert!(preset.effects[1].is_bypassed());
        assert_eq!(preset.effect_types(), vec!["retrigger", "!echo"]);
    }

    #[test]
    fn test_name_is_required() {
        let err = Preset::from_toml("[[effects]]\ntype = \"gate\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_unset_fields_not_written() {
        let source = Preset::new("Intro")
            .with_effect(EffectConfig::new("limiter"))
            .to_toml()
            .unwrap();
        assert!(source.contains("name = \"Intro\""));
        assert!(source.contains("sample_rate = 48000"));
        assert!(!source.contains("description"));
        assert!(!source.contains("bpm"));
    }

    #[test]
    fn test_built_preset_reparses_equal() {
        let preset = Preset::new("Outro")
            .with_description("Slow the tape out")
            .with_sample_rate(44100)
            .with_bpm(92.5)
            .with_effect(EffectConfig::new("wobble").with_param("period", "1/8"))
            .with_effect(EffectConfig::new("!tape_stop").with_param("length", "2s"));

        let reparsed = Preset::from_toml(&preset.to_toml().unwrap()).unwrap();
        assert_eq!(reparsed, preset);
        assert_eq!(reparsed.effect_types(), vec!["wobble", "!tape_stop"]);
    }

    #[test]
    fn test_frames_follow_tempo_and_rate() {
        let preset = Preset::new("Timing").with_sample_rate(44100).with_bpm(147.0);
        assert_eq!(preset.frames("1/4"), Some(18000));
        assert_eq!(preset.frames("500ms"), Some(22050));
        assert_eq!(preset.frames("64"), Some(64));
        assert_eq!(preset.frames("300Hz"), None);
        assert_eq!(preset.frames("soon"), None);
    }

    #[test]
    fn test_new_is_empty() {
        let preset = Preset::new("Blank");
        assert!(preset.is_empty());
        assert_eq!(preset.frames("1/4"), None);
    }
}
