//! Effect configuration types and parameter value parsing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use voltex_core::{ParamDescriptor, ParamUnit, db_to_linear, seconds_to_samples};

/// Configuration for a single effect in a preset.
///
/// Each effect has a type identifier and optional parameters. Effects can be
/// bypassed by prefixing the type with `!` (e.g., `!echo`).
///
/// # Example
///
/// ```rust
/// use voltex_config::EffectConfig;
///
/// let config = EffectConfig::new("echo")
///     .with_param("length", "1/8")
///     .with_param("feedback", "40%");
///
/// assert_eq!(config.effect_type, "echo");
/// assert!(!config.bypassed);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EffectConfig {
    /// Effect type name (e.g., "echo", "phaser").
    /// Use `!` prefix to bypass (e.g., "!phaser").
    #[serde(rename = "type")]
    pub effect_type: String,

    /// Whether the effect is bypassed.
    #[serde(default)]
    pub bypassed: bool,

    /// Effect parameters as key-value pairs.
    /// Values are strings so units and beat divisions survive the file format.
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl EffectConfig {
    /// Create a new effect configuration.
    ///
    /// If the type starts with `!`, the effect will be marked as bypassed.
    pub fn new(effect_type: impl Into<String>) -> Self {
        let type_str = effect_type.into();
        let (effect_type, bypassed) = if let Some(stripped) = type_str.strip_prefix('!') {
            (stripped.to_string(), true)
        } else {
            (type_str, false)
        };

        Self {
            effect_type,
            bypassed,
            params: HashMap::new(),
        }
    }

    /// Add a parameter to the configuration.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set whether the effect is bypassed.
    pub fn with_bypass(mut self, bypassed: bool) -> Self {
        self.bypassed = bypassed;
        self
    }

    /// Get a raw parameter string.
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Set a parameter value.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Parse a parameter into a [`ParamValue`].
    ///
    /// Returns `None` if the key is missing or the value is not understood.
    pub fn parse_param(&self, key: &str) -> Option<ParamValue> {
        parse_param_value(self.params.get(key)?)
    }

    /// Effect type without the bypass prefix.
    ///
    /// Hand-written TOML may carry `type = "!echo"`; serde does not go
    /// through [`new`](Self::new), so the prefix is stripped here too.
    pub fn canonical_type(&self) -> &str {
        self.effect_type
            .strip_prefix('!')
            .unwrap_or(&self.effect_type)
    }

    /// Whether the effect should start bypassed.
    pub fn is_bypassed(&self) -> bool {
        self.bypassed || self.effect_type.starts_with('!')
    }

    /// Get the effect type string for display (with ! prefix if bypassed).
    pub fn display_type(&self) -> String {
        if self.is_bypassed() {
            format!("!{}", self.canonical_type())
        } else {
            self.canonical_type().to_string()
        }
    }
}

/// A parsed parameter value, keeping the unit it was written in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Plain number, taken as-is.
    Number(f32),
    /// Percentage, stored as a ratio (`50%` is `0.5`).
    Ratio(f32),
    /// Gain in decibels.
    Decibels(f32),
    /// Duration in seconds (`ms` is converted).
    Seconds(f32),
    /// Frequency in Hz (`kHz` is converted).
    Hertz(f32),
    /// Beat division as a fraction of a whole note (`1/4` is `0.25`).
    Beats(f32),
}

impl ParamValue {
    /// Plain scalar value.
    ///
    /// Decibels convert to linear gain. Seconds, Hz and beat fractions are
    /// returned in their own unit.
    pub fn value(&self) -> f32 {
        match *self {
            ParamValue::Decibels(db) => db_to_linear(db),
            ParamValue::Number(v)
            | ParamValue::Ratio(v)
            | ParamValue::Seconds(v)
            | ParamValue::Hertz(v)
            | ParamValue::Beats(v) => v,
        }
    }

    /// Duration in seconds.
    ///
    /// Beat divisions need `bpm`; a whole note spans four beats. Plain
    /// numbers are read as seconds. Other units are not durations.
    pub fn to_seconds(&self, bpm: Option<f32>) -> Option<f32> {
        match *self {
            ParamValue::Seconds(s) | ParamValue::Number(s) => Some(s),
            ParamValue::Beats(fraction) => {
                let bpm = bpm.filter(|b| b.is_finite() && *b > 0.0)?;
                Some(fraction * 240.0 / bpm)
            }
            _ => None,
        }
    }

    /// Length in sample frames.
    ///
    /// Plain numbers are already frame counts and are rounded. Seconds and
    /// beat divisions are converted at `sample_rate`. Negative values give 0.
    ///
    /// ```rust
    /// use voltex_config::ParamValue;
    ///
    /// assert_eq!(ParamValue::Seconds(0.5).to_samples(48000.0, None), Some(24000));
    /// assert_eq!(ParamValue::Beats(0.25).to_samples(48000.0, Some(120.0)), Some(24000));
    /// assert_eq!(ParamValue::Beats(0.25).to_samples(48000.0, None), None);
    /// ```
    pub fn to_samples(&self, sample_rate: f32, bpm: Option<f32>) -> Option<usize> {
        match *self {
            ParamValue::Number(n) => {
                if n.is_finite() && n > 0.0 {
                    Some(n.round() as usize)
                } else {
                    Some(0)
                }
            }
            ParamValue::Seconds(_) | ParamValue::Beats(_) => {
                let seconds = self.to_seconds(bpm)?;
                Some(seconds_to_samples(seconds, sample_rate))
            }
            _ => None,
        }
    }

    /// Value in the unit `desc` expects, before clamping.
    ///
    /// A `Samples` parameter accepts frame counts, seconds and beat
    /// divisions. A `Seconds` parameter accepts seconds and beat divisions.
    /// A `Decibels` parameter keeps dB values in dB. Everything else takes
    /// [`value`](Self::value).
    pub fn resolve(&self, desc: &ParamDescriptor, sample_rate: f32, bpm: Option<f32>) -> Option<f32> {
        match desc.unit {
            ParamUnit::Samples => match self {
                ParamValue::Number(n) => Some(*n),
                _ => self.to_samples(sample_rate, bpm).map(|s| s as f32),
            },
            ParamUnit::Seconds => self.to_seconds(bpm),
            ParamUnit::Decibels => match self {
                ParamValue::Decibels(db) | ParamValue::Number(db) => Some(*db),
                _ => None,
            },
            _ => match self {
                ParamValue::Seconds(_) | ParamValue::Beats(_) => None,
                _ => Some(self.value()),
            },
        }
    }
}

/// Parse a parameter value string.
///
/// Supports:
/// - Plain numbers: "0.5", "1200", "-0.3"
/// - Percentages: "50%", "120%"
/// - Decibels: "-6dB", "+3dB"
/// - Time: "100ms", "1.5s"
/// - Frequency: "440Hz", "1.2kHz"
/// - Beat divisions: "1/4", "3/16"
pub fn parse_param_value(value: &str) -> Option<ParamValue> {
    let value = value.trim();

    if let Some(pct) = value.strip_suffix('%') {
        return parse_number(pct).map(|v| ParamValue::Ratio(v / 100.0));
    }

    if let Some(db) = value
        .strip_suffix("dB")
        .or_else(|| value.strip_suffix("db"))
    {
        return parse_number(db).map(ParamValue::Decibels);
    }

    if let Some(ms) = value.strip_suffix("ms") {
        return parse_number(ms).map(|v| ParamValue::Seconds(v / 1000.0));
    }

    if let Some(s) = value.strip_suffix('s') {
        return parse_number(s).map(ParamValue::Seconds);
    }

    if let Some(khz) = value
        .strip_suffix("kHz")
        .or_else(|| value.strip_suffix("khz"))
    {
        return parse_number(khz).map(|v| ParamValue::Hertz(v * 1000.0));
    }

    if let Some(hz) = value
        .strip_suffix("Hz")
        .or_else(|| value.strip_suffix("hz"))
    {
        return parse_number(hz).map(ParamValue::Hertz);
    }

    if let Some((num, den)) = value.split_once('/') {
        let num = parse_number(num)?;
        let den = parse_number(den)?;
        if den <= 0.0 || num < 0.0 {
            return None;
        }
        return Some(ParamValue::Beats(num / den));
    }

    parse_number(value).map(ParamValue::Number)
}

fn parse_number(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_config_new() {
        let config = EffectConfig::new("echo");
        assert_eq!(config.effect_type, "echo");
        assert!(!config.bypassed);
        assert!(config.params.is_empty());
    }

    #[test]
    fn test_effect_config_bypassed_prefix() {
        let config = EffectConfig::new("!phaser");
        assert_eq!(config.effect_type, "phaser");
        assert!(config.bypassed);
        assert!(config.is_bypassed());
    }

    #[test]
    fn test_prefix_from_toml_is_honoured() {
        let config: EffectConfig = toml::from_str("type = \"!gate\"").unwrap();
        assert_eq!(config.canonical_type(), "gate");
        assert!(config.is_bypassed());
        assert_eq!(config.display_type(), "!gate");
    }

    #[test]
    fn test_effect_config_with_params() {
        let config = EffectConfig::new("wobble")
            .with_param("min_freq", "200Hz")
            .with_param("mix", "80%");

        assert_eq!(config.get_param("min_freq"), Some("200Hz"));
        assert_eq!(config.get_param("mix"), Some("80%"));
        assert_eq!(config.get_param("missing"), None);
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_param_value("0.5"), Some(ParamValue::Number(0.5)));
        assert_eq!(parse_param_value("1200"), Some(ParamValue::Number(1200.0)));
        assert_eq!(parse_param_value("-0.3"), Some(ParamValue::Number(-0.3)));
        assert_eq!(parse_param_value("  0.5  "), Some(ParamValue::Number(0.5)));
    }

    #[test]
    fn test_parse_percentages() {
        assert_eq!(parse_param_value("50%"), Some(ParamValue::Ratio(0.5)));
        assert_eq!(parse_param_value("100%"), Some(ParamValue::Ratio(1.0)));
        assert_eq!(parse_param_value("0%"), Some(ParamValue::Ratio(0.0)));
    }

    #[test]
    fn test_parse_decibels() {
        assert_eq!(parse_param_value("-6dB"), Some(ParamValue::Decibels(-6.0)));
        assert_eq!(parse_param_value("+3db"), Some(ParamValue::Decibels(3.0)));

        let gain = parse_param_value("-6dB").unwrap().value();
        assert!((gain - 0.5).abs() < 0.05);
        let unity = parse_param_value("0dB").unwrap().value();
        assert!((unity - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_param_value("100ms"), Some(ParamValue::Seconds(0.1)));
        assert_eq!(parse_param_value("1.5s"), Some(ParamValue::Seconds(1.5)));
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!(parse_param_value("440Hz"), Some(ParamValue::Hertz(440.0)));
        assert_eq!(parse_param_value("440hz"), Some(ParamValue::Hertz(440.0)));
        assert_eq!(parse_param_value("1.5kHz"), Some(ParamValue::Hertz(1500.0)));
    }

    #[test]
    fn test_parse_beat_divisions() {
        assert_eq!(parse_param_value("1/4"), Some(ParamValue::Beats(0.25)));
        assert_eq!(parse_param_value("3/16"), Some(ParamValue::Beats(0.1875)));
        assert_eq!(parse_param_value("1/0"), None);
        assert_eq!(parse_param_value("-1/4"), None);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_param_value("invalid"), None);
        assert_eq!(parse_param_value("abc%"), None);
        assert_eq!(parse_param_value("NaN"), None);
        assert_eq!(parse_param_value(""), None);
    }

    #[test]
    fn test_to_samples() {
        assert_eq!(ParamValue::Number(1200.4).to_samples(48000.0, None), Some(1200));
        assert_eq!(ParamValue::Number(-5.0).to_samples(48000.0, None), Some(0));
        assert_eq!(ParamValue::Seconds(0.1).to_samples(48000.0, None), Some(4800));
        // Quarter note at 120 BPM is half a second.
        assert_eq!(ParamValue::Beats(0.25).to_samples(44100.0, Some(120.0)), Some(22050));
        assert_eq!(ParamValue::Beats(0.25).to_samples(44100.0, Some(0.0)), None);
        assert_eq!(ParamValue::Hertz(440.0).to_samples(48000.0, None), None);
    }

    #[test]
    fn test_resolve_by_unit() {
        let samples = ParamDescriptor::samples("Period", "Period", 96000.0, 0.0);
        let ratio = ParamDescriptor::ratio("Gain", "Gain", 0.5);
        let db = ParamDescriptor::gain_db("Gain", "Gain", -48.0, 48.0, 0.0);

        assert_eq!(ParamValue::Seconds(0.5).resolve(&samples, 48000.0, None), Some(24000.0));
        assert_eq!(ParamValue::Number(300.0).resolve(&samples, 48000.0, None), Some(300.0));
        assert_eq!(ParamValue::Ratio(0.25).resolve(&ratio, 48000.0, None), Some(0.25));
        assert_eq!(ParamValue::Decibels(-6.0).resolve(&db, 48000.0, None), Some(-6.0));
        assert_eq!(ParamValue::Seconds(1.0).resolve(&ratio, 48000.0, None), None);
        assert_eq!(ParamValue::Ratio(0.5).resolve(&db, 48000.0, None), None);
    }

    #[test]
    fn test_config_parse_param() {
        let config = EffectConfig::new("echo")
            .with_param("length", "1/8")
            .with_param("feedback", "-6dB");

        assert_eq!(config.parse_param("length"), Some(ParamValue::Beats(0.125)));
        let fb = config.parse_param("feedback").unwrap().value();
        assert!((fb - 0.5).abs() < 0.05);
        assert!(config.parse_param("missing").is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = EffectConfig::new("flanger")
            .with_param("mix", "0.7")
            .with_bypass(true);

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: EffectConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, config);
    }
}
