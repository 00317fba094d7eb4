//! Effect type registry.
//!
//! [`EffectKind`] names every effect type a preset can refer to, maps
//! hold-note effect codes from beatmaps onto them, and creates default
//! instances for chain building and parameter lookup.

use std::fmt;

use voltex_core::EffectWithParams;
use voltex_effects::{
    BiquadFilter, BitCrusher, Echo, Flanger, Gate, Limiter, Panner, Phaser, Retrigger, Sidechain,
    TapeStop, Wobble,
};

/// Every effect type the engine provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Biquad filter ([`BiquadFilter`]).
    Filter,
    /// Stereo balance ([`Panner`]).
    Panner,
    /// Peak limiter ([`Limiter`]).
    Limiter,
    /// Sample-and-hold downsampler ([`BitCrusher`]).
    BitCrusher,
    /// Periodic trapezoid gate ([`Gate`]).
    Gate,
    /// Slow-to-halt playback ([`TapeStop`]).
    TapeStop,
    /// Segment capture and loop ([`Retrigger`]).
    Retrigger,
    /// LFO-swept low-pass ([`Wobble`]).
    Wobble,
    /// All-pass cascade ([`Phaser`]).
    Phaser,
    /// Swept short delay ([`Flanger`]).
    Flanger,
    /// Feedback echo ([`Echo`]).
    Echo,
    /// Scheduled gain ducking ([`Sidechain`]).
    Sidechain,
}

impl EffectKind {
    /// All effect kinds, in registry order.
    pub const ALL: [EffectKind; 12] = [
        EffectKind::Filter,
        EffectKind::Panner,
        EffectKind::Limiter,
        EffectKind::BitCrusher,
        EffectKind::Gate,
        EffectKind::TapeStop,
        EffectKind::Retrigger,
        EffectKind::Wobble,
        EffectKind::Phaser,
        EffectKind::Flanger,
        EffectKind::Echo,
        EffectKind::Sidechain,
    ];

    /// Canonical name, also used as the chain slot id.
    pub const fn name(self) -> &'static str {
        match self {
            EffectKind::Filter => "filter",
            EffectKind::Panner => "pan",
            EffectKind::Limiter => "limiter",
            EffectKind::BitCrusher => "bitcrusher",
            EffectKind::Gate => "gate",
            EffectKind::TapeStop => "tapestop",
            EffectKind::Retrigger => "retrigger",
            EffectKind::Wobble => "wobble",
            EffectKind::Phaser => "phaser",
            EffectKind::Flanger => "flanger",
            EffectKind::Echo => "echo",
            EffectKind::Sidechain => "sidechain",
        }
    }

    /// Look up a kind by name.
    ///
    /// Case, `_`, `-` and spaces are ignored, and a few common aliases are
    /// accepted (`"tape_stop"`, `"bitc"`, `"lpf"`, ...).
    ///
    /// ```rust
    /// use voltex_config::EffectKind;
    ///
    /// assert_eq!(EffectKind::from_name("Tape-Stop"), Some(EffectKind::TapeStop));
    /// assert_eq!(EffectKind::from_name("reverb"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(*c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let kind = match key.as_str() {
            "filter" | "biquad" | "peq" | "lpf" | "hpf" | "bpf" => EffectKind::Filter,
            "pan" | "panner" | "balance" => EffectKind::Panner,
            "limiter" | "limit" => EffectKind::Limiter,
            "bitcrusher" | "bitcrush" | "bitc" => EffectKind::BitCrusher,
            "gate" | "trigate" => EffectKind::Gate,
            "tapestop" | "stop" => EffectKind::TapeStop,
            "retrigger" | "retrig" => EffectKind::Retrigger,
            "wobble" | "wob" => EffectKind::Wobble,
            "phaser" => EffectKind::Phaser,
            "flanger" | "flange" => EffectKind::Flanger,
            "echo" => EffectKind::Echo,
            "sidechain" | "duck" => EffectKind::Sidechain,
            _ => return None,
        };
        Some(kind)
    }

    /// Map a hold-note effect code from a beatmap onto an effect kind.
    ///
    /// Code 0 is a plain hold with no effect. Codes 12 to 14 are the
    /// peaking, low-pass and high-pass filter variants, which all build a
    /// [`BiquadFilter`]. Unknown codes give `None`.
    pub fn from_hold_effect_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(EffectKind::Retrigger),
            2 => Some(EffectKind::Flanger),
            3 => Some(EffectKind::Phaser),
            4 => Some(EffectKind::Gate),
            5 => Some(EffectKind::TapeStop),
            6 => Some(EffectKind::BitCrusher),
            7 => Some(EffectKind::Wobble),
            8 => Some(EffectKind::Sidechain),
            9 => Some(EffectKind::Echo),
            10 => Some(EffectKind::Panner),
            12..=14 => Some(EffectKind::Filter),
            _ => None,
        }
    }

    /// Create an instance with default settings.
    ///
    /// Effects sized by a length start at length 0 and pass audio through
    /// until one is set.
    pub fn create(self, sample_rate: f32) -> Box<dyn EffectWithParams + Send> {
        match self {
            EffectKind::Filter => Box::new(BiquadFilter::new(sample_rate)),
            EffectKind::Panner => Box::new(Panner::new()),
            EffectKind::Limiter => Box::new(Limiter::new(sample_rate)),
            EffectKind::BitCrusher => Box::new(BitCrusher::new()),
            EffectKind::Gate => Box::new(Gate::new()),
            EffectKind::TapeStop => Box::new(TapeStop::new()),
            EffectKind::Retrigger => Box::new(Retrigger::new()),
            EffectKind::Wobble => Box::new(Wobble::new(sample_rate)),
            EffectKind::Phaser => Box::new(Phaser::new(sample_rate)),
            EffectKind::Flanger => Box::new(Flanger::new(sample_rate)),
            EffectKind::Echo => Box::new(Echo::new()),
            EffectKind::Sidechain => Box::new(Sidechain::new()),
        }
    }

    /// Config keys that reconfigure buffers or the filter design rather
    /// than map to a live parameter.
    pub const fn setup_keys(self) -> &'static [&'static str] {
        match self {
            EffectKind::Gate
            | EffectKind::TapeStop
            | EffectKind::Retrigger
            | EffectKind::Echo
            | EffectKind::Sidechain => &["length"],
            EffectKind::Flanger => &["min_delay", "max_delay"],
            EffectKind::Filter => &["mode"],
            EffectKind::Panner
            | EffectKind::Limiter
            | EffectKind::BitCrusher
            | EffectKind::Wobble
            | EffectKind::Phaser => &[],
        }
    }

    /// Index of the live parameter a config key refers to.
    ///
    /// Keys match a descriptor's name or short name, ignoring case and any
    /// non-alphanumeric characters, so `min_freq` finds "Min Freq".
    pub fn param_index(self, key: &str) -> Option<usize> {
        find_param(self.create(48000.0).as_ref(), key)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Index of the parameter on `effect` that `key` refers to.
pub(crate) fn find_param(effect: &(dyn EffectWithParams + Send), key: &str) -> Option<usize> {
    let key = normalize_key(key);
    (0..effect.effect_param_count()).find(|&i| {
        effect.effect_param_info(i).is_some_and(|desc| {
            normalize_key(desc.name) == key || normalize_key(desc.short_name) == key
        })
    })
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
