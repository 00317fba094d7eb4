//! Builds an effect chain from a preset and renders a test signal through it.
//!
//! Run with: cargo run -p voltex-config --example chain_demo [preset.toml]
//!
//! Set `RUST_LOG=debug` to see effect construction.

use tracing_subscriber::EnvFilter;
use voltex_config::{ConfigError, Preset, build_chain, validate_preset};
use voltex_core::{Effect, ParamBridge};

const BLOCK_FRAMES: usize = 512;

const DEMO_PRESET: &str = r#"
name = "Demo Drop"
description = "Filtered gate into a ducked echo"
sample_rate = 48000
bpm = 140.0

[[effects]]
type = "filter"
[effects.params]
mode = "lowpass"
frequency = "6kHz"
q = "0.9"

[[effects]]
type = "gate"
[effects.params]
length = "1/16"
low = "15%"

[[effects]]
type = "echo"
[effects.params]
length = "3/16"
feedback = "35%"

[[effects]]
type = "sidechain"
[effects.params]
length = "1/4"
gain = "0.4"

[[effects]]
type = "limiter"
[effects.params]
release = "150ms"
"#;

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let preset = match std::env::args().nth(1) {
        Some(path) => Preset::load(path)?,
        None => Preset::from_toml(DEMO_PRESET)?,
    };
    validate_preset(&preset)?;

    println!("Voltex Chain Demo: {}", preset.name);
    println!("==================\n");

    let mut chain = build_chain(&preset)?;
    for (i, slot) in chain.slots().enumerate() {
        let state = if slot.bypassed { " (bypassed)" } else { "" };
        println!("  {i}: {}{state}", slot.id);
        for p in 0..slot.effect.effect_param_count() {
            if let Some(desc) = slot.effect.effect_param_info(p) {
                let value = slot.effect.effect_get_param(p);
                println!("       {} = {}", desc.name, desc.format_value(value));
            }
        }
    }

    let sample_rate = preset.sample_rate as f32;
    // Four bars at the preset tempo, or four seconds without one.
    let bar = preset
        .frames("1/1")
        .unwrap_or(preset.sample_rate as usize);
    let frames = bar * 4;
    let mut signal: Vec<f32> = (0..frames)
        .flat_map(|i| {
            let t = i as f32 / sample_rate;
            let s = (std::f32::consts::TAU * 220.0 * t).sin() * 0.6;
            [s, s * 0.9]
        })
        .collect();

    let bridge = ParamBridge::from_chain(&chain);
    let cutoff = chain
        .slot(0)
        .and_then(|slot| slot.effect.effect_find_param("Frequency"));

    for (n, block) in signal.chunks_mut(BLOCK_FRAMES * 2).enumerate() {
        // Close the filter over the last two bars, the way a laser would.
        if let Some(param) = cutoff
            && n * BLOCK_FRAMES >= frames / 2
        {
            let progress = (n * BLOCK_FRAMES - frames / 2) as f32 / (frames / 2) as f32;
            bridge.set(0, param, 6000.0 - 5500.0 * progress);
            chain.sync_from(&bridge);
        }
        let block_frames = block.len() / 2;
        chain.process(block, block_frames);
    }

    let rms = (signal.iter().map(|x| x * x).sum::<f32>() / signal.len() as f32).sqrt();
    let peak = signal.iter().map(|x| x.abs()).fold(0.0_f32, f32::max);
    println!("\nRendered {frames} frames");
    println!("Output RMS: {rms:.4}");
    println!("Peak: {peak:.4}");

    Ok(())
}
