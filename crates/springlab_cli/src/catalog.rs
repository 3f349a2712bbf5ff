//! `springlab presets`: the preset table with derived characteristics

use anyhow::{Context, Result};
use serde::Serialize;
use springlab_animation::{SpringConfig, SpringPreset, SpringResponse};
use std::io::Write;

use crate::simulate::OutputFormat;

/// Settle estimates are for a unit step to within this distance
const SETTLE_EPSILON: f64 = 0.001;

#[derive(Debug, Serialize)]
pub struct PresetEntry {
    pub name: &'static str,
    #[serde(flatten)]
    pub config: SpringConfig,
    pub damping_ratio: f32,
    pub regime: &'static str,
    pub settle_secs: f32,
}

fn regime(config: &SpringConfig) -> &'static str {
    let zeta = config.damping_ratio();
    if (zeta - 1.0).abs() < 1e-3 {
        "critical"
    } else if zeta < 1.0 {
        "underdamped"
    } else {
        "overdamped"
    }
}

pub fn entries() -> Vec<PresetEntry> {
    SpringPreset::all()
        .iter()
        .map(|&preset| {
            let config = preset.config();
            PresetEntry {
                name: preset.name(),
                config,
                damping_ratio: config.damping_ratio(),
                regime: regime(&config),
                settle_secs: SpringResponse::new(config, 0.0, 1.0)
                    .settle_duration(SETTLE_EPSILON)
                    .as_secs_f32(),
            }
        })
        .collect()
}

pub fn write_presets(format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let entries = entries();
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &entries).context("Failed to encode presets")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<8} {:>9} {:>7} {:>5} {:>8} {:>6} {:<12} {:>7}",
        "name", "stiffness", "damping", "mass", "velocity", "zeta", "regime", "settle"
    )?;
    for e in &entries {
        let c = e.config;
        writeln!(
            out,
            "{:<8} {:>9} {:>7} {:>5} {:>8} {:>6.3} {:<12} {:>6.2}s",
            e.name,
            c.stiffness,
            c.damping,
            c.mass,
            c.velocity,
            e.damping_ratio,
            e.regime,
            e.settle_secs
        )?;
    }
    Ok(())
}
