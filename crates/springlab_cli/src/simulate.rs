//! `springlab simulate`: run the preview headless and report sampled frames

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use springlab_animation::spring::DEFAULT_REST_DELTA;
use springlab_animation::{SpringConfig, SpringResponse};
use springlab_preview::{AnimationKind, Frame, Playground, Pose, PoseTarget};
use std::io::{self, Write};
use tracing::{info, warn};

use crate::config::{SimulationConfig, SpringlabConfig};

/// Runs without a duration stop here even if nothing settles
pub const MAX_AUTO_SECS: f32 = 60.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Everything `simulate` prints
#[derive(Debug, Serialize)]
pub struct Report {
    /// Preset the configuration equals, if it still equals one
    pub preset: Option<&'static str>,
    pub kind: Option<AnimationKind>,
    pub config: SpringConfig,
    pub damping_ratio: f32,
    pub predicted_settle_secs: f32,
    /// Time from which every later frame is settled
    pub settled_at: Option<f32>,
    pub frames: Vec<Frame>,
}

/// A playground set up from the configuration: preset first, then clamped
/// overrides, then the animation type.
pub fn build_playground(config: &SpringlabConfig) -> Result<Playground> {
    let mut playground = Playground::new().with_policy(config.session_policy());

    playground
        .apply_preset(&config.preview.preset)
        .context("Run `springlab presets` to list the available presets")?;

    for (field, value) in config.spring.iter() {
        let clamped = field.bounds().clamp(value);
        if clamped != value {
            warn!(%field, value, clamped, "spring parameter clamped to its range");
        }
        playground.set(field, clamped);
    }

    if playground.select_name(&config.preview.kind).is_none() {
        warn!(kind = %config.preview.kind, "unknown animation type, nothing will move");
    }

    Ok(playground)
}

/// Seconds per frame
pub fn frame_interval(fps: u32) -> Result<f32> {
    SimulationConfig {
        fps,
        duration: None,
    }
    .validate()?;
    Ok(1.0 / fps as f32)
}

/// Tick `duration` seconds worth of frames, or until `tick` reports done
/// when no duration is given.
pub fn sample<T>(
    dt: f32,
    duration: Option<f32>,
    mut tick: impl FnMut(f32) -> (T, bool),
) -> Result<Vec<T>> {
    match duration {
        Some(secs) => {
            SimulationConfig {
                duration: Some(secs),
                ..Default::default()
            }
            .validate()?;
            let count = (secs / dt).round() as usize;
            Ok((0..count).map(|_| tick(dt).0).collect())
        }
        None => {
            let limit = (MAX_AUTO_SECS / dt).ceil() as usize;
            let mut frames = Vec::new();
            for _ in 0..limit {
                let (frame, done) = tick(dt);
                frames.push(frame);
                if done {
                    return Ok(frames);
                }
            }
            warn!(secs = MAX_AUTO_SECS, "stopped before everything settled");
            Ok(frames)
        }
    }
}

/// Closed-form settle estimate for the slowest channel moving from rest
pub fn predicted_settle_secs(config: SpringConfig, target: PoseTarget) -> f32 {
    let from = Pose::REST;
    let to = target.resolve(from);
    [
        (from.x, to.x),
        (from.y, to.y),
        (from.scale, to.scale),
        (from.rotation, to.rotation),
    ]
    .into_iter()
    .filter(|(a, b)| a != b)
    .map(|(a, b)| {
        SpringResponse::new(config, a, b)
            .settle_duration(f64::from(DEFAULT_REST_DELTA))
            .as_secs_f32()
    })
    .fold(0.0, f32::max)
}

fn settled_at(frames: &[Frame]) -> Option<f32> {
    if !frames.last()?.settled {
        return None;
    }
    let first = frames.iter().rposition(|f| !f.settled).map_or(0, |i| i + 1);
    Some(frames[first].time)
}

pub fn run(config: &SpringlabConfig) -> Result<Report> {
    let dt = frame_interval(config.simulation.fps)?;
    let mut playground = build_playground(config)?;

    let spring = playground.config();
    let predicted = predicted_settle_secs(spring, playground.engine().target());

    playground.trigger();
    let frames = sample(dt, config.simulation.duration, |dt| {
        let frame = playground.tick(dt);
        (frame, frame.settled && !frame.is_animating)
    })?;

    let report = Report {
        preset: playground.model().active_preset().map(|p| p.name()),
        kind: playground.selector(),
        config: spring,
        damping_ratio: spring.damping_ratio(),
        predicted_settle_secs: predicted,
        settled_at: settled_at(&frames),
        frames,
    };
    info!(
        frames = report.frames.len(),
        settled_at = ?report.settled_at,
        "simulation finished"
    );
    Ok(report)
}

pub fn write_report(report: &Report, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).context("Failed to encode report")?;
            writeln!(out)?;
        }
        OutputFormat::Table => write_table(report, out)?,
    }
    Ok(())
}

fn write_table(report: &Report, out: &mut impl Write) -> io::Result<()> {
    let c = report.config;
    writeln!(out, "preset            {}", report.preset.unwrap_or("(custom)"))?;
    writeln!(
        out,
        "kind              {}",
        report.kind.map_or("(none)", AnimationKind::name)
    )?;
    writeln!(
        out,
        "config            k={} c={} m={} v0={} (damping ratio {:.3})",
        c.stiffness, c.damping, c.mass, c.velocity, report.damping_ratio
    )?;
    writeln!(out, "predicted settle  {:.3} s", report.predicted_settle_secs)?;
    match report.settled_at {
        Some(t) => writeln!(out, "settled at        {t:.3} s")?,
        None => writeln!(out, "settled at        (still moving)")?,
    }
    writeln!(out)?;

    writeln!(
        out,
        "{:>8} {:>9} {:>9} {:>7} {:>9} {:>9}",
        "time", "x", "y", "scale", "rotation", "animating"
    )?;
    for frame in &report.frames {
        let p = frame.pose;
        writeln!(
            out,
            "{:>8.3} {:>9.2} {:>9.2} {:>7.3} {:>9.2} {:>9}",
            frame.time,
            p.x,
            p.y,
            p.scale,
            p.rotation,
            if frame.is_animating { "yes" } else { "no" }
        )?;
    }
    Ok(())
}
