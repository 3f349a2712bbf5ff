//! `springlab demo`: play one of the per-mode demo compositions headless

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use springlab_animation::SpringConfig;
use springlab_preview::demos::Demo;
use springlab_preview::{AnimationKind, Playground, Pose};
use std::io::Write;

use crate::config::SpringlabConfig;
use crate::simulate::{build_playground, frame_interval, sample, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoName {
    /// Staggered list entrance (translate)
    Stagger,
    /// Interactive button click (scale)
    Button,
    /// Card flip (rotate)
    Flip,
}

impl DemoName {
    pub fn name(self) -> &'static str {
        match self {
            Self::Stagger => "stagger",
            Self::Button => "button",
            Self::Flip => "flip",
        }
    }

    pub fn kind(self) -> AnimationKind {
        match self {
            Self::Stagger => AnimationKind::Translate,
            Self::Button => AnimationKind::Scale,
            Self::Flip => AnimationKind::Rotate,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DemoFrame {
    pub time: f32,
    pub poses: Vec<Pose>,
    /// Button state or visible card face
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub demo: &'static str,
    pub config: SpringConfig,
    pub frames: Vec<DemoFrame>,
}

fn detail(name: DemoName, playground: &Playground) -> Option<&'static str> {
    match name {
        DemoName::Stagger => None,
        DemoName::Button => Some(playground.button().state().name()),
        DemoName::Flip => Some(playground.card().face().name()),
    }
}

pub fn run(name: DemoName, config: &SpringlabConfig) -> Result<DemoReport> {
    let dt = frame_interval(config.simulation.fps)?;
    let mut playground = build_playground(config)?;
    playground.select(name.kind());
    playground.trigger();

    let frames = sample(dt, config.simulation.duration, |dt| {
        let frame = playground.tick(dt);
        let done = playground.active_demo().map_or(true, |demo| demo.is_settled());
        let sampled = DemoFrame {
            time: frame.time,
            poses: playground.demo_poses().to_vec(),
            detail: detail(name, &playground),
        };
        (sampled, done)
    })?;

    tracing::info!(demo = name.name(), frames = frames.len(), "demo finished");
    Ok(DemoReport {
        demo: name.name(),
        config: playground.config(),
        frames,
    })
}

/// The pose component each demo animates
fn component(name: DemoName, pose: &Pose) -> f32 {
    match name {
        DemoName::Stagger => pose.x,
        DemoName::Button => pose.scale,
        DemoName::Flip => pose.rotation,
    }
}

pub fn write_report(
    name: DemoName,
    report: &DemoReport,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, report).context("Failed to encode report")?;
        writeln!(out)?;
        return Ok(());
    }

    let columns = report.frames.first().map_or(0, |f| f.poses.len());
    write!(out, "{:>8}", "time")?;
    for i in 0..columns {
        let header = match name {
            DemoName::Stagger => format!("item{i}"),
            DemoName::Button => "scale".to_string(),
            DemoName::Flip => "rotation".to_string(),
        };
        write!(out, " {header:>9}")?;
    }
    if name != DemoName::Stagger {
        write!(out, " {:>8}", if name == DemoName::Button { "state" } else { "face" })?;
    }
    writeln!(out)?;

    for frame in &report.frames {
        write!(out, "{:>8.3}", frame.time)?;
        for pose in &frame.poses {
            write!(out, " {:>9.3}", component(name, pose))?;
        }
        if let Some(detail) = frame.detail {
            write!(out, " {detail:>8}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use springlab_preview::demos::ENTRANCE_OFFSET;

    #[test]
    fn stagger_runs_until_every_item_arrives() {
        let report = run(DemoName::Stagger, &SpringlabConfig::default()).unwrap();

        let first = &report.frames[0];
        assert_eq!(first.poses.len(), 5);
        assert!(first.poses[4].x == ENTRANCE_OFFSET);

        let last = report.frames.last().unwrap();
        assert!(last.poses.iter().all(|p| p.x == 0.0));
    }

    #[test]
    fn button_click_ends_hovered() {
        let report = run(DemoName::Button, &SpringlabConfig::default()).unwrap();
        assert_eq!(report.frames[0].detail, Some("pressed"));

        let last = report.frames.last().unwrap();
        assert_eq!(last.detail, Some("hovered"));
        assert_eq!(last.poses[0].scale, 1.05);
    }

    #[test]
    fn flip_shows_the_back() {
        let mut config = SpringlabConfig::default();
        config.preview.preset = "stiff".to_string();

        let report = run(DemoName::Flip, &config).unwrap();
        let last = report.frames.last().unwrap();
        assert_eq!(last.detail, Some("back"));
        assert_eq!(last.poses[0].rotation, 180.0);
    }

    #[test]
    fn table_has_a_column_per_item() {
        let mut config = SpringlabConfig::default();
        config.simulation.duration = Some(0.05);
        let report = run(DemoName::Stagger, &config).unwrap();

        let mut out = Vec::new();
        write_report(DemoName::Stagger, &report, OutputFormat::Table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let header = text.lines().next().unwrap_or_default();
        assert_eq!(header.split_whitespace().count(), 6);
        assert_eq!(text.lines().count(), 4);
    }
}
