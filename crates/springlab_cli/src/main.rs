//! springlab CLI
//!
//! Drives the spring playground headless: list presets, simulate the preview
//! for a configuration, play the demo compositions, and scaffold a config.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod catalog;
mod config;
mod demo;
mod init;
mod simulate;

use config::{PolicyName, SpringOverrides, SpringlabConfig};
use demo::DemoName;
use simulate::OutputFormat;

#[derive(Parser)]
#[command(name = "springlab")]
#[command(author, version, about = "Spring physics animation playground", long_about = None)]
struct Cli {
    /// Debug logging for every springlab crate (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in spring presets
    Presets {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Trigger the preview once and print the sampled frames
    Simulate {
        /// Animation type: translate, scale or rotate
        #[arg(short, long)]
        kind: Option<String>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Play a demo composition and print per-element frames
    Demo {
        #[arg(value_enum)]
        name: DemoName,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Write a default springlab.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Options shared by commands that run the playground
#[derive(Args)]
struct RunArgs {
    /// Config file (defaults to ./springlab.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting preset
    #[arg(short, long)]
    preset: Option<String>,

    #[arg(long)]
    stiffness: Option<f32>,

    #[arg(long)]
    damping: Option<f32>,

    #[arg(long)]
    mass: Option<f32>,

    /// Initial velocity
    #[arg(long, allow_negative_numbers = true)]
    velocity: Option<f32>,

    /// Frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Seconds to simulate (default: until settled)
    #[arg(short, long)]
    duration: Option<f32>,

    /// When a session stops counting as animating
    #[arg(long, value_enum)]
    policy: Option<PolicyName>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl RunArgs {
    /// The config file with command-line flags layered on top
    fn resolve(&self) -> Result<SpringlabConfig> {
        let mut config = SpringlabConfig::discover(self.config.as_deref())?;

        if let Some(preset) = &self.preset {
            config.preview.preset = preset.clone();
            // a preset named on the command line starts clean
            config.spring = SpringOverrides::default();
        }
        config.spring.merge(SpringOverrides {
            stiffness: self.stiffness,
            damping: self.damping,
            mass: self.mass,
            velocity: self.velocity,
        });
        if let Some(policy) = self.policy {
            config.preview.policy = policy;
        }
        if let Some(fps) = self.fps {
            config.simulation.fps = fps;
        }
        if self.duration.is_some() {
            config.simulation.duration = self.duration;
        }
        config.simulation.validate()?;
        Ok(config)
    }
}

const VERBOSE_FILTER: &str =
    "springlab_cli=debug,springlab_preview=debug,springlab_animation=debug,springlab_core=debug";
const DEFAULT_FILTER: &str =
    "springlab_cli=info,springlab_preview=info,springlab_animation=warn,springlab_core=warn";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    // stdout carries reports, logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Presets { format } => catalog::write_presets(format, &mut out),
        Commands::Simulate { kind, run } => {
            let mut config = run.resolve()?;
            if let Some(kind) = kind {
                config.preview.kind = kind;
            }
            let report = simulate::run(&config)?;
            simulate::write_report(&report, run.format, &mut out)
        }
        Commands::Demo { name, run } => {
            let config = run.resolve()?;
            let report = demo::run(name, &config)?;
            demo::write_report(name, &report, run.format, &mut out)
        }
        Commands::Init { path, force } => {
            let written = init::write_default_config(&path, force)?;
            info!(path = %written.display(), "config written");
            writeln!(out, "Created {}", written.display())?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_args(args: &[&str]) -> RunArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Simulate { run, .. } | Commands::Demo { run, .. } => run,
            _ => panic!("not a run command"),
        }
    }

    #[test]
    fn flags_layer_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(config::CONFIG_FILE);
        std::fs::write(&path, "[spring]\nmass = 3.0\n").unwrap();
        let config_arg = path.to_string_lossy().into_owned();

        let config = run_args(&[
            "springlab",
            "simulate",
            "--config",
            &config_arg,
            "--velocity",
            "-20",
            "--fps",
            "120",
        ])
        .resolve()
        .unwrap();
        assert_eq!(config.spring.mass, Some(3.0));
        assert_eq!(config.spring.velocity, Some(-20.0));
        assert_eq!(config.simulation.fps, 120);

        let config = run_args(&["springlab", "demo", "flip", "-c", &config_arg, "-p", "stiff"])
            .resolve()
            .unwrap();
        assert_eq!(config.preview.preset, "stiff");
        assert_eq!(config.spring, SpringOverrides::default());
    }

    #[test]
    fn oversized_runs_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(config::CONFIG_FILE);
        std::fs::write(&path, "").unwrap();
        let config_arg = path.to_string_lossy().into_owned();

        for flags in [["--fps", "4000000000"], ["--duration", "1e12"]] {
            let mut args = vec!["springlab", "simulate", "-c", config_arg.as_str()];
            args.extend(flags);
            assert!(run_args(&args).resolve().is_err(), "{flags:?} accepted");
        }
    }
}
