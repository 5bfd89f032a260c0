//! Particle effect command implementations

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand, ValueEnum};
use confetti_fx::{
    Driver, DriverState, EffectConfig, Launch, ManualHost, Preset, RasterSurface, Viewport,
};
use glam::Vec2;
use image::ImageFormat;

use crate::utils::{
    MAX_FRAME_SIDE, create_progress_bar, dimension_arg, ensure_dir, frame_path, is_yaml,
    pixel_ratio_arg, point_arg,
};

#[derive(Subcommand)]
pub enum FxCommands {
    /// Render an effect to a PNG frame sequence
    Render(RenderArgs),

    /// Print a preset configuration
    Show {
        /// Preset to print
        #[arg(short, long, default_value = "fountain")]
        preset: PresetArg,

        /// Override the launch point (CSS pixels, `X,Y`)
        #[arg(long, value_parser = point_arg)]
        origin: Option<Vec2>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: ConfigFormat,
    },
}

#[derive(Args)]
pub struct RenderArgs {
    /// Preset to render when no config file is given
    #[arg(short, long, default_value = "fountain")]
    pub preset: PresetArg,

    /// Effect configuration file (JSON or YAML), as printed by `fx show`
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Viewport width in CSS pixels
    #[arg(long, default_value_t = 390.0, value_parser = dimension_arg)]
    pub width: f32,

    /// Viewport height in CSS pixels
    #[arg(long, default_value_t = 844.0, value_parser = dimension_arg)]
    pub height: f32,

    /// Device pixel ratio
    #[arg(long, default_value_t = 1.0, value_parser = pixel_ratio_arg)]
    pub dpr: f32,

    /// Simulated display refresh rate
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the launch point (CSS pixels, `X,Y`)
    #[arg(long, value_parser = point_arg)]
    pub origin: Option<Vec2>,

    /// Override the effect duration in milliseconds
    #[arg(long)]
    pub duration: Option<u32>,

    /// Write only every Nth frame
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub every: u64,

    /// Output directory for the frames
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    Confetti,
    Fountain,
}

impl From<PresetArg> for Preset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Confetti => Self::Confetti,
            PresetArg::Fountain => Self::Fountain,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

pub fn execute(command: FxCommands, quiet: bool) -> Result<()> {
    match command {
        FxCommands::Render(args) => render(&args, quiet),
        FxCommands::Show {
            preset,
            origin,
            format,
        } => show(preset, origin, format),
    }
}

fn show(preset: PresetArg, origin: Option<Vec2>, format: ConfigFormat) -> Result<()> {
    let config = EffectConfig::preset(preset.into(), origin);
    let text = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
        ConfigFormat::Yaml => serde_yaml_ng::to_string(&config)?,
    };
    println!("{text}");
    Ok(())
}

/// Read an effect configuration from JSON or YAML
pub fn load_config(path: &Path) -> Result<EffectConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = if is_yaml(path) {
        serde_yaml_ng::from_str(&text)
            .with_context(|| format!("Invalid YAML effect config {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON effect config {}", path.display()))?
    };
    Ok(config)
}

/// Frames the driver will tick before completing
fn expected_frames(duration_ms: u32, interval: Duration) -> u64 {
    let duration_ns = u128::from(duration_ms) * 1_000_000;
    let frames = duration_ns.div_ceil(interval.as_nanos().max(1));
    u64::try_from(frames).unwrap_or(u64::MAX).max(1)
}

fn render(args: &RenderArgs, quiet: bool) -> Result<()> {
    let viewport = Viewport::new(args.width, args.height, args.dpr);
    let (width, height) = viewport.pixel_size();
    if width > MAX_FRAME_SIDE || height > MAX_FRAME_SIDE {
        bail!("Frame of {width}x{height} device pixels exceeds the {MAX_FRAME_SIDE} pixel limit");
    }

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EffectConfig::preset(args.preset.into(), None),
    };
    if let Some(origin) = args.origin {
        config = config.with_launch(Launch::point(origin));
    }
    if let Some(duration) = args.duration {
        config = config.with_duration_ms(duration);
    }

    ensure_dir(&args.out)?;

    let mut host = ManualHost::new(viewport, args.fps);
    let pb = create_progress_bar(
        expected_frames(config.duration_ms, host.frame_interval()),
        "rendering",
        quiet,
    );

    let mut driver = Driver::new(config, RasterSurface::new(viewport), &mut host)
        .on_done(|| log::info!("Effect complete"));
    if let Some(seed) = args.seed {
        driver = driver.with_seed(seed);
    }
    driver.start(Duration::ZERO).context("Failed to start effect")?;

    let mut written = 0;
    while let Some(now) = driver.host_mut().advance() {
        let state = driver.tick(now);
        pb.inc(1);
        // Completion clears the layer; nothing left to export
        if state != DriverState::Running {
            break;
        }
        if (driver.frames() - 1) % args.every != 0 {
            continue;
        }
        if let Some(image) = driver.surface().image() {
            let path = frame_path(&args.out, written);
            image
                .save_with_format(&path, ImageFormat::Png)
                .with_context(|| format!("Failed to write frame {}", path.display()))?;
            written += 1;
        }
    }
    pb.finish_and_clear();

    log::debug!("Rendered {} frames, wrote {written}", driver.frames());
    if !quiet {
        println!("Wrote {written} frames to {}", args.out.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_frames() {
        assert_eq!(expected_frames(1400, Duration::from_millis(20)), 70);
        assert_eq!(expected_frames(1000, Duration::from_millis(30)), 34);
        assert_eq!(expected_frames(4200, Duration::from_millis(20)), 210);
        assert_eq!(expected_frames(0, Duration::from_millis(20)), 1);
    }

    #[test]
    fn test_preset_mapping() {
        assert_eq!(Preset::from(PresetArg::Confetti), Preset::Confetti);
        assert_eq!(Preset::from(PresetArg::Fountain), Preset::Fountain);
    }
}
