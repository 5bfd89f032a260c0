//! I/O and argument parsing helpers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glam::Vec2;

/// Path of frame `index` inside `dir`, e.g. `frame_0007.png`
pub fn frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("frame_{index:04}.png"))
}

/// Create `dir` (and parents) if needed
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))
}

/// Parse an `X,Y` pair in CSS pixels
pub fn parse_point(s: &str) -> Result<Vec2> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected X,Y but got '{s}'");
    };
    let x: f32 = x.trim().parse().with_context(|| format!("invalid X in '{s}'"))?;
    let y: f32 = y.trim().parse().with_context(|| format!("invalid Y in '{s}'"))?;
    if !x.is_finite() || !y.is_finite() {
        bail!("coordinates must be finite: '{s}'");
    }
    Ok(Vec2::new(x, y))
}

/// Clap value parser wrapper for [`parse_point`]
pub fn point_arg(s: &str) -> std::result::Result<Vec2, String> {
    parse_point(s).map_err(|e| e.to_string())
}

/// Largest accepted frame side in device pixels
pub const MAX_FRAME_SIDE: u32 = 8192;

/// Largest accepted device pixel ratio
pub const MAX_PIXEL_RATIO: f32 = 4.0;

fn parse_bounded(s: &str, what: &str, max: f32) -> Result<f32> {
    let value: f32 = s.trim().parse().with_context(|| format!("invalid {what} '{s}'"))?;
    if !value.is_finite() || value <= 0.0 || value > max {
        bail!("{what} must be greater than 0 and at most {max}, got '{s}'");
    }
    Ok(value)
}

/// Clap value parser for a viewport side in CSS pixels
pub fn dimension_arg(s: &str) -> std::result::Result<f32, String> {
    parse_bounded(s, "size", MAX_FRAME_SIDE as f32).map_err(|e| e.to_string())
}

/// Clap value parser for a device pixel ratio
pub fn pixel_ratio_arg(s: &str) -> std::result::Result<f32, String> {
    parse_bounded(s, "pixel ratio", MAX_PIXEL_RATIO).map_err(|e| e.to_string())
}

/// Whether `path` names a YAML document
pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_path() {
        assert_eq!(
            frame_path(Path::new("out"), 7),
            Path::new("out").join("frame_0007.png")
        );
        assert_eq!(
            frame_path(Path::new("out"), 12345),
            Path::new("out").join("frame_12345.png")
        );
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("120, 80.5").unwrap(), Vec2::new(120.0, 80.5));
        assert!(parse_point("120").is_err());
        assert!(parse_point("a,b").is_err());
        assert!(parse_point("inf,1").is_err());
    }

    #[test]
    fn test_dimension_bounds() {
        assert_eq!(dimension_arg("390").unwrap(), 390.0);
        assert_eq!(dimension_arg("8192").unwrap(), 8192.0);
        assert!(dimension_arg("100000").is_err());
        assert!(dimension_arg("0").is_err());
        assert!(dimension_arg("-5").is_err());
        assert!(dimension_arg("NaN").is_err());
    }

    #[test]
    fn test_pixel_ratio_bounds() {
        assert_eq!(pixel_ratio_arg("2").unwrap(), 2.0);
        assert!(pixel_ratio_arg("4.5").is_err());
        assert!(pixel_ratio_arg("0").is_err());
    }

    #[test]
    fn test_is_yaml() {
        assert!(is_yaml(Path::new("fx.yaml")));
        assert!(is_yaml(Path::new("FX.YML")));
        assert!(!is_yaml(Path::new("fx.json")));
        assert!(!is_yaml(Path::new("fx")));
    }
}
