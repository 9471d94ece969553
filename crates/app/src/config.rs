//! Command-line configuration.
//!
//! Flags use the `--key=value` form:
//! `--scene=rotating|crate|directional|lit|shadow`, `--size=WxH` (or
//! `--width=`/`--height=`), `--frames=N`, `--crate-angle=DEG`, `--lid-angle=DEG`,
//! `--light=X,Y,Z`.

use std::str::FromStr;

use anyhow::{Result, bail};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    /// Animated cube with accumulated shift and rotation.
    Rotating,
    /// Crate with a hinged lid.
    Crate,
    /// Cube shaded by a directional light.
    Directional,
    /// Cube lit by a point light.
    Lit,
    /// Spot light with a shadow map.
    Shadow,
}

impl FromStr for SceneKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "rotating" | "rotate" => Self::Rotating,
            "crate" | "box" => Self::Crate,
            "directional" | "sun" => Self::Directional,
            "lit" | "light" | "phong" => Self::Lit,
            "shadow" | "spot" => Self::Shadow,
            other => bail!("Unknown scene '{other}' (expected rotating|crate|directional|lit|shadow)"),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub scene: SceneKind,
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    pub crate_angle: f64,
    pub lid_angle: f64,
    /// Unnormalized direction of the directional light.
    pub light: [f64; 3],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scene: SceneKind::Lit,
            width: 1280,
            height: 720,
            frames: 1,
            crate_angle: 120.0,
            lid_angle: 30.0,
            light: [0.3, 0.6, 0.9],
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cfg = Self::default();
        let mut w: Option<u32> = None;
        let mut h: Option<u32> = None;

        for arg in args {
            let arg = arg.as_ref();
            if let Some(v) = arg.strip_prefix("--scene=") {
                cfg.scene = v.parse()?;
            } else if let Some(v) = arg.strip_prefix("--size=") {
                match v.split_once('x').or_else(|| v.split_once('X')) {
                    Some((sw, sh)) => match (sw.parse::<u32>(), sh.parse::<u32>()) {
                        (Ok(pw), Ok(ph)) => {
                            w = Some(pw);
                            h = Some(ph);
                        }
                        _ => log::warn!("Ignoring malformed size '{v}'"),
                    },
                    None => log::warn!("Ignoring malformed size '{v}'"),
                }
            } else if let Some(v) = arg.strip_prefix("--width=") {
                w = parse_or_warn(v, "width").or(w);
            } else if let Some(v) = arg.strip_prefix("--height=") {
                h = parse_or_warn(v, "height").or(h);
            } else if let Some(v) = arg.strip_prefix("--frames=") {
                cfg.frames = parse_or_warn(v, "frames").unwrap_or(cfg.frames);
            } else if let Some(v) = arg.strip_prefix("--crate-angle=") {
                cfg.crate_angle = parse_or_warn(v, "crate angle").unwrap_or(cfg.crate_angle);
            } else if let Some(v) = arg.strip_prefix("--lid-angle=") {
                cfg.lid_angle = parse_or_warn(v, "lid angle").unwrap_or(cfg.lid_angle);
            } else if let Some(v) = arg.strip_prefix("--light=") {
                match parse_triple(v) {
                    Some(light) => cfg.light = light,
                    None => log::warn!("Ignoring malformed light '{v}'"),
                }
            } else {
                log::warn!("Unknown argument '{arg}', ignored.");
            }
        }

        // a zero-sized viewport would give an infinite aspect ratio
        cfg.width = w.unwrap_or(cfg.width).max(1);
        cfg.height = h.unwrap_or(cfg.height).max(1);
        Ok(cfg)
    }
}

fn parse_triple(value: &str) -> Option<[f64; 3]> {
    let mut parts = value.split(',').map(|p| p.trim().parse::<f64>());
    let triple = [parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?];
    parts.next().is_none().then_some(triple)
}

fn parse_or_warn<T: FromStr>(value: &str, what: &str) -> Option<T> {
    match value.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring invalid {what} '{value}'");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_args() {
        let cfg = AppConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn parses_all_flags() {
        let cfg = AppConfig::from_args([
            "--scene=shadow",
            "--size=800x600",
            "--frames=5",
            "--crate-angle=45.5",
            "--lid-angle=90",
        ])
        .unwrap();
        assert_eq!(cfg.scene, SceneKind::Shadow);
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert_eq!(cfg.frames, 5);
        assert_eq!(cfg.crate_angle, 45.5);
        assert_eq!(cfg.lid_angle, 90.0);
    }

    #[test]
    fn zero_height_is_clamped() {
        let cfg = AppConfig::from_args(["--width=640", "--height=0"]).unwrap();
        assert_eq!((cfg.width, cfg.height), (640, 1));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let cfg = AppConfig::from_args(["--size=wide", "--frames=lots"]).unwrap();
        assert_eq!((cfg.width, cfg.height), (1280, 720));
        assert_eq!(cfg.frames, 1);
    }

    #[test]
    fn light_needs_three_components() {
        let cfg = AppConfig::from_args(["--scene=sun", "--light=0, 0.5 ,1"]).unwrap();
        assert_eq!(cfg.scene, SceneKind::Directional);
        assert_eq!(cfg.light, [0.0, 0.5, 1.0]);
        let cfg = AppConfig::from_args(["--light=1,2", "--light=1,2,3,4"]).unwrap();
        assert_eq!(cfg.light, AppConfig::default().light);
    }

    #[test]
    fn unknown_scene_is_an_error() {
        assert!(AppConfig::from_args(["--scene=terrain"]).is_err());
        assert_eq!("ROTATING".parse::<SceneKind>().unwrap(), SceneKind::Rotating);
    }
}
