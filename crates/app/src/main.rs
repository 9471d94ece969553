//! Headless driver for the lab scenes.
//! Steps a scene for a number of frames and logs the uniforms each frame
//! would upload to the GPU.

mod config;
mod scene;

use anyhow::{Context, Result};
use labmath::MatrixUniform;

use crate::config::AppConfig;
use crate::scene::{Scene, UniformValue};

/// Per-frame uniform dumps are verbose; the default `info` filter hides them.
const UNIFORM_LOG_LEVEL: log::Level = log::Level::Debug;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = AppConfig::from_env()?;
    log::info!(
        "Starting labmath-dump. Scene: {:?}, viewport={}x{}, frames={}",
        cfg.scene,
        cfg.width,
        cfg.height,
        cfg.frames
    );

    let mut scene = Scene::from_config(&cfg);
    let mut uploaded_bytes = 0usize;

    for frame in 0..cfg.frames {
        scene.step();
        let uniforms = scene
            .frame_uniforms(cfg.width, cfg.height)
            .with_context(|| format!("Frame {frame} could not be prepared"))?;

        log::info!("Frame {frame}: {} uniforms", uniforms.len());
        if let Scene::Crate(c) = &scene {
            let (yaw, lid) = c.angles();
            log::debug!("Crate yaw {yaw:.1}°, lid {lid:.1}°");
        }
        for u in &uniforms {
            if let UniformValue::Mat4(m) = u.value {
                uploaded_bytes += MatrixUniform::from(&m).as_bytes().len();
            }
            log::log!(UNIFORM_LOG_LEVEL, "{}", u.to_string().trim_end());
        }
    }

    log::debug!("Matrix payload across all frames: {uploaded_bytes} bytes");
    log::info!("Done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_dump_is_below_default_filter() {
        assert!(UNIFORM_LOG_LEVEL > log::Level::Info);
    }
}
