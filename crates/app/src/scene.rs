//! Lab scenes: per-frame state and the uniforms each frame would upload.

use std::fmt;

use anyhow::{Context, Result};
use labmath::{CameraFrame, Matrix4, SpotLight, Transform, Vector3, deg_to_rad};

#[cfg(test)]
use labmath::DomainError;

use crate::config::{AppConfig, SceneKind};

/// A named value bound to a shader uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniform {
    pub name: &'static str,
    pub value: UniformValue,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Mat4(Matrix4),
    Vec3(Vector3),
    Float(f64),
}

impl Uniform {
    fn mat4(name: &'static str, m: Matrix4) -> Self {
        Self {
            name,
            value: UniformValue::Mat4(m),
        }
    }

    fn vec3(name: &'static str, v: Vector3) -> Self {
        Self {
            name,
            value: UniformValue::Vec3(v),
        }
    }

    fn float(name: &'static str, f: f64) -> Self {
        Self {
            name,
            value: UniformValue::Float(f),
        }
    }
}

impl fmt::Display for Uniform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            UniformValue::Mat4(m) => {
                writeln!(f, "{} (mat4):", self.name)?;
                for row in 0..4 {
                    let r = [m[row], m[4 + row], m[8 + row], m[12 + row]];
                    writeln!(
                        f,
                        "  [{:>12.5} {:>12.5} {:>12.5} {:>12.5}]",
                        r[0], r[1], r[2], r[3]
                    )?;
                }
                Ok(())
            }
            UniformValue::Vec3(v) => writeln!(f, "{} (vec3): ({:.5}, {:.5}, {:.5})", self.name, v.x, v.y, v.z),
            UniformValue::Float(x) => writeln!(f, "{} (float): {:.5}", self.name, x),
        }
    }
}

/// Cube that drifts on a circle while spinning about X.
#[derive(Clone, Debug)]
pub struct RotatingScene {
    pub object: Transform,
    phase: f64,
}

impl RotatingScene {
    pub fn new() -> Self {
        Self {
            object: Transform::from_srs(
                Vector3::new(-250.0, 0.0, -450.0),
                Vector3::new(90.0, 30.0, 300.0),
                Vector3::new(1.0, 1.0, 1.0),
            ),
            phase: 0.0,
        }
    }

    pub fn step(&mut self) {
        self.phase += 0.1;
        self.object.shift.x += 10.0 * self.phase.sin();
        self.object.shift.y += 10.0 * self.phase.cos();
        self.object.rotate_degrees.x += 1.0;
    }

    pub fn uniforms(&self, width: f64, height: f64) -> Vec<Uniform> {
        let projection = Matrix4::perspective(width, height);
        vec![Uniform::mat4("u_matrix", self.object.model_view_projection(&projection))]
    }
}

impl Default for RotatingScene {
    fn default() -> Self {
        Self::new()
    }
}

/// Crate that turns about Y and a lid hinged about Z.
#[derive(Clone, Debug)]
pub struct CrateScene {
    pub body: Transform,
    pub lid: Transform,
    crate_angle: f64,
    lid_angle: f64,
}

impl CrateScene {
    pub const TURN_SPEED: f64 = 1.5;
    pub const LID_SPEED: f64 = 1.5;
    pub const LID_MAX: f64 = 270.0;

    pub fn new(crate_angle: f64, lid_angle: f64) -> Self {
        let mut scene = Self {
            body: Transform::from_srs(
                Vector3::new(0.0, -80.0, -400.0),
                Vector3::ZERO,
                Vector3::new(1.0, 1.0, 1.0),
            ),
            lid: Transform::from_srs(
                Vector3::new(0.0, 0.0, -400.0),
                Vector3::ZERO,
                Vector3::new(1.0, 0.03, 1.0),
            ),
            crate_angle: 0.0,
            lid_angle: 0.0,
        };
        scene.set_angles(crate_angle, lid_angle);
        scene
    }

    /// Turn the whole crate; the angle wraps around at 0° and 360°.
    pub fn turn(&mut self, delta: f64) {
        let mut angle = self.crate_angle + delta;
        if angle < 0.0 {
            angle = 360.0;
        }
        if angle > 360.0 {
            angle = 0.0;
        }
        self.set_angles(angle, self.lid_angle);
    }

    /// Open (positive) or close the lid, clamped to `[0, LID_MAX]`.
    pub fn lift(&mut self, delta: f64) {
        let angle = (self.lid_angle + delta).clamp(0.0, Self::LID_MAX);
        self.set_angles(self.crate_angle, angle);
    }

    pub fn step(&mut self) {
        self.turn(Self::TURN_SPEED);
        self.lift(Self::LID_SPEED);
    }

    fn set_angles(&mut self, crate_angle: f64, lid_angle: f64) {
        self.crate_angle = crate_angle;
        self.lid_angle = lid_angle;
        self.body.rotate_degrees.y = crate_angle;
        self.lid.rotate_degrees.y = crate_angle;
        self.lid.rotate_degrees.z = lid_angle;
        self.lid.shift.y = deg_to_rad(lid_angle).sin() - 29.5;
    }

    pub fn angles(&self) -> (f64, f64) {
        (self.crate_angle, self.lid_angle)
    }

    pub fn uniforms(&self, width: f64, height: f64) -> Vec<Uniform> {
        let projection = Matrix4::perspective(width, height);
        vec![
            Uniform::mat4("u_crate", self.body.model_view_projection(&projection)),
            Uniform::mat4("u_lid", self.lid.model_view_projection(&projection)),
        ]
    }
}

/// Cube shaded by a directional light. Each light component is nudged in
/// tenths and kept within `[0, 1]`, so all three can reach zero together.
#[derive(Clone, Debug)]
pub struct DirectionalScene {
    pub camera: CameraFrame,
    light: Vector3,
}

impl DirectionalScene {
    pub const LIGHT_STEP: f64 = 0.1;

    pub fn new(light: [f64; 3]) -> Self {
        let mut scene = Self {
            camera: CameraFrame::looking_at(Vector3::new(250.0, 100.0, 100.0), Vector3::ZERO),
            light: Vector3::ZERO,
        };
        scene.nudge(Vector3::from(light));
        scene
    }

    /// Move the light by `delta`, clamping every component to `[0, 1]`.
    pub fn nudge(&mut self, delta: Vector3) {
        let v = self.light + delta;
        self.light = Vector3::new(
            v.x.clamp(0.0, 1.0),
            v.y.clamp(0.0, 1.0),
            v.z.clamp(0.0, 1.0),
        );
    }

    pub fn light(&self) -> Vector3 {
        self.light
    }

    pub fn uniforms(&self, width: f64, height: f64) -> Result<Vec<Uniform>> {
        let view = self
            .camera
            .view_matrix()
            .context("Failed to build the camera view matrix")?;
        let light = self
            .light
            .normalize()
            .context("Light direction has zero length")?;
        Ok(vec![
            Uniform::mat4("u_perspective", Matrix4::perspective(width, height)),
            Uniform::mat4("u_camera", view),
            Uniform::vec3("u_light", light),
        ])
    }
}

/// Cube lit by a point light, seen from a fixed look-at camera.
#[derive(Clone, Debug)]
pub struct LitScene {
    pub camera: CameraFrame,
    pub light_position: Vector3,
    pub shininess: f64,
}

impl LitScene {
    pub fn new() -> Self {
        Self {
            camera: CameraFrame::looking_at(Vector3::new(250.0, 100.0, 100.0), Vector3::ZERO),
            light_position: Vector3::new(100.0, 90.0, -80.0),
            shininess: 2.0,
        }
    }

    pub fn uniforms(&self, width: f64, height: f64) -> Result<Vec<Uniform>> {
        let view = self
            .camera
            .view_matrix()
            .context("Failed to build the camera view matrix")?;
        Ok(vec![
            Uniform::mat4("u_perspective", Matrix4::perspective(width, height)),
            Uniform::mat4("u_camera", view),
            Uniform::vec3("u_lightWorldPosition", self.light_position),
            Uniform::vec3("u_viewWorldPosition", self.camera.position),
            Uniform::float("u_shininess", self.shininess),
        ])
    }
}

impl Default for LitScene {
    fn default() -> Self {
        Self::new()
    }
}

/// Spot light casting shadows through a depth pass.
#[derive(Clone, Debug)]
pub struct ShadowScene {
    pub camera: CameraFrame,
    pub light: SpotLight,
}

impl ShadowScene {
    pub fn new() -> Self {
        Self {
            camera: CameraFrame::looking_at(
                Vector3::new(-200.0, 300.0, 500.0),
                Vector3::new(50.0, 100.0, 0.0),
            ),
            light: SpotLight::new(
                CameraFrame::looking_at(
                    Vector3::new(200.0, 150.0, 250.0),
                    Vector3::new(0.0, 50.0, 0.0),
                ),
                150.0,
                100.0,
                -0.005,
            ),
        }
    }

    /// Uniforms of the depth pass rendered from the light.
    pub fn depth_pass_uniforms(&self) -> Result<Vec<Uniform>> {
        let view = self
            .light
            .view_matrix()
            .context("Failed to build the light view matrix")?;
        Ok(vec![
            Uniform::mat4("u_perspective", self.light.projection()),
            Uniform::mat4("u_camera", view),
        ])
    }

    /// Uniforms of the lit color pass.
    pub fn uniforms(&self, width: f64, height: f64) -> Result<Vec<Uniform>> {
        let view = self
            .camera
            .view_matrix()
            .context("Failed to build the camera view matrix")?;
        let eye = self
            .camera
            .world_position()
            .context("Failed to read the camera position")?;
        let direction = self
            .light
            .direction()
            .context("Failed to aim the spot light")?;
        let texture = self
            .light
            .texture_matrix()
            .context("Failed to build the shadow texture matrix")?;
        Ok(vec![
            Uniform::mat4("u_textureMatrix", texture),
            Uniform::mat4("u_perspective", Matrix4::perspective(width, height)),
            Uniform::mat4("u_camera", view),
            Uniform::vec3("u_lightWorldPosition", self.light.position()),
            Uniform::vec3("u_viewWorldPosition", eye),
            Uniform::vec3("u_lightDirection", direction),
            Uniform::float("u_innerLimit", self.light.inner_limit()),
            Uniform::float("u_outerLimit", self.light.outer_limit()),
            Uniform::float("u_shininess", self.light.shininess),
            Uniform::float("u_bias", self.light.bias),
        ])
    }
}

impl Default for ShadowScene {
    fn default() -> Self {
        Self::new()
    }
}

pub enum Scene {
    Rotating(RotatingScene),
    Crate(CrateScene),
    Directional(DirectionalScene),
    Lit(LitScene),
    Shadow(ShadowScene),
}

impl Scene {
    pub fn from_config(cfg: &AppConfig) -> Self {
        match cfg.scene {
            SceneKind::Rotating => Self::Rotating(RotatingScene::new()),
            SceneKind::Crate => Self::Crate(CrateScene::new(cfg.crate_angle, cfg.lid_angle)),
            SceneKind::Directional => Self::Directional(DirectionalScene::new(cfg.light)),
            SceneKind::Lit => Self::Lit(LitScene::new()),
            SceneKind::Shadow => Self::Shadow(ShadowScene::new()),
        }
    }

    /// Advance the animation by one frame. Static scenes do nothing.
    pub fn step(&mut self) {
        match self {
            Self::Rotating(s) => s.step(),
            Self::Crate(s) => s.step(),
            Self::Directional(_) | Self::Lit(_) | Self::Shadow(_) => {}
        }
    }

    /// Every uniform of the frame, depth pass first where there is one.
    pub fn frame_uniforms(&self, width: u32, height: u32) -> Result<Vec<Uniform>> {
        let (w, h) = (f64::from(width), f64::from(height));
        Ok(match self {
            Self::Rotating(s) => s.uniforms(w, h),
            Self::Crate(s) => s.uniforms(w, h),
            Self::Directional(s) => s.uniforms(w, h)?,
            Self::Lit(s) => s.uniforms(w, h)?,
            Self::Shadow(s) => {
                let mut all = s.depth_pass_uniforms()?;
                all.extend(s.uniforms(w, h)?);
                all
            }
        })
    }
}
