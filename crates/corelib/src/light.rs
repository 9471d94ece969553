//! Spot light with a shadow-map projection.
//!
//! The light is aimed like a camera, so it reuses [`CameraFrame`] for its
//! basis. Its projection and view take world positions into the depth
//! texture the shadow pass renders.

use crate::camera::{CameraFrame, Perspective};
use crate::error::DomainResult;
use crate::mat4::{Matrix4, deg_to_rad};
use crate::vec3::Vector3;

/// Degrees between the outer cone edge and the start of the falloff.
pub const SPOT_FALLOFF_DEGREES: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub frame: CameraFrame,
    /// Full cone angle in degrees.
    pub angle_degrees: f64,
    pub shininess: f64,
    /// Depth bias added before the shadow comparison.
    pub bias: f64,
}

impl SpotLight {
    pub fn new(frame: CameraFrame, angle_degrees: f64, shininess: f64, bias: f64) -> Self {
        Self {
            frame,
            angle_degrees,
            shininess,
            bias,
        }
    }

    #[inline]
    pub fn position(&self) -> Vector3 {
        self.frame.position
    }

    /// Unit direction the light points in.
    #[inline]
    pub fn direction(&self) -> DomainResult<Vector3> {
        self.frame.forward()
    }

    /// Cosine of the half-angle where full intensity ends.
    #[inline]
    pub fn inner_limit(&self) -> f64 {
        deg_to_rad(self.angle_degrees / 2.0 - SPOT_FALLOFF_DEGREES).cos()
    }

    /// Cosine of the cone's half-angle; beyond it the light contributes nothing.
    #[inline]
    pub fn outer_limit(&self) -> f64 {
        deg_to_rad(self.angle_degrees / 2.0).cos()
    }

    /// Square frustum of the depth pass.
    ///
    /// The cone angle doubles as the near plane distance; the field of view
    /// and far plane keep their defaults (60°, 1000). Geometry closer to the
    /// light than `angle_degrees` is clipped out of the shadow map.
    #[inline]
    pub fn projection(&self) -> Matrix4 {
        let defaults = Perspective::default();
        Perspective::new(self.angle_degrees, defaults.far, defaults.fov_degrees).matrix(1.0, 1.0)
    }

    #[inline]
    pub fn view_matrix(&self) -> DomainResult<Matrix4> {
        self.frame.view_matrix()
    }

    /// Projection times view: the matrix the depth pass renders with.
    pub fn light_space_matrix(&self) -> DomainResult<Matrix4> {
        Ok(self.projection().multiply(&self.view_matrix()?))
    }

    /// World position to shadow-map texture coordinates: the clip-space cube
    /// `[-1, 1]` is remapped to `[0, 1]` on every axis after the divide.
    pub fn texture_matrix(&self) -> DomainResult<Matrix4> {
        let bias = Matrix4::translation(0.5, 0.5, 0.5).multiply(&Matrix4::scaling(0.5, 0.5, 0.5));
        Ok(bias.multiply(&self.light_space_matrix()?))
    }
}
