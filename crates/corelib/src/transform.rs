use crate::mat4::Matrix4;
use crate::vec3::Vector3;

/// Per-object placement: shift, Euler rotation in degrees and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub shift: Vector3,
    /// Degrees about X, Y and Z, applied Z first.
    pub rotate_degrees: Vector3,
    pub scale: Vector3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            shift: Vector3::ZERO,
            rotate_degrees: Vector3::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    #[inline]
    pub fn from_srs(shift: Vector3, rotate_degrees: Vector3, scale: Vector3) -> Self {
        Self {
            shift,
            rotate_degrees,
            scale,
        }
    }

    /// Build matrix = T · Rx · Ry · Rz · S.
    pub fn matrix(&self) -> Matrix4 {
        let Vector3 { x, y, z } = self.rotate_degrees;
        Matrix4::translation(self.shift.x, self.shift.y, self.shift.z)
            .multiply(&Matrix4::rotation_x_deg(x))
            .multiply(&Matrix4::rotation_y_deg(y))
            .multiply(&Matrix4::rotation_z_deg(z))
            .scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// `projection · matrix()`, the single matrix a vertex shader needs.
    #[inline]
    pub fn model_view_projection(&self, projection: &Matrix4) -> Matrix4 {
        projection.multiply(&self.matrix())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
