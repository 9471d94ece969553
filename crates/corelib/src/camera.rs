use crate::error::DomainResult;
use crate::mat4::Matrix4;
use crate::vec3::Vector3;

/// Camera-to-world matrix for an eye looking at `target` (right-handed).
///
/// Columns are `[x, 0]`, `[y, 0]`, `[z, 0]`, `[eye, 1]` with
/// `z = normalize(eye - target)`, so the camera looks down `-z`. This is NOT
/// a view matrix; invert it to get one.
///
/// Fails when `up` is parallel to `eye - target` (the right axis collapses to
/// zero) or when `eye == target`.
pub fn look_at_matrix(eye: Vector3, target: Vector3, up: Vector3) -> DomainResult<Matrix4> {
    let z_axis = eye.subtract(target).normalize()?;
    let x_axis = up.cross(z_axis).normalize()?;
    let y_axis = z_axis.cross(x_axis).normalize()?;
    Ok(assemble(x_axis, y_axis, z_axis, eye))
}

/// [`look_at_matrix`] that also rejects nearly parallel `up` vectors, whose
/// right axis would otherwise be normalized from a tiny cross product.
pub fn look_at_matrix_within(
    eye: Vector3,
    target: Vector3,
    up: Vector3,
    tolerance: f64,
) -> DomainResult<Matrix4> {
    let z_axis = eye.subtract(target).normalize_within(tolerance)?;
    let x_axis = up.cross(z_axis).normalize_within(tolerance)?;
    let y_axis = z_axis.cross(x_axis).normalize_within(tolerance)?;
    Ok(assemble(x_axis, y_axis, z_axis, eye))
}

#[rustfmt::skip]
fn assemble(x: Vector3, y: Vector3, z: Vector3, eye: Vector3) -> Matrix4 {
    Matrix4::from_cols_array([
        x.x,   x.y,   x.z,   0.0,
        y.x,   y.y,   y.z,   0.0,
        z.x,   z.y,   z.z,   0.0,
        eye.x, eye.y, eye.z, 1.0,
    ])
}

/// Eye, target and up of a camera (or of a spot light, which is aimed the
/// same way).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
    pub position: Vector3,
    pub target: Vector3,
    pub up: Vector3,
}

impl CameraFrame {
    #[inline]
    pub fn new(position: Vector3, target: Vector3, up: Vector3) -> Self {
        Self {
            position,
            target,
            up,
        }
    }

    /// Camera at `position` looking at `target` with `+Y` up.
    #[inline]
    pub fn looking_at(position: Vector3, target: Vector3) -> Self {
        Self::new(position, target, Vector3::Y)
    }

    #[inline]
    pub fn world_matrix(&self) -> DomainResult<Matrix4> {
        look_at_matrix(self.position, self.target, self.up)
    }

    #[inline]
    pub fn world_matrix_within(&self, tolerance: f64) -> DomainResult<Matrix4> {
        look_at_matrix_within(self.position, self.target, self.up, tolerance)
    }

    /// World-to-camera transform: the inverse of [`CameraFrame::world_matrix`].
    pub fn view_matrix(&self) -> DomainResult<Matrix4> {
        self.world_matrix()?.invert()
    }

    /// Eye position read back from the translation column of the world matrix.
    pub fn world_position(&self) -> DomainResult<Vector3> {
        let [x, y, z, _] = self.world_matrix()?.col(3);
        Ok(Vector3::new(x, y, z))
    }

    /// Unit viewing direction, the negated z-axis column of the world matrix.
    pub fn forward(&self) -> DomainResult<Vector3> {
        let [x, y, z, _] = self.world_matrix()?.col(2);
        Ok(-Vector3::new(x, y, z))
    }
}

/// Symmetric perspective frustum. The width/height of the viewport are given
/// per call, since they follow the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perspective {
    pub near: f64,
    pub far: f64,
    pub fov_degrees: f64,
}

impl Perspective {
    #[inline]
    pub fn new(near: f64, far: f64, fov_degrees: f64) -> Self {
        Self {
            near,
            far,
            fov_degrees,
        }
    }

    #[inline]
    pub fn with_fov(mut self, fov_degrees: f64) -> Self {
        self.fov_degrees = fov_degrees;
        self
    }

    #[inline]
    pub fn matrix(&self, width: f64, height: f64) -> Matrix4 {
        Matrix4::perspective_with(width, height, self.near, self.far, self.fov_degrees)
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Self::new(1.0, 1000.0, 60.0)
    }
}
