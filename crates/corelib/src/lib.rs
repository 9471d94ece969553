//! Shared 3D math for the lab scenes: vectors, column-major 4×4 matrices,
//! look-at cameras, perspective projection and spot-light shadow matrices.
//!
//! Everything here is a pure function over small `Copy` values. Failures are
//! reported as [`DomainError`] and never as NaN-filled results.

pub mod camera;
pub mod error;
pub mod light;
pub mod mat4;
pub mod transform;
pub mod uniform;
pub mod vec3;

pub use camera::{CameraFrame, Perspective, look_at_matrix, look_at_matrix_within};
pub use error::{DomainError, DomainResult};
pub use light::SpotLight;
pub use mat4::{Matrix4, deg_to_rad};
pub use transform::Transform;
pub use uniform::MatrixUniform;
pub use vec3::Vector3;
