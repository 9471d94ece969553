//! 4×4 matrices stored as 16 column-major values.
//!
//! Element `(row, col)` lives at flat index `4 * col + row`, the order
//! `uniformMatrix4fv`-style uploads expect. Translation therefore sits at
//! indices 12, 13 and 14.

use std::f64::consts::PI;
use std::ops::{Index, Mul};

use crate::error::{DomainError, DomainResult};
use crate::vec3::Vector3;

/// Degrees to radians, `d * π / 180`.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4(pub [f64; 16]);

impl Matrix4 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub const ZERO: Self = Self([0.0; 16]);

    #[inline]
    pub const fn from_cols_array(m: [f64; 16]) -> Self {
        Self(m)
    }

    /// Build from an arbitrary slice, rejecting anything but 16 values.
    pub fn try_from_slice(values: &[f64]) -> DomainResult<Self> {
        let m: [f64; 16] = values.try_into().map_err(|_| DomainError::ElementCount {
            expected: 16,
            found: values.len(),
        })?;
        Ok(Self(m))
    }

    #[inline]
    pub const fn to_cols_array(&self) -> [f64; 16] {
        self.0
    }

    /// Narrow to `f32` for GPU upload, keeping column-major order.
    pub fn to_f32_array(&self) -> [f32; 16] {
        self.0.map(|v| v as f32)
    }

    /// Column `i` as `[x, y, z, w]`.
    ///
    /// # Panics
    /// If `i > 3`.
    #[inline]
    pub fn col(&self, i: usize) -> [f64; 4] {
        let m = &self.0;
        [m[4 * i], m[4 * i + 1], m[4 * i + 2], m[4 * i + 3]]
    }

    #[rustfmt::skip]
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            tx,  ty,  tz,  1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        Self([
            sx,  0.0, 0.0, 0.0,
            0.0, sy,  0.0, 0.0,
            0.0, 0.0, sz,  0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self([
            1.0, 0.0, 0.0, 0.0,
            0.0,  c,   s,  0.0,
            0.0, -s,   c,  0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self([
             c,  0.0, -s,  0.0,
            0.0, 1.0, 0.0, 0.0,
             s,  0.0,  c,  0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self([
             c,   s,  0.0, 0.0,
            -s,   c,  0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[inline]
    pub fn rotation_x_deg(degrees: f64) -> Self {
        Self::rotation_x(deg_to_rad(degrees))
    }

    #[inline]
    pub fn rotation_y_deg(degrees: f64) -> Self {
        Self::rotation_y(deg_to_rad(degrees))
    }

    #[inline]
    pub fn rotation_z_deg(degrees: f64) -> Self {
        Self::rotation_z(deg_to_rad(degrees))
    }

    /// Symmetric-frustum projection with the default `near = 1`,
    /// `far = 1000` and a 60° vertical field of view.
    ///
    /// `height == 0` is not checked and gives an infinite aspect ratio.
    #[inline]
    pub fn perspective(width: f64, height: f64) -> Self {
        crate::camera::Perspective::default().matrix(width, height)
    }

    #[rustfmt::skip]
    pub fn perspective_with(width: f64, height: f64, near: f64, far: f64, fov_degrees: f64) -> Self {
        let f = (PI * 0.5 - 0.5 * deg_to_rad(fov_degrees)).tan();
        let range_inv = 1.0 / (near - far);
        let aspect = width / height;
        Self([
            f / aspect, 0.0, 0.0,                           0.0,
            0.0,        f,   0.0,                           0.0,
            0.0,        0.0, (near + far) * range_inv,      -1.0,
            0.0,        0.0, near * far * range_inv * 2.0,  0.0,
        ])
    }

    /// Column-major product `self · other`: `other` is applied first.
    ///
    /// `Matrix4::translation(..).multiply(&Matrix4::rotation_y(..))` rotates
    /// a point and then moves it.
    pub fn multiply(&self, other: &Self) -> Self {
        let (a, b) = (&self.0, &other.0);
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[4 * col + row] = (0..4).map(|k| b[4 * col + k] * a[4 * k + row]).sum();
            }
        }
        Self(out)
    }

    /// Determinant as the full 24-term permutation expansion.
    #[rustfmt::skip]
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0] * m[5] * m[10] * m[15] + m[0] * m[6] * m[11] * m[13] + m[0] * m[7] * m[9] * m[14] +
            m[1] * m[4] * m[11] * m[14] + m[1] * m[6] * m[8] * m[15] + m[1] * m[7] * m[10] * m[12] +
            m[2] * m[4] * m[9] * m[15] + m[2] * m[5] * m[11] * m[12] + m[2] * m[7] * m[8] * m[13] +
            m[3] * m[4] * m[10] * m[13] + m[3] * m[5] * m[8] * m[14] + m[3] * m[6] * m[9] * m[12] -
            m[0] * m[5] * m[11] * m[14] - m[0] * m[6] * m[9] * m[15] - m[0] * m[7] * m[10] * m[13] -
            m[1] * m[4] * m[10] * m[15] - m[1] * m[6] * m[11] * m[12] - m[1] * m[7] * m[8] * m[14] -
            m[2] * m[4] * m[11] * m[13] - m[2] * m[5] * m[8] * m[15] - m[2] * m[7] * m[9] * m[12] -
            m[3] * m[4] * m[9] * m[14] - m[3] * m[5] * m[10] * m[12] - m[3] * m[6] * m[8] * m[13]
    }

    /// Inverse by closed-form cofactor expansion (adjugate over determinant).
    ///
    /// There is no pivoting: near-singular input loses precision, and only
    /// an exactly zero determinant is rejected.
    #[rustfmt::skip]
    pub fn invert(&self) -> DomainResult<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(DomainError::SingularMatrix);
        }
        let m = &self.0;
        Ok(Self([
            (m[5] * m[10] * m[15] + m[6] * m[11] * m[13] + m[7] * m[9] * m[14]
                - m[5] * m[11] * m[14] - m[6] * m[9] * m[15] - m[7] * m[10] * m[13]) / det,
            (m[1] * m[11] * m[14] + m[2] * m[9] * m[15] + m[3] * m[10] * m[13]
                - m[1] * m[10] * m[15] - m[2] * m[11] * m[13] - m[3] * m[9] * m[14]) / det,
            (m[1] * m[6] * m[15] + m[2] * m[7] * m[13] + m[3] * m[5] * m[14]
                - m[1] * m[7] * m[14] - m[2] * m[5] * m[15] - m[3] * m[6] * m[13]) / det,
            (m[1] * m[7] * m[10] + m[2] * m[5] * m[11] + m[3] * m[6] * m[9]
                - m[1] * m[6] * m[11] - m[2] * m[7] * m[9] - m[3] * m[5] * m[10]) / det,
            (m[4] * m[11] * m[14] + m[6] * m[8] * m[15] + m[7] * m[10] * m[12]
                - m[4] * m[10] * m[15] - m[6] * m[11] * m[12] - m[7] * m[8] * m[14]) / det,
            (m[0] * m[10] * m[15] + m[2] * m[11] * m[12] + m[3] * m[8] * m[14]
                - m[0] * m[11] * m[14] - m[2] * m[8] * m[15] - m[3] * m[10] * m[12]) / det,
            (m[0] * m[7] * m[14] + m[2] * m[4] * m[15] + m[3] * m[6] * m[12]
                - m[0] * m[6] * m[15] - m[2] * m[7] * m[12] - m[3] * m[4] * m[14]) / det,
            (m[0] * m[6] * m[11] + m[2] * m[7] * m[8] + m[3] * m[4] * m[10]
                - m[0] * m[7] * m[10] - m[2] * m[4] * m[11] - m[3] * m[6] * m[8]) / det,
            (m[4] * m[9] * m[15] + m[5] * m[11] * m[12] + m[7] * m[8] * m[13]
                - m[4] * m[11] * m[13] - m[5] * m[8] * m[15] - m[7] * m[9] * m[12]) / det,
            (m[0] * m[11] * m[13] + m[1] * m[8] * m[15] + m[3] * m[9] * m[12]
                - m[0] * m[9] * m[15] - m[1] * m[11] * m[12] - m[3] * m[8] * m[13]) / det,
            (m[0] * m[5] * m[15] + m[1] * m[7] * m[12] + m[3] * m[4] * m[13]
                - m[0] * m[7] * m[13] - m[1] * m[4] * m[15] - m[3] * m[5] * m[12]) / det,
            (m[0] * m[7] * m[9] + m[1] * m[4] * m[11] + m[3] * m[5] * m[8]
                - m[0] * m[5] * m[11] - m[1] * m[7] * m[8] - m[3] * m[4] * m[9]) / det,
            (m[4] * m[10] * m[13] + m[5] * m[8] * m[14] + m[6] * m[9] * m[12]
                - m[4] * m[9] * m[14] - m[5] * m[10] * m[12] - m[6] * m[8] * m[13]) / det,
            (m[0] * m[9] * m[14] + m[1] * m[10] * m[12] + m[2] * m[8] * m[13]
                - m[0] * m[10] * m[13] - m[1] * m[8] * m[14] - m[2] * m[9] * m[12]) / det,
            (m[0] * m[6] * m[13] + m[1] * m[4] * m[14] + m[2] * m[5] * m[12]
                - m[0] * m[5] * m[14] - m[1] * m[6] * m[12] - m[2] * m[4] * m[13]) / det,
            (m[0] * m[5] * m[10] + m[1] * m[6] * m[8] + m[2] * m[4] * m[9]
                - m[0] * m[6] * m[9] - m[1] * m[4] * m[10] - m[2] * m[5] * m[8]) / det,
        ]))
    }

    /// Matrix-vector product `self · v` for a homogeneous `[x, y, z, w]`.
    pub fn transform(&self, v: [f64; 4]) -> [f64; 4] {
        let m = &self.0;
        let mut out = [0.0; 4];
        for (row, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|col| m[4 * col + row] * v[col]).sum();
        }
        out
    }

    /// Transform a point (`w = 1`) and drop the homogeneous coordinate
    /// without dividing by it.
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let [x, y, z, _] = self.transform([p.x, p.y, p.z, 1.0]);
        Vector3::new(x, y, z)
    }

    /// `self · translation(tx, ty, tz)`.
    #[inline]
    pub fn translate(&self, tx: f64, ty: f64, tz: f64) -> Self {
        self.multiply(&Self::translation(tx, ty, tz))
    }

    #[inline]
    pub fn rotate_x(&self, angle: f64) -> Self {
        self.multiply(&Self::rotation_x(angle))
    }

    #[inline]
    pub fn rotate_y(&self, angle: f64) -> Self {
        self.multiply(&Self::rotation_y(angle))
    }

    #[inline]
    pub fn rotate_z(&self, angle: f64) -> Self {
        self.multiply(&Self::rotation_z(angle))
    }

    #[inline]
    pub fn scale(&self, sx: f64, sy: f64, sz: f64) -> Self {
        self.multiply(&Self::scaling(sx, sy, sz))
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Matrix4 {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl TryFrom<&[f64]> for Matrix4 {
    type Error = DomainError;

    fn try_from(values: &[f64]) -> DomainResult<Self> {
        Self::try_from_slice(values)
    }
}

impl From<glam::DMat4> for Matrix4 {
    #[inline]
    fn from(m: glam::DMat4) -> Self {
        Self(m.to_cols_array())
    }
}

impl From<Matrix4> for glam::DMat4 {
    #[inline]
    fn from(m: Matrix4) -> Self {
        glam::DMat4::from_cols_array(&m.0)
    }
}

impl From<Matrix4> for glam::Mat4 {
    #[inline]
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.to_f32_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const SAMPLE: Matrix4 = Matrix4([
        2.0, 0.5, -1.0, 0.0,
        1.0, 3.0,  0.0, 0.25,
        0.0, -2.0, 4.0, 1.0,
        5.0, 1.0, -3.0, 1.0,
    ]);

    fn assert_close(a: &Matrix4, b: &Matrix4, eps: f64) {
        for i in 0..16 {
            assert!(
                (a[i] - b[i]).abs() < eps,
                "index {i}: {} vs {} ({a:?} vs {b:?})",
                a[i],
                b[i]
            );
        }
    }

    fn samples() -> Vec<Matrix4> {
        vec![
            SAMPLE,
            Matrix4::translation(10.0, -4.0, 2.5),
            Matrix4::rotation_x(0.3).multiply(&Matrix4::rotation_z(-1.2)),
            Matrix4::translation(-250.0, 0.0, -450.0)
                .rotate_x(deg_to_rad(90.0))
                .rotate_y(deg_to_rad(30.0))
                .scale(1.0, 0.03, 1.0),
            Matrix4::perspective(1280.0, 720.0),
        ]
    }

    #[test]
    fn translation_moves_the_origin() {
        let p = Matrix4::translation(10.0, 0.0, 0.0).transform([0.0, 0.0, 0.0, 1.0]);
        assert_eq!(p, [10.0, 0.0, 0.0, 1.0]);
        let m = Matrix4::translation(1.0, 2.0, 3.0);
        assert_eq!((m[12], m[13], m[14]), (1.0, 2.0, 3.0));
    }

    #[test]
    fn scaling_is_diagonal() {
        let m = Matrix4::scaling(2.0, 3.0, 4.0);
        assert_eq!((m[0], m[5], m[10], m[15]), (2.0, 3.0, 4.0, 1.0));
        assert_eq!(
            m.transform_point(Vector3::new(1.0, 1.0, 1.0)),
            Vector3::new(2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn rotation_y_half_turn_flips_x() {
        let v = Matrix4::rotation_y(PI).transform([1.0, 0.0, 0.0, 0.0]);
        assert!((v[0] + 1.0).abs() < 1e-6);
        assert!(v[1].abs() < 1e-6);
        assert!(v[2].abs() < 1e-6);
        assert_eq!(Matrix4::rotation_y(0.0), Matrix4::IDENTITY);
    }

    #[test]
    fn rotation_sign_placement() {
        let a = 0.4_f64;
        let (s, c) = a.sin_cos();
        let x = Matrix4::rotation_x(a);
        assert_eq!((x[5], x[6], x[9], x[10]), (c, s, -s, c));
        let y = Matrix4::rotation_y(a);
        assert_eq!((y[0], y[2], y[8], y[10]), (c, -s, s, c));
        let z = Matrix4::rotation_z(a);
        assert_eq!((z[0], z[1], z[4], z[5]), (c, s, -s, c));
    }

    #[test]
    fn degree_builders_match_radian_builders() {
        assert_close(&Matrix4::rotation_z_deg(45.0), &Matrix4::rotation_z(PI / 4.0), 1e-15);
        assert_close(&Matrix4::rotation_x_deg(-90.0), &Matrix4::rotation_x(-PI / 2.0), 1e-15);
        assert!((deg_to_rad(180.0) - PI).abs() < 1e-15);
    }

    #[test]
    fn perspective_default_square_viewport() {
        let m = Matrix4::perspective_with(1.0, 1.0, 1.0, 1000.0, 60.0);
        let f = 1.0 / deg_to_rad(30.0).tan();
        assert!((m[0] - f).abs() < 1e-12);
        assert!((m[0] - 1.732).abs() < 1e-3);
        assert!((m[5] - f).abs() < 1e-12);
        assert_eq!(m[11], -1.0);
        assert_eq!(m[15], 0.0);
        assert!((m[10] - 1001.0 / -999.0).abs() < 1e-12);
        assert!((m[14] - 2000.0 / -999.0).abs() < 1e-12);
        assert_eq!(Matrix4::perspective(1.0, 1.0), m);
    }

    #[test]
    fn perspective_divides_by_aspect() {
        let m = Matrix4::perspective(1600.0, 800.0);
        assert!((m[0] * 2.0 - m[5]).abs() < 1e-12);
    }

    #[test]
    fn perspective_zero_height_is_not_rejected() {
        let m = Matrix4::perspective(640.0, 0.0);
        assert_eq!(m[0], 0.0);
        assert!(m[5].is_finite());
    }

    #[test]
    fn multiply_with_identity_is_a_no_op() {
        for m in samples() {
            assert_close(&m.multiply(&Matrix4::IDENTITY), &m, 1e-12);
            assert_close(&Matrix4::IDENTITY.multiply(&m), &m, 1e-12);
        }
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        let t = Matrix4::translation(10.0, 0.0, 0.0);
        let r = Matrix4::rotation_z(PI / 2.0);
        let p = t.multiply(&r).transform([1.0, 0.0, 0.0, 1.0]);
        // rotation_z(π/2) with this sign placement sends x to +y, then +10 on x
        assert!((p[0] - 10.0).abs() < 1e-12);
        assert!((p[1] - 1.0).abs() < 1e-12);
        assert_eq!(t * r, t.multiply(&r));
        assert_eq!(t.rotate_z(PI / 2.0), t.multiply(&r));
    }

    #[test]
    fn multiply_matches_glam() {
        let a = samples()[0];
        let b = samples()[3];
        let expected = glam::DMat4::from(a) * glam::DMat4::from(b);
        assert_close(&a.multiply(&b), &Matrix4::from(expected), 1e-9);
    }

    #[test]
    fn invert_round_trips() {
        for m in samples() {
            let inv = m.invert().expect("non-singular sample");
            assert_close(&inv.invert().expect("inverse is invertible"), &m, 1e-6);
            assert_close(&m.multiply(&inv), &Matrix4::IDENTITY, 1e-9);
        }
    }

    #[test]
    fn invert_matches_glam() {
        let inv = SAMPLE.invert().expect("invertible");
        let expected = glam::DMat4::from(SAMPLE).inverse();
        assert_close(&inv, &Matrix4::from(expected), 1e-12);
        assert!((SAMPLE.determinant() - glam::DMat4::from(SAMPLE).determinant()).abs() < 1e-9);
    }

    #[test]
    fn invert_translation_negates_offset() {
        let inv = Matrix4::translation(3.0, -2.0, 7.0).invert().expect("invertible");
        assert_close(&inv, &Matrix4::translation(-3.0, 2.0, -7.0), 1e-15);
    }

    #[test]
    fn invert_singular_is_an_error() {
        assert_eq!(Matrix4::ZERO.invert(), Err(DomainError::SingularMatrix));
        assert_eq!(
            Matrix4::scaling(1.0, 0.0, 1.0).invert(),
            Err(DomainError::SingularMatrix)
        );
    }

    #[test]
    fn slice_must_hold_sixteen_values() {
        let short = [1.0; 12];
        assert_eq!(
            Matrix4::try_from_slice(&short),
            Err(DomainError::ElementCount {
                expected: 16,
                found: 12
            })
        );
        let full = Matrix4::IDENTITY.to_cols_array();
        assert_eq!(Matrix4::try_from(&full[..]), Ok(Matrix4::IDENTITY));
    }

    #[test]
    fn f32_export_keeps_column_major_order() {
        let m = Matrix4::translation(1.0, 2.0, 3.0);
        let f = m.to_f32_array();
        assert_eq!(&f[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(glam::Mat4::from(m).w_axis.x, 1.0);
        assert_eq!(m.col(3), [1.0, 2.0, 3.0, 1.0]);
    }
}
