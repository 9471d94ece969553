//! GPU-ready packing of matrices for uniform upload.

use bytemuck::{Pod, Zeroable};

use crate::mat4::Matrix4;

/// A `mat4` uniform: four `f32` columns, 64 bytes, 16-byte aligned.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MatrixUniform {
    pub cols: [[f32; 4]; 4],
}

impl MatrixUniform {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Flat column-major view, the layout `uniformMatrix4fv` takes.
    pub fn as_flat(&self) -> &[f32; 16] {
        bytemuck::cast_ref(&self.cols)
    }
}

impl From<&Matrix4> for MatrixUniform {
    fn from(m: &Matrix4) -> Self {
        let f = m.to_f32_array();
        Self {
            cols: [
                [f[0], f[1], f[2], f[3]],
                [f[4], f[5], f[6], f[7]],
                [f[8], f[9], f[10], f[11]],
                [f[12], f[13], f[14], f[15]],
            ],
        }
    }
}

impl From<Matrix4> for MatrixUniform {
    #[inline]
    fn from(m: Matrix4) -> Self {
        Self::from(&m)
    }
}
