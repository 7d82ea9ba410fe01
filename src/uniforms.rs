//! The per-frame uniform block handed to the GPU.
//!
//! # Layout
//!
//! | Bytes      | Floats     | Field                         |
//! |------------|------------|-------------------------------|
//! | `[0, 64)`    | `[0, 16)`  | projection matrix (column-major) |
//! | `[64, 128)`  | `[16, 32)` | model transform (column-major)   |
//! | `[128, 140)` | `[32, 35)` | RGB color, each in `[0, 1]`      |
//! | `[140, 144)` | `35`       | padding, always zero             |
//!
//! This matches a WGSL struct of two `mat4x4<f32>` followed by a `vec3<f32>`,
//! whose size rounds up to 144 bytes.

use glam::Mat4;

/// Number of floats in [`FrameUniforms`].
pub const UNIFORM_FLOATS: usize = 36;

/// Size of [`FrameUniforms`] in bytes.
pub const UNIFORM_SIZE: usize = UNIFORM_FLOATS * std::mem::size_of::<f32>();

/// Uniform record uploaded once per frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    /// Perspective projection.
    pub projection: [f32; 16],
    /// Model transform (rotation and translation, no scale).
    pub transform: [f32; 16],
    /// Base color multiplied into the shaded surface.
    pub color: [f32; 3],
    /// Unused tail that pads the block to 144 bytes.
    pub _padding: f32,
}

const _: () = assert!(std::mem::size_of::<FrameUniforms>() == UNIFORM_SIZE);

impl FrameUniforms {
    /// Packs the two matrices and the color; the padding slot is zeroed.
    pub fn pack(projection: Mat4, transform: Mat4, color: [f32; 3]) -> Self {
        Self {
            projection: projection.to_cols_array(),
            transform: transform.to_cols_array(),
            color,
            _padding: 0.0,
        }
    }

    /// The record as 36 floats, in upload order.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }

    /// The record as raw bytes for `Queue::write_buffer`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math;
    use glam::Vec3;

    fn numbered(start: f32) -> Mat4 {
        let mut m = [0.0; 16];
        for (i, v) in m.iter_mut().enumerate() {
            *v = start + i as f32;
        }
        Mat4::from_cols_array(&m)
    }

    #[test]
    fn record_is_144_bytes() {
        let u = FrameUniforms::pack(Mat4::IDENTITY, Mat4::IDENTITY, [1.0, 1.0, 1.0]);
        assert_eq!(u.as_bytes().len(), 144);
        assert_eq!(u.as_floats().len(), 36);
    }

    #[test]
    fn fields_land_in_documented_slots() {
        let p = numbered(100.0);
        let m = numbered(200.0);
        let u = FrameUniforms::pack(p, m, [0.2, 0.4, 0.6]);
        let f = u.as_floats();

        assert_eq!(&f[0..16], &p.to_cols_array()[..]);
        assert_eq!(&f[16..32], &m.to_cols_array()[..]);
        assert_eq!(&f[32..35], &[0.2f32, 0.4, 0.6]);
        assert_eq!(f[35], 0.0);
    }

    #[test]
    fn color_bytes_follow_matrices() {
        let u = FrameUniforms::pack(Mat4::IDENTITY, Mat4::IDENTITY, [0.5, 0.25, 1.0]);
        let b = u.as_bytes();
        let color_r = f32::from_ne_bytes([b[128], b[129], b[130], b[131]]);
        assert_eq!(color_r, 0.5);
        assert_eq!(&b[140..144], &[0u8; 4]);
    }

    #[test]
    fn packing_is_deterministic() {
        let p = math::projection(70.0, 4.0 / 3.0, 0.01, 100.0);
        let m = math::multiply(math::translation(Vec3::Z * 2.0), math::rotation_y(0.3));
        let a = FrameUniforms::pack(p, m, [0.1, 0.2, 0.3]);
        let b = FrameUniforms::pack(p, m, [0.1, 0.2, 0.3]);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }
}
