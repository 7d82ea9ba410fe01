//! Column-major 4×4 matrix algebra for the model and projection transforms.
//!
//! Matrices are [`glam::Mat4`] values: sixteen `f32` stored as four columns, so
//! element `(row, col)` lives at linear index `col * 4 + row` of
//! [`Mat4::to_cols_array`]. Every function here is pure and returns a fresh
//! matrix.
//!
//! Composition follows the column-vector convention: in `multiply(a, b)` the
//! right-hand matrix is applied first.
//!
//! ```
//! use turntable::math;
//! use turntable::Vec3;
//!
//! let model = math::multiply(
//!     math::translation(Vec3::new(0.0, 0.0, 2.0)),
//!     math::rotation_y(std::f32::consts::FRAC_PI_2),
//! );
//! let p = math::transform_point(model, Vec3::X);
//! assert!((p - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
//! ```

use glam::{Mat4, Vec3};

/// The identity matrix.
pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

/// Matrix product `a · b`.
///
/// `result[row, col] = Σ_k a[row, k] · b[k, col]`. Not commutative: applied to a
/// column vector, `b` acts first and `a` second.
pub fn multiply(a: Mat4, b: Mat4) -> Mat4 {
    a * b
}

/// Translation by `v` (indices 12, 13 and 14 of the column array).
pub fn translation(v: Vec3) -> Mat4 {
    let mut m = identity().to_cols_array();
    m[12] = v.x;
    m[13] = v.y;
    m[14] = v.z;
    Mat4::from_cols_array(&m)
}

/// Rotation of `angle` radians around `axis` (Rodrigues' formula).
///
/// The axis is normalized here. A zero-length axis falls back to a length of 1
/// so no division by zero happens; the result is then a uniform `cos(angle)`
/// scale of the upper 3×3 block, which is finite but not a rotation.
pub fn rotation(axis: Vec3, angle: f32) -> Mat4 {
    let len = axis.length();
    let Vec3 { x, y, z } = axis / if len > 0.0 { len } else { 1.0 };

    let (s, c) = angle.sin_cos();
    let v = 1.0 - c;

    #[rustfmt::skip]
    let m = [
        x * x * v + c,     x * y * v + z * s, x * z * v - y * s, 0.0,
        y * x * v - z * s, y * y * v + c,     y * z * v + x * s, 0.0,
        z * x * v + y * s, z * y * v - x * s, z * z * v + c,     0.0,
        0.0,               0.0,               0.0,               1.0,
    ];
    Mat4::from_cols_array(&m)
}

/// Rotation around the X axis.
pub fn rotation_x(angle: f32) -> Mat4 {
    rotation(Vec3::X, angle)
}

/// Rotation around the Y axis.
pub fn rotation_y(angle: f32) -> Mat4 {
    rotation(Vec3::Y, angle)
}

/// Rotation around the Z axis.
pub fn rotation_z(angle: f32) -> Mat4 {
    rotation(Vec3::Z, angle)
}

/// Perspective projection with a vertical field of view in degrees.
///
/// Maps view-space depth in `[near, far]` (looking down +Z) to normalized
/// device depth in `[0, 1]`, with clip `w` taken from view-space `z`.
///
/// Callers must keep `far > near > 0`. With `far == near` the depth terms
/// divide by zero and the matrix contains non-finite values; nothing panics.
pub fn projection(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let cot = 1.0 / (fov_degrees.to_radians() / 2.0).tan();
    let depth = far / (far - near);

    let mut m = [0.0; 16];
    m[0] = cot / aspect;
    m[5] = cot;
    m[10] = depth;
    m[11] = 1.0;
    m[14] = -near * depth;
    Mat4::from_cols_array(&m)
}

/// Applies `m` to the point `p` (w = 1) and returns the xyz part.
///
/// No perspective divide is performed.
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    (m * p.extend(1.0)).truncate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    const EPS: f32 = 1e-5;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        let (a, b) = (a.to_cols_array(), b.to_cols_array());
        for i in 0..16 {
            assert!(
                (a[i] - b[i]).abs() < EPS,
                "element {} differs: {} vs {}",
                i,
                a[i],
                b[i]
            );
        }
    }

    fn sample() -> Mat4 {
        Mat4::from_cols_array(&[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
            16.0,
        ])
    }

    #[test]
    fn identity_has_unit_diagonal() {
        let m = identity().to_cols_array();
        for col in 0..4 {
            for row in 0..4 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_eq!(m[col * 4 + row], expected);
            }
        }
    }

    #[test]
    fn identity_is_neutral_for_multiply() {
        let m = sample();
        assert_mat_eq(multiply(identity(), m), m);
        assert_mat_eq(multiply(m, identity()), m);

        let r = multiply(rotation_y(0.7), translation(Vec3::new(1.0, -2.0, 3.0)));
        assert_mat_eq(multiply(identity(), r), r);
        assert_mat_eq(multiply(r, identity()), r);
    }

    #[test]
    fn multiply_uses_row_by_column() {
        let a = sample();
        let b = translation(Vec3::new(1.0, 2.0, 3.0));
        let (ca, cb) = (a.to_cols_array(), b.to_cols_array());
        let r = multiply(a, b).to_cols_array();

        for col in 0..4 {
            for row in 0..4 {
                let expected: f32 = (0..4).map(|k| ca[k * 4 + row] * cb[col * 4 + k]).sum();
                assert!((r[col * 4 + row] - expected).abs() < EPS);
            }
        }
    }

    #[test]
    fn multiply_is_not_commutative() {
        let t = translation(Vec3::new(0.0, 0.0, 5.0));
        let r = rotation_y(FRAC_PI_2);

        let rotate_then_move = transform_point(multiply(t, r), Vec3::X);
        let move_then_rotate = transform_point(multiply(r, t), Vec3::X);

        assert!((rotate_then_move - Vec3::new(0.0, 0.0, 4.0)).length() < EPS);
        assert!((move_then_rotate - Vec3::new(5.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn translation_fills_last_column() {
        let m = translation(Vec3::new(1.5, -2.0, 7.0)).to_cols_array();
        assert_eq!(&m[12..16], &[1.5f32, -2.0, 7.0, 1.0]);
        assert_eq!(&m[0..12], &identity().to_cols_array()[0..12]);
    }

    #[test]
    fn zero_angle_rotation_is_identity() {
        for axis in [Vec3::X, Vec3::new(1.0, 2.0, 3.0), Vec3::new(-0.3, 0.0, 9.0)] {
            assert_mat_eq(rotation(axis, 0.0), identity());
        }
    }

    #[test]
    fn full_turn_rotation_is_identity() {
        for axis in [Vec3::Y, Vec3::new(1.0, 1.0, 0.0), Vec3::new(0.2, -4.0, 1.0)] {
            assert_mat_eq(rotation(axis, TAU), identity());
        }
    }

    #[test]
    fn rotation_follows_right_hand_rule() {
        let p = transform_point(rotation(Vec3::X, FRAC_PI_2), Vec3::Y);
        assert!((p - Vec3::Z).length() < EPS, "got {:?}", p);

        let p = transform_point(rotation_z(FRAC_PI_2), Vec3::X);
        assert!((p - Vec3::Y).length() < EPS, "got {:?}", p);
    }

    #[test]
    fn rotation_normalizes_axis() {
        assert_mat_eq(rotation(Vec3::new(0.0, 10.0, 0.0), 1.1), rotation_y(1.1));
        assert_mat_eq(rotation(Vec3::new(-3.0, 0.0, 0.0), 0.4), rotation_x(-0.4));
    }

    #[test]
    fn rotation_matches_glam() {
        let axis = Vec3::new(1.0, -2.0, 0.5);
        assert_mat_eq(
            rotation(axis, 0.9),
            Mat4::from_axis_angle(axis.normalize(), 0.9),
        );
    }

    #[test]
    fn zero_axis_rotation_stays_finite() {
        let m = rotation(Vec3::ZERO, PI / 3.0);
        assert!(m.is_finite());
        let c = (PI / 3.0).cos();
        let a = m.to_cols_array();
        assert!((a[0] - c).abs() < EPS);
        assert!((a[5] - c).abs() < EPS);
        assert!((a[10] - c).abs() < EPS);
        assert_eq!(a[15], 1.0);
    }

    #[test]
    fn projection_entries() {
        let m = projection(90.0, 2.0, 1.0, 3.0).to_cols_array();
        assert!((m[0] - 0.5).abs() < EPS);
        assert!((m[5] - 1.0).abs() < EPS);
        assert!((m[10] - 1.5).abs() < EPS);
        assert_eq!(m[11], 1.0);
        assert!((m[14] + 1.5).abs() < EPS);
        assert_eq!(m[15], 0.0);
    }

    #[test]
    fn projection_maps_depth_to_unit_range() {
        let (near, far) = (0.01, 100.0);
        let m = projection(70.0, 16.0 / 9.0, near, far);

        let depth = |z: f32| {
            let clip = m * Vec3::new(0.0, 0.0, z).extend(1.0);
            clip.z / clip.w
        };
        assert!(depth(near).abs() < EPS);
        assert!((depth(far) - 1.0).abs() < EPS);
        assert!(depth(1.0) > 0.0 && depth(1.0) < 1.0);
    }

    #[test]
    fn projection_matches_glam_left_handed() {
        assert_mat_eq(
            projection(70.0, 1.5, 0.01, 100.0),
            Mat4::perspective_lh(70f32.to_radians(), 1.5, 0.01, 100.0),
        );
    }

    #[test]
    fn degenerate_projection_does_not_panic() {
        let m = projection(70.0, 1.0, 5.0, 5.0);
        assert!(!m.is_finite());
    }
}
