// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Linear algebra helpers
//!
//! Thin layer over `nalgebra` that fixes the conventions the pipeline uses:
//!
//! - Points are **row vectors** multiplied on the left: `[x y z 1] · M`.
//!   Translation therefore lives in the fourth *row* (`e41 e42 e43`).
//! - Transforming a point always performs the homogeneous divide by `w`.
//! - Matrices compose left to right: `world * camera` applies world first.
//!
//! `nalgebra` indexes `(row, col)` from zero, so `e41` is `m[(3, 0)]`.

pub mod float;

use nalgebra::{Matrix4, RowVector4, Vector2, Vector3};

use float::flt_less;

/// 2-component float vector (texture coordinates)
pub type Vec2 = Vector2<f32>;

/// 3-component float vector (positions, normals, colors)
pub type Vec3 = Vector3<f32>;

/// 4x4 homogeneous transform, row-vector convention
pub type Mat4 = Matrix4<f32>;

/// Half pi, matching the precision the mesh generators were tuned with
pub const PI_D2: f32 = 1.570_796_3;

/// Pi
pub const PI: f32 = 3.141_592_6;

/// Two pi
pub const PI_M2: f32 = 6.283_185_2;

/// Transform a point by a row-vector matrix and divide by `w`
///
/// # Examples
///
/// ```
/// use raster3d::core::math::{transform_point, translate, Vec3};
///
/// let p = transform_point(&Vec3::new(1.0, 2.0, 3.0), &translate(10.0, 0.0, -1.0));
/// assert_eq!(p, Vec3::new(11.0, 2.0, 2.0));
/// ```
#[inline]
pub fn transform_point(v: &Vec3, m: &Mat4) -> Vec3 {
    let r = RowVector4::new(v.x, v.y, v.z, 1.0) * m;
    Vec3::new(r[0] / r[3], r[1] / r[3], r[2] / r[3])
}

/// Normalize `v`, or return the zero vector when its length truncates to zero
///
/// Degenerate face normals and coincident light positions end up here;
/// a zero result makes every later dot product zero instead of NaN.
#[inline]
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    let length = v.norm();
    if float::flt_equal_zero(length) {
        Vec3::zeros()
    } else {
        v / length
    }
}

/// Component-wise [`float::flt_equal`]
#[inline]
pub fn vec3_flt_equal(a: &Vec3, b: &Vec3) -> bool {
    float::flt_equal(a.x, b.x) && float::flt_equal(a.y, b.y) && float::flt_equal(a.z, b.z)
}

/// Translation matrix
pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        x, y, z, 1.0,
    )
}

/// Non-uniform scale matrix
pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::new(
        x, 0.0, 0.0, 0.0, //
        0.0, y, 0.0, 0.0, //
        0.0, 0.0, z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about the x axis by `a` radians
pub fn rotate_x(a: f32) -> Mat4 {
    let (s, c) = a.sin_cos();
    Mat4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, c, s, 0.0, //
        0.0, -s, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about the y axis by `a` radians
pub fn rotate_y(a: f32) -> Mat4 {
    let (s, c) = a.sin_cos();
    Mat4::new(
        c, 0.0, -s, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        s, 0.0, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about the z axis by `a` radians
pub fn rotate_z(a: f32) -> Mat4 {
    let (s, c) = a.sin_cos();
    Mat4::new(
        c, s, 0.0, 0.0, //
        -s, c, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Build the world-to-camera matrix for a look-at camera
///
/// # Arguments
///
/// * `eye` - Camera position in world space
/// * `at` - Point the camera looks at
/// * `up` - Approximate up direction
///
/// # Algorithm
///
/// 1. forward `z = normalize(at - eye)`
/// 2. right `x = normalize(up × z)`
/// 3. true up `y = z × x`
/// 4. The basis goes into the 3x3 block as columns; the fourth row holds
///    `-eye·x, -eye·y, -eye·z` so the eye maps to the origin.
pub fn compute_transform_camera(eye: &Vec3, at: &Vec3, up: &Vec3) -> Mat4 {
    let z = normalize_or_zero(&(at - eye));
    let x = normalize_or_zero(&up.cross(&z));
    let y = z.cross(&x);

    Mat4::new(
        x.x, y.x, z.x, 0.0, //
        x.y, y.y, z.y, 0.0, //
        x.z, y.z, z.z, 0.0, //
        -eye.dot(&x),
        -eye.dot(&y),
        -eye.dot(&z),
        1.0,
    )
}

/// Build the projection-to-screen matrix for a viewport
///
/// Maps projected `x/z, y/z` in `[-1, 1]` onto the pixel rectangle
/// `(x, y, w, h)` with y pointing down. `z` passes through unchanged.
pub fn compute_transform_view(x: i32, y: i32, w: i32, h: i32) -> Mat4 {
    let wd2 = w as f32 / 2.0;
    let hd2 = h as f32 / 2.0;

    Mat4::new(
        wd2, 0.0, 0.0, 0.0, //
        0.0, -hd2, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        x as f32 + wd2,
        y as f32 + hd2,
        0.0,
        1.0,
    )
}

/// Radius of the origin-centred sphere enclosing every vertex
///
/// Returns `0.0` for an empty slice.
pub fn local_sphere_radius(vertices: &[Vec3]) -> f32 {
    let Some(first) = vertices.first() else {
        return 0.0;
    };

    let mut max_radius = first.norm_squared();
    for v in &vertices[1..] {
        let radius = v.norm_squared();
        if flt_less(max_radius, radius) {
            max_radius = radius;
        }
    }

    max_radius.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_translation_lives_in_fourth_row() {
        let m = translate(1.0, 2.0, 3.0);
        assert_eq!(m[(3, 0)], 1.0);
        assert_eq!(m[(3, 1)], 2.0);
        assert_eq!(m[(3, 2)], 3.0);
    }

    #[test]
    fn test_compose_left_to_right() {
        // scale then translate
        let m = scale(2.0, 2.0, 2.0) * translate(1.0, 0.0, 0.0);
        let p = transform_point(&Vec3::new(1.0, 1.0, 1.0), &m);
        assert_relative_eq!(p, Vec3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        let p = transform_point(&Vec3::new(1.0, 0.0, 0.0), &rotate_y(PI_D2));
        assert_relative_eq!(p, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let p = transform_point(&Vec3::new(1.0, 0.0, 0.0), &rotate_z(PI_D2));
        assert_relative_eq!(p, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_camera_maps_eye_to_origin_and_at_onto_positive_z() {
        let eye = Vec3::new(0.0, 0.0, -10.0);
        let at = Vec3::zeros();
        let up = Vec3::new(0.0, 1.0, 0.0);
        let m = compute_transform_camera(&eye, &at, &up);

        assert_relative_eq!(transform_point(&eye, &m), Vec3::zeros(), epsilon = 1e-6);
        assert_relative_eq!(
            transform_point(&at, &m),
            Vec3::new(0.0, 0.0, 10.0),
            epsilon = 1e-6
        );
        // +x world stays +x for a camera looking down +z
        assert_relative_eq!(
            transform_point(&Vec3::new(1.0, 0.0, 0.0), &m),
            Vec3::new(1.0, 0.0, 10.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_view_maps_unit_square_to_pixels() {
        let m = compute_transform_view(0, 0, 100, 50);
        assert_relative_eq!(
            transform_point(&Vec3::new(-1.0, 1.0, 7.0), &m),
            Vec3::new(0.0, 0.0, 7.0)
        );
        assert_relative_eq!(
            transform_point(&Vec3::new(1.0, -1.0, 7.0), &m),
            Vec3::new(100.0, 50.0, 7.0)
        );
    }

    #[test]
    fn test_normalize_or_zero() {
        assert_eq!(normalize_or_zero(&Vec3::new(1e-8, 0.0, 0.0)), Vec3::zeros());
        assert_relative_eq!(
            normalize_or_zero(&Vec3::new(0.0, 3.0, 4.0)),
            Vec3::new(0.0, 0.6, 0.8)
        );
    }

    #[test]
    fn test_local_sphere_radius() {
        let vertices = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, -3.0, 4.0),
            Vec3::new(2.0, 2.0, 0.0),
        ];
        assert_relative_eq!(local_sphere_radius(&vertices), 5.0);
        assert_eq!(local_sphere_radius(&[]), 0.0);
    }
}
