/// 3D vector helpers — port of the Math3D.pas subset the formulas need.

use crate::engine::types::Vec3D;

#[inline(always)]
pub fn vec3d_length(v: &Vec3D) -> f64 {
    vec3d_length_sqr(v).sqrt()
}

#[inline(always)]
pub fn vec3d_length_sqr(v: &Vec3D) -> f64 {
    v.x * v.x + v.y * v.y + v.z * v.z
}

/// Componentwise product: (a.x·b.x, a.y·b.y, a.z·b.z).
#[inline(always)]
pub fn vec3d_mul(a: &Vec3D, b: &Vec3D) -> Vec3D {
    Vec3D {
        x: a.x * b.x,
        y: a.y * b.y,
        z: a.z * b.z,
    }
}

#[inline(always)]
pub fn vec3d_is_finite(v: &Vec3D) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
