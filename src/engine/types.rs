/// Core types shared by the formulas and the sampler.

use serde::{Deserialize, Serialize};

/// 3D vector with f64 precision — port of TVec3D.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3D {
    #[inline(always)]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Running accumulator carried across iterations of one sample point.
///
/// `r` is the norm of the point before the most recent step and `r_dz`
/// the running derivative magnitude used for distance estimation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtendedAux {
    pub r: f64,
    pub r_dz: f64,
}

impl ExtendedAux {
    /// Fresh accumulator: the derivative of the identity map is 1.
    pub const fn new() -> Self {
        Self { r: 0.0, r_dz: 1.0 }
    }
}

impl Default for ExtendedAux {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-formula parameters owned by the caller's configuration.
///
/// The default multiplier (1, 0, 0) feeds the offset into x only, which keeps
/// the orbit symmetric under rotation about the x axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalParams {
    /// Scales the offset `c` before it is added back: x ← c.x·mx, z ← c.y·my, y ← c.z·mz.
    pub constant_multiplier: Vec3D,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            constant_multiplier: Vec3D::new(1.0, 0.0, 0.0),
        }
    }
}
