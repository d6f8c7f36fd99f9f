/// Benesi Pine Tree — a quadratic map that squares x against the (y, z) plane
/// and rotates the (y, z) pair by the x/ρ ratio, with ρ = sqrt(y² + z²).

use crate::engine::types::{ExtendedAux, FractalParams, Vec3D};
use crate::math::math3d;
use super::{Formula, IterationState};

/// One Benesi Pine Tree step.
///
/// `aux.r` receives the norm of `z` before the update and `aux.r_dz`
/// advances by the quadratic derivative rule `r_dz ← 2·r·r_dz + 1`.
#[inline]
pub fn benesi_pine_tree_iteration(z: &mut Vec3D, c: &Vec3D, params: &FractalParams, aux: &mut ExtendedAux) {
    let temp = *z;
    aux.r = math3d::vec3d_length(&temp);
    let zz = math3d::vec3d_mul(&temp, &temp);

    let rho_sqr = zz.y + zz.z;
    let t = if rho_sqr > 0.0 {
        2.0 * temp.x / rho_sqr.sqrt()
    } else {
        1.0
    };

    let m = &params.constant_multiplier;
    z.x = (zz.x - zz.y - zz.z) + c.x * m.x;
    z.z = (t * (zz.y - zz.z)) + c.y * m.y;
    z.y = (2.0 * t * temp.y * temp.z) + c.z * m.z;

    aux.r_dz = aux.r * aux.r_dz * 2.0 + 1.0;
}

pub struct BenesiPineTree {
    pub params: FractalParams,
}

impl BenesiPineTree {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }
}

impl Default for BenesiPineTree {
    fn default() -> Self {
        Self::new(FractalParams::default())
    }
}

impl Formula for BenesiPineTree {
    fn name(&self) -> &str { "Benesi Pine Tree" }

    fn iterate_once(&self, state: &mut IterationState, bailout: f64) -> bool {
        if state.check_bailout(bailout) {
            return true;
        }
        state.track_orbit_trap();
        benesi_pine_tree_iteration(&mut state.z, &state.c, &self.params, &mut state.aux);
        false
    }
}
