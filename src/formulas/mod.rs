/// Formula system.
///
/// Each formula implements `Formula`, providing a single iteration step and
/// a full escape-time loop that turns the orbit into a distance estimate.

pub mod benesi;

use crate::engine::types::{ExtendedAux, FractalParams, Vec3D};
use crate::math::math3d;

/// Settings-file index of the Benesi Pine Tree formula (`formula_1 66;`).
pub const BENESI_PINE_TREE_INDEX: u32 = 66;

/// Result of a single fractal iteration sequence.
#[derive(Clone, Debug)]
pub struct FormulaResult {
    /// Distance estimate to the fractal surface
    pub de: f64,
    /// Smooth iteration count for coloring
    pub smooth_it: f64,
    /// Orbit trap minimum distance (for alternative coloring)
    pub orbit_trap: f64,
    /// Whether the point is inside the fractal
    pub inside: bool,
    /// Raw iteration count at escape
    pub iterations: u32,
}

impl Default for FormulaResult {
    fn default() -> Self {
        Self {
            de: f64::MAX,
            smooth_it: 0.0,
            orbit_trap: f64::MAX,
            inside: false,
            iterations: 0,
        }
    }
}

/// Iteration state for one sample point.
#[derive(Clone, Debug)]
pub struct IterationState {
    /// Current position (mutated during iteration)
    pub z: Vec3D,
    /// Offset added each step: the sample position, or the Julia constant
    pub c: Vec3D,
    pub aux: ExtendedAux,
    /// Squared radius of `z` at the last bailout check
    pub r_sqr: f64,
    pub orbit_trap: f64,
    /// Current iteration number
    pub iteration: u32,
}

impl IterationState {
    /// Create a new state for `pos`, using `julia_c` as the offset when given.
    pub fn new(pos: &Vec3D, julia_c: Option<&Vec3D>) -> Self {
        Self {
            z: *pos,
            c: *julia_c.unwrap_or(pos),
            aux: ExtendedAux::new(),
            r_sqr: 0.0,
            orbit_trap: f64::MAX,
            iteration: 0,
        }
    }

    /// Refresh `r_sqr` from the current point and report whether it is past `bailout`.
    #[inline]
    pub fn check_bailout(&mut self, bailout: f64) -> bool {
        self.r_sqr = math3d::vec3d_length_sqr(&self.z);
        self.r_sqr > bailout
    }

    #[inline]
    pub fn track_orbit_trap(&mut self) {
        let otrap = self.z.x.abs().min(self.z.y.abs()).min(self.z.z.abs());
        if otrap < self.orbit_trap {
            self.orbit_trap = otrap;
        }
    }
}

/// Formula trait — each fractal formula implements this.
pub trait Formula: Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Perform a single iteration step.
    /// Returns true if the point has already escaped (r_sqr > bailout); the step is skipped then.
    fn iterate_once(&self, state: &mut IterationState, bailout: f64) -> bool;

    /// Compute the distance estimate at `pos`.
    /// `bailout` is the escape radius squared.
    fn compute_de(&self, pos: &Vec3D, max_iter: u32, bailout: f64, julia_c: Option<&Vec3D>) -> FormulaResult {
        let mut state = IterationState::new(pos, julia_c);
        for i in 0..max_iter {
            state.iteration = i;
            if self.iterate_once(&mut state, bailout) {
                return escaped_result(&state, i);
            }
        }
        FormulaResult {
            de: 0.0,
            smooth_it: max_iter as f64,
            orbit_trap: state.orbit_trap,
            inside: true,
            iterations: max_iter,
        }
    }
}

/// Log-distance estimate for a quadratic map that escaped at iteration `i`.
fn escaped_result(state: &IterationState, i: u32) -> FormulaResult {
    let r = state.r_sqr.sqrt();
    let de = if state.aux.r_dz.abs() > 1e-30 {
        0.5 * r * r.ln() / state.aux.r_dz
    } else {
        r * 0.5
    };
    let smooth = (i as f64) + 1.0 - (state.r_sqr.ln().ln() / std::f64::consts::LN_2);
    FormulaResult {
        de: de.max(0.0),
        smooth_it: smooth,
        orbit_trap: state.orbit_trap,
        inside: false,
        iterations: i,
    }
}

/// Slot placeholder when no formula is selected.
pub struct EmptyFormula;

impl Formula for EmptyFormula {
    fn name(&self) -> &str { "(none)" }

    fn iterate_once(&self, _state: &mut IterationState, _bailout: f64) -> bool {
        true // Always escaped — effectively no iteration
    }

    fn compute_de(&self, _pos: &Vec3D, _max_iter: u32, _bailout: f64, _julia_c: Option<&Vec3D>) -> FormulaResult {
        FormulaResult::default()
    }
}

/// Formula identifier matching the UI names and settings-file indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormulaId {
    None,
    BenesiPineTree,
}

impl FormulaId {
    /// Parse from a string name (matching UI dropdown values).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Benesi Pine Tree" => FormulaId::BenesiPineTree,
            _ => FormulaId::None,
        }
    }

    /// Map a settings-file formula index.
    pub fn from_index(index: u32) -> Self {
        match index {
            BENESI_PINE_TREE_INDEX => FormulaId::BenesiPineTree,
            _ => FormulaId::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormulaId::None => "(none)",
            FormulaId::BenesiPineTree => "Benesi Pine Tree",
        }
    }

    /// Create a boxed formula instance.
    pub fn create(&self, params: &FractalParams) -> Box<dyn Formula> {
        match self {
            FormulaId::None => Box::new(EmptyFormula),
            FormulaId::BenesiPineTree => Box::new(benesi::BenesiPineTree::new(*params)),
        }
    }
}
