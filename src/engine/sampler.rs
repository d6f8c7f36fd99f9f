/// Batch evaluation of sample points.
///
/// Points arrive as a flat `[x, y, z] * n` buffer. Workers split the batch
/// by interleaved assignment (worker k of n takes points k, k+n, k+2n, ...),
/// each point owning its own iteration state, so no synchronisation is needed.

use serde::Deserialize;

use crate::engine::types::{FractalParams, Vec3D};
use crate::error::EngineError;
use crate::formulas::{Formula, IterationState};

/// Values written per point: [de, smooth_it, orbit_trap, inside, iterations].
pub const OUT_STRIDE: usize = 5;

/// Minimum length of a serialized parameter buffer.
pub const PARAMS_LEN: usize = 9;

/// Iteration parameters for a batch.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SampleParams {
    pub max_iterations: u32,
    /// Escape radius squared
    pub bailout: f64,
    pub julia: bool,
    pub julia_c: Vec3D,
    pub fractal: FractalParams,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            max_iterations: 9,
            bailout: 16.0,
            julia: false,
            julia_c: Vec3D::default(),
            fractal: FractalParams::default(),
        }
    }
}

impl SampleParams {
    #[inline]
    pub fn julia_c(&self) -> Option<&Vec3D> {
        if self.julia { Some(&self.julia_c) } else { None }
    }
}

/// Build SampleParams from the serialized parameter buffer.
///
/// Layout: [max_iterations, bailout, julia, julia xyz, multiplier xyz].
/// Short buffers fall back to defaults.
pub fn params_from_buffer(data: &[f64]) -> SampleParams {
    if data.len() < PARAMS_LEN {
        log::warn!("params buffer has {} values, using defaults", data.len());
        return SampleParams::default();
    }

    SampleParams {
        max_iterations: data[0] as u32,
        bailout: data[1],
        julia: data[2] != 0.0,
        julia_c: Vec3D { x: data[3], y: data[4], z: data[5] },
        fractal: FractalParams {
            constant_multiplier: Vec3D { x: data[6], y: data[7], z: data[8] },
        },
    }
}

pub fn params_from_json(json: &str) -> Result<SampleParams, EngineError> {
    Ok(serde_json::from_str(json)?)
}

/// Compute DE for this worker's share of `points`, writing `OUT_STRIDE` values per point.
///
/// Returns the number of points written.
pub fn compute_de_points(
    points: &[f64],
    out: &mut [f64],
    formula: &dyn Formula,
    params: &SampleParams,
    worker_id: u32,
    worker_count: u32,
) -> Result<u32, EngineError> {
    if worker_count == 0 || worker_id >= worker_count {
        return Err(EngineError::WorkerAssignment { worker_id, worker_count });
    }
    if points.len() % 3 != 0 {
        return Err(EngineError::RaggedPoints(points.len()));
    }
    let count = points.len() / 3;
    if out.len() < count * OUT_STRIDE {
        return Err(EngineError::BufferLength {
            name: "output",
            expected: count * OUT_STRIDE,
            actual: out.len(),
        });
    }

    let julia_c = params.julia_c();
    let mut written = 0u32;

    for i in (worker_id as usize..count).step_by(worker_count as usize) {
        let p = &points[i * 3..i * 3 + 3];
        let pos = Vec3D { x: p[0], y: p[1], z: p[2] };
        let result = formula.compute_de(&pos, params.max_iterations, params.bailout, julia_c);

        let o = &mut out[i * OUT_STRIDE..(i + 1) * OUT_STRIDE];
        o[0] = result.de;
        o[1] = result.smooth_it;
        o[2] = result.orbit_trap;
        o[3] = if result.inside { 1.0 } else { 0.0 };
        o[4] = result.iterations as f64;
        written += 1;
    }

    log::debug!(
        "{}: worker {}/{} evaluated {} of {} points",
        formula.name(),
        worker_id,
        worker_count,
        written,
        count
    );
    Ok(written)
}

/// Point and accumulator after one step of an orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSample {
    pub z: Vec3D,
    pub r: f64,
    pub r_dz: f64,
}

impl OrbitSample {
    fn from_state(state: &IterationState) -> Self {
        Self { z: state.z, r: state.aux.r, r_dz: state.aux.r_dz }
    }
}

/// Record the orbit of `pos`: the starting state, then one sample per step
/// until the point escapes or `max_iterations` steps have run.
pub fn trace_orbit(pos: &Vec3D, formula: &dyn Formula, params: &SampleParams) -> Vec<OrbitSample> {
    let mut state = IterationState::new(pos, params.julia_c());
    let mut orbit = Vec::with_capacity(params.max_iterations as usize + 1);
    orbit.push(OrbitSample::from_state(&state));

    for i in 0..params.max_iterations {
        state.iteration = i;
        if formula.iterate_once(&mut state, params.bailout) {
            break;
        }
        orbit.push(OrbitSample::from_state(&state));
    }
    orbit
}
