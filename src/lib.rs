use wasm_bindgen::prelude::*;

pub mod engine;
pub mod error;
pub mod formulas;
pub mod math;

use engine::sampler::{self, SampleParams};
use engine::types::{ExtendedAux, FractalParams, Vec3D};
use error::EngineError;
use formulas::FormulaId;

/// Initialize the WASM module (call once from JS).
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second init (e.g. module re-instantiated in the same worker) keeps the first logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Apply one Benesi Pine Tree step in place.
///
/// `z` — Float64Array [x, y, z], overwritten with the new point
/// `c` — Float64Array [x, y, z] offset
/// `multipliers` — Float64Array [mx, my, mz]
/// `aux` — Float64Array [r, r_dz], overwritten with the new accumulator
#[wasm_bindgen]
pub fn benesi_pine_tree_step(
    z: &mut [f64],
    c: &[f64],
    multipliers: &[f64],
    aux: &mut [f64],
) -> Result<(), JsValue> {
    step_flat(z, c, multipliers, aux).map_err(JsValue::from)
}

/// Evaluate the distance estimate for this worker's share of a point batch.
///
/// `points` — Float64Array [x, y, z] * n
/// `params` — Float64Array, see `sampler::params_from_buffer`
/// `out` — Float64Array [de, smooth_it, orbit_trap, inside, iterations] * n
/// `worker_id` / `worker_count` — interleaved point assignment
#[wasm_bindgen]
pub fn compute_de_points(
    points: &[f64],
    params: &[f64],
    out: &mut [f64],
    worker_id: u32,
    worker_count: u32,
) -> Result<u32, JsValue> {
    let params = sampler::params_from_buffer(params);
    run_batch(points, &params, out, worker_id, worker_count).map_err(JsValue::from)
}

/// Same as `compute_de_points`, with parameters given as a JSON object.
#[wasm_bindgen]
pub fn compute_de_points_json(
    points: &[f64],
    params_json: &str,
    out: &mut [f64],
    worker_id: u32,
    worker_count: u32,
) -> Result<u32, JsValue> {
    let params = sampler::params_from_json(params_json)?;
    run_batch(points, &params, out, worker_id, worker_count).map_err(JsValue::from)
}

/// Trace the orbit of a single point.
///
/// Returns Float64Array [x, y, z, r, r_dz] per recorded sample.
#[wasm_bindgen]
pub fn trace_orbit(x: f64, y: f64, z: f64, params: &[f64]) -> js_sys::Float64Array {
    let params = sampler::params_from_buffer(params);
    let formula = FormulaId::BenesiPineTree.create(&params.fractal);
    let orbit = sampler::trace_orbit(&Vec3D::new(x, y, z), formula.as_ref(), &params);

    let flat: Vec<f64> = orbit
        .iter()
        .flat_map(|s| [s.z.x, s.z.y, s.z.z, s.r, s.r_dz])
        .collect();
    js_sys::Float64Array::from(flat.as_slice())
}

fn run_batch(
    points: &[f64],
    params: &SampleParams,
    out: &mut [f64],
    worker_id: u32,
    worker_count: u32,
) -> Result<u32, EngineError> {
    let formula = FormulaId::BenesiPineTree.create(&params.fractal);
    sampler::compute_de_points(points, out, formula.as_ref(), params, worker_id, worker_count)
        .inspect_err(|e| log::warn!("compute_de_points: {}", e))
}

/// Flat-array form of the step, shared by the JS export and native callers.
pub fn step_flat(z: &mut [f64], c: &[f64], multipliers: &[f64], aux: &mut [f64]) -> Result<(), EngineError> {
    let mut point = vec3_from("z", z)?;
    let offset = vec3_from("c", c)?;
    let params = FractalParams {
        constant_multiplier: vec3_from("multipliers", multipliers)?,
    };
    if aux.len() < 2 {
        return Err(EngineError::BufferLength { name: "aux", expected: 2, actual: aux.len() });
    }
    let mut acc = ExtendedAux { r: aux[0], r_dz: aux[1] };

    formulas::benesi::benesi_pine_tree_iteration(&mut point, &offset, &params, &mut acc);

    z[0] = point.x;
    z[1] = point.y;
    z[2] = point.z;
    aux[0] = acc.r;
    aux[1] = acc.r_dz;
    Ok(())
}

fn vec3_from(name: &'static str, data: &[f64]) -> Result<Vec3D, EngineError> {
    match data {
        [x, y, z, ..] => Ok(Vec3D::new(*x, *y, *z)),
        _ => Err(EngineError::BufferLength { name, expected: 3, actual: data.len() }),
    }
}
