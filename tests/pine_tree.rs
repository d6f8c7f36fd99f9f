use pinetree_wasm::engine::sampler::{self, SampleParams, OUT_STRIDE};
use pinetree_wasm::engine::types::{ExtendedAux, FractalParams, Vec3D};
use pinetree_wasm::formulas::benesi::benesi_pine_tree_iteration;
use pinetree_wasm::formulas::{Formula, FormulaId};

#[test]
fn test_settings_index_selects_pine_tree() {
    // `formula_1 66;` with `formula_iterations_1 9;`
    let id = FormulaId::from_index(66);
    let formula = id.create(&FractalParams::default());
    assert_eq!(formula.name(), "Benesi Pine Tree");

    let params = SampleParams { max_iterations: 9, ..SampleParams::default() };
    let result = formula.compute_de(&Vec3D::new(-1.7, 0.0, 0.0), params.max_iterations, params.bailout, None);
    assert!(result.de.is_finite());
    assert!(result.iterations <= 9);
}

#[test]
fn test_external_loop_matches_formula_driver() {
    // Drive the raw step by hand and compare with the Formula escape loop.
    let pos = Vec3D::new(0.9, 0.4, -0.3);
    let params = FractalParams::default();
    let bailout = 16.0;

    let mut z = pos;
    let mut aux = ExtendedAux::new();
    let mut escaped_at = None;
    for i in 0..50 {
        if z.x * z.x + z.y * z.y + z.z * z.z > bailout {
            escaped_at = Some(i);
            break;
        }
        benesi_pine_tree_iteration(&mut z, &pos, &params, &mut aux);
    }

    let result = FormulaId::BenesiPineTree.create(&params).compute_de(&pos, 50, bailout, None);
    match escaped_at {
        Some(i) => {
            assert!(!result.inside);
            assert_eq!(result.iterations, i);
            let r = (z.x * z.x + z.y * z.y + z.z * z.z).sqrt();
            let de = (0.5 * r * r.ln() / aux.r_dz).max(0.0);
            assert!((result.de - de).abs() <= 1e-12 * de.max(1.0));
        }
        None => assert!(result.inside),
    }
}

#[test]
fn test_julia_mode_uses_constant_offset() {
    let formula = FormulaId::BenesiPineTree.create(&FractalParams::default());
    let julia = Vec3D::new(0.0, 0.0, 0.0);

    // With a zero Julia constant, x-axis points inside the unit ball shrink toward the origin.
    let result = formula.compute_de(&Vec3D::new(0.5, 0.0, 0.0), 30, 16.0, Some(&julia));
    assert!(result.inside);

    // Outside the unit ball the same axis diverges.
    let result = formula.compute_de(&Vec3D::new(3.0, 0.0, 0.0), 30, 16.0, Some(&julia));
    assert!(!result.inside);
}

#[test]
fn test_workers_cover_batch_exactly_once() {
    let mut points = Vec::new();
    for i in 0..10 {
        let t = i as f64 * 0.3 - 1.5;
        points.extend_from_slice(&[t, t * 0.5, -t * 0.25]);
    }
    let params = SampleParams::default();
    let formula = FormulaId::BenesiPineTree.create(&params.fractal);

    let mut single = vec![0.0; 10 * OUT_STRIDE];
    let n = sampler::compute_de_points(&points, &mut single, formula.as_ref(), &params, 0, 1).unwrap();
    assert_eq!(n, 10);

    let mut split = vec![f64::NAN; 10 * OUT_STRIDE];
    let mut total = 0;
    for worker in 0..3 {
        total += sampler::compute_de_points(&points, &mut split, formula.as_ref(), &params, worker, 3).unwrap();
    }
    assert_eq!(total, 10);
    assert_eq!(single, split);
}

#[test]
fn test_default_offset_only_moves_x() {
    // From the origin a single step leaves only c.x · 1 behind.
    let mut z = Vec3D::default();
    let mut aux = ExtendedAux::new();
    benesi_pine_tree_iteration(&mut z, &Vec3D::new(0.4, 0.7, -0.2), &FractalParams::default(), &mut aux);
    assert_eq!(z, Vec3D::new(0.4, 0.0, 0.0));
}

#[test]
fn test_batch_is_symmetric_about_x_under_defaults() {
    let points = [-0.6, 0.35, 0.0, -0.6, 0.0, 0.35];
    let params = SampleParams::default();
    let formula = FormulaId::BenesiPineTree.create(&params.fractal);
    let mut out = [0.0; 2 * OUT_STRIDE];
    sampler::compute_de_points(&points, &mut out, formula.as_ref(), &params, 0, 1).unwrap();
    assert_eq!(&out[..OUT_STRIDE], &out[OUT_STRIDE..]);
}
