//! Helmholtz Combined Potential Operator Tests
//!
//! Assembles the combined-potential operator on a regular octahedron and
//! checks it against the double-layer and single-layer operators it combines.

use approx::assert_relative_eq;
use math_audio_bem_operators::core::{
    AssemblyOptions, BemError, Context, Grid, PiecewiseConstantScalarSpace,
    PiecewiseLinearContinuousScalarSpace, Space, Symmetry,
    helmholtz_3d_combined_boundary_operator, helmholtz_3d_double_layer_boundary_operator,
    helmholtz_3d_single_layer_boundary_operator, laplace_3d_double_layer_boundary_operator,
};
use ndarray::{Array1, Array2, array};
use num_complex::Complex64;
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Regular octahedron with outward normals
fn octahedron() -> Arc<Grid<f64>> {
    let vertices = array![
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];
    let elements = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    Arc::new(Grid::new(vertices, elements).expect("valid octahedron"))
}

fn p0(grid: &Arc<Grid<f64>>) -> Arc<dyn Space<f64>> {
    Arc::new(PiecewiseConstantScalarSpace::new(Arc::clone(grid)))
}

fn context(parallel: bool) -> Arc<Context> {
    Arc::new(
        Context::new(AssemblyOptions {
            parallel,
            ..Default::default()
        })
        .unwrap(),
    )
}

fn max_abs_diff(a: &Array2<Complex64>, b: &Array2<Complex64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

#[test]
fn test_octahedron_combined_weak_form() {
    init_logging();
    let grid = octahedron();
    let space = p0(&grid);
    let op = helmholtz_3d_combined_boundary_operator(
        &context(true),
        &space,
        &space,
        &space,
        Complex64::new(1.0, 0.0),
        Some("combined"),
    )
    .unwrap();

    assert_eq!(op.symmetry(), Symmetry::NoSymmetry);
    let weak_form = op.weak_form().unwrap();
    assert_eq!(weak_form.rows(), 8);
    assert_eq!(weak_form.cols(), 8);
    assert_eq!(weak_form.label(), "combined");
    assert!(
        weak_form
            .as_matrix()
            .iter()
            .all(|v| v.re.is_finite() && v.im.is_finite())
    );

    // Octahedral symmetry: every face sees the same set of couplings
    let diagonal = weak_form.as_matrix()[[0, 0]];
    for i in 1..8 {
        assert_relative_eq!(
            weak_form.as_matrix()[[i, i]].re,
            diagonal.re,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            weak_form.as_matrix()[[i, i]].im,
            diagonal.im,
            max_relative = 1e-6
        );
    }
}

#[test]
fn test_combined_is_double_layer_minus_ik_single_layer() {
    init_logging();
    let grid = octahedron();
    // Distinct space objects keep the symmetric single layer from being mirrored,
    // so all three operators use identical quadrature.
    let trial = p0(&grid);
    let test = p0(&grid);
    let ctx = context(false);
    let k = Complex64::new(2.0, 0.0);

    let combined =
        helmholtz_3d_combined_boundary_operator(&ctx, &trial, &test, &test, k, None).unwrap();
    let dlp = helmholtz_3d_double_layer_boundary_operator(&ctx, &trial, &test, &test, k, None)
        .unwrap();
    let slp = helmholtz_3d_single_layer_boundary_operator(&ctx, &trial, &test, &test, k, None)
        .unwrap();

    let c = combined.weak_form().unwrap();
    let d = dlp.weak_form().unwrap();
    let s = slp.weak_form().unwrap();

    let i_k = Complex64::new(0.0, 1.0) * k;
    let expected = d.as_matrix() - &s.as_matrix().mapv(|v| i_k * v);
    let scale = c.as_matrix().iter().map(|v| v.norm()).fold(0.0, f64::max);
    assert!(max_abs_diff(c.as_matrix(), &expected) <= 1e-10 * scale);
}

#[test]
fn test_low_frequency_limit_is_laplace_double_layer() {
    init_logging();
    let grid = octahedron();
    let space = p0(&grid);
    let ctx = context(false);

    let combined = helmholtz_3d_combined_boundary_operator(
        &ctx,
        &space,
        &space,
        &space,
        Complex64::new(1e-3, 0.0),
        None,
    )
    .unwrap()
    .weak_form()
    .unwrap();
    let laplace = laplace_3d_double_layer_boundary_operator(&ctx, &space, &space, &space, None)
        .unwrap()
        .weak_form()
        .unwrap();

    // The remainder is −ik times a positive single layer
    for (c, l) in combined.as_matrix().iter().zip(laplace.as_matrix().iter()) {
        assert!((c - Complex64::new(*l, 0.0)).norm() < 5e-4);
        assert!(c.im < 0.0);
    }
}

#[test]
fn test_parallel_and_sequential_assembly_are_identical() {
    init_logging();
    let grid = octahedron();
    let space = p0(&grid);
    let k = Complex64::new(3.0, 0.5);

    let sequential =
        helmholtz_3d_combined_boundary_operator(&context(false), &space, &space, &space, k, None)
            .unwrap()
            .weak_form()
            .unwrap();
    let parallel =
        helmholtz_3d_combined_boundary_operator(&context(true), &space, &space, &space, k, None)
            .unwrap()
            .weak_form()
            .unwrap();

    assert_eq!(sequential.as_matrix(), parallel.as_matrix());
}

#[test]
fn test_mixed_spaces() {
    init_logging();
    let grid = octahedron();
    let constant = p0(&grid);
    let linear: Arc<dyn Space<f64>> =
        Arc::new(PiecewiseLinearContinuousScalarSpace::new(Arc::clone(&grid)));

    let op = helmholtz_3d_combined_boundary_operator(
        &context(true),
        &linear,
        &constant,
        &constant,
        Complex64::new(1.5, 0.0),
        None,
    )
    .unwrap();
    let weak_form = op.weak_form().unwrap();
    assert_eq!(weak_form.rows(), 8);
    assert_eq!(weak_form.cols(), 6);

    // Hat functions sum to one, so the P1 columns add up to the P0 row sums
    let p0_form = helmholtz_3d_combined_boundary_operator(
        &context(true),
        &constant,
        &constant,
        &constant,
        Complex64::new(1.5, 0.0),
        None,
    )
    .unwrap()
    .weak_form()
    .unwrap();
    let ones_p1 = Array1::from_elem(6, Complex64::new(1.0, 0.0));
    let ones_p0 = Array1::from_elem(8, Complex64::new(1.0, 0.0));
    let a = weak_form.apply(&ones_p1).unwrap();
    let b = p0_form.apply(&ones_p0).unwrap();
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).norm() < 1e-3 * y.norm());
    }
}

#[test]
fn test_range_and_dual_on_different_grids() {
    let first = octahedron();
    let second = octahedron();
    let err = helmholtz_3d_combined_boundary_operator(
        &context(true),
        &p0(&first),
        &p0(&first),
        &p0(&second),
        Complex64::new(1.0, 0.0),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, BemError::GridMismatch));
}
