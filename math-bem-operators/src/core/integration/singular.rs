//! Rules for singular and nearly singular element pairs
//!
//! - Coincident elements: Sauter-Schwab rule. Duffy-type collapses of the
//!   4D domain cancel the `1/r` singularity by their Jacobian, and the kernel
//!   is never evaluated at `r = 0`.
//! - Elements sharing an edge or a vertex: the trial element is recursively
//!   split into four until every subelement is far from the test point
//!   relative to its size, then each subelement gets a triangle rule.
//!   A subelement containing the test point (overlapping grids) is fanned
//!   into triangles around it instead, each with a Duffy collapse at the
//!   test point.

use crate::core::grid::{Grid, distance};
use crate::core::integration::gauss::{gauss_legendre_unit, triangle_quadrature};
use crate::core::integration::{PairRule, QuadratureOptions};
use crate::core::scalar::{RealScalar, real_const};

/// Local coordinates of the reference triangle corners
const CORNERS: [[f64; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

/// Barycentric slack when locating a test point in a subelement
const CONTAINS_TOLERANCE: f64 = 1.0e-12;

/// Triangle in the local coordinates of its parent element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subelement<T> {
    /// Corner local coordinates
    pub vertices: [[T; 2]; 3],
    /// Subdivision depth (0 for the whole element)
    pub level: usize,
}

impl<T: RealScalar> Subelement<T> {
    /// The whole reference triangle
    pub fn root() -> Self {
        Self {
            vertices: CORNERS.map(|c| [real_const(c[0]), real_const(c[1])]),
            level: 0,
        }
    }

    /// Local coordinates of the centroid
    pub fn centroid(&self) -> [T; 2] {
        let third: T = real_const(1.0 / 3.0);
        let v = &self.vertices;
        [
            (v[0][0] + v[1][0] + v[2][0]) * third,
            (v[0][1] + v[1][1] + v[2][1]) * third,
        ]
    }

    /// Map reference coordinates (s, t) into the parent element
    pub fn map(&self, s: T, t: T) -> [T; 2] {
        let v = &self.vertices;
        let l0 = T::one() - s - t;
        [
            v[0][0] * l0 + v[1][0] * s + v[2][0] * t,
            v[0][1] * l0 + v[1][1] * s + v[2][1] * t,
        ]
    }

    /// Jacobian of [`Subelement::map`] (twice the local area)
    pub fn jacobian(&self) -> T {
        let v = &self.vertices;
        let dx1 = v[1][0] - v[0][0];
        let dy1 = v[1][1] - v[0][1];
        let dx2 = v[2][0] - v[0][0];
        let dy2 = v[2][1] - v[0][1];
        (dx1 * dy2 - dx2 * dy1).abs()
    }

    /// True if the local point `p` lies in the subelement, up to `tolerance`
    /// in barycentric coordinates
    pub fn contains(&self, p: &[T; 2], tolerance: T) -> bool {
        let v = &self.vertices;
        let (ax, ay) = (v[1][0] - v[0][0], v[1][1] - v[0][1]);
        let (bx, by) = (v[2][0] - v[0][0], v[2][1] - v[0][1]);
        let (dx, dy) = (p[0] - v[0][0], p[1] - v[0][1]);
        let det = ax * by - bx * ay;
        let l1 = (dx * by - dy * bx) / det;
        let l2 = (ax * dy - ay * dx) / det;
        l1 >= -tolerance && l2 >= -tolerance && l1 + l2 <= T::one() + tolerance
    }

    /// Split into three corner triangles and the central one
    pub fn split(&self) -> [Self; 4] {
        let half: T = real_const(0.5);
        let v = &self.vertices;
        let mid = |a: usize, b: usize| [(v[a][0] + v[b][0]) * half, (v[a][1] + v[b][1]) * half];
        let (m01, m12, m20) = (mid(0, 1), mid(1, 2), mid(2, 0));
        let level = self.level + 1;
        [
            Self {
                vertices: [v[0], m01, m20],
                level,
            },
            Self {
                vertices: [m01, v[1], m12],
                level,
            },
            Self {
                vertices: [m20, m12, v[2]],
                level,
            },
            Self {
                vertices: [m01, m12, m20],
                level,
            },
        ]
    }
}

/// Split `element` adaptively around `source`
///
/// A subelement is split while the distance from its centroid to `source`
/// is below `subdivision_tolerance` times its size, up to
/// `max_subdivision_level` levels and `max_subelements` leaves. The returned
/// subelements always tile the whole element.
pub fn generate_subelements<T: RealScalar>(
    source: &[T; 3],
    grid: &Grid<T>,
    element: usize,
    options: &QuadratureOptions,
) -> Vec<Subelement<T>> {
    let tolerance: T = real_const(options.subdivision_tolerance);
    let half: T = real_const(0.5);
    let element_size = grid.area(element).sqrt();

    let mut result = Vec::new();
    let mut current = vec![Subelement::root()];
    let mut leaf_count = 1;
    let mut size = element_size;

    while !current.is_empty() {
        let mut next = Vec::new();
        for sub in current {
            let c = sub.centroid();
            let centre = grid.local_to_global(element, c[0], c[1]);
            let ratio = distance(&centre, source) / size;

            if ratio < tolerance
                && sub.level < options.max_subdivision_level
                && leaf_count + 3 <= options.max_subelements
            {
                next.extend(sub.split());
                leaf_count += 3;
            } else {
                result.push(sub);
            }
        }
        current = next;
        size *= half;
    }

    result
}

/// Rule for elements sharing an edge or a vertex (or close elements of different grids)
///
/// The test element gets a fixed triangle rule; for every test point the
/// trial element is subdivided around it. When the test point lies on the
/// trial element, the subelements containing it use [`fan_rule`] with
/// `coincident_order` Gauss-Legendre points per direction.
pub fn subdivided_pair_rule<T: RealScalar>(
    test_grid: &Grid<T>,
    test_element: usize,
    trial_grid: &Grid<T>,
    trial_element: usize,
    options: &QuadratureOptions,
) -> PairRule<T> {
    let test_rule = triangle_quadrature(options.singular_test_order);
    let trial_rule = triangle_quadrature(options.near_field_order);
    let line = gauss_legendre_unit(options.coincident_order);
    let tolerance: T = real_const(CONTAINS_TOLERANCE);

    let mut triples = Vec::new();
    for &(xs, xt, xw) in &test_rule {
        let x = [real_const::<T>(xs), real_const::<T>(xt)];
        let source = test_grid.local_to_global(test_element, x[0], x[1]);
        let apex = trial_grid.local_coordinates(trial_element, &source);

        for sub in generate_subelements(&source, trial_grid, trial_element, options) {
            match apex.filter(|p| sub.contains(p, tolerance)) {
                Some(apex) => {
                    for (y, w) in fan_rule(&sub, apex, &line) {
                        triples.push((x, y, real_const::<T>(xw) * w));
                    }
                }
                None => {
                    let jacobian = sub.jacobian();
                    for &(ys, yt, yw) in &trial_rule {
                        let y = sub.map(real_const(ys), real_const(yt));
                        triples.push((x, y, real_const::<T>(xw * yw) * jacobian));
                    }
                }
            }
        }
    }
    PairRule::from_triples(&triples)
}

/// Points and weights on `sub` for a singular point at local `apex` inside it
///
/// `sub` is split into the three triangles `(apex, vᵢ, vᵢ₊₁)`, each mapped
/// from the unit square by `(u, v) ↦ (u(1 − v), uv)`. The Jacobian of that
/// map is proportional to `u`, which cancels a `1/r` singularity at the
/// apex, and no point lands on the apex. Triangles with zero area (apex on
/// an edge or a corner) are skipped. Weights sum to the local area of `sub`.
pub fn fan_rule<T: RealScalar>(
    sub: &Subelement<T>,
    apex: [T; 2],
    line: &[(f64, f64)],
) -> Vec<([T; 2], T)> {
    let min_jacobian = T::epsilon() * sub.jacobian();
    let mut points = Vec::with_capacity(3 * line.len() * line.len());

    for i in 0..3 {
        let fan = Subelement {
            vertices: [apex, sub.vertices[i], sub.vertices[(i + 1) % 3]],
            level: sub.level,
        };
        let jacobian = fan.jacobian();
        if jacobian <= min_jacobian {
            continue;
        }
        for &(u, wu) in line {
            for &(v, wv) in line {
                let (u, v) = (real_const::<T>(u), real_const::<T>(v));
                let y = fan.map(u * (T::one() - v), u * v);
                points.push((y, real_const::<T>(wu * wv) * u * jacobian));
            }
        }
    }
    points
}

/// Rule for an element paired with itself (Sauter-Schwab, identical panels)
///
/// The 4D integral is split into six regions, each mapped from the unit
/// hypercube `(ξ, η₁, η₂, η₃)` with Jacobian `ξ³ η₁² η₂`. The collapse
/// cancels the `1/r` singularity, and no point pair coincides. `order`
/// Gauss-Legendre points are used per direction.
pub fn coincident_pair_rule<T: RealScalar>(order: usize) -> PairRule<T> {
    let line = gauss_legendre_unit(order);

    let mut triples = Vec::with_capacity(6 * line.len().pow(4));
    for &(xi, w0) in &line {
        for &(e1, w1) in &line {
            for &(e2, w2) in &line {
                for &(e3, w3) in &line {
                    let weight = w0 * w1 * w2 * w3 * xi.powi(3) * e1 * e1 * e2;
                    for (x, y) in identical_panel_regions(xi, e1, e2, e3) {
                        triples.push((to_reference(x), to_reference(y), real_const(weight)));
                    }
                }
            }
        }
    }
    PairRule::from_triples(&triples)
}

/// The six (test, trial) point pairs on the triangle `0 ≤ x₂ ≤ x₁ ≤ 1`
fn identical_panel_regions(xi: f64, e1: f64, e2: f64, e3: f64) -> [([f64; 2], [f64; 2]); 6] {
    let a = [xi, xi * (1.0 - e1 + e1 * e2)];
    let b = [xi * (1.0 - e1 * e2 * e3), xi * (1.0 - e1)];
    let c = [xi, xi * e1 * (1.0 - e2 + e2 * e3)];
    let d = [xi * (1.0 - e1 * e2), xi * e1 * (1.0 - e2)];
    let e = [xi * (1.0 - e1 * e2 * e3), xi * e1 * (1.0 - e2 * e3)];
    let f = [xi, xi * e1 * (1.0 - e2)];
    [(a, b), (b, a), (c, d), (d, c), (e, f), (f, e)]
}

/// Map `0 ≤ x₂ ≤ x₁ ≤ 1` onto the reference triangle (0,0), (1,0), (0,1)
fn to_reference<T: RealScalar>(p: [f64; 2]) -> [T; 2] {
    [real_const(p[0] - p[1]), real_const(p[1])]
}
