//! Flat triangle surface grids
//!
//! Local coordinates follow the standard vertex mapping of the reference
//! triangle: v0 at (0,0), v1 at (1,0), v2 at (0,1). Normals follow the
//! right-hand rule on the vertex order, so a consistently oriented closed
//! surface gets outward normals when its elements are listed counter-clockwise
//! as seen from outside.

use ndarray::Array2;

use crate::core::constants::{EPSY, NDIM, NVERT};
use crate::core::error::{BemError, Result};
use crate::core::geometry::{GeometricalData, GeometricalDependencies};
use crate::core::scalar::{RealScalar, real_const};

/// Relative tolerance for matching coordinates across grids
const MATCH_TOLERANCE: f64 = 1.0e-10;

/// How two elements touch each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPairRelation {
    /// Same element
    Coincident,
    /// Two shared vertices
    SharedEdge,
    /// One shared vertex
    SharedVertex,
    /// No shared vertex
    Disjoint,
}

/// Triangular surface grid.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    vertices: Array2<T>,
    elements: Vec<[usize; NVERT]>,
    normals: Vec<[T; 3]>,
    areas: Vec<T>,
}

impl<T: RealScalar> Grid<T> {
    /// Create a grid from vertex coordinates (n × 3) and element connectivity
    ///
    /// # Errors
    /// - [`BemError::InvalidVertexArray`] if `vertices` does not have 3 columns
    /// - [`BemError::InvalidElement`] if an element references a missing vertex
    /// - [`BemError::DegenerateElement`] if an element has zero area
    pub fn new(vertices: Array2<T>, elements: Vec<[usize; NVERT]>) -> Result<Self> {
        if vertices.ncols() != NDIM {
            return Err(BemError::InvalidVertexArray {
                columns: vertices.ncols(),
            });
        }

        let vertex_count = vertices.nrows();
        let eps: T = real_const(EPSY);
        let mut normals = Vec::with_capacity(elements.len());
        let mut areas = Vec::with_capacity(elements.len());

        for (element, conn) in elements.iter().enumerate() {
            if let Some(&vertex) = conn.iter().find(|&&v| v >= vertex_count) {
                return Err(BemError::InvalidElement {
                    element,
                    vertex,
                    vertex_count,
                });
            }

            let c = conn.map(|v| [vertices[[v, 0]], vertices[[v, 1]], vertices[[v, 2]]]);
            let n = cross_product(&sub(&c[1], &c[0]), &sub(&c[2], &c[0]));
            let twice_area = dot(&n, &n).sqrt();
            let diam = triangle_diameter(&c);

            if twice_area.is_nan() || twice_area <= eps * diam * diam {
                return Err(BemError::DegenerateElement {
                    element,
                    area: (twice_area * real_const(0.5)).to_f64().unwrap_or(f64::NAN),
                });
            }

            normals.push(n.map(|x| x / twice_area));
            areas.push(twice_area * real_const(0.5));
        }

        log::debug!(
            "grid created: {} vertices, {} elements",
            vertex_count,
            elements.len()
        );

        Ok(Self {
            vertices,
            elements,
            normals,
            areas,
        })
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.nrows()
    }

    /// Number of elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Vertex coordinates (n × 3)
    pub fn vertices(&self) -> &Array2<T> {
        &self.vertices
    }

    /// Element connectivity
    pub fn elements(&self) -> &[[usize; NVERT]] {
        &self.elements
    }

    /// Vertex indices of an element
    pub fn element_vertices(&self, element: usize) -> [usize; NVERT] {
        self.elements[element]
    }

    /// Corner coordinates of an element
    pub fn corners(&self, element: usize) -> [[T; 3]; NVERT] {
        self.elements[element].map(|v| {
            [
                self.vertices[[v, 0]],
                self.vertices[[v, 1]],
                self.vertices[[v, 2]],
            ]
        })
    }

    /// Unit normal of an element
    pub fn normal(&self, element: usize) -> [T; 3] {
        self.normals[element]
    }

    /// Area of an element
    pub fn area(&self, element: usize) -> T {
        self.areas[element]
    }

    /// Surface integration element |∂x/∂s × ∂x/∂t| (constant on a flat triangle)
    pub fn integration_element(&self, element: usize) -> T {
        self.areas[element] + self.areas[element]
    }

    /// Longest edge of an element
    pub fn diameter(&self, element: usize) -> T {
        triangle_diameter(&self.corners(element))
    }

    /// Centroid of an element
    pub fn centroid(&self, element: usize) -> [T; 3] {
        let third: T = real_const(1.0 / 3.0);
        self.local_to_global(element, third, third)
    }

    /// Map local coordinates (s, t) to global coordinates
    pub fn local_to_global(&self, element: usize, s: T, t: T) -> [T; 3] {
        let c = self.corners(element);
        let n0 = T::one() - s - t;
        let mut x = [T::zero(); 3];
        for (dim, xd) in x.iter_mut().enumerate() {
            *xd = n0 * c[0][dim] + s * c[1][dim] + t * c[2][dim];
        }
        x
    }

    /// Classify two elements by the number of shared vertices
    pub fn relation(&self, a: usize, b: usize) -> ElementPairRelation {
        if a == b {
            return ElementPairRelation::Coincident;
        }
        let va = self.elements[a];
        let shared = self.elements[b]
            .iter()
            .filter(|&v| va.contains(v))
            .count();
        match shared {
            0 => ElementPairRelation::Disjoint,
            1 => ElementPairRelation::SharedVertex,
            2 => ElementPairRelation::SharedEdge,
            _ => ElementPairRelation::Coincident,
        }
    }

    /// Classify element `a` of this grid against element `b` of `other` by coordinates
    ///
    /// Corners closer than a small fraction of the element diameter match.
    /// `Coincident` needs the three corners to match in the same order, so
    /// that both elements share one parametrisation. The same triangle
    /// listed with another corner order is reported as `SharedEdge`.
    pub fn geometric_relation(&self, a: usize, other: &Grid<T>, b: usize) -> ElementPairRelation {
        let ca = self.corners(a);
        let cb = other.corners(b);
        let tolerance = real_const::<T>(MATCH_TOLERANCE) * self.diameter(a).max(other.diameter(b));
        let matches = |p: &[T; 3], q: &[T; 3]| distance(p, q) <= tolerance;

        if ca.iter().zip(cb.iter()).all(|(p, q)| matches(p, q)) {
            return ElementPairRelation::Coincident;
        }
        let shared = cb
            .iter()
            .filter(|&q| ca.iter().any(|p| matches(p, q)))
            .count();
        match shared {
            0 => ElementPairRelation::Disjoint,
            1 => ElementPairRelation::SharedVertex,
            _ => ElementPairRelation::SharedEdge,
        }
    }

    /// Local coordinates of a global point lying on an element
    ///
    /// `None` if the point is off the element plane or outside the triangle.
    pub fn local_coordinates(&self, element: usize, x: &[T; 3]) -> Option<[T; 2]> {
        let c = self.corners(element);
        let tolerance: T = real_const(MATCH_TOLERANCE);
        let e1 = sub(&c[1], &c[0]);
        let e2 = sub(&c[2], &c[0]);
        let d = sub(x, &c[0]);

        if dot(&d, &self.normals[element]).abs() > tolerance * self.diameter(element) {
            return None;
        }

        let (a11, a12, a22) = (dot(&e1, &e1), dot(&e1, &e2), dot(&e2, &e2));
        let (b1, b2) = (dot(&d, &e1), dot(&d, &e2));
        let det = a11 * a22 - a12 * a12;
        let s = (b1 * a22 - b2 * a12) / det;
        let t = (a11 * b2 - a12 * b1) / det;

        (s >= -tolerance && t >= -tolerance && s + t <= T::one() + tolerance).then_some([s, t])
    }

    /// Evaluate geometry at local points (2 × n, rows s and t) of an element
    pub fn geometrical_data(
        &self,
        element: usize,
        local_points: &Array2<T>,
        deps: GeometricalDependencies,
    ) -> GeometricalData<T> {
        let n = local_points.ncols();
        let mut data = GeometricalData::new(n, deps);

        if deps.contains(GeometricalDependencies::GLOBALS) {
            for p in 0..n {
                let x = self.local_to_global(element, local_points[[0, p]], local_points[[1, p]]);
                for (dim, &xd) in x.iter().enumerate() {
                    data.globals[[dim, p]] = xd;
                }
            }
        }

        if deps.contains(GeometricalDependencies::NORMALS) {
            let normal = self.normals[element];
            for p in 0..n {
                for (dim, &nd) in normal.iter().enumerate() {
                    data.normals[[dim, p]] = nd;
                }
            }
        }

        if deps.contains(GeometricalDependencies::INTEGRATION_ELEMENTS) {
            data.integration_elements.fill(self.integration_element(element));
        }

        data
    }
}

/// Difference of two 3D vectors a − b
#[inline]
pub fn sub<T: RealScalar>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Dot product of two 3D vectors
#[inline]
pub fn dot<T: RealScalar>(a: &[T; 3], b: &[T; 3]) -> T {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product of two 3D vectors
#[inline]
pub fn cross_product<T: RealScalar>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean distance between two points
#[inline]
pub fn distance<T: RealScalar>(a: &[T; 3], b: &[T; 3]) -> T {
    let d = sub(a, b);
    dot(&d, &d).sqrt()
}

fn triangle_diameter<T: RealScalar>(c: &[[T; 3]; NVERT]) -> T {
    distance(&c[0], &c[1])
        .max(distance(&c[1], &c[2]))
        .max(distance(&c[2], &c[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn two_triangles() -> Grid<f64> {
        let vertices = array![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [5.0, 5.0, 0.0],
            [6.0, 5.0, 0.0],
            [5.0, 6.0, 0.0],
        ];
        Grid::new(vertices, vec![[0, 1, 2], [1, 3, 2], [4, 5, 6]]).unwrap()
    }

    #[test]
    fn test_element_geometry() {
        let grid = two_triangles();
        assert_eq!(grid.vertex_count(), 7);
        assert_eq!(grid.element_count(), 3);
        assert_relative_eq!(grid.area(0), 0.5);
        assert_relative_eq!(grid.integration_element(0), 1.0);
        assert_eq!(grid.normal(0), [0.0, 0.0, 1.0]);
        assert_relative_eq!(grid.diameter(0), 2.0f64.sqrt());

        let c = grid.centroid(0);
        assert_relative_eq!(c[0], 1.0 / 3.0);
        assert_relative_eq!(c[1], 1.0 / 3.0);
    }

    #[test]
    fn test_local_to_global() {
        let grid = two_triangles();
        assert_eq!(grid.local_to_global(1, 0.0, 0.0), [1.0, 0.0, 0.0]);
        assert_eq!(grid.local_to_global(1, 1.0, 0.0), [1.0, 1.0, 0.0]);
        assert_eq!(grid.local_to_global(1, 0.0, 1.0), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_relation() {
        let grid = two_triangles();
        assert_eq!(grid.relation(0, 0), ElementPairRelation::Coincident);
        assert_eq!(grid.relation(0, 1), ElementPairRelation::SharedEdge);
        assert_eq!(grid.relation(0, 2), ElementPairRelation::Disjoint);
    }

    #[test]
    fn test_geometric_relation_across_grids() {
        let grid = two_triangles();
        let copy = two_triangles();
        assert_eq!(grid.geometric_relation(0, &copy, 0), ElementPairRelation::Coincident);
        assert_eq!(grid.geometric_relation(0, &copy, 1), ElementPairRelation::SharedEdge);
        assert_eq!(grid.geometric_relation(0, &copy, 2), ElementPairRelation::Disjoint);

        // Same triangle, corners rotated
        let rotated = Grid::new(
            array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[1, 2, 0]],
        )
        .unwrap();
        assert_eq!(grid.geometric_relation(0, &rotated, 0), ElementPairRelation::SharedEdge);

        let touching = Grid::new(
            array![[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, -1.0, 0.0]],
            vec![[0, 2, 1]],
        )
        .unwrap();
        assert_eq!(grid.geometric_relation(0, &touching, 0), ElementPairRelation::SharedVertex);
    }

    #[test]
    fn test_local_coordinates() {
        let grid = two_triangles();
        let x = grid.local_to_global(1, 0.25, 0.5);
        let local = grid.local_coordinates(1, &x).unwrap();
        assert_relative_eq!(local[0], 0.25, epsilon = 1e-14);
        assert_relative_eq!(local[1], 0.5, epsilon = 1e-14);

        assert!(grid.local_coordinates(0, &[0.0, 0.0, 0.0]).is_some());
        assert!(grid.local_coordinates(0, &[0.25, 0.25, 0.1]).is_none());
        assert!(grid.local_coordinates(0, &[0.75, 0.75, 0.0]).is_none());
    }

    #[test]
    fn test_invalid_vertex_index() {
        let vertices = array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let err = Grid::new(vertices, vec![[0, 1, 3]]).unwrap_err();
        assert!(matches!(
            err,
            BemError::InvalidElement {
                element: 0,
                vertex: 3,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn test_degenerate_element() {
        let vertices = array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let err = Grid::new(vertices, vec![[0, 1, 2]]).unwrap_err();
        assert!(matches!(err, BemError::DegenerateElement { element: 0, .. }));
    }

    #[test]
    fn test_invalid_vertex_array() {
        let vertices = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let err = Grid::new(vertices, vec![[0, 1, 2]]).unwrap_err();
        assert!(matches!(err, BemError::InvalidVertexArray { columns: 2 }));
    }

    #[test]
    fn test_geometrical_data_respects_dependencies() {
        let grid = two_triangles();
        let points = array![[0.25, 0.5], [0.25, 0.25]];
        let deps = GeometricalDependencies::GLOBALS | GeometricalDependencies::NORMALS;
        let data = grid.geometrical_data(0, &points, deps);

        assert_eq!(data.point_count(), 2);
        assert_eq!(data.dependencies(), deps);
        let p = data.slice(1);
        assert_relative_eq!(p.global(0), 0.5);
        assert_relative_eq!(p.global(1), 0.25);
        assert_eq!(p.normal(2), 1.0);
    }

    #[test]
    fn test_vector_helpers() {
        let a = [1.0, 0.0, 0.0];
        let b = [0.0, 1.0, 0.0];
        assert_eq!(cross_product(&a, &b), [0.0, 0.0, 1.0]);
        assert_eq!(dot(&a, &b), 0.0);
        assert_relative_eq!(distance(&a, &b), 2.0f64.sqrt());
    }
}
