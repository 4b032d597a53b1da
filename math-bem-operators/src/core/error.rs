//! Error types for grid construction, operator construction and assembly.
//!
//! Kernel evaluation has no error path: out-of-contract geometric input is a
//! precondition violation. Everything around it (grids, spaces, operator
//! wiring, configuration) reports failures through [`BemError`].

use thiserror::Error;

/// Errors raised while building grids and operators or assembling weak forms.
#[derive(Debug, Error)]
pub enum BemError {
    /// An element references a vertex that does not exist.
    #[error("element {element} references vertex {vertex}, but the grid has {vertex_count} vertices")]
    InvalidElement {
        /// Element index
        element: usize,
        /// Offending vertex index
        vertex: usize,
        /// Number of vertices in the grid
        vertex_count: usize,
    },

    /// An element has (numerically) zero area.
    #[error("element {element} is degenerate (area {area:e})")]
    DegenerateElement {
        /// Element index
        element: usize,
        /// Computed area
        area: f64,
    },

    /// The vertex array does not have three columns.
    #[error("vertex array must be n x 3, got n x {columns}")]
    InvalidVertexArray {
        /// Number of columns found
        columns: usize,
    },

    /// Range and dual-to-range spaces must live on the same grid.
    #[error("range and dual-to-range spaces are defined on different grids")]
    GridMismatch,

    /// A space does not provide the number of components its transformation expects.
    #[error("{role} space has codomain dimension {found}, but its transformation expects {expected}")]
    CodomainMismatch {
        /// Which space ("domain", "range", "dual-to-range")
        role: &'static str,
        /// Codomain dimension of the space
        found: usize,
        /// Argument dimension of the transformation
        expected: usize,
    },

    /// Assembly options are out of range.
    #[error("invalid assembly options: {0}")]
    InvalidOptions(String),

    /// A vector does not match the operator it is applied to.
    #[error("dimension mismatch: expected a vector of length {expected}, got {found}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        found: usize,
    },

    /// Configuration could not be (de)serialised.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration file could not be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for BEM operator construction and assembly.
pub type Result<T> = std::result::Result<T, BemError>;

impl BemError {
    /// Returns `true` if the error comes from grid construction.
    pub fn is_grid_error(&self) -> bool {
        matches!(
            self,
            BemError::InvalidElement { .. }
                | BemError::DegenerateElement { .. }
                | BemError::InvalidVertexArray { .. }
        )
    }

    /// Returns `true` if the error comes from an invalid space combination.
    pub fn is_space_error(&self) -> bool {
        matches!(
            self,
            BemError::GridMismatch | BemError::CodomainMismatch { .. }
        )
    }

    /// Returns `true` if the error comes from configuration handling.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BemError::InvalidOptions(_) | BemError::Config(_) | BemError::Io(_)
        )
    }
}
