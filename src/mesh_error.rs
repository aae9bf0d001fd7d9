//! LatticeError: Unified error type for lattice-sieve public APIs
//!
//! Every fallible operation in the crate (id construction, unit-cell
//! validation, assembly, scaling, catalog lookup and mesh I/O) reports
//! through this enum instead of panicking.

use thiserror::Error;

/// Unified error type for lattice-sieve operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LatticeError {
    /// Attempted to construct a NodeId with a zero value (invalid).
    #[error("NodeId must be non-zero (0 is reserved as invalid/sentinel)")]
    InvalidNodeId,
    /// Attempted to construct an ElementId with a zero value (invalid).
    #[error("ElementId must be non-zero (0 is reserved as invalid/sentinel)")]
    InvalidElementId,
    /// A point did not carry exactly three coordinates.
    #[error("points must be in the format [x, y, z], got {found} coordinate(s)")]
    InvalidPointDimension { found: usize },
    /// A node coordinate is NaN or infinite.
    #[error("node {node} has a non-finite coordinate {coord:?}")]
    NonFiniteCoordinate { node: u64, coord: [f64; 3] },
    /// An element references a node that is not in the mesh.
    #[error("element {element} references missing node {node}")]
    MissingNode { element: u64, node: u64 },
    /// An element connects a node to itself.
    #[error("element {element} is degenerate: both endpoints are node {node}")]
    DegenerateEdge { element: u64, node: u64 },
    /// Two node ids carry the same coordinate (within tolerance).
    #[error("nodes {first} and {second} coincide within tolerance")]
    DuplicateNode { first: u64, second: u64 },
    /// Two element ids connect the same pair of nodes.
    #[error("elements {first} and {second} connect the same pair of nodes")]
    DuplicateElement { first: u64, second: u64 },
    /// A repetition count was negative.
    #[error("repetition count along axis {axis} must be non-negative, got {count}")]
    InvalidRepetition { axis: usize, count: i64 },
    /// The coincidence tolerance must be finite and strictly positive.
    #[error("coincidence tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),
    /// Scaling factors must be finite and non-zero.
    #[error("scale factor must be finite and non-zero, got {0}")]
    InvalidScaleFactor(f64),
    /// The requested unit-cell name is not in the catalog.
    #[error("unit cell `{0}` is not implemented")]
    UnknownTopology(String),
    /// A mesh-level invariant failed to hold.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// Malformed input while reading a mesh file.
    #[error("mesh I/O parse error: {0}")]
    MeshIoParse(String),
    /// Underlying reader/writer failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for LatticeError {
    fn from(err: std::io::Error) -> Self {
        LatticeError::Io(err.to_string())
    }
}
