#![cfg_attr(docsrs, feature(doc_cfg))]
//! # lattice-sieve
//!
//! lattice-sieve builds strut (beam) lattices by tiling a periodic unit cell
//! in three directions. Nodes that coincide within a tolerance are merged and
//! struts that connect the same pair of nodes are emitted once, so the result
//! is a single consistent graph with contiguous 1-based ids.
//!
//! ## Features
//! - Validated unit cells with periodicity vectors, and a catalog of common
//!   cells (simple cubic, BCC, FCC, octet truss)
//! - Volume assembly with linear or grid-bucketed coincident-node search
//! - Axis-aligned scaling of cells and assembled volumes
//! - Gmsh (`.msh` v2.2) and legacy VTK output, Gmsh input
//! - Optional `rayon` feature for translating cells in parallel
//!
//! ## Determinism
//!
//! Cells are visited in row-major order with `k` innermost and nodes and
//! struts within a cell in ascending id order. The output numbering depends
//! only on the input, never on the search strategy or thread count.
//!
//! ## Usage
//!
//! ```rust
//! use lattice_sieve::prelude::*;
//!
//! let cell = UnitCellKind::Bcc.unit_cell()?;
//! let volume = assemble(&cell, 2, 1, 1)?;
//! assert_eq!(volume.node_count(), 14);
//! assert_eq!(volume.element_count(), 36);
//! # Ok::<(), LatticeError>(())
//! ```

pub mod algs;
pub mod debug_invariants;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::assembly::{AssemblyOptions, Repetitions, assemble, assemble_with};
    pub use crate::algs::scaling::ScaleFactors;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::equality::{DEFAULT_TOLERANCE, Point3, edges_equal, nodes_equal};
    pub use crate::geometry::spatial::NodeSearch;
    pub use crate::io::gmsh::{GmshReader, GmshWriter};
    pub use crate::io::vtk::VtkWriter;
    pub use crate::io::{VolumeReader, VolumeWriter};
    pub use crate::mesh_error::LatticeError;
    pub use crate::mesh_generation::catalog::UnitCellKind;
    pub use crate::mesh_generation::{LatticeGenerationOptions, generate_lattice};
    pub use crate::topology::edge::Edge;
    pub use crate::topology::ids::{ElementId, NodeId};
    pub use crate::topology::unit_cell::{PeriodicityVectors, UNIT_PERIODICITY, UnitCell};
    pub use crate::topology::volume::Volume;
}
