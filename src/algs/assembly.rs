//! Volume assembly: tile a unit cell along its periodicity vectors and merge
//! coincident geometry.
//!
//! Cells are visited in row-major order `(i, j, k)` with `k` innermost. For
//! each cell the unit-cell nodes are translated by
//! `i·p0 + j·p1 + k·p2`, resolved against the nodes placed so far
//! (tolerance-based coincidence), and unresolved nodes receive the next global
//! id. Struts are then remapped through the cell's alias map and kept only if
//! their endpoint pair is new. Node and element counters run across the whole
//! assembly, so the traversal order fixes every id in the output.
//!
//! ```rust
//! use lattice_sieve::algs::assembly::assemble;
//! use lattice_sieve::mesh_generation::catalog::UnitCellKind;
//!
//! let cell = UnitCellKind::Bcc.unit_cell()?;
//! let volume = assemble(&cell, 2, 1, 1)?;
//! assert_eq!(volume.node_count(), 14);
//! assert_eq!(volume.element_count(), 36);
//! # Ok::<(), lattice_sieve::mesh_error::LatticeError>(())
//! ```

use crate::geometry::equality::{DEFAULT_TOLERANCE, Point3, check_tolerance, edges_equal};
use crate::geometry::spatial::{NodeLocator, NodeSearch};
use crate::mesh_error::LatticeError;
use crate::topology::edge::Edge;
use crate::topology::ids::{ElementId, NodeId};
use crate::topology::unit_cell::UnitCell;
use crate::topology::volume::Volume;
use hashbrown::HashSet;
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Cap on entries reserved up front; larger assemblies grow on demand.
const PREALLOC_LIMIT: usize = 1 << 16;

/// Number of repetitions along each periodicity vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repetitions {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl Repetitions {
    pub const fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Total number of cells visited.
    pub fn cell_count(&self) -> usize {
        self.nx.saturating_mul(self.ny).saturating_mul(self.nz)
    }

    /// `true` if any axis has zero repetitions.
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Cell indices in assembly order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> {
        iproduct!(0..self.nx, 0..self.ny, 0..self.nz)
    }
}

/// Signed counts, e.g. from user input; negative values are rejected.
impl TryFrom<[i64; 3]> for Repetitions {
    type Error = LatticeError;

    fn try_from(counts: [i64; 3]) -> Result<Self, Self::Error> {
        let mut out = [0usize; 3];
        for (axis, &count) in counts.iter().enumerate() {
            out[axis] = usize::try_from(count)
                .map_err(|_| LatticeError::InvalidRepetition { axis, count })?;
        }
        Ok(Self::new(out[0], out[1], out[2]))
    }
}

/// Tuning knobs for [`assemble_with`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyOptions {
    /// Nodes strictly closer than this are merged.
    pub tolerance: f64,
    /// Coincidence search strategy; does not affect the result.
    pub search: NodeSearch,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            search: NodeSearch::Grid,
        }
    }
}

impl AssemblyOptions {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_search(mut self, search: NodeSearch) -> Self {
        self.search = search;
        self
    }
}

/// A unit-cell strut expressed as positions in the cell's node order.
#[derive(Clone, Copy, Debug)]
struct LocalEdge {
    id: ElementId,
    ends: [usize; 2],
}

/// Mutable context threaded through the cell traversal.
struct AssemblyState {
    nodes: NodeLocator,
    elements: Vec<Edge>,
    edge_index: HashSet<Edge>,
    search: NodeSearch,
    /// Per-cell alias map: position in the unit cell -> global node id.
    aliases: Vec<NodeId>,
}

#[derive(Debug, Default, Clone, Copy)]
struct CellStats {
    new_nodes: usize,
    new_elements: usize,
}

impl AssemblyState {
    fn new(options: &AssemblyOptions, node_hint: usize, element_hint: usize) -> Self {
        let node_hint = node_hint.min(PREALLOC_LIMIT);
        let element_hint = element_hint.min(PREALLOC_LIMIT);
        let edge_index = match options.search {
            NodeSearch::Grid => HashSet::with_capacity(element_hint),
            NodeSearch::Linear => HashSet::new(),
        };
        Self {
            nodes: NodeLocator::with_capacity(options.tolerance, options.search, node_hint),
            elements: Vec::with_capacity(element_hint),
            edge_index,
            search: options.search,
            aliases: Vec::new(),
        }
    }

    fn contains_edge(&self, edge: &Edge) -> bool {
        match self.search {
            NodeSearch::Linear => self.elements.iter().any(|e| edges_equal(e, edge)),
            NodeSearch::Grid => self.edge_index.contains(edge),
        }
    }

    fn insert_edge(&mut self, edge: Edge) -> bool {
        if self.contains_edge(&edge) {
            return false;
        }
        if self.search == NodeSearch::Grid {
            self.edge_index.insert(edge);
        }
        self.elements.push(edge);
        true
    }

    fn place_cell<I>(&mut self, candidates: I, edges: &[LocalEdge]) -> Result<CellStats, LatticeError>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut stats = CellStats::default();
        self.aliases.clear();
        for candidate in candidates {
            let (global, created) = self.nodes.find_or_insert(candidate);
            if created {
                stats.new_nodes += 1;
            } else {
                log::trace!("candidate {candidate:?} aliased to node {global}");
            }
            self.aliases.push(global);
        }

        for local in edges {
            let [a, b] = local.ends;
            let edge = Edge::new(self.aliases[a], self.aliases[b])
                .map_err(|e| Edge::for_element(e, local.id))?;
            if self.insert_edge(edge) {
                stats.new_elements += 1;
            }
        }
        Ok(stats)
    }

    fn finish(self) -> Volume {
        Volume::from_parts(self.nodes.into_points(), self.elements)
    }
}

fn local_edges(cell: &UnitCell) -> Result<Vec<LocalEdge>, LatticeError> {
    let position: HashMap<NodeId, usize> = cell
        .nodes()
        .enumerate()
        .map(|(pos, (id, _))| (id, pos))
        .collect();
    cell.elements()
        .map(|(id, edge)| {
            let [a, b] = edge.nodes();
            let lookup = |node: NodeId| {
                position
                    .get(&node)
                    .copied()
                    .ok_or(LatticeError::MissingNode {
                        element: id.get(),
                        node: node.get(),
                    })
            };
            Ok::<_, LatticeError>(LocalEdge {
                id,
                ends: [lookup(a)?, lookup(b)?],
            })
        })
        .collect()
}

fn translate(base: &[Point3], offset: Point3) -> impl Iterator<Item = Point3> + '_ {
    base.iter()
        .map(move |p| [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]])
}

/// Tile `cell` `nx × ny × nz` times with default options.
///
/// A zero count along any axis yields an empty volume.
pub fn assemble(cell: &UnitCell, nx: usize, ny: usize, nz: usize) -> Result<Volume, LatticeError> {
    assemble_with(cell, Repetitions::new(nx, ny, nz), &AssemblyOptions::default())
}

/// Tile `cell` according to `repetitions`, merging nodes closer than
/// `options.tolerance` and dropping struts whose endpoint pair already exists.
///
/// # Errors
/// Fails before any work is done if the tolerance is invalid or two unit-cell
/// nodes coincide. Fails without returning a partial volume if a strut
/// collapses onto a single node after merging.
pub fn assemble_with(
    cell: &UnitCell,
    repetitions: Repetitions,
    options: &AssemblyOptions,
) -> Result<Volume, LatticeError> {
    let tolerance = check_tolerance(options.tolerance)?;
    cell.validate_with_tolerance(tolerance)?;
    let edges = local_edges(cell)?;

    if repetitions.is_empty() {
        log::info!("assembly skipped: repetitions {repetitions:?} leave no cells");
        return Ok(Volume::new());
    }

    let base: Vec<Point3> = cell.nodes().map(|(_, p)| *p).collect();
    let cells = repetitions.cell_count();
    let mut state = AssemblyState::new(
        options,
        cells.saturating_mul(base.len()),
        cells.saturating_mul(edges.len()),
    );
    log::info!(
        "assembling {}x{}x{} cells ({} nodes, {} struts per cell, tolerance {tolerance:e})",
        repetitions.nx,
        repetitions.ny,
        repetitions.nz,
        base.len(),
        edges.len()
    );

    #[cfg(feature = "rayon")]
    {
        let indices: Vec<_> = repetitions.cells().collect();
        let blocks: Vec<Vec<Point3>> = indices
            .par_iter()
            .map(|&(i, j, k)| translate(&base, cell.offset(i, j, k)).collect())
            .collect();
        for (&(i, j, k), block) in indices.iter().zip(blocks) {
            let stats = state.place_cell(block, &edges)?;
            log_cell((i, j, k), stats);
        }
    }
    #[cfg(not(feature = "rayon"))]
    for (i, j, k) in repetitions.cells() {
        let stats = state.place_cell(translate(&base, cell.offset(i, j, k)), &edges)?;
        log_cell((i, j, k), stats);
    }

    let volume = state.finish();
    log::info!(
        "assembled volume: {} nodes ({} merged), {} struts ({} merged)",
        volume.node_count(),
        cells
            .saturating_mul(base.len())
            .saturating_sub(volume.node_count()),
        volume.element_count(),
        cells
            .saturating_mul(edges.len())
            .saturating_sub(volume.element_count())
    );
    crate::debug_invariants!(volume.validate_with_tolerance(tolerance), "assembled volume");
    Ok(volume)
}

fn log_cell(index: (usize, usize, usize), stats: CellStats) {
    log::debug!(
        "cell {index:?}: {} new nodes, {} new struts",
        stats.new_nodes,
        stats.new_elements
    );
}
