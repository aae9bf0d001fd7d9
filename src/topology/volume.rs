//! The assembled lattice: a merged, duplicate-free node/strut graph.
//!
//! Node and element ids are dense and start at 1, so both tables are stored
//! as plain vectors indexed by `id - 1`.

use crate::debug_invariants::DebugInvariants;
use crate::geometry::equality::{DEFAULT_TOLERANCE, Point3, check_tolerance};
use crate::geometry::spatial::{NodeLocator, NodeSearch};
use crate::mesh_error::LatticeError;
use crate::topology::edge::Edge;
use crate::topology::ids::{ElementId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A tiled lattice mesh.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VolumeRepr", into = "VolumeRepr")]
pub struct Volume {
    nodes: Vec<Point3>,
    elements: Vec<Edge>,
}

#[derive(Serialize, Deserialize)]
struct VolumeRepr {
    nodes: Vec<Point3>,
    elements: Vec<Edge>,
}

impl TryFrom<VolumeRepr> for Volume {
    type Error = LatticeError;

    fn try_from(repr: VolumeRepr) -> Result<Self, Self::Error> {
        Volume::try_new(repr.nodes, repr.elements)
    }
}

impl From<Volume> for VolumeRepr {
    fn from(volume: Volume) -> Self {
        VolumeRepr {
            nodes: volume.nodes,
            elements: volume.elements,
        }
    }
}

impl Volume {
    /// An empty volume.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a volume from dense tables, checking element references.
    ///
    /// `nodes[i]` becomes node `i + 1` and `elements[i]` becomes element
    /// `i + 1`. Coincident nodes are not checked here; use
    /// [`Volume::validate_with_tolerance`] for that.
    pub fn try_new(nodes: Vec<Point3>, elements: Vec<Edge>) -> Result<Self, LatticeError> {
        let volume = Self { nodes, elements };
        volume.check_structure()?;
        Ok(volume)
    }

    /// Assemble from parts the caller has already validated.
    pub(crate) fn from_parts(nodes: Vec<Point3>, elements: Vec<Edge>) -> Self {
        Self { nodes, elements }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// `true` when the volume has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Coordinate of a node.
    pub fn node(&self, id: NodeId) -> Option<&Point3> {
        self.nodes.get(id.index())
    }

    /// Endpoints of a strut.
    pub fn element(&self, id: ElementId) -> Option<&Edge> {
        self.elements.get(id.index())
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (NodeId, &Point3)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, c)| (NodeId::from_index(idx), c))
    }

    /// Struts in id order.
    pub fn elements(&self) -> impl ExactSizeIterator<Item = (ElementId, &Edge)> + '_ {
        self.elements
            .iter()
            .enumerate()
            .map(|(idx, e)| (ElementId::from_index(idx), e))
    }

    /// Raw coordinate table, indexed by `id - 1`.
    pub fn coordinates(&self) -> &[Point3] {
        &self.nodes
    }

    /// Raw connectivity table, indexed by `id - 1`.
    pub fn edges(&self) -> &[Edge] {
        &self.elements
    }

    /// Lowest-id node coinciding with `point`.
    pub fn find_node(&self, point: &Point3, tolerance: f64) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|q| crate::geometry::equality::nodes_equal(point, q, tolerance))
            .map(NodeId::from_index)
    }

    /// Element connecting `a` and `b` in either direction.
    pub fn find_element(&self, a: NodeId, b: NodeId) -> Option<ElementId> {
        let probe = Edge::new(a, b).ok()?;
        self.elements
            .iter()
            .position(|e| *e == probe)
            .map(ElementId::from_index)
    }

    pub(crate) fn map_coordinates<F>(&self, f: F) -> Self
    where
        F: FnMut(&Point3) -> Point3,
    {
        Self {
            nodes: self.nodes.iter().map(f).collect(),
            elements: self.elements.clone(),
        }
    }

    fn check_structure(&self) -> Result<(), LatticeError> {
        for (idx, coord) in self.nodes.iter().enumerate() {
            if !coord.iter().all(|c| c.is_finite()) {
                return Err(LatticeError::NonFiniteCoordinate {
                    node: idx as u64 + 1,
                    coord: *coord,
                });
            }
        }
        let mut seen: HashMap<Edge, ElementId> = HashMap::with_capacity(self.elements.len());
        for (id, edge) in self.elements() {
            for node in edge.nodes() {
                if node.index() >= self.nodes.len() {
                    return Err(LatticeError::MissingNode {
                        element: id.get(),
                        node: node.get(),
                    });
                }
            }
            if let Some(first) = seen.insert(*edge, id) {
                return Err(LatticeError::DuplicateElement {
                    first: first.get(),
                    second: id.get(),
                });
            }
        }
        Ok(())
    }

    /// Full invariant check under a given coincidence tolerance.
    ///
    /// Verifies element references, edge uniqueness and that no two nodes
    /// are closer than `tolerance`.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), LatticeError> {
        let tolerance = check_tolerance(tolerance)?;
        self.check_structure()?;
        let mut locator = NodeLocator::with_capacity(tolerance, NodeSearch::Grid, self.nodes.len());
        for (id, coord) in self.nodes() {
            let (existing, created) = locator.find_or_insert(*coord);
            if !created {
                return Err(LatticeError::DuplicateNode {
                    first: existing.get(),
                    second: id.get(),
                });
            }
        }
        Ok(())
    }
}

impl DebugInvariants for Volume {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Volume");
    }

    fn validate_invariants(&self) -> Result<(), LatticeError> {
        self.validate_with_tolerance(DEFAULT_TOLERANCE)
    }
}
