//! The repeating pattern of a periodic lattice.
//!
//! A [`UnitCell`] is a small node/strut graph plus the three periodicity
//! vectors that tile it through space. It is validated on construction and is
//! read-only afterwards; scaling produces a new cell.

use crate::debug_invariants::DebugInvariants;
use crate::geometry::equality::{DEFAULT_TOLERANCE, Point3, check_tolerance};
use crate::geometry::spatial::{NodeLocator, NodeSearch};
use crate::mesh_error::LatticeError;
use crate::topology::edge::Edge;
use crate::topology::ids::{ElementId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Translation applied per unit step along each tiling axis.
pub type PeriodicityVectors = [Point3; 3];

/// Unit periodicity along x, y and z.
pub const UNIT_PERIODICITY: PeriodicityVectors =
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// A validated unit cell: nodes, struts and periodicity vectors.
///
/// Nodes and elements are kept in id order; that order drives id assignment
/// during assembly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UnitCellRepr", into = "UnitCellRepr")]
pub struct UnitCell {
    nodes: BTreeMap<NodeId, Point3>,
    elements: BTreeMap<ElementId, Edge>,
    periodicity: PeriodicityVectors,
}

#[derive(Serialize, Deserialize)]
struct UnitCellRepr {
    nodes: Vec<(NodeId, Point3)>,
    elements: Vec<(ElementId, Edge)>,
    periodicity: PeriodicityVectors,
}

impl TryFrom<UnitCellRepr> for UnitCell {
    type Error = LatticeError;

    fn try_from(repr: UnitCellRepr) -> Result<Self, Self::Error> {
        UnitCell::try_new(repr.nodes, repr.elements, repr.periodicity)
    }
}

impl From<UnitCell> for UnitCellRepr {
    fn from(cell: UnitCell) -> Self {
        UnitCellRepr {
            nodes: cell.nodes.into_iter().collect(),
            elements: cell.elements.into_iter().collect(),
            periodicity: cell.periodicity,
        }
    }
}

fn check_finite(node: NodeId, coord: &Point3) -> Result<(), LatticeError> {
    if coord.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(LatticeError::NonFiniteCoordinate {
            node: node.get(),
            coord: *coord,
        })
    }
}

impl UnitCell {
    /// Build a unit cell, validating ids, references and coordinates.
    ///
    /// # Errors
    /// - a node or element id appears twice,
    /// - a coordinate or periodicity component is not finite,
    /// - an element references a node that is not in `nodes`,
    /// - two elements connect the same pair of nodes.
    pub fn try_new<N, E>(
        nodes: N,
        elements: E,
        periodicity: PeriodicityVectors,
    ) -> Result<Self, LatticeError>
    where
        N: IntoIterator<Item = (NodeId, Point3)>,
        E: IntoIterator<Item = (ElementId, Edge)>,
    {
        let mut node_map = BTreeMap::new();
        for (id, coord) in nodes {
            check_finite(id, &coord)?;
            if node_map.insert(id, coord).is_some() {
                return Err(LatticeError::InvariantViolation(format!(
                    "node id {id} is defined more than once"
                )));
            }
        }
        if periodicity.iter().flatten().any(|c| !c.is_finite()) {
            return Err(LatticeError::InvariantViolation(format!(
                "periodicity vectors must be finite, got {periodicity:?}"
            )));
        }

        let mut element_map = BTreeMap::new();
        let mut seen: HashMap<Edge, ElementId> = HashMap::new();
        for (id, edge) in elements {
            for node in edge.nodes() {
                if !node_map.contains_key(&node) {
                    return Err(LatticeError::MissingNode {
                        element: id.get(),
                        node: node.get(),
                    });
                }
            }
            if let Some(first) = seen.insert(edge, id) {
                return Err(LatticeError::DuplicateElement {
                    first: first.get(),
                    second: id.get(),
                });
            }
            if element_map.insert(id, edge).is_some() {
                return Err(LatticeError::InvariantViolation(format!(
                    "element id {id} is defined more than once"
                )));
            }
        }

        Ok(Self {
            nodes: node_map,
            elements: element_map,
            periodicity,
        })
    }

    /// Build a unit cell from raw integer tables.
    pub fn from_raw(
        nodes: &[(u64, Point3)],
        elements: &[(u64, [u64; 2])],
        periodicity: PeriodicityVectors,
    ) -> Result<Self, LatticeError> {
        let nodes = nodes
            .iter()
            .map(|&(id, coord)| Ok::<_, LatticeError>((NodeId::new(id)?, coord)))
            .collect::<Result<Vec<_>, LatticeError>>()?;
        let elements = elements
            .iter()
            .map(|&(id, [a, b])| {
                let id = ElementId::new(id)?;
                let edge = Edge::from_raw(a, b).map_err(|e| Edge::for_element(e, id))?;
                Ok::<_, LatticeError>((id, edge))
            })
            .collect::<Result<Vec<_>, LatticeError>>()?;
        Self::try_new(nodes, elements, periodicity)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of struts.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Coordinate of a node.
    pub fn node(&self, id: NodeId) -> Option<&Point3> {
        self.nodes.get(&id)
    }

    /// Endpoints of a strut.
    pub fn element(&self, id: ElementId) -> Option<&Edge> {
        self.elements.get(&id)
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (NodeId, &Point3)> + '_ {
        self.nodes.iter().map(|(id, c)| (*id, c))
    }

    /// Struts in ascending id order.
    pub fn elements(&self) -> impl ExactSizeIterator<Item = (ElementId, &Edge)> + '_ {
        self.elements.iter().map(|(id, e)| (*id, e))
    }

    /// The three tiling vectors.
    pub fn periodicity(&self) -> &PeriodicityVectors {
        &self.periodicity
    }

    /// Offset of the cell at repetition index `(i, j, k)`.
    pub fn offset(&self, i: usize, j: usize, k: usize) -> Point3 {
        let [p0, p1, p2] = &self.periodicity;
        let (i, j, k) = (i as f64, j as f64, k as f64);
        std::array::from_fn(|axis| i * p0[axis] + j * p1[axis] + k * p2[axis])
    }

    /// Replace every coordinate and periodicity vector, keeping ids.
    pub(crate) fn map_geometry<F, G>(&self, mut node_fn: F, mut vector_fn: G) -> Self
    where
        F: FnMut(&Point3) -> Point3,
        G: FnMut(&Point3) -> Point3,
    {
        Self {
            nodes: self.nodes.iter().map(|(id, c)| (*id, node_fn(c))).collect(),
            elements: self.elements.clone(),
            periodicity: std::array::from_fn(|axis| vector_fn(&self.periodicity[axis])),
        }
    }

    /// Check that no two nodes coincide under `tolerance`.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), LatticeError> {
        let tolerance = check_tolerance(tolerance)?;
        let mut locator =
            NodeLocator::with_capacity(tolerance, NodeSearch::Grid, self.nodes.len());
        let mut local_ids = Vec::with_capacity(self.nodes.len());
        for (id, coord) in &self.nodes {
            let (slot, created) = locator.find_or_insert(*coord);
            if !created {
                return Err(LatticeError::DuplicateNode {
                    first: local_ids[slot.index()],
                    second: id.get(),
                });
            }
            local_ids.push(id.get());
        }
        Ok(())
    }
}

impl DebugInvariants for UnitCell {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "UnitCell");
    }

    fn validate_invariants(&self) -> Result<(), LatticeError> {
        // construction guarantees references and edge uniqueness
        self.validate_with_tolerance(DEFAULT_TOLERANCE)
    }
}
