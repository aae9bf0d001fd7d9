//! Undirected strut connectivity.
//!
//! An [`Edge`] remembers its endpoints in the order they were given so that
//! exports reproduce the source connectivity, but equality and hashing only
//! look at the unordered endpoint set: `{a, b} == {b, a}`.

use crate::mesh_error::LatticeError;
use crate::topology::ids::{ElementId, NodeId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A strut between two distinct nodes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "[NodeId; 2]", into = "[NodeId; 2]")]
pub struct Edge {
    a: NodeId,
    b: NodeId,
}

impl Edge {
    /// Build an edge between two distinct nodes.
    pub fn new(a: NodeId, b: NodeId) -> Result<Self, LatticeError> {
        if a == b {
            return Err(LatticeError::DegenerateEdge {
                element: 0,
                node: a.get(),
            });
        }
        Ok(Self { a, b })
    }

    /// Build an edge from raw endpoint ids.
    pub fn from_raw(a: u64, b: u64) -> Result<Self, LatticeError> {
        Self::new(NodeId::new(a)?, NodeId::new(b)?)
    }

    /// Endpoints in insertion order.
    #[inline]
    pub fn nodes(&self) -> [NodeId; 2] {
        [self.a, self.b]
    }

    /// Canonical `(min, max)` endpoint pair used for identity.
    #[inline]
    pub fn key(&self) -> (NodeId, NodeId) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    /// Whether `node` is one of the endpoints.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }

    /// Attach the element id to a degenerate-edge error raised by [`Edge::new`].
    pub(crate) fn for_element(err: LatticeError, element: ElementId) -> LatticeError {
        match err {
            LatticeError::DegenerateEdge { node, .. } => LatticeError::DegenerateEdge {
                element: element.get(),
                node,
            },
            other => other,
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl TryFrom<[NodeId; 2]> for Edge {
    type Error = LatticeError;

    fn try_from(pair: [NodeId; 2]) -> Result<Self, Self::Error> {
        Edge::new(pair[0], pair[1])
    }
}

impl From<Edge> for [NodeId; 2] {
    fn from(edge: Edge) -> Self {
        edge.nodes()
    }
}
