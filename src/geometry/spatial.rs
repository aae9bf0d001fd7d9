//! Coincidence search over the growing global node set.
//!
//! [`NodeLocator`] answers "which already-placed node does this point coincide
//! with?" in one of two modes:
//! - [`NodeSearch::Linear`] scans every node in id order (the reference).
//! - [`NodeSearch::Grid`] buckets nodes by `floor(coord / tolerance)`.
//!
//! Two points closer than `tolerance` differ by less than one bucket per axis,
//! so the 27 buckets around a query contain every possible match. Both modes
//! return the highest matching id (the most recently placed node), which makes
//! their results interchangeable.

use crate::geometry::equality::{Point3, nodes_equal};
use crate::topology::ids::NodeId;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Strategy used to find coincident nodes during assembly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSearch {
    /// Full scan of the accumulated nodes.
    Linear,
    /// Uniform grid bucketing keyed by rounded coordinates.
    #[default]
    Grid,
}

type BucketKey = [i64; 3];

/// Incremental point set supporting tolerance queries.
#[derive(Debug, Clone)]
pub struct NodeLocator {
    tolerance: f64,
    search: NodeSearch,
    points: Vec<Point3>,
    buckets: HashMap<BucketKey, Vec<NodeId>>,
}

impl NodeLocator {
    /// Create an empty locator. `tolerance` must already be validated.
    pub fn new(tolerance: f64, search: NodeSearch) -> Self {
        Self {
            tolerance,
            search,
            points: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    /// Create an empty locator with room for `capacity` points.
    pub fn with_capacity(tolerance: f64, search: NodeSearch, capacity: usize) -> Self {
        let mut locator = Self::new(tolerance, search);
        locator.points.reserve(capacity);
        if search == NodeSearch::Grid {
            locator.buckets.reserve(capacity);
        }
        locator
    }

    /// Number of points inserted so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume the locator and return its points.
    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }

    fn bucket_of(&self, p: &Point3) -> BucketKey {
        // `as` saturates, so out-of-range coordinates share the extreme buckets
        [
            (p[0] / self.tolerance).floor() as i64,
            (p[1] / self.tolerance).floor() as i64,
            (p[2] / self.tolerance).floor() as i64,
        ]
    }

    /// Highest id whose point coincides with `p`, if any.
    pub fn find(&self, p: &Point3) -> Option<NodeId> {
        match self.search {
            NodeSearch::Linear => self
                .points
                .iter()
                .rposition(|q| nodes_equal(p, q, self.tolerance))
                .map(NodeId::from_index),
            NodeSearch::Grid => {
                let [bx, by, bz] = self.bucket_of(p);
                let mut best: Option<NodeId> = None;
                for dx in -1i64..=1 {
                    for dy in -1i64..=1 {
                        for dz in -1i64..=1 {
                            let key = [
                                bx.saturating_add(dx),
                                by.saturating_add(dy),
                                bz.saturating_add(dz),
                            ];
                            let Some(bucket) = self.buckets.get(&key) else {
                                continue;
                            };
                            // buckets are filled in id order, scan newest first
                            if let Some(&id) = bucket
                                .iter()
                                .rev()
                                .find(|id| nodes_equal(p, &self.points[id.index()], self.tolerance))
                            {
                                if best.is_none_or(|b| id > b) {
                                    best = Some(id);
                                }
                            }
                        }
                    }
                }
                best
            }
        }
    }

    /// Append a point and return its id (`len + 1`).
    pub fn insert(&mut self, p: Point3) -> NodeId {
        let id = NodeId::from_index(self.points.len());
        if self.search == NodeSearch::Grid {
            let key = self.bucket_of(&p);
            self.buckets.entry(key).or_default().push(id);
        }
        self.points.push(p);
        id
    }

    /// Return the coincident node for `p`, inserting it when none exists.
    ///
    /// The boolean is `true` when a new node was created.
    pub fn find_or_insert(&mut self, p: Point3) -> (NodeId, bool) {
        match self.find(&p) {
            Some(id) => (id, false),
            None => (self.insert(p), true),
        }
    }
}
