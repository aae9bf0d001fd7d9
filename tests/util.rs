#![allow(dead_code)]
use lattice_sieve::{
    geometry::equality::nodes_equal,
    topology::edge::Edge,
    topology::ids::{ElementId, NodeId},
    topology::volume::Volume,
};
use std::collections::HashSet;

pub fn nid(u: u64) -> NodeId {
    NodeId::new(u).unwrap()
}

pub fn eid(u: u64) -> ElementId {
    ElementId::new(u).unwrap()
}

pub fn edge(a: u64, b: u64) -> Edge {
    Edge::from_raw(a, b).unwrap()
}

/// Assert no two nodes of `volume` are within `tolerance` of each other.
pub fn assert_nodes_distinct(volume: &Volume, tolerance: f64) {
    let coords = volume.coordinates();
    for (i, p) in coords.iter().enumerate() {
        for (j, q) in coords.iter().enumerate().skip(i + 1) {
            assert!(
                !nodes_equal(p, q, tolerance),
                "nodes {} and {} coincide: {:?} ~ {:?}",
                i + 1,
                j + 1,
                p,
                q
            );
        }
    }
}

/// Assert every strut references existing nodes and appears once.
pub fn assert_edges_valid(volume: &Volume) {
    let mut seen = HashSet::new();
    for (id, e) in volume.elements() {
        for n in e.nodes() {
            assert!(volume.node(n).is_some(), "element {id} references missing node {n}");
        }
        assert!(seen.insert(e.key()), "element {id} duplicates {:?}", e.key());
    }
}

/// Sorted canonical endpoint pairs, for order-agnostic comparison.
pub fn edge_keys(volume: &Volume) -> Vec<(u64, u64)> {
    let mut keys: Vec<_> = volume
        .edges()
        .iter()
        .map(|e| {
            let (a, b) = e.key();
            (a.get(), b.get())
        })
        .collect();
    keys.sort_unstable();
    keys
}
