//! Top-level module for lattice topology.
//!
//! This module provides the core types for representing strut lattices:
//! - Node and element identifiers
//! - Unordered edges (struts)
//! - Periodic unit cells and assembled volumes
//!
//! Most users will build a [`unit_cell::UnitCell`] and hand it to
//! [`crate::algs::assembly::assemble`] to obtain a [`volume::Volume`].

pub mod edge;
pub mod ids;
pub mod unit_cell;
pub mod volume;

pub use edge::Edge;
pub use ids::{ElementId, NodeId};
