//! Geometry utilities for lattice-sieve.
//!
//! This module provides the tolerance-based coincidence oracle, the spatial
//! index used to search for coincident nodes, and basic lattice metrics.

pub mod equality;
pub mod metrics;
pub mod spatial;
