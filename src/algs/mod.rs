//! Lattice algorithms: periodic assembly and scaling.

pub mod assembly;
pub mod scaling;

pub use assembly::{assemble, assemble_with};
