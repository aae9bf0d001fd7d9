//! Lattice generators: named unit cells and the catalog → scale → assemble
//! pipeline.

pub mod catalog;

use crate::algs::assembly::{AssemblyOptions, Repetitions, assemble_with};
use crate::algs::scaling::ScaleFactors;
use crate::mesh_error::LatticeError;
use crate::topology::volume::Volume;
use catalog::UnitCellKind;
use serde::{Deserialize, Serialize};

/// Everything needed to generate a lattice volume from the catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeGenerationOptions {
    /// Per-axis size of one cell (the catalog cells span the unit cube).
    pub scale: ScaleFactors,
    /// Assembly tolerance and search strategy.
    pub assembly: AssemblyOptions,
}

/// Build `kind`, scale it and tile it `repetitions` times.
///
/// ```rust
/// use lattice_sieve::algs::assembly::Repetitions;
/// use lattice_sieve::mesh_generation::{LatticeGenerationOptions, generate_lattice};
/// use lattice_sieve::mesh_generation::catalog::UnitCellKind;
///
/// let volume = generate_lattice(
///     UnitCellKind::SimpleCubic,
///     Repetitions::new(2, 2, 2),
///     &LatticeGenerationOptions::default(),
/// )?;
/// assert_eq!(volume.node_count(), 27);
/// assert_eq!(volume.element_count(), 54);
/// # Ok::<(), lattice_sieve::mesh_error::LatticeError>(())
/// ```
pub fn generate_lattice(
    kind: UnitCellKind,
    repetitions: Repetitions,
    options: &LatticeGenerationOptions,
) -> Result<Volume, LatticeError> {
    let cell = kind.unit_cell()?.scaled(options.scale)?;
    assemble_with(&cell, repetitions, &options.assembly)
}
