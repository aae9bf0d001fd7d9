//! Mesh I/O helpers for assembled lattices.
//!
//! This module provides trait-based writers that serialize a [`Volume`] to
//! text formats understood by common meshing and visualization tools, and a
//! reader for loading lattices (or custom unit cells) back from disk.

pub mod gmsh;
pub mod vtk;

use crate::mesh_error::LatticeError;
use crate::topology::volume::Volume;
use std::io::{Read, Write};

/// Trait for lattice writers.
pub trait VolumeWriter {
    /// Write the volume to a writer.
    fn write<W: Write>(&self, writer: W, volume: &Volume) -> Result<(), LatticeError>;

    /// Convenience wrapper returning the output as a `String`.
    fn write_to_string(&self, volume: &Volume) -> Result<String, LatticeError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, volume)?;
        String::from_utf8(buffer).map_err(|e| LatticeError::Io(e.to_string()))
    }
}

/// Trait for lattice readers.
pub trait VolumeReader {
    /// Parse a volume from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<Volume, LatticeError>;
}
