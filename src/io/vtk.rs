//! Legacy VTK (`.vtk`) writer for strut lattices.
//!
//! Writes an ASCII `UNSTRUCTURED_GRID` with one `VTK_LINE` cell per strut and
//! the node valence as point data. Node and element ids are implicit: VTK is
//! zero-based, so node `n` is point `n - 1` and element `e` is cell `e - 1`.

use crate::geometry::metrics::valence;
use crate::io::VolumeWriter;
use crate::mesh_error::LatticeError;
use crate::topology::volume::Volume;
use std::io::Write;

const VTK_LINE: u8 = 3;
const VALENCE_FIELD: &str = "valence";

#[derive(Debug, Default, Clone)]
pub struct VtkWriter;

impl VtkWriter {
    fn write_values<W: Write>(writer: &mut W, values: &[String]) -> Result<(), LatticeError> {
        let mut line_len = 0usize;
        for value in values {
            if line_len + value.len() + 1 > 70 {
                writeln!(writer)?;
                line_len = 0;
            }
            if line_len > 0 {
                write!(writer, " ")?;
                line_len += 1;
            }
            write!(writer, "{value}")?;
            line_len += value.len();
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl VolumeWriter for VtkWriter {
    fn write<W: Write>(&self, mut writer: W, volume: &Volume) -> Result<(), LatticeError> {
        writeln!(writer, "# vtk DataFile Version 3.0")?;
        writeln!(writer, "lattice-sieve strut lattice")?;
        writeln!(writer, "ASCII")?;
        writeln!(writer, "DATASET UNSTRUCTURED_GRID")?;

        writeln!(writer, "POINTS {} double", volume.node_count())?;
        for [x, y, z] in volume.coordinates() {
            writeln!(writer, "{x} {y} {z}")?;
        }

        let n_cells = volume.element_count();
        writeln!(writer, "CELLS {n_cells} {}", n_cells * 3)?;
        for edge in volume.edges() {
            let [a, b] = edge.nodes();
            writeln!(writer, "2 {} {}", a.get() - 1, b.get() - 1)?;
        }
        writeln!(writer, "CELL_TYPES {n_cells}")?;
        for _ in 0..n_cells {
            writeln!(writer, "{VTK_LINE}")?;
        }

        if volume.node_count() > 0 {
            writeln!(writer, "POINT_DATA {}", volume.node_count())?;
            writeln!(writer, "SCALARS {VALENCE_FIELD} int 1")?;
            writeln!(writer, "LOOKUP_TABLE default")?;
            let values: Vec<String> = valence(volume).iter().map(|v| v.to_string()).collect();
            Self::write_values(&mut writer, &values)?;
        }
        Ok(())
    }
}
