//! Gmsh `.msh` reader/writer for strut lattices.
//!
//! # Supported format
//! - ASCII `.msh` version **2.2**.
//! - Element type 1 (2-node line) only; each line element is one strut.
//!
//! # Limitations
//! - Binary files are not supported.
//! - `.msh` v4.x (block-based) is not supported.
//! - Element tags are written as `0 0` and ignored on read.
//! - [`GmshReader::read`] requires dense node and element ids starting at 1,
//!   which is what [`GmshWriter`] produces. Use
//!   [`GmshReader::read_unit_cell`] for files with arbitrary ids.

use crate::geometry::equality::Point3;
use crate::io::{VolumeReader, VolumeWriter};
use crate::mesh_error::LatticeError;
use crate::topology::edge::Edge;
use crate::topology::ids::{ElementId, NodeId};
use crate::topology::unit_cell::{PeriodicityVectors, UnitCell};
use crate::topology::volume::Volume;
use std::io::{Read, Write};

const LINE_ELEMENT: u32 = 1;

/// Gmsh `.msh` writer for ASCII v2.2 line meshes.
#[derive(Debug, Default, Clone)]
pub struct GmshWriter;

/// Gmsh `.msh` reader for ASCII v2.2 line meshes.
#[derive(Debug, Default, Clone)]
pub struct GmshReader;

impl VolumeWriter for GmshWriter {
    fn write<W: Write>(&self, mut writer: W, volume: &Volume) -> Result<(), LatticeError> {
        writeln!(writer, "$MeshFormat")?;
        writeln!(writer, "2.2 0 8")?;
        writeln!(writer, "$EndMeshFormat")?;

        writeln!(writer, "$Nodes")?;
        writeln!(writer, "{}", volume.node_count())?;
        for (id, [x, y, z]) in volume.nodes() {
            writeln!(writer, "{id} {x} {y} {z}")?;
        }
        writeln!(writer, "$EndNodes")?;

        writeln!(writer, "$Elements")?;
        writeln!(writer, "{}", volume.element_count())?;
        for (id, edge) in volume.elements() {
            let [a, b] = edge.nodes();
            writeln!(writer, "{id} {LINE_ELEMENT} 2 0 0 {a} {b}")?;
        }
        writeln!(writer, "$EndElements")?;
        Ok(())
    }
}

/// Raw tables as they appear in the file.
struct GmshTables {
    nodes: Vec<(NodeId, Point3)>,
    elements: Vec<(ElementId, Edge)>,
}

impl GmshReader {
    fn parse_version(line: &str) -> Result<&str, LatticeError> {
        let mut parts = line.split_whitespace();
        let version = parts
            .next()
            .ok_or_else(|| LatticeError::MeshIoParse("missing mesh format version".into()))?;
        let file_type = parts
            .next()
            .ok_or_else(|| LatticeError::MeshIoParse("missing mesh format type".into()))?;
        if file_type != "0" {
            return Err(LatticeError::MeshIoParse(
                "binary .msh files are not supported".into(),
            ));
        }
        Ok(version)
    }

    fn field<'a>(
        parts: &mut impl Iterator<Item = &'a str>,
        what: &str,
    ) -> Result<&'a str, LatticeError> {
        parts
            .next()
            .ok_or_else(|| LatticeError::MeshIoParse(format!("missing {what}")))
    }

    fn parse_u64(raw: &str, what: &str) -> Result<u64, LatticeError> {
        raw.parse::<u64>()
            .map_err(|_| LatticeError::MeshIoParse(format!("invalid {what}: {raw}")))
    }

    fn parse_coord(raw: &str) -> Result<f64, LatticeError> {
        raw.parse::<f64>()
            .map_err(|_| LatticeError::MeshIoParse(format!("invalid coordinate: {raw}")))
    }

    fn expect_end<'a>(
        lines: &mut impl Iterator<Item = &'a str>,
        marker: &str,
    ) -> Result<(), LatticeError> {
        match lines.next() {
            Some(line) if line.trim() == marker => Ok(()),
            _ => Err(LatticeError::MeshIoParse(format!("missing {marker}"))),
        }
    }

    fn parse_count<'a>(
        lines: &mut impl Iterator<Item = &'a str>,
        what: &str,
    ) -> Result<usize, LatticeError> {
        let line = lines
            .next()
            .ok_or_else(|| LatticeError::MeshIoParse(format!("missing {what}")))?;
        line.trim()
            .parse::<usize>()
            .map_err(|_| LatticeError::MeshIoParse(format!("invalid {what}: {line}")))
    }

    fn parse_tables<R: Read>(mut reader: R) -> Result<GmshTables, LatticeError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let mut lines = contents.lines();

        let mut version: Option<String> = None;
        let mut nodes = Vec::new();
        let mut elements = Vec::new();

        while let Some(line) = lines.next() {
            match line.trim() {
                "$MeshFormat" => {
                    let format_line = lines
                        .next()
                        .ok_or_else(|| LatticeError::MeshIoParse("missing MeshFormat".into()))?;
                    version = Some(Self::parse_version(format_line)?.to_string());
                    Self::expect_end(&mut lines, "$EndMeshFormat")?;
                }
                "$Nodes" => {
                    let count = Self::parse_count(&mut lines, "node count")?;
                    for _ in 0..count {
                        let node_line = lines.next().ok_or_else(|| {
                            LatticeError::MeshIoParse("unexpected end of node list".into())
                        })?;
                        let mut parts = node_line.split_whitespace();
                        let id = Self::parse_u64(Self::field(&mut parts, "node id")?, "node id")?;
                        let x = Self::parse_coord(Self::field(&mut parts, "x coordinate")?)?;
                        let y = Self::parse_coord(Self::field(&mut parts, "y coordinate")?)?;
                        let z = Self::parse_coord(Self::field(&mut parts, "z coordinate")?)?;
                        nodes.push((NodeId::new(id)?, [x, y, z]));
                    }
                    Self::expect_end(&mut lines, "$EndNodes")?;
                }
                "$Elements" => {
                    let count = Self::parse_count(&mut lines, "element count")?;
                    for _ in 0..count {
                        let elem_line = lines.next().ok_or_else(|| {
                            LatticeError::MeshIoParse("unexpected end of element list".into())
                        })?;
                        let mut parts = elem_line.split_whitespace();
                        let id = Self::parse_u64(
                            Self::field(&mut parts, "element id")?,
                            "element id",
                        )?;
                        let id = ElementId::new(id)?;
                        let elem_type =
                            Self::parse_u64(Self::field(&mut parts, "element type")?, "element type")?;
                        if elem_type != u64::from(LINE_ELEMENT) {
                            return Err(LatticeError::MeshIoParse(format!(
                                "unsupported element type {elem_type} (only 2-node lines)"
                            )));
                        }
                        let num_tags = Self::parse_u64(
                            Self::field(&mut parts, "element tag count")?,
                            "element tag count",
                        )?;
                        for _ in 0..num_tags {
                            Self::field(&mut parts, "element tag")?;
                        }
                        let a = Self::parse_u64(Self::field(&mut parts, "element node")?, "node id")?;
                        let b = Self::parse_u64(Self::field(&mut parts, "element node")?, "node id")?;
                        let edge = Edge::from_raw(a, b).map_err(|e| Edge::for_element(e, id))?;
                        elements.push((id, edge));
                    }
                    Self::expect_end(&mut lines, "$EndElements")?;
                }
                _ => {
                    // ignore other sections
                }
            }
        }

        let version = version.unwrap_or_else(|| "2.2".to_string());
        if version != "2.2" {
            return Err(LatticeError::MeshIoParse(format!(
                "unsupported gmsh version: {version}"
            )));
        }
        Ok(GmshTables { nodes, elements })
    }

    /// Load a custom unit cell from a `.msh` file.
    ///
    /// Ids are kept as written; the file carries no periodicity, so the
    /// caller supplies it.
    pub fn read_unit_cell<R: Read>(
        &self,
        reader: R,
        periodicity: PeriodicityVectors,
    ) -> Result<UnitCell, LatticeError> {
        let tables = Self::parse_tables(reader)?;
        UnitCell::try_new(tables.nodes, tables.elements, periodicity)
    }
}

impl VolumeReader for GmshReader {
    fn read<R: Read>(&self, reader: R) -> Result<Volume, LatticeError> {
        let mut tables = Self::parse_tables(reader)?;
        tables.nodes.sort_by_key(|(id, _)| *id);
        tables.elements.sort_by_key(|(id, _)| *id);
        for (idx, (id, _)) in tables.nodes.iter().enumerate() {
            if id.get() != idx as u64 + 1 {
                return Err(LatticeError::MeshIoParse(format!(
                    "node ids must be contiguous from 1, found {id} at position {}",
                    idx + 1
                )));
            }
        }
        for (idx, (id, _)) in tables.elements.iter().enumerate() {
            if id.get() != idx as u64 + 1 {
                return Err(LatticeError::MeshIoParse(format!(
                    "element ids must be contiguous from 1, found {id} at position {}",
                    idx + 1
                )));
            }
        }
        Volume::try_new(
            tables.nodes.into_iter().map(|(_, p)| p).collect(),
            tables.elements.into_iter().map(|(_, e)| e).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::unit_cell::UNIT_PERIODICITY;

    const CELL: &str = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
3
10 0 0 0
20 1 0 0
30 0.5 0.5 0
$EndNodes
$Elements
2
7 1 2 0 0 10 30
8 1 2 99 1 30 20
$EndElements
"#;

    #[test]
    fn writer_emits_line_elements() {
        let v = Volume::try_new(
            vec![[0.0, 0.0, 0.0], [0.5, 0.0, 1.25]],
            vec![Edge::from_raw(2, 1).unwrap()],
        )
        .unwrap();
        let text = GmshWriter.write_to_string(&v).unwrap();
        let expected = "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n$Nodes\n2\n1 0 0 0\n2 0.5 0 1.25\n$EndNodes\n$Elements\n1\n1 1 2 0 0 2 1\n$EndElements\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn unit_cell_keeps_file_ids() {
        let cell = GmshReader
            .read_unit_cell(CELL.as_bytes(), UNIT_PERIODICITY)
            .unwrap();
        assert_eq!(cell.node_count(), 3);
        let e8 = ElementId::new(8).unwrap();
        assert_eq!(cell.element(e8), Some(&Edge::from_raw(20, 30).unwrap()));
    }

    #[test]
    fn sparse_ids_are_rejected_as_volume() {
        let err = GmshReader.read(CELL.as_bytes()).unwrap_err();
        assert!(matches!(err, LatticeError::MeshIoParse(_)));
    }

    #[test]
    fn non_line_elements_are_rejected() {
        let text = CELL.replace("7 1 2 0 0 10 30", "7 2 2 0 0 10 30 20");
        let err = GmshReader
            .read_unit_cell(text.as_bytes(), UNIT_PERIODICITY)
            .unwrap_err();
        assert_eq!(
            err,
            LatticeError::MeshIoParse("unsupported element type 2 (only 2-node lines)".into())
        );
    }

    #[test]
    fn binary_and_unknown_versions_are_rejected() {
        let binary = CELL.replace("2.2 0 8", "2.2 1 8");
        assert!(GmshReader.read_unit_cell(binary.as_bytes(), UNIT_PERIODICITY).is_err());
        let v4 = CELL.replace("2.2 0 8", "4.1 0 8");
        assert!(GmshReader.read_unit_cell(v4.as_bytes(), UNIT_PERIODICITY).is_err());
    }

    #[test]
    fn oversized_counts_are_parse_errors() {
        let nodes = "$Nodes\n18446744073709551615\n$EndNodes\n";
        let err = GmshReader.read(nodes.as_bytes()).unwrap_err();
        assert!(matches!(err, LatticeError::MeshIoParse(_)), "{err:?}");

        let elements = CELL.replace("$Elements\n2\n", "$Elements\n18446744073709551615\n");
        let err = GmshReader
            .read_unit_cell(elements.as_bytes(), UNIT_PERIODICITY)
            .unwrap_err();
        assert!(matches!(err, LatticeError::MeshIoParse(_)), "{err:?}");
    }

    #[test]
    fn dangling_node_reference_is_rejected() {
        let text = CELL.replace("30 20", "30 40");
        let err = GmshReader
            .read_unit_cell(text.as_bytes(), UNIT_PERIODICITY)
            .unwrap_err();
        assert_eq!(err, LatticeError::MissingNode { element: 8, node: 40 });
    }
}
