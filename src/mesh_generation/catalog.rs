//! Named strut-lattice unit cells.
//!
//! Every cell spans the unit cube `[0, 1]^3` with unit periodicity vectors;
//! use [`UnitCell::scaled`] to change the cell size. The simple cubic, FCC and
//! octet cells number their corners as follows:
//!
//! ```text
//!        8 ------- 7
//!       /|        /|
//!      5 ------- 6 |      z
//!      | 4 ------|-3      |  y
//!      |/        |/       | /
//!      1 ------- 2        |/___ x
//! ```
//!
//! FCC and octet add face centres 9..=14 on the faces z=0, z=1, y=0, y=1,
//! x=0, x=1 (in that order). The BCC cell uses its own numbering: corners
//! 1..=4 on z=0, the body centre as node 5, and corners 6..=9 on z=1.

use crate::geometry::equality::Point3;
use crate::mesh_error::LatticeError;
use crate::topology::unit_cell::{UNIT_PERIODICITY, UnitCell};
use std::fmt;
use std::str::FromStr;

/// Unit-cell topologies available from the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum UnitCellKind {
    /// Cube corners joined by the 12 cube edges.
    SimpleCubic,
    /// Body-centred cubic: cube frame plus 8 struts to the body centre.
    #[default]
    Bcc,
    /// Face-centred cubic: cube frame plus struts from each face centre to
    /// its four corners.
    Fcc,
    /// Octet truss: face-centre-to-corner struts plus the inner octahedron
    /// joining neighbouring face centres.
    Octet,
}

const CORNERS: [Point3; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

const FACE_CENTRES: [Point3; 6] = [
    [0.5, 0.5, 0.0],
    [0.5, 0.5, 1.0],
    [0.5, 0.0, 0.5],
    [0.5, 1.0, 0.5],
    [0.0, 0.5, 0.5],
    [1.0, 0.5, 0.5],
];

/// Corner nodes of each face, in the order of [`FACE_CENTRES`].
static FACE_CORNERS: [[u64; 4]; 6] = [
    [1, 2, 3, 4],
    [5, 6, 7, 8],
    [1, 2, 6, 5],
    [4, 3, 7, 8],
    [1, 4, 8, 5],
    [2, 3, 7, 6],
];

const CUBE_EDGES: [[u64; 2]; 12] = [
    [1, 2],
    [2, 3],
    [3, 4],
    [4, 1],
    [5, 6],
    [6, 7],
    [7, 8],
    [8, 5],
    [1, 5],
    [2, 6],
    [3, 7],
    [4, 8],
];

const BCC_NODES: [(u64, Point3); 9] = [
    (1, [0.0, 0.0, 0.0]),
    (2, [1.0, 0.0, 0.0]),
    (3, [1.0, 1.0, 0.0]),
    (4, [0.0, 1.0, 0.0]),
    (5, [0.5, 0.5, 0.5]),
    (6, [0.0, 0.0, 1.0]),
    (7, [1.0, 0.0, 1.0]),
    (8, [1.0, 1.0, 1.0]),
    (9, [0.0, 1.0, 1.0]),
];

const BCC_ELEMENTS: [(u64, [u64; 2]); 20] = [
    (1, [1, 2]),
    (2, [2, 3]),
    (3, [3, 4]),
    (4, [4, 1]),
    (5, [5, 1]),
    (6, [5, 2]),
    (7, [5, 3]),
    (8, [5, 4]),
    (9, [5, 6]),
    (10, [5, 7]),
    (11, [5, 8]),
    (12, [5, 9]),
    (13, [6, 7]),
    (14, [7, 8]),
    (15, [8, 9]),
    (16, [9, 6]),
    (17, [1, 6]),
    (18, [2, 7]),
    (19, [3, 8]),
    (20, [4, 9]),
];

impl UnitCellKind {
    /// Every catalog entry.
    pub const ALL: [UnitCellKind; 4] = [
        UnitCellKind::SimpleCubic,
        UnitCellKind::Bcc,
        UnitCellKind::Fcc,
        UnitCellKind::Octet,
    ];

    /// Canonical lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SimpleCubic => "cubic",
            Self::Bcc => "bcc",
            Self::Fcc => "fcc",
            Self::Octet => "octet",
        }
    }

    /// Build the unit cell.
    pub fn unit_cell(&self) -> Result<UnitCell, LatticeError> {
        let cell = match self {
            Self::SimpleCubic => {
                let nodes = numbered(CORNERS.iter().copied());
                let elements = numbered(CUBE_EDGES.iter().copied());
                UnitCell::from_raw(&nodes, &elements, UNIT_PERIODICITY)?
            }
            Self::Bcc => UnitCell::from_raw(&BCC_NODES, &BCC_ELEMENTS, UNIT_PERIODICITY)?,
            Self::Fcc => {
                let nodes = numbered(CORNERS.iter().chain(FACE_CENTRES.iter()).copied());
                let elements = numbered(CUBE_EDGES.iter().copied().chain(face_struts()));
                UnitCell::from_raw(&nodes, &elements, UNIT_PERIODICITY)?
            }
            Self::Octet => {
                let nodes = numbered(CORNERS.iter().chain(FACE_CENTRES.iter()).copied());
                let elements = numbered(face_struts().chain(octahedron_struts()));
                UnitCell::from_raw(&nodes, &elements, UNIT_PERIODICITY)?
            }
        };
        log::info!(
            "unit cell `{}` loaded: {} nodes, {} struts",
            self.name(),
            cell.node_count(),
            cell.element_count()
        );
        Ok(cell)
    }
}

fn numbered<T>(items: impl Iterator<Item = T>) -> Vec<(u64, T)> {
    (1u64..).zip(items).collect()
}

fn face_struts() -> impl Iterator<Item = [u64; 2]> {
    FACE_CORNERS.iter().enumerate().flat_map(|(face, corners)| {
        let centre = 9 + face as u64;
        corners.iter().map(move |&corner| [centre, corner])
    })
}

/// Struts between face centres of adjacent (non-opposite) faces.
fn octahedron_struts() -> impl Iterator<Item = [u64; 2]> {
    (0..6u64).flat_map(|a| {
        // faces come in opposite pairs (0,1), (2,3), (4,5)
        (a + 1..6)
            .filter(move |&b| a / 2 != b / 2)
            .map(move |b| [9 + a, 9 + b])
    })
}

impl fmt::Display for UnitCellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitCellKind {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cubic" | "sc" | "simple_cubic" | "simple-cubic" => Ok(Self::SimpleCubic),
            "bcc" | "body_centered_cubic" => Ok(Self::Bcc),
            "fcc" | "face_centered_cubic" => Ok(Self::Fcc),
            "octet" | "octet_truss" | "octet-truss" => Ok(Self::Octet),
            _ => {
                log::error!("unit cell `{s}` not implemented");
                Err(LatticeError::UnknownTopology(s.to_string()))
            }
        }
    }
}

/// Look a unit cell up by name.
///
/// Unknown names produce [`LatticeError::UnknownTopology`]; there is no
/// fallback topology.
pub fn unit_cell_by_name(name: &str) -> Result<UnitCell, LatticeError> {
    name.parse::<UnitCellKind>()?.unit_cell()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug_invariants::DebugInvariants;
    use crate::topology::ids::NodeId;

    #[test]
    fn sizes_match_catalog() {
        let expected = [
            (UnitCellKind::SimpleCubic, 8, 12),
            (UnitCellKind::Bcc, 9, 20),
            (UnitCellKind::Fcc, 14, 36),
            (UnitCellKind::Octet, 14, 36),
        ];
        for (kind, nodes, elements) in expected {
            let cell = kind.unit_cell().unwrap();
            assert_eq!(cell.node_count(), nodes, "{kind}");
            assert_eq!(cell.element_count(), elements, "{kind}");
            assert!(cell.validate_invariants().is_ok(), "{kind}");
        }
    }

    #[test]
    fn bcc_centre_connects_to_every_corner() {
        let cell = UnitCellKind::Bcc.unit_cell().unwrap();
        let centre = NodeId::new(5).unwrap();
        assert_eq!(cell.node(centre), Some(&[0.5, 0.5, 0.5]));
        let degree = cell.elements().filter(|(_, e)| e.contains(centre)).count();
        assert_eq!(degree, 8);
    }

    #[test]
    fn octet_face_centres_have_eight_struts_each() {
        // 4 corners + 4 neighbouring face centres
        let cell = UnitCellKind::Octet.unit_cell().unwrap();
        for raw in 9..=14 {
            let id = NodeId::new(raw).unwrap();
            assert_eq!(cell.elements().filter(|(_, e)| e.contains(id)).count(), 8);
        }
    }

    #[test]
    fn names_parse_and_print() {
        for kind in UnitCellKind::ALL {
            assert_eq!(kind.to_string().parse::<UnitCellKind>().unwrap(), kind);
        }
        assert_eq!("BCC".parse::<UnitCellKind>().unwrap(), UnitCellKind::Bcc);
        assert_eq!(" octet-truss ".parse::<UnitCellKind>().unwrap(), UnitCellKind::Octet);
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert_eq!(
            unit_cell_by_name("kelvin").unwrap_err(),
            LatticeError::UnknownTopology("kelvin".into())
        );
    }
}
