//! Simple measurements on assembled lattices: extents, strut lengths and
//! node valence.

use crate::geometry::equality::{Point3, distance};
use crate::mesh_error::LatticeError;
use crate::topology::ids::{ElementId, NodeId};
use crate::topology::volume::Volume;

/// Axis-aligned bounding box of all nodes, or `None` for an empty volume.
pub fn bounding_box(volume: &Volume) -> Option<(Point3, Point3)> {
    let mut nodes = volume.coordinates().iter();
    let first = *nodes.next()?;
    Some(nodes.fold((first, first), |(mut lo, mut hi), p| {
        for axis in 0..3 {
            lo[axis] = lo[axis].min(p[axis]);
            hi[axis] = hi[axis].max(p[axis]);
        }
        (lo, hi)
    }))
}

/// Length of a single strut.
pub fn element_length(volume: &Volume, element: ElementId) -> Result<f64, LatticeError> {
    let edge = volume.element(element).ok_or_else(|| {
        LatticeError::InvariantViolation(format!("element {element} is not in the volume"))
    })?;
    let [a, b] = edge.nodes();
    let pa = volume.node(a).ok_or(LatticeError::MissingNode {
        element: element.get(),
        node: a.get(),
    })?;
    let pb = volume.node(b).ok_or(LatticeError::MissingNode {
        element: element.get(),
        node: b.get(),
    })?;
    Ok(distance(pa, pb))
}

/// Sum of all strut lengths.
pub fn total_length(volume: &Volume) -> Result<f64, LatticeError> {
    volume
        .elements()
        .map(|(id, _)| element_length(volume, id))
        .sum()
}

/// Number of struts meeting at each node, indexed by `id - 1`.
pub fn valence(volume: &Volume) -> Vec<usize> {
    let mut counts = vec![0usize; volume.node_count()];
    for edge in volume.edges() {
        for node in edge.nodes() {
            if let Some(c) = counts.get_mut(node.index()) {
                *c += 1;
            }
        }
    }
    counts
}

/// Valence of one node.
pub fn node_valence(volume: &Volume, node: NodeId) -> usize {
    volume.edges().iter().filter(|e| e.contains(node)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::assembly::assemble;
    use crate::mesh_generation::catalog::UnitCellKind;

    #[test]
    fn empty_volume_has_no_extent() {
        assert!(bounding_box(&Volume::new()).is_none());
        assert_eq!(total_length(&Volume::new()).unwrap(), 0.0);
    }

    #[test]
    fn cubic_block_measurements() {
        let cell = UnitCellKind::SimpleCubic.unit_cell().unwrap();
        let v = assemble(&cell, 3, 2, 1).unwrap();
        assert_eq!(bounding_box(&v), Some(([0.0; 3], [3.0, 2.0, 1.0])));
        // every strut has unit length
        assert_eq!(total_length(&v).unwrap(), v.element_count() as f64);
        let val = valence(&v);
        assert_eq!(val.iter().sum::<usize>(), 2 * v.element_count());
        // the origin corner joins three struts
        assert_eq!(val[0], 3);
        assert_eq!(node_valence(&v, NodeId::new(1).unwrap()), 3);
    }

    #[test]
    fn bcc_diagonal_length() {
        let cell = UnitCellKind::Bcc.unit_cell().unwrap();
        let v = assemble(&cell, 1, 1, 1).unwrap();
        let diag = element_length(&v, ElementId::new(5).unwrap()).unwrap();
        assert!((diag - 0.75f64.sqrt()).abs() < 1e-12);
        assert!(element_length(&v, ElementId::new(99).unwrap()).is_err());
    }
}
