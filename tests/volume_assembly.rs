//! End-to-end assembly of catalog and hand-built unit cells.

mod util;

use lattice_sieve::prelude::*;
use util::*;

fn bcc() -> UnitCell {
    UnitCellKind::Bcc.unit_cell().unwrap()
}

#[test]
fn bcc_two_cells_along_x() {
    let v = assemble(&bcc(), 2, 1, 1).unwrap();
    assert_eq!(v.node_count(), 14);
    assert_eq!(v.element_count(), 36);

    // first cell keeps the unit-cell numbering
    for (id, p) in bcc().nodes() {
        assert_eq!(v.node(id), Some(p));
    }
    // the second cell starts numbering at 10 with its first unshared node
    assert_eq!(v.node(nid(10)), Some(&[2.0, 0.0, 0.0]));
    assert_eq!(v.node(nid(12)), Some(&[1.5, 0.5, 0.5]));
    // its first strut runs from the shared corner to the new one
    assert_eq!(v.element(eid(21)), Some(&edge(2, 10)));
    assert_eq!(v.element(eid(21)).unwrap().nodes(), [nid(2), nid(10)]);

    assert_nodes_distinct(&v, DEFAULT_TOLERANCE);
    assert_edges_valid(&v);
}

#[test]
fn single_cell_reproduces_unit_cell() {
    for kind in UnitCellKind::ALL {
        let cell = kind.unit_cell().unwrap();
        let v = assemble(&cell, 1, 1, 1).unwrap();
        assert_eq!(v.node_count(), cell.node_count(), "{kind}");
        assert_eq!(v.element_count(), cell.element_count(), "{kind}");
        for ((vid, vp), (cid, cp)) in v.nodes().zip(cell.nodes()) {
            assert_eq!(vid, cid);
            assert_eq!(vp, cp);
        }
        for ((vid, ve), (cid, ce)) in v.elements().zip(cell.elements()) {
            assert_eq!(vid, cid);
            assert_eq!(ve.nodes(), ce.nodes());
        }
    }
}

#[test]
fn simple_cubic_counts_follow_grid_formula() {
    let cell = UnitCellKind::SimpleCubic.unit_cell().unwrap();
    for (nx, ny, nz) in [(1, 1, 1), (2, 2, 2), (3, 1, 2), (4, 2, 1)] {
        let v = assemble(&cell, nx, ny, nz).unwrap();
        let nodes = (nx + 1) * (ny + 1) * (nz + 1);
        let edges = nx * (ny + 1) * (nz + 1) + (nx + 1) * ny * (nz + 1) + (nx + 1) * (ny + 1) * nz;
        assert_eq!(v.node_count(), nodes, "{nx}x{ny}x{nz}");
        assert_eq!(v.element_count(), edges, "{nx}x{ny}x{nz}");
    }
    let v = assemble(&cell, 2, 2, 2).unwrap();
    assert_eq!((v.node_count(), v.element_count()), (27, 54));
}

#[test]
fn face_centred_cells_share_faces() {
    let fcc = assemble(&UnitCellKind::Fcc.unit_cell().unwrap(), 2, 1, 1).unwrap();
    assert_eq!((fcc.node_count(), fcc.element_count()), (23, 64));
    let octet = assemble(&UnitCellKind::Octet.unit_cell().unwrap(), 2, 1, 1).unwrap();
    assert_eq!((octet.node_count(), octet.element_count()), (23, 68));
    for v in [&fcc, &octet] {
        assert_nodes_distinct(v, DEFAULT_TOLERANCE);
        assert_edges_valid(v);
    }
}

#[test]
fn search_strategies_agree() {
    for kind in UnitCellKind::ALL {
        let cell = kind.unit_cell().unwrap();
        let reps = Repetitions::new(3, 2, 2);
        let linear = assemble_with(
            &cell,
            reps,
            &AssemblyOptions::default().with_search(NodeSearch::Linear),
        )
        .unwrap();
        let grid = assemble_with(
            &cell,
            reps,
            &AssemblyOptions::default().with_search(NodeSearch::Grid),
        )
        .unwrap();
        assert_eq!(linear, grid, "{kind}");
    }
}

#[test]
fn sparse_unit_cell_ids_are_renumbered_densely() {
    let cell = UnitCell::from_raw(
        &[(40, [0.0, 0.0, 0.0]), (7, [1.0, 0.0, 0.0]), (19, [0.0, 0.0, 1.0])],
        &[(100, [40, 7]), (3, [19, 40])],
        UNIT_PERIODICITY,
    )
    .unwrap();
    let v = assemble(&cell, 2, 1, 1).unwrap();
    // node order follows ascending unit-cell id: 7, 19, 40
    assert_eq!(v.node(nid(1)), Some(&[1.0, 0.0, 0.0]));
    assert_eq!(v.node(nid(2)), Some(&[0.0, 0.0, 1.0]));
    assert_eq!(v.node(nid(3)), Some(&[0.0, 0.0, 0.0]));
    // element order follows ascending unit-cell id: 3, 100
    assert_eq!(v.element(eid(1)), Some(&edge(2, 3)));
    assert_eq!(v.element(eid(2)), Some(&edge(3, 1)));
    assert_eq!(v.node_count(), 5);
    assert_eq!(v.element_count(), 4);
}

#[test]
fn sheared_periodicity_translates_along_vectors() {
    let periodicity = [[1.0, 0.0, 0.0], [0.5, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let cell = UnitCell::from_raw(
        &[(1, [0.0, 0.0, 0.0]), (2, [0.5, 1.0, 0.0])],
        &[(1, [1, 2])],
        periodicity,
    )
    .unwrap();
    let v = assemble(&cell, 1, 3, 1).unwrap();
    assert_eq!(v.node_count(), 4);
    assert_eq!(v.element_count(), 3);
    assert_eq!(v.node(nid(4)), Some(&[1.5, 3.0, 0.0]));
    assert_eq!(v.find_element(nid(4), nid(3)), Some(eid(3)));
}

#[test]
fn unit_cell_nodes_within_tolerance_are_rejected() {
    let cell = UnitCell::from_raw(
        &[(1, [0.0, 0.0, 0.0]), (2, [0.6, 0.0, 0.0])],
        &[(1, [1, 2])],
        UNIT_PERIODICITY,
    )
    .unwrap();
    let opts = AssemblyOptions::default().with_tolerance(0.7);
    let err = assemble_with(&cell, Repetitions::new(2, 1, 1), &opts).unwrap_err();
    assert_eq!(err, LatticeError::DuplicateNode { first: 1, second: 2 });
    // a tighter tolerance accepts the same cell
    let v = assemble_with(&cell, Repetitions::new(2, 1, 1), &opts.with_tolerance(0.5)).unwrap();
    assert_eq!(v.node_count(), 4);
}

#[test]
fn generated_lattice_matches_manual_pipeline() {
    let options = LatticeGenerationOptions {
        scale: ScaleFactors::new(2.0, 3.0, 4.0),
        ..Default::default()
    };
    let generated = generate_lattice(UnitCellKind::Octet, Repetitions::new(2, 2, 1), &options)
        .unwrap();
    let manual = assemble(
        &UnitCellKind::Octet
            .unit_cell()
            .unwrap()
            .scaled(ScaleFactors::new(2.0, 3.0, 4.0))
            .unwrap(),
        2,
        2,
        1,
    )
    .unwrap();
    assert_eq!(generated, manual);
    let scaled_after = assemble(&UnitCellKind::Octet.unit_cell().unwrap(), 2, 2, 1)
        .unwrap()
        .scaled(ScaleFactors::new(2.0, 3.0, 4.0))
        .unwrap();
    assert_eq!(edge_keys(&generated), edge_keys(&scaled_after));
}

#[test]
fn node_only_cell_tiles_into_points() {
    let cell = UnitCell::from_raw(
        &[(1, [0.0, 0.0, 0.0]), (2, [1.0, 0.0, 0.0])],
        &[],
        UNIT_PERIODICITY,
    )
    .unwrap();
    let v = assemble(&cell, 3, 1, 1).unwrap();
    assert_eq!(v.node_count(), 4);
    assert_eq!(v.element_count(), 0);
    assert_eq!(v.node(nid(4)), Some(&[3.0, 0.0, 0.0]));
}

#[test]
fn empty_cell_yields_empty_volume() {
    let cell = UnitCell::from_raw(&[], &[], UNIT_PERIODICITY).unwrap();
    let v = assemble(&cell, 2, 2, 2).unwrap();
    assert!(v.is_empty());
    assert_eq!((v.node_count(), v.element_count()), (0, 0));
}
