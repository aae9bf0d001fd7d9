use lattice_sieve::prelude::*;

#[test]
fn vtk_output_lists_every_strut_as_a_line() {
    let v = assemble(&UnitCellKind::Bcc.unit_cell().unwrap(), 2, 1, 1).unwrap();
    let text = VtkWriter.write_to_string(&v).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    let points = lines.iter().position(|l| *l == "POINTS 14 double").unwrap();
    assert_eq!(lines[points + 1], "0 0 0");
    let cells = lines.iter().position(|l| *l == "CELLS 36 108").unwrap();
    // element 21 joins nodes 2 and 10, zero-based in VTK
    assert_eq!(lines[cells + 21], "2 1 9");
    let types = lines.iter().position(|l| *l == "CELL_TYPES 36").unwrap();
    assert!(lines[types + 1..types + 37].iter().all(|l| *l == "3"));
    assert!(text.contains("POINT_DATA 14\nSCALARS valence int 1\n"));
}
