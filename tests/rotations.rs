//! Symmetry checks: rotating or mirroring the generators inside a square box
//! must produce the congruent diagram, cell by cell.

use voroplane::{BorderMode, BoundingBox, tessellate};

const SIZE: f64 = 1000.0;

const SITES: [f64; 14] = [
    137.2, 211.7, 590.3, 101.9, 811.4, 422.6, 455.1, 633.8, 221.9, 788.2, 702.7, 855.4, 333.3,
    444.1,
];

fn rot90(sites: &[f64]) -> Vec<f64> {
    // Quarter turn clockwise on screen about the box centre.
    sites
        .chunks_exact(2)
        .flat_map(|p| [SIZE - p[1], p[0]])
        .collect()
}

fn mirror(sites: &[f64]) -> Vec<f64> {
    sites.chunks_exact(2).flat_map(|p| [SIZE - p[0], p[1]]).collect()
}

fn check_congruent(original: &[f64], transformed: &[f64]) {
    let bounds = BoundingBox::new(0.0, 0.0, SIZE, SIZE);
    for mode in [BorderMode::GenerateBorders, BorderMode::DoNotGenerateBorders] {
        let a = tessellate(original, bounds, mode).unwrap();
        let b = tessellate(transformed, bounds, mode).unwrap();
        assert_eq!(a.edges.len(), b.edges.len());
        assert_eq!(a.cells.len(), b.cells.len());
        for (ca, cb) in a.cells.iter().zip(b.cells.iter()) {
            assert_eq!(
                ca.points_count(),
                cb.points_count(),
                "cell {} changed shape under the transform",
                ca.id()
            );
            assert_eq!(ca.is_closed(), cb.is_closed());
            assert!(
                (ca.area() - cb.area()).abs() < 1e-6,
                "cell {} changed area under the transform",
                ca.id()
            );
        }
    }
}

#[test]
fn quarter_turn() {
    check_congruent(&SITES, &rot90(&SITES));
}

#[test]
fn half_turn() {
    check_congruent(&SITES, &rot90(&rot90(&SITES)));
}

#[test]
fn three_quarter_turn() {
    check_congruent(&SITES, &rot90(&rot90(&rot90(&SITES))));
}

#[test]
fn horizontal_mirror() {
    check_congruent(&SITES, &mirror(&SITES));
}

#[test]
fn mirrored_quarter_turn() {
    check_congruent(&SITES, &mirror(&rot90(&SITES)));
}

#[test]
fn full_turn_restores_every_vertex() {
    // Four quarter turns only round in the last bits, so the diagram must
    // come back vertex for vertex within tolerance.
    let back = rot90(&rot90(&rot90(&rot90(&SITES))));
    let bounds = BoundingBox::new(0.0, 0.0, SIZE, SIZE);
    let a = tessellate(&SITES, bounds, BorderMode::GenerateBorders).unwrap();
    let b = tessellate(&back, bounds, BorderMode::GenerateBorders).unwrap();
    for (ca, cb) in a.cells.iter().zip(b.cells.iter()) {
        let va = ca.vertices();
        let vb = cb.vertices();
        assert_eq!(va.len(), vb.len());
        for (x, y) in va.iter().zip(vb.iter()) {
            assert!((x - y).abs() < 1e-6);
        }
        assert_eq!(ca.edge_neighbors(), cb.edge_neighbors());
    }
}
