use std::collections::HashSet;

use voroplane::{BorderMode, BoundingBox, Diagram, Edge, NO_NEIGHBOR, tessellate};

const SITES: [f64; 16] = [
    111.0, 83.0, 412.0, 164.0, 741.0, 91.0, 203.0, 367.0, 588.0, 442.0, 856.0, 519.0, 337.0,
    712.0, 667.0, 848.0,
];

fn bounds() -> BoundingBox {
    BoundingBox::new(0.0, 0.0, 1000.0, 1000.0)
}

fn diagram(mode: BorderMode) -> Diagram {
    tessellate(&SITES, bounds(), mode).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn segment_matches(e: &Edge, ax: f64, ay: f64, bx: f64, by: f64) -> bool {
    let (Some(s), Some(t)) = (e.start, e.end) else {
        return false;
    };
    (close(s.x, ax) && close(s.y, ay) && close(t.x, bx) && close(t.y, by))
        || (close(s.x, bx) && close(s.y, by) && close(t.x, ax) && close(t.y, ay))
}

#[test]
fn closed_polygons_are_clockwise() {
    let d = diagram(BorderMode::GenerateBorders);
    for cell in &d.cells {
        let v = cell.vertices();
        let n = v.len() / 2;
        assert!(cell.is_closed());
        assert!(n >= 3);
        let mut signed = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            signed += v[2 * i] * v[2 * j + 1] - v[2 * j] * v[2 * i + 1];
        }
        // Positive shoelace sum is clockwise on screen (y grows down).
        assert!(signed > 0.0, "cell {} is not clockwise", cell.id());
    }
}

#[test]
fn polygon_retraces_incident_edges() {
    let d = diagram(BorderMode::GenerateBorders);
    for cell in &d.cells {
        let site = cell.id();
        let incident: Vec<&Edge> = d
            .edges
            .iter()
            .filter(|e| e.left == site || e.right == site as i32)
            .collect();
        let v = cell.vertices();
        let n = v.len() / 2;
        assert_eq!(
            incident.len(),
            n,
            "cell {site} has {n} polygon segments but {} incident edges",
            incident.len()
        );
        let neighbors = cell.edge_neighbors();
        assert_eq!(neighbors.len(), n);
        for i in 0..n {
            let j = (i + 1) % n;
            let matched = incident.iter().find(|e| {
                segment_matches(e, v[2 * i], v[2 * i + 1], v[2 * j], v[2 * j + 1])
            });
            let e = matched.unwrap_or_else(|| {
                panic!("cell {site}: polygon segment {i} is not a diagram edge")
            });
            assert_eq!(e.other_site(site), Some(neighbors[i]));
        }
    }
}

#[test]
fn neighbor_lists_are_reciprocal() {
    for mode in [BorderMode::GenerateBorders, BorderMode::DoNotGenerateBorders] {
        let d = diagram(mode);
        for cell in &d.cells {
            for n in cell.edge_neighbors() {
                if n < 0 {
                    continue;
                }
                let other = &d.cells[n as usize];
                assert!(
                    other.edge_neighbors().contains(&(cell.id() as i32)),
                    "cell {n} does not list {} back",
                    cell.id()
                );
            }
        }
    }
}

#[test]
fn bisector_edge_count_matches_neighbor_pairs() {
    let d = diagram(BorderMode::GenerateBorders);
    let bisectors = d.edges.iter().filter(|e| !e.is_border()).count();
    let mut pairs = HashSet::new();
    for cell in &d.cells {
        for n in cell.edge_neighbors() {
            if n >= 0 {
                let a = cell.id().min(n as usize);
                let b = cell.id().max(n as usize);
                pairs.insert((a, b));
            }
        }
    }
    assert_eq!(bisectors, pairs.len());
}

#[test]
fn border_mode_changes_only_the_border() {
    let open = diagram(BorderMode::DoNotGenerateBorders);
    let closed = diagram(BorderMode::GenerateBorders);
    let open_bisectors = open.edges.iter().filter(|e| !e.is_border()).count();
    let closed_bisectors = closed.edges.iter().filter(|e| !e.is_border()).count();
    assert_eq!(open_bisectors, open.edges.len());
    assert_eq!(open_bisectors, closed_bisectors);
    assert!(closed.edges.len() > closed_bisectors);
    // Border edges carry box side IDs and belong to a real cell.
    for e in closed.edges.iter().filter(|e| e.is_border()) {
        assert!(e.right >= -4 && e.right <= -1);
        assert!(e.left < closed.cells.len());
    }
    // Interior cells are identical in both modes.
    for (o, c) in open.cells.iter().zip(closed.cells.iter()) {
        if o.is_closed() {
            assert_eq!(o, c);
        }
    }
}

#[test]
fn neighbor_counts_match_polygon_shape() {
    let open = diagram(BorderMode::DoNotGenerateBorders);
    for cell in &open.cells {
        let neighbors = cell.edge_neighbors();
        if cell.is_closed() {
            // One neighbor per point, the last segment wraps around.
            assert_eq!(neighbors.len(), cell.points_count());
            assert!(!neighbors.contains(&NO_NEIGHBOR));
        } else {
            // Chains of p points have p - 1 segments; sentinels fill the
            // slots between chains, so the total is always points - 1.
            assert_eq!(neighbors.len(), cell.points_count() - 1);
        }
    }
}
