//! Bounding the raw edge graph to the tessellation rectangle.
//!
//! Edges leave the sweep with up to two open endpoints (breakpoints that
//! never met a vertex). The first pass extends those along the bisector
//! direction until they are guaranteed to span the box; the second pass
//! clips every edge to the box and drops what falls outside or degenerates.

use crate::bounds::BoundingBox;
use crate::diagram::Edge;
use crate::geometry::{EPSILON, Point, points_coincide};

/// Clips the raw edge graph to `bounds`. Edge order is preserved for the
/// survivors, so equal inputs produce identical outputs.
pub(crate) fn clip_edges(edges: Vec<Edge>, bounds: &BoundingBox, sites: &[Point]) -> Vec<Edge> {
    let mut clipped = Vec::with_capacity(edges.len());
    for mut edge in edges {
        if !resolve_open_end(&mut edge, bounds, sites) {
            continue;
        }
        let (Some(start), Some(end)) = (edge.start, edge.end) else {
            continue;
        };
        let Some((a, b)) = bounds.clip_segment(&start, &end) else {
            continue;
        };
        if points_coincide(&a, &b) {
            continue;
        }
        edge.start = Some(a);
        edge.end = Some(b);
        clipped.push(edge);
    }
    clipped
}

/// Gives an edge with a missing end a far endpoint on the box border, in the
/// direction that keeps the `left` site on the left of `start -> end`.
/// Returns `false` when the bisector cannot intersect the box. A missing
/// start is pulled to the border as well, so the later clip never sees an
/// open edge.
fn resolve_open_end(edge: &mut Edge, bounds: &BoundingBox, sites: &[Point]) -> bool {
    if edge.end.is_some() {
        return true;
    }
    debug_assert!(edge.right >= 0);
    let l = sites[edge.left];
    let r = sites[edge.right as usize];
    let fx = (l.x + r.x) / 2.0;
    let fy = (l.y + r.y) / 2.0;
    let mut va = edge.start;
    let vb;

    if (r.y - l.y).abs() < EPSILON {
        // Vertical bisector. A bisector on either wall is kept; both walls
        // get the same tolerance so mirrored inputs clip identically.
        if fx < bounds.min_x - EPSILON || fx > bounds.max_x + EPSILON {
            return false;
        }
        if l.x > r.x {
            // Grows downward.
            match va {
                Some(v) if v.y > bounds.max_y + EPSILON => return false,
                Some(v) if v.y >= bounds.min_y => {}
                _ => va = Some(Point::new(fx, bounds.min_y)),
            }
            vb = Point::new(fx, bounds.max_y);
        } else {
            // Grows upward.
            match va {
                Some(v) if v.y < bounds.min_y - EPSILON => return false,
                Some(v) if v.y <= bounds.max_y => {}
                _ => va = Some(Point::new(fx, bounds.max_y)),
            }
            vb = Point::new(fx, bounds.min_y);
        }
    } else {
        let fm = (l.x - r.x) / (r.y - l.y);
        let fb = fy - fm * fx;
        if fm < -1.0 || fm > 1.0 {
            // Closer to vertical: connect to the top or bottom wall.
            if l.x > r.x {
                match va {
                    Some(v) if v.y > bounds.max_y + EPSILON => return false,
                    Some(v) if v.y >= bounds.min_y => {}
                    _ => va = Some(Point::new((bounds.min_y - fb) / fm, bounds.min_y)),
                }
                vb = Point::new((bounds.max_y - fb) / fm, bounds.max_y);
            } else {
                match va {
                    Some(v) if v.y < bounds.min_y - EPSILON => return false,
                    Some(v) if v.y <= bounds.max_y => {}
                    _ => va = Some(Point::new((bounds.max_y - fb) / fm, bounds.max_y)),
                }
                vb = Point::new((bounds.min_y - fb) / fm, bounds.min_y);
            }
        } else {
            // Closer to horizontal: connect to the left or right wall.
            if l.y < r.y {
                match va {
                    Some(v) if v.x > bounds.max_x + EPSILON => return false,
                    Some(v) if v.x >= bounds.min_x => {}
                    _ => va = Some(Point::new(bounds.min_x, fm * bounds.min_x + fb)),
                }
                vb = Point::new(bounds.max_x, fm * bounds.max_x + fb);
            } else {
                match va {
                    Some(v) if v.x < bounds.min_x - EPSILON => return false,
                    Some(v) if v.x <= bounds.max_x => {}
                    _ => va = Some(Point::new(bounds.max_x, fm * bounds.max_x + fb)),
                }
                vb = Point::new(bounds.min_x, fm * bounds.min_x + fb);
            }
        }
    }
    edge.start = va;
    edge.end = Some(vb);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::build_edges;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn two_vertical_sites_give_the_horizontal_midline() {
        let bounds = BoundingBox::new(0.0, 0.0, 1000.0, 1000.0);
        let sites = pts(&[(500.0, 700.0), (500.0, 300.0)]);
        let edges = clip_edges(build_edges(&sites), &bounds, &sites);
        assert_eq!(edges.len(), 1);
        let e = &edges[0];
        let start = e.start.unwrap();
        let end = e.end.unwrap();
        assert!(points_coincide(&start, &Point::new(0.0, 500.0)));
        assert!(points_coincide(&end, &Point::new(1000.0, 500.0)));
        // The upper site is on the left when walking start -> end.
        assert_eq!(e.left, 1);
        assert_eq!(e.right, 0);
    }

    #[test]
    fn degenerate_cocircular_edge_is_dropped() {
        let bounds = BoundingBox::new(0.0, 0.0, 1000.0, 1000.0);
        let sites = pts(&[
            (500.0, 100.0),
            (100.0, 500.0),
            (900.0, 500.0),
            (500.0, 900.0),
        ]);
        let edges = clip_edges(build_edges(&sites), &bounds, &sites);
        // Four spokes from the centre to the corners; the zero-length
        // edge between the opposite cocircular pair is gone.
        assert_eq!(edges.len(), 4);
        let center = Point::new(500.0, 500.0);
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(1000.0, 0.0),
            Point::new(0.0, 1000.0),
            Point::new(1000.0, 1000.0),
        ];
        for e in &edges {
            let (s, t) = (e.start.unwrap(), e.end.unwrap());
            let far = if points_coincide(&s, &center) { t } else { s };
            assert!(corners.iter().any(|c| points_coincide(&far, c)));
        }
    }

    #[test]
    fn far_away_bisector_is_dropped() {
        let bounds = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let sites = pts(&[(2.0, 2.0), (3.0, 3.0), (100.0, 100.0)]);
        let edges = clip_edges(build_edges(&sites), &bounds, &sites);
        // The bisector between site 1 and the far site misses the box.
        assert!(
            edges
                .iter()
                .all(|e| e.other_site(2).is_none())
        );
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn border_exact_bisector_survives_on_either_wall() {
        let bounds = BoundingBox::new(0.0, 0.0, 1000.0, 1000.0);
        // The bisector lies exactly on the right wall, and mirrored exactly
        // on the left wall; both must come out as one full-height edge.
        let on_right = pts(&[(999.0, 500.0), (1001.0, 500.0)]);
        let on_left = pts(&[(1.0, 500.0), (-1.0, 500.0)]);
        for sites in [on_right, on_left] {
            let edges = clip_edges(build_edges(&sites), &bounds, &sites);
            assert_eq!(edges.len(), 1);
            let e = &edges[0];
            let (s, t) = (e.start.unwrap(), e.end.unwrap());
            assert!(bounds.on_border(&s) && bounds.on_border(&t));
            assert!((s.y - t.y).abs() > 1000.0 - 1e-6);
        }
    }

    #[test]
    fn edges_stay_inside_the_box() {
        let bounds = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let sites = pts(&[
            (13.0, 17.0),
            (71.0, 23.0),
            (37.0, 83.0),
            (91.0, 67.0),
            (53.0, 47.0),
        ]);
        let edges = clip_edges(build_edges(&sites), &bounds, &sites);
        assert!(!edges.is_empty());
        for e in &edges {
            let (s, t) = (e.start.unwrap(), e.end.unwrap());
            assert!(bounds.contains(s.x, s.y));
            assert!(bounds.contains(t.x, t.y));
            assert!(!points_coincide(&s, &t));
        }
    }
}
