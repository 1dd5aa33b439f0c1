//! Per-generator cell polygons, assembled from the clipped edge graph.
//!
//! Cells are built independently per generator (in parallel via rayon):
//! every incident edge is oriented so the generator sits on its right, the
//! oriented segments are chained by endpoint, and the walk therefore runs
//! clockwise on screen. With borders enabled, gaps between chain ends are
//! closed along the box perimeter, synthesizing corner points and border
//! edges tagged with negative side IDs.

use rayon::prelude::*;

use crate::bounds::BoundingBox;
use crate::diagram::Edge;
use crate::geometry::{EPSILON, Point, points_coincide};
use crate::tessellation::BorderMode;

/// Sentinel separating disjoint chains in the `edge_neighbors` list of an
/// open (borderless) polygon.
pub const NO_NEIGHBOR: i32 = i32::MIN;

/// The polygon of one Voronoi cell.
///
/// `vertices` is the flat `[x0, y0, x1, y1, ..]` point list, ordered
/// clockwise on screen. `edge_neighbors[i]` names what lies across the
/// segment starting at point `i`: a generator index, a negative box side ID,
/// or [`NO_NEIGHBOR`] between chains of an open polygon. Closed polygons
/// have exactly one neighbor entry per point (the last segment wraps
/// around); open polygons have one fewer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellPolygon {
    id: usize,
    vertices: Vec<f64>,
    edge_neighbors: Vec<i32>,
    closed: bool,
}

impl CellPolygon {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn vertices(&self) -> Vec<f64> {
        self.vertices.clone()
    }

    pub fn edge_neighbors(&self) -> Vec<i32> {
        self.edge_neighbors.clone()
    }

    pub fn points_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// A cell is empty when its generator was skipped (duplicate) or its
    /// region does not intersect the box.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn point(&self, i: usize) -> (f64, f64) {
        (self.vertices[2 * i], self.vertices[2 * i + 1])
    }

    fn signed_area(&self) -> f64 {
        let n = self.points_count();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let (xi, yi) = self.point(i);
            let (xj, yj) = self.point((i + 1) % n);
            sum += xi * yj - xj * yi;
        }
        sum / 2.0
    }

    /// Enclosed area; zero for open and empty polygons.
    pub fn area(&self) -> f64 {
        if !self.closed {
            return 0.0;
        }
        self.signed_area().abs()
    }

    /// Polygon centroid. Falls back to the vertex average for open or
    /// degenerate polygons, `[0, 0]` when empty.
    pub fn centroid(&self) -> [f64; 2] {
        let n = self.points_count();
        if n == 0 {
            return [0.0, 0.0];
        }
        let a = self.signed_area();
        if !self.closed || a.abs() < EPSILON {
            let mut sx = 0.0;
            let mut sy = 0.0;
            for i in 0..n {
                let (x, y) = self.point(i);
                sx += x;
                sy += y;
            }
            return [sx / n as f64, sy / n as f64];
        }
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let (xi, yi) = self.point(i);
            let (xj, yj) = self.point((i + 1) % n);
            let w = xi * yj - xj * yi;
            cx += (xi + xj) * w;
            cy += (yi + yj) * w;
        }
        [cx / (6.0 * a), cy / (6.0 * a)]
    }

    /// Even-odd ray-casting point test; always false for open polygons.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !self.closed {
            return false;
        }
        let n = self.points_count();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = self.point(i);
            let (xj, yj) = self.point(j);
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// Builds the cell polygon of every generator and collects the border edges
/// synthesized along the way.
pub(crate) fn build_cells(
    sites: &[Point],
    edges: &[Edge],
    bounds: &BoundingBox,
    mode: BorderMode,
) -> (Vec<CellPolygon>, Vec<Edge>) {
    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); sites.len()];
    for (i, e) in edges.iter().enumerate() {
        incident[e.left].push(i);
        if e.right >= 0 {
            incident[e.right as usize].push(i);
        }
    }
    let built: Vec<(CellPolygon, Vec<Edge>)> = (0..sites.len())
        .into_par_iter()
        .map(|site| build_cell(site, &incident[site], edges, bounds, mode))
        .collect();
    let mut cells = Vec::with_capacity(built.len());
    let mut border_edges = Vec::new();
    for (cell, mut b) in built {
        cells.push(cell);
        border_edges.append(&mut b);
    }
    (cells, border_edges)
}

/// One incident edge, oriented for the owning cell's clockwise walk.
struct Seg {
    a: Point,
    b: Point,
    neighbor: i32,
    used: bool,
}

struct Chain {
    points: Vec<Point>,
    neighbors: Vec<i32>,
    closed: bool,
}

fn build_cell(
    site: usize,
    incident: &[usize],
    edges: &[Edge],
    bounds: &BoundingBox,
    mode: BorderMode,
) -> (CellPolygon, Vec<Edge>) {
    let mut segs: Vec<Seg> = Vec::with_capacity(incident.len());
    for &i in incident {
        let e = &edges[i];
        let (Some(start), Some(end)) = (e.start, e.end) else {
            continue;
        };
        // The graph stores the left site along start -> end; flip so the
        // owning site is on the right and the walk turns clockwise.
        let (a, b, neighbor) = if e.left == site {
            (end, start, e.right)
        } else {
            (start, end, e.left as i32)
        };
        if points_coincide(&a, &b) {
            continue;
        }
        segs.push(Seg { a, b, neighbor, used: false });
    }
    if segs.is_empty() {
        return (
            CellPolygon { id: site, ..CellPolygon::default() },
            Vec::new(),
        );
    }
    let chains = build_chains(&mut segs);
    match mode {
        BorderMode::GenerateBorders => close_with_borders(site, chains, bounds),
        BorderMode::DoNotGenerateBorders => (concat_open(site, chains), Vec::new()),
    }
}

fn build_chains(segs: &mut Vec<Seg>) -> Vec<Chain> {
    let mut chains = Vec::new();
    loop {
        // Prefer a genuine head (a segment nothing leads into); a closed
        // loop has none, then any unused segment starts the walk.
        let mut head = None;
        'candidates: for i in 0..segs.len() {
            if segs[i].used {
                continue;
            }
            if head.is_none() {
                head = Some(i);
            }
            for j in 0..segs.len() {
                if !segs[j].used && points_coincide(&segs[j].b, &segs[i].a) {
                    continue 'candidates;
                }
            }
            head = Some(i);
            break;
        }
        match head {
            Some(h) => chains.push(walk_chain(segs, h)),
            None => break,
        }
    }
    chains
}

fn walk_chain(segs: &mut [Seg], head: usize) -> Chain {
    let start_point = segs[head].a;
    let mut points = vec![start_point];
    let mut neighbors = Vec::new();
    let mut cur = head;
    let mut closed = false;
    loop {
        segs[cur].used = true;
        neighbors.push(segs[cur].neighbor);
        let end = segs[cur].b;
        if points_coincide(&end, &start_point) {
            closed = true;
            break;
        }
        let dir = end - segs[cur].a;
        points.push(end);
        match next_segment(segs, &end, &dir) {
            Some(next) => cur = next,
            None => break,
        }
    }
    Chain { points, neighbors, closed }
}

/// The unused segment continuing from `at`, taking the most clockwise turn
/// relative to the incoming direction when several coincide there.
fn next_segment(segs: &[Seg], at: &Point, dir: &Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, s) in segs.iter().enumerate() {
        if s.used || !points_coincide(&s.a, at) {
            continue;
        }
        let d = s.b - s.a;
        // Clockwise-positive angle from the incoming direction.
        let angle = dir.cross(&d).atan2(dir.dot(&d));
        match best {
            Some((_, a)) if a >= angle => {}
            _ => best = Some((i, angle)),
        }
    }
    best.map(|(i, _)| i)
}

/// Merges open chains into one closed polygon by walking the box perimeter
/// clockwise from each dangling end to the next chain start, inserting
/// corner points, until the walk returns to the polygon's first point.
fn close_with_borders(
    site: usize,
    mut chains: Vec<Chain>,
    bounds: &BoundingBox,
) -> (CellPolygon, Vec<Edge>) {
    if let Some(i) = chains.iter().position(|c| c.closed) {
        // Interior cell: nothing touches the border.
        let c = chains.swap_remove(i);
        debug_assert!(chains.is_empty());
        return (polygon_from(site, c.points, c.neighbors, true), Vec::new());
    }

    let mut border_edges = Vec::new();
    let mut chain = chains.swap_remove(0);
    let mut points = std::mem::take(&mut chain.points);
    let mut neighbors = std::mem::take(&mut chain.neighbors);
    let first = points[0];
    let lp = bounds.perimeter_len();

    loop {
        let end = points[points.len() - 1];
        debug_assert!(bounds.on_border(&end) && bounds.on_border(&first));
        let te = bounds.perimeter_pos(&end);

        // Nearest clockwise target: another chain's start, or our own
        // first point, which closes the polygon.
        let mut target_chain = None;
        let mut dist = (bounds.perimeter_pos(&first) - te).rem_euclid(lp);
        for (i, c) in chains.iter().enumerate() {
            let d = (bounds.perimeter_pos(&c.points[0]) - te).rem_euclid(lp);
            if d < dist {
                dist = d;
                target_chain = Some(i);
            }
        }
        let target_point = match target_chain {
            Some(i) => chains[i].points[0],
            None => first,
        };

        // Corner points strictly between the dangling end and the target.
        let mut corner_ts: Vec<f64> = bounds
            .corner_positions()
            .iter()
            .map(|&ct| (ct - te).rem_euclid(lp))
            .filter(|&dc| dc > EPSILON && dc < dist - EPSILON)
            .collect();
        corner_ts.sort_by(f64::total_cmp);
        for dc in corner_ts {
            let from = points[points.len() - 1];
            let corner = bounds.perimeter_point(te + dc);
            let side = bounds.side_at(bounds.perimeter_pos(&from));
            neighbors.push(side);
            border_edges.push(Edge {
                left: site,
                right: side,
                start: Some(corner),
                end: Some(from),
            });
            points.push(corner);
        }

        let from = points[points.len() - 1];
        let bridged = !points_coincide(&from, &target_point);
        if bridged {
            let side = bounds.side_at(bounds.perimeter_pos(&from));
            neighbors.push(side);
            border_edges.push(Edge {
                left: site,
                right: side,
                start: Some(target_point),
                end: Some(from),
            });
        }

        match target_chain {
            Some(i) => {
                let c = chains.swap_remove(i);
                let mut chain_points = c.points.into_iter();
                if let Some(head) = chain_points.next() {
                    if bridged {
                        points.push(head);
                    }
                }
                points.extend(chain_points);
                neighbors.extend(c.neighbors);
            }
            None => break,
        }
    }
    debug_assert!(chains.is_empty());
    (polygon_from(site, points, neighbors, true), border_edges)
}

/// Borderless mode: chains stay open and are emitted in a deterministic
/// order, separated by [`NO_NEIGHBOR`] entries. A chain that closed on its
/// own (a fully interior cell) is emitted as a closed polygon.
fn concat_open(site: usize, mut chains: Vec<Chain>) -> CellPolygon {
    if chains.len() == 1 {
        let c = chains.swap_remove(0);
        return polygon_from(site, c.points, c.neighbors, c.closed);
    }
    chains.sort_by(|a, b| {
        let ka = chain_sort_key(a);
        let kb = chain_sort_key(b);
        ka.0.total_cmp(&kb.0).then_with(|| ka.1.total_cmp(&kb.1))
    });
    let mut points = Vec::new();
    let mut neighbors = Vec::new();
    for (i, c) in chains.into_iter().enumerate() {
        if i > 0 {
            neighbors.push(NO_NEIGHBOR);
        }
        points.extend(c.points);
        neighbors.extend(c.neighbors);
    }
    polygon_from(site, points, neighbors, false)
}

/// Smallest `(y, x)` point of a chain, for deterministic ordering.
fn chain_sort_key(c: &Chain) -> (f64, f64) {
    let mut key = (f64::INFINITY, f64::INFINITY);
    for p in &c.points {
        let k = (p.y, p.x);
        if k.0 < key.0 || (k.0 == key.0 && k.1 < key.1) {
            key = k;
        }
    }
    key
}

fn polygon_from(id: usize, points: Vec<Point>, edge_neighbors: Vec<i32>, closed: bool) -> CellPolygon {
    let mut vertices = Vec::with_capacity(points.len() * 2);
    for p in &points {
        vertices.push(p.x);
        vertices.push(p.y);
    }
    CellPolygon { id, vertices, edge_neighbors, closed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> CellPolygon {
        // Clockwise on screen.
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        polygon_from(0, points, vec![1, 2, 3, 4], true)
    }

    #[test]
    fn square_metrics() {
        let p = square();
        assert_eq!(p.points_count(), 4);
        assert!((p.area() - 16.0).abs() < 1e-12);
        let c = p.centroid();
        assert!((c[0] - 2.0).abs() < 1e-12);
        assert!((c[1] - 2.0).abs() < 1e-12);
        assert!(p.signed_area() > 0.0);
    }

    #[test]
    fn contains_inside_outside() {
        let p = square();
        assert!(p.contains(1.0, 1.0));
        assert!(p.contains(3.9, 0.1));
        assert!(!p.contains(4.5, 1.0));
        assert!(!p.contains(-0.1, 2.0));
    }

    #[test]
    fn open_polygon_has_no_area_and_contains_nothing() {
        let points = vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0)];
        let p = polygon_from(0, points, vec![1], false);
        assert_eq!(p.area(), 0.0);
        assert!(!p.contains(1.0, 0.0));
        assert!(!p.is_empty());
        assert!(!p.is_closed());
    }

    #[test]
    fn empty_polygon() {
        let p = CellPolygon::default();
        assert!(p.is_empty());
        assert_eq!(p.area(), 0.0);
        assert_eq!(p.centroid(), [0.0, 0.0]);
        assert!(!p.contains(0.0, 0.0));
    }

    #[test]
    fn chain_walk_takes_most_clockwise_turn() {
        // Two segments leave the shared point; the walk must pick the
        // clockwise one (down) over the straight continuation.
        let mut segs = vec![
            Seg {
                a: Point::new(0.0, 0.0),
                b: Point::new(2.0, 0.0),
                neighbor: 1,
                used: false,
            },
            Seg {
                a: Point::new(2.0, 0.0),
                b: Point::new(4.0, 0.0),
                neighbor: 2,
                used: false,
            },
            Seg {
                a: Point::new(2.0, 0.0),
                b: Point::new(2.0, 2.0),
                neighbor: 3,
                used: false,
            },
        ];
        let chain = walk_chain(&mut segs, 0);
        assert_eq!(chain.neighbors, vec![1, 3]);
        assert!(!chain.closed);
    }
}
