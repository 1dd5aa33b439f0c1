//! The edge/vertex graph produced by the sweep.

use crate::geometry::Point;

/// One Voronoi edge.
///
/// Walking `start -> end`, the `left` generator lies on the left in screen
/// coordinates. `right` is a generator index, or a negative box side ID (see
/// [`crate::bounds::box_side`]) for border segments synthesized in
/// [`crate::BorderMode::GenerateBorders`]. During the sweep either endpoint
/// may still be `None`; the clipper resolves and bounds both.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub left: usize,
    pub right: i32,
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl Edge {
    /// Whether this is a synthesized border segment rather than a bisector.
    pub fn is_border(&self) -> bool {
        self.right < 0
    }

    /// The generator facing `site` across this edge, if any.
    pub fn other_site(&self, site: usize) -> Option<i32> {
        if self.left == site {
            Some(self.right)
        } else if self.right == site as i32 {
            Some(self.left as i32)
        } else {
            None
        }
    }
}

/// Growing edge collection used while the sweep runs.
///
/// Endpoints are fixed one Voronoi vertex at a time, from either flanking
/// cell. The first vertex recorded for an edge also fixes its orientation;
/// the second caller arrives with the sites swapped and therefore fills the
/// opposite slot.
#[derive(Debug, Default)]
pub(crate) struct EdgeList {
    edges: Vec<Edge>,
}

impl EdgeList {
    pub fn new() -> EdgeList {
        EdgeList { edges: Vec::new() }
    }

    pub fn create(&mut self, left: usize, right: usize) -> usize {
        self.edges.push(Edge {
            left,
            right: right as i32,
            start: None,
            end: None,
        });
        self.edges.len() - 1
    }

    /// Records the vertex `v` as the start of the edge as seen from the
    /// `(left, right)` arc pair. If the edge was already oriented by the
    /// opposite pair, the vertex lands in the `end` slot instead.
    pub fn set_start(&mut self, id: usize, left: usize, right: usize, v: Point) {
        let e = &mut self.edges[id];
        if e.start.is_none() && e.end.is_none() {
            e.start = Some(v);
            e.left = left;
            e.right = right as i32;
        } else if e.left == right {
            e.end = Some(v);
        } else {
            e.start = Some(v);
        }
    }

    /// Records `v` as the end of the edge as seen from `(left, right)`.
    pub fn set_end(&mut self, id: usize, left: usize, right: usize, v: Point) {
        self.set_start(id, right, left, v);
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}
