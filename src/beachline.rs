//! The beach line: the x-ordered sequence of parabolic arcs cut out by the
//! sites above the sweep line.
//!
//! Arcs are arena-allocated so circle events can refer to them by stable ID
//! while the sequence itself is spliced. Breakpoints between neighboring arcs
//! are not stored; they are recomputed from the two foci at the current
//! directrix, which keeps the sequence valid as the sweep advances.

use crate::geometry::{EPSILON, Point};

pub(crate) type ArcId = usize;

/// One arc on the beach line.
///
/// `edge` is the growing edge traced by the arc's *left* breakpoint; the
/// leftmost arc has none. `circle` is the pending collapse of this arc, if
/// one is scheduled.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Arc {
    pub site: usize,
    pub edge: Option<usize>,
    pub circle: Option<usize>,
}

/// Where a new site lands on the beach line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Insertion {
    /// Strictly inside the arc at this position: split it in three.
    Split(usize),
    /// Exactly on the breakpoint between the arcs at these two positions:
    /// the new arc slots in between and the meeting point is a Voronoi
    /// vertex right away.
    OnBreakpoint { left: usize, right: usize },
}

/// X-coordinate of the breakpoint between a left and a right arc focus at
/// the given directrix. Of the two parabola intersections this picks the one
/// where the left focus is nearest below the sweep, i.e. the transition in
/// beach order. A focus lying on the directrix degenerates the parabola to a
/// vertical ray at its x.
pub(crate) fn breakpoint_x(left: &Point, right: &Point, directrix: f64) -> f64 {
    let pby2 = right.y - directrix;
    if pby2.abs() < EPSILON {
        return right.x;
    }
    let plby2 = left.y - directrix;
    if plby2.abs() < EPSILON {
        return left.x;
    }
    if (left.y - right.y).abs() < EPSILON {
        // Equidistant foci: the breakpoint rides the vertical bisector.
        return (left.x + right.x) / 2.0;
    }
    let hl = left.x - right.x;
    let aby2 = 1.0 / pby2 - 1.0 / plby2;
    let b = hl / plby2;
    let det = b * b
        - 2.0 * aby2
            * (hl * hl / (-2.0 * plby2) - left.y + plby2 / 2.0 + right.y - pby2 / 2.0);
    (-b + det.sqrt()) / aby2 + right.x
}

#[derive(Debug, Default)]
pub(crate) struct BeachLine {
    arcs: Vec<Arc>,
    order: Vec<ArcId>,
}

impl BeachLine {
    pub fn new() -> BeachLine {
        BeachLine::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn arc(&self, id: ArcId) -> &Arc {
        &self.arcs[id]
    }

    pub fn arc_mut(&mut self, id: ArcId) -> &mut Arc {
        &mut self.arcs[id]
    }

    pub fn arc_id_at(&self, pos: usize) -> ArcId {
        self.order[pos]
    }

    pub fn site_at(&self, pos: usize) -> usize {
        self.arcs[self.order[pos]].site
    }

    /// Current sequence position of an arc. Only called for arcs that are
    /// still on the beach (live circle events guarantee that).
    pub fn position_of(&self, id: ArcId) -> Option<usize> {
        self.order.iter().position(|&a| a == id)
    }

    fn alloc(&mut self, site: usize) -> ArcId {
        self.arcs.push(Arc { site, edge: None, circle: None });
        self.arcs.len() - 1
    }

    /// Appends an arc at the right end (bottom-row seeding).
    pub fn push_back(&mut self, site: usize) -> ArcId {
        let id = self.alloc(site);
        self.order.push(id);
        id
    }

    /// Inserts an arc so it ends up at sequence position `pos`.
    pub fn insert_at(&mut self, pos: usize, site: usize) -> ArcId {
        let id = self.alloc(site);
        self.order.insert(pos, id);
        id
    }

    /// Removes the arcs at positions `lo..=hi` from the sequence. Their
    /// arena slots stay allocated; stale IDs are never reused.
    pub fn remove_range(&mut self, lo: usize, hi: usize) {
        self.order.drain(lo..=hi);
    }

    /// X of the breakpoint on the left of the arc at `pos`
    /// (`-inf` for the leftmost arc).
    pub fn left_breakpoint_x(&self, pos: usize, sites: &[Point], directrix: f64) -> f64 {
        if pos == 0 {
            return f64::NEG_INFINITY;
        }
        breakpoint_x(
            &sites[self.site_at(pos - 1)],
            &sites[self.site_at(pos)],
            directrix,
        )
    }

    /// X of the breakpoint on the right of the arc at `pos`
    /// (`+inf` for the rightmost arc).
    pub fn right_breakpoint_x(&self, pos: usize, sites: &[Point], directrix: f64) -> f64 {
        if pos + 1 >= self.order.len() {
            return f64::INFINITY;
        }
        breakpoint_x(
            &sites[self.site_at(pos)],
            &sites[self.site_at(pos + 1)],
            directrix,
        )
    }

    /// Finds where a site at `(x, directrix)` lands. Breakpoints are
    /// monotone along the sequence, so a binary search suffices; the
    /// [`EPSILON`]-wide bands around the two flanking breakpoints map to the
    /// exact-hit case.
    pub fn locate(&self, x: f64, sites: &[Point], directrix: f64) -> Insertion {
        debug_assert!(!self.order.is_empty());
        let mut lo = 0;
        let mut hi = self.order.len() - 1;
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.right_breakpoint_x(mid, sites, directrix) < x - EPSILON {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        let pos = lo;
        let dxl = self.left_breakpoint_x(pos, sites, directrix) - x;
        if dxl > -EPSILON {
            return Insertion::OnBreakpoint { left: pos - 1, right: pos };
        }
        let dxr = x - self.right_breakpoint_x(pos, sites, directrix);
        if dxr > -EPSILON {
            return Insertion::OnBreakpoint { left: pos, right: pos + 1 };
        }
        Insertion::Split(pos)
    }
}
