//! Fortune's sweep line.
//!
//! The sweep advances down the screen (ascending y). Site events insert arcs
//! into the beach line; circle events remove collapsed arcs and emit Voronoi
//! vertices. Edges grow with their breakpoints and keep any endpoint the
//! sweep never reaches as `None` for the clipper to resolve.

use crate::beachline::{ArcId, BeachLine, Insertion};
use crate::diagram::{Edge, EdgeList};
use crate::event::{Event, EventQueue};
use crate::geometry::{CONVERGENCE_EPSILON, EPSILON, Point, parabola_y, points_coincide};

/// Runs the sweep over all generators and returns the unclipped edge graph.
/// Generators coinciding within [`EPSILON`] with an already accepted one are
/// skipped and end up with no incident edges.
pub(crate) fn build_edges(sites: &[Point]) -> Vec<Edge> {
    Sweep::new(sites).run()
}

struct Sweep<'a> {
    sites: &'a [Point],
    beach: BeachLine,
    queue: EventQueue,
    edges: EdgeList,
}

impl<'a> Sweep<'a> {
    fn new(sites: &'a [Point]) -> Sweep<'a> {
        Sweep {
            sites,
            beach: BeachLine::new(),
            queue: EventQueue::new(),
            edges: EdgeList::new(),
        }
    }

    fn run(mut self) -> Vec<Edge> {
        if self.sites.is_empty() {
            return Vec::new();
        }
        let mut order: Vec<usize> = (0..self.sites.len()).collect();
        order.sort_by(|&a, &b| {
            let pa = &self.sites[a];
            let pb = &self.sites[b];
            pa.y
                .total_cmp(&pb.y)
                .then_with(|| pa.x.total_cmp(&pb.x))
                .then_with(|| a.cmp(&b))
        });
        for &i in &order {
            self.queue.push_site(i, self.sites[i]);
        }

        // Seed the beach with the whole top-most cohorizontal run of sites.
        // The generic insertion cases assume an arc strictly above the new
        // site and mis-order the beach when several sites share the minimal
        // y, so that run becomes a left-to-right row with vertical edges
        // growing between adjacent members. The queue yields the run in
        // (y, x) order, which is not x order when the y values only agree
        // within [`EPSILON`], so the run is re-sorted before seeding.
        let first = match self.queue.pop() {
            Some(Event::Site { site }) => site,
            _ => return self.edges.into_edges(),
        };
        let row_y = self.sites[first].y;
        let mut row = vec![first];
        while let Some(site) = self.queue.pop_site_in_row(row_y) {
            row.push(site);
        }
        row.sort_by(|&a, &b| {
            self.sites[a]
                .x
                .total_cmp(&self.sites[b].x)
                .then_with(|| a.cmp(&b))
        });
        self.beach.push_back(row[0]);
        let mut last_site = self.sites[row[0]];
        for &site in &row[1..] {
            if points_coincide(&self.sites[site], &last_site) {
                continue;
            }
            let prev = self.beach.site_at(self.beach.len() - 1);
            let edge = self.edges.create(prev, site);
            let id = self.beach.push_back(site);
            self.beach.arc_mut(id).edge = Some(edge);
            last_site = self.sites[site];
        }

        while let Some(event) = self.queue.pop() {
            match event {
                Event::Site { site } => {
                    let p = self.sites[site];
                    if points_coincide(&p, &last_site) {
                        continue;
                    }
                    last_site = p;
                    self.site_event(site);
                }
                Event::Circle { arc, x, center_y } => {
                    self.circle_event(arc, x, center_y);
                }
            }
        }
        self.edges.into_edges()
    }

    fn site_event(&mut self, site: usize) {
        let p = self.sites[site];
        let directrix = p.y;
        match self.beach.locate(p.x, self.sites, directrix) {
            Insertion::Split(pos) => self.split_arc(pos, site),
            Insertion::OnBreakpoint { left, right } => {
                self.insert_on_breakpoint(left, right, site, p)
            }
        }
    }

    /// The new site lands strictly inside the arc at `pos`: the arc splits
    /// into three, with the new arc in the middle. Both breakpoints of the
    /// new arc trace the same edge, one per direction.
    fn split_arc(&mut self, pos: usize, site: usize) {
        self.detach_circle(pos);
        let split_site = self.beach.site_at(pos);
        let edge = self.edges.create(split_site, site);
        let new_id = self.beach.insert_at(pos + 1, site);
        self.beach.arc_mut(new_id).edge = Some(edge);
        let copy_id = self.beach.insert_at(pos + 2, split_site);
        self.beach.arc_mut(copy_id).edge = Some(edge);
        self.attach_circle(pos);
        self.attach_circle(pos + 2);
    }

    /// The new site lands exactly on the breakpoint between two arcs: that
    /// point is a Voronoi vertex of the three sites. The edge the breakpoint
    /// was tracing ends there and two new edges open.
    fn insert_on_breakpoint(&mut self, left: usize, right: usize, site: usize, p: Point) {
        self.detach_circle(left);
        self.detach_circle(right);
        let l_site = self.beach.site_at(left);
        let r_site = self.beach.site_at(right);
        // Evaluate the vertex on whichever flanking parabola is not
        // degenerate at this directrix; on the breakpoint both agree.
        let anchor = if self.sites[l_site].y < p.y - EPSILON {
            self.sites[l_site]
        } else {
            self.sites[r_site]
        };
        let vertex = Point::new(p.x, parabola_y(&anchor, p.y, p.x));

        let old_arc = self.beach.arc_id_at(right);
        if let Some(edge) = self.beach.arc(old_arc).edge {
            self.edges.set_start(edge, l_site, r_site, vertex);
        }

        let new_id = self.beach.insert_at(right, site);
        let left_edge = self.edges.create(l_site, site);
        self.edges.set_end(left_edge, l_site, site, vertex);
        self.beach.arc_mut(new_id).edge = Some(left_edge);

        let right_edge = self.edges.create(site, r_site);
        self.edges.set_end(right_edge, site, r_site, vertex);
        let right_arc = self.beach.arc_id_at(right + 1);
        self.beach.arc_mut(right_arc).edge = Some(right_edge);

        self.attach_circle(left);
        self.attach_circle(right + 1);
    }

    /// The arc carrying a live circle event has collapsed: remove it, emit
    /// the vertex, close the two edges meeting there and open the edge
    /// between the surviving neighbours.
    fn circle_event(&mut self, arc: ArcId, x: f64, center_y: f64) {
        let Some(pos) = self.beach.position_of(arc) else {
            debug_assert!(false, "live circle event for an arc not on the beach");
            return;
        };
        let vertex = Point::new(x, center_y);

        // Four or more cocircular sites: the neighbours collapse onto the
        // same vertex and must go in the same step, otherwise their events
        // would fire on an already-rearranged beach.
        let mut lo = pos;
        while lo > 0 && self.collapses_at(lo - 1, &vertex) {
            lo -= 1;
        }
        let mut hi = pos;
        while hi + 1 < self.beach.len() && self.collapses_at(hi + 1, &vertex) {
            hi += 1;
        }
        debug_assert!(lo > 0 && hi + 1 < self.beach.len());
        if lo == 0 || hi + 1 >= self.beach.len() {
            return;
        }

        for p in lo - 1..=hi + 1 {
            self.detach_circle(p);
        }
        for p in lo..=hi + 1 {
            let l_site = self.beach.site_at(p - 1);
            let r_site = self.beach.site_at(p);
            let arc_id = self.beach.arc_id_at(p);
            if let Some(edge) = self.beach.arc(arc_id).edge {
                self.edges.set_start(edge, l_site, r_site, vertex);
            }
        }

        let l_site = self.beach.site_at(lo - 1);
        let r_site = self.beach.site_at(hi + 1);
        self.beach.remove_range(lo, hi);

        let edge = self.edges.create(l_site, r_site);
        self.edges.set_end(edge, l_site, r_site, vertex);
        let survivor = self.beach.arc_id_at(lo);
        self.beach.arc_mut(survivor).edge = Some(edge);

        self.attach_circle(lo - 1);
        self.attach_circle(lo);
    }

    /// Whether the arc at `pos` has a pending collapse onto `vertex`.
    fn collapses_at(&self, pos: usize, vertex: &Point) -> bool {
        let arc = self.beach.arc(self.beach.arc_id_at(pos));
        match arc.circle {
            Some(c) => {
                let ev = self.queue.circle(c);
                (ev.x - vertex.x).abs() < EPSILON && (ev.center_y - vertex.y).abs() < EPSILON
            }
            None => false,
        }
    }

    fn detach_circle(&mut self, pos: usize) {
        let id = self.beach.arc_id_at(pos);
        if let Some(circle) = self.beach.arc_mut(id).circle.take() {
            self.queue.invalidate(circle);
        }
    }

    /// Schedules the collapse of the arc at `pos` if its neighbouring
    /// breakpoints converge. In beach order that means the three sites turn
    /// clockwise on screen; the event fires when the sweep reaches the
    /// bottom of their circumcircle.
    fn attach_circle(&mut self, pos: usize) {
        if pos == 0 || pos + 1 >= self.beach.len() {
            return;
        }
        let l = self.sites[self.beach.site_at(pos - 1)];
        let c = self.sites[self.beach.site_at(pos)];
        let r = self.sites[self.beach.site_at(pos + 1)];
        let a = l - c;
        let b = r - c;
        let d = 2.0 * a.cross(&b);
        if d >= -CONVERGENCE_EPSILON {
            return;
        }
        let ha = a.dot(&a);
        let hb = b.dot(&b);
        let ux = (b.y * ha - a.y * hb) / d;
        let uy = (a.x * hb - b.x * ha) / d;
        let center_y = uy + c.y;
        let event_x = ux + c.x;
        let event_y = center_y + (ux * ux + uy * uy).sqrt();
        let arc = self.beach.arc_id_at(pos);
        let circle = self.queue.push_circle(arc, event_x, event_y, center_y);
        self.beach.arc_mut(arc).circle = Some(circle);
    }
}
