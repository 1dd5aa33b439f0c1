//! The sweep event queue.
//!
//! Site and circle events share one binary heap, ordered by `(y, x)`
//! ascending with circle events winning exact ties and insertion order as the
//! final tie-break, so equal inputs always replay identically. Circle events
//! cannot be removed from the heap when superseded; they live in a side arena
//! and are invalidated in place, then skipped on pop.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::geometry::{EPSILON, Point};

const RANK_CIRCLE: u8 = 0;
const RANK_SITE: u8 = 1;

#[derive(Clone, Copy, Debug)]
enum Payload {
    Site(usize),
    Circle(usize),
}

#[derive(Clone, Copy, Debug)]
struct EventKey {
    y: f64,
    x: f64,
    rank: u8,
    seq: u64,
    payload: Payload,
}

impl PartialEq for EventKey {
    fn eq(&self, other: &EventKey) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EventKey {}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &EventKey) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &EventKey) -> Ordering {
        self.y
            .total_cmp(&other.y)
            .then_with(|| self.x.total_cmp(&other.x))
            .then_with(|| self.rank.cmp(&other.rank))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A scheduled arc collapse. The heap key `y` is the bottom of the
/// circumcircle; `center_y` recovers the Voronoi vertex as `(x, center_y)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CircleEvent {
    pub x: f64,
    pub center_y: f64,
    pub arc: usize,
    pub valid: bool,
}

/// An event handed to the sweep loop. Invalidated circle events are never
/// surfaced.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Event {
    Site { site: usize },
    Circle { arc: usize, x: f64, center_y: f64 },
}

#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    heap: BinaryHeap<Reverse<EventKey>>,
    circles: Vec<CircleEvent>,
    seq: u64,
}

impl EventQueue {
    pub fn new() -> EventQueue {
        EventQueue::default()
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub fn push_site(&mut self, site: usize, p: Point) {
        let seq = self.next_seq();
        self.heap.push(Reverse(EventKey {
            y: p.y,
            x: p.x,
            rank: RANK_SITE,
            seq,
            payload: Payload::Site(site),
        }));
    }

    /// Schedules a circle event and returns its handle for later
    /// invalidation.
    pub fn push_circle(&mut self, arc: usize, x: f64, y: f64, center_y: f64) -> usize {
        let id = self.circles.len();
        self.circles.push(CircleEvent { x, center_y, arc, valid: true });
        let seq = self.next_seq();
        self.heap.push(Reverse(EventKey {
            y,
            x,
            rank: RANK_CIRCLE,
            seq,
            payload: Payload::Circle(id),
        }));
        id
    }

    pub fn invalidate(&mut self, id: usize) {
        self.circles[id].valid = false;
    }

    /// A pending circle event, for coincident-vertex checks.
    pub fn circle(&self, id: usize) -> &CircleEvent {
        &self.circles[id]
    }

    /// Pops the next live event, skipping invalidated circle events.
    pub fn pop(&mut self) -> Option<Event> {
        while let Some(Reverse(key)) = self.heap.pop() {
            match key.payload {
                Payload::Site(site) => return Some(Event::Site { site }),
                Payload::Circle(id) => {
                    let c = self.circles[id];
                    if c.valid {
                        return Some(Event::Circle {
                            arc: c.arc,
                            x: c.x,
                            center_y: c.center_y,
                        });
                    }
                }
            }
        }
        None
    }

    /// Pops the next event only if it is a site event within [`EPSILON`] of
    /// the given sweep position. Used to collect the bottom-most cohorizontal
    /// run of sites.
    pub fn pop_site_in_row(&mut self, y: f64) -> Option<usize> {
        let key = self.heap.peek().map(|r| r.0)?;
        match key.payload {
            Payload::Site(site) if key.y < y + EPSILON => {
                self.heap.pop();
                Some(site)
            }
            _ => None,
        }
    }
}
