//! The rectangular tessellation domain.
//!
//! Everything outside the box is cut away. Border segments synthesized along
//! the box are tagged with negative side IDs so cells can report "the wall"
//! as a neighbor, distinct from any generator index.

use crate::geometry::{EPSILON, Point, approx_eq};

pub const BOX_ID_LEFT: i32 = box_side(0, false);
pub const BOX_ID_RIGHT: i32 = box_side(0, true);
pub const BOX_ID_TOP: i32 = box_side(1, false);
pub const BOX_ID_BOTTOM: i32 = box_side(1, true);

/// Negative ID of a box side: axis 0 is x, axis 1 is y (screen-down), `max`
/// selects the far wall of that axis.
pub const fn box_side(axis: usize, max: bool) -> i32 {
    -1 - (2 * axis as i32 + max as i32)
}

/// Axis-aligned rectangle, in screen coordinates (`min_y` is the top edge).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    /// A box is usable when it has positive extent on both axes.
    pub fn is_valid(&self) -> bool {
        self.min_x < self.max_x && self.min_y < self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Point-in-box test with [`EPSILON`] slack on the border.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x - EPSILON
            && x <= self.max_x + EPSILON
            && y >= self.min_y - EPSILON
            && y <= self.max_y + EPSILON
    }

    /// Whether a point lies on the border (it must already be inside).
    pub fn on_border(&self, p: &Point) -> bool {
        approx_eq(p.x, self.min_x)
            || approx_eq(p.x, self.max_x)
            || approx_eq(p.y, self.min_y)
            || approx_eq(p.y, self.max_y)
    }

    /// Liang-Barsky clipping of the segment `a -> b`. Returns the clipped
    /// segment, or `None` when it misses the box entirely.
    pub fn clip_segment(&self, a: &Point, b: &Point) -> Option<(Point, Point)> {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        let tests = [
            (-dx, a.x - self.min_x),
            (dx, self.max_x - a.x),
            (-dy, a.y - self.min_y),
            (dy, self.max_y - a.y),
        ];
        for (p, q) in tests {
            if p.abs() < EPSILON {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return None;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
        let d = Point::new(dx, dy);
        Some((*a + d * t0, *a + d * t1))
    }

    /// Total perimeter length.
    pub fn perimeter_len(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }

    /// Position of a border point along the perimeter, measured clockwise on
    /// screen from the top-left corner. Corners belong to the wall that
    /// starts at them in walking order.
    pub fn perimeter_pos(&self, p: &Point) -> f64 {
        debug_assert!(self.on_border(p));
        let w = self.width();
        let h = self.height();
        if approx_eq(p.y, self.min_y) && !approx_eq(p.x, self.max_x) {
            (p.x - self.min_x).clamp(0.0, w)
        } else if approx_eq(p.x, self.max_x) && !approx_eq(p.y, self.max_y) {
            w + (p.y - self.min_y).clamp(0.0, h)
        } else if approx_eq(p.y, self.max_y) && !approx_eq(p.x, self.min_x) {
            w + h + (self.max_x - p.x).clamp(0.0, w)
        } else {
            2.0 * w + h + (self.max_y - p.y).clamp(0.0, h)
        }
    }

    /// The border point at clockwise perimeter position `t`.
    pub fn perimeter_point(&self, t: f64) -> Point {
        let w = self.width();
        let h = self.height();
        let t = t.rem_euclid(self.perimeter_len());
        if t < w {
            Point::new(self.min_x + t, self.min_y)
        } else if t < w + h {
            Point::new(self.max_x, self.min_y + (t - w))
        } else if t < 2.0 * w + h {
            Point::new(self.max_x - (t - w - h), self.max_y)
        } else {
            Point::new(self.min_x, self.max_y - (t - 2.0 * w - h))
        }
    }

    /// Side ID of the wall covering perimeter position `t`.
    pub fn side_at(&self, t: f64) -> i32 {
        let w = self.width();
        let h = self.height();
        let t = t.rem_euclid(self.perimeter_len());
        if t < w {
            BOX_ID_TOP
        } else if t < w + h {
            BOX_ID_RIGHT
        } else if t < 2.0 * w + h {
            BOX_ID_BOTTOM
        } else {
            BOX_ID_LEFT
        }
    }

    /// Perimeter positions of the four corners in clockwise walking order.
    pub fn corner_positions(&self) -> [f64; 4] {
        let w = self.width();
        let h = self.height();
        [0.0, w, w + h, 2.0 * w + h]
    }
}
