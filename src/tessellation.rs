//! Tessellation entry points: the one-shot [`tessellate`] function and the
//! reusable [`Tessellation`] driver with generator management and Lloyd
//! relaxation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::bounds::BoundingBox;
use crate::cell::{self, CellPolygon};
use crate::clip;
use crate::diagram::Edge;
use crate::geometry::Point;
use crate::sweep;

/// Whether cell polygons are closed along the box border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderMode {
    /// Close every cell with synthesized border segments and corners; the
    /// cells partition the box exactly.
    GenerateBorders,
    /// Emit only true bisector segments; border-touching cells stay open.
    DoNotGenerateBorders,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TessellationError {
    /// The bounding box has no positive extent on some axis.
    InvalidBounds(BoundingBox),
}

impl std::fmt::Display for TessellationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TessellationError::InvalidBounds(b) => write!(
                f,
                "invalid bounding box [{}, {}] x [{}, {}]: min must be strictly below max on both axes",
                b.min_x, b.max_x, b.min_y, b.max_y
            ),
        }
    }
}

impl std::error::Error for TessellationError {}

/// A computed Voronoi diagram: the edge graph plus one cell polygon per
/// generator, index-aligned with the input.
#[derive(Clone, Debug, Default)]
pub struct Diagram {
    pub edges: Vec<Edge>,
    pub cells: Vec<CellPolygon>,
}

/// Computes the Voronoi diagram of `generators` (flat `[x0, y0, x1, y1, ..]`)
/// clipped to `bounds`. Generators may lie outside the box; duplicates
/// within tolerance produce empty cells. A trailing unpaired coordinate is
/// ignored.
pub fn tessellate(
    generators: &[f64],
    bounds: BoundingBox,
    mode: BorderMode,
) -> Result<Diagram, TessellationError> {
    if !bounds.is_valid() {
        return Err(TessellationError::InvalidBounds(bounds));
    }
    Ok(compute(&to_points(generators), bounds, mode))
}

fn to_points(flat: &[f64]) -> Vec<Point> {
    flat.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect()
}

fn compute(sites: &[Point], bounds: BoundingBox, mode: BorderMode) -> Diagram {
    let raw = sweep::build_edges(sites);
    let mut edges = clip::clip_edges(raw, &bounds, sites);
    let (cells, border_edges) = cell::build_cells(sites, &edges, &bounds, mode);
    edges.extend(border_edges);
    Diagram { edges, cells }
}

/// Reusable tessellation over a fixed box: manages generators, recomputes on
/// demand and supports Lloyd relaxation steps.
pub struct Tessellation {
    bounds: BoundingBox,
    mode: BorderMode,
    generators: Vec<f64>,
    edges: Vec<Edge>,
    cells: Vec<CellPolygon>,
}

impl Tessellation {
    pub fn new(bounds: BoundingBox, mode: BorderMode) -> Result<Tessellation, TessellationError> {
        if !bounds.is_valid() {
            return Err(TessellationError::InvalidBounds(bounds));
        }
        Ok(Tessellation {
            bounds,
            mode,
            generators: Vec::new(),
            edges: Vec::new(),
            cells: Vec::new(),
        })
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn border_mode(&self) -> BorderMode {
        self.mode
    }

    /// Replaces all generators; a trailing unpaired coordinate is dropped.
    /// Previous results are cleared until the next [`calculate`].
    ///
    /// [`calculate`]: Tessellation::calculate
    pub fn set_generators(&mut self, generators: &[f64]) {
        let len = generators.len() - generators.len() % 2;
        self.generators = generators[..len].to_vec();
        self.edges.clear();
        self.cells.clear();
    }

    /// Moves a single generator. An out-of-range index is ignored.
    pub fn set_generator(&mut self, index: usize, x: f64, y: f64) {
        if 2 * index + 1 >= self.generators.len() {
            return;
        }
        self.generators[2 * index] = x;
        self.generators[2 * index + 1] = y;
        self.edges.clear();
        self.cells.clear();
    }

    /// Fills the box with `count` random generators. Native builds use a
    /// fixed seed so runs are reproducible.
    pub fn random_generators(&mut self, count: usize) {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let mut generators = Vec::with_capacity(count * 2);
        for _ in 0..count {
            generators.push(self.bounds.min_x + rng.r#gen::<f64>() * self.bounds.width());
            generators.push(self.bounds.min_y + rng.r#gen::<f64>() * self.bounds.height());
        }
        self.set_generators(&generators);
    }

    /// Recomputes edges and cells for the current generators.
    pub fn calculate(&mut self) {
        let diagram = compute(&to_points(&self.generators), self.bounds, self.mode);
        self.edges = diagram.edges;
        self.cells = diagram.cells;
    }

    /// One Lloyd step: every generator with a closed cell moves to that
    /// cell's centroid, the rest stay put. Call [`calculate`] first to have
    /// cells, and again afterwards to see the relaxed diagram; meaningful
    /// with [`BorderMode::GenerateBorders`].
    ///
    /// [`calculate`]: Tessellation::calculate
    pub fn relax(&mut self) {
        // No-op until `calculate` has produced a cell per generator.
        if self.cells.len() != self.generators.len() / 2 {
            return;
        }
        let relaxed: Vec<[f64; 2]> = self
            .cells
            .par_iter()
            .zip(self.generators.par_chunks_exact(2))
            .map(|(cell, g)| {
                if cell.is_closed() {
                    cell.centroid()
                } else {
                    [g[0], g[1]]
                }
            })
            .collect();
        let mut generators = Vec::with_capacity(relaxed.len() * 2);
        for g in &relaxed {
            generators.extend_from_slice(g);
        }
        self.set_generators(&generators);
    }

    pub fn count_generators(&self) -> usize {
        self.generators.len() / 2
    }

    pub fn count_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn generators(&self) -> Vec<f64> {
        self.generators.clone()
    }

    /// Coordinates of one generator, or `None` when out of range.
    pub fn get_generator(&self, index: usize) -> Option<[f64; 2]> {
        if 2 * index + 1 >= self.generators.len() {
            return None;
        }
        Some([self.generators[2 * index], self.generators[2 * index + 1]])
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn get_cell(&self, index: usize) -> Option<CellPolygon> {
        self.cells.get(index).cloned()
    }

    pub fn cells(&self) -> Vec<CellPolygon> {
        self.cells.clone()
    }
}

#[cfg(target_arch = "wasm32")]
fn get_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn get_seed() -> u64 {
    123456789
}
