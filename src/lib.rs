//! # voroplane
//!
//! `voroplane` computes planar Voronoi diagrams with Fortune's sweep line,
//! clipped to a rectangular bounding box. It is designed to be used in Rust
//! as well as compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Sweep line**: O((n + m) log n) construction via a beach line of
//!   parabolic arcs and a lazy-invalidation event queue, robust against
//!   cohorizontal, collinear and cocircular generator layouts.
//! - **Rectangle clipping**: every edge is bounded to the box; cells can be
//!   closed along the border (with corner points and wall IDs) or left open.
//! - **Clockwise cell polygons**: one polygon per generator, ordered
//!   clockwise on screen (y grows downward), with per-segment neighbor IDs.
//! - **WASM-first**: built with `wasm-bindgen` for seamless integration with
//!   JavaScript and TypeScript; polygon building runs in parallel via rayon.
//!
//! ## Example
//!
//! ```
//! use voroplane::{BorderMode, BoundingBox, tessellate};
//!
//! let bounds = BoundingBox::new(0.0, 0.0, 1000.0, 1000.0);
//! let sites = [500.0, 700.0, 500.0, 300.0];
//! let diagram = tessellate(&sites, bounds, BorderMode::GenerateBorders)?;
//! assert_eq!(diagram.cells.len(), 2);
//! # Ok::<(), voroplane::TessellationError>(())
//! ```
//!
//! ## Main Interface
//!
//! The one-shot entry point is [`tessellate`]; [`Tessellation`] keeps a
//! reusable state for generator updates and Lloyd relaxation.

mod beachline;
mod bounds;
mod cell;
mod clip;
mod diagram;
mod event;
mod geometry;
mod sweep;
mod tessellation;
mod wasm;

pub use bounds::BOX_ID_BOTTOM;
pub use bounds::BOX_ID_LEFT;
pub use bounds::BOX_ID_RIGHT;
pub use bounds::BOX_ID_TOP;
pub use bounds::BoundingBox;
pub use bounds::box_side;
pub use cell::CellPolygon;
pub use cell::NO_NEIGHBOR;
pub use diagram::Edge;
pub use geometry::EPSILON;
pub use geometry::Orientation;
pub use geometry::Point;
pub use geometry::circumcenter;
pub use geometry::orientation;
pub use tessellation::BorderMode;
pub use tessellation::Diagram;
pub use tessellation::Tessellation;
pub use tessellation::TessellationError;
pub use tessellation::tessellate;
pub use wasm::BoundingBoxWasm;
pub use wasm::CellPolygonWasm;
pub use wasm::TessellationWasm;
