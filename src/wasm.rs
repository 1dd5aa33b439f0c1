//! wasm-bindgen bindings: thin wrappers over the native types with flat
//! `Vec<f64>`/`Vec<i32>` getters for cheap transfer to JavaScript.

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use wasm_bindgen_rayon::init_thread_pool;

use crate::bounds::BoundingBox;
use crate::cell::CellPolygon;
use crate::tessellation::{BorderMode, Tessellation};

// --- Bounding Box ---

#[wasm_bindgen(js_name = BoundingBox)]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBoxWasm {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[wasm_bindgen(js_class = BoundingBox)]
impl BoundingBoxWasm {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBoxWasm {
        BoundingBoxWasm { min_x, min_y, max_x, max_y }
    }
}

impl From<BoundingBoxWasm> for BoundingBox {
    fn from(b: BoundingBoxWasm) -> Self {
        BoundingBox::new(b.min_x, b.min_y, b.max_x, b.max_y)
    }
}

// --- Cell Wrapper ---

#[wasm_bindgen(js_name = CellPolygon)]
pub struct CellPolygonWasm {
    inner: CellPolygon,
}

#[wasm_bindgen(js_class = CellPolygon)]
impl CellPolygonWasm {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> usize {
        self.inner.id()
    }
    #[wasm_bindgen(getter)]
    pub fn vertices(&self) -> Vec<f64> {
        self.inner.vertices()
    }
    #[wasm_bindgen(getter)]
    pub fn edge_neighbors(&self) -> Vec<i32> {
        self.inner.edge_neighbors()
    }
    #[wasm_bindgen(getter)]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
    pub fn area(&self) -> f64 {
        self.inner.area()
    }
    pub fn centroid(&self) -> Vec<f64> {
        self.inner.centroid().to_vec()
    }
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.inner.contains(x, y)
    }
}

// --- Tessellation ---

#[wasm_bindgen(js_name = Tessellation)]
pub struct TessellationWasm {
    inner: Tessellation,
}

#[wasm_bindgen(js_class = Tessellation)]
impl TessellationWasm {
    #[wasm_bindgen(constructor)]
    pub fn new(bounds: BoundingBoxWasm, generate_borders: bool) -> Result<TessellationWasm, JsValue> {
        let mode = if generate_borders {
            BorderMode::GenerateBorders
        } else {
            BorderMode::DoNotGenerateBorders
        };
        Tessellation::new(bounds.into(), mode)
            .map(|inner| TessellationWasm { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
    pub fn set_generators(&mut self, generators: &[f64]) {
        self.inner.set_generators(generators);
    }
    pub fn set_generator(&mut self, index: usize, x: f64, y: f64) {
        self.inner.set_generator(index, x, y);
    }
    pub fn random_generators(&mut self, count: usize) {
        self.inner.random_generators(count);
    }
    pub fn calculate(&mut self) {
        self.inner.calculate();
    }
    pub fn relax(&mut self) {
        self.inner.relax();
    }
    #[wasm_bindgen(getter)]
    pub fn count_generators(&self) -> usize {
        self.inner.count_generators()
    }
    #[wasm_bindgen(getter)]
    pub fn count_cells(&self) -> usize {
        self.inner.count_cells()
    }
    #[wasm_bindgen(getter)]
    pub fn generators(&self) -> Vec<f64> {
        self.inner.generators()
    }
    pub fn get_generator(&self, index: usize) -> Option<Vec<f64>> {
        self.inner.get_generator(index).map(|g| g.to_vec())
    }
    pub fn get_cell(&self, index: usize) -> Option<CellPolygonWasm> {
        self.inner.get_cell(index).map(|inner| CellPolygonWasm { inner })
    }
    #[wasm_bindgen(getter)]
    pub fn cells(&self) -> Vec<CellPolygonWasm> {
        self.inner
            .cells()
            .into_iter()
            .map(|inner| CellPolygonWasm { inner })
            .collect()
    }
    /// Edge segments as flat `[x1, y1, x2, y2, ..]`, one quadruple per edge.
    #[wasm_bindgen(getter)]
    pub fn edges(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.inner.edges().len() * 4);
        for e in self.inner.edges() {
            if let (Some(s), Some(t)) = (e.start, e.end) {
                flat.extend_from_slice(&[s.x, s.y, t.x, t.y]);
            }
        }
        flat
    }
    /// Flanking sites as flat `[left, right, ..]` pairs, aligned with
    /// `edges`; negative right values are box side IDs.
    #[wasm_bindgen(getter)]
    pub fn edge_sites(&self) -> Vec<i32> {
        let mut flat = Vec::with_capacity(self.inner.edges().len() * 2);
        for e in self.inner.edges() {
            if e.start.is_some() && e.end.is_some() {
                flat.extend_from_slice(&[e.left as i32, e.right]);
            }
        }
        flat
    }
}
