//! Renders a relaxed tessellation to `voroplane.svg`.
//!
//! Run with `cargo run --example svg`.

use plotters::prelude::*;
use voroplane::{BorderMode, BoundingBox, Tessellation};

const SIZE: u32 = 800;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bounds = BoundingBox::new(0.0, 0.0, SIZE as f64, SIZE as f64);
    let mut tessellation = Tessellation::new(bounds, BorderMode::GenerateBorders)?;
    tessellation.random_generators(256);
    tessellation.calculate();
    for _ in 0..3 {
        tessellation.relax();
        tessellation.calculate();
    }

    let root = SVGBackend::new("voroplane.svg", (SIZE, SIZE)).into_drawing_area();
    root.fill(&WHITE)?;

    for cell in tessellation.cells() {
        if cell.is_empty() {
            continue;
        }
        let v = cell.vertices();
        let points: Vec<(i32, i32)> = v
            .chunks_exact(2)
            .map(|p| (p[0] as i32, p[1] as i32))
            .collect();
        let shade = (cell.area() / (SIZE as f64 * SIZE as f64) * 40_000.0).min(255.0) as u8;
        root.draw(&Polygon::new(
            points.clone(),
            RGBColor(120, 160, shade).mix(0.35).filled(),
        ))?;
        let mut outline = points;
        if let Some(&first) = outline.first() {
            outline.push(first);
        }
        root.draw(&PathElement::new(outline, BLACK.stroke_width(1)))?;
    }

    let generators = tessellation.generators();
    for g in generators.chunks_exact(2) {
        root.draw(&Circle::new((g[0] as i32, g[1] as i32), 2, RED.filled()))?;
    }

    root.present()?;
    println!("wrote voroplane.svg");
    Ok(())
}
