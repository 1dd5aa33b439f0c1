use voroplane::{BorderMode, BoundingBox, Point, Tessellation, tessellate};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn two_site_reference_diagram() {
    let bounds = BoundingBox::new(0.0, 0.0, 1000.0, 1000.0);
    let sites = [500.0, 700.0, 500.0, 300.0];

    let open = tessellate(&sites, bounds, BorderMode::DoNotGenerateBorders).unwrap();
    assert_eq!(open.edges.len(), 1);
    let e = &open.edges[0];
    let s = e.start.unwrap();
    let t = e.end.unwrap();
    assert!(approx(s.x, 0.0) && approx(s.y, 500.0));
    assert!(approx(t.x, 1000.0) && approx(t.y, 500.0));
    for cell in &open.cells {
        assert_eq!(cell.points_count(), 2);
    }

    let closed = tessellate(&sites, bounds, BorderMode::GenerateBorders).unwrap();
    // One bisector plus three border segments per cell.
    assert_eq!(closed.edges.len(), 7);
    for cell in &closed.cells {
        assert!(cell.is_closed());
        assert_eq!(cell.points_count(), 4);
        assert!(approx(cell.area(), 500_000.0));
    }
    // Each cell contains its own generator and not the other.
    assert!(closed.cells[0].contains(500.0, 700.0));
    assert!(!closed.cells[0].contains(500.0, 300.0));
    assert!(closed.cells[1].contains(500.0, 300.0));
}

#[test]
fn workflow_set_calculate_query() {
    let bounds = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
    let mut t = Tessellation::new(bounds, BorderMode::GenerateBorders).unwrap();
    t.set_generators(&[20.0, 20.0, 80.0, 25.0, 30.0, 75.0, 70.0, 70.0]);
    assert_eq!(t.count_generators(), 4);
    assert_eq!(t.count_cells(), 0);

    t.calculate();
    assert_eq!(t.count_cells(), 4);
    for i in 0..4 {
        let cell = t.get_cell(i).unwrap();
        assert_eq!(cell.id(), i);
        assert!(cell.is_closed());
        let g = t.get_generator(i).unwrap();
        assert!(cell.contains(g[0], g[1]));
    }
    assert!(t.get_cell(4).is_none());

    // Moving one generator invalidates the result until recomputed.
    t.set_generator(0, 25.0, 30.0);
    assert_eq!(t.count_cells(), 0);
    t.calculate();
    assert_eq!(t.count_cells(), 4);
}

#[test]
fn areas_sum_to_box_area() {
    let bounds = BoundingBox::new(-200.0, -100.0, 300.0, 400.0);
    let mut t = Tessellation::new(bounds, BorderMode::GenerateBorders).unwrap();
    t.random_generators(120);
    t.calculate();
    let total: f64 = (0..t.count_cells())
        .map(|i| t.get_cell(i).unwrap().area())
        .sum();
    assert!(
        (total - bounds.area()).abs() < 1e-6 * bounds.area(),
        "total cell area {total} differs from box area {}",
        bounds.area()
    );
}

#[test]
fn relaxation_spreads_generators() {
    let bounds = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
    let mut t = Tessellation::new(bounds, BorderMode::GenerateBorders).unwrap();
    // Clustered start.
    t.set_generators(&[10.0, 10.0, 12.0, 10.0, 10.0, 12.0, 13.0, 13.0]);
    t.calculate();

    let spread = |gens: &[f64]| -> f64 {
        let n = gens.len() / 2;
        let mut min = f64::INFINITY;
        for i in 0..n {
            for j in i + 1..n {
                let a = Point::new(gens[2 * i], gens[2 * i + 1]);
                let b = Point::new(gens[2 * j], gens[2 * j + 1]);
                min = min.min(a.dist(&b));
            }
        }
        min
    };
    let before = spread(&t.generators());
    for _ in 0..10 {
        t.relax();
        t.calculate();
    }
    let after = spread(&t.generators());
    assert!(
        after > before * 2.0,
        "relaxation left generators clustered: {before} -> {after}"
    );
    // The partition is still exact after relaxing.
    let total: f64 = (0..t.count_cells())
        .map(|i| t.get_cell(i).unwrap().area())
        .sum();
    assert!((total - bounds.area()).abs() < 1e-6 * bounds.area());
}

#[test]
fn deterministic_output_for_equal_input() {
    let bounds = BoundingBox::new(0.0, 0.0, 500.0, 500.0);
    let sites = [
        37.0, 411.0, 255.0, 99.0, 401.0, 280.0, 133.0, 156.0, 311.0, 477.0, 470.0, 33.0,
    ];
    let a = tessellate(&sites, bounds, BorderMode::GenerateBorders).unwrap();
    let b = tessellate(&sites, bounds, BorderMode::GenerateBorders).unwrap();
    assert_eq!(a.edges.len(), b.edges.len());
    for (ea, eb) in a.edges.iter().zip(b.edges.iter()) {
        assert_eq!(ea, eb);
    }
    for (ca, cb) in a.cells.iter().zip(b.cells.iter()) {
        assert_eq!(ca, cb);
    }
}
