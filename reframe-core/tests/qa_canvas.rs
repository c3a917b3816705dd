//! Viewport and layout properties, and persistence across restarts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reframe_core::layout::DEFAULT_CENTER;
use reframe_core::viewport::{MAX_ZOOM, MIN_ZOOM};
use reframe_core::{
    CanvasInput, FactCanvas, FactGraph, JsonFileStore, LayoutMode, LayoutPolicy, Point,
    RadialLayout, Size, Viewport,
};
use tempfile::tempdir;

const SURFACE: Size = Size::new(1024.0, 768.0);

#[test]
fn test_random_wheel_sequences_stay_in_bounds_and_anchor() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut viewport = Viewport::default();

    for _ in 0..500 {
        let anchor = Point::new(rng.gen_range(0.0..1024.0), rng.gen_range(0.0..768.0));
        let delta = rng.gen_range(-300.0..300.0);
        let before = viewport.screen_to_world(anchor);

        viewport.zoom_by(delta, anchor);

        assert!(viewport.zoom() >= MIN_ZOOM && viewport.zoom() <= MAX_ZOOM);
        let after = viewport.screen_to_world(anchor);
        assert!(before.distance(after) < 1e-6, "anchor drifted");
    }
}

#[test]
fn test_world_screen_round_trip() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..200 {
        let viewport = Viewport::new(
            Point::new(rng.gen_range(-2000.0..2000.0), rng.gen_range(-2000.0..2000.0)),
            rng.gen_range(MIN_ZOOM..MAX_ZOOM),
        );
        let world = Point::new(rng.gen_range(-5000.0..5000.0), rng.gen_range(-5000.0..5000.0));
        let back = viewport.screen_to_world(viewport.world_to_screen(world));
        assert!(back.distance(world) < 1e-6);
    }
}

#[test]
fn test_radial_centres_lie_on_circle() {
    let policy = RadialLayout::default();
    for n in 2..12 {
        let mut graph = FactGraph::new();
        graph.set_original("Root.");
        for i in 0..n {
            graph.append_reframed(format!("r{i}"), format!("L{i}")).unwrap();
        }

        let layout = policy.layout(&graph);
        assert_eq!(layout.placements.len(), n + 1);
        assert_eq!(layout.edges.len(), n);
        let radius = policy.radius_for(n);
        for placement in &layout.placements[1..] {
            let r = placement.center().distance(DEFAULT_CENTER);
            assert!((r - radius).abs() < 1e-9);
        }
    }
}

#[test]
fn test_state_survives_restart() {
    let dir = tempdir().unwrap();

    let (graph, viewport) = {
        let mut canvas =
            FactCanvas::open(JsonFileStore::in_dir(dir.path()), SURFACE, LayoutMode::Radial);
        canvas.set_original("Glaciers lost 267 gigatonnes of ice per year since 2000.");
        canvas.append_reframed("Ice as a slow ledger.", "Mathematics").unwrap();
        canvas.handle(CanvasInput::Wheel {
            delta: -1.0,
            at: Point::new(300.0, 200.0),
        });
        canvas.handle(CanvasInput::PointerDown(Point::new(10.0, 10.0)));
        canvas.handle(CanvasInput::PointerMove(Point::new(60.0, 40.0)));
        canvas.handle(CanvasInput::PointerUp);
        (canvas.graph().clone(), *canvas.viewport())
    };

    let canvas = FactCanvas::open(JsonFileStore::in_dir(dir.path()), SURFACE, LayoutMode::Radial);
    assert_eq!(canvas.graph(), &graph);
    assert_eq!(*canvas.viewport(), viewport);
}

#[test]
fn test_corrupt_file_recovers_defaults() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(JsonFileStore::FILE_NAME), "]]]").unwrap();

    let canvas = FactCanvas::open(JsonFileStore::in_dir(dir.path()), SURFACE, LayoutMode::Stacked);
    assert!(canvas.graph().is_empty());
    assert_eq!(*canvas.viewport(), Viewport::default());
}
