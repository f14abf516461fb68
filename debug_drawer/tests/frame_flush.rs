//! End-to-end debug overlay frames: queue shapes, flush them into a
//! graphics pool and walk the resulting display list.

use pinewood_core::color::PackedColor;
use pinewood_core::math::{translation, Vec3};
use pinewood_debug_drawer::{DebugDrawer, DebugDrawRenderer, MAX_DEBUG_BOXES};
use pinewood_graphics::gbi::GeometryMode;
use pinewood_graphics::{DisplayListInterpreter, GfxPool, ResolvedTriangle};
use rstest::rstest;

fn flush(
    drawer: &DebugDrawer,
    renderer: &DebugDrawRenderer,
    pool: &mut GfxPool,
) -> Vec<ResolvedTriangle> {
    let shapes = drawer.end_frame();
    renderer.render(&shapes, pool);
    DisplayListInterpreter::new(pool)
        .run()
        .expect("debug display list should be valid")
}

fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 0.01, "{actual:?} != {expected:?}");
    }
}

#[test]
fn boxes_and_rects_become_triangles() {
    let drawer = DebugDrawer::new();
    let renderer = DebugDrawRenderer::new();
    let mut pool = GfxPool::default();

    drawer.begin_frame();
    {
        let mut ctx = drawer.context();
        ctx.debug_box([0.0; 3], [10.0; 3]);
        ctx.debug_box_pos([100.0, 0.0, 0.0], [120.0, 40.0, 20.0]);
        for i in 0..3 {
            ctx.debug_rect([0.0; 3], [i as f32 * 100.0, 0.0, 300.0], 5, PackedColor::GREEN);
        }
    }
    let triangles = flush(&drawer, &renderer, &mut pool);

    assert_eq!(triangles.len(), 5 * 12);
    assert!(triangles[..24].iter().all(|t| t.is_translucent()));
    assert!(triangles[24..].iter().all(|t| !t.is_translucent()));
    assert!(triangles
        .iter()
        .all(|t| !t.geometry_mode.contains(GeometryMode::LIGHTING)));
    assert_eq!(triangles[0].vertices[0].color, PackedColor::DEBUG_BOX.to_rgba());
    assert_eq!(triangles[30].vertices[0].color, [0, 0xFF, 0, 0xFF]);
}

#[test]
fn render_state_is_restored_after_flush() {
    let drawer = DebugDrawer::new();
    let renderer = DebugDrawRenderer::new();
    let mut pool = GfxPool::default();

    drawer.context().debug_box_rot([0.0; 3], [5.0; 3], 0x1000);
    drawer.context().debug_rect([0.0; 3], [0.0, 0.0, 50.0], 2, 0xFFFFFFFFu32);
    let shapes = drawer.end_frame();
    renderer.render(&shapes, &mut pool);

    let mut interpreter = DisplayListInterpreter::new(&pool);
    interpreter.run().unwrap();
    let state = interpreter.state();
    assert_eq!(state.modelview_depth(), 1);
    assert!(state.texture_on);
    assert!(state
        .geometry_mode
        .contains(GeometryMode::LIGHTING | GeometryMode::CULL_BACK));
}

#[rstest]
#[case(0, [110.0, 10.0, 10.0])]
#[case(0x4000, [110.0, 10.0, -10.0])]
#[case(-0x4000, [90.0, 10.0, 10.0])]
#[case(i16::MIN, [90.0, 10.0, -10.0])]
fn yaw_rotates_about_box_center(#[case] yaw: i16, #[case] expected: [f32; 3]) {
    let drawer = DebugDrawer::new();
    let renderer = DebugDrawRenderer::new();
    let mut pool = GfxPool::default();

    drawer
        .context()
        .debug_box_rot([100.0, 0.0, 0.0], [10.0, 10.0, 10.0], yaw);
    let triangles = flush(&drawer, &renderer, &mut pool);

    // First triangle starts at corner 5: (+x, +y, +z) before rotation.
    assert_close(triangles[0].vertices[0].position, expected);
}

#[test]
fn view_matrix_applies_to_all_shapes() {
    let drawer = DebugDrawer::new();
    let mut renderer = DebugDrawRenderer::new();
    let mut pool = GfxPool::default();

    renderer.update_view(translation(&Vec3::new(0.0, 0.0, -500.0)));
    drawer.context().debug_box([0.0; 3], [10.0; 3]);
    let triangles = flush(&drawer, &renderer, &mut pool);

    assert_close(triangles[0].vertices[0].position, [10.0, 10.0, -490.0]);
}

#[test]
fn over_capacity_frame_stays_within_pool() {
    let drawer = DebugDrawer::new();
    let renderer = DebugDrawRenderer::new();
    let mut pool = GfxPool::default();

    drawer.begin_frame();
    {
        let mut ctx = drawer.context();
        for i in 0..MAX_DEBUG_BOXES + 88 {
            ctx.debug_box([i as f32, 0.0, 0.0], [1.0; 3]);
        }
    }
    let shapes = drawer.end_frame();
    assert_eq!(shapes.boxes.len(), MAX_DEBUG_BOXES);
    assert_eq!(shapes.dropped_boxes, 88);

    let stats = renderer.render(&shapes, &mut pool);
    assert!(stats.boxes_drawn > 0);
    assert_eq!(stats.boxes_drawn + stats.shapes_skipped, MAX_DEBUG_BOXES);
    assert!(pool.used_bytes() <= pool.capacity());

    let triangles = DisplayListInterpreter::new(&pool).run().unwrap();
    assert_eq!(triangles.len(), stats.boxes_drawn * 12);
}

#[test]
fn every_frame_starts_empty() {
    let drawer = DebugDrawer::new();
    let renderer = DebugDrawRenderer::new();
    let mut pool = GfxPool::default();

    for frame in 0..3 {
        pool.reset();
        drawer.begin_frame();
        if frame == 0 {
            drawer.context().debug_box([0.0; 3], [1.0; 3]);
        }
        let triangles = flush(&drawer, &renderer, &mut pool);
        assert_eq!(triangles.len(), if frame == 0 { 12 } else { 0 });
    }
}
