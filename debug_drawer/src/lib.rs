//! Debug overlay drawing for Pinewood Engine.
//!
//! Queue solid boxes and rects from anywhere in a frame; once per frame the
//! queued shapes are flushed into the frame's display-list pool and the
//! queue starts over empty.
//!
//! # Architecture
//!
//! - [`DebugDrawer`]: Frame-scoped accumulator with fixed per-frame capacity
//! - [`DebugDrawerContext`]: Short-lived drawing context (created per-system)
//! - [`DebugDrawRenderer`]: Emits display-list commands into a [`GfxPool`](pinewood_graphics::GfxPool)
//!
//! # Usage
//!
//! ```ignore
//! // Setup (once)
//! let drawer = DebugDrawer::new();
//! let mut renderer = DebugDrawRenderer::new();
//!
//! // Each frame:
//! drawer.begin_frame();
//!
//! // Anywhere during the frame:
//! let mut ctx = drawer.context();
//! ctx.debug_box([0.0, 100.0, 0.0], [50.0, 50.0, 50.0]);
//! ctx.debug_rect([0.0; 3], [500.0, 0.0, 0.0], 10, 0xFF00FF00);
//! drop(ctx); // or let it go out of scope
//!
//! // At render time, after the scene:
//! renderer.update_view(camera_view_matrix);
//! let shapes = drawer.end_frame();
//! let stats = renderer.render(&shapes, &mut gfx_pool);
//! ```
//!
//! Shapes beyond capacity, or beyond what the pool can hold, are dropped
//! silently and reported in the frame's counters.

mod config;
mod display_lists;
mod draw_api;
mod drawer;
mod renderer;
mod shape;

pub use config::{DebugDrawConfig, MAX_DEBUG_BOXES, MAX_DEBUG_RECTS};
pub use display_lists::{BOX_BEGIN, DRAW_CUBOID, RECT_BEGIN, SECTION_END};
pub use drawer::{DebugDrawer, DebugDrawerContext, FrameShapes};
pub use renderer::{
    DebugDrawRenderer, RenderStats, ROTATION_POOL_SIZE, SECTION_POOL_SIZE, SHAPE_POOL_SIZE,
};
pub use shape::{DebugBox, DebugRect};
