use pinewood_core::math::{binary_angle_to_radians, rotation_y, translation, widen_vec3, Mat4};
use pinewood_graphics::gbi::MatrixFlags;
use pinewood_graphics::{Gfx, GfxPool, GraphicsError, Mtx, Vtx, GFX_SIZE, MTX_SIZE, VTX_SIZE};

use crate::display_lists::{BOX_BEGIN, DRAW_CUBOID, RECT_BEGIN, SECTION_END};
use crate::drawer::FrameShapes;
use crate::shape::{DebugBox, DebugRect};

/// Pool bytes for one unrotated shape: its vertices, the vertex load and
/// the call into [`DRAW_CUBOID`].
pub const SHAPE_POOL_SIZE: usize = 8 * VTX_SIZE + 2 * GFX_SIZE;

/// Extra pool bytes for a yawed box: three matrices, three loads and a pop.
pub const ROTATION_POOL_SIZE: usize = 3 * MTX_SIZE + 4 * GFX_SIZE;

/// Pool bytes for a section's setup and teardown: the view matrix, its
/// load, the begin and end calls and the final pop.
pub const SECTION_POOL_SIZE: usize = MTX_SIZE + 4 * GFX_SIZE;

/// Commands still owed once a section is open: end call and pop.
const SECTION_TAIL_SIZE: usize = 2 * GFX_SIZE;

/// What happened while flushing one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub boxes_drawn: usize,
    pub rects_drawn: usize,
    /// Shapes left out because the pool ran short.
    pub shapes_skipped: usize,
    /// Whole sections (boxes or rects) left out because the pool ran short.
    pub sections_skipped: usize,
    /// Pool bytes consumed by this flush.
    pub bytes_used: usize,
}

impl RenderStats {
    pub fn shapes_drawn(&self) -> usize {
        self.boxes_drawn + self.rects_drawn
    }
}

/// A shape kind the renderer knows how to emit.
trait DebugShape {
    const KIND: &'static str;
    const BEGIN: &'static [Gfx];

    fn pool_size(&self) -> usize;
    fn emit(&self, pool: &mut GfxPool) -> Result<(), GraphicsError>;
}

impl DebugShape for DebugBox {
    const KIND: &'static str = "boxes";
    const BEGIN: &'static [Gfx] = BOX_BEGIN;

    fn pool_size(&self) -> usize {
        if self.is_rotated() {
            SHAPE_POOL_SIZE + ROTATION_POOL_SIZE
        } else {
            SHAPE_POOL_SIZE
        }
    }

    fn emit(&self, pool: &mut GfxPool) -> Result<(), GraphicsError> {
        if !self.is_rotated() {
            return emit_cuboid(pool, &self.vertices());
        }

        let center = widen_vec3(self.center);
        let matrices = [
            (translation(&center), MatrixFlags::MUL | MatrixFlags::PUSH),
            (rotation_y(binary_angle_to_radians(self.yaw)), MatrixFlags::MUL),
            (translation(&-center), MatrixFlags::MUL),
        ];
        for (matrix, flags) in matrices {
            let handle = pool
                .alloc_matrix(Mtx::from_mat4(&matrix))
                .ok_or_else(|| exhausted(pool, MTX_SIZE))?;
            pool.push(Gfx::Matrix(handle, flags))?;
        }
        emit_cuboid(pool, &self.vertices())?;
        pool.push(Gfx::PopMatrix)
    }
}

impl DebugShape for DebugRect {
    const KIND: &'static str = "rects";
    const BEGIN: &'static [Gfx] = RECT_BEGIN;

    fn pool_size(&self) -> usize {
        SHAPE_POOL_SIZE
    }

    fn emit(&self, pool: &mut GfxPool) -> Result<(), GraphicsError> {
        emit_cuboid(pool, &self.vertices())
    }
}

fn emit_cuboid(pool: &mut GfxPool, vertices: &[Vtx; 8]) -> Result<(), GraphicsError> {
    let buffer = pool
        .alloc_vertices(vertices)
        .ok_or_else(|| exhausted(pool, 8 * VTX_SIZE))?;
    pool.push(Gfx::Vertex {
        buffer,
        count: 8,
        v0: 0,
    })?;
    pool.push(Gfx::DisplayList(DRAW_CUBOID))
}

fn exhausted(pool: &GfxPool, requested: usize) -> GraphicsError {
    GraphicsError::PoolExhausted {
        requested,
        available: pool.remaining_bytes(),
    }
}

/// Flushes a frame's debug shapes into the graphics pool.
///
/// Create once. Each frame, set the camera with
/// [`update_view`](Self::update_view) and call [`render`](Self::render)
/// with the shapes from [`DebugDrawer::end_frame`](crate::DebugDrawer::end_frame).
pub struct DebugDrawRenderer {
    view: Mat4,
}

impl DebugDrawRenderer {
    pub fn new() -> Self {
        Self {
            view: Mat4::identity(),
        }
    }

    /// Set the camera (world to view) matrix debug shapes are drawn with.
    pub fn update_view(&mut self, view: Mat4) {
        self.view = view;
    }

    /// Append draw commands for `shapes` to `pool`.
    ///
    /// Boxes are emitted before rects. A kind with no shapes costs nothing.
    /// If the pool cannot fit a kind's setup plus one shape, that kind is
    /// skipped for the frame; individual shapes that no longer fit are
    /// skipped too. Nothing here fails: shortages only show up in the
    /// returned stats.
    pub fn render(&self, shapes: &FrameShapes, pool: &mut GfxPool) -> RenderStats {
        let before = pool.used_bytes();
        let mut stats = RenderStats::default();
        stats.boxes_drawn = self.render_section(&shapes.boxes, pool, &mut stats);
        stats.rects_drawn = self.render_section(&shapes.rects, pool, &mut stats);
        stats.bytes_used = pool.used_bytes() - before;
        stats
    }

    fn render_section<S: DebugShape>(
        &self,
        shapes: &[S],
        pool: &mut GfxPool,
        stats: &mut RenderStats,
    ) -> usize {
        if shapes.is_empty() {
            return 0;
        }

        if !pool.has_room(SECTION_POOL_SIZE + SHAPE_POOL_SIZE) {
            log::debug!(
                "Not enough graphics pool for debug {} ({} bytes free); skipping {}",
                S::KIND,
                pool.remaining_bytes(),
                shapes.len()
            );
            stats.sections_skipped += 1;
            stats.shapes_skipped += shapes.len();
            return 0;
        }

        match self.emit_section(shapes, pool, stats) {
            Ok(drawn) => drawn,
            Err(err) => {
                // Unreachable while the budget checks above hold.
                log::warn!("Debug {} flush aborted: {err}", S::KIND);
                0
            }
        }
    }

    fn emit_section<S: DebugShape>(
        &self,
        shapes: &[S],
        pool: &mut GfxPool,
        stats: &mut RenderStats,
    ) -> Result<usize, GraphicsError> {
        let view = pool
            .alloc_matrix(Mtx::from_mat4(&self.view))
            .ok_or_else(|| exhausted(pool, MTX_SIZE))?;
        pool.push(Gfx::Matrix(view, MatrixFlags::LOAD | MatrixFlags::PUSH))?;
        pool.push(Gfx::DisplayList(S::BEGIN))?;

        let mut drawn = 0;
        for shape in shapes {
            if !pool.has_room(shape.pool_size() + SECTION_TAIL_SIZE) {
                stats.shapes_skipped += 1;
                continue;
            }
            shape.emit(pool)?;
            drawn += 1;
        }

        pool.push(Gfx::DisplayList(SECTION_END))?;
        pool.push(Gfx::PopMatrix)?;
        Ok(drawn)
    }
}

impl Default for DebugDrawRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinewood_core::color::PackedColor;
    use pinewood_graphics::DisplayListInterpreter;

    fn unit_box(yaw: i16) -> DebugBox {
        DebugBox {
            center: [0, 0, 0],
            bounds: [10, 10, 10],
            yaw,
            color: PackedColor::DEBUG_BOX,
        }
    }

    fn rect() -> DebugRect {
        DebugRect {
            start: [0, 0, 0],
            end: [0, 0, 100],
            width: 5,
            color: PackedColor::GREEN,
        }
    }

    fn frame(boxes: Vec<DebugBox>, rects: Vec<DebugRect>) -> FrameShapes {
        FrameShapes {
            boxes,
            rects,
            ..FrameShapes::default()
        }
    }

    #[test]
    fn test_empty_frame_emits_nothing() {
        let mut pool = GfxPool::default();
        let stats = DebugDrawRenderer::new().render(&FrameShapes::default(), &mut pool);
        assert_eq!(stats, RenderStats::default());
        assert!(pool.commands().is_empty());
    }

    #[test]
    fn test_box_section_layout() {
        let mut pool = GfxPool::default();
        let shapes = frame(vec![unit_box(0)], vec![]);
        let stats = DebugDrawRenderer::new().render(&shapes, &mut pool);
        assert_eq!(stats.boxes_drawn, 1);
        assert_eq!(stats.bytes_used, SECTION_POOL_SIZE + SHAPE_POOL_SIZE);

        let commands = pool.commands();
        assert_eq!(commands.len(), 6);
        assert!(matches!(
            commands[0],
            Gfx::Matrix(_, flags) if flags == MatrixFlags::LOAD | MatrixFlags::PUSH
        ));
        assert_eq!(commands[1], Gfx::DisplayList(BOX_BEGIN));
        assert!(matches!(commands[2], Gfx::Vertex { count: 8, v0: 0, .. }));
        assert_eq!(commands[3], Gfx::DisplayList(DRAW_CUBOID));
        assert_eq!(commands[4], Gfx::DisplayList(SECTION_END));
        assert_eq!(commands[5], Gfx::PopMatrix);
    }

    #[test]
    fn test_rotated_box_cost() {
        let mut pool = GfxPool::default();
        let shapes = frame(vec![unit_box(0x4000)], vec![]);
        let stats = DebugDrawRenderer::new().render(&shapes, &mut pool);
        assert_eq!(
            stats.bytes_used,
            SECTION_POOL_SIZE + SHAPE_POOL_SIZE + ROTATION_POOL_SIZE
        );
    }

    #[test]
    fn test_pool_too_small_for_section() {
        let mut pool = GfxPool::new(SECTION_POOL_SIZE + SHAPE_POOL_SIZE - 1);
        let shapes = frame(vec![unit_box(0); 3], vec![rect()]);
        let stats = DebugDrawRenderer::new().render(&shapes, &mut pool);
        assert_eq!(stats.shapes_drawn(), 0);
        assert_eq!(stats.sections_skipped, 2);
        assert_eq!(stats.shapes_skipped, 4);
        assert_eq!(pool.used_bytes(), 0);
    }

    #[test]
    fn test_partial_section() {
        // Room for the setup and exactly two shapes.
        let mut pool = GfxPool::new(SECTION_POOL_SIZE + 2 * SHAPE_POOL_SIZE);
        let shapes = frame(vec![unit_box(0); 5], vec![rect()]);
        let stats = DebugDrawRenderer::new().render(&shapes, &mut pool);
        assert_eq!(stats.boxes_drawn, 2);
        assert_eq!(stats.rects_drawn, 0);
        assert_eq!(stats.shapes_skipped, 4);
        assert_eq!(stats.sections_skipped, 1);

        // The section is still closed properly.
        assert_eq!(pool.commands().last(), Some(&Gfx::PopMatrix));
        assert!(DisplayListInterpreter::new(&pool).run().is_ok());
    }

    #[test]
    fn test_rotated_box_skipped_when_only_plain_fits() {
        let mut pool = GfxPool::new(SECTION_POOL_SIZE + SHAPE_POOL_SIZE);
        let stats = DebugDrawRenderer::new().render(
            &frame(vec![unit_box(0x1000), unit_box(0)], vec![]),
            &mut pool,
        );
        assert_eq!(stats.boxes_drawn, 1);
        assert_eq!(stats.shapes_skipped, 1);
    }
}
