use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use pinewood_core::arena::FrameArena;
use pinewood_core::color::PackedColor;

use crate::config::DebugDrawConfig;
use crate::shape::{DebugBox, DebugRect};

/// Shapes accumulated for the open frame.
struct FrameData {
    boxes: FrameArena<DebugBox>,
    rects: FrameArena<DebugRect>,
    open: bool,
}

impl FrameData {
    fn new(config: &DebugDrawConfig) -> Self {
        Self {
            boxes: FrameArena::with_capacity(config.max_boxes),
            rects: FrameArena::with_capacity(config.max_rects),
            open: true,
        }
    }
}

/// Everything queued during one frame, ready to be rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameShapes {
    pub generation: u64,
    pub boxes: Vec<DebugBox>,
    pub rects: Vec<DebugRect>,
    /// Boxes rejected because the frame was at capacity.
    pub dropped_boxes: usize,
    /// Rects rejected because the frame was at capacity.
    pub dropped_rects: usize,
}

impl FrameShapes {
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.rects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.boxes.len() + self.rects.len()
    }
}

/// Frame-scoped debug shape accumulator.
///
/// Shapes are collected per frame generation:
/// - [`begin_frame`](Self::begin_frame) opens a new, empty generation
/// - [`DebugDrawerContext`]s queue shapes and flush them on drop
/// - [`end_frame`](Self::end_frame) closes the generation and hands its
///   shapes to the renderer
///
/// Each generation holds at most `max_boxes` boxes and `max_rects` rects;
/// anything beyond that is dropped without error. Contexts that flush after
/// their generation was closed are discarded.
pub struct DebugDrawer {
    config: DebugDrawConfig,
    current_generation: AtomicU64,
    frame: Mutex<FrameData>,
}

impl DebugDrawer {
    /// Create a drawer with the default capacities. Generation 0 is open.
    pub fn new() -> Self {
        Self::with_config(DebugDrawConfig::default())
    }

    pub fn with_config(config: DebugDrawConfig) -> Self {
        let frame = FrameData::new(&config);
        Self {
            config,
            current_generation: AtomicU64::new(0),
            frame: Mutex::new(frame),
        }
    }

    pub fn config(&self) -> &DebugDrawConfig {
        &self.config
    }

    /// Get the current frame generation.
    pub fn current_generation(&self) -> u64 {
        self.current_generation.load(Ordering::Acquire)
    }

    /// Open the next frame generation with empty shape lists.
    ///
    /// Shapes still sitting in an unfinished frame are discarded.
    pub fn begin_frame(&self) {
        let mut frame = self.frame.lock();
        if frame.open && !(frame.boxes.is_empty() && frame.rects.is_empty()) {
            log::debug!(
                "DebugDrawer generation {} was never ended; discarding {} shapes",
                frame.boxes.generation(),
                frame.boxes.len() + frame.rects.len()
            );
        }
        frame.boxes.begin_generation();
        let generation = frame.rects.begin_generation();
        frame.open = true;
        self.current_generation.store(generation, Ordering::Release);
    }

    /// Close the current generation and take its shapes and drop counts.
    ///
    /// The drawer keeps its allocations. Until the next
    /// [`begin_frame`](Self::begin_frame) new shapes are discarded.
    pub fn end_frame(&self) -> FrameShapes {
        let mut frame = self.frame.lock();
        frame.open = false;
        let shapes = FrameShapes {
            generation: frame.boxes.generation(),
            boxes: frame.boxes.drain_items(),
            rects: frame.rects.drain_items(),
            dropped_boxes: frame.boxes.take_dropped(),
            dropped_rects: frame.rects.take_dropped(),
        };
        if shapes.dropped_boxes > 0 || shapes.dropped_rects > 0 {
            log::debug!(
                "DebugDrawer generation {} over capacity: dropped {} boxes, {} rects",
                shapes.generation,
                shapes.dropped_boxes,
                shapes.dropped_rects
            );
        }
        shapes
    }

    /// Create a drawing context for the current generation.
    ///
    /// The context collects shapes locally and flushes them to the
    /// drawer on [`Drop`]. The mutex is only held briefly during the flush.
    pub fn context(&self) -> DebugDrawerContext<'_> {
        let generation = self.current_generation.load(Ordering::Acquire);
        DebugDrawerContext {
            drawer: self,
            generation,
            box_color: self.config.default_box_color,
            boxes: Vec::new(),
            rects: Vec::new(),
            dropped_boxes: 0,
            dropped_rects: 0,
        }
    }

    /// Append shapes from a finished context.
    fn flush(&self, ctx: &mut DebugDrawerContext<'_>) {
        let mut frame = self.frame.lock();
        let current = frame.boxes.generation();
        if ctx.generation != current || !frame.open {
            if !ctx.boxes.is_empty() || !ctx.rects.is_empty() {
                log::warn!(
                    "DebugDrawerContext flushed for generation {} but current is {} ({}); discarding",
                    ctx.generation,
                    current,
                    if frame.open { "open" } else { "ended" }
                );
            }
            return;
        }
        frame.boxes.record_dropped(ctx.dropped_boxes);
        frame.rects.record_dropped(ctx.dropped_rects);
        frame.boxes.extend(ctx.boxes.drain(..));
        frame.rects.extend(ctx.rects.drain(..));
    }
}

impl Default for DebugDrawer {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(DebugDrawer: Send, Sync);

/// A short-lived drawing context.
///
/// Collects debug shapes locally. On [`Drop`], flushes them
/// to the parent [`DebugDrawer`] under a brief lock.
///
/// Obtain via [`DebugDrawer::context()`].
pub struct DebugDrawerContext<'a> {
    drawer: &'a DebugDrawer,
    generation: u64,
    pub(crate) box_color: PackedColor,
    boxes: Vec<DebugBox>,
    rects: Vec<DebugRect>,
    dropped_boxes: usize,
    dropped_rects: usize,
}

impl DebugDrawerContext<'_> {
    /// Queue a box. Dropped if this context alone already reached capacity.
    #[inline]
    pub(crate) fn push_box(&mut self, shape: DebugBox) {
        if self.boxes.len() >= self.drawer.config.max_boxes {
            self.dropped_boxes += 1;
            return;
        }
        self.boxes.push(shape);
    }

    /// Queue a rect. Dropped if this context alone already reached capacity.
    #[inline]
    pub(crate) fn push_rect(&mut self, shape: DebugRect) {
        if self.rects.len() >= self.drawer.config.max_rects {
            self.dropped_rects += 1;
            return;
        }
        self.rects.push(shape);
    }

    /// Generation this context writes to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for DebugDrawerContext<'_> {
    fn drop(&mut self) {
        let drawer = self.drawer;
        drawer.flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_drawer(max_boxes: usize, max_rects: usize) -> DebugDrawer {
        DebugDrawer::with_config(DebugDrawConfig {
            max_boxes,
            max_rects,
            ..DebugDrawConfig::default()
        })
    }

    #[test]
    fn test_new_drawer() {
        let drawer = DebugDrawer::new();
        assert_eq!(drawer.current_generation(), 0);
        assert!(drawer.end_frame().is_empty());
    }

    #[test]
    fn test_begin_frame_advances_generation() {
        let drawer = DebugDrawer::new();
        drawer.begin_frame();
        assert_eq!(drawer.current_generation(), 1);
        drawer.begin_frame();
        assert_eq!(drawer.current_generation(), 2);
    }

    #[test]
    fn test_context_flush() {
        let drawer = DebugDrawer::new();
        drawer.begin_frame();

        {
            let mut ctx = drawer.context();
            ctx.debug_box([0.0; 3], [10.0; 3]);
            ctx.debug_rect([0.0; 3], [100.0, 0.0, 0.0], 4, 0xFF00FF00);
        } // ctx dropped, shapes flushed

        let shapes = drawer.end_frame();
        assert_eq!(shapes.generation, 1);
        assert_eq!(shapes.boxes.len(), 1);
        assert_eq!(shapes.rects.len(), 1);
    }

    #[test]
    fn test_frame_starts_empty() {
        let drawer = DebugDrawer::new();
        drawer.begin_frame();
        drawer.context().debug_box([0.0; 3], [1.0; 3]);
        // No end_frame: the next frame must not see the stale box.
        drawer.begin_frame();
        assert!(drawer.end_frame().is_empty());
    }

    #[test]
    fn test_end_frame_takes_shapes_once() {
        let drawer = DebugDrawer::new();
        drawer.begin_frame();
        drawer.context().debug_box([0.0; 3], [1.0; 3]);
        assert_eq!(drawer.end_frame().boxes.len(), 1);
        assert!(drawer.end_frame().is_empty());
    }

    #[test]
    fn test_end_frame_takes_drop_counts_once() {
        let drawer = small_drawer(1, 0);
        drawer.begin_frame();
        {
            let mut ctx = drawer.context();
            for _ in 0..3 {
                ctx.debug_box([0.0; 3], [1.0; 3]);
            }
            ctx.debug_rect([0.0; 3], [1.0, 0.0, 0.0], 1, 0xFFFFFFFF);
        }

        let first = drawer.end_frame();
        assert_eq!(first.boxes.len(), 1);
        assert_eq!(first.dropped_boxes, 2);
        assert_eq!(first.dropped_rects, 1);

        let second = drawer.end_frame();
        assert!(second.is_empty());
        assert_eq!(second.dropped_boxes, 0);
        assert_eq!(second.dropped_rects, 0);
    }

    #[test]
    fn test_stale_context_discarded() {
        let drawer = DebugDrawer::new();
        let mut ctx = drawer.context(); // generation 0
        ctx.debug_box([0.0; 3], [1.0; 3]);

        drawer.begin_frame(); // generation 1
        drop(ctx); // tries to flush to generation 0 -> discarded

        assert!(drawer.end_frame().is_empty());
    }

    #[test]
    fn test_context_after_end_frame_discarded() {
        let drawer = DebugDrawer::new();
        drawer.begin_frame();
        let _ = drawer.end_frame();
        drawer.context().debug_box([0.0; 3], [1.0; 3]);

        drawer.begin_frame();
        assert!(drawer.end_frame().is_empty());
    }

    #[test]
    fn test_multiple_contexts() {
        let drawer = DebugDrawer::new();
        drawer.begin_frame();

        {
            let mut ctx1 = drawer.context();
            ctx1.debug_box([0.0; 3], [1.0; 3]);

            let mut ctx2 = drawer.context();
            ctx2.debug_box([2.0; 3], [1.0; 3]);
            ctx2.debug_box([4.0; 3], [1.0; 3]);
        }

        assert_eq!(drawer.end_frame().boxes.len(), 3);
    }

    #[test]
    fn test_capacity_truncates_across_contexts() {
        let drawer = small_drawer(3, 2);
        drawer.begin_frame();
        {
            let mut ctx = drawer.context();
            for i in 0..2 {
                ctx.debug_box([i as f32; 3], [1.0; 3]);
            }
        }
        {
            let mut ctx = drawer.context();
            for i in 0..5 {
                ctx.debug_box([i as f32; 3], [1.0; 3]);
                ctx.debug_rect([0.0; 3], [i as f32, 0.0, 0.0], 1, 0xFFFFFFFF);
            }
        }

        let shapes = drawer.end_frame();
        assert_eq!(shapes.boxes.len(), 3);
        assert_eq!(shapes.rects.len(), 2);
        // Context two: 2 boxes dropped locally + 2 rejected at flush.
        assert_eq!(shapes.dropped_boxes, 4);
        assert_eq!(shapes.dropped_rects, 3);
    }

    #[test]
    fn test_first_come_first_kept() {
        let drawer = small_drawer(2, 0);
        drawer.begin_frame();
        {
            let mut ctx = drawer.context();
            ctx.debug_box([1.0; 3], [1.0; 3]);
            ctx.debug_box([2.0; 3], [1.0; 3]);
            ctx.debug_box([3.0; 3], [1.0; 3]);
        }
        let shapes = drawer.end_frame();
        assert_eq!(shapes.boxes[0].center, [1, 1, 1]);
        assert_eq!(shapes.boxes[1].center, [2, 2, 2]);
    }
}
