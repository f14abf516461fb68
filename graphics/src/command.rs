use crate::gbi::{CombineMode, GeometryMode, MatrixFlags, RenderMode};

/// Size every command occupies in the graphics pool.
pub const GFX_SIZE: usize = 8;

/// Reference to vertices allocated in a [`GfxPool`](crate::GfxPool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VtxHandle {
    pub(crate) generation: u64,
    pub(crate) offset: u32,
    pub(crate) len: u32,
}

impl VtxHandle {
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Reference to a matrix allocated in a [`GfxPool`](crate::GfxPool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MtxHandle {
    pub(crate) generation: u64,
    pub(crate) index: u32,
}

/// One display-list command.
///
/// Dynamic commands reference per-frame pool data through handles; static
/// display lists are plain `&'static [Gfx]` slices ending in
/// [`EndDisplayList`](Gfx::EndDisplayList) and are invoked with
/// [`DisplayList`](Gfx::DisplayList).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gfx {
    /// Wait for in-flight primitives before changing render state.
    PipeSync,
    SetRenderMode(RenderMode, RenderMode),
    SetGeometryMode(GeometryMode),
    ClearGeometryMode(GeometryMode),
    Texture { on: bool },
    SetCombineMode(CombineMode, CombineMode),
    Matrix(MtxHandle, MatrixFlags),
    /// Restore the previously pushed modelview matrix.
    PopMatrix,
    /// Load `count` vertices from `buffer` into the vertex cache at `v0`.
    Vertex { buffer: VtxHandle, count: u8, v0: u8 },
    Triangle1([u8; 3]),
    Triangle2([u8; 3], [u8; 3]),
    /// Call a static display list and return.
    DisplayList(&'static [Gfx]),
    EndDisplayList,
}

impl Gfx {
    /// Shorthand for two triangles sharing one command.
    pub const fn tri2(a: [u8; 3], b: [u8; 3]) -> Self {
        Self::Triangle2(a, b)
    }

    /// Number of triangles this command draws.
    pub fn triangle_count(&self) -> usize {
        match self {
            Self::Triangle1(_) => 1,
            Self::Triangle2(..) => 2,
            _ => 0,
        }
    }
}
