//! Render-state vocabulary for display-list commands.

use bitflags::bitflags;

bitflags! {
    /// Per-primitive geometry processing switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GeometryMode: u32 {
        /// Depth-test and depth-write.
        const ZBUFFER = 1 << 0;
        /// Use vertex colours.
        const SHADE = 1 << 2;
        /// Interpolate colours across the triangle.
        const SHADING_SMOOTH = 1 << 9;
        /// Discard front faces.
        const CULL_FRONT = 1 << 12;
        /// Discard back faces.
        const CULL_BACK = 1 << 13;
        const FOG = 1 << 16;
        /// Vertex colours are normals to be lit.
        const LIGHTING = 1 << 17;
        const TEXTURE_GEN = 1 << 18;
    }
}

impl GeometryMode {
    /// State a fresh frame starts in.
    pub const DEFAULT: Self = Self::ZBUFFER
        .union(Self::SHADE)
        .union(Self::SHADING_SMOOTH)
        .union(Self::CULL_BACK)
        .union(Self::LIGHTING);
}

bitflags! {
    /// Flags for a matrix load.
    ///
    /// Without `PROJECTION` the matrix targets the modelview stack. Without
    /// `LOAD` it multiplies the current top. `PUSH` saves the current top
    /// first (modelview only).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MatrixFlags: u8 {
        const PROJECTION = 1 << 0;
        const LOAD = 1 << 1;
        const PUSH = 1 << 2;
    }
}

impl MatrixFlags {
    pub const MODELVIEW: Self = Self::empty();
    pub const MUL: Self = Self::empty();
    pub const NOPUSH: Self = Self::empty();
}

/// Blender configuration for one pipeline cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    /// Pass-through second cycle.
    #[default]
    NoOp,
    /// Opaque, z-buffered.
    ZbOpaSurf,
    /// Translucent, z-buffered (depth tested, not written).
    ZbXluSurf,
    /// Anti-aliased opaque, z-buffered.
    AaZbOpaSurf,
}

impl RenderMode {
    pub fn is_translucent(self) -> bool {
        matches!(self, Self::ZbXluSurf)
    }
}

/// Colour combiner configuration for one pipeline cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CombineMode {
    /// Output the shade colour.
    Shade,
    /// Texture colour modulated by shade.
    #[default]
    ModulateRgba,
}
