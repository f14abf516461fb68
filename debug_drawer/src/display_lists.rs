//! Static display lists shared by every debug shape.

use pinewood_graphics::gbi::{CombineMode, GeometryMode, RenderMode};
use pinewood_graphics::Gfx;

const UNLIT: GeometryMode = GeometryMode::LIGHTING.union(GeometryMode::CULL_BACK);
const SHADED: GeometryMode = GeometryMode::ZBUFFER
    .union(GeometryMode::SHADE)
    .union(GeometryMode::SHADING_SMOOTH);

/// Translucent, unlit, untextured state for boxes.
pub static BOX_BEGIN: &[Gfx] = &[
    Gfx::PipeSync,
    Gfx::SetRenderMode(RenderMode::ZbXluSurf, RenderMode::NoOp),
    Gfx::ClearGeometryMode(UNLIT),
    Gfx::SetGeometryMode(SHADED),
    Gfx::Texture { on: false },
    Gfx::SetCombineMode(CombineMode::Shade, CombineMode::Shade),
    Gfx::EndDisplayList,
];

/// Opaque, unlit, untextured state for rects.
pub static RECT_BEGIN: &[Gfx] = &[
    Gfx::PipeSync,
    Gfx::SetRenderMode(RenderMode::ZbOpaSurf, RenderMode::NoOp),
    Gfx::ClearGeometryMode(UNLIT),
    Gfx::SetGeometryMode(SHADED),
    Gfx::Texture { on: false },
    Gfx::SetCombineMode(CombineMode::Shade, CombineMode::Shade),
    Gfx::EndDisplayList,
];

/// Restores lighting, culling and texturing after a debug section.
pub static SECTION_END: &[Gfx] = &[
    Gfx::PipeSync,
    Gfx::ClearGeometryMode(SHADED),
    Gfx::SetGeometryMode(UNLIT),
    Gfx::Texture { on: true },
    Gfx::SetRenderMode(RenderMode::AaZbOpaSurf, RenderMode::NoOp),
    Gfx::SetCombineMode(CombineMode::ModulateRgba, CombineMode::ModulateRgba),
    Gfx::EndDisplayList,
];

/// Twelve triangles over the eight corners loaded at slot 0.
pub static DRAW_CUBOID: &[Gfx] = &[
    Gfx::tri2([5, 4, 6], [5, 6, 7]), // front
    Gfx::tri2([0, 1, 2], [2, 1, 3]), // back
    Gfx::tri2([4, 0, 2], [2, 6, 4]), // left
    Gfx::tri2([1, 5, 3], [3, 5, 7]), // right
    Gfx::tri2([1, 0, 4], [1, 4, 5]), // top
    Gfx::tri2([2, 3, 6], [6, 3, 7]), // bottom
    Gfx::EndDisplayList,
];
