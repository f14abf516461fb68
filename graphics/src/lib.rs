//! # Pinewood Graphics
//!
//! Retained display-list graphics. Game code and tooling append commands to
//! a per-frame [`GfxPool`] with a fixed byte budget; the pool's command list
//! is submitted once per frame.
//!
//! - [`Gfx`]: the command set, including calls into static display lists
//! - [`GfxPool`]: bounded per-frame command and vertex/matrix storage
//! - [`DisplayListInterpreter`]: software walker that resolves a frame into triangles

mod command;
mod error;
pub mod gbi;
mod interpreter;
mod matrix;
mod pool;
mod vertex;

pub use command::{Gfx, MtxHandle, VtxHandle, GFX_SIZE};
pub use error::GraphicsError;
pub use interpreter::{
    DisplayListInterpreter, RenderState, ResolvedTriangle, ResolvedVertex, DISPLAY_LIST_DEPTH,
    MATRIX_STACK_DEPTH, VERTEX_CACHE_SIZE,
};
pub use matrix::{Mtx, MTX_SIZE};
pub use pool::{GfxPool, DEFAULT_POOL_SIZE};
pub use vertex::{Vtx, VTX_SIZE};
