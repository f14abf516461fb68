//! Software walker for display lists.
//!
//! Executes a frame's command list the way the geometry stage would and
//! collects the resulting triangles. Used by headless hosts and tests to
//! see what a frame actually draws.

use pinewood_core::math::{Mat4, Vec3};

use crate::command::Gfx;
use crate::error::GraphicsError;
use crate::gbi::{CombineMode, GeometryMode, MatrixFlags, RenderMode};
use crate::pool::GfxPool;

/// Modelview matrix stack depth.
pub const MATRIX_STACK_DEPTH: usize = 10;
/// Number of vertex cache slots.
pub const VERTEX_CACHE_SIZE: usize = 32;
/// Maximum nesting of [`Gfx::DisplayList`] calls.
pub const DISPLAY_LIST_DEPTH: usize = 10;

/// A transformed vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedVertex {
    /// Position after modelview and projection, divided by `w`.
    pub position: [f32; 3],
    /// RGBA.
    pub color: [u8; 4],
}

/// A triangle together with the render state it was drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTriangle {
    pub vertices: [ResolvedVertex; 3],
    pub render_mode: RenderMode,
    pub geometry_mode: GeometryMode,
}

impl ResolvedTriangle {
    pub fn is_translucent(&self) -> bool {
        self.render_mode.is_translucent()
    }
}

/// Render state tracked while walking a list.
#[derive(Debug, Clone)]
pub struct RenderState {
    modelview: Vec<Mat4>,
    pub projection: Mat4,
    pub geometry_mode: GeometryMode,
    pub render_mode: (RenderMode, RenderMode),
    pub combine_mode: (CombineMode, CombineMode),
    pub texture_on: bool,
    vertex_cache: [Option<ResolvedVertex>; VERTEX_CACHE_SIZE],
}

impl RenderState {
    fn new() -> Self {
        Self {
            modelview: vec![Mat4::identity()],
            projection: Mat4::identity(),
            geometry_mode: GeometryMode::DEFAULT,
            render_mode: (RenderMode::AaZbOpaSurf, RenderMode::NoOp),
            combine_mode: (CombineMode::ModulateRgba, CombineMode::ModulateRgba),
            texture_on: true,
            vertex_cache: [None; VERTEX_CACHE_SIZE],
        }
    }

    /// Current top of the modelview stack.
    pub fn modelview(&self) -> &Mat4 {
        // The stack always holds at least the base matrix.
        &self.modelview[self.modelview.len() - 1]
    }

    /// Number of matrices on the modelview stack, including the base one.
    pub fn modelview_depth(&self) -> usize {
        self.modelview.len()
    }

    fn modelview_mut(&mut self) -> &mut Mat4 {
        let top = self.modelview.len() - 1;
        &mut self.modelview[top]
    }
}

/// Walks a [`GfxPool`]'s commands and collects triangles.
pub struct DisplayListInterpreter<'a> {
    pool: &'a GfxPool,
    state: RenderState,
    commands_executed: usize,
}

impl<'a> DisplayListInterpreter<'a> {
    pub fn new(pool: &'a GfxPool) -> Self {
        Self {
            pool,
            state: RenderState::new(),
            commands_executed: 0,
        }
    }

    /// Execute the pool's command list from the top.
    pub fn run(&mut self) -> Result<Vec<ResolvedTriangle>, GraphicsError> {
        let mut triangles = Vec::new();
        let pool = self.pool;
        self.execute(pool.commands(), 0, &mut triangles)?;
        Ok(triangles)
    }

    /// State after the last [`run`](Self::run).
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Commands executed so far, including those in called lists.
    pub fn commands_executed(&self) -> usize {
        self.commands_executed
    }

    fn execute(
        &mut self,
        list: &[Gfx],
        depth: usize,
        out: &mut Vec<ResolvedTriangle>,
    ) -> Result<(), GraphicsError> {
        for command in list {
            self.commands_executed += 1;
            match *command {
                Gfx::PipeSync => {}
                Gfx::SetRenderMode(c1, c2) => self.state.render_mode = (c1, c2),
                Gfx::SetGeometryMode(mode) => self.state.geometry_mode |= mode,
                Gfx::ClearGeometryMode(mode) => self.state.geometry_mode &= !mode,
                Gfx::Texture { on } => self.state.texture_on = on,
                Gfx::SetCombineMode(c1, c2) => self.state.combine_mode = (c1, c2),
                Gfx::Matrix(handle, flags) => {
                    let matrix = self.pool.matrix(handle)?.to_mat4();
                    self.apply_matrix(matrix, flags)?;
                }
                Gfx::PopMatrix => {
                    if self.state.modelview.len() > 1 {
                        self.state.modelview.pop();
                    } else {
                        log::trace!("PopMatrix at the bottom of the modelview stack ignored");
                    }
                }
                Gfx::Vertex { buffer, count, v0 } => self.load_vertices(buffer, count, v0)?,
                Gfx::Triangle1(a) => out.push(self.triangle(a)?),
                Gfx::Triangle2(a, b) => {
                    out.push(self.triangle(a)?);
                    out.push(self.triangle(b)?);
                }
                Gfx::DisplayList(sub) => {
                    if depth + 1 > DISPLAY_LIST_DEPTH {
                        return Err(GraphicsError::RecursionLimit {
                            depth: DISPLAY_LIST_DEPTH,
                        });
                    }
                    self.execute(sub, depth + 1, out)?;
                }
                Gfx::EndDisplayList => return Ok(()),
            }
        }
        Ok(())
    }

    fn apply_matrix(&mut self, matrix: Mat4, flags: MatrixFlags) -> Result<(), GraphicsError> {
        if flags.contains(MatrixFlags::PROJECTION) {
            if flags.contains(MatrixFlags::LOAD) {
                self.state.projection = matrix;
            } else {
                self.state.projection *= matrix;
            }
            return Ok(());
        }

        if flags.contains(MatrixFlags::PUSH) {
            if self.state.modelview.len() >= MATRIX_STACK_DEPTH {
                return Err(GraphicsError::MatrixStackOverflow {
                    depth: MATRIX_STACK_DEPTH,
                });
            }
            let top = *self.state.modelview();
            self.state.modelview.push(top);
        }

        let top = self.state.modelview_mut();
        if flags.contains(MatrixFlags::LOAD) {
            *top = matrix;
        } else {
            *top *= matrix;
        }
        Ok(())
    }

    fn load_vertices(
        &mut self,
        buffer: crate::command::VtxHandle,
        count: u8,
        v0: u8,
    ) -> Result<(), GraphicsError> {
        let count = count as usize;
        let v0 = v0 as usize;
        if v0 + count > VERTEX_CACHE_SIZE {
            return Err(GraphicsError::VertexOutOfRange {
                index: v0 + count - 1,
                limit: VERTEX_CACHE_SIZE,
            });
        }
        let vertices = self.pool.vertices(buffer)?;
        if count > vertices.len() {
            return Err(GraphicsError::InvalidHandle(format!(
                "loading {count} vertices from a buffer of {}",
                vertices.len()
            )));
        }

        let transform = self.state.projection * self.state.modelview();
        for (slot, vtx) in vertices.iter().take(count).enumerate() {
            let p = transform.transform_point(&nalgebra_point(vtx.ob));
            self.state.vertex_cache[v0 + slot] = Some(ResolvedVertex {
                position: [p.x, p.y, p.z],
                color: vtx.color,
            });
        }
        Ok(())
    }

    fn triangle(&self, indices: [u8; 3]) -> Result<ResolvedTriangle, GraphicsError> {
        let mut vertices = [ResolvedVertex {
            position: [0.0; 3],
            color: [0; 4],
        }; 3];
        for (out, index) in vertices.iter_mut().zip(indices) {
            let index = index as usize;
            *out = self
                .state
                .vertex_cache
                .get(index)
                .ok_or(GraphicsError::VertexOutOfRange {
                    index,
                    limit: VERTEX_CACHE_SIZE,
                })?
                .ok_or(GraphicsError::VertexNotLoaded(index))?;
        }
        Ok(ResolvedTriangle {
            vertices,
            render_mode: self.state.render_mode.0,
            geometry_mode: self.state.geometry_mode,
        })
    }
}

fn nalgebra_point(ob: [i16; 3]) -> pinewood_core::math::nalgebra::Point3<f32> {
    Vec3::new(ob[0] as f32, ob[1] as f32, ob[2] as f32).into()
}
