use crate::command::{Gfx, MtxHandle, VtxHandle, GFX_SIZE};
use crate::error::GraphicsError;
use crate::matrix::{Mtx, MTX_SIZE};
use crate::vertex::{Vtx, VTX_SIZE};

/// Default pool budget: room for 6400 commands.
pub const DEFAULT_POOL_SIZE: usize = 6400 * GFX_SIZE;

/// Per-frame graphics memory with a fixed byte budget.
///
/// Commands are appended at the head; vertex and matrix data are carved
/// from the tail. Both draw on the same budget, so a frame that allocates a
/// lot of vertex data has less room for commands and vice versa.
///
/// Call [`reset`](Self::reset) at the start of every frame. Handles from a
/// previous frame are rejected when resolved.
#[derive(Debug)]
pub struct GfxPool {
    capacity: usize,
    commands: Vec<Gfx>,
    vertices: Vec<Vtx>,
    matrices: Vec<Mtx>,
    generation: u64,
    peak_bytes: usize,
}

impl GfxPool {
    /// Create a pool with a budget of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            commands: Vec::new(),
            vertices: Vec::new(),
            matrices: Vec::new(),
            generation: 0,
            peak_bytes: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bytes consumed by commands and allocations this frame.
    pub fn used_bytes(&self) -> usize {
        self.commands.len() * GFX_SIZE
            + self.vertices.len() * VTX_SIZE
            + self.matrices.len() * MTX_SIZE
    }

    /// Bytes still available this frame.
    pub fn remaining_bytes(&self) -> usize {
        self.capacity.saturating_sub(self.used_bytes())
    }

    /// Whether `bytes` more would still fit.
    pub fn has_room(&self, bytes: usize) -> bool {
        bytes <= self.remaining_bytes()
    }

    /// Highest usage seen since the pool was created.
    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes
    }

    /// Discard this frame's contents and start a new generation.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.vertices.clear();
        self.matrices.clear();
        self.generation += 1;
    }

    /// Append a command.
    pub fn push(&mut self, command: Gfx) -> Result<(), GraphicsError> {
        self.ensure_room(GFX_SIZE)?;
        self.commands.push(command);
        self.track_peak();
        Ok(())
    }

    /// Copy `vertices` into the pool.
    ///
    /// Returns `None` if there is not enough room.
    pub fn alloc_vertices(&mut self, vertices: &[Vtx]) -> Option<VtxHandle> {
        if !self.has_room(vertices.len() * VTX_SIZE) {
            return None;
        }
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        self.track_peak();
        Some(VtxHandle {
            generation: self.generation,
            offset,
            len: vertices.len() as u32,
        })
    }

    /// Copy a matrix into the pool.
    ///
    /// Returns `None` if there is not enough room.
    pub fn alloc_matrix(&mut self, matrix: Mtx) -> Option<MtxHandle> {
        if !self.has_room(MTX_SIZE) {
            return None;
        }
        let index = self.matrices.len() as u32;
        self.matrices.push(matrix);
        self.track_peak();
        Some(MtxHandle {
            generation: self.generation,
            index,
        })
    }

    /// This frame's command list.
    pub fn commands(&self) -> &[Gfx] {
        &self.commands
    }

    /// Resolve a vertex handle.
    pub fn vertices(&self, handle: VtxHandle) -> Result<&[Vtx], GraphicsError> {
        self.check_generation(handle.generation)?;
        let start = handle.offset as usize;
        let end = start + handle.len as usize;
        self.vertices.get(start..end).ok_or_else(|| {
            GraphicsError::InvalidHandle(format!(
                "vertices {start}..{end} beyond {} allocated",
                self.vertices.len()
            ))
        })
    }

    /// Resolve a matrix handle.
    pub fn matrix(&self, handle: MtxHandle) -> Result<&Mtx, GraphicsError> {
        self.check_generation(handle.generation)?;
        self.matrices.get(handle.index as usize).ok_or_else(|| {
            GraphicsError::InvalidHandle(format!(
                "matrix {} beyond {} allocated",
                handle.index,
                self.matrices.len()
            ))
        })
    }

    fn check_generation(&self, generation: u64) -> Result<(), GraphicsError> {
        if generation != self.generation {
            return Err(GraphicsError::StaleHandle {
                handle: generation,
                current: self.generation,
            });
        }
        Ok(())
    }

    fn ensure_room(&self, bytes: usize) -> Result<(), GraphicsError> {
        if self.has_room(bytes) {
            Ok(())
        } else {
            Err(GraphicsError::PoolExhausted {
                requested: bytes,
                available: self.remaining_bytes(),
            })
        }
    }

    fn track_peak(&mut self) {
        self.peak_bytes = self.peak_bytes.max(self.used_bytes());
    }
}

impl Default for GfxPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}

static_assertions::assert_impl_all!(GfxPool: Send, Sync);
