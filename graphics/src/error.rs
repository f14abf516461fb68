//! Graphics error types.

use std::fmt;

/// Errors that can occur while building or walking a display list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// The frame's graphics pool has no room left.
    PoolExhausted {
        /// Bytes the failed request needed.
        requested: usize,
        /// Bytes that were still free.
        available: usize,
    },
    /// A vertex or matrix handle from an earlier frame was used.
    StaleHandle {
        /// Generation stored in the handle.
        handle: u64,
        /// Generation of the pool being read.
        current: u64,
    },
    /// A handle points outside the pool's storage.
    InvalidHandle(String),
    /// A vertex load or triangle referenced a slot beyond the vertex cache.
    VertexOutOfRange { index: usize, limit: usize },
    /// A triangle used a vertex slot that was never loaded.
    VertexNotLoaded(usize),
    /// Pushing another modelview matrix would exceed the stack depth.
    MatrixStackOverflow { depth: usize },
    /// Nested display-list calls went deeper than the walker allows.
    RecursionLimit { depth: usize },
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PoolExhausted {
                requested,
                available,
            } => write!(
                f,
                "graphics pool exhausted: requested {requested} bytes, {available} available"
            ),
            Self::StaleHandle { handle, current } => write!(
                f,
                "stale handle from generation {handle} used in generation {current}"
            ),
            Self::InvalidHandle(msg) => write!(f, "invalid handle: {msg}"),
            Self::VertexOutOfRange { index, limit } => {
                write!(f, "vertex slot {index} out of range (limit {limit})")
            }
            Self::VertexNotLoaded(index) => write!(f, "vertex slot {index} was never loaded"),
            Self::MatrixStackOverflow { depth } => {
                write!(f, "modelview matrix stack overflow at depth {depth}")
            }
            Self::RecursionLimit { depth } => {
                write!(f, "display list nesting exceeded depth {depth}")
            }
        }
    }
}

impl std::error::Error for GraphicsError {}
