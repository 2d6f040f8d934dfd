//! Heapless building blocks linked by generated detectors
//!
//! This module contains the primitives a generated artifact needs:
//! - Fixed-capacity bump regions for every buffer of a run
//! - Deterministic frame synthesis
//! - Tile partitioning and per-tile statistics
//! - The statistics engine that drives one run
//!
//! None of it allocates. Buffers come from caller-supplied regions, so the
//! same code runs over `static` arenas in an artifact and over host-owned
//! vectors inside the generator.

use std::fmt;

/// Fixed-capacity regions and bump cursors
pub mod arena;
/// Per-run tile statistics engine
pub mod engine;
/// Deterministic synthetic frames
pub mod frame;
/// Tile geometry, statistics and classification
pub mod tiles;

pub use arena::{Arena, Bump};
pub use engine::{TileCell, TileReport, TileStatisticsEngine, Workspace};
pub use frame::{BloomLcg, synthesize_frame};
pub use tiles::{TileBounds, TileParams, TileStats, tile_stats};

/// Errors raised while carving or shaping runtime buffers
#[derive(Debug)]
pub enum RuntimeError {
    /// A bump cursor ran out of room
    ArenaExhausted {
        /// Elements requested
        requested: usize,
        /// Elements left in the region
        remaining: usize,
    },

    /// A frame buffer does not match the frame dimensions
    Shape(ndarray::ShapeError),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArenaExhausted {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena exhausted: requested {requested} elements, {remaining} remaining"
                )
            }
            Self::Shape(source) => write!(f, "frame shape mismatch: {source}"),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shape(source) => Some(source),
            Self::ArenaExhausted { .. } => None,
        }
    }
}

impl From<ndarray::ShapeError> for RuntimeError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Shape(err)
    }
}
