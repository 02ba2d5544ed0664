//! Error type for programmer errors in the terrain pipeline.
//!
//! Degenerate inputs (flat noise, oversized placement radius, out-of-range
//! settings) are not errors: they are clamped or reported as diagnostics.
//! Only structural mistakes between pipeline phases end up here.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerrainError {
    #[error("grid has {found} samples, expected {expected} ({width}x{height})")]
    SampleCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid dimensions differ: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("curve needs at least one control point")]
    EmptyCurve,

    #[error("tile grid must contain at least one tile, got {0}x{1}")]
    EmptyTileGrid(usize, usize),
}

/// Failure writing a debug image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Terrain(#[from] TerrainError),

    #[error("image dimensions {0}x{1} exceed the PNG limit")]
    TooLarge(usize, usize),
}
