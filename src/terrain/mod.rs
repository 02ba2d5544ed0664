//! Elevation synthesis: falloff shaping, channel compositing, and the tiled
//! world pipeline that ties them together.

mod compositor;
mod falloff;
mod world;

// Re-export public types
pub use compositor::{apply_offsets, find_identical, Channel, ChannelSet, ElevationCompositor};
pub use falloff::{falloff_curve, FalloffMap};
pub use world::{ChannelRanges, CheckStage, Diagnostic, GridTile, World, WorldGenerator};
