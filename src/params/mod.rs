//! Parameter definitions with units and documented ranges.
//!
//! Every generation input arrives through these structs:
//! - Defaults produce a small island world
//! - `clamped()` pulls menu input into valid ranges instead of failing
//! - All of them load from RON via serde

mod noise;
pub mod palette;
mod sky;
mod world;

// Re-export all types
pub use self::noise::{limits, NoiseAlgorithm, NoiseSettings};
pub use sky::{CloudConfig, WindConfig};
pub use world::{
    ChannelConfig, FalloffShape, NormalizationPolicy, PlacementSettings, Smoothing, WorldConfig,
    MAX_GRID_SIZE, MAX_TILE_RESOLUTION, MAX_WORLD_EXTENT,
};
