//! Islesail library - procedural island terrain synthesis

pub mod clouds;
pub mod color;
pub mod curve;
pub mod error;
pub mod export;
pub mod grid;
pub mod noise;
pub mod normalize;
pub mod params;
pub mod placement;
pub mod terrain;
