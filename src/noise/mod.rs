//! Noise generation for terrain channels.
//!
//! `field` holds the coherent multi-octave evaluator every channel samples.
//! `filler` holds explicitly seeded non-coherent generators for placeholder
//! textures; the elevation pipeline never touches them.

mod field;
mod filler;

// Re-export public types
pub use field::{generate, CoherentNoiseField};
pub use filler::{GaussianFiller, UniformFiller};
