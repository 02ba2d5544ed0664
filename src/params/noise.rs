//! Coherent-noise settings and their valid ranges.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Base 2-D noise primitive used by every octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoiseAlgorithm {
    /// Lattice-gradient noise
    #[default]
    Perlin,
    /// Simplex-lattice noise (OpenSimplex)
    Simplex,
}

/// Valid ranges; menu input outside them is clamped, never rejected
pub mod limits {
    use std::ops::RangeInclusive;

    pub const SEED: RangeInclusive<i32> = -10_000..=10_000;
    pub const OCTAVES: RangeInclusive<u32> = 1..=200;
    pub const LACUNARITY: RangeInclusive<f32> = 0.01..=10.0;
    pub const SCALE: RangeInclusive<f32> = 1.0..=1000.0;
    pub const PERSISTENCE: RangeInclusive<f32> = 0.1..=5.0;
}

/// Multi-octave noise parameters for one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseSettings {
    /// Seeds the primitive and offsets sample coordinates
    pub seed: i32,

    /// Number of layers summed (≥ 1)
    pub octaves: u32,

    /// Feature size in grid cells; larger = smoother terrain
    pub scale: f32,

    /// Amplitude multiplier per octave (persistence^k)
    pub persistence: f32,

    /// Frequency multiplier per octave (lacunarity^k)
    pub lacunarity: f32,

    pub algorithm: NoiseAlgorithm,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 4,
            scale: 50.0,
            persistence: 0.5,
            lacunarity: 2.0,
            algorithm: NoiseAlgorithm::Perlin,
        }
    }
}

impl NoiseSettings {
    /// Copy with every field pulled into its valid range
    ///
    /// Each adjusted field is reported at warn level.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        out.seed = clamp_field("seed", self.seed, limits::SEED);
        out.octaves = clamp_field("octaves", self.octaves, limits::OCTAVES);
        out.scale = clamp_float("scale", self.scale, limits::SCALE);
        out.persistence = clamp_float("persistence", self.persistence, limits::PERSISTENCE);
        out.lacunarity = clamp_float("lacunarity", self.lacunarity, limits::LACUNARITY);
        out
    }
}

fn clamp_field<T>(name: &str, value: T, range: RangeInclusive<T>) -> T
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    let (lo, hi) = (*range.start(), *range.end());
    let clamped = if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    };
    if clamped != value {
        log::warn!("noise setting {name}={value} out of range [{lo}, {hi}], using {clamped}");
    }
    clamped
}

// NaN compares false against both bounds, so map it to the lower bound first
fn clamp_float(name: &str, value: f32, range: RangeInclusive<f32>) -> f32 {
    let value = if value.is_nan() { *range.start() } else { value };
    clamp_field(name, value, range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let settings = NoiseSettings::default();
        assert_eq!(settings.clamped(), settings);
    }

    #[test]
    fn test_clamping_out_of_range_menu_input() {
        let raw = NoiseSettings {
            seed: 99_999,
            octaves: 0,
            scale: -3.0,
            persistence: 9.0,
            lacunarity: 0.0,
            algorithm: NoiseAlgorithm::Simplex,
        };
        let clamped = raw.clamped();
        assert_eq!(clamped.seed, 10_000);
        assert_eq!(clamped.octaves, 1);
        assert_eq!(clamped.scale, 1.0);
        assert_eq!(clamped.persistence, 5.0);
        assert_eq!(clamped.lacunarity, 0.01);
        assert_eq!(clamped.algorithm, NoiseAlgorithm::Simplex);
    }

    #[test]
    fn test_nan_scale_clamps_to_minimum() {
        let raw = NoiseSettings {
            scale: f32::NAN,
            ..NoiseSettings::default()
        };
        assert_eq!(raw.clamped().scale, 1.0);
    }
}
