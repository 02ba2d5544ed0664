//! Cloud layer and wind sampling parameters.

use serde::{Deserialize, Serialize};

use super::noise::{NoiseAlgorithm, NoiseSettings};
use super::palette;
use crate::color::ColorBandSet;

/// Cloud texture generated over the sky dome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub noise: NoiseSettings,

    /// Texture size in pixels (width, height)
    pub texture_size: (usize, usize),

    pub bands: ColorBandSet,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            noise: NoiseSettings {
                seed: 88,
                octaves: 5,
                scale: 60.0,
                persistence: 0.5,
                lacunarity: 2.0,
                algorithm: NoiseAlgorithm::Simplex,
            },
            texture_size: (256, 128),
            bands: palette::clouds(),
        }
    }
}

/// Two noise channels read as wind strength and direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    pub strength: NoiseSettings,
    pub direction: NoiseSettings,

    /// Strength sample → speed (grid cells per unit time)
    pub speed_multiplier: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            strength: NoiseSettings {
                seed: 5,
                octaves: 2,
                scale: 300.0,
                ..NoiseSettings::default()
            },
            direction: NoiseSettings {
                seed: 17,
                octaves: 1,
                scale: 500.0,
                ..NoiseSettings::default()
            },
            speed_multiplier: 4.0,
        }
    }
}
