//! World layout, per-channel wiring, and placement parameters.

use serde::{Deserialize, Serialize};

use super::noise::{NoiseAlgorithm, NoiseSettings};
use super::palette;
use crate::color::ColorBandSet;
use crate::curve::{Curve, Interpolation};

/// Largest tile resolution accepted per axis (vertices)
pub const MAX_TILE_RESOLUTION: usize = 4096;

/// Most tiles accepted per axis
pub const MAX_GRID_SIZE: usize = 64;

/// Largest assembled world accepted per axis (samples); bounds the falloff map
pub const MAX_WORLD_EXTENT: usize = 16_385;

/// Noise settings and response curve for one elevation channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub noise: NoiseSettings,
    pub curve: Curve,
}

/// How raw channel samples are rescaled before curve remapping
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum NormalizationPolicy {
    /// `(s - min) / (max - min)` over the global extrema, clamped to [0, 1]
    #[default]
    MinMax,
    /// `(s + 1) / (x * y)`, independent of the observed extrema
    FixedOffsets { x: f32, y: f32 },
}

/// Edge falloff curve `v^a / (v^a + (b - b*v)^a)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FalloffShape {
    /// When false the falloff map is all zeros
    pub enabled: bool,

    /// Exponent `a`: higher = sharper coastline transition
    pub steepness: f32,

    /// Shift `b`: higher = larger island before suppression starts
    pub shift: f32,
}

impl Default for FalloffShape {
    fn default() -> Self {
        Self {
            enabled: true,
            steepness: 3.0,
            shift: 2.2,
        }
    }
}

/// Optional neighbourhood smoothing of combined elevation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Smoothing {
    /// Blend toward the 3×3 mean per pass (0..1)
    pub factor: f32,

    /// Passes; 0 disables smoothing
    pub iterations: u32,
}

/// Poisson-disc object placement parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementSettings {
    pub enabled: bool,

    /// Minimum spacing between placed objects (grid cells)
    pub min_distance: f32,

    /// Candidates tried around an active point before it is retired
    pub attempts: u32,

    /// Inclusive band of combined elevation where objects may stand
    pub elevation_range: (f32, f32),

    /// Seeds the candidate generator
    pub seed: u64,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_distance: 6.0,
            attempts: 30,
            elevation_range: (0.35, 0.8),
            seed: 7,
        }
    }
}

/// Full configuration of one generation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Tiles per axis
    pub grid_size: (usize, usize),

    /// Vertices per tile per axis; adjacent tiles share their border
    pub tile_resolution: (usize, usize),

    /// Mesh vertices per elevation sample per axis
    pub mesh_detail: usize,

    /// Elevation → world height (meters per unit elevation)
    pub height_multiplier: f32,

    /// Sea level in elevation units; water height is `sea_level * height_multiplier / 2`
    pub sea_level: f32,

    pub height: ChannelConfig,
    pub erosion: ChannelConfig,
    pub peaks_valleys: ChannelConfig,

    pub normalization: NormalizationPolicy,

    /// Combined elevation is divided by `x * y` after compositing
    pub combined_offsets: (f32, f32),

    pub falloff: FalloffShape,
    pub smoothing: Smoothing,

    pub land_bands: ColorBandSet,
    pub water_bands: ColorBandSet,

    /// Hard band edges instead of gradients
    pub flat_shading: bool,

    pub placement: PlacementSettings,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: (2, 2),
            tile_resolution: (64, 64),
            mesh_detail: 1,
            height_multiplier: 40.0,
            sea_level: 0.3,
            height: ChannelConfig {
                noise: NoiseSettings {
                    seed: 12345,
                    octaves: 6,
                    scale: 90.0,
                    persistence: 0.5,
                    lacunarity: 2.0,
                    algorithm: NoiseAlgorithm::Simplex,
                },
                curve: Curve::identity(),
            },
            erosion: ChannelConfig {
                noise: NoiseSettings {
                    seed: 421,
                    octaves: 3,
                    scale: 140.0,
                    persistence: 0.45,
                    lacunarity: 2.0,
                    algorithm: NoiseAlgorithm::Perlin,
                },
                // strong erosion flattens: high samples contribute little
                curve: Curve::new(
                    [(0.0, 0.3), (0.4, 0.15), (0.7, 0.05), (1.0, 0.0)],
                    Interpolation::Smooth,
                )
                .unwrap_or_default(),
            },
            peaks_valleys: ChannelConfig {
                noise: NoiseSettings {
                    seed: -977,
                    octaves: 5,
                    scale: 45.0,
                    persistence: 0.55,
                    lacunarity: 2.1,
                    algorithm: NoiseAlgorithm::Simplex,
                },
                curve: Curve::new(
                    [(0.0, 0.0), (0.5, 0.05), (0.8, 0.25), (1.0, 0.4)],
                    Interpolation::Smooth,
                )
                .unwrap_or_default(),
            },
            normalization: NormalizationPolicy::MinMax,
            combined_offsets: (1.0, 1.0),
            falloff: FalloffShape::default(),
            smoothing: Smoothing::default(),
            land_bands: palette::land(),
            water_bands: palette::water(),
            flat_shading: false,
            placement: PlacementSettings::default(),
        }
    }
}

impl WorldConfig {
    /// Copy with layout and channel settings pulled into valid ranges
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        out.tile_resolution = (
            self.tile_resolution.0.clamp(2, MAX_TILE_RESOLUTION),
            self.tile_resolution.1.clamp(2, MAX_TILE_RESOLUTION),
        );
        out.grid_size = (
            clamp_tiles(self.grid_size.0, out.tile_resolution.0),
            clamp_tiles(self.grid_size.1, out.tile_resolution.1),
        );
        out.mesh_detail = self.mesh_detail.max(1);
        out.combined_offsets = (
            self.combined_offsets.0.max(1.0),
            self.combined_offsets.1.max(1.0),
        );
        if let NormalizationPolicy::FixedOffsets { x, y } = self.normalization {
            out.normalization = NormalizationPolicy::FixedOffsets {
                x: x.max(1.0),
                y: y.max(1.0),
            };
        }
        out.height.noise = self.height.noise.clamped();
        out.erosion.noise = self.erosion.noise.clamped();
        out.peaks_valleys.noise = self.peaks_valleys.noise.clamped();
        if out != *self {
            log::warn!("world configuration adjusted into valid ranges");
        }
        out
    }

    /// Extent of the assembled world in samples (tiles share border rows/columns)
    pub fn world_extent(&self) -> (usize, usize) {
        (
            self.grid_size.0 * (self.tile_resolution.0 - 1) + 1,
            self.grid_size.1 * (self.tile_resolution.1 - 1) + 1,
        )
    }

    /// World-space height of the water plane
    pub fn sea_level_height(&self) -> f32 {
        self.sea_level * self.height_multiplier / 2.0
    }
}

/// Tile count along one axis, keeping the stitched extent within `MAX_WORLD_EXTENT`
fn clamp_tiles(tiles: usize, resolution: usize) -> usize {
    let fit = (MAX_WORLD_EXTENT - 1) / (resolution - 1);
    tiles.clamp(1, MAX_GRID_SIZE.min(fit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_already_valid() {
        let config = WorldConfig::default();
        assert_eq!(config.clamped(), config);
    }

    #[test]
    fn test_layout_clamping() {
        let config = WorldConfig {
            grid_size: (0, 3),
            tile_resolution: (1, 100_000),
            mesh_detail: 0,
            combined_offsets: (0.0, 2.0),
            normalization: NormalizationPolicy::FixedOffsets { x: 0.5, y: 3.0 },
            ..WorldConfig::default()
        }
        .clamped();

        assert_eq!(config.grid_size, (1, 3));
        assert_eq!(config.tile_resolution, (2, MAX_TILE_RESOLUTION));
        assert_eq!(config.mesh_detail, 1);
        assert_eq!(config.combined_offsets, (1.0, 2.0));
        assert_eq!(
            config.normalization,
            NormalizationPolicy::FixedOffsets { x: 1.0, y: 3.0 }
        );
    }

    #[test]
    fn test_grid_size_is_bounded() {
        let config = WorldConfig {
            grid_size: (usize::MAX, 1_000),
            tile_resolution: (64, MAX_TILE_RESOLUTION),
            ..WorldConfig::default()
        }
        .clamped();

        assert_eq!(config.grid_size, (MAX_GRID_SIZE, 4));
        let (w, h) = config.world_extent();
        assert!(w <= MAX_WORLD_EXTENT && h <= MAX_WORLD_EXTENT, "extent {}x{}", w, h);
    }

    #[test]
    fn test_world_extent_shares_borders() {
        let config = WorldConfig {
            grid_size: (3, 2),
            tile_resolution: (5, 9),
            ..WorldConfig::default()
        };
        assert_eq!(config.world_extent(), (13, 17));
    }

    #[test]
    fn test_sea_level_height() {
        let config = WorldConfig {
            sea_level: 0.5,
            height_multiplier: 20.0,
            ..WorldConfig::default()
        };
        assert_eq!(config.sea_level_height(), 5.0);
    }

    #[test]
    fn test_partial_ron_config_uses_defaults() {
        let config: WorldConfig =
            ron::from_str("(grid_size: (3, 1), sea_level: 0.25)").unwrap();
        assert_eq!(config.grid_size, (3, 1));
        assert_eq!(config.sea_level, 0.25);
        assert_eq!(config.tile_resolution, WorldConfig::default().tile_resolution);
    }
}
