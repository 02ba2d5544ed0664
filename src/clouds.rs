//! Sky texture driven by a noise field drifting with the wind.

use glam::{IVec2, Vec2};

use crate::color::{ColorBandSet, Rgba};
use crate::grid::SampleGrid;
use crate::noise::CoherentNoiseField;
use crate::normalize::normalize;
use crate::params::{CloudConfig, NormalizationPolicy, WindConfig};

/// Wind at one point: per-axis strength and direction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wind {
    pub strength: Vec2,
    pub direction: Vec2,
}

impl Wind {
    pub fn new(strength: Vec2, direction: Vec2) -> Self {
        Self {
            strength,
            direction,
        }
    }

    /// No drift
    pub fn calm() -> Self {
        Self::default()
    }

    /// Whole-cell texture offset `(dir.x * strength.x, dir.y * strength.y)`, truncated
    pub fn offsets(&self) -> IVec2 {
        (self.direction * self.strength).as_ivec2()
    }
}

/// Reads wind from two noise channels
#[derive(Debug, Clone)]
pub struct WindSampler {
    strength: CoherentNoiseField,
    direction: CoherentNoiseField,
    speed_multiplier: f32,
}

impl WindSampler {
    pub fn new(config: &WindConfig) -> Self {
        Self {
            strength: CoherentNoiseField::new(config.strength),
            direction: CoherentNoiseField::new(config.direction),
            speed_multiplier: config.speed_multiplier,
        }
    }

    /// Wind at a world grid position
    pub fn sample(&self, position: IVec2) -> Wind {
        let (x, y) = (position.x as f64, position.y as f64);
        let strength = self.strength.sample(x, y, 0.0) * self.speed_multiplier;
        let direction = self.direction.sample(x, y, 0.0);
        Wind::new(Vec2::splat(strength), Vec2::splat(direction))
    }
}

/// One generated sky texture
#[derive(Debug, Clone, PartialEq)]
pub struct CloudFrame {
    /// Cloud density in [0, 1]
    pub samples: SampleGrid,

    /// Row-major texture pixels
    pub colors: Vec<Rgba>,
}

#[derive(Debug, Clone)]
pub struct CloudLayer {
    field: CoherentNoiseField,
    size: (usize, usize),
    bands: ColorBandSet,
}

impl CloudLayer {
    pub fn new(config: &CloudConfig) -> Self {
        Self {
            field: CoherentNoiseField::new(config.noise),
            size: (config.texture_size.0.max(1), config.texture_size.1.max(1)),
            bands: config.bands.clone(),
        }
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    /// Noise samples with pixel `(i, j)` read at `(i, j) + wind.offsets()`
    pub fn raw_samples(&self, wind: &Wind, time: f32) -> SampleGrid {
        let offset = wind.offsets();
        let t = time as f64;
        SampleGrid::from_fn(self.size.0, self.size.1, |i, j| {
            let x = i as f64 + offset.x as f64;
            let y = j as f64 + offset.y as f64;
            self.field.sample(x, y, t)
        })
    }

    /// Density normalized over this frame's own extrema, then colored
    pub fn generate(&self, wind: &Wind, time: f32) -> CloudFrame {
        let raw = self.raw_samples(wind, time);
        let samples = normalize(&raw, raw.min(), raw.max(), NormalizationPolicy::MinMax);
        let colors = self.bands.colors(&samples, false);
        log::debug!(
            "cloud frame {}x{} at offset {:?}",
            self.size.0,
            self.size.1,
            wind.offsets()
        );
        CloudFrame { samples, colors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_layer() -> CloudLayer {
        CloudLayer::new(&CloudConfig {
            texture_size: (32, 16),
            ..CloudConfig::default()
        })
    }

    #[test]
    fn test_offsets_truncate_product() {
        let wind = Wind::new(Vec2::new(3.0, 2.0), Vec2::new(1.9, -0.8));
        assert_eq!(wind.offsets(), IVec2::new(5, -1));
        assert_eq!(Wind::calm().offsets(), IVec2::ZERO);
    }

    #[test]
    fn test_wind_shifts_clouds_by_whole_cells() {
        let layer = small_layer();
        let calm = layer.raw_samples(&Wind::calm(), 0.0);
        let drift = Wind::new(Vec2::new(3.0, 1.0), Vec2::new(1.0, 0.0));
        let shifted = layer.raw_samples(&drift, 0.0);
        // column 0 of the shifted frame reads calm column 3
        assert_eq!(shifted.column(0), calm.column(3));
        assert_eq!(shifted.column(10), calm.column(13));
    }

    #[test]
    fn test_frame_is_normalized_and_colored() {
        let layer = small_layer();
        let frame = layer.generate(&Wind::calm(), 0.0);
        assert_eq!(frame.samples.dimensions(), (32, 16));
        assert_eq!(frame.colors.len(), 32 * 16);
        assert_eq!(frame.samples.min(), 0.0);
        assert_eq!(frame.samples.max(), 1.0);
    }

    #[test]
    fn test_time_changes_frame() {
        let layer = small_layer();
        let a = layer.raw_samples(&Wind::calm(), 0.0);
        let b = layer.raw_samples(&Wind::calm(), 5.0);
        assert!(!a.bitwise_eq(&b));
    }

    #[test]
    fn test_wind_sampler_is_deterministic() {
        let sampler = WindSampler::new(&WindConfig::default());
        let a = sampler.sample(IVec2::new(10, 20));
        let b = sampler.sample(IVec2::new(10, 20));
        assert_eq!(a, b);
        assert_eq!(a.strength.x, a.strength.y);
        assert!(a.direction.x.abs() <= 2.0);
    }

    #[test]
    fn test_wind_strength_scales_with_multiplier() {
        let base = WindConfig::default();
        let doubled = WindConfig {
            speed_multiplier: base.speed_multiplier * 2.0,
            ..base.clone()
        };
        let p = IVec2::new(3, 4);
        let a = WindSampler::new(&base).sample(p);
        let b = WindSampler::new(&doubled).sample(p);
        assert!((b.strength.x - 2.0 * a.strength.x).abs() < 1e-5);
        assert_eq!(a.direction, b.direction);
    }
}
