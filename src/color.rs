//! Threshold color bands for vertex and texture coloring.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::grid::SampleGrid;

/// Linear RGBA color in [0, 1], laid out for direct GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const RED: Rgba = Rgba::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Rgba = Rgba::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Rgba = Rgba::rgb(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque gray with every channel set to `value`
    pub const fn gray(value: f32) -> Self {
        Self::rgb(value, value, value)
    }

    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba::from(Vec4::from(self).lerp(Vec4::from(other), t))
    }

    /// 8-bit channels, clamped
    pub fn to_rgba8(self) -> [u8; 4] {
        let v = Vec4::from(self).clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
        [
            v.x.round() as u8,
            v.y.round() as u8,
            v.z.round() as u8,
            v.w.round() as u8,
        ]
    }
}

impl From<Rgba> for Vec4 {
    fn from(c: Rgba) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Vec4> for Rgba {
    fn from(v: Vec4) -> Self {
        Rgba::new(v.x, v.y, v.z, v.w)
    }
}

/// Samples at or below `threshold` (and above the previous band) take `color`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorBand {
    pub threshold: f32,
    pub color: Rgba,
}

impl ColorBand {
    pub const fn new(threshold: f32, color: Rgba) -> Self {
        Self { threshold, color }
    }
}

/// Band list kept sorted ascending by threshold
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ColorBand>", into = "Vec<ColorBand>")]
pub struct ColorBandSet {
    bands: Vec<ColorBand>,
}

impl ColorBandSet {
    pub fn new(mut bands: Vec<ColorBand>) -> Self {
        bands.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self { bands }
    }

    pub fn bands(&self) -> &[ColorBand] {
        &self.bands
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Color for a single sample
    ///
    /// The first band whose threshold is ≥ `sample` decides the output. With
    /// `flat` its color is returned directly; otherwise the color is blended
    /// from the preceding band (or the band itself when it is first). Samples
    /// above every threshold get the last band's color, and an empty set
    /// falls back to grayscale.
    pub fn color(&self, sample: f32, flat: bool) -> Rgba {
        let Some(last) = self.bands.last() else {
            return Rgba::gray(sample);
        };

        let Some(index) = self.bands.iter().position(|b| sample <= b.threshold) else {
            return last.color;
        };

        let band = self.bands[index];
        if flat {
            return band.color;
        }

        let prev = if index == 0 {
            band
        } else {
            self.bands[index - 1]
        };
        let t = inverse_lerp(prev.threshold, band.threshold, sample);
        prev.color.lerp(band.color, t)
    }

    /// Colors for every sample of a grid, in grid order
    pub fn colors(&self, samples: &SampleGrid, flat: bool) -> Vec<Rgba> {
        samples
            .values()
            .iter()
            .map(|&s| self.color(s, flat))
            .collect()
    }
}

impl From<Vec<ColorBand>> for ColorBandSet {
    fn from(bands: Vec<ColorBand>) -> Self {
        Self::new(bands)
    }
}

impl From<ColorBandSet> for Vec<ColorBand> {
    fn from(set: ColorBandSet) -> Self {
        set.bands
    }
}

/// Position of `value` between `a` and `b`, clamped to [0, 1]; 0 when `a == b`
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    }
}
