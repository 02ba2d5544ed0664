//! Combining height, erosion, and peaks-and-valleys into one elevation field.

use std::fmt;

use crate::curve::Curve;
use crate::error::TerrainError;
use crate::grid::SampleGrid;

/// Independently generated contributor to elevation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Height,
    Erosion,
    PeaksValleys,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Height, Channel::Erosion, Channel::PeaksValleys];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Height => "height",
            Channel::Erosion => "erosion",
            Channel::PeaksValleys => "peaks-and-valleys",
        };
        f.write_str(name)
    }
}

/// One grid per channel, all with the same dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSet {
    pub height: SampleGrid,
    pub erosion: SampleGrid,
    pub peaks_valleys: SampleGrid,
}

impl ChannelSet {
    pub fn get(&self, channel: Channel) -> &SampleGrid {
        match channel {
            Channel::Height => &self.height,
            Channel::Erosion => &self.erosion,
            Channel::PeaksValleys => &self.peaks_valleys,
        }
    }

    /// Build a new set by transforming each channel
    pub fn map(&self, mut f: impl FnMut(Channel, &SampleGrid) -> SampleGrid) -> Self {
        Self {
            height: f(Channel::Height, &self.height),
            erosion: f(Channel::Erosion, &self.erosion),
            peaks_valleys: f(Channel::PeaksValleys, &self.peaks_valleys),
        }
    }
}

/// Curve-remaps normalized channels and sums them into elevation
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationCompositor {
    pub height_curve: Curve,
    pub erosion_curve: Curve,
    pub peaks_valleys_curve: Curve,
}

impl ElevationCompositor {
    pub fn new(height_curve: Curve, erosion_curve: Curve, peaks_valleys_curve: Curve) -> Self {
        Self {
            height_curve,
            erosion_curve,
            peaks_valleys_curve,
        }
    }

    /// Elevation of one cell before falloff
    ///
    /// Height sets the base; erosion and peaks-and-valleys add clamped detail.
    pub fn combine(&self, height: f32, erosion: f32, peaks_valleys: f32) -> f32 {
        let h = self.height_curve.evaluate(height);
        let e = self.erosion_curve.evaluate(erosion).clamp(0.0, 1.0);
        let pv = self.peaks_valleys_curve.evaluate(peaks_valleys).clamp(0.0, 1.0);
        (h + e + pv).clamp(0.0, 1.0)
    }

    /// `combine(...) - falloff` for every cell of normalized channels
    pub fn composite(
        &self,
        channels: &ChannelSet,
        falloff: &SampleGrid,
    ) -> Result<SampleGrid, TerrainError> {
        let height = &channels.height;
        height.ensure_same_dimensions(&channels.erosion)?;
        height.ensure_same_dimensions(&channels.peaks_valleys)?;
        height.ensure_same_dimensions(falloff)?;

        let data = height
            .values()
            .iter()
            .zip(channels.erosion.values())
            .zip(channels.peaks_valleys.values())
            .zip(falloff.values())
            .map(|(((&h, &e), &pv), &f)| self.combine(h, e, pv) - f)
            .collect();
        SampleGrid::new(height.width(), height.height(), data)
    }
}

/// Final pass keeping elevation in a renderer-friendly range
pub fn apply_offsets(combined: &SampleGrid, offsets: (f32, f32)) -> SampleGrid {
    let divisor = offsets.0 * offsets.1;
    combined.map(|v| v / divisor)
}

/// Index pairs of grids that are bit-for-bit identical
pub fn find_identical<'a>(grids: impl IntoIterator<Item = &'a SampleGrid>) -> Vec<(usize, usize)> {
    let grids: Vec<&SampleGrid> = grids.into_iter().collect();
    let mut pairs = Vec::new();
    for a in 0..grids.len() {
        for b in (a + 1)..grids.len() {
            if grids[a].bitwise_eq(grids[b]) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}
