//! Rescaling raw channel samples into a canonical range.

use crate::grid::SampleGrid;
use crate::params::NormalizationPolicy;

/// Running min/max over every tile of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremaTracker {
    min: f32,
    max: f32,
}

impl Default for ExtremaTracker {
    fn default() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }
}

impl ExtremaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in the extrema recorded on a freshly generated grid
    pub fn observe(&mut self, grid: &SampleGrid) {
        if grid.is_empty() {
            return;
        }
        self.min = self.min.min(grid.min());
        self.max = self.max.max(grid.max());
    }

    pub fn has_samples(&self) -> bool {
        self.min <= self.max
    }

    /// `(min, max)`; `(0, 0)` when nothing was observed
    pub fn range(&self) -> (f32, f32) {
        if self.has_samples() {
            (self.min, self.max)
        } else {
            (0.0, 0.0)
        }
    }

    /// Zero variance across everything observed
    pub fn is_degenerate(&self) -> bool {
        let (min, max) = self.range();
        min == max
    }
}

/// Rescale `samples` using extrema gathered across all tiles
///
/// A zero-width range means the noise field degenerated: the result is an
/// all-zero grid (never NaN) and a warning is logged.
pub fn normalize(
    samples: &SampleGrid,
    global_min: f32,
    global_max: f32,
    policy: NormalizationPolicy,
) -> SampleGrid {
    if global_min == global_max {
        log::warn!(
            "degenerate noise field: global min == max == {}, normalizing to zeros",
            global_min
        );
        return SampleGrid::zeros(samples.width(), samples.height());
    }

    match policy {
        NormalizationPolicy::MinMax => {
            let range = global_max - global_min;
            samples.map(|s| ((s - global_min) / range).clamp(0.0, 1.0))
        }
        NormalizationPolicy::FixedOffsets { x, y } => {
            let divisor = x * y;
            samples.map(|s| (s + 1.0) / divisor)
        }
    }
}
