//! Dense row-major sample storage shared by every pipeline stage.

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// A `width × height` grid of samples plus the extrema observed when it was built.
///
/// Index `(x, y)` lives at `y * width + x`. Every transformation returns a new
/// grid; nothing mutates a grid after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleGrid {
    width: usize,
    height: usize,
    data: Vec<f32>,
    min: f32,
    max: f32,
}

impl SampleGrid {
    /// Wrap existing samples, recomputing min/max
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self, TerrainError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(TerrainError::SampleCountMismatch {
                width,
                height,
                expected,
                found: data.len(),
            });
        }
        let (min, max) = extrema(&data);
        Ok(Self {
            width,
            height,
            data,
            min,
            max,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        let (min, max) = extrema(&data);
        Self {
            width,
            height,
            data,
            min,
            max,
        }
    }

    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
            min: 0.0,
            max: 0.0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Smallest sample seen at construction
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Largest sample seen at construction
    pub fn max(&self) -> f32 {
        self.max
    }

    /// True when every sample has the same value (zero variance)
    pub fn is_flat(&self) -> bool {
        self.min == self.max
    }

    pub fn values(&self) -> &[f32] {
        &self.data
    }

    pub fn into_values(self) -> Vec<f32> {
        self.data
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Bounds-checked lookup
    pub fn try_get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.get(x, y))
        } else {
            None
        }
    }

    /// Samples of column `x`, top to bottom
    pub fn column(&self, x: usize) -> Vec<f32> {
        (0..self.height).map(|y| self.get(x, y)).collect()
    }

    /// Samples of row `y`, left to right
    pub fn row(&self, y: usize) -> Vec<f32> {
        self.data[y * self.width..(y + 1) * self.width].to_vec()
    }

    /// Apply `f` to every sample, producing a new grid
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        let data: Vec<f32> = self.data.iter().map(|&v| f(v)).collect();
        let (min, max) = extrema(&data);
        Self {
            width: self.width,
            height: self.height,
            data,
            min,
            max,
        }
    }

    /// Combine two equally sized grids cell by cell
    pub fn zip_map(
        &self,
        other: &SampleGrid,
        f: impl Fn(f32, f32) -> f32,
    ) -> Result<Self, TerrainError> {
        self.ensure_same_dimensions(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Self::new(self.width, self.height, data)
    }

    /// Copy out the `width × height` window starting at `(x0, y0)`
    ///
    /// Cells past the source edge repeat the nearest edge sample.
    pub fn window(&self, x0: usize, y0: usize, width: usize, height: usize) -> Self {
        let max_x = self.width.saturating_sub(1);
        let max_y = self.height.saturating_sub(1);
        Self::from_fn(width, height, |x, y| {
            self.get((x0 + x).min(max_x), (y0 + y).min(max_y))
        })
    }

    /// Box-filter smoothing over the 3×3 neighbourhood
    ///
    /// Each pass moves every sample `factor` of the way toward the mean of its
    /// in-bounds neighbours (itself included). Zero iterations returns a copy.
    pub fn smoothed(&self, factor: f32, iterations: u32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let mut current = self.clone();
        for _ in 0..iterations {
            let src = &current;
            current = Self::from_fn(self.width, self.height, |x, y| {
                let mut sum = 0.0;
                let mut count = 0u32;
                for ny in y.saturating_sub(1)..=(y + 1).min(self.height - 1) {
                    for nx in x.saturating_sub(1)..=(x + 1).min(self.width - 1) {
                        sum += src.get(nx, ny);
                        count += 1;
                    }
                }
                let value = src.get(x, y);
                value + (sum / count as f32 - value) * factor
            });
        }
        current
    }

    pub fn ensure_same_dimensions(&self, other: &SampleGrid) -> Result<(), TerrainError> {
        if self.dimensions() != other.dimensions() {
            return Err(TerrainError::DimensionMismatch {
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        Ok(())
    }

    /// Bit-for-bit sample equality, ignoring cached extrema
    pub fn bitwise_eq(&self, other: &SampleGrid) -> bool {
        self.dimensions() == other.dimensions()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

fn extrema(data: &[f32]) -> (f32, f32) {
    if data.is_empty() {
        return (0.0, 0.0);
    }
    data.iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let grid = SampleGrid::from_fn(3, 2, |x, y| (y * 10 + x) as f32);
        assert_eq!(grid.values(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(grid.get(2, 1), 12.0);
        assert_eq!(grid.column(1), vec![1.0, 11.0]);
        assert_eq!(grid.row(1), vec![10.0, 11.0, 12.0]);
        assert_eq!(grid.min(), 0.0);
        assert_eq!(grid.max(), 12.0);
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = SampleGrid::new(4, 4, vec![0.0; 15]).unwrap_err();
        assert_eq!(
            err,
            TerrainError::SampleCountMismatch {
                width: 4,
                height: 4,
                expected: 16,
                found: 15
            }
        );
    }

    #[test]
    fn test_map_returns_new_grid() {
        let grid = SampleGrid::from_fn(2, 2, |x, _| x as f32);
        let doubled = grid.map(|v| v * 2.0);
        assert_eq!(grid.values(), &[0.0, 1.0, 0.0, 1.0]);
        assert_eq!(doubled.values(), &[0.0, 2.0, 0.0, 2.0]);
        assert_eq!(doubled.max(), 2.0);
    }

    #[test]
    fn test_zip_map_dimension_mismatch() {
        let a = SampleGrid::zeros(2, 2);
        let b = SampleGrid::zeros(3, 2);
        assert!(a.zip_map(&b, |x, y| x + y).is_err());
    }

    #[test]
    fn test_window_clamps_to_edge() {
        let grid = SampleGrid::from_fn(3, 3, |x, y| (y * 3 + x) as f32);
        let w = grid.window(2, 1, 2, 2);
        assert_eq!(w.values(), &[5.0, 5.0, 8.0, 8.0]);
    }

    #[test]
    fn test_smoothing_flattens_spike() {
        let grid = SampleGrid::from_fn(5, 5, |x, y| if x == 2 && y == 2 { 9.0 } else { 0.0 });
        let smooth = grid.smoothed(1.0, 1);
        assert!((smooth.get(2, 2) - 1.0).abs() < 1e-6);
        assert!(smooth.get(1, 1) > 0.0);
        assert_eq!(smooth.get(0, 0), 0.0);

        let untouched = grid.smoothed(1.0, 0);
        assert!(untouched.bitwise_eq(&grid));
    }

    #[test]
    fn test_flat_detection() {
        assert!(SampleGrid::zeros(4, 4).is_flat());
        assert!(!SampleGrid::from_fn(2, 1, |x, _| x as f32).is_flat());
    }
}
