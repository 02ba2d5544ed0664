//! Radial edge suppression that turns a noise field into islands.

use crate::grid::SampleGrid;
use crate::params::FalloffShape;

/// Read-only `width × height` suppression mask, 0 at the center and 1 at the edges
#[derive(Debug, Clone, PartialEq)]
pub struct FalloffMap {
    grid: SampleGrid,
}

impl FalloffMap {
    /// Build the mask for a region
    ///
    /// Cell `(x, y)` takes `curve(max(|2x/W - 1|, |2y/H - 1|))` (Chebyshev
    /// distance from the center). A disabled shape yields all zeros.
    pub fn new(width: usize, height: usize, shape: &FalloffShape) -> Self {
        if !shape.enabled {
            return Self {
                grid: SampleGrid::zeros(width, height),
            };
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let grid = SampleGrid::from_fn(width, height, |x, y| {
            let nx = (2.0 * x as f32 / w - 1.0).abs();
            let ny = (2.0 * y as f32 / h - 1.0).abs();
            falloff_curve(nx.max(ny), shape.steepness, shape.shift)
        });
        Self { grid }
    }

    /// `N × N` mask
    pub fn square(size: usize, shape: &FalloffShape) -> Self {
        Self::new(size, size, shape)
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.grid.get(x, y)
    }

    /// Tile-sized slice starting at a global sample offset
    pub fn window(&self, x0: usize, y0: usize, width: usize, height: usize) -> SampleGrid {
        self.grid.window(x0, y0, width, height)
    }
}

/// `v^a / (v^a + (b - b*v)^a)` for `v` in [0, 1]
pub fn falloff_curve(v: f32, a: f32, b: f32) -> f32 {
    let a = a.max(f32::EPSILON);
    let b = b.max(0.0);
    let v = v.clamp(0.0, 1.0);
    let num = v.powf(a);
    let den = num + (b - b * v).powf(a);
    if den <= 0.0 {
        0.0
    } else {
        num / den
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_at_center_one_at_corner() {
        let map = FalloffMap::square(64, &FalloffShape::default());
        assert_eq!(map.get(32, 32), 0.0);
        assert!((map.get(0, 0) - 1.0).abs() < 1e-6);
        assert!((map.get(0, 32) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic_toward_every_edge() {
        let map = FalloffMap::square(64, &FalloffShape::default());
        let c = 32;
        for x in c..63 {
            assert!(map.get(x, c) <= map.get(x + 1, c), "rightward dip at x={}", x);
            assert!(map.get(c, x) <= map.get(c, x + 1), "downward dip at y={}", x);
        }
        for x in 1..=c {
            assert!(map.get(x, c) <= map.get(x - 1, c), "leftward dip at x={}", x);
            assert!(map.get(c, x) <= map.get(c, x - 1), "upward dip at y={}", x);
            assert!(map.get(x, x) <= map.get(x - 1, x - 1), "diagonal dip at {}", x);
        }
    }

    #[test]
    fn test_values_in_unit_range() {
        let map = FalloffMap::new(40, 24, &FalloffShape::default());
        assert!(map.grid().min() >= 0.0 && map.grid().max() <= 1.0);
    }

    #[test]
    fn test_disabled_shape_is_zero() {
        let shape = FalloffShape {
            enabled: false,
            ..FalloffShape::default()
        };
        let map = FalloffMap::square(16, &shape);
        assert!(map.grid().values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_curve_degenerate_parameters_stay_finite() {
        assert_eq!(falloff_curve(0.0, 3.0, 0.0), 0.0);
        assert!(falloff_curve(0.5, 0.0, 2.2).is_finite());
        assert!(falloff_curve(0.5, 3.0, -1.0).is_finite());
    }

    #[test]
    fn test_window_matches_source() {
        let map = FalloffMap::square(9, &FalloffShape::default());
        let window = map.window(4, 0, 5, 5);
        assert_eq!(window.get(0, 0), map.get(4, 0));
        assert_eq!(window.get(4, 4), map.get(8, 4));
    }
}
