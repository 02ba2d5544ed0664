//! Poisson-disc placement of static objects over the elevation field.

use std::f32::consts::{SQRT_2, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::grid::SampleGrid;
use crate::params::PlacementSettings;

/// Smallest spacing accepted (grid cells); keeps the lookup grid bounded
pub const MIN_SPACING: f32 = 0.5;

/// Accepted object location with its world height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementPoint {
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

impl PlacementPoint {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Bridson-style disc sampler gated by an elevation band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonDiscPlacer {
    min_distance: f32,
    attempts: u32,
    elevation_range: (f32, f32),
    seed: u64,
}

impl PoissonDiscPlacer {
    pub fn new(min_distance: f32, attempts: u32, elevation_range: (f32, f32), seed: u64) -> Self {
        let (lo, hi) = elevation_range;
        Self {
            min_distance: if min_distance.is_nan() {
                MIN_SPACING
            } else {
                min_distance.max(MIN_SPACING)
            },
            attempts: attempts.max(1),
            elevation_range: (lo.min(hi), lo.max(hi)),
            seed,
        }
    }

    pub fn from_settings(settings: &PlacementSettings) -> Self {
        Self::new(
            settings.min_distance,
            settings.attempts,
            settings.elevation_range,
            settings.seed,
        )
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    /// Place points over `region`, reading elevation from `elevation`
    ///
    /// The active list starts at the region center (which is not itself
    /// placed). Each round picks a random active point and tries `attempts`
    /// candidates in the annulus `[r, 2r)`; the first valid one is accepted,
    /// otherwise the active point is retired. Output is in acceptance order.
    /// An empty result is valid when nothing fits.
    pub fn generate(
        &self,
        region: (f32, f32),
        elevation: &SampleGrid,
        elevation_scale: f32,
    ) -> Vec<PlacementPoint> {
        let region = Vec2::new(region.0, region.1);
        if !(region.x > 0.0 && region.y > 0.0) {
            return Vec::new();
        }

        let r = self.min_distance;
        // every candidate ring around the center lies wholly outside the region
        if !(2.0 * r).is_finite() || r > region.length() {
            return Vec::new();
        }
        let lookup = CellLookup::new(region, r / SQRT_2);
        let mut cells: Vec<Option<usize>> = vec![None; lookup.cols * lookup.rows];
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut points: Vec<PlacementPoint> = Vec::new();
        let mut active = vec![region * 0.5];

        while !active.is_empty() {
            let index = rng.gen_range(0..active.len());
            let center = active[index];
            let mut accepted = false;

            for _ in 0..self.attempts {
                let angle = rng.gen::<f32>() * TAU;
                let distance = rng.gen_range(r..2.0 * r);
                let candidate = center + Vec2::new(angle.sin(), angle.cos()) * distance;

                if let Some(value) =
                    self.check_candidate(candidate, region, &lookup, &cells, &points, elevation)
                {
                    points.push(PlacementPoint {
                        x: candidate.x,
                        y: candidate.y,
                        height: value * elevation_scale,
                    });
                    cells[lookup.index(candidate)] = Some(points.len() - 1);
                    active.push(candidate);
                    accepted = true;
                    break;
                }
            }

            if !accepted {
                active.swap_remove(index);
            }
        }

        log::debug!(
            "placed {} objects over {}x{} (min distance {})",
            points.len(),
            region.x,
            region.y,
            r
        );
        points
    }

    /// Elevation sample backing `candidate` if it passes every check
    fn check_candidate(
        &self,
        candidate: Vec2,
        region: Vec2,
        lookup: &CellLookup,
        cells: &[Option<usize>],
        points: &[PlacementPoint],
        elevation: &SampleGrid,
    ) -> Option<f32> {
        if candidate.x < 0.0 || candidate.y < 0.0 || candidate.x >= region.x || candidate.y >= region.y
        {
            return None;
        }

        // a closer point is at most two cells away
        let (cx, cy) = lookup.cell(candidate);
        let min_sq = self.min_distance * self.min_distance;
        for y in cy.saturating_sub(2)..=(cy + 2).min(lookup.rows - 1) {
            for x in cx.saturating_sub(2)..=(cx + 2).min(lookup.cols - 1) {
                if let Some(i) = cells[y * lookup.cols + x] {
                    if points[i].position().distance_squared(candidate) < min_sq {
                        return None;
                    }
                }
            }
        }

        let value = elevation.try_get(candidate.x.round() as usize, candidate.y.round() as usize)?;
        let (lo, hi) = self.elevation_range;
        (value >= lo && value <= hi).then_some(value)
    }
}

/// Uniform acceleration grid; each cell holds at most one accepted point
struct CellLookup {
    cell_size: f32,
    cols: usize,
    rows: usize,
}

impl CellLookup {
    fn new(region: Vec2, cell_size: f32) -> Self {
        Self {
            cell_size,
            cols: ((region.x / cell_size).ceil() as usize).max(1),
            rows: ((region.y / cell_size).ceil() as usize).max(1),
        }
    }

    fn cell(&self, p: Vec2) -> (usize, usize) {
        (
            ((p.x / self.cell_size) as usize).min(self.cols - 1),
            ((p.y / self.cell_size) as usize).min(self.rows - 1),
        )
    }

    fn index(&self, p: Vec2) -> usize {
        let (x, y) = self.cell(p);
        y * self.cols + x
    }
}

/// One-shot placement with explicit parameters
pub fn generate(
    min_distance: f32,
    region: (f32, f32),
    attempts: u32,
    elevation_range: (f32, f32),
    elevation: &SampleGrid,
    elevation_scale: f32,
    seed: u64,
) -> Vec<PlacementPoint> {
    PoissonDiscPlacer::new(min_distance, attempts, elevation_range, seed).generate(
        region,
        elevation,
        elevation_scale,
    )
}
