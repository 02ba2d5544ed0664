//! Multi-octave coherent noise over tiled grids.

use noise::{NoiseFn, OpenSimplex, Perlin};

use crate::grid::SampleGrid;
use crate::params::{NoiseAlgorithm, NoiseSettings};

/// Base 2-D primitive, seeded once per field
#[derive(Debug, Clone)]
enum Primitive {
    Perlin(Perlin),
    Simplex(OpenSimplex),
}

impl Primitive {
    fn new(algorithm: NoiseAlgorithm, seed: i32) -> Self {
        // two's-complement reinterpretation keeps negative seeds distinct
        let seed = seed as u32;
        match algorithm {
            NoiseAlgorithm::Perlin => Self::Perlin(Perlin::new(seed)),
            NoiseAlgorithm::Simplex => Self::Simplex(OpenSimplex::new(seed)),
        }
    }

    /// Sample in [0, 1]
    fn sample01(&self, x: f64, y: f64) -> f64 {
        let raw = match self {
            Self::Perlin(p) => p.get([x, y]),
            Self::Simplex(s) => s.get([x, y]),
        };
        (raw * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

/// Largest coordinate magnitude handed to a primitive; past it the lattice
/// cell index no longer fits an `isize`
const MAX_LATTICE_COORD: f64 = 1.0e15;

/// Octaves whose coordinates leave this range are skipped
fn in_lattice_range(v: f64) -> bool {
    v.is_finite() && v.abs() <= MAX_LATTICE_COORD
}

/// Deterministic fractal noise evaluator for one channel
///
/// Holds no mutable state: identical inputs always give bit-identical grids.
#[derive(Debug, Clone)]
pub struct CoherentNoiseField {
    settings: NoiseSettings,
    primitive: Primitive,
}

impl CoherentNoiseField {
    /// Create a field; settings are clamped into their valid ranges first
    pub fn new(settings: NoiseSettings) -> Self {
        let settings = settings.clamped();
        Self {
            primitive: Primitive::new(settings.algorithm, settings.seed),
            settings,
        }
    }

    pub fn settings(&self) -> &NoiseSettings {
        &self.settings
    }

    /// Octave sum at a global grid coordinate
    ///
    /// Octave `k` samples the primitive at `(g + seed + t) / scale * lacunarity^k`,
    /// rescales it to [-1, 1] and weights it by `persistence^k`.
    pub fn sample(&self, global_x: f64, global_y: f64, time_offset: f64) -> f32 {
        let s = &self.settings;
        let seed = s.seed as f64;
        let scale = s.scale as f64;
        let base_x = (global_x + seed + time_offset) / scale;
        let base_y = (global_y + seed + time_offset) / scale;

        let mut amplitude = 1.0f64;
        let mut frequency = 1.0f64;
        let mut value = 0.0f64;
        for _ in 0..s.octaves {
            let (x, y) = (base_x * frequency, base_y * frequency);
            if in_lattice_range(x) && in_lattice_range(y) {
                let n = self.primitive.sample01(x, y);
                value += (n * 2.0 - 1.0) * amplitude;
            }

            amplitude *= s.persistence as f64;
            frequency *= s.lacunarity as f64;
        }
        value as f32
    }

    /// Fill a `size` grid for the tile at `origin`
    ///
    /// Cell `(i, j)` reads global coordinate
    /// `(origin.x * (size.x - 1) + i, origin.y * (size.y - 1) + j)`, so
    /// neighbouring tiles evaluate their shared border at identical points.
    pub fn generate(&self, origin: (i32, i32), size: (usize, usize), time_offset: f32) -> SampleGrid {
        let step_x = size.0 as i64 - 1;
        let step_y = size.1 as i64 - 1;
        let chunk_x = origin.0 as i64 * step_x;
        let chunk_y = origin.1 as i64 * step_y;
        let t = time_offset as f64;

        let grid = SampleGrid::from_fn(size.0, size.1, |i, j| {
            let global_x = (chunk_x + i as i64) as f64;
            let global_y = (chunk_y + j as i64) as f64;
            self.sample(global_x, global_y, t)
        });

        log::debug!(
            "generated {:?} noise tile {:?} ({}x{}), range [{}, {}]",
            self.settings.algorithm,
            origin,
            size.0,
            size.1,
            grid.min(),
            grid.max()
        );
        grid
    }
}

/// One-shot generation without keeping the field around
pub fn generate(
    origin: (i32, i32),
    size: (usize, usize),
    settings: NoiseSettings,
    time_offset: f32,
) -> SampleGrid {
    CoherentNoiseField::new(settings).generate(origin, size, time_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_settings() -> NoiseSettings {
        NoiseSettings {
            seed: 12345,
            octaves: 6,
            scale: 200.0,
            persistence: 0.5,
            lacunarity: 2.0,
            algorithm: NoiseAlgorithm::Simplex,
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        for algorithm in [NoiseAlgorithm::Perlin, NoiseAlgorithm::Simplex] {
            let settings = NoiseSettings {
                algorithm,
                ..scenario_settings()
            };
            let a = generate((0, 0), (64, 64), settings, 0.0);
            let b = generate((0, 0), (64, 64), settings, 0.0);
            assert!(a.bitwise_eq(&b), "{:?} output changed between calls", algorithm);
        }
    }

    #[test]
    fn test_adjacent_tiles_share_border_column() {
        let settings = scenario_settings();
        let left = generate((0, 0), (64, 64), settings, 0.0);
        let right = generate((1, 0), (64, 64), settings, 0.0);
        assert_eq!(left.column(63), right.column(0));
    }

    #[test]
    fn test_vertically_adjacent_tiles_share_border_row() {
        let settings = NoiseSettings {
            algorithm: NoiseAlgorithm::Perlin,
            ..scenario_settings()
        };
        let top = generate((2, 0), (33, 17), settings, 0.0);
        let bottom = generate((2, 1), (33, 17), settings, 0.0);
        assert_eq!(top.row(16), bottom.row(0));
    }

    #[test]
    fn test_tiles_in_2x2_grid_are_distinct() {
        let settings = scenario_settings();
        let tiles: Vec<SampleGrid> = [(0, 0), (1, 0), (0, 1), (1, 1)]
            .into_iter()
            .map(|origin| generate(origin, (32, 32), settings, 0.0))
            .collect();
        for a in 0..tiles.len() {
            for b in (a + 1)..tiles.len() {
                assert!(!tiles[a].bitwise_eq(&tiles[b]), "tiles {} and {} equal", a, b);
            }
        }
    }

    #[test]
    fn test_octave_sum_is_bounded_by_amplitude_series() {
        let settings = NoiseSettings {
            octaves: 4,
            persistence: 0.5,
            ..scenario_settings()
        };
        let grid = generate((0, 0), (48, 48), settings, 0.0);
        // 1 + 0.5 + 0.25 + 0.125
        assert!(grid.min() >= -1.875 && grid.max() <= 1.875);
        assert!(!grid.is_flat());
    }

    #[test]
    fn test_time_offset_moves_the_field() {
        let settings = scenario_settings();
        let still = generate((0, 0), (16, 16), settings, 0.0);
        let moved = generate((0, 0), (16, 16), settings, 37.5);
        assert!(!still.bitwise_eq(&moved));
    }

    #[test]
    fn test_seed_changes_output() {
        let a = generate((0, 0), (16, 16), scenario_settings(), 0.0);
        let b = generate(
            (0, 0),
            (16, 16),
            NoiseSettings {
                seed: -12345,
                ..scenario_settings()
            },
            0.0,
        );
        assert!(!a.bitwise_eq(&b));
    }

    #[test]
    fn test_field_clamps_settings() {
        let field = CoherentNoiseField::new(NoiseSettings {
            octaves: 0,
            scale: 0.0,
            ..scenario_settings()
        });
        assert_eq!(field.settings().octaves, 1);
        assert_eq!(field.settings().scale, 1.0);
    }

    #[test]
    fn test_deep_octave_stacks_stay_finite() {
        for algorithm in [NoiseAlgorithm::Perlin, NoiseAlgorithm::Simplex] {
            for lacunarity in [2.0, 10.0] {
                let settings = NoiseSettings {
                    seed: 10_000,
                    octaves: 200,
                    lacunarity,
                    algorithm,
                    ..scenario_settings()
                };
                let grid = generate((50, -50), (4, 4), settings, 0.0);
                assert!(
                    grid.values().iter().all(|v| v.is_finite()),
                    "{:?} at lacunarity {} produced {:?}",
                    algorithm,
                    lacunarity,
                    grid.values()
                );
                assert!(grid.bitwise_eq(&generate((50, -50), (4, 4), settings, 0.0)));
            }
        }
    }

    #[test]
    fn test_out_of_range_octaves_are_skipped() {
        assert!(in_lattice_range(-1.0e12));
        assert!(!in_lattice_range(1.0e300));
        assert!(!in_lattice_range(f64::INFINITY));
        assert!(!in_lattice_range(f64::NAN));
    }
}
