//! Two-phase world generation over a grid of tiles.
//!
//! Phase 1 generates every tile's raw channels and folds them into per-channel
//! extrema. Phase 2 starts only once all of phase 1 is done: it normalizes each
//! tile against those global extrema, composites elevation, and applies the
//! falloff window for the tile's position. Placement runs over the stitched
//! result.

use std::fmt;

use super::compositor::{apply_offsets, find_identical, Channel, ChannelSet, ElevationCompositor};
use super::falloff::FalloffMap;
use crate::color::{ColorBandSet, Rgba};
use crate::error::TerrainError;
use crate::grid::SampleGrid;
use crate::noise::CoherentNoiseField;
use crate::normalize::{normalize, ExtremaTracker};
use crate::params::WorldConfig;
use crate::placement::{PlacementPoint, PoissonDiscPlacer};

/// Pipeline stage at which tile outputs are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    RawHeight,
    Combined,
}

/// Non-fatal condition found during a generation pass
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A channel produced the same value everywhere; it was normalized to zeros
    DegenerateNoiseField { channel: Channel, value: f32 },

    /// Two differently positioned tiles produced bit-identical samples
    TileConsistencyViolation {
        stage: CheckStage,
        first: (i32, i32),
        second: (i32, i32),
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DegenerateNoiseField { channel, value } => {
                write!(f, "degenerate {} noise field (every sample = {})", channel, value)
            }
            Diagnostic::TileConsistencyViolation {
                stage,
                first,
                second,
            } => write!(
                f,
                "tiles {:?} and {:?} have identical {} samples",
                first,
                second,
                match stage {
                    CheckStage::RawHeight => "raw height",
                    CheckStage::Combined => "combined elevation",
                }
            ),
        }
    }
}

/// One cell of the world's tile grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridTile {
    /// Tile coordinate in the tile grid
    pub position: (i32, i32),

    /// Channel samples straight from the noise fields
    pub raw: ChannelSet,

    /// Channel samples after global normalization
    pub normalized: ChannelSet,

    /// Final elevation, falloff and offsets applied
    pub elevation: SampleGrid,
}

impl GridTile {
    pub fn resolution(&self) -> (usize, usize) {
        self.elevation.dimensions()
    }

    /// World-space vertex heights at `detail` vertices per sample per axis
    ///
    /// Vertex `(i, j)` takes sample `(i / detail, j / detail)`.
    pub fn vertex_heights(&self, detail: usize, height_multiplier: f32) -> SampleGrid {
        let detail = detail.max(1);
        let (w, h) = self.resolution();
        SampleGrid::from_fn(w * detail, h * detail, |i, j| {
            self.elevation.get(i / detail, j / detail) * height_multiplier
        })
    }

    /// One color per elevation sample, row-major
    pub fn vertex_colors(&self, bands: &ColorBandSet, flat: bool) -> Vec<Rgba> {
        bands.colors(&self.elevation, flat)
    }
}

/// Global `(min, max)` of each channel across every tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelRanges {
    pub height: (f32, f32),
    pub erosion: (f32, f32),
    pub peaks_valleys: (f32, f32),
}

impl ChannelRanges {
    pub fn get(&self, channel: Channel) -> (f32, f32) {
        match channel {
            Channel::Height => self.height,
            Channel::Erosion => self.erosion,
            Channel::PeaksValleys => self.peaks_valleys,
        }
    }
}

/// Everything one generation pass produced
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    tiles: Vec<GridTile>,
    ranges: ChannelRanges,
    placements: Vec<PlacementPoint>,
    diagnostics: Vec<Diagnostic>,
}

impl World {
    /// Configuration actually used (after clamping)
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn grid_size(&self) -> (usize, usize) {
        self.config.grid_size
    }

    pub fn tile_resolution(&self) -> (usize, usize) {
        self.config.tile_resolution
    }

    /// Tiles in row-major tile order
    pub fn tiles(&self) -> &[GridTile] {
        &self.tiles
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&GridTile> {
        let (gx, gy) = self.grid_size();
        if x < gx && y < gy {
            self.tiles.get(y * gx + x)
        } else {
            None
        }
    }

    pub fn channel_ranges(&self) -> &ChannelRanges {
        &self.ranges
    }

    pub fn placements(&self) -> &[PlacementPoint] {
        &self.placements
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// No tile-consistency violation was found
    pub fn is_consistent(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::TileConsistencyViolation { .. }))
    }

    pub fn sea_level_height(&self) -> f32 {
        self.config.sea_level_height()
    }

    /// Size of the assembled world in samples
    pub fn extent(&self) -> (usize, usize) {
        self.config.world_extent()
    }

    /// All tiles' elevation assembled into one grid over shared borders
    pub fn stitched_elevation(&self) -> SampleGrid {
        self.stitch(|tile| &tile.elevation)
    }

    /// One channel's samples assembled over the whole world
    pub fn stitched_channel(&self, channel: Channel, normalized: bool) -> SampleGrid {
        self.stitch(|tile| {
            if normalized {
                tile.normalized.get(channel)
            } else {
                tile.raw.get(channel)
            }
        })
    }

    /// Mesh vertex heights of one tile at the configured detail and height multiplier
    pub fn tile_vertex_heights(&self, x: usize, y: usize) -> Option<SampleGrid> {
        self.tile(x, y)
            .map(|tile| tile.vertex_heights(self.config.mesh_detail, self.config.height_multiplier))
    }

    /// Land colors over the stitched elevation
    pub fn land_colors(&self) -> Vec<Rgba> {
        self.config
            .land_bands
            .colors(&self.stitched_elevation(), self.config.flat_shading)
    }

    /// Color of the water plane at sea level
    pub fn water_color(&self) -> Rgba {
        self.config
            .water_bands
            .color(self.config.sea_level, self.config.flat_shading)
    }

    fn stitch<'a>(&'a self, pick: impl Fn(&'a GridTile) -> &'a SampleGrid) -> SampleGrid {
        stitch_tiles(
            self.grid_size(),
            self.tile_resolution(),
            |tx, ty| pick(&self.tiles[ty * self.config.grid_size.0 + tx]),
        )
    }
}

/// Assemble per-tile grids into one world grid; each tile owns the shared
/// border it has with its lower-index neighbour's far edge
fn stitch_tiles<'a>(
    grid_size: (usize, usize),
    resolution: (usize, usize),
    tile_at: impl Fn(usize, usize) -> &'a SampleGrid,
) -> SampleGrid {
    let (gx, gy) = grid_size;
    let (step_x, step_y) = (resolution.0 - 1, resolution.1 - 1);
    SampleGrid::from_fn(gx * step_x + 1, gy * step_y + 1, |x, y| {
        let tx = (x / step_x).min(gx - 1);
        let ty = (y / step_y).min(gy - 1);
        tile_at(tx, ty).get(x - tx * step_x, y - ty * step_y)
    })
}

/// Builds a fresh `World` from a configuration on every call
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    config: WorldConfig,
    height: CoherentNoiseField,
    erosion: CoherentNoiseField,
    peaks_valleys: CoherentNoiseField,
    compositor: ElevationCompositor,
    falloff: FalloffMap,
}

impl WorldGenerator {
    /// Clamp the configuration and resolve every channel's noise and curve
    pub fn new(config: &WorldConfig) -> Self {
        let config = config.clamped();
        let (width, height) = config.world_extent();
        let falloff = FalloffMap::new(width, height, &config.falloff);

        Self {
            height: CoherentNoiseField::new(config.height.noise),
            erosion: CoherentNoiseField::new(config.erosion.noise),
            peaks_valleys: CoherentNoiseField::new(config.peaks_valleys.noise),
            compositor: ElevationCompositor::new(
                config.height.curve.clone(),
                config.erosion.curve.clone(),
                config.peaks_valleys.curve.clone(),
            ),
            falloff,
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Falloff mask over the whole world extent
    pub fn falloff(&self) -> &FalloffMap {
        &self.falloff
    }

    fn field(&self, channel: Channel) -> &CoherentNoiseField {
        match channel {
            Channel::Height => &self.height,
            Channel::Erosion => &self.erosion,
            Channel::PeaksValleys => &self.peaks_valleys,
        }
    }

    /// Run both phases, then placement
    pub fn generate(&self) -> Result<World, TerrainError> {
        self.generate_at(0.0)
    }

    /// Same as `generate` with every channel shifted by `time_offset`
    pub fn generate_at(&self, time_offset: f32) -> Result<World, TerrainError> {
        let config = &self.config;
        let (gx, gy) = config.grid_size;
        if gx == 0 || gy == 0 {
            return Err(TerrainError::EmptyTileGrid(gx, gy));
        }
        let resolution = config.tile_resolution;
        let positions: Vec<(i32, i32)> = (0..gy)
            .flat_map(|y| (0..gx).map(move |x| (x as i32, y as i32)))
            .collect();
        let mut diagnostics = Vec::new();

        // Phase 1: raw samples and global extrema
        let mut trackers = [ExtremaTracker::new(); 3];
        let raw: Vec<ChannelSet> = positions
            .iter()
            .map(|&origin| {
                let set = ChannelSet {
                    height: self.height.generate(origin, resolution, time_offset),
                    erosion: self.erosion.generate(origin, resolution, time_offset),
                    peaks_valleys: self.peaks_valleys.generate(origin, resolution, time_offset),
                };
                for (tracker, channel) in trackers.iter_mut().zip(Channel::ALL) {
                    tracker.observe(set.get(channel));
                }
                set
            })
            .collect();

        let ranges = ChannelRanges {
            height: trackers[0].range(),
            erosion: trackers[1].range(),
            peaks_valleys: trackers[2].range(),
        };
        log::debug!("channel ranges after phase 1: {:?}", ranges);

        for (tracker, channel) in trackers.iter().zip(Channel::ALL) {
            if tracker.is_degenerate() {
                let value = tracker.range().0;
                log::warn!(
                    "{} channel (seed {}) is flat at {}",
                    channel,
                    self.field(channel).settings().seed,
                    value
                );
                diagnostics.push(Diagnostic::DegenerateNoiseField { channel, value });
            }
        }
        check_distinct(
            CheckStage::RawHeight,
            raw.iter().map(|set| &set.height),
            &positions,
            &mut diagnostics,
        );

        // Phase 2: normalize, composite, subtract falloff
        let mut normalized = Vec::with_capacity(raw.len());
        let mut combined = Vec::with_capacity(raw.len());
        for (set, &(tx, ty)) in raw.iter().zip(&positions) {
            let norm = set.map(|channel, grid| {
                let (min, max) = ranges.get(channel);
                normalize(grid, min, max, config.normalization)
            });
            let falloff = self.falloff.window(
                tx as usize * (resolution.0 - 1),
                ty as usize * (resolution.1 - 1),
                resolution.0,
                resolution.1,
            );
            combined.push(self.compositor.composite(&norm, &falloff)?);
            normalized.push(norm);
        }

        if config.smoothing.iterations > 0 {
            combined = smooth_across_tiles(&combined, config);
        }
        let elevation: Vec<SampleGrid> = combined
            .iter()
            .map(|grid| apply_offsets(grid, config.combined_offsets))
            .collect();
        check_distinct(
            CheckStage::Combined,
            elevation.iter(),
            &positions,
            &mut diagnostics,
        );

        let tiles: Vec<GridTile> = positions
            .into_iter()
            .zip(raw)
            .zip(normalized)
            .zip(elevation)
            .map(|(((position, raw), normalized), elevation)| GridTile {
                position,
                raw,
                normalized,
                elevation,
            })
            .collect();

        let mut world = World {
            config: config.clone(),
            tiles,
            ranges,
            placements: Vec::new(),
            diagnostics,
        };

        if config.placement.enabled {
            let stitched = world.stitched_elevation();
            let (w, h) = stitched.dimensions();
            world.placements = PoissonDiscPlacer::from_settings(&config.placement).generate(
                (w as f32, h as f32),
                &stitched,
                config.height_multiplier,
            );
        }

        log::info!(
            "generated {}x{} tiles at {}x{}: {} placements, {} diagnostics",
            gx,
            gy,
            resolution.0,
            resolution.1,
            world.placements.len(),
            world.diagnostics.len()
        );
        Ok(world)
    }
}

/// Smooth the assembled world so shared borders stay identical, then split
/// it back into tiles
fn smooth_across_tiles(tiles: &[SampleGrid], config: &WorldConfig) -> Vec<SampleGrid> {
    let (gx, gy) = config.grid_size;
    let (w, h) = config.tile_resolution;
    let stitched = stitch_tiles(config.grid_size, config.tile_resolution, |tx, ty| {
        &tiles[ty * gx + tx]
    });
    let smoothed = stitched.smoothed(config.smoothing.factor, config.smoothing.iterations);
    (0..gy)
        .flat_map(|ty| (0..gx).map(move |tx| (tx, ty)))
        .map(|(tx, ty)| smoothed.window(tx * (w - 1), ty * (h - 1), w, h))
        .collect()
}

fn check_distinct<'a>(
    stage: CheckStage,
    grids: impl IntoIterator<Item = &'a SampleGrid>,
    positions: &[(i32, i32)],
    diagnostics: &mut Vec<Diagnostic>,
) {
    for (a, b) in find_identical(grids) {
        let diagnostic = Diagnostic::TileConsistencyViolation {
            stage,
            first: positions[a],
            second: positions[b],
        };
        log::warn!("{}", diagnostic);
        diagnostics.push(diagnostic);
    }
}
