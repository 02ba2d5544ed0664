//! Command-line argument parsing.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use islesail::params::{NoiseAlgorithm, WorldConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "islesail")]
#[command(about = "Generate a tiled island world and dump it as PNG images", long_about = None)]
pub struct Args {
    /// World configuration in RON (defaults are used when omitted)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for the height channel; erosion and peaks-and-valleys are offset from it
    #[arg(long)]
    pub seed: Option<i32>,

    /// Noise primitive for every channel: perlin, simplex
    #[arg(long, value_name = "ALGORITHM")]
    pub noise: Option<String>,

    /// Tiles per axis
    #[arg(long, value_name = "N")]
    pub tiles: Option<usize>,

    /// Vertices per tile per axis
    #[arg(long, value_name = "N")]
    pub resolution: Option<usize>,

    /// Hard color band edges
    #[arg(long)]
    pub flat: bool,

    /// Also render a cloud texture
    #[arg(long)]
    pub clouds: bool,

    /// Time offset applied to every noise channel
    #[arg(long, default_value_t = 0.0)]
    pub time: f32,

    /// Directory for the generated images
    #[arg(long, value_name = "DIR", default_value = "output")]
    pub output: PathBuf,
}

impl Args {
    /// Parse noise algorithm from command-line arguments
    pub fn parse_noise_algorithm(&self) -> Option<NoiseAlgorithm> {
        let name = self.noise.as_deref()?;
        match name.to_lowercase().as_str() {
            "perlin" => Some(NoiseAlgorithm::Perlin),
            "simplex" | "opensimplex" => Some(NoiseAlgorithm::Simplex),
            other => {
                eprintln!("Warning: Unknown noise algorithm '{}', keeping configured", other);
                None
            }
        }
    }

    /// Load the configuration file (if any) and apply flag overrides
    pub fn world_config(&self) -> Result<WorldConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                let config: WorldConfig = ron::from_str(&text)?;
                println!("Config: {}", path.display());
                config
            }
            None => WorldConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.height.noise.seed = seed;
            config.erosion.noise.seed = seed.wrapping_add(409);
            config.peaks_valleys.noise.seed = seed.wrapping_sub(1322);
        }
        if let Some(algorithm) = self.parse_noise_algorithm() {
            config.height.noise.algorithm = algorithm;
            config.erosion.noise.algorithm = algorithm;
            config.peaks_valleys.noise.algorithm = algorithm;
        }
        if let Some(tiles) = self.tiles {
            config.grid_size = (tiles, tiles);
        }
        if let Some(resolution) = self.resolution {
            config.tile_resolution = (resolution, resolution);
        }
        if self.flat {
            config.flat_shading = true;
        }
        Ok(config)
    }
}
