//! Islesail - procedural island terrain generator
//!
//! Builds a tiled world from layered noise, shapes it into islands,
//! scatters objects over it, and writes the intermediate fields as images.

mod cli;

use std::time::Instant;

use clap::Parser;
use glam::IVec2;

use cli::Args;
use islesail::clouds::{CloudLayer, WindSampler};
use islesail::color::Rgba;
use islesail::export::{save_colors, save_grid};
use islesail::params::{CloudConfig, WindConfig};
use islesail::terrain::{Channel, WorldGenerator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.world_config()?;
    std::fs::create_dir_all(&args.output)?;

    println!("Islesail terrain generator");
    println!("  Tiles: {}x{}", config.grid_size.0, config.grid_size.1);
    println!(
        "  Resolution: {}x{}",
        config.tile_resolution.0, config.tile_resolution.1
    );
    println!("  Height seed: {}", config.height.noise.seed);

    let start = Instant::now();
    let generator = WorldGenerator::new(&config);
    let world = generator.generate_at(args.time)?;
    let (width, height) = world.extent();

    // Raw channels of the first tile, as the debug views show them
    if let Some(tile) = world.tile(0, 0) {
        for channel in Channel::ALL {
            let name = channel.to_string().replace('-', "_");
            save_grid(tile.raw.get(channel), args.output.join(format!("tile0_{}_raw.png", name)))?;
            save_grid(
                tile.normalized.get(channel),
                args.output.join(format!("tile0_{}.png", name)),
            )?;
        }
    }

    if let Some(mesh) = world.tile_vertex_heights(0, 0) {
        println!(
            "  Tile mesh: {}x{} vertices, heights {:.2}m..{:.2}m",
            mesh.width(),
            mesh.height(),
            mesh.min(),
            mesh.max()
        );
    }

    save_grid(generator.falloff().grid(), args.output.join("falloff.png"))?;
    let elevation = world.stitched_elevation();
    save_grid(&elevation, args.output.join("elevation.png"))?;

    // Colored map: water below sea level, land bands above, placements in red
    let land = world.land_colors();
    let water = world.water_color();
    let mut map: Vec<Rgba> = elevation
        .values()
        .iter()
        .zip(land)
        .map(|(&e, color)| if e < config.sea_level { water } else { color })
        .collect();
    for point in world.placements() {
        let (x, y) = (point.x as usize, point.y as usize);
        if x < width && y < height {
            map[y * width + x] = Rgba::RED;
        }
    }
    save_colors(&map, width, height, args.output.join("map.png"))?;

    if args.clouds {
        let wind = WindSampler::new(&WindConfig::default()).sample(IVec2::ZERO);
        let layer = CloudLayer::new(&CloudConfig::default());
        let frame = layer.generate(&wind, args.time);
        let (cw, ch) = layer.size();
        save_colors(&frame.colors, cw, ch, args.output.join("clouds.png"))?;
        println!("  Wind: strength {}, direction {}", wind.strength, wind.direction);
    }

    let elapsed = start.elapsed();
    println!("  World extent: {}x{}", width, height);
    println!("  Sea level height: {:.2}m", world.sea_level_height());
    println!("  Placements: {}", world.placements().len());
    for diagnostic in world.diagnostics() {
        println!("  Diagnostic: {}", diagnostic);
    }
    println!("  Output: {}", args.output.display());
    println!("  Time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    Ok(())
}
