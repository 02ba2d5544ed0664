//! PNG dumps of sample grids and color arrays for visual inspection.

use std::path::Path;

use image::{GrayImage, Luma, Rgba as Pixel, RgbaImage};

use crate::color::Rgba;
use crate::error::{ExportError, TerrainError};
use crate::grid::SampleGrid;

fn image_size(width: usize, height: usize) -> Result<(u32, u32), ExportError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(ExportError::TooLarge(width, height)),
    }
}

/// Grayscale image; samples are clamped to [0, 1] and mapped onto 0..=255
pub fn grid_to_image(grid: &SampleGrid) -> Result<GrayImage, ExportError> {
    let (w, h) = image_size(grid.width(), grid.height())?;
    Ok(GrayImage::from_fn(w, h, |x, y| {
        let v = grid.get(x as usize, y as usize);
        Luma([(v.clamp(0.0, 1.0) * 255.0).round() as u8])
    }))
}

/// RGBA image from row-major colors
pub fn colors_to_image(
    colors: &[Rgba],
    width: usize,
    height: usize,
) -> Result<RgbaImage, ExportError> {
    if colors.len() != width * height {
        return Err(TerrainError::SampleCountMismatch {
            width,
            height,
            expected: width * height,
            found: colors.len(),
        }
        .into());
    }
    let (w, h) = image_size(width, height)?;
    Ok(RgbaImage::from_fn(w, h, |x, y| {
        Pixel(colors[y as usize * width + x as usize].to_rgba8())
    }))
}

pub fn save_grid(grid: &SampleGrid, path: impl AsRef<Path>) -> Result<(), ExportError> {
    grid_to_image(grid)?.save(path.as_ref())?;
    log::debug!("wrote {}", path.as_ref().display());
    Ok(())
}

pub fn save_colors(
    colors: &[Rgba],
    width: usize,
    height: usize,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    colors_to_image(colors, width, height)?.save(path.as_ref())?;
    log::debug!("wrote {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_maps_to_gray_levels() {
        let grid = SampleGrid::new(3, 1, vec![-0.5, 0.5, 2.0]).unwrap();
        let img = grid_to_image(&grid).unwrap();
        assert_eq!(img.dimensions(), (3, 1));
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [128]);
        assert_eq!(img.get_pixel(2, 0).0, [255]);
    }

    #[test]
    fn test_colors_keep_row_major_layout() {
        let colors = vec![Rgba::RED, Rgba::GREEN, Rgba::BLUE, Rgba::WHITE];
        let img = colors_to_image(&colors, 2, 2).unwrap();
        assert_eq!(img.get_pixel(1, 0).0, [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(0, 1).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_color_count_mismatch_is_an_error() {
        let colors = vec![Rgba::RED; 3];
        assert!(matches!(
            colors_to_image(&colors, 2, 2),
            Err(ExportError::Terrain(TerrainError::SampleCountMismatch { .. }))
        ));
    }
}
