//! Default color band sets for land, water, and sky.

use crate::color::{ColorBand, ColorBandSet, Rgba};

/// Sand → grass → forest → rock → snow
pub fn land() -> ColorBandSet {
    ColorBandSet::new(vec![
        ColorBand::new(0.30, Rgba::rgb(0.76, 0.70, 0.50)),
        ColorBand::new(0.45, Rgba::rgb(0.35, 0.61, 0.24)),
        ColorBand::new(0.60, Rgba::rgb(0.15, 0.42, 0.17)),
        ColorBand::new(0.80, Rgba::rgb(0.42, 0.38, 0.35)),
        ColorBand::new(1.00, Rgba::rgb(0.95, 0.95, 0.97)),
    ])
}

/// Deep blue → light blue → foam
pub fn water() -> ColorBandSet {
    ColorBandSet::new(vec![
        ColorBand::new(0.1, Rgba::rgb(0.0, 0.5, 1.0)),
        ColorBand::new(0.3, Rgba::rgb(0.1, 0.8, 1.0)),
        ColorBand::new(0.7, Rgba::rgb(1.0, 1.0, 1.0)),
        ColorBand::new(1.0, Rgba::rgb(0.8, 0.8, 0.8)),
    ])
}

/// Clear sky → thin cloud → dense cloud
pub fn clouds() -> ColorBandSet {
    ColorBandSet::new(vec![
        ColorBand::new(0.45, Rgba::new(0.45, 0.68, 0.92, 1.0)),
        ColorBand::new(0.70, Rgba::new(0.85, 0.90, 0.96, 1.0)),
        ColorBand::new(1.00, Rgba::new(1.0, 1.0, 1.0, 1.0)),
    ])
}
