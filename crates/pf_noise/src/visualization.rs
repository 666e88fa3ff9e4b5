use std::str::FromStr;

use pf_core::NoiseError;

use crate::grid::SampleGrid;

/// Colour ramps for previewing a normalized grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorMap {
    Grayscale,
    #[default]
    Viridis,
}

/// Viridis control points at t = 0, 0.25, 0.5, 0.75, 1.
const VIRIDIS: [[f64; 3]; 5] = [
    [68.0, 1.0, 84.0],
    [59.0, 82.0, 139.0],
    [33.0, 145.0, 140.0],
    [94.0, 201.0, 98.0],
    [253.0, 231.0, 37.0],
];

impl ColorMap {
    pub fn all() -> &'static [ColorMap] {
        &[Self::Grayscale, Self::Viridis]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Viridis => "viridis",
        }
    }
}

impl FromStr for ColorMap {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|map| map.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NoiseError::invalid("colormap", format!("unknown colour map `{s}`")))
    }
}

/// Convert a grayscale value to RGBA.
pub fn grayscale_to_rgba(value: f64, min: f64, max: f64) -> [u8; 4] {
    let normalized = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let gray = (normalized * 255.0) as u8;
    [gray, gray, gray, 255]
}

/// Map t in [0, 1] through the viridis ramp.
pub fn viridis_to_rgba(t: f64) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lower as f64;

    let (a, b) = (VIRIDIS[lower], VIRIDIS[lower + 1]);
    let channel = |i: usize| (a[i] + (b[i] - a[i]) * frac).round() as u8;
    [channel(0), channel(1), channel(2), 255]
}

/// Colour for a sample in [-1, 1]. Out-of-range values are clamped for
/// display only.
pub fn value_to_rgba(value: f64, map: ColorMap) -> [u8; 4] {
    match map {
        ColorMap::Grayscale => grayscale_to_rgba(value, -1.0, 1.0),
        ColorMap::Viridis => viridis_to_rgba((value + 1.0) / 2.0),
    }
}

/// Row-major RGBA8 buffer, one pixel per sample.
pub fn grid_to_rgba(grid: &SampleGrid, map: ColorMap) -> Vec<u8> {
    grid.values()
        .iter()
        .flat_map(|&v| value_to_rgba(v, map))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_endpoints() {
        assert_eq!(value_to_rgba(-1.0, ColorMap::Grayscale), [0, 0, 0, 255]);
        assert_eq!(value_to_rgba(1.0, ColorMap::Grayscale), [255, 255, 255, 255]);
        assert_eq!(value_to_rgba(7.0, ColorMap::Grayscale), [255, 255, 255, 255]);
    }

    #[test]
    fn viridis_endpoints_match_control_points() {
        assert_eq!(value_to_rgba(-1.0, ColorMap::Viridis), [68, 1, 84, 255]);
        assert_eq!(value_to_rgba(0.0, ColorMap::Viridis), [33, 145, 140, 255]);
        assert_eq!(value_to_rgba(1.0, ColorMap::Viridis), [253, 231, 37, 255]);
    }

    #[test]
    fn parses_names() {
        assert_eq!("Viridis".parse::<ColorMap>(), Ok(ColorMap::Viridis));
        assert_eq!("grayscale".parse::<ColorMap>(), Ok(ColorMap::Grayscale));
        assert!("jet".parse::<ColorMap>().is_err());
    }

    #[test]
    fn buffer_has_four_bytes_per_sample() {
        let grid = SampleGrid::from_parts(2, 3, vec![0.0; 6]).unwrap();
        assert_eq!(grid_to_rgba(&grid, ColorMap::Grayscale).len(), 24);
    }
}
