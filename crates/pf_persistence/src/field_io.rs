use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba};
use pf_core::NoiseConfig;
use pf_noise::visualization::grid_to_rgba;
use pf_noise::{ColorMap, SampleGrid};
use tracing::info;

/// Default directory for saved configurations.
pub const CONFIGS_DIR: &str = "assets/noise";

/// Error type for configuration and grid I/O.
#[derive(Debug, thiserror::Error)]
pub enum FieldIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON serialization error: {0}")]
    Ron(#[from] ron::Error),
    #[error("RON parse error: {0}")]
    RonSpanned(#[from] ron::error::SpannedError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("grid shape mismatch: {0}")]
    Shape(String),
}

fn pretty() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::new()
        .depth_limit(2)
        .separate_tuple_members(true)
}

/// Save a noise configuration to a RON file.
///
/// # Arguments
/// * `path` - File path to save to
/// * `config` - Configuration to save
pub fn save_config(path: &Path, config: &NoiseConfig) -> Result<(), FieldIoError> {
    let ron_string = ron::ser::to_string_pretty(config, pretty())?;
    fs::write(path, ron_string)?;
    info!(path = %path.display(), "saved noise config");
    Ok(())
}

/// Load a noise configuration. Missing fields take their defaults.
///
/// # Arguments
/// * `path` - File path to load from
pub fn load_config(path: &Path) -> Result<NoiseConfig, FieldIoError> {
    let contents = fs::read_to_string(path)?;
    let config: NoiseConfig = ron::from_str(&contents)?;
    Ok(config)
}

/// Save a sample grid to a RON file.
///
/// # Arguments
/// * `path` - File path to save to
/// * `grid` - Composed grid to save
pub fn save_grid(path: &Path, grid: &SampleGrid) -> Result<(), FieldIoError> {
    let ron_string = ron::ser::to_string(grid)?;
    fs::write(path, ron_string)?;
    info!(path = %path.display(), rows = grid.rows(), cols = grid.cols(), "saved sample grid");
    Ok(())
}

/// Load a sample grid, rejecting data whose length disagrees with its
/// declared dimensions.
///
/// # Arguments
/// * `path` - File path to load from
pub fn load_grid(path: &Path) -> Result<SampleGrid, FieldIoError> {
    let contents = fs::read_to_string(path)?;
    let grid: SampleGrid = ron::from_str(&contents)?;
    if !grid.is_consistent() {
        return Err(FieldIoError::Shape(format!(
            "{}x{} grid holds {} samples",
            grid.rows(),
            grid.cols(),
            grid.values().len()
        )));
    }
    Ok(grid)
}

/// Write a colour-mapped preview, one pixel per sample. Rows map to image
/// rows.
///
/// # Arguments
/// * `path` - PNG file to write
/// * `grid` - Grid whose samples become pixels
/// * `map` - Colour map applied to each sample
pub fn save_preview_png(path: &Path, grid: &SampleGrid, map: ColorMap) -> Result<(), FieldIoError> {
    let width = u32::try_from(grid.cols()).map_err(|_| too_large(grid))?;
    let height = u32::try_from(grid.rows()).map_err(|_| too_large(grid))?;

    let image: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, grid_to_rgba(grid, map)).ok_or_else(|| too_large(grid))?;
    image.save(path)?;
    info!(path = %path.display(), colormap = map.name(), "saved preview image");
    Ok(())
}

fn too_large(grid: &SampleGrid) -> FieldIoError {
    FieldIoError::Shape(format!(
        "{}x{} grid does not fit in an image",
        grid.rows(),
        grid.cols()
    ))
}

/// List all `.ron` files in `dir`, sorted.
pub fn list_configs(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut configs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            configs.push(path);
        }
    }

    configs.sort();
    Ok(configs)
}

/// Generate a filename from a config name.
pub fn config_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}.ron", sanitized.to_lowercase())
}

/// Save `config` under `dir` as [`config_filename`]`(name)`, creating `dir`
/// if needed. Returns the written path.
///
/// # Arguments
/// * `dir` - Configs directory, usually [`CONFIGS_DIR`]
/// * `name` - Display name, sanitized into the filename
/// * `config` - Configuration to save
pub fn save_named_config(
    dir: &Path,
    name: &str,
    config: &NoiseConfig,
) -> Result<PathBuf, FieldIoError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(config_filename(name));
    save_config(&path, config)?;
    Ok(path)
}
