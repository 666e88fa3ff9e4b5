use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use pf_core::{NoiseConfig, ParamLimits, Seed};
use pf_noise::{ColorMap, NoiseField, PermutationTable};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a normalized 2D Perlin noise field.
#[derive(Parser, Debug)]
#[command(name = "perlinfield", version, about)]
struct Args {
    /// RON config to start from (flags override its values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed, integer or float
    #[arg(long)]
    seed: Option<Seed>,

    /// Grid width in lattice units
    #[arg(long)]
    width: Option<u32>,

    /// Grid length in lattice units
    #[arg(long)]
    length: Option<u32>,

    /// Samples per lattice unit
    #[arg(long)]
    resolution: Option<u32>,

    /// Additional octaves beyond the base layer
    #[arg(long)]
    octaves: Option<u32>,

    /// Amplitude multiplier per octave
    #[arg(long, allow_hyphen_values = true)]
    amplitude_step: Option<f64>,

    /// Frequency multiplier per octave
    #[arg(long, allow_hyphen_values = true)]
    frequency_step: Option<f64>,

    /// Write the normalized grid as RON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write a colour-mapped PNG preview
    #[arg(long)]
    png: Option<PathBuf>,

    /// Colour map for the preview (grayscale, viridis)
    #[arg(long, default_value = "viridis")]
    colormap: ColorMap,

    /// Save the effective config as RON
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Save the effective config by name into --configs-dir
    #[arg(long)]
    save_as: Option<String>,

    /// Directory holding named configs
    #[arg(long, default_value = pf_persistence::CONFIGS_DIR)]
    configs_dir: PathBuf,

    /// List the named configs in --configs-dir and exit
    #[arg(long)]
    list_configs: bool,
}

impl Args {
    fn resolve_config(&self) -> anyhow::Result<NoiseConfig> {
        let mut config = match &self.config {
            Some(path) => pf_persistence::load_config(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => NoiseConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(length) = self.length {
            config.length = length;
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(octaves) = self.octaves {
            config.octaves = octaves;
        }
        if let Some(step) = self.amplitude_step {
            config.amplitude_step = step;
        }
        if let Some(step) = self.frequency_step {
            config.frequency_step = step;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.list_configs {
        let configs = pf_persistence::list_configs(&args.configs_dir)
            .with_context(|| format!("listing {}", args.configs_dir.display()))?;
        if configs.is_empty() {
            info!(dir = %args.configs_dir.display(), "no saved configs");
        }
        for path in configs {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let config = args.resolve_config()?;

    let violations = ParamLimits::violations(&config);
    if !violations.is_empty() {
        bail!(
            "the noise could not be generated because these parameters are out of bounds: {}",
            violations.join(", ")
        );
    }

    info!(
        seed = %config.seed,
        width = config.width,
        length = config.length,
        resolution = config.resolution,
        octaves = config.octaves,
        "generating noise field"
    );

    let table = Arc::new(PermutationTable::for_extent(config.extent(), config.seed)?);
    let mut field = NoiseField::new(config.field_params(), table)?;
    let grid = field.compose()?;

    if let Some(path) = &args.output {
        pf_persistence::save_grid(path, grid)?;
    }
    if let Some(path) = &args.png {
        pf_persistence::save_preview_png(path, grid, args.colormap)?;
    }
    if let Some(path) = &args.save_config {
        pf_persistence::save_config(path, &config)?;
    }
    if let Some(name) = &args.save_as {
        pf_persistence::save_named_config(&args.configs_dir, name, &config)?;
    }
    if args.output.is_none() && args.png.is_none() {
        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            "no --output or --png given; grid discarded"
        );
    }

    Ok(())
}
