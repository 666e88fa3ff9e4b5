use bevy::prelude::*;

pub mod field;
pub mod grid;
pub mod perlin;
pub mod permutation;
pub mod resource;
pub mod visualization;

pub use field::NoiseField;
pub use grid::SampleGrid;
pub use perlin::{evaluate_octave, smoothing};
pub use permutation::PermutationTable;
pub use resource::{NoiseSettings, NoiseSurface};
pub use visualization::ColorMap;

/// Perlin noise plugin.
/// Regenerates the [`NoiseSurface`] whenever [`NoiseSettings`] changes.
pub struct PerlinNoisePlugin;

impl Plugin for PerlinNoisePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NoiseSettings>()
            .init_resource::<NoiseSurface>()
            .add_systems(
                Update,
                resource::regenerate_surface.run_if(resource_changed::<NoiseSettings>),
            );
    }
}
