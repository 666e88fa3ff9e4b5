use serde::{Deserialize, Serialize};

use crate::coords::GridExtent;
use crate::error::{NoiseError, Result};
use crate::seed::Seed;

/// Parameters consumed by a noise field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    /// Additional octaves beyond the base layer.
    pub octaves: u32,
    pub extent: GridExtent,
    /// Samples per lattice unit along each axis.
    pub resolution: u32,
    /// Amplitude multiplier applied per additional octave.
    pub amplitude_step: f64,
    /// Frequency multiplier applied per additional octave.
    pub frequency_step: f64,
}

impl FieldParams {
    pub fn validate(&self) -> Result<()> {
        self.extent.validate()?;
        self.extent.sample_dims(self.resolution)?;
        check_finite("amplitude_step", self.amplitude_step)?;
        check_finite("frequency_step", self.frequency_step)?;
        self.check_octave_products()
    }

    /// Reject step ratios whose geometric products overflow across the
    /// configured octaves. The summed amplitudes must also leave room for
    /// the `max - min` span taken during normalization.
    fn check_octave_products(&self) -> Result<()> {
        let mut amplitude = 1.0_f64;
        let mut frequency = 1.0_f64;
        let mut amplitude_sum = 1.0_f64;

        for octave in 1..=self.octaves {
            amplitude *= self.amplitude_step;
            frequency *= self.frequency_step;
            amplitude_sum += amplitude.abs();

            if !(2.0 * amplitude_sum).is_finite() {
                return Err(NoiseError::invalid(
                    "amplitude_step",
                    format!(
                        "{} overflows the octave sum at octave {octave}",
                        self.amplitude_step
                    ),
                ));
            }
            if !frequency.is_finite() {
                return Err(NoiseError::invalid(
                    "frequency_step",
                    format!("{} overflows at octave {octave}", self.frequency_step),
                ));
            }
            if amplitude == 0.0 && frequency.abs() <= 1.0 {
                break;
            }
        }
        Ok(())
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(NoiseError::invalid(name, format!("must be finite, got {value}")))
    }
}

/// Complete generation configuration: every parameter the editor form
/// collects, as one plain value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub seed: Seed,
    pub width: u32,
    pub length: u32,
    pub resolution: u32,
    pub octaves: u32,
    pub amplitude_step: f64,
    pub frequency_step: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: Seed::new(2023),
            width: 5,
            length: 5,
            resolution: 100,
            octaves: 0,
            amplitude_step: 0.5,
            frequency_step: 2.0,
        }
    }
}

impl NoiseConfig {
    pub fn extent(&self) -> GridExtent {
        GridExtent {
            width: self.width,
            length: self.length,
        }
    }

    pub fn field_params(&self) -> FieldParams {
        FieldParams {
            octaves: self.octaves,
            extent: self.extent(),
            resolution: self.resolution,
            amplitude_step: self.amplitude_step,
            frequency_step: self.frequency_step,
        }
    }

    pub fn table_size(&self) -> usize {
        self.extent().table_size()
    }

    pub fn validate(&self) -> Result<()> {
        self.field_params().validate()
    }
}

/// Input bounds of the interactive editor.
///
/// The engine only rejects non-positive values; these tighter limits keep
/// interactive regeneration responsive and are applied by consumers.
pub struct ParamLimits;

impl ParamLimits {
    pub const MIN_EXTENT: u32 = 1;
    pub const MAX_EXTENT: u32 = 15;
    pub const MAX_OCTAVES: u32 = 20;
    pub const MIN_RESOLUTION: u32 = 2;

    /// Names of every parameter in `config` outside the editor bounds.
    pub fn violations(config: &NoiseConfig) -> Vec<&'static str> {
        let extent = Self::MIN_EXTENT..=Self::MAX_EXTENT;
        let mut out = Vec::new();
        if !extent.contains(&config.width) {
            out.push("width");
        }
        if !extent.contains(&config.length) {
            out.push("length");
        }
        if config.octaves > Self::MAX_OCTAVES {
            out.push("octaves");
        }
        if config.resolution < Self::MIN_RESOLUTION {
            out.push("resolution");
        }
        if !config.amplitude_step.is_finite() {
            out.push("amplitude_step");
        }
        if !config.frequency_step.is_finite() {
            out.push("frequency_step");
        }
        out
    }
}
