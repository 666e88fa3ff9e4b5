use std::sync::Arc;

use bevy::prelude::*;
use pf_core::{NoiseConfig, NoiseError, RegenerationPlan};
use tracing::{debug, warn};

use crate::field::NoiseField;
use crate::grid::SampleGrid;
use crate::permutation::PermutationTable;

/// Parameters the consumer edits. Changing this resource triggers
/// regeneration on the next `Update`.
#[derive(Resource, Debug, Clone, Default)]
pub struct NoiseSettings {
    pub config: NoiseConfig,
}

/// Generated output for the most recently applied settings.
#[derive(Resource, Debug, Default)]
pub struct NoiseSurface {
    applied: Option<NoiseConfig>,
    table: Option<Arc<PermutationTable>>,
    field: Option<NoiseField>,
    /// Error from the last rejected settings, cleared on success.
    pub last_error: Option<NoiseError>,
}

impl NoiseSurface {
    /// Bring the surface in line with `config`.
    ///
    /// The table is rebuilt only when seed or extent changed. On error the
    /// previous table, field and grid remain in place.
    pub fn apply(&mut self, config: &NoiseConfig) -> Result<RegenerationPlan, NoiseError> {
        let plan = RegenerationPlan::between(self.applied.as_ref(), config);
        if !plan.recomposes_field() {
            return Ok(plan);
        }

        let table = match (&self.table, plan.rebuilds_table()) {
            (Some(table), false) => table.clone(),
            _ => Arc::new(PermutationTable::for_extent(config.extent(), config.seed)?),
        };

        let mut field = NoiseField::new(config.field_params(), table.clone())?;
        field.compose()?;

        debug!(?plan, "noise surface regenerated");
        self.applied = Some(config.clone());
        self.table = Some(table);
        self.field = Some(field);
        Ok(plan)
    }

    pub fn applied(&self) -> Option<&NoiseConfig> {
        self.applied.as_ref()
    }

    pub fn table(&self) -> Option<&Arc<PermutationTable>> {
        self.table.as_ref()
    }

    pub fn field(&self) -> Option<&NoiseField> {
        self.field.as_ref()
    }

    pub fn grid(&self) -> Option<&SampleGrid> {
        self.field.as_ref().and_then(NoiseField::sample_grid)
    }
}

pub fn regenerate_surface(settings: Res<NoiseSettings>, mut surface: ResMut<NoiseSurface>) {
    match surface.apply(&settings.config) {
        Ok(_) => surface.last_error = None,
        Err(err) => {
            warn!("noise settings rejected: {err}");
            surface.last_error = Some(err);
        }
    }
}
