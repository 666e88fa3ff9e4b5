use std::sync::Arc;
use std::time::Instant;

use pf_core::{FieldParams, NoiseError, Result};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::grid::SampleGrid;
use crate::perlin::{evaluate_octave, table_covers};
use crate::permutation::PermutationTable;

/// Multi-octave Perlin noise over a rectangular grid.
///
/// Configuration is validated as a whole, so a field is never observed
/// half-configured. The bound table is shared read-only.
#[derive(Clone, Debug)]
pub struct NoiseField {
    params: FieldParams,
    table: Arc<PermutationTable>,
    dims: (usize, usize),
    sample_grid: Option<SampleGrid>,
}

impl NoiseField {
    pub fn new(params: FieldParams, table: Arc<PermutationTable>) -> Result<Self> {
        let dims = Self::check(&params, &table)?;
        Ok(Self {
            params,
            table,
            dims,
            sample_grid: None,
        })
    }

    /// Replace parameters and table atomically.
    ///
    /// On error nothing changes. On success a previously composed grid is
    /// dropped unless the configuration is identical.
    pub fn configure(&mut self, params: FieldParams, table: Arc<PermutationTable>) -> Result<()> {
        let dims = Self::check(&params, &table)?;
        let unchanged = params == self.params && Arc::ptr_eq(&table, &self.table);
        self.params = params;
        self.table = table;
        self.dims = dims;
        if !unchanged {
            self.sample_grid = None;
        }
        Ok(())
    }

    fn check(params: &FieldParams, table: &PermutationTable) -> Result<(usize, usize)> {
        params.validate()?;
        if !table.is_current() {
            return Err(NoiseError::TableNotGenerated);
        }
        if !table_covers(table, params.extent) {
            return Err(NoiseError::invalid(
                "table",
                format!(
                    "size {} is too small for a {}x{} grid",
                    table.size(),
                    params.extent.width,
                    params.extent.length
                ),
            ));
        }
        params.extent.sample_dims(params.resolution)
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn table(&self) -> &Arc<PermutationTable> {
        &self.table
    }

    /// Sample grid shape `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        self.dims
    }

    /// Most recent composition, if any for the current configuration.
    pub fn sample_grid(&self) -> Option<&SampleGrid> {
        self.sample_grid.as_ref()
    }

    pub fn evaluate_octave(&self, x: f64, y: f64) -> f64 {
        evaluate_octave(&self.table, self.params.extent, x, y)
    }

    /// `(amplitude, frequency)` for the base layer followed by each
    /// additional octave.
    pub fn octave_schedule(&self) -> Vec<(f64, f64)> {
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut schedule = Vec::with_capacity(self.params.octaves as usize + 1);
        schedule.push((amplitude, frequency));
        for _ in 0..self.params.octaves {
            amplitude *= self.params.amplitude_step;
            frequency *= self.params.frequency_step;
            schedule.push((amplitude, frequency));
        }
        schedule
    }

    /// One octave over the whole grid, rows evaluated in parallel.
    pub fn sample_octave(&self, amplitude: f64, frequency: f64) -> SampleGrid {
        let (rows, cols) = self.dims;
        let resolution = f64::from(self.params.resolution);
        let extent = self.params.extent;
        let table = self.table.as_ref();

        let mut grid = SampleGrid::zeros(rows, cols);
        if cols == 0 {
            return grid;
        }
        grid.values_mut()
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(i, row)| {
                let x = (i as f64 / resolution) * frequency;
                for (j, cell) in row.iter_mut().enumerate() {
                    let y = (j as f64 / resolution) * frequency;
                    *cell = amplitude * evaluate_octave(table, extent, x, y);
                }
            });
        grid
    }

    /// Raw octave sum, before normalization.
    pub fn accumulate(&self) -> Result<SampleGrid> {
        Self::check(&self.params, &self.table)?;

        let mut schedule = self.octave_schedule().into_iter();
        let (amplitude, frequency) = schedule.next().unwrap_or((1.0, 1.0));
        let mut acc = self.sample_octave(amplitude, frequency);

        for (octave, (amplitude, frequency)) in schedule.enumerate() {
            debug!(octave = octave + 1, amplitude, frequency, "sampling octave");
            acc.accumulate(&self.sample_octave(amplitude, frequency));
        }
        Ok(acc)
    }

    /// Sum all octaves and rescale onto `[-1, 1]`.
    ///
    /// The previous grid is replaced only once the new one is complete.
    /// A non-finite octave sum is an error and leaves the previous grid.
    pub fn compose(&mut self) -> Result<&SampleGrid> {
        let started = Instant::now();
        let mut grid = self.accumulate()?;
        if let Some(bad) = grid.values().iter().find(|v| !v.is_finite()) {
            return Err(NoiseError::invalid(
                "amplitude_step",
                format!("octave sum is not finite ({bad})"),
            ));
        }

        if grid.normalize() {
            warn!(
                rows = grid.rows(),
                cols = grid.cols(),
                "noise field is flat; filled with zeros"
            );
        }

        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            octaves = self.params.octaves,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "composed noise field"
        );
        Ok(&*self.sample_grid.insert(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{GridExtent, Seed};

    fn params(width: u32, length: u32, resolution: u32, octaves: u32) -> FieldParams {
        FieldParams {
            octaves,
            extent: GridExtent { width, length },
            resolution,
            amplitude_step: 0.5,
            frequency_step: 2.0,
        }
    }

    fn scenario_field(octaves: u32) -> NoiseField {
        let table = Arc::new(PermutationTable::new(4, Seed::new(2023)).unwrap());
        NoiseField::new(params(2, 2, 4, octaves), table).unwrap()
    }

    fn assert_normalized(grid: &SampleGrid) {
        assert!(grid.values().iter().all(|v| (-1.0..=1.0).contains(v)));
        assert!(grid.values().contains(&-1.0), "minimum not attained");
        assert!(grid.values().contains(&1.0), "maximum not attained");
    }

    #[test]
    fn scenario_grid_is_eight_by_eight() {
        let mut field = scenario_field(0);
        let grid = field.compose().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (8, 8));
        assert_normalized(grid);
    }

    #[test]
    fn octave_amplitudes_scale_geometrically() {
        let field = scenario_field(2);
        assert_eq!(field.octave_schedule(), vec![(1.0, 1.0), (0.5, 2.0), (0.25, 4.0)]);

        let unit = field.sample_octave(1.0, 2.0);
        let half = field.sample_octave(0.5, 2.0);
        for (u, h) in unit.values().iter().zip(half.values()) {
            assert_eq!(*h, 0.5 * u);
        }

        let mut expected = field.sample_octave(1.0, 1.0);
        expected.accumulate(&field.sample_octave(0.5, 2.0));
        expected.accumulate(&field.sample_octave(0.25, 4.0));
        assert_eq!(field.accumulate().unwrap(), expected);
    }

    #[test]
    fn extra_octaves_change_the_field_but_keep_bounds() {
        let mut base = scenario_field(0);
        let mut layered = scenario_field(2);
        let base_grid = base.compose().unwrap().clone();
        let layered_grid = layered.compose().unwrap();
        assert_ne!(&base_grid, layered_grid);
        assert_normalized(layered_grid);
    }

    #[test]
    fn range_invariant_across_configurations() {
        for (seed, octaves) in [(1u64, 0u32), (2023, 3), (77, 6)] {
            let extent = GridExtent { width: 4, length: 3 };
            let table = Arc::new(PermutationTable::for_extent(extent, Seed::new(seed)).unwrap());
            let mut field = NoiseField::new(params(4, 3, 10, octaves), table).unwrap();
            let grid = field.compose().unwrap();
            assert_eq!((grid.rows(), grid.cols()), (30, 40));
            assert_normalized(grid);
        }
    }

    #[test]
    fn single_entry_table_gives_flat_zero_field() {
        let table = Arc::new(PermutationTable::new(1, Seed::new(2023)).unwrap());
        let mut field = NoiseField::new(params(1, 1, 2, 0), table).unwrap();
        let grid = field.compose().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert!(grid.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn lattice_only_sampling_is_degenerate() {
        let table = Arc::new(PermutationTable::new(9, Seed::new(4)).unwrap());
        let mut field = NoiseField::new(params(3, 3, 1, 0), table).unwrap();
        let grid = field.compose().unwrap();
        assert!(grid.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn composition_is_deterministic() {
        let mut a = scenario_field(3);
        let mut b = scenario_field(3);
        assert_eq!(a.compose().unwrap(), b.compose().unwrap());
    }

    #[test]
    fn invalid_params_are_rejected() {
        let table = Arc::new(PermutationTable::new(4, Seed::new(2023)).unwrap());
        for bad in [params(2, 2, 0, 0), params(0, 2, 4, 0), params(2, 0, 4, 0)] {
            let err = NoiseField::new(bad, table.clone()).unwrap_err();
            assert!(matches!(err, NoiseError::InvalidParameter { .. }), "{:?}", err);
        }
    }

    #[test]
    fn overflowing_step_ratios_are_rejected() {
        let table = Arc::new(PermutationTable::new(4, Seed::new(2023)).unwrap());

        let mut loud = params(2, 2, 4, 2);
        loud.amplitude_step = 1e200;
        let err = NoiseField::new(loud, table.clone()).unwrap_err();
        assert!(matches!(err, NoiseError::InvalidParameter { name: "amplitude_step", .. }));

        let mut fast = params(2, 2, 4, 2);
        fast.frequency_step = 1e200;
        let err = NoiseField::new(fast, table).unwrap_err();
        assert!(matches!(err, NoiseError::InvalidParameter { name: "frequency_step", .. }));
    }

    #[test]
    fn single_large_octave_still_normalizes() {
        let table = Arc::new(PermutationTable::new(4, Seed::new(2023)).unwrap());
        let mut loud = params(2, 2, 4, 1);
        loud.amplitude_step = 1e200;
        let mut field = NoiseField::new(loud, table).unwrap();
        let grid = field.compose().unwrap();
        assert!(grid.values().iter().all(|v| v.is_finite()));
        assert!(grid.values().iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn undersized_table_is_rejected() {
        let table = Arc::new(PermutationTable::new(2, Seed::new(2023)).unwrap());
        let err = NoiseField::new(params(5, 5, 4, 0), table).unwrap_err();
        assert!(matches!(err, NoiseError::InvalidParameter { name: "table", .. }));
    }

    #[test]
    fn stale_table_is_rejected() {
        let mut table = PermutationTable::new(4, Seed::new(2023)).unwrap();
        table.configure(9, Seed::new(1)).unwrap();
        let err = NoiseField::new(params(2, 2, 4, 0), Arc::new(table)).unwrap_err();
        assert_eq!(err, NoiseError::TableNotGenerated);
    }

    #[test]
    fn failed_configure_keeps_previous_state() {
        let mut field = scenario_field(1);
        let composed = field.compose().unwrap().clone();
        let table = field.table().clone();

        assert!(field.configure(params(2, 2, 0, 1), table.clone()).is_err());
        assert_eq!(field.params().resolution, 4);
        assert_eq!(field.sample_grid(), Some(&composed));

        field.configure(params(2, 2, 2, 1), table).unwrap();
        assert!(field.sample_grid().is_none());
        assert_eq!(field.dims(), (4, 4));
    }

    #[test]
    fn evaluate_octave_uses_the_bound_table() {
        let field = scenario_field(0);
        assert_eq!(field.evaluate_octave(1.5, 0.5), -0.5);
    }
}
