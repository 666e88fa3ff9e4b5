use serde::{Deserialize, Serialize};

/// Dense row-major grid of noise samples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleGrid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl SampleGrid {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build from raw parts. Returns `None` if `data` does not hold exactly
    /// `rows * cols` samples.
    pub fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        let grid = Self { rows, cols, data };
        grid.is_consistent().then_some(grid)
    }

    pub fn is_consistent(&self) -> bool {
        self.rows.checked_mul(self.cols) == Some(self.data.len())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Sample at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.data.get(start..start + self.cols)
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Nested `rows × cols` copy for consumers that want a 2D array.
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols.max(1)).map(<[f64]>::to_vec).collect()
    }

    /// Smallest and largest sample, or `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Add `other` elementwise. Both grids must share dimensions.
    pub fn accumulate(&mut self, other: &SampleGrid) {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        for (acc, v) in self.data.iter_mut().zip(&other.data) {
            *acc += v;
        }
    }

    /// Min-max rescale onto `[-1, 1]` against the grid's own extrema.
    ///
    /// A flat grid (`max == min`) is filled with `0.0`. Returns `true` when
    /// that fallback was taken.
    pub fn normalize(&mut self) -> bool {
        let Some((min, max)) = self.min_max() else {
            return false;
        };

        if max <= min {
            self.data.fill(0.0);
            return true;
        }

        let range = max - min;
        for v in &mut self.data {
            *v = ((*v - min) / range) * 2.0 - 1.0;
        }
        false
    }
}
