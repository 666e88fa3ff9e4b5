use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, Result};

/// Logical grid extents in lattice units.
///
/// `length` runs along the x / row axis and `width` along the y / column
/// axis, so a grid sampled at resolution `r` has `length * r` rows and
/// `width * r` columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridExtent {
    pub width: u32,
    pub length: u32,
}

impl GridExtent {
    pub fn new(width: u32, length: u32) -> Result<Self> {
        let extent = Self { width, length };
        extent.validate()?;
        Ok(extent)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(NoiseError::invalid("width", "must be positive, got 0"));
        }
        if self.length == 0 {
            return Err(NoiseError::invalid("length", "must be positive, got 0"));
        }
        Ok(())
    }

    /// Permutation size used for a grid of this extent.
    pub fn table_size(&self) -> usize {
        self.width as usize * self.length as usize
    }

    /// Sample grid shape `(rows, cols)` at the given resolution.
    pub fn sample_dims(&self, resolution: u32) -> Result<(usize, usize)> {
        if resolution == 0 {
            return Err(NoiseError::invalid("resolution", "must be positive, got 0"));
        }
        let rows = (self.length as usize).checked_mul(resolution as usize);
        let cols = (self.width as usize).checked_mul(resolution as usize);
        match (rows, cols) {
            (Some(rows), Some(cols)) if rows.checked_mul(cols).is_some() => Ok((rows, cols)),
            _ => Err(NoiseError::invalid(
                "resolution",
                format!("{self:?} at resolution {resolution} overflows the sample grid"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_extents() {
        assert!(GridExtent::new(0, 3).is_err());
        assert!(GridExtent::new(3, 0).is_err());
        assert!(GridExtent::new(1, 1).is_ok());
    }

    #[test]
    fn sample_dims_follow_length_then_width() {
        let extent = GridExtent::new(3, 2).unwrap();
        assert_eq!(extent.sample_dims(4), Ok((8, 12)));
        assert_eq!(extent.table_size(), 6);
    }

    #[test]
    fn zero_resolution_is_invalid() {
        let extent = GridExtent::new(2, 2).unwrap();
        let err = extent.sample_dims(0).unwrap_err();
        assert!(matches!(err, NoiseError::InvalidParameter { name: "resolution", .. }));
    }
}
