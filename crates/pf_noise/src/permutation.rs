use pf_core::{GridExtent, NoiseError, Result, Seed};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Seeded lookup table mapping lattice coordinates to gradient indices.
///
/// Holds `2 * size` entries in which every index in `[0, size)` appears
/// exactly twice. The order is a pure function of `(size, seed)`: the RNG is
/// reseeded on every [`generate`](Self::generate), never continued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    size: usize,
    seed: Seed,
    table: Vec<usize>,
    current: bool,
}

impl PermutationTable {
    /// Configure and generate in one step.
    pub fn new(size: usize, seed: Seed) -> Result<Self> {
        check_size(size)?;
        let mut table = Self {
            size,
            seed,
            table: Vec::new(),
            current: false,
        };
        table.generate();
        Ok(table)
    }

    /// Table sized for a grid of the given extent (`width * length`).
    pub fn for_extent(extent: GridExtent, seed: Seed) -> Result<Self> {
        extent.validate()?;
        Self::new(extent.table_size(), seed)
    }

    /// Set new parameters without touching the table contents.
    ///
    /// The table is stale until [`generate`](Self::generate) runs. Invalid
    /// sizes leave the table exactly as it was.
    pub fn configure(&mut self, size: usize, seed: Seed) -> Result<()> {
        check_size(size)?;
        if size != self.size || seed != self.seed {
            self.size = size;
            self.seed = seed;
            self.current = false;
        }
        Ok(())
    }

    /// Rebuild the table from the configured size and seed.
    pub fn generate(&mut self) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.value());
        let mut table: Vec<usize> = (0..self.size).chain(0..self.size).collect();
        table.shuffle(&mut rng);

        debug!(size = self.size, seed = %self.seed, "generated permutation table");
        self.table = table;
        self.current = true;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn table(&self) -> &[usize] {
        &self.table
    }

    /// Whether the contents reflect the configured size and seed.
    pub fn is_current(&self) -> bool {
        self.current
    }

    #[inline]
    pub(crate) fn lookup(&self, index: usize) -> usize {
        self.table[index]
    }
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(NoiseError::invalid("size", "must be positive, got 0"));
    }
    if size.checked_mul(2).is_none() {
        return Err(NoiseError::invalid("size", format!("{size} is too large")));
    }
    Ok(())
}
