use crate::config::NoiseConfig;

/// Work needed to bring generated output in line with a new configuration.
///
/// The permutation table depends only on seed and grid extent; every other
/// parameter affects the field alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegenerationPlan {
    UpToDate,
    RecomposeField,
    RebuildTable,
}

impl RegenerationPlan {
    pub fn between(previous: Option<&NoiseConfig>, next: &NoiseConfig) -> Self {
        let Some(previous) = previous else {
            return Self::RebuildTable;
        };

        if previous.seed != next.seed || previous.extent() != next.extent() {
            Self::RebuildTable
        } else if previous != next {
            Self::RecomposeField
        } else {
            Self::UpToDate
        }
    }

    pub fn rebuilds_table(self) -> bool {
        self == Self::RebuildTable
    }

    /// A table rebuild always implies recomposition.
    pub fn recomposes_field(self) -> bool {
        self != Self::UpToDate
    }
}
