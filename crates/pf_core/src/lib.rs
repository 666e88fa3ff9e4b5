pub mod config;
pub mod coords;
pub mod error;
pub mod regeneration;
pub mod seed;

pub use config::{FieldParams, NoiseConfig, ParamLimits};
pub use coords::GridExtent;
pub use error::{NoiseError, Result};
pub use regeneration::RegenerationPlan;
pub use seed::Seed;
