/// Errors raised by the noise engine.
///
/// Parameters are never clamped: anything out of range is reported
/// synchronously and the caller decides how to present it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NoiseError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("permutation table was reconfigured but not regenerated")]
    TableNotGenerated,
}

impl NoiseError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NoiseError>;
