/// Errors raised while mapping keys, degrees and triads
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HarmonyError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl HarmonyError {
    pub fn invalid(message: impl Into<String>) -> Self {
        HarmonyError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, HarmonyError>;
