/// Errors raised while evaluating or expanding a number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpansionError {
    /// Out-of-range base, unusable precision, malformed digits, or a value
    /// outside a function's domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A number source this crate does not know how to evaluate
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),
}

impl ExpansionError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ExpansionError::InvalidArgument(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        ExpansionError::UnsupportedInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ExpansionError>;
