use thiserror::Error;

/// Errors raised at the boundary of the evaluator.
///
/// Everything past validation is total: a hand that does not win or a call
/// that is not available is reported as `None` / `false` / an empty list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        CoreError::InvalidInput(msg.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
