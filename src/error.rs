use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Severity code carried by every error, matching the remote API's server-error class.
pub const ERROR_CODE: u16 = 500;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("unknown chart option \"{option}\" (no setter \"{setter}\")")]
    UnknownOption { option: String, setter: String },

    #[error("invalid chart option: {0}")]
    Validation(String),

    #[error("incomplete chart: {0}")]
    IncompleteChart(String),

    #[error("invalid option bag: {0}")]
    InvalidOptionBag(String),
}

impl ChartError {
    #[must_use]
    pub fn code(&self) -> u16 {
        ERROR_CODE
    }
}
