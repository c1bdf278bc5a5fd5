use thiserror::Error;

/// Errors raised by polynomial construction, division and fixture I/O.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Division by the zero polynomial")]
    DivisionByZero,

    #[error("Coefficient {coefficient} is not divisible by leading coefficient {divisor}")]
    InexactDivision { coefficient: i64, divisor: i64 },

    #[error("Polynomial is not in canonical form: {0}")]
    NonCanonical(String),

    #[error("Polynomial has {terms} terms but a fixture record holds at most {capacity}")]
    TooManyTerms { terms: usize, capacity: usize },

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn non_canonical<S: Into<String>>(msg: S) -> Self {
        Error::NonCanonical(msg.into())
    }

    pub fn overflow<S: Into<String>>(msg: S) -> Self {
        Error::Overflow(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
