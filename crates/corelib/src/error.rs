//! Domain errors: inputs that are mathematically invalid for an operation.

use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("zero-length vector")]
    ZeroLengthVector,
    #[error("singular matrix")]
    SingularMatrix,
    /// Raised only by the tolerance-checked variants (`normalize_within`).
    #[error("degenerate vector: length {length} is within tolerance {tolerance}")]
    DegenerateVector { length: f64, tolerance: f64 },
    #[error("expected {expected} matrix elements, found {found}")]
    ElementCount { expected: usize, found: usize },
}

pub type DomainResult<T> = Result<T, DomainError>;
