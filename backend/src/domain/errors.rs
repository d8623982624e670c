//! Error taxonomy for the domain layer.
//!
//! Services reject with one of three kinds: bad input, a missing
//! record, or a storage failure bubbled up from the repository layer.
//! Repositories themselves report plain `anyhow` errors; the service
//! boundary is where they acquire a kind.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed caller input (empty title, non-positive amount,
    /// zero-length report window, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Delete or lookup by an id that no live record carries.
    #[error("expense not found: {id}")]
    NotFound { id: String },

    /// The storage collaborator failed. No retry is attempted here;
    /// retry policy belongs to the storage layer if anywhere.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_id() {
        let err = DomainError::NotFound { id: "ex-1-abcd".to_string() };
        assert_eq!(err.to_string(), "expense not found: ex-1-abcd");
    }

    #[test]
    fn storage_errors_wrap_transparently() {
        let err: DomainError = anyhow::anyhow!("disk is gone").into();
        assert_eq!(err.to_string(), "disk is gone");
    }
}
