use thiserror::Error;

/// An error returned by the bounded operations of [`NamePath`](crate::NamePath).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathError {
    #[error("Index {index} is out of bounds for a path of {len} segments")]
    OutOfBounds { index: usize, len: usize },

    #[error("Invalid range: start({start}) must be less than or equal to end({end})")]
    InvalidRange { start: usize, end: usize },
}
