use alloc::string::String;

use thiserror::Error;

/// An error raised while building or mutating a value through its descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReflectError {
    #[error("type mismatch: expected a value of type `{expected}`")]
    TypeMismatch { expected: &'static str },

    #[error("missing component `{name}` required by `{ty}`")]
    MissingComponent {
        name: &'static str,
        ty: &'static str,
    },

    #[error("invalid length for `{ty}`: expected {expected}, received {actual}")]
    LengthMismatch {
        ty: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("no factory available to instantiate `{0}`")]
    NoFactory(&'static str),

    #[error("property `{0}` is not writable")]
    NotWritable(&'static str),

    #[error("{0}")]
    Custom(String),
}

impl ReflectError {
    /// Creates a [`ReflectError::Custom`] from any message.
    #[inline]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
