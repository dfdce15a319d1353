use alloc::{boxed::Box, string::String, vec::Vec};

use jm_reflect::ReflectError;
use jm_reflect::info::TypeKindError;
use thiserror::Error;

use crate::source::NodeKind;

// -----------------------------------------------------------------------------
// ConversionError

/// A data node could not be converted to the requested type.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConversionError {
    #[error("no converter registered for `{0}`")]
    NoConverter(&'static str),

    #[error("cannot convert a {from} node to `{to}`")]
    Unsupported { from: NodeKind, to: &'static str },

    #[error("cannot convert `{value}` to `{to}`")]
    Invalid { value: String, to: &'static str },

    #[error("`{value}` is out of range for `{to}`")]
    OutOfRange { value: String, to: &'static str },
}

// -----------------------------------------------------------------------------
// BindError

/// An error raised while binding a path to a type.
///
/// Failures of a nested path reach the caller wrapped in
/// [`BindError::Failed`], which records where and for which type the
/// failure happened. [`root_cause`](Self::root_cause) strips the wrappers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    #[error("recursive binding detected at `{0}`")]
    Recursive(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("cannot instantiate `{ty}`")]
    Instantiation {
        ty: &'static str,
        #[source]
        source: ReflectError,
    },

    #[error("unsupported data source: {0}")]
    UnsupportedDataSource(String),

    #[error("type `{0}` is not registered")]
    UnregisteredType(&'static str),

    #[error("no binder supports `{0}`")]
    NoStrategy(&'static str),

    #[error("{0}")]
    Unsupported(&'static str),

    #[error("no value was bound")]
    Missing,

    #[error("no value bound for element `{0}`")]
    MissingElement(String),

    #[error("map key `{key}` under `{path}` is not addressable as one path segment")]
    UnaddressableKey { path: String, key: String },

    #[error(transparent)]
    Reflect(#[from] ReflectError),

    #[error(transparent)]
    Kind(#[from] TypeKindError),

    #[error("{count} properties of `{ty}` failed to bind", count = .errors.len())]
    Properties {
        ty: &'static str,
        errors: Vec<BindError>,
    },

    #[error("failed to bind `{path}` to `{target}`")]
    Failed {
        path: String,
        target: &'static str,
        #[source]
        source: Box<BindError>,
    },
}

impl BindError {
    /// Returns the innermost error, skipping [`Failed`](Self::Failed)
    /// wrappers.
    pub fn root_cause(&self) -> &BindError {
        let mut error = self;
        while let Self::Failed { source, .. } = error {
            error = source.as_ref();
        }
        error
    }

    /// Returns `true` if a recursive binding caused this error, directly or
    /// through one of the aggregated property failures.
    pub fn is_recursive(&self) -> bool {
        match self.root_cause() {
            Self::Recursive(_) => true,
            Self::Properties { errors, .. } => errors.iter().any(Self::is_recursive),
            _ => false,
        }
    }

    /// Returns the originating path of a [`Failed`](Self::Failed) error.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Failed { path, .. } => Some(path),
            _ => None,
        }
    }
}
