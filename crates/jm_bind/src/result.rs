use core::any::{Any, type_name};

use jm_reflect::{BoxedValue, ReflectError};

use crate::BindError;

/// The outcome of a bind.
///
/// `Empty` means no data was found and is not an error. A present value
/// does not repeat the path it was bound from; failures name it.
///
/// # Examples
///
/// ```
/// use jm_bind::{BindError, BindResult};
///
/// let present = BindResult::Present(8080_u16);
/// assert_eq!(present.map(u32::from).unwrap_or(80), 8080);
///
/// let empty = BindResult::<u16>::Empty;
/// assert_eq!(empty.unwrap_or_default(), 0);
///
/// let empty = BindResult::<u16>::Empty;
/// assert!(matches!(empty.get(), Err(BindError::Missing)));
/// ```
#[must_use]
#[derive(Debug)]
pub enum BindResult<T> {
    Present(T),
    Empty,
    Failed(BindError),
}

impl<T> BindResult<T> {
    /// `Present` for `Some`, `Empty` for `None`.
    #[inline]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Empty,
        }
    }

    /// `Present` for `Ok(Some)`, `Empty` for `Ok(None)`, `Failed` for `Err`.
    #[inline]
    pub fn from_result(result: Result<Option<T>, BindError>) -> Self {
        match result {
            Ok(Some(value)) => Self::Present(value),
            Ok(None) => Self::Empty,
            Err(error) => Self::Failed(error),
        }
    }

    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[inline]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the bound value, if present.
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the error, if failed.
    #[inline]
    pub const fn error(&self) -> Option<&BindError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Converts into `Option<T>`, discarding any error.
    #[inline]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value, failing with [`BindError::Missing`] when empty.
    pub fn get(self) -> Result<T, BindError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Empty => Err(BindError::Missing),
            Self::Failed(error) => Err(error),
        }
    }

    /// Splits absence from failure.
    pub fn into_result(self) -> Result<Option<T>, BindError> {
        match self {
            Self::Present(value) => Ok(Some(value)),
            Self::Empty => Ok(None),
            Self::Failed(error) => Err(error),
        }
    }

    /// Returns the value, or `default` when empty or failed.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        self.ok().unwrap_or(default)
    }

    #[inline]
    pub fn unwrap_or_else(self, f: impl FnOnce() -> T) -> T {
        self.ok().unwrap_or_else(f)
    }

    #[inline]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.ok().unwrap_or_default()
    }

    /// Transforms a present value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> BindResult<U> {
        match self {
            Self::Present(value) => BindResult::Present(f(value)),
            Self::Empty => BindResult::Empty,
            Self::Failed(error) => BindResult::Failed(error),
        }
    }

    /// Chains a bind depending on a present value.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> BindResult<U>) -> BindResult<U> {
        match self {
            Self::Present(value) => f(value),
            Self::Empty => BindResult::Empty,
            Self::Failed(error) => BindResult::Failed(error),
        }
    }

    /// Calls `f` with the value, if present.
    #[inline]
    pub fn if_present(&self, f: impl FnOnce(&T)) {
        if let Self::Present(value) = self {
            f(value);
        }
    }
}

impl BindResult<BoxedValue> {
    /// Unboxes a type-erased result.
    pub fn downcast<T: Any>(self) -> BindResult<T> {
        self.and_then(|value| match value.downcast::<T>() {
            Ok(value) => BindResult::Present(*value),
            Err(_) => BindResult::Failed(BindError::Reflect(ReflectError::TypeMismatch {
                expected: type_name::<T>(),
            })),
        })
    }
}

impl<T> From<Result<T, BindError>> for BindResult<T> {
    #[inline]
    fn from(result: Result<T, BindError>) -> Self {
        match result {
            Ok(value) => Self::Present(value),
            Err(error) => Self::Failed(error),
        }
    }
}
