use alloc::boxed::Box;
use core::any::Any;

use jm_path::NamePath;
use jm_reflect::BoxedValue;
use jm_reflect::info::Type;

use crate::BindError;

/// What to do with a failed bind.
#[derive(Debug)]
pub enum Recovery {
    /// Use this value instead; the bind becomes present.
    Fallback(BoxedValue),
    /// Drop the error; the bind becomes empty.
    Ignore,
    /// Fail with this error, the original one or a replacement.
    Fail(BindError),
}

impl Recovery {
    /// Shorthand for [`Recovery::Fallback`].
    #[inline]
    pub fn fallback<T: Any>(value: T) -> Self {
        Self::Fallback(Box::new(value))
    }
}

/// Failure handling policy, consulted by the binder for every failed path.
///
/// Implemented by:
/// - `()`: every error propagates.
/// - [`IgnoreErrors`]: every error is dropped.
/// - closures `Fn(&NamePath, &Type, BindError) -> Recovery`.
///
/// # Examples
///
/// ```
/// use jm_bind::{BindError, Recovery};
/// use jm_bind::callback::BindCallback;
/// use jm_path::NamePath;
/// use jm_reflect::info::Type;
///
/// let port_default = |path: &NamePath, target: &Type, error: BindError| {
///     if path.last().is_some_and(|s| s.as_str() == "port") && target.is::<u16>() {
///         Recovery::fallback(8080_u16)
///     } else {
///         Recovery::Fail(error)
///     }
/// };
///
/// let recovery = port_default.on_failure(&NamePath::new("server.port"), &Type::of::<u16>(), BindError::Missing);
/// assert!(matches!(recovery, Recovery::Fallback(_)));
/// ```
pub trait BindCallback {
    /// Decides the outcome of the failed bind of `path` to `target`.
    fn on_failure(&self, path: &NamePath, target: &Type, error: BindError) -> Recovery;
}

impl BindCallback for () {
    #[inline]
    fn on_failure(&self, _: &NamePath, _: &Type, error: BindError) -> Recovery {
        Recovery::Fail(error)
    }
}

/// A [`BindCallback`] that turns every failure into an empty result.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreErrors;

impl BindCallback for IgnoreErrors {
    #[inline]
    fn on_failure(&self, _: &NamePath, _: &Type, _: BindError) -> Recovery {
        Recovery::Ignore
    }
}

impl<F> BindCallback for F
where
    F: Fn(&NamePath, &Type, BindError) -> Recovery,
{
    #[inline]
    fn on_failure(&self, path: &NamePath, target: &Type, error: BindError) -> Recovery {
        self(path, target, error)
    }
}
