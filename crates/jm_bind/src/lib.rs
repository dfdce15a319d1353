#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod bindable;
mod error;
mod result;

pub mod binder;
pub mod callback;
pub mod conversion;
pub mod source;
pub mod strategy;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use bindable::Bindable;
pub use binder::{BindContext, Binder, BinderBuilder, BindingStrategy, ObjectBinder};
pub use callback::{IgnoreErrors, Recovery};
pub use error::{BindError, ConversionError};
pub use result::BindResult;
