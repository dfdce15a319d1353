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

mod error;
mod impls;
mod typed;

pub mod hash;
pub mod info;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::ReflectError;
pub use registry::{TypeMeta, TypeRegistry};
pub use typed::Typed;

/// A type-erased value produced or consumed by descriptors.
pub type BoxedValue = alloc::boxed::Box<dyn core::any::Any>;
