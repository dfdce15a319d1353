#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod kind;
mod parser;
mod path;

// -----------------------------------------------------------------------------
// Exports

pub use error::PathError;
pub use kind::SegmentKind;
pub use path::{NamePath, Segment, Segments};

/// The separator used by [`NamePath::new`].
pub const SEPARATOR: char = '.';
