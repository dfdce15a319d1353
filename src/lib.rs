#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use jm_bind as bind;
pub use jm_path as path;
pub use jm_reflect as reflect;
