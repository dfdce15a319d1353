//! The read-only data tree bound against.

mod data_source;
mod de;
mod node;

pub use data_source::DataSource;
pub use node::{Node, NodeKind};
