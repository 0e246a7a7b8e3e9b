mod code_size;
mod core_nodes;
mod identifier;
mod pretty;

pub use code_size::CodeSizeEstimator;
pub use core_nodes::*;
pub use identifier::{Id, Identifier, Unique, Visibility};
