mod classify;
mod parser;
mod walker;

pub use classify::{CALLABLE_TYPES, NodeType};
pub use parser::parse_source;
pub use walker::{NodeId, NodePath, SyntaxNode, SyntaxTree, walk};
