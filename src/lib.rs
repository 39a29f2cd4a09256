pub mod error;
pub mod extractor;
pub mod isolate;
pub mod models;
pub mod options;
pub mod sandbox;
pub mod syntax;

pub use error::{ExtractError, Result};
pub use extractor::CallableExtractor;
pub use models::*;
pub use options::{CompilerOptions, ExtractorOptions, ParserOptions, SourceKind, SyntaxPlugin};
pub use sandbox::{Callable, Sandbox};

pub use oxc_allocator::Allocator;
