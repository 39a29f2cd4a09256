use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::{ParseOptions, Parser};
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};
use crate::options::ParserOptions;

/// Parse `source_text` into a [`Program`] living in `allocator`.
///
/// The program is moved into the arena so that every node, the root
/// included, outlives the walker's references to it.
///
/// A parse that oxc could not recover from always fails. Recoverable
/// diagnostics fail only when `error_recovery` is off; otherwise they are
/// logged and parsing continues.
pub fn parse_source<'a>(
    allocator: &'a Allocator,
    source_text: &'a str,
    options: &ParserOptions,
) -> Result<&'a Program<'a>> {
    let source_type = options.source_type();
    let parse_options = ParseOptions {
        allow_return_outside_function: options.allow_return_outside_function,
        ..ParseOptions::default()
    };

    let ret = Parser::new(allocator, source_text, source_type)
        .with_options(parse_options)
        .parse();

    if ret.panicked || (!options.error_recovery && !ret.errors.is_empty()) {
        let message = ret
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ExtractError::Parse(message));
    }

    for error in &ret.errors {
        warn!(%error, "recovered from parse error");
    }
    debug!(
        bytes = source_text.len(),
        statements = ret.program.body.len(),
        "parsed source"
    );

    Ok(allocator.alloc(ret.program))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_source() {
        let allocator = Allocator::default();
        let program = parse_source(&allocator, "", &ParserOptions::default()).unwrap();
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_parse_typescript_by_default() {
        let allocator = Allocator::default();
        let program = parse_source(
            &allocator,
            "const named = (p: number): number => p",
            &ParserOptions::default(),
        )
        .unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_parse_failure_is_reported() {
        let allocator = Allocator::default();
        let result = parse_source(&allocator, "function (", &ParserOptions::default());
        assert!(matches!(result, Err(ExtractError::Parse(_))));
    }
}
