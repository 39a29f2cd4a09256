use std::path::Path;

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc_parser::{ParseOptions, Parser};
use oxc_semantic::SemanticBuilder;
use oxc_transformer::{JsxRuntime, TransformOptions, Transformer};
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::options::{CompilerOptions, ParserOptions};

const LOWERED_FILE: &str = "callable.tsx";

pub(super) fn codegen_options() -> CodegenOptions {
    CodegenOptions {
        comments: CommentOptions::disabled(),
        ..CodegenOptions::default()
    }
}

/// Lower a standalone callable expression to the configured target.
///
/// TypeScript syntax is removed here. The fragment is parsed as a
/// parenthesized expression statement, so the printed statement's trailing
/// `;` is dropped from the result.
pub fn lower(code: &str, compiler: &CompilerOptions, parser: &ParserOptions) -> Result<String> {
    let target = compiler.es_target()?;
    let allocator = Allocator::default();
    let wrapped = format!("({code})");

    let ret = Parser::new(&allocator, &wrapped, parser.source_type())
        .with_options(ParseOptions {
            preserve_parens: false,
            ..ParseOptions::default()
        })
        .parse();
    if ret.panicked || !ret.errors.is_empty() {
        return Err(ExtractError::Parse(join_errors(&ret.errors)));
    }
    let mut program = ret.program;

    let scoping = SemanticBuilder::new().build(&program).semantic.into_scoping();
    let mut transform_options = TransformOptions::from(target);
    // isolated code has to stay a single expression, with no runtime import
    transform_options.jsx.runtime = JsxRuntime::Classic;
    let ret = Transformer::new(&allocator, Path::new(LOWERED_FILE), &transform_options)
        .build_with_scoping(scoping, &mut program);
    if !ret.errors.is_empty() {
        return Err(ExtractError::Parse(join_errors(&ret.errors)));
    }

    let printed = Codegen::new()
        .with_options(codegen_options())
        .build(&program)
        .code;
    let printed = printed.trim();
    let lowered = printed.strip_suffix(';').unwrap_or(printed);

    debug!(%target, bytes = lowered.len(), "lowered callable");
    Ok(lowered.to_string())
}

fn join_errors<E: ToString>(errors: &[E]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower_default(code: &str) -> Result<String> {
        lower(code, &CompilerOptions::default(), &ParserOptions::default())
    }

    #[test]
    fn test_strips_types() {
        let lowered = lower_default("(p: number): number => p").unwrap();
        assert!(!lowered.contains("number"), "{lowered}");
        assert!(lowered.contains("=>"), "{lowered}");
        assert!(!lowered.ends_with(';'), "{lowered}");
    }

    #[test]
    fn test_keeps_async_at_default_target() {
        let lowered = lower_default("async function (p: number) { return p }").unwrap();
        assert!(lowered.contains("async function"), "{lowered}");
    }

    #[test]
    fn test_rejects_broken_code() {
        assert!(matches!(
            lower_default("function (p { return p }"),
            Err(ExtractError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_target() {
        let compiler = CompilerOptions {
            target: "es1999".to_string(),
        };
        assert!(matches!(
            lower("() => 1", &compiler, &ParserOptions::default()),
            Err(ExtractError::InvalidTarget(_))
        ));
    }
}
