//! Turns a located callable into standalone, lowered source text.

mod lower;

use oxc_allocator::{Allocator, Box, CloneIn};
use oxc_ast::AstKind;
use oxc_ast::ast::{Expression, Function, MethodDefinition, MethodDefinitionKind};
use oxc_codegen::{Codegen, Context, Gen};
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::options::ExtractorOptions;
use crate::syntax::NodePath;

pub use lower::lower;

/// Regenerate the callable at `path` as a free-standing expression.
///
/// Attributes that only make sense in the callable's place in the source
/// (static, accessibility, async, declared name) are stripped from a copy of
/// the node; the shared tree is left untouched. Async-ness is re-attached as a
/// textual prefix before the code is lowered.
pub fn isolate(path: NodePath<'_, '_>, options: &ExtractorOptions) -> Result<String> {
    if !path.node_type().is_callable() {
        return Err(ExtractError::CallableNotFound);
    }

    let scratch = Allocator::default();
    let mut printer = Codegen::new().with_options(lower::codegen_options());

    let (code, is_async) = match path.kind() {
        AstKind::MethodDefinition(method) => {
            let mut method = method.clone_in(&scratch);
            let is_async = strip_method(&mut method);
            method.print(&mut printer, Context::default());
            (format!("function {}", printer.into_source_text()), is_async)
        }
        AstKind::Function(func) if func.is_declaration() => {
            let mut func = func.clone_in(&scratch);
            let is_async = strip_declaration(&mut func);
            func.print(&mut printer, Context::default());
            (printer.into_source_text(), is_async)
        }
        AstKind::Function(func) => {
            let expr = Expression::FunctionExpression(Box::new_in(func.clone_in(&scratch), &scratch));
            printer.print_expression(&expr);
            (printer.into_source_text(), false)
        }
        AstKind::ArrowFunctionExpression(arrow) => {
            let expr =
                Expression::ArrowFunctionExpression(Box::new_in(arrow.clone_in(&scratch), &scratch));
            printer.print_expression(&expr);
            (printer.into_source_text(), false)
        }
        _ => return Err(ExtractError::CallableNotFound),
    };

    let code = if is_async { format!("async {code}") } else { code };
    debug!(node = ?path.node_type(), start = path.node().start(), "isolated callable");

    lower(&code, &options.compiler_options, &options.parser_options)
}

/// Returns whether the method was async.
fn strip_method(method: &mut MethodDefinition<'_>) -> bool {
    let is_async = method.value.r#async;
    method.value.r#async = false;
    method.r#static = false;
    method.accessibility = None;
    method.r#override = false;
    method.optional = false;
    method.decorators.clear();
    for param in method.value.params.items.iter_mut() {
        param.accessibility = None;
        param.readonly = false;
        param.r#override = false;
        param.decorators.clear();
    }
    if matches!(method.kind, MethodDefinitionKind::Get | MethodDefinitionKind::Set) {
        method.kind = MethodDefinitionKind::Method;
    }
    is_async
}

/// Returns whether the function was async.
fn strip_declaration(func: &mut Function<'_>) -> bool {
    let is_async = func.r#async;
    func.r#async = false;
    func.id = None;
    func.declare = false;
    is_async
}
