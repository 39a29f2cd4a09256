use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::AstKind;
use oxc_ast::ast::PropertyKey;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::isolate::isolate;
use crate::models::{Identifier, LineIndex};
use crate::options::ExtractorOptions;
use crate::sandbox::{Callable, Sandbox};
use crate::syntax::{CALLABLE_TYPES, NodePath, NodeType, SyntaxTree, parse_source, walk};

/// Locates callables in one source text and hands them out as [`Callable`]s.
///
/// The syntax tree borrows from `allocator`, which must outlive the
/// extractor. Callables share the extractor's [`Sandbox`].
#[derive(Debug)]
pub struct CallableExtractor<'a> {
    source: &'a str,
    options: ExtractorOptions,
    tree: SyntaxTree<'a>,
    lines: LineIndex,
    sandbox: Sandbox,
}

impl<'a> CallableExtractor<'a> {
    pub fn new(allocator: &'a Allocator, source: &'a str) -> Result<Self> {
        Self::with_options(allocator, source, ExtractorOptions::default())
    }

    pub fn with_options(
        allocator: &'a Allocator,
        source: &'a str,
        options: ExtractorOptions,
    ) -> Result<Self> {
        let program = parse_source(allocator, source, &options.parser_options)?;
        let tree = SyntaxTree::build(program);
        let extractor = Self {
            source,
            lines: LineIndex::new(source),
            tree,
            sandbox: Sandbox::new()?,
            options,
        };
        debug!(
            nodes = extractor.tree.len(),
            candidates = extractor.candidates().len(),
            "built extractor"
        );
        Ok(extractor)
    }

    /// Read `path` into `allocator` and build an extractor with default options.
    pub fn from_file(allocator: &'a Allocator, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded source file");
        Self::new(allocator, allocator.alloc_str(&text))
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// Callable candidates in document order.
    pub fn candidates(&self) -> Vec<NodePath<'_, 'a>> {
        walk(&self.tree, Some(&CALLABLE_TYPES))
    }

    /// The `position`-th candidate, counting from 1.
    pub fn get_callable(&self, position: usize) -> Result<Callable> {
        debug!(position, "looking up callable by position");
        let path = nth(self.candidates().into_iter(), position)?;
        self.extract(path)
    }

    /// The `position`-th candidate that starts on line `line_number` (1-based).
    pub fn get_callable_by_line_number(&self, line_number: usize, position: usize) -> Result<Callable> {
        debug!(line_number, position, "looking up callable by line");
        let on_line = self
            .candidates()
            .into_iter()
            .filter(|path| self.lines.location(path.node().start()).line == line_number);
        let path = nth(on_line, position)?;
        self.extract(path)
    }

    /// Like [`get_callable_by_line_number`](Self::get_callable_by_line_number),
    /// on the first line that contains `partial_content`.
    pub fn get_callable_by_line_content(&self, partial_content: &str, position: usize) -> Result<Callable> {
        let index = self
            .source
            .split('\n')
            .position(|line| line.contains(partial_content))
            .ok_or(ExtractError::CallableNotFound)?;
        self.get_callable_by_line_number(index + 1, position)
    }

    /// First candidate named `callable_name`.
    ///
    /// With a class name, the candidate must also sit inside a class
    /// declaration of that name. Without one, the owner is ignored and the
    /// first candidate with a matching name wins, whether or not it belongs
    /// to a class.
    pub fn get_callable_by_name(&self, callable_name: &str, class_name: Option<&str>) -> Result<Callable> {
        debug!(callable_name, ?class_name, "looking up callable by name");
        let class_name = class_name.filter(|name| !name.is_empty());
        let path = self
            .candidates()
            .into_iter()
            .find(|&path| {
                let owner = match class_name {
                    Some(_) => owner_name(path, NodeType::ClassDeclaration),
                    None => String::new(),
                };
                Identifier::new(callable_name_of(path), owner)
                    .matches(callable_name, class_name.unwrap_or_default())
            })
            .ok_or(ExtractError::CallableNotFound)?;
        self.extract(path)
    }

    /// Name of a candidate and the class declaration it sits in.
    pub fn identify(&self, path: NodePath<'_, 'a>) -> Identifier {
        Identifier::new(callable_name_of(path), owner_name(path, NodeType::ClassDeclaration))
    }

    /// Run isolated `code` in this extractor's sandbox.
    pub fn call(
        &self,
        code: &str,
        args: &[Value],
        context: &mut Option<Value>,
        scope: &Map<String, Value>,
        safe: bool,
    ) -> Result<Value> {
        self.sandbox.call(code, args, context, scope, safe)
    }

    fn extract(&self, path: NodePath<'_, 'a>) -> Result<Callable> {
        let code = isolate(path, &self.options)?;
        debug!(location = %self.lines.location(path.node().start()), "extracted callable");
        Ok(Callable::new(code, self.sandbox.clone()))
    }
}

fn nth<'t, 'a>(
    mut paths: impl Iterator<Item = NodePath<'t, 'a>>,
    position: usize,
) -> Result<NodePath<'t, 'a>> {
    let index = position.checked_sub(1).ok_or(ExtractError::CallableNotFound)?;
    paths.nth(index).ok_or(ExtractError::CallableNotFound)
}

/// Declared name, else a class method's identifier key, else the variable it is assigned to.
fn callable_name_of(path: NodePath<'_, '_>) -> String {
    match path.kind() {
        AstKind::Function(func) => {
            if let Some(name) = func.name() {
                return name.to_string();
            }
        }
        AstKind::MethodDefinition(method) => {
            if let PropertyKey::StaticIdentifier(key) = &method.key {
                return key.name.to_string();
            }
        }
        _ => {}
    }
    owner_name(path, NodeType::VariableDeclarator)
}

fn owner_name(path: NodePath<'_, '_>, node_type: NodeType) -> String {
    path.find_ancestor(node_type)
        .and_then(|owner| match owner.kind() {
            AstKind::Class(class) => class.name().map(|name| name.to_string()),
            AstKind::VariableDeclarator(declarator) => {
                declarator.id.get_identifier_name().map(|name| name.to_string())
            }
            _ => None,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position_zero_is_not_found() {
        let allocator = Allocator::default();
        let extractor = CallableExtractor::new(&allocator, "const f = () => 1").unwrap();
        assert!(extractor.get_callable(0).unwrap_err().is_not_found());
        assert!(extractor.get_callable(2).unwrap_err().is_not_found());
        assert_eq!(extractor.get_callable(1).unwrap().call(&[]).unwrap(), json!(1));
    }

    #[test]
    fn test_identify() {
        let allocator = Allocator::default();
        let source = "class A { m() {} }\nconst named = () => 1\nfunction decl() {}\nsetTimeout(function () {})";
        let extractor = CallableExtractor::new(&allocator, source).unwrap();
        let identifiers: Vec<_> = extractor
            .candidates()
            .into_iter()
            .map(|path| extractor.identify(path))
            .collect();
        assert_eq!(
            identifiers,
            vec![
                Identifier::new("m", "A"),
                Identifier::new("named", ""),
                Identifier::new("decl", ""),
                Identifier::new("", ""),
            ]
        );
    }

    #[test]
    fn test_name_lookup_with_owner() {
        let allocator = Allocator::default();
        let source = "function f1(p) { return p }\nclass A { f1(p) { return p + 10 } }";
        let extractor = CallableExtractor::new(&allocator, source).unwrap();
        let mut free = extractor.get_callable_by_name("f1", None).unwrap();
        assert_eq!(free.call(&[json!(1)]).unwrap(), json!(1));
        let mut method = extractor.get_callable_by_name("f1", Some("A")).unwrap();
        assert_eq!(method.call(&[json!(1)]).unwrap(), json!(11));
        assert!(extractor.get_callable_by_name("f1", Some("B")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_callables_share_the_sandbox() {
        let allocator = Allocator::default();
        let extractor = CallableExtractor::new(&allocator, "() => counter").unwrap();
        extractor.sandbox().set_global("counter", &json!(4)).unwrap();
        let mut callable = extractor.get_callable(1).unwrap();
        assert_eq!(callable.call(&[]).unwrap(), json!(4));
    }
}
