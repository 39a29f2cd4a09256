use oxc_ast::ast::{ClassType, FunctionType, PropertyKey, PropertyKind};
use oxc_ast::{AstKind, AstType};

/// Type tag of a syntax node, as seen by the callable locator.
///
/// oxc models a class method as a `MethodDefinition` wrapping a plain
/// `Function`, and an object method as an `ObjectProperty` wrapping one.
/// Those inner functions get their own tags so that only the method itself
/// counts as a callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    ClassMethod,
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunctionExpression,
    /// Function value of a class method.
    MethodValue,
    /// Object literal method shorthand, getter or setter.
    ObjectMethod,
    /// Overload signature or `declare function`.
    TsDeclareFunction,
    /// Abstract method or method overload signature.
    TsDeclareMethod,
    /// Method keyed by a `#private` name.
    PrivateMethod,
    ClassDeclaration,
    ClassExpression,
    VariableDeclarator,
    Other(AstType),
}

/// Node types a callable candidate may have.
pub const CALLABLE_TYPES: [NodeType; 4] = [
    NodeType::ClassMethod,
    NodeType::FunctionDeclaration,
    NodeType::FunctionExpression,
    NodeType::ArrowFunctionExpression,
];

impl NodeType {
    /// Derive the tag of `kind`, given the kind of its parent node.
    pub fn of(kind: AstKind<'_>, parent: Option<AstKind<'_>>) -> Self {
        match kind {
            AstKind::MethodDefinition(method)
                if matches!(method.key, PropertyKey::PrivateIdentifier(_)) =>
            {
                Self::PrivateMethod
            }
            AstKind::MethodDefinition(method) if method.value.body.is_some() => Self::ClassMethod,
            AstKind::MethodDefinition(_) => Self::TsDeclareMethod,
            AstKind::Function(func) => match parent {
                Some(AstKind::MethodDefinition(_)) => Self::MethodValue,
                Some(AstKind::ObjectProperty(prop))
                    if prop.method || prop.kind != PropertyKind::Init =>
                {
                    Self::ObjectMethod
                }
                _ => match func.r#type {
                    FunctionType::FunctionDeclaration if func.body.is_some() => {
                        Self::FunctionDeclaration
                    }
                    FunctionType::FunctionExpression => Self::FunctionExpression,
                    _ => Self::TsDeclareFunction,
                },
            },
            AstKind::ArrowFunctionExpression(_) => Self::ArrowFunctionExpression,
            AstKind::Class(class) => match class.r#type {
                ClassType::ClassDeclaration => Self::ClassDeclaration,
                ClassType::ClassExpression => Self::ClassExpression,
            },
            AstKind::VariableDeclarator(_) => Self::VariableDeclarator,
            other => Self::Other(other.ty()),
        }
    }

    pub fn is_callable(self) -> bool {
        CALLABLE_TYPES.contains(&self)
    }
}
