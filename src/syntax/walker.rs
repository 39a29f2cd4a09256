use oxc_ast::AstKind;
use oxc_ast::ast::Program;
use oxc_ast_visit::Visit;
use oxc_span::GetSpan;

use super::NodeType;

/// Index of a node in a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SyntaxNode<'a> {
    pub kind: AstKind<'a>,
    pub node_type: NodeType,
    pub parent: Option<NodeId>,
}

impl SyntaxNode<'_> {
    /// Byte offset where the node starts in the source text.
    pub fn start(&self) -> u32 {
        self.kind.span().start
    }
}

/// Every node of a parsed program, in depth-first pre-order, with parent links.
#[derive(Debug)]
pub struct SyntaxTree<'a> {
    nodes: Vec<SyntaxNode<'a>>,
}

impl<'a> SyntaxTree<'a> {
    pub fn build(program: &'a Program<'a>) -> Self {
        let mut builder = TreeBuilder::default();
        builder.visit_program(program);
        Self {
            nodes: builder.nodes,
        }
    }

    pub fn nodes(&self) -> &[SyntaxNode<'a>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &SyntaxNode<'a> {
        &self.nodes[id.0]
    }

    pub fn path(&self, id: NodeId) -> NodePath<'_, 'a> {
        NodePath { tree: self, id }
    }
}

/// A node together with a handle on its ancestors.
#[derive(Debug, Clone, Copy)]
pub struct NodePath<'t, 'a> {
    tree: &'t SyntaxTree<'a>,
    id: NodeId,
}

impl<'t, 'a> NodePath<'t, 'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'t SyntaxNode<'a> {
        self.tree.get(self.id)
    }

    pub fn kind(&self) -> AstKind<'a> {
        self.node().kind
    }

    pub fn node_type(&self) -> NodeType {
        self.node().node_type
    }

    pub fn parent_path(&self) -> Option<NodePath<'t, 'a>> {
        self.node().parent.map(|id| self.tree.path(id))
    }

    /// Nearest node of `node_type` on the way up, starting with this node itself.
    pub fn find_ancestor(&self, node_type: NodeType) -> Option<NodePath<'t, 'a>> {
        let mut current = Some(*self);
        while let Some(path) = current {
            if path.node_type() == node_type {
                return Some(path);
            }
            current = path.parent_path();
        }
        None
    }
}

/// Paths of every node in `tree`, in document order, optionally restricted to `filter`.
///
/// The filter only decides which paths are returned: the tree already holds
/// every node, so nested matches inside filtered-out subtrees are still found.
pub fn walk<'t, 'a>(tree: &'t SyntaxTree<'a>, filter: Option<&[NodeType]>) -> Vec<NodePath<'t, 'a>> {
    (0..tree.len())
        .map(|index| tree.path(NodeId(index)))
        .filter(|path| filter.is_none_or(|types| types.contains(&path.node_type())))
        .collect()
}

#[derive(Default)]
struct TreeBuilder<'a> {
    nodes: Vec<SyntaxNode<'a>>,
    stack: Vec<NodeId>,
}

impl<'a> Visit<'a> for TreeBuilder<'a> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        let parent = self.stack.last().copied();
        let node_type = NodeType::of(kind, parent.map(|id| self.nodes[id.0].kind));
        let id = NodeId(self.nodes.len());
        self.nodes.push(SyntaxNode {
            kind,
            node_type,
            parent,
        });
        self.stack.push(id);
    }

    fn leave_node(&mut self, _kind: AstKind<'a>) {
        self.stack.pop();
    }
}
