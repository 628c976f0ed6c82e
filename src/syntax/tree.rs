//! Arena storage for parsed command lines.
//!
//! Nodes live in a flat arena addressed by [`NodeId`]; the parent relation is
//! part of the arena record, set once at build time, so the tree itself stays
//! plain shareable data with no interior back-references.

use crate::syntax::{PrimaryKind, RedirMode, Span, SyntaxKind};

// ============================================================================
// NODE IDENTITY
// ============================================================================

/// Identity of a node within one [`SyntaxTree`].
///
/// Ids are only minted by [`TreeBuilder`](crate::syntax::TreeBuilder) and are
/// meaningless outside the tree that produced them. Comparing two ids compares
/// node identity, which is what all shape matching relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// NODE RECORDS
// ============================================================================

/// Per-kind payload of a node record.
#[derive(Debug, Clone)]
pub(crate) enum NodeBody {
    Chunk,
    Pipeline,
    Form(FormData),
    Array,
    Compound,
    Indexing(IndexingData),
    Primary(PrimaryData),
    Redir(RedirData),
    Sep,
}

impl NodeBody {
    pub(crate) fn kind(&self) -> SyntaxKind {
        match self {
            NodeBody::Chunk => SyntaxKind::Chunk,
            NodeBody::Pipeline => SyntaxKind::Pipeline,
            NodeBody::Form(_) => SyntaxKind::Form,
            NodeBody::Array => SyntaxKind::Array,
            NodeBody::Compound => SyntaxKind::Compound,
            NodeBody::Indexing(_) => SyntaxKind::Indexing,
            NodeBody::Primary(_) => SyntaxKind::Primary,
            NodeBody::Redir(_) => SyntaxKind::Redir,
            NodeBody::Sep => SyntaxKind::Sep,
        }
    }
}

/// Head, arguments, and redirections of one command invocation.
///
/// `head` is absent for forms still missing their command word. The lists
/// reference children of the form node; separators between them appear only
/// in the generic child list.
#[derive(Debug, Clone)]
pub(crate) struct FormData {
    pub(crate) head: Option<NodeId>,
    pub(crate) args: Vec<NodeId>,
    pub(crate) redirs: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub(crate) struct IndexingData {
    pub(crate) head: NodeId,
    pub(crate) indices: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub(crate) struct PrimaryData {
    pub(crate) kind: PrimaryKind,
    /// The evaluated text value: unescaped content for quoted strings, the
    /// bare name for variables, the literal text for barewords.
    pub(crate) value: String,
}

#[derive(Debug, Clone)]
pub(crate) struct RedirData {
    pub(crate) mode: RedirMode,
    pub(crate) fd: Option<u32>,
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) span: Span,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) body: NodeBody,
}

// ============================================================================
// SYNTAX TREE
// ============================================================================

/// An immutable parsed command line.
///
/// Construction goes through [`TreeBuilder`](crate::syntax::TreeBuilder);
/// afterwards the tree is read-only and every query on it is a plain lookup.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub(crate) source: String,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) root: NodeId,
}

impl SyntaxTree {
    /// The root node, a [`SyntaxKind::Chunk`] for complete inputs.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The source text the tree was built over.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.node(id).body.kind()
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    /// Ordered children of `id`; empty for leaves.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Parent of `id`; `None` only for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// The source slice covered by `id`, empty if the span is degenerate.
    pub fn text(&self, id: NodeId) -> &str {
        let span = self.span(id);
        self.source.get(span.start..span.end).unwrap_or_default()
    }

    /// Resolves the cursor to its ancestor chain, leaf first.
    ///
    /// Convenience for [`NodePath::find`](crate::path::NodePath::find)
    /// starting at the tree root.
    pub fn path_at(&self, offset: usize) -> crate::path::NodePath {
        crate::path::NodePath::find(self, self.root, offset)
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}
