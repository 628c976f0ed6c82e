//! Cursor-to-node resolution.
//!
//! A completion query starts by locating the node under the cursor and its
//! ancestor chain; everything else (shape matching, context extraction) works
//! over that chain.

use tracing::trace;

use crate::syntax::{NodeId, SyntaxTree};

/// The ancestor chain of the node under the cursor, leaf first, root last.
///
/// Adjacent elements always satisfy `parent(path[i]) == path[i + 1]`. An
/// empty path means the cursor touches no leaf: it sits in a structural gap
/// or outside the document, and every matcher fails on it.
///
/// # Examples
///
/// ```rust
/// use cowry_complete::path::NodePath;
/// use cowry_complete::syntax::{PrimaryKind, Span, SyntaxKind, TreeBuilder};
///
/// let mut b = TreeBuilder::new("ls");
/// let word = b.primary(PrimaryKind::Bareword, Span::new(0, 2), "ls");
/// let part = b.indexing(Span::new(0, 2), word, vec![]);
/// let head = b.compound(Span::new(0, 2), vec![part]);
/// let form = b.form(Span::new(0, 2), Some(head), vec![], vec![], vec![]);
/// let pipeline = b.pipeline(Span::new(0, 2), vec![form], vec![]);
/// let root = b.chunk(Span::new(0, 2), vec![pipeline], vec![]);
/// let tree = b.finish(root).unwrap();
///
/// let path = NodePath::find(&tree, tree.root(), 1);
/// assert_eq!(path.len(), 6);
/// assert_eq!(path.leaf().map(|id| tree.kind(id)), Some(SyntaxKind::Primary));
/// assert_eq!(path.get(path.len() - 1), Some(tree.root()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    ids: Vec<NodeId>,
}

impl NodePath {
    /// The path containing no nodes; every matcher fails on it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolves `offset` to the deepest node under `root` whose range
    /// contains it, then collects the chain from that leaf back up to
    /// `root`.
    ///
    /// Containment is inclusive on both ends, so a cursor sitting right
    /// after a token still resolves into it. When several children share a
    /// boundary offset the first in child order wins. The empty path is
    /// returned when `offset` lies outside `root`'s own range or in a gap
    /// no child covers.
    pub fn find(tree: &SyntaxTree, root: NodeId, offset: usize) -> NodePath {
        if !tree.span(root).contains_inclusive(offset) {
            trace!(offset, "cursor outside the tree");
            return NodePath::empty();
        }
        let mut current = root;
        'descend: while !tree.children(current).is_empty() {
            for &child in tree.children(current) {
                if tree.span(child).contains_inclusive(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            trace!(offset, "cursor in a structural gap");
            return NodePath::empty();
        }

        let mut ids = Vec::new();
        let mut node = current;
        loop {
            ids.push(node);
            if node == root {
                break;
            }
            match tree.parent(node) {
                Some(parent) => node = parent,
                None => break,
            }
        }
        trace!(offset, depth = ids.len(), "resolved node path");
        NodePath { ids }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// The node under the cursor, `None` for the empty path.
    pub fn leaf(&self) -> Option<NodeId> {
        self.ids.first().copied()
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.ids.get(index).copied()
    }

    /// The chain as a slice, leaf first; matchers consume prefixes of it.
    pub fn as_slice(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }
}
