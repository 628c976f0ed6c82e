//! Bottom-up construction of syntax trees.
//!
//! The parser (or a test fixture) allocates leaves first, then wraps them in
//! their parents; `finish` runs the structural validation everything
//! downstream depends on and seals the arena into a read-only
//! [`SyntaxTree`].

use crate::diagnostics::{SourceContext, TreeError, TreeErrorKind};
use crate::syntax::tree::{FormData, IndexingData, NodeBody, NodeData, PrimaryData, RedirData};
use crate::syntax::{NodeId, PrimaryKind, RedirMode, Span, SyntaxKind, SyntaxTree};

/// Assembles one [`SyntaxTree`] over a fixed source line.
///
/// Children are passed to their parent's constructor; the builder orders each
/// child list by span and records the parent relation. Invariants are checked
/// when the tree is sealed, not on every call, so construction itself is
/// infallible.
///
/// # Examples
///
/// ```rust
/// use cowry_complete::syntax::{PrimaryKind, Span, SyntaxKind, TreeBuilder};
///
/// let mut b = TreeBuilder::new("echo");
/// let word = b.primary(PrimaryKind::Bareword, Span::new(0, 4), "echo");
/// let part = b.indexing(Span::new(0, 4), word, vec![]);
/// let head = b.compound(Span::new(0, 4), vec![part]);
/// let form = b.form(Span::new(0, 4), Some(head), vec![], vec![], vec![]);
/// let pipeline = b.pipeline(Span::new(0, 4), vec![form], vec![]);
/// let root = b.chunk(Span::new(0, 4), vec![pipeline], vec![]);
///
/// let tree = b.finish(root).unwrap();
/// assert_eq!(tree.kind(tree.root()), SyntaxKind::Chunk);
/// assert_eq!(tree.text(tree.root()), "echo");
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    ctx: SourceContext,
    nodes: Vec<NodeData>,
    pending: Option<TreeError>,
}

impl TreeBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            ctx: SourceContext::new("input", source),
            nodes: Vec::new(),
            pending: None,
        }
    }

    /// The source text this builder constructs over.
    pub fn source(&self) -> &str {
        &self.ctx.content
    }

    // ------------------------------------------------------------------
    // Node constructors, leaves first.
    // ------------------------------------------------------------------

    pub fn primary(&mut self, kind: PrimaryKind, span: Span, value: impl Into<String>) -> NodeId {
        self.alloc(
            span,
            NodeBody::Primary(PrimaryData {
                kind,
                value: value.into(),
            }),
            vec![],
        )
    }

    pub fn sep(&mut self, span: Span) -> NodeId {
        self.alloc(span, NodeBody::Sep, vec![])
    }

    pub fn indexing(&mut self, span: Span, head: NodeId, indices: Vec<NodeId>) -> NodeId {
        self.expect_kind(head, SyntaxKind::Primary);
        self.expect_kinds(&indices, SyntaxKind::Array);
        let mut parts = vec![head];
        parts.extend(indices.iter().copied());
        self.alloc(span, NodeBody::Indexing(IndexingData { head, indices }), parts)
    }

    pub fn compound(&mut self, span: Span, indexings: Vec<NodeId>) -> NodeId {
        self.expect_kinds(&indexings, SyntaxKind::Indexing);
        self.alloc(span, NodeBody::Compound, indexings)
    }

    pub fn array(&mut self, span: Span, compounds: Vec<NodeId>, seps: Vec<NodeId>) -> NodeId {
        self.expect_kinds(&compounds, SyntaxKind::Compound);
        self.expect_kinds(&seps, SyntaxKind::Sep);
        let parts = compounds.into_iter().chain(seps).collect();
        self.alloc(span, NodeBody::Array, parts)
    }

    pub fn redir(
        &mut self,
        span: Span,
        mode: RedirMode,
        fd: Option<u32>,
        target: Option<NodeId>,
    ) -> NodeId {
        if let Some(target) = target {
            self.expect_kind(target, SyntaxKind::Compound);
        }
        let parts = target.into_iter().collect();
        self.alloc(span, NodeBody::Redir(RedirData { mode, fd }), parts)
    }

    pub fn form(
        &mut self,
        span: Span,
        head: Option<NodeId>,
        args: Vec<NodeId>,
        redirs: Vec<NodeId>,
        seps: Vec<NodeId>,
    ) -> NodeId {
        if let Some(head) = head {
            self.expect_kind(head, SyntaxKind::Compound);
        }
        self.expect_kinds(&args, SyntaxKind::Compound);
        self.expect_kinds(&redirs, SyntaxKind::Redir);
        self.expect_kinds(&seps, SyntaxKind::Sep);
        let parts = head
            .into_iter()
            .chain(args.iter().copied())
            .chain(redirs.iter().copied())
            .chain(seps)
            .collect();
        self.alloc(span, NodeBody::Form(FormData { head, args, redirs }), parts)
    }

    pub fn pipeline(&mut self, span: Span, forms: Vec<NodeId>, seps: Vec<NodeId>) -> NodeId {
        self.expect_kinds(&forms, SyntaxKind::Form);
        self.expect_kinds(&seps, SyntaxKind::Sep);
        let parts = forms.into_iter().chain(seps).collect();
        self.alloc(span, NodeBody::Pipeline, parts)
    }

    pub fn chunk(&mut self, span: Span, pipelines: Vec<NodeId>, seps: Vec<NodeId>) -> NodeId {
        self.expect_kinds(&pipelines, SyntaxKind::Pipeline);
        self.expect_kinds(&seps, SyntaxKind::Sep);
        let parts = pipelines.into_iter().chain(seps).collect();
        self.alloc(span, NodeBody::Chunk, parts)
    }

    // ------------------------------------------------------------------
    // Sealing and validation.
    // ------------------------------------------------------------------

    /// Seal the arena with `root` as the tree root.
    ///
    /// Validates the invariants matching relies on: in-bounds spans, children
    /// inside their parent and mutually non-overlapping, single attachment,
    /// expected child kinds, and full reachability from the root.
    pub fn finish(mut self, root: NodeId) -> Result<SyntaxTree, TreeError> {
        if let Some(err) = self.pending.take() {
            return Err(err);
        }
        let Some(root_data) = self.nodes.get(root.index()) else {
            return Err(self.error(TreeErrorKind::UnattachedNode, Span::default()));
        };
        if root_data.parent.is_some() {
            return Err(self.error(TreeErrorKind::RootAttached, root_data.span));
        }

        let len = self.ctx.content.len();
        for node in &self.nodes {
            let span = node.span;
            if span.start > span.end || span.end > len {
                return Err(self.error(
                    TreeErrorKind::SpanOutOfBounds {
                        start: span.start,
                        end: span.end,
                        len,
                    },
                    Span::new(span.start.min(len), span.end.min(len)),
                ));
            }
        }

        for node in &self.nodes {
            for &child in &node.children {
                let child_span = self.nodes[child.index()].span;
                if child_span.start < node.span.start || child_span.end > node.span.end {
                    return Err(self
                        .error(TreeErrorKind::ChildOutsideParent, child_span)
                        .with_related("parent", node.span));
                }
            }
            for pair in node.children.windows(2) {
                let first = self.nodes[pair[0].index()].span;
                let second = self.nodes[pair[1].index()].span;
                if second.start < first.end {
                    return Err(self
                        .error(TreeErrorKind::OverlappingSiblings, second)
                        .with_related("previous sibling", first));
                }
            }
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if visited[id.index()] {
                continue;
            }
            visited[id.index()] = true;
            stack.extend(self.nodes[id.index()].children.iter().copied());
        }
        if let Some(index) = visited.iter().position(|seen| !seen) {
            let span = self.nodes[index].span;
            return Err(self.error(TreeErrorKind::UnattachedNode, span));
        }

        Ok(SyntaxTree {
            source: self.ctx.content,
            nodes: self.nodes,
            root,
        })
    }

    // ------------------------------------------------------------------
    // Internals.
    // ------------------------------------------------------------------

    fn alloc(&mut self, span: Span, body: NodeBody, mut parts: Vec<NodeId>) -> NodeId {
        parts.sort_by_key(|&id| self.nodes[id.index()].span.start);
        let id = NodeId::new(self.nodes.len());
        for &child in &parts {
            let child_span = self.nodes[child.index()].span;
            if self.nodes[child.index()].parent.is_some() {
                if self.pending.is_none() {
                    self.pending = Some(
                        self.error(TreeErrorKind::DuplicateAttachment, child_span)
                            .with_related("second parent", span),
                    );
                }
            } else {
                self.nodes[child.index()].parent = Some(id);
            }
        }
        self.nodes.push(NodeData {
            span,
            parent: None,
            children: parts,
            body,
        });
        id
    }

    fn expect_kind(&mut self, id: NodeId, expected: SyntaxKind) {
        let found = self.nodes[id.index()].body.kind();
        if found != expected && self.pending.is_none() {
            let span = self.nodes[id.index()].span;
            self.pending = Some(self.error(TreeErrorKind::KindMismatch { expected, found }, span));
        }
    }

    fn expect_kinds(&mut self, ids: &[NodeId], expected: SyntaxKind) {
        for &id in ids {
            self.expect_kind(id, expected);
        }
    }

    fn error(&self, kind: TreeErrorKind, span: Span) -> TreeError {
        TreeError::new(kind, &self.ctx, span)
    }
}
