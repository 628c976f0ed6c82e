//! Typed views over arena nodes.
//!
//! A view is a copyable wrapper around a [`NodeId`] whose type names the
//! grammatical kind it was checked against. Views are the currency of the
//! matching and context-extraction APIs: capture slots are typed by view, so
//! a capture can never disagree with the kind it matched.

use crate::syntax::tree::NodeBody;
use crate::syntax::{NodeId, PrimaryKind, RedirMode, Span, SyntaxKind, SyntaxTree};

// ============================================================================
// TYPED NODE TRAIT
// ============================================================================

/// A node view tied to one [`SyntaxKind`].
pub trait TypedNode: Copy {
    /// The kind this view certifies.
    const KIND: SyntaxKind;

    #[doc(hidden)]
    fn from_raw(id: NodeId) -> Self;

    /// The underlying arena id.
    fn id(self) -> NodeId;

    /// Checked construction: `Some` iff `id` has kind [`Self::KIND`].
    fn cast(tree: &SyntaxTree, id: NodeId) -> Option<Self> {
        (tree.kind(id) == Self::KIND).then(|| Self::from_raw(id))
    }

    fn span(self, tree: &SyntaxTree) -> Span {
        tree.span(self.id())
    }

    /// The source slice this node covers.
    fn text<'t>(self, tree: &'t SyntaxTree) -> &'t str {
        tree.text(self.id())
    }
}

macro_rules! typed_node {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(NodeId);

        impl TypedNode for $name {
            const KIND: SyntaxKind = SyntaxKind::$kind;

            fn from_raw(id: NodeId) -> Self {
                Self(id)
            }

            fn id(self) -> NodeId {
                self.0
            }
        }
    };
}

typed_node!(
    /// View of a whole-input node.
    Chunk => Chunk
);
typed_node!(
    /// View of a pipeline node.
    Pipeline => Pipeline
);
typed_node!(
    /// View of one command invocation.
    Form => Form
);
typed_node!(
    /// View of a bracketed list.
    Array => Array
);
typed_node!(
    /// View of one word-like expression.
    Compound => Compound
);
typed_node!(
    /// View of a primary plus its optional index operations.
    Indexing => Indexing
);
typed_node!(
    /// View of the innermost literal or expression unit.
    Primary => Primary
);
typed_node!(
    /// View of a redirection.
    Redir => Redir
);
typed_node!(
    /// View of an inter-token separator.
    Sep => Sep
);

// ============================================================================
// KIND-SPECIFIC ACCESSORS
// ============================================================================

impl Chunk {
    pub fn pipelines(self, tree: &SyntaxTree) -> impl Iterator<Item = Pipeline> + '_ {
        tree.children(self.0)
            .iter()
            .filter_map(move |&id| Pipeline::cast(tree, id))
    }
}

impl Pipeline {
    pub fn forms(self, tree: &SyntaxTree) -> impl Iterator<Item = Form> + '_ {
        tree.children(self.0)
            .iter()
            .filter_map(move |&id| Form::cast(tree, id))
    }
}

impl Form {
    /// The command-word compound, absent while the form has no head yet.
    pub fn head(self, tree: &SyntaxTree) -> Option<Compound> {
        match &tree.node(self.0).body {
            NodeBody::Form(data) => data.head.and_then(|id| Compound::cast(tree, id)),
            _ => None,
        }
    }

    /// Argument compounds in source order, redirections excluded.
    pub fn args(self, tree: &SyntaxTree) -> impl Iterator<Item = Compound> + '_ {
        let args: &[NodeId] = match &tree.node(self.0).body {
            NodeBody::Form(data) => &data.args,
            _ => &[],
        };
        args.iter().filter_map(move |&id| Compound::cast(tree, id))
    }

    pub fn redirs(self, tree: &SyntaxTree) -> impl Iterator<Item = Redir> + '_ {
        let redirs: &[NodeId] = match &tree.node(self.0).body {
            NodeBody::Form(data) => &data.redirs,
            _ => &[],
        };
        redirs.iter().filter_map(move |&id| Redir::cast(tree, id))
    }
}

impl Array {
    pub fn compounds(self, tree: &SyntaxTree) -> impl Iterator<Item = Compound> + '_ {
        tree.children(self.0)
            .iter()
            .filter_map(move |&id| Compound::cast(tree, id))
    }
}

impl Compound {
    /// The concatenated indexing parts making up this word.
    pub fn indexings(self, tree: &SyntaxTree) -> impl Iterator<Item = Indexing> + '_ {
        tree.children(self.0)
            .iter()
            .filter_map(move |&id| Indexing::cast(tree, id))
    }
}

impl Indexing {
    pub fn head(self, tree: &SyntaxTree) -> Option<Primary> {
        match &tree.node(self.0).body {
            NodeBody::Indexing(data) => Primary::cast(tree, data.head),
            _ => None,
        }
    }

    /// Whether any index operation follows the head primary.
    pub fn has_indices(self, tree: &SyntaxTree) -> bool {
        match &tree.node(self.0).body {
            NodeBody::Indexing(data) => !data.indices.is_empty(),
            _ => false,
        }
    }

    pub fn indices(self, tree: &SyntaxTree) -> impl Iterator<Item = Array> + '_ {
        let indices: &[NodeId] = match &tree.node(self.0).body {
            NodeBody::Indexing(data) => &data.indices,
            _ => &[],
        };
        indices.iter().filter_map(move |&id| Array::cast(tree, id))
    }
}

impl Primary {
    /// The lexical shape of this primary.
    pub fn kind(self, tree: &SyntaxTree) -> PrimaryKind {
        match &tree.node(self.0).body {
            NodeBody::Primary(data) => data.kind,
            // A primary view only ever wraps a primary record.
            _ => PrimaryKind::Bareword,
        }
    }

    /// The evaluated text value: unescaped content for quoted forms, the
    /// bare name for variables.
    pub fn value(self, tree: &SyntaxTree) -> &str {
        match &tree.node(self.0).body {
            NodeBody::Primary(data) => &data.value,
            _ => "",
        }
    }
}

impl Redir {
    pub fn mode(self, tree: &SyntaxTree) -> RedirMode {
        match &tree.node(self.0).body {
            NodeBody::Redir(data) => data.mode,
            // A redir view only ever wraps a redir record.
            _ => RedirMode::Write,
        }
    }

    /// An explicit source fd, as in `2>err`.
    pub fn fd(self, tree: &SyntaxTree) -> Option<u32> {
        match &tree.node(self.0).body {
            NodeBody::Redir(data) => data.fd,
            _ => None,
        }
    }

    /// The target compound, absent while still being typed.
    pub fn target(self, tree: &SyntaxTree) -> Option<Compound> {
        tree.children(self.0)
            .iter()
            .find_map(|&id| Compound::cast(tree, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TreeBuilder;

    fn word_tree() -> (SyntaxTree, NodeId) {
        let mut b = TreeBuilder::new("echo hi");
        let head_word = b.primary(PrimaryKind::Bareword, Span::new(0, 4), "echo");
        let head_ix = b.indexing(Span::new(0, 4), head_word, vec![]);
        let head = b.compound(Span::new(0, 4), vec![head_ix]);
        let sep = b.sep(Span::new(4, 5));
        let arg_word = b.primary(PrimaryKind::Bareword, Span::new(5, 7), "hi");
        let arg_ix = b.indexing(Span::new(5, 7), arg_word, vec![]);
        let arg = b.compound(Span::new(5, 7), vec![arg_ix]);
        let form = b.form(Span::new(0, 7), Some(head), vec![arg], vec![], vec![sep]);
        let pipeline = b.pipeline(Span::new(0, 7), vec![form], vec![]);
        let chunk = b.chunk(Span::new(0, 7), vec![pipeline], vec![]);
        let tree = b.finish(chunk).expect("fixture tree is valid");
        (tree, form)
    }

    #[test]
    fn cast_checks_kind() {
        let (tree, form_id) = word_tree();
        assert!(Form::cast(&tree, form_id).is_some());
        assert!(Compound::cast(&tree, form_id).is_none());
        assert!(Chunk::cast(&tree, tree.root()).is_some());
    }

    #[test]
    fn form_exposes_head_and_args() {
        let (tree, form_id) = word_tree();
        let form = Form::cast(&tree, form_id).expect("form view");
        let head = form.head(&tree).expect("head compound");
        assert_eq!(head.text(&tree), "echo");

        let args: Vec<_> = form.args(&tree).collect();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].text(&tree), "hi");
        assert_eq!(form.redirs(&tree).count(), 0);
    }

    #[test]
    fn indexing_exposes_primary() {
        let (tree, form_id) = word_tree();
        let form = Form::cast(&tree, form_id).expect("form view");
        let head = form.head(&tree).expect("head compound");
        let ix = head.indexings(&tree).next().expect("indexing part");
        assert!(!ix.has_indices(&tree));

        let primary = ix.head(&tree).expect("primary head");
        assert_eq!(primary.kind(&tree), PrimaryKind::Bareword);
        assert_eq!(primary.value(&tree), "echo");
        assert_eq!(primary.span(&tree), Span::new(0, 4));
    }

    /// `sort $a[0] <in 2>>out`: an indexed argument plus two redirections.
    fn redirected_tree() -> SyntaxTree {
        let mut b = TreeBuilder::new("sort $a[0] <in 2>>out");
        let head_word = b.primary(PrimaryKind::Bareword, Span::new(0, 4), "sort");
        let head_ix = b.indexing(Span::new(0, 4), head_word, vec![]);
        let head = b.compound(Span::new(0, 4), vec![head_ix]);
        let s1 = b.sep(Span::new(4, 5));
        let var = b.primary(PrimaryKind::Variable, Span::new(5, 7), "a");
        let digit = b.primary(PrimaryKind::Bareword, Span::new(8, 9), "0");
        let digit_ix = b.indexing(Span::new(8, 9), digit, vec![]);
        let digit_word = b.compound(Span::new(8, 9), vec![digit_ix]);
        let index = b.array(Span::new(7, 10), vec![digit_word], vec![]);
        let arg_ix = b.indexing(Span::new(5, 10), var, vec![index]);
        let arg = b.compound(Span::new(5, 10), vec![arg_ix]);
        let s2 = b.sep(Span::new(10, 11));
        let in_word = b.primary(PrimaryKind::Bareword, Span::new(12, 14), "in");
        let in_ix = b.indexing(Span::new(12, 14), in_word, vec![]);
        let in_target = b.compound(Span::new(12, 14), vec![in_ix]);
        let read = b.redir(Span::new(11, 14), RedirMode::Read, None, Some(in_target));
        let s3 = b.sep(Span::new(14, 15));
        let out_word = b.primary(PrimaryKind::Bareword, Span::new(18, 21), "out");
        let out_ix = b.indexing(Span::new(18, 21), out_word, vec![]);
        let out_target = b.compound(Span::new(18, 21), vec![out_ix]);
        let append = b.redir(Span::new(15, 21), RedirMode::Append, Some(2), Some(out_target));
        let full = Span::new(0, b.source().len());
        let form = b.form(full, Some(head), vec![arg], vec![read, append], vec![s1, s2, s3]);
        let pipeline = b.pipeline(full, vec![form], vec![]);
        let root = b.chunk(full, vec![pipeline], vec![]);
        b.finish(root).expect("fixture tree is valid")
    }

    #[test]
    fn walks_from_chunk_to_form() {
        let tree = redirected_tree();
        let chunk = Chunk::cast(&tree, tree.root()).expect("chunk view");
        let pipeline = chunk.pipelines(&tree).next().expect("one pipeline");
        assert_eq!(pipeline.forms(&tree).count(), 1);

        let form = pipeline.forms(&tree).next().expect("one form");
        assert_eq!(form.head(&tree).map(|h| h.text(&tree)), Some("sort"));
    }

    #[test]
    fn indexed_words_expose_their_arrays() {
        let tree = redirected_tree();
        let chunk = Chunk::cast(&tree, tree.root()).expect("chunk view");
        let form = chunk
            .pipelines(&tree)
            .next()
            .and_then(|p| p.forms(&tree).next())
            .expect("one form");
        let arg = form.args(&tree).next().expect("one argument");
        let part = arg.indexings(&tree).next().expect("indexing part");
        assert!(part.has_indices(&tree));

        let index = part.indices(&tree).next().expect("index array");
        let element = index.compounds(&tree).next().expect("array element");
        assert_eq!(element.text(&tree), "0");
    }

    #[test]
    fn redirs_expose_mode_fd_and_target() {
        let tree = redirected_tree();
        let chunk = Chunk::cast(&tree, tree.root()).expect("chunk view");
        let form = chunk
            .pipelines(&tree)
            .next()
            .and_then(|p| p.forms(&tree).next())
            .expect("one form");
        let redirs: Vec<_> = form.redirs(&tree).collect();
        assert_eq!(redirs.len(), 2);

        assert_eq!(redirs[0].mode(&tree), RedirMode::Read);
        assert_eq!(redirs[0].mode(&tree).operator(), "<");
        assert_eq!(redirs[0].fd(&tree), None);
        assert_eq!(redirs[0].target(&tree).map(|t| t.text(&tree)), Some("in"));

        assert_eq!(redirs[1].mode(&tree), RedirMode::Append);
        assert_eq!(redirs[1].mode(&tree).operator(), ">>");
        assert_eq!(redirs[1].fd(&tree), Some(2));
        assert_eq!(redirs[1].target(&tree).map(|t| t.text(&tree)), Some("out"));
    }
}
