//! Error reporting for tree construction.
//!
//! Completion queries never raise errors; a shape that does not match is an
//! ordinary `Option::None`. The one fallible boundary is assembling a
//! [`SyntaxTree`](crate::syntax::SyntaxTree) from parser output, and those
//! failures are reported here as rich diagnostics.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

use crate::syntax::{Span, SyntaxKind};

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// Named source text attached to diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to a shared `NamedSource` for miette rendering.
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::new("input", "")
    }
}

/// Convert a syntax [`Span`] into a miette [`SourceSpan`].
pub fn to_source_span(span: Span) -> SourceSpan {
    (span.start, span.len()).into()
}

// ============================================================================
// TREE ERRORS
// ============================================================================

/// What went wrong while assembling a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeErrorKind {
    #[error("node attached to two parents")]
    DuplicateAttachment,
    #[error("root node has a parent")]
    RootAttached,
    #[error("node span {start}..{end} exceeds source length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
    #[error("child span escapes its parent")]
    ChildOutsideParent,
    #[error("sibling spans overlap")]
    OverlappingSiblings,
    #[error("node is not reachable from the root")]
    UnattachedNode,
    #[error("expected a {expected} child, found a {found}")]
    KindMismatch {
        expected: SyntaxKind,
        found: SyntaxKind,
    },
}

impl TreeErrorKind {
    fn code(&self) -> &'static str {
        match self {
            TreeErrorKind::DuplicateAttachment => "cowry::tree::duplicate_attachment",
            TreeErrorKind::RootAttached => "cowry::tree::root_attached",
            TreeErrorKind::SpanOutOfBounds { .. } => "cowry::tree::span_out_of_bounds",
            TreeErrorKind::ChildOutsideParent => "cowry::tree::child_outside_parent",
            TreeErrorKind::OverlappingSiblings => "cowry::tree::overlapping_siblings",
            TreeErrorKind::UnattachedNode => "cowry::tree::unattached_node",
            TreeErrorKind::KindMismatch { .. } => "cowry::tree::kind_mismatch",
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            TreeErrorKind::DuplicateAttachment => {
                Some("a node id may be passed to at most one parent constructor")
            }
            TreeErrorKind::SpanOutOfBounds { .. } => {
                Some("spans are byte offsets into the source given to TreeBuilder::new")
            }
            TreeErrorKind::KindMismatch { .. } => {
                Some("builder constructors require children of the kind their parameter names")
            }
            TreeErrorKind::UnattachedNode => {
                Some("every allocated node must end up reachable from the finished root")
            }
            _ => None,
        }
    }
}

/// A rejected syntax tree.
///
/// Carries the offending node's span and the source text so the failure can
/// be rendered against the command line that produced it.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct TreeError {
    pub kind: TreeErrorKind,
    source_text: Arc<NamedSource<String>>,
    span: Span,
    related: Option<(String, Span)>,
}

impl TreeError {
    pub(crate) fn new(kind: TreeErrorKind, ctx: &SourceContext, span: Span) -> Self {
        Self {
            kind,
            source_text: ctx.to_named_source(),
            span,
            related: None,
        }
    }

    pub(crate) fn with_related(mut self, label: impl Into<String>, span: Span) -> Self {
        self.related = Some((label.into(), span));
        self
    }

    /// The span of the node the error is about.
    pub fn span(&self) -> Span {
        self.span
    }

    fn primary_label(&self) -> String {
        match &self.kind {
            TreeErrorKind::DuplicateAttachment => "attached again here".into(),
            TreeErrorKind::RootAttached => "this root is someone's child".into(),
            TreeErrorKind::SpanOutOfBounds { .. } => "span ends past the source".into(),
            TreeErrorKind::ChildOutsideParent => "child extends past its parent".into(),
            TreeErrorKind::OverlappingSiblings => "overlaps the previous sibling".into(),
            TreeErrorKind::UnattachedNode => "never attached".into(),
            TreeErrorKind::KindMismatch { found, .. } => format!("this is a {found}"),
        }
    }
}

impl Diagnostic for TreeError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let mut labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            to_source_span(self.span),
        )];
        if let Some((label, span)) = &self.related {
            labels.push(LabeledSpan::new_with_span(
                Some(label.clone()),
                to_source_span(*span),
            ));
        }
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_messages_are_stable() {
        let kind = TreeErrorKind::KindMismatch {
            expected: SyntaxKind::Compound,
            found: SyntaxKind::Sep,
        };
        assert_eq!(kind.to_string(), "expected a compound child, found a sep");
        assert_eq!(kind.code(), "cowry::tree::kind_mismatch");
    }

    #[test]
    fn errors_carry_labels_and_source() {
        let ctx = SourceContext::new("input", "echo hi");
        let err = TreeError::new(TreeErrorKind::OverlappingSiblings, &ctx, Span::new(5, 7))
            .with_related("previous sibling", Span::new(0, 6));

        let labels: Vec<_> = err.labels().expect("labels").collect();
        assert_eq!(labels.len(), 2);
        assert!(err.source_code().is_some());
        assert_eq!(err.span(), Span::new(5, 7));
    }
}
