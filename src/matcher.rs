//! Shape matching over node paths.
//!
//! Matchers consume a prefix of a leaf-first node path and hand back the
//! remainder; sequences of them spell out grammar shapes such as "a primary,
//! inside an indexing, inside a compound". Failure is an ordinary `None`:
//! callers try the next pattern.

use std::cell::Cell;

use crate::eval::PureEval;
use crate::path::NodePath;
use crate::syntax::{Compound, Indexing, NodeId, Primary, SyntaxKind, SyntaxTree, TypedNode};

// ============================================================================
// MATCHER ALGEBRA
// ============================================================================

/// One step of a shape pattern.
///
/// `try_match` either consumes a prefix of `path` and returns the remaining
/// suffix, or fails with `None`. Implementations must not mutate anything
/// observable on failure; capture slots are written only when the owning
/// matcher itself succeeds.
pub trait Matcher {
    fn try_match<'p>(&self, tree: &SyntaxTree, path: &'p [NodeId]) -> Option<&'p [NodeId]>;
}

/// Matches one node of a fixed grammatical kind. See [`typed`].
#[derive(Debug, Clone, Copy)]
pub struct KindMatcher {
    kind: SyntaxKind,
}

/// A matcher for "the next node is a `kind`", consuming exactly one element.
///
/// An empty path never matches.
pub fn typed(kind: SyntaxKind) -> KindMatcher {
    KindMatcher { kind }
}

impl Matcher for KindMatcher {
    fn try_match<'p>(&self, tree: &SyntaxTree, path: &'p [NodeId]) -> Option<&'p [NodeId]> {
        let (&head, rest) = path.split_first()?;
        (tree.kind(head) == self.kind).then_some(rest)
    }
}

/// Matches like [`typed`] and stores the node into a caller slot. See
/// [`capture`].
#[derive(Debug)]
pub struct CaptureMatcher<'c, T: TypedNode> {
    slot: &'c Cell<Option<T>>,
}

/// A matcher that binds the matched node into `slot`.
///
/// The expected kind comes from the slot's view type, so the capture and the
/// check can never disagree. The slot is written only when this matcher
/// succeeds; a later matcher in the same sequence may still fail, in which
/// case the caller must discard the slot along with the match.
pub fn capture<'c, T: TypedNode>(slot: &'c Cell<Option<T>>) -> CaptureMatcher<'c, T> {
    CaptureMatcher { slot }
}

impl<'c, T: TypedNode> Matcher for CaptureMatcher<'c, T> {
    fn try_match<'p>(&self, tree: &SyntaxTree, path: &'p [NodeId]) -> Option<&'p [NodeId]> {
        let (&head, rest) = path.split_first()?;
        let node = T::cast(tree, head)?;
        self.slot.set(Some(node));
        Some(rest)
    }
}

/// Applies `matchers` left to right over the shrinking path, returning what
/// remains after all of them succeed.
pub fn match_sequence<'p>(
    tree: &SyntaxTree,
    mut path: &'p [NodeId],
    matchers: &[&dyn Matcher],
) -> Option<&'p [NodeId]> {
    for matcher in matchers {
        path = matcher.try_match(tree, path)?;
    }
    Some(path)
}

impl NodePath {
    /// Whether this path's leaf end matches the given shape.
    ///
    /// Equivalent to [`match_sequence`] with the remainder discarded.
    pub fn matches(&self, tree: &SyntaxTree, matchers: &[&dyn Matcher]) -> bool {
        match_sequence(tree, self.as_slice(), matchers).is_some()
    }
}

// ============================================================================
// SIMPLE PRIMARY EXPRESSIONS
// ============================================================================

/// A matched literal-like token under the cursor.
///
/// Produced by [`simple_primary_expr`]: the primary the cursor is in, the
/// compound word wrapping it, and the word's value evaluated up to the end
/// of the matched indexing, which is the text a completer should treat as
/// "what the user has typed of this word so far".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePrimaryExpr {
    pub primary: Primary,
    pub compound: Compound,
    pub value: String,
}

/// Matches the three-node shape primary → indexing → compound at the leaf
/// end of `path` and partially evaluates the word up to the indexing's end.
///
/// Fails on paths shorter than three nodes, on any kind mismatch in the
/// first three, and when the evaluator cannot purely resolve the word. On
/// success the remainder after the three consumed nodes is returned next to
/// the bindings, ready for further matching (the node after the compound is
/// typically the enclosing form).
pub fn simple_primary_expr<'p, E>(
    tree: &SyntaxTree,
    ev: &E,
    path: &'p [NodeId],
) -> Option<(SimplePrimaryExpr, &'p [NodeId])>
where
    E: PureEval + ?Sized,
{
    let [first, second, third, rest @ ..] = path else {
        return None;
    };
    let primary = Primary::cast(tree, *first)?;
    let indexing = Indexing::cast(tree, *second)?;
    let compound = Compound::cast(tree, *third)?;
    let value = ev.eval_partial_compound(tree, compound, Some(indexing.span(tree).end))?;
    Some((
        SimplePrimaryExpr {
            primary,
            compound,
            value,
        },
        rest,
    ))
}
