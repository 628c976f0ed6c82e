//! Syntax tree model for the cowry command language.
//!
//! This module provides the arena-backed tree the completion engine reads:
//! grammatical kind tags, byte spans, typed node views, and the bottom-up
//! builder that tree producers (the parser, test fixtures) drive.

mod builder;
mod kind;
mod node;
mod tree;

pub use builder::TreeBuilder;
pub use kind::{PrimaryKind, RedirMode, SyntaxKind};
pub use node::{
    Array, Chunk, Compound, Form, Indexing, Pipeline, Primary, Redir, Sep, TypedNode,
};
pub use tree::{NodeId, SyntaxTree};

use serde::{Deserialize, Serialize};

// ============================================================================
// SOURCE SPANS
// ============================================================================

/// A byte range `[start, end)` in the source line.
///
/// All nodes carry a span; spans drive cursor containment checks and
/// diagnostic labels.
///
/// # Examples
///
/// ```rust
/// use cowry_complete::syntax::Span;
/// let span = Span::new(5, 8);
/// assert_eq!(span.len(), 3);
/// assert!(span.contains(5));
/// assert!(!span.contains(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open containment: `start <= offset < end`.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Closed containment used by cursor resolution: `start <= offset <= end`.
    ///
    /// A cursor sitting immediately after the last byte of a token is still
    /// "inside" it for completion purposes, so both boundaries count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowry_complete::syntax::Span;
    /// let span = Span::new(5, 8);
    /// assert!(span.contains_inclusive(8));
    /// assert!(!span.contains(8));
    /// ```
    pub fn contains_inclusive(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// The smallest span covering both `self` and `other`.
    pub fn merge(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
