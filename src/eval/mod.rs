//! Pure evaluation of word expressions.
//!
//! Completion needs the string value of words the user already typed, but it
//! must never execute anything observable. [`PureEval`] is that seam: the
//! embedding shell passes its own evaluator, and [`LiteralEval`] is the
//! self-contained implementation used by tests and simple embedders.

mod literal;

pub use literal::LiteralEval;

use crate::syntax::{Compound, SyntaxTree};

/// Side-effect-free evaluation of compound words.
///
/// A `None` result means the word requires effects (command substitution,
/// filesystem expansion) or cannot be bounded at the requested offset. It is
/// never a user-facing error; callers omit the word and move on.
pub trait PureEval {
    /// Evaluate `compound` restricted to the parts that end at or before
    /// `upto`. With no bound the whole word is evaluated.
    ///
    /// Parts ending past the bound stop the walk; parts carrying index
    /// operations make the whole word unevaluable regardless of the bound.
    fn eval_partial_compound(
        &self,
        tree: &SyntaxTree,
        compound: Compound,
        upto: Option<usize>,
    ) -> Option<String>;

    /// Evaluate the whole word.
    fn eval_compound(&self, tree: &SyntaxTree, compound: Compound) -> Option<String> {
        self.eval_partial_compound(tree, compound, None)
    }
}
