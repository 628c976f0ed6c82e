//! Extraction of command context around the cursor.
//!
//! Once a form is located, completers need the words already on the line:
//! the command name and every argument the user finished typing before the
//! cursor. Both helpers here degrade instead of failing; missing information
//! is itself information to a completer.

use tracing::debug;

use crate::eval::PureEval;
use crate::syntax::{Compound, Form, Indexing, Primary, SyntaxTree, TypedNode};

/// Locates the simple compound wrapping an already-held primary.
///
/// The primary's *immediate* parent must be an indexing and that indexing's
/// *immediate* parent must be a compound; ancestors further out do not
/// count. On success the compound and its value evaluated up to the
/// indexing's end offset are returned.
pub fn primary_in_simple_compound<E>(
    tree: &SyntaxTree,
    ev: &E,
    primary: Primary,
) -> Option<(Compound, String)>
where
    E: PureEval + ?Sized,
{
    let indexing = Indexing::cast(tree, tree.parent(primary.id())?)?;
    let compound = Compound::cast(tree, tree.parent(indexing.id())?)?;
    let value = ev.eval_partial_compound(tree, compound, Some(indexing.span(tree).end))?;
    Some((compound, value))
}

/// The words of `form` a completer should see, head first, seed last.
///
/// The head word is the form's head compound evaluated as far as purely
/// possible; an absent or unevaluable head contributes an empty string, a
/// meaningful "unknown command" signal rather than an error. Arguments are
/// taken in source order until one starts at or past `upto`; each is fully
/// evaluated and silently skipped when that fails (globs, substitutions).
/// The `seed` is always appended as the last element, so the result is
/// never empty.
///
/// When completing inside an argument, pass that argument's start offset as
/// `upto`: the half-typed compound is then excluded from the walk and stands
/// in the result as `seed` instead.
pub fn arg_words<E>(
    tree: &SyntaxTree,
    ev: &E,
    form: Form,
    seed: &str,
    upto: usize,
) -> Vec<String>
where
    E: PureEval + ?Sized,
{
    let head = form
        .head(tree)
        .and_then(|head| ev.eval_partial_compound(tree, head, None))
        .unwrap_or_default();
    let mut words = vec![head];
    for arg in form.args(tree) {
        if arg.span(tree).start >= upto {
            break;
        }
        if let Some(word) = ev.eval_compound(tree, arg) {
            words.push(word);
        }
    }
    words.push(seed.to_string());
    debug!(upto, words = words.len(), "extracted argument context");
    words
}
