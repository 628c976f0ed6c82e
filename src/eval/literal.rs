//! The literal evaluator: resolves quoting and variable lookups, nothing else.

use im::HashMap;

use crate::eval::PureEval;
use crate::syntax::{Compound, PrimaryKind, SyntaxTree, TypedNode};

/// A [`PureEval`] implementation over static knowledge only.
///
/// Barewords and quoted strings contribute their text value; variables
/// resolve through an immutable scope snapshot taken when the evaluator was
/// built. Tildes, globs, command substitution, and brace groups are never
/// purely evaluable here. The scope is a persistent map, so snapshotting the
/// shell's variables for every keystroke is a cheap clone.
#[derive(Debug, Clone, Default)]
pub struct LiteralEval {
    scope: HashMap<String, String>,
}

impl LiteralEval {
    /// An evaluator with an empty scope; every variable is unresolvable.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(scope: HashMap<String, String>) -> Self {
        Self { scope }
    }

    /// Bind a variable for subsequent lookups.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.scope.insert(name.into(), value.into());
    }
}

impl PureEval for LiteralEval {
    fn eval_partial_compound(
        &self,
        tree: &SyntaxTree,
        compound: Compound,
        upto: Option<usize>,
    ) -> Option<String> {
        let mut value = String::new();
        for part in compound.indexings(tree) {
            // Index operations disqualify the whole word, even past the bound.
            if part.has_indices(tree) {
                return None;
            }
            if let Some(upto) = upto {
                if part.span(tree).end > upto {
                    break;
                }
            }
            let head = part.head(tree)?;
            match head.kind(tree) {
                PrimaryKind::Bareword | PrimaryKind::SingleQuoted | PrimaryKind::DoubleQuoted => {
                    value.push_str(head.value(tree));
                }
                PrimaryKind::Variable => {
                    value.push_str(self.scope.get(head.value(tree))?);
                }
                _ => return None,
            }
        }
        Some(value)
    }
}
