//! Grammatical kind tags for cowry syntax nodes.
//!
//! Matching over node paths compares these closed enums; no behavior is ever
//! dispatched on them beyond shape comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The grammatical production a node belongs to.
///
/// Every node in a [`SyntaxTree`](crate::syntax::SyntaxTree) carries exactly
/// one kind. The set is closed so that shape matches can be checked
/// exhaustively.
///
/// # Examples
///
/// ```rust
/// use cowry_complete::syntax::SyntaxKind;
/// assert_eq!(SyntaxKind::Form.to_string(), "form");
/// assert_ne!(SyntaxKind::Compound, SyntaxKind::Indexing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    /// A whole input: pipelines separated by newlines or `;`.
    Chunk,
    /// Forms connected by `|`.
    Pipeline,
    /// One command invocation: head, arguments, redirections.
    Form,
    /// A bracketed list of compounds.
    Array,
    /// One word-like expression, possibly several concatenated parts.
    Compound,
    /// A primary expression plus optional index operations.
    Indexing,
    /// The innermost literal or expression unit.
    Primary,
    /// A redirection such as `>out` or `2>&1`.
    Redir,
    /// Inter-token separator: spaces, newlines, `;`, `|`.
    Sep,
}

impl SyntaxKind {
    /// Lowercase name used in diagnostics and logs.
    pub fn name(self) -> &'static str {
        match self {
            SyntaxKind::Chunk => "chunk",
            SyntaxKind::Pipeline => "pipeline",
            SyntaxKind::Form => "form",
            SyntaxKind::Array => "array",
            SyntaxKind::Compound => "compound",
            SyntaxKind::Indexing => "indexing",
            SyntaxKind::Primary => "primary",
            SyntaxKind::Redir => "redir",
            SyntaxKind::Sep => "sep",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The lexical shape of a [`Primary`](crate::syntax::Primary) node.
///
/// The literal evaluator treats the first four variants as purely resolvable;
/// everything else requires effects or expansion machinery the completion
/// core must not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryKind {
    /// An unquoted word such as `echo` or `/usr/lo`.
    Bareword,
    /// A `'...'` literal; the node value holds the unescaped content.
    SingleQuoted,
    /// A `"..."` literal; the node value holds the unescaped content.
    DoubleQuoted,
    /// A `$name` reference; the node value holds the bare name.
    Variable,
    /// A leading `~` or `~user`.
    Tilde,
    /// A glob pattern such as `*` or `?`.
    Wildcard,
    /// Command substitution `(...)`, never purely evaluable.
    OutputCapture,
    /// A `{a,b}`-style brace group.
    Braced,
}

/// Direction and mode of a redirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedirMode {
    Read,
    Write,
    ReadWrite,
    Append,
}

impl RedirMode {
    /// The operator text for this mode.
    pub fn operator(self) -> &'static str {
        match self {
            RedirMode::Read => "<",
            RedirMode::Write => ">",
            RedirMode::ReadWrite => "<>",
            RedirMode::Append => ">>",
        }
    }
}
