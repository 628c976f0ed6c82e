//! Shared fixtures for the integration suites.
//!
//! Every fixture goes through the public [`TreeBuilder`] and builds the
//! shape the parser produces for a single command line: one chunk, one
//! pipeline, one form, each word a primary wrapped in an indexing wrapped
//! in a compound, with sep nodes covering the spaces in between.

use cowry_complete::syntax::{
    Compound, Form, Primary, PrimaryKind, Span, SyntaxTree, TreeBuilder, TypedNode,
};

/// A sealed single-command tree plus typed handles into it.
pub struct CommandFixture {
    pub tree: SyntaxTree,
    pub form: Form,
    pub words: Vec<WordFixture>,
}

/// Typed handles for one word of the fixture command.
#[derive(Clone, Copy)]
pub struct WordFixture {
    pub compound: Compound,
    pub primary: Primary,
    pub span: Span,
}

/// Builds a command from words given as `(kind, source text, value)`.
///
/// Words are laid out left to right with a single space between them; the
/// first word becomes the form's head, the rest its arguments.
pub fn command(words: &[(PrimaryKind, &str, &str)]) -> CommandFixture {
    assert!(!words.is_empty(), "a command fixture needs at least a head");
    let source = words
        .iter()
        .map(|&(_, text, _)| text)
        .collect::<Vec<_>>()
        .join(" ");

    let mut b = TreeBuilder::new(source.as_str());
    let mut word_ids = Vec::new();
    let mut seps = Vec::new();
    let mut start = 0;
    for (i, &(kind, text, value)) in words.iter().enumerate() {
        if i > 0 {
            seps.push(b.sep(Span::new(start - 1, start)));
        }
        let span = Span::new(start, start + text.len());
        let primary = b.primary(kind, span, value);
        let part = b.indexing(span, primary, vec![]);
        let compound = b.compound(span, vec![part]);
        word_ids.push((compound, primary, span));
        start = span.end + 1;
    }

    let full = Span::new(0, source.len());
    let head = word_ids[0].0;
    let args = word_ids[1..].iter().map(|&(compound, _, _)| compound).collect();
    let form = b.form(full, Some(head), args, vec![], seps);
    let pipeline = b.pipeline(full, vec![form], vec![]);
    let root = b.chunk(full, vec![pipeline], vec![]);
    let tree = b.finish(root).expect("fixture tree is valid");

    let form = Form::cast(&tree, form).expect("form view");
    let words = word_ids
        .into_iter()
        .map(|(compound, primary, span)| WordFixture {
            compound: Compound::cast(&tree, compound).expect("compound view"),
            primary: Primary::cast(&tree, primary).expect("primary view"),
            span,
        })
        .collect();
    CommandFixture { tree, form, words }
}

/// Builds a command whose words are all barewords spelled as written.
pub fn bareword_command(words: &[&str]) -> CommandFixture {
    let entries: Vec<(PrimaryKind, &str, &str)> = words
        .iter()
        .map(|&text| (PrimaryKind::Bareword, text, text))
        .collect();
    command(&entries)
}
