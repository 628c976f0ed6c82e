pub use crate::diagnostics::{to_source_span, SourceContext, TreeError, TreeErrorKind};

pub mod context;
pub mod diagnostics;
pub mod eval;
pub mod matcher;
pub mod path;
pub mod syntax;
