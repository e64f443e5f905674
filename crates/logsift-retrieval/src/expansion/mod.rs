//! Query expansion: synonym substitution to broaden lexical recall.

pub mod synonym_expander;

pub use synonym_expander::{QueryExpander, SynonymEntry, SynonymTable};
