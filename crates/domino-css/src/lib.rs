//! Domino CSS Selectors
//!
//! Selector parsing and matching for Domino documents, plus the
//! `querySelector` family on top of them.

mod parser;
mod query;
pub mod selectors;

pub use query::ElementQuery;
pub use selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorComponent, SelectorList,
};

/// Selector parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected {found:?} at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("Unexpected end of selector")]
    UnexpectedEnd,

    #[error("Unsupported pseudo-class :{0}")]
    UnsupportedPseudo(String),

    #[error("Pseudo-elements cannot be queried: ::{0}")]
    PseudoElement(String),

    #[error("Invalid :nth-* expression {0:?}")]
    InvalidNth(String),
}
