//! Page - the document boundary
//!
//! Everything the query layer needs from a document provider. The provider
//! owns parsing and selector matching; this crate only asks questions.

use std::fmt;

use domino_css::{ElementQuery, SelectorError};
use domino_dom::{Document, NodeId};

/// Errors raised by a page
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// No element satisfied a required lookup
    #[error("Unable to find element matching {selector:?}")]
    ElementNotFound { selector: String },

    /// The provider could not parse a selector
    #[error("Invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// A queryable document
///
/// `scope: None` means the whole document; `Some(element)` restricts a
/// search to that element's descendants.
pub trait Page {
    /// Handle to one element of the document
    type Element: Copy + fmt::Debug;

    /// All elements matching `selector`, in document order
    fn query_all(&self, scope: Option<Self::Element>, selector: &str) -> Result<Vec<Self::Element>, PageError>;

    /// First element matching `selector`
    fn query_first(&self, scope: Option<Self::Element>, selector: &str) -> Result<Option<Self::Element>, PageError> {
        Ok(self.query_all(scope, selector)?.into_iter().next())
    }

    /// Text content of an element and its descendants
    fn text_content(&self, element: Self::Element) -> String;

    /// Attribute value, `None` when the attribute is missing
    fn attribute(&self, element: Self::Element, name: &str) -> Option<String>;

    /// Whether the element itself matches `selector`
    fn matches(&self, element: Self::Element, selector: &str) -> Result<bool, PageError>;

    /// Identifier of an element
    fn identifier(&self, element: Self::Element) -> Option<String> {
        self.attribute(element, "id")
    }

    /// The provider's "no such element" signal
    fn element_not_found(&self, selector: &str) -> PageError {
        PageError::ElementNotFound { selector: selector.to_string() }
    }
}

fn invalid_selector(selector: &str, err: SelectorError) -> PageError {
    PageError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    }
}

impl Page for Document {
    type Element = NodeId;

    fn query_all(&self, scope: Option<NodeId>, selector: &str) -> Result<Vec<NodeId>, PageError> {
        let root = scope.unwrap_or(self.tree().root());
        self.query_selector_all(root, selector)
            .map_err(|e| invalid_selector(selector, e))
    }

    fn query_first(&self, scope: Option<NodeId>, selector: &str) -> Result<Option<NodeId>, PageError> {
        let root = scope.unwrap_or(self.tree().root());
        self.query_selector(root, selector)
            .map_err(|e| invalid_selector(selector, e))
    }

    fn text_content(&self, element: NodeId) -> String {
        self.tree().text_content(element)
    }

    fn attribute(&self, element: NodeId, name: &str) -> Option<String> {
        self.tree().attribute(element, name).map(str::to_string)
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, PageError> {
        ElementQuery::matches(self, element, selector)
            .map_err(|e| invalid_selector(selector, e))
    }
}
