//! Element Query Methods
//!
//! querySelector, querySelectorAll, matches, closest and the by-name
//! lookups. Every call parses its selector afresh and walks the live tree.

use domino_dom::{Document, DomTree, NodeId};

use crate::{SelectorError, SelectorList};

/// Element query trait
pub trait ElementQuery {
    /// First element under `root` matching the selector
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// All elements under `root` matching the selector, in document order
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError>;

    /// Find closest inclusive ancestor matching selector
    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// Get elements by class name
    fn get_elements_by_class_name(&self, root: NodeId, class: &str) -> Vec<NodeId>;

    /// Get elements by tag name
    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId>;
}

impl ElementQuery for DomTree {
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        Ok(SelectorList::parse(selector)?.query_first(self, root))
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let found = SelectorList::parse(selector)?.query_all(self, root);
        tracing::trace!("{:?} matched {} elements", selector, found.len());
        Ok(found)
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
        Ok(SelectorList::parse(selector)?.matches(self, element))
    }

    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        let mut cur = Some(element);
        while let Some(id) = cur {
            if list.matches(self, id) {
                return Ok(Some(id));
            }
            cur = self.parent(id);
        }
        Ok(None)
    }

    fn get_elements_by_class_name(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|(_, node)| node.as_element().is_some_and(|e| e.has_class(class)))
            .map(|(id, _)| id)
            .collect()
    }

    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|(id, _)| self.tag_name(*id).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
            .map(|(id, _)| id)
            .collect()
    }
}

impl ElementQuery for Document {
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        self.tree().query_selector(root, selector)
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        self.tree().query_selector_all(root, selector)
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
        self.tree().matches(element, selector)
    }

    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        self.tree().closest(element, selector)
    }

    fn get_elements_by_class_name(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.tree().get_elements_by_class_name(root, class)
    }

    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.tree().get_elements_by_tag_name(root, tag)
    }
}
