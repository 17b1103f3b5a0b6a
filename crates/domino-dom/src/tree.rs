//! DOM Tree (arena-based allocation)

use crate::{InternedString, Node, NodeData, NodeId, StringInterner};

/// Arena-based DOM tree
///
/// Node 0 is always the document node. Detached nodes stay in the arena;
/// they are simply unreachable from the root.
#[derive(Debug)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
    interner: StringInterner,
    id_name: InternedString,
    class_name: InternedString,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        let mut interner = StringInterner::new();
        let id_name = interner.intern("id");
        let class_name = interner.intern("class");
        Self {
            nodes: vec![Node::document()],
            interner,
            id_name,
            class_name,
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, name: InternedString) -> &str {
        self.interner.get(name)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(&tag.to_ascii_lowercase());
        self.push(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(Node::doctype(name.to_string()))
    }

    /// Append `child` as the last child of `parent`
    ///
    /// A child that is already attached somewhere is moved. Appending a node
    /// under itself or one of its own descendants is refused.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            tracing::trace!("Refused to append {:?} under its descendant {:?}", child, parent);
            return;
        }
        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Remove `child` from `parent`; returns false if it was not a child
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.detach(child);
        tracing::trace!("Removed node {:?} from {:?}", child, parent);
        true
    }

    /// Unlink a node from its parent and siblings
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Direct children in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// All descendants in document (pre-)order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Descendants { tree: self, scope: id, next }
    }

    /// Check whether `id` is an element
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Previous sibling that is an element
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.get(id)?.prev_sibling;
        while cur.is_valid() {
            if self.is_element(cur) {
                return Some(cur);
            }
            cur = self.nodes[cur.index()].prev_sibling;
        }
        None
    }

    /// Next sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.get(id)?.next_sibling;
        while cur.is_valid() {
            if self.is_element(cur) {
                return Some(cur);
            }
            cur = self.nodes[cur.index()].next_sibling;
        }
        None
    }

    /// Lowercase tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| self.resolve(e.name))
    }

    /// Attribute value of an element
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.lookup(name)?;
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Iterate `(name, value)` pairs of an element's attributes
    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.get(id)
            .and_then(Node::as_element)
            .into_iter()
            .flat_map(|e| e.attrs.iter())
            .map(|a| (self.resolve(a.name), a.value.as_str()))
    }

    /// Set an attribute on an element; no-op for other node kinds
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let interned = self.interner.intern(name);
        let (is_id, is_class) = (interned == self.id_name, interned == self.class_name);
        if let Some(elem) = self.get_mut(id).and_then(Node::as_element_mut) {
            elem.set_attr(interned, value.to_string(), is_id, is_class);
        }
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let interned = self.interner.lookup(name)?;
        let (is_id, is_class) = (interned == self.id_name, interned == self.class_name);
        self.get_mut(id)?
            .as_element_mut()?
            .remove_attr(interned, is_id, is_class)
    }

    /// Check the class list of an element
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get(id)
            .and_then(Node::as_element)
            .is_some_and(|e| e.has_class(class))
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        let mut out = String::new();
        for (_, node) in self.descendants(id) {
            if let NodeData::Text(text) = &node.data {
                out.push_str(text);
            }
        }
        out
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over the subtree below a node
pub struct Descendants<'a> {
    tree: &'a DomTree,
    scope: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;

        // Advance: first child, else next sibling, else climb until a
        // sibling exists or the scope is reached.
        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut cur = id;
            loop {
                if cur == self.scope {
                    break NodeId::NONE;
                }
                let n = &self.tree.nodes[cur.index()];
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                if !n.parent.is_valid() || n.parent == self.scope {
                    break NodeId::NONE;
                }
                cur = n.parent;
            }
        };

        Some((id, node))
    }
}
