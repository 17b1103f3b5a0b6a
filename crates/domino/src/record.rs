//! Records - one matched element viewed through its mapped type

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::extract::value_of;
use crate::{Config, MappedType, Page, PageError, Result, Value};

/// A matched element plus its type's attribute declarations
///
/// Attribute values are computed on first access and memoized for the life
/// of the record. Fetch a fresh record to observe later document changes.
pub struct Record<'a, P: Page> {
    page: &'a P,
    node: P::Element,
    ty: &'a MappedType,
    config: Config,
    cache: RefCell<HashMap<usize, Value>>,
}

impl<'a, P: Page> Record<'a, P> {
    pub(crate) fn new(page: &'a P, node: P::Element, ty: &'a MappedType, config: Config) -> Self {
        Self {
            page,
            node,
            ty,
            config,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Typed value of a declared attribute
    ///
    /// Names the type never declared read as `Absent`.
    pub fn get(&self, name: &str) -> Result<Value> {
        match self.ty.position(name) {
            Some(index) => self.value_at(index),
            None => Ok(Value::Absent),
        }
    }

    fn value_at(&self, index: usize) -> Result<Value> {
        if let Some(value) = self.cache.borrow().get(&index) {
            return Ok(value.clone());
        }
        let spec = &self.ty.attributes()[index];
        let value = value_of(self.page, self.node, spec, &self.config)?;
        self.cache.borrow_mut().insert(index, value.clone());
        Ok(value)
    }

    /// Every declared attribute, in declaration order
    pub fn attributes(&self) -> Result<Attributes> {
        let values = self
            .ty
            .attributes()
            .iter()
            .enumerate()
            .map(|(i, spec)| Ok((spec.name().to_string(), self.value_at(i)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Attributes(values))
    }

    /// `#<id>` when the node has a non-empty identifier
    pub fn id(&self) -> Option<String> {
        self.page
            .identifier(self.node)
            .filter(|id| !id.is_empty())
            .map(|id| format!("#{}", id))
    }

    /// Direct access to the underlying element
    pub fn node(&self) -> NodeRef<'a, P> {
        NodeRef { page: self.page, element: self.node }
    }

    pub fn mapped_type(&self) -> &'a MappedType {
        self.ty
    }
}

impl<P: Page> fmt::Debug for Record<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type", &self.ty.name())
            .field("node", &self.node)
            .finish()
    }
}

/// Handle on a record's element
pub struct NodeRef<'a, P: Page> {
    page: &'a P,
    element: P::Element,
}

impl<P: Page> Clone for NodeRef<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Page> Copy for NodeRef<'_, P> {}

impl<'a, P: Page> NodeRef<'a, P> {
    pub fn element(&self) -> P::Element {
        self.element
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.page.attribute(self.element, name)
    }

    pub fn text(&self) -> String {
        self.page.text_content(self.element)
    }

    pub fn matches(&self, selector: &str) -> std::result::Result<bool, PageError> {
        self.page.matches(self.element, selector)
    }
}

impl<P: Page> fmt::Debug for NodeRef<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.element).finish()
    }
}

/// Ordered attribute name → value pairs of one record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes(Vec<(String, Value)>);

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Attributes {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Serialized as a map in declaration order
impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
