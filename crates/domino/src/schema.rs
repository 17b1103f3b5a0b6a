//! Mapped type declarations
//!
//! A [`MappedType`] is built once and then queried against any number of
//! pages. Declaration never touches a document.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{resolve, Collection, Config, EffectiveSelector, Error, Page, Result, SelectorRule, Transform, Value};

/// One declared attribute
#[derive(Clone)]
pub struct AttributeSpec {
    name: String,
    rule: SelectorRule,
    transform: Option<Transform>,
}

impl AttributeSpec {
    /// Attribute read from the default `[data-<name>]` descendant
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: SelectorRule::Default,
            transform: None,
        }
    }

    /// Set the selector; a leading `&` targets the record's own node
    pub fn selector(mut self, rule: impl Into<SelectorRule>) -> Self {
        self.rule = rule.into();
        self
    }

    /// Set the transform applied to every raw value
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(f));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &SelectorRule {
        &self.rule
    }

    pub fn transformer(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    /// Lookup performed against a record's node
    pub fn effective_selector(&self) -> EffectiveSelector {
        resolve(&self.rule, &self.name)
    }
}

impl fmt::Debug for AttributeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSpec")
            .field("name", &self.name)
            .field("rule", &self.rule)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl From<&str> for AttributeSpec {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for AttributeSpec {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Declared record type: root selector plus ordered attributes
#[derive(Debug, Clone)]
pub struct MappedType {
    name: String,
    selector: Option<String>,
    attributes: Vec<AttributeSpec>,
    index: HashMap<String, usize>,
}

impl MappedType {
    /// Start declaring a type
    pub fn builder(name: impl Into<String>) -> MappedTypeBuilder {
        MappedTypeBuilder {
            name: name.into(),
            selector: None,
            attributes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root selector, or the configuration error when none was declared
    pub fn root_selector(&self) -> Result<&str> {
        self.selector.as_deref().ok_or_else(|| Error::NoSelector {
            type_name: self.name.clone(),
        })
    }

    /// Attributes in declaration order
    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.position(name).map(|i| &self.attributes[i])
    }

    /// Declaration index of an attribute
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Query this type against a page with the default configuration
    pub fn on<'a, P: Page>(&'a self, page: &'a P) -> Collection<'a, P> {
        Collection::new(self, page, Config::default())
    }

    /// Query this type against a page with explicit configuration
    pub fn on_with<'a, P: Page>(&'a self, page: &'a P, config: Config) -> Collection<'a, P> {
        Collection::new(self, page, config)
    }
}

/// Builder for [`MappedType`]
#[derive(Debug)]
pub struct MappedTypeBuilder {
    name: String,
    selector: Option<String>,
    attributes: Vec<AttributeSpec>,
}

impl MappedTypeBuilder {
    /// Root selector identifying record elements
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Declare an attribute. Redeclaring a name replaces the earlier
    /// declaration and keeps its position.
    pub fn attribute(mut self, spec: impl Into<AttributeSpec>) -> Self {
        let spec = spec.into();
        match self.attributes.iter_mut().find(|a| a.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.attributes.push(spec),
        }
        self
    }

    pub fn build(self) -> MappedType {
        let index = self
            .attributes
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name.clone(), i))
            .collect();
        tracing::debug!("Declared {} with {} attributes", self.name, self.attributes.len());
        MappedType {
            name: self.name,
            selector: self.selector,
            attributes: self.attributes,
            index,
        }
    }
}

/// Named collection of declared types
#[derive(Debug, Default)]
pub struct Registry {
    types: Vec<MappedType>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any earlier type with the same name
    pub fn define(&mut self, ty: MappedType) -> &MappedType {
        let slot = match self.by_name.get(ty.name()) {
            Some(&i) => {
                self.types[i] = ty;
                i
            }
            None => {
                self.by_name.insert(ty.name.clone(), self.types.len());
                self.types.push(ty);
                self.types.len() - 1
            }
        };
        &self.types[slot]
    }

    pub fn get(&self, name: &str) -> Option<&MappedType> {
        self.by_name.get(name).map(|&i| &self.types[i])
    }

    /// Type names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
