//! Selector Resolver
//!
//! Turns an attribute declaration into the concrete lookup performed
//! against a record's node.

use domino_dom::dataset::data_attribute_name;

/// How an attribute locates its value, fixed at declaration time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectorRule {
    /// Descendant search with the given selector
    Explicit(String),
    /// Condition on the record's own node (source syntax `&.active`)
    SelfCombinator(String),
    /// Descendant `[data-<name>]` derived from the attribute name
    #[default]
    Default,
}

impl SelectorRule {
    /// Prefix marking a self-combinator
    pub const SELF_MARKER: char = '&';

    /// Classify selector source text
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        match source.strip_prefix(Self::SELF_MARKER) {
            Some(suffix) => SelectorRule::SelfCombinator(suffix.trim().to_string()),
            None => SelectorRule::Explicit(source.to_string()),
        }
    }
}

impl From<&str> for SelectorRule {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<String> for SelectorRule {
    fn from(source: String) -> Self {
        Self::parse(&source)
    }
}

/// Lookup to perform against a record's node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectiveSelector {
    /// First matching descendant; raw value is its text
    Descendant(String),
    /// Own attribute value (`&[name]`)
    OwnAttribute(String),
    /// Whether the node itself matches (`&.class`, `&[name=value]`)
    OwnMatch(String),
}

/// Resolve a rule for the named attribute
pub fn resolve(rule: &SelectorRule, attribute_name: &str) -> EffectiveSelector {
    match rule {
        SelectorRule::Explicit(selector) => EffectiveSelector::Descendant(selector.clone()),
        SelectorRule::SelfCombinator(suffix) => match bare_attribute(suffix) {
            Some(name) => EffectiveSelector::OwnAttribute(name),
            None => EffectiveSelector::OwnMatch(suffix.clone()),
        },
        SelectorRule::Default => {
            EffectiveSelector::Descendant(format!("[{}]", data_attribute_name(attribute_name)))
        }
    }
}

/// Name inside a lone presence clause such as `[data-rank]`
fn bare_attribute(suffix: &str) -> Option<String> {
    let inner = suffix.strip_prefix('[')?.strip_suffix(']')?.trim();
    let is_name = !inner.is_empty()
        && inner.chars().all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'));
    is_name.then(|| inner.to_ascii_lowercase())
}
