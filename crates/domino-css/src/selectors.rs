//! CSS Selectors Module
//!
//! Selector model and matching against a [`DomTree`]. Complex selectors are
//! matched right to left, backtracking over ancestors and siblings.

use std::str::FromStr;

use domino_dom::{DomTree, NodeData, NodeId};

use crate::SelectorError;
use crate::parser::SelectorParser;

/// Comma-separated list of complex selectors
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

/// Compound selectors joined by combinators
///
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Sequence of simple selectors that must all match one element
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector(pub Vec<SelectorComponent>);

/// Relationship between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// A component of a compound selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :first-child, :not(), etc.
    PseudoClass(PseudoClass),
}

/// Pseudo-classes that can be decided from the tree alone
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    // Input pseudo-classes (attribute driven)
    Checked,
    Disabled,
    Enabled,

    // Tree-structural pseudo-classes
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),

    // Logical
    Not(SelectorList),
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, PartialEq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// Create "odd" expression (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// Create "even" expression (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// Create a simple index (0n+b)
    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    /// Create An+B expression
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from string like "2n+1", "odd", "even", "3"
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s.trim().to_lowercase().split_whitespace().collect();

        match s.as_str() {
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        let n_pos = s.find('n')?;
        let a = match &s[..n_pos] {
            "" | "+" => 1,
            "-" => -1,
            a_str => a_str.parse().ok()?,
        };
        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else if rest.starts_with('+') || rest.starts_with('-') {
            rest.parse().ok()?
        } else {
            return None;
        };

        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    ///
    /// Evaluated in `i128` so extreme offsets cannot overflow.
    pub fn matches(&self, n: usize) -> bool {
        let n = n as i128;
        let (a, b) = (i128::from(self.a), i128::from(self.b));
        if a == 0 {
            return n == b;
        }

        let diff = n - b;
        if a > 0 {
            diff >= 0 && diff % a == 0
        } else {
            diff <= 0 && diff % a == 0
        }
    }
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Presence-only selector `[name]`
    pub fn presence(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matcher: None,
            case_insensitive: false,
        }
    }

    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (matcher, val) = match (&self.matcher, value) {
            (None, value) => return value.is_some(),
            (Some(_), None) => return false,
            (Some(matcher), Some(val)) => (matcher, val),
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let val = fold(val);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                !expected.is_empty() && val.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            // Empty needles never match for the substring operators
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && val.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && val.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && val.contains(&fold(expected))
            }
        }
    }
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::parse(input)
    }

    /// Complex selectors in source order
    pub fn selectors(&self) -> &[ComplexSelector] {
        &self.0
    }

    /// Whether any selector in the list matches `element`
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        tree.is_element(element) && self.0.iter().any(|s| s.matches(tree, element))
    }

    /// Elements under `scope` (exclusive) that match, in document order
    pub fn query_all(&self, tree: &DomTree, scope: NodeId) -> Vec<NodeId> {
        tree.descendants(scope)
            .filter(|(id, node)| node.is_element() && self.0.iter().any(|s| s.matches(tree, *id)))
            .map(|(id, _)| id)
            .collect()
    }

    /// First element under `scope` that matches
    pub fn query_first(&self, tree: &DomTree, scope: NodeId) -> Option<NodeId> {
        tree.descendants(scope)
            .find(|(id, node)| node.is_element() && self.0.iter().any(|s| s.matches(tree, *id)))
            .map(|(id, _)| id)
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl ComplexSelector {
    /// Match the rightmost compound against `element`, then walk left
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_at(tree, n - 1, element),
        }
    }

    fn matches_at(&self, tree: &DomTree, idx: usize, element: NodeId) -> bool {
        if !self.compounds[idx].matches(tree, element) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        match self.combinators[idx - 1] {
            Combinator::Child => parent_element(tree, element)
                .is_some_and(|p| self.matches_at(tree, idx - 1, p)),
            Combinator::Descendant => {
                let mut cur = parent_element(tree, element);
                while let Some(ancestor) = cur {
                    if self.matches_at(tree, idx - 1, ancestor) {
                        return true;
                    }
                    cur = parent_element(tree, ancestor);
                }
                false
            }
            Combinator::NextSibling => tree.previous_element_sibling(element)
                .is_some_and(|s| self.matches_at(tree, idx - 1, s)),
            Combinator::SubsequentSibling => {
                let mut cur = tree.previous_element_sibling(element);
                while let Some(sibling) = cur {
                    if self.matches_at(tree, idx - 1, sibling) {
                        return true;
                    }
                    cur = tree.previous_element_sibling(sibling);
                }
                false
            }
        }
    }
}

impl CompoundSelector {
    /// All components match `element`
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        self.0.iter().all(|c| match_component(c, tree, element))
    }
}

fn parent_element(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    tree.parent(id).filter(|p| tree.is_element(*p))
}

/// Match a selector component against an element
pub fn match_component(component: &SelectorComponent, tree: &DomTree, element: NodeId) -> bool {
    let Some(elem) = tree.get(element).and_then(|n| n.as_element()) else {
        return false;
    };

    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => tree.resolve(elem.name).eq_ignore_ascii_case(tag),
        SelectorComponent::Id(id) => elem.id.as_deref() == Some(id.as_str()),
        SelectorComponent::Class(class) => elem.has_class(class),
        SelectorComponent::Attribute(attr) => attr.matches(tree.attribute(element, &attr.name)),
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(pseudo, tree, element),
    }
}

const FORM_CONTROLS: &[&str] = &["button", "input", "select", "textarea", "option", "optgroup", "fieldset"];

/// Match a pseudo-class against an element
pub fn match_pseudo_class(pseudo: &PseudoClass, tree: &DomTree, element: NodeId) -> bool {
    let tag = tree.tag_name(element).unwrap_or_default();

    match pseudo {
        PseudoClass::Checked => {
            (tag == "input" && tree.attribute(element, "checked").is_some())
                || (tag == "option" && tree.attribute(element, "selected").is_some())
        }
        PseudoClass::Disabled => {
            FORM_CONTROLS.contains(&tag) && tree.attribute(element, "disabled").is_some()
        }
        PseudoClass::Enabled => {
            FORM_CONTROLS.contains(&tag) && tree.attribute(element, "disabled").is_none()
        }

        PseudoClass::Root => tree.parent(element) == Some(tree.root()),
        PseudoClass::Empty => tree.children(element).all(|(_, child)| match &child.data {
            NodeData::Element(_) => false,
            NodeData::Text(text) => text.is_empty(),
            _ => true,
        }),
        PseudoClass::FirstChild => sibling_position(tree, element).0 == 1,
        PseudoClass::LastChild => {
            let (index, count) = sibling_position(tree, element);
            index == count
        }
        PseudoClass::OnlyChild => sibling_position(tree, element).1 == 1,
        PseudoClass::FirstOfType => type_position(tree, element).0 == 1,
        PseudoClass::LastOfType => {
            let (index, count) = type_position(tree, element);
            index == count
        }
        PseudoClass::OnlyOfType => type_position(tree, element).1 == 1,
        PseudoClass::NthChild(expr) => expr.matches(sibling_position(tree, element).0),
        PseudoClass::NthLastChild(expr) => {
            let (index, count) = sibling_position(tree, element);
            expr.matches(count - index + 1)
        }
        PseudoClass::NthOfType(expr) => expr.matches(type_position(tree, element).0),
        PseudoClass::NthLastOfType(expr) => {
            let (index, count) = type_position(tree, element);
            expr.matches(count - index + 1)
        }

        PseudoClass::Not(list) => !list.0.iter().any(|s| s.matches(tree, element)),
    }
}

/// (1-based index, count) among element siblings
fn sibling_position(tree: &DomTree, element: NodeId) -> (usize, usize) {
    position_among(tree, element, |_| true)
}

/// (1-based index, count) among element siblings with the same tag
fn type_position(tree: &DomTree, element: NodeId) -> (usize, usize) {
    let tag = tree.tag_name(element);
    position_among(tree, element, |id| tree.tag_name(id) == tag)
}

fn position_among(tree: &DomTree, element: NodeId, same_kind: impl Fn(NodeId) -> bool) -> (usize, usize) {
    let Some(parent) = tree.parent(element) else {
        return (1, 1);
    };

    let (mut index, mut count) = (0, 0);
    for (id, node) in tree.children(parent) {
        if !node.is_element() || !same_kind(id) {
            continue;
        }
        count += 1;
        if id == element {
            index = count;
        }
    }
    (index, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nth_expression_odd() {
        let expr = NthExpression::odd();
        assert!(expr.matches(1));
        assert!(!expr.matches(2));
        assert!(expr.matches(3));
        assert!(!expr.matches(4));
    }

    #[test]
    fn test_nth_expression_even() {
        let expr = NthExpression::even();
        assert!(!expr.matches(1));
        assert!(expr.matches(2));
        assert!(expr.matches(4));
    }

    #[test]
    fn test_nth_expression_parse() {
        assert_eq!(NthExpression::parse("odd"), Some(NthExpression::odd()));
        assert_eq!(NthExpression::parse("even"), Some(NthExpression::even()));
        assert_eq!(NthExpression::parse("3"), Some(NthExpression::index(3)));
        assert_eq!(NthExpression::parse("2n"), Some(NthExpression::new(2, 0)));
        assert_eq!(NthExpression::parse("2n+1"), Some(NthExpression::new(2, 1)));
        assert_eq!(NthExpression::parse("2n + 1"), Some(NthExpression::new(2, 1)));
        assert_eq!(NthExpression::parse("-n+3"), Some(NthExpression::new(-1, 3)));
        assert_eq!(NthExpression::parse("n3"), None);
        assert_eq!(NthExpression::parse("banana"), None);
    }

    #[test]
    fn test_nth_expression_negative_coefficient() {
        let expr = NthExpression::new(-1, 3);
        assert!(expr.matches(1));
        assert!(expr.matches(3));
        assert!(!expr.matches(4));
    }

    #[test]
    fn test_nth_expression_extreme_offsets() {
        let expr = NthExpression::parse("n-2147483648").unwrap();
        assert_eq!(expr, NthExpression::new(1, i32::MIN));
        assert!(expr.matches(1));
        assert!(expr.matches(usize::MAX));

        let expr = NthExpression::new(i32::MIN, i32::MAX);
        assert!(!expr.matches(1));
        assert!(NthExpression::new(-1, i32::MAX).matches(3));
    }

    #[test]
    fn test_attribute_selector_exact() {
        let sel = AttributeSelector {
            name: "type".to_string(),
            matcher: Some(AttributeMatcher::Exact("text".to_string())),
            case_insensitive: false,
        };

        assert!(sel.matches(Some("text")));
        assert!(!sel.matches(Some("TEXT")));
        assert!(!sel.matches(None));
    }

    #[test]
    fn test_attribute_selector_case_insensitive() {
        let sel = AttributeSelector {
            name: "type".to_string(),
            matcher: Some(AttributeMatcher::Exact("text".to_string())),
            case_insensitive: true,
        };
        assert!(sel.matches(Some("TEXT")));
    }

    #[test]
    fn test_attribute_selector_presence() {
        let sel = AttributeSelector::presence("data-blocked");
        assert!(sel.matches(Some("")));
        assert!(!sel.matches(None));
    }

    #[test]
    fn test_attribute_selector_empty_substring_never_matches() {
        let sel = AttributeSelector {
            name: "class".to_string(),
            matcher: Some(AttributeMatcher::Substring(String::new())),
            case_insensitive: false,
        };
        assert!(!sel.matches(Some("anything")));
    }

    #[test]
    fn test_attribute_selector_dash_match() {
        let sel = AttributeSelector {
            name: "lang".to_string(),
            matcher: Some(AttributeMatcher::DashMatch("en".to_string())),
            case_insensitive: false,
        };
        assert!(sel.matches(Some("en")));
        assert!(sel.matches(Some("en-US")));
        assert!(!sel.matches(Some("english")));
    }
}
