//! Attribute constraints for `find_by` / `filter_by`

use regex::Regex;

use crate::Value;

/// Expected value of one attribute
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Typed value must equal this one
    Equals(Value),
    /// String form of the typed value must contain a match
    Pattern(Regex),
}

impl Matcher {
    /// Check a typed value against this matcher
    ///
    /// `Absent` only equals `Absent` and never satisfies a pattern.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Matcher::Pattern(re) => !value.is_absent() && re.is_match(&value.to_string()),
            Matcher::Equals(expected) => match (value, expected) {
                (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
                _ => value == expected,
            },
        }
    }
}

impl From<Regex> for Matcher {
    fn from(re: Regex) -> Self {
        Matcher::Pattern(re)
    }
}

impl From<&Regex> for Matcher {
    fn from(re: &Regex) -> Self {
        Matcher::Pattern(re.clone())
    }
}

impl From<Value> for Matcher {
    fn from(v: Value) -> Self {
        Matcher::Equals(v)
    }
}

macro_rules! equals_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Matcher {
                fn from(v: $ty) -> Self {
                    Matcher::Equals(v.into())
                }
            }
        )*
    };
}

equals_from!(&str, String, bool, i32, i64, f64);

/// Conjunction of attribute constraints
///
/// Every pair must hold for a record to match. Names not declared on the
/// mapped type never match.
#[derive(Debug, Clone, Default)]
pub struct Conditions(Vec<(String, Matcher)>);

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint
    pub fn and(mut self, name: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.0.push((name.into(), matcher.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Matcher)> {
        self.0.iter().map(|(name, m)| (name.as_str(), m))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, M: Into<Matcher>> From<(K, M)> for Conditions {
    fn from((name, matcher): (K, M)) -> Self {
        Conditions::new().and(name, matcher)
    }
}

impl<K: Into<String>, M: Into<Matcher>, const N: usize> From<[(K, M); N]> for Conditions {
    fn from(pairs: [(K, M); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, M: Into<Matcher>> From<Vec<(K, M)>> for Conditions {
    fn from(pairs: Vec<(K, M)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, M: Into<Matcher>> FromIterator<(K, M)> for Conditions {
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, m)| (k.into(), m.into())).collect())
    }
}
