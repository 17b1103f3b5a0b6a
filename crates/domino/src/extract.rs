//! Attribute extraction
//!
//! Reads a raw value from a record's node and runs the declared transform.

use std::sync::Arc;

use crate::{AttributeSpec, Config, EffectiveSelector, Page, PageError, Value};

/// Value conversion applied after the raw read
///
/// Always invoked, including when the raw value is `Absent`.
pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Raw value of `selector` against `node`
///
/// - `Descendant`: text of the first matching descendant, else `Absent`
/// - `OwnAttribute`: the node's attribute string, else `Absent`
/// - `OwnMatch`: whether the node matches
pub fn extract<P: Page>(
    page: &P,
    node: P::Element,
    selector: &EffectiveSelector,
    config: &Config,
) -> Result<Value, PageError> {
    let raw = match selector {
        EffectiveSelector::Descendant(sel) => match page.query_first(Some(node), sel)? {
            Some(found) => Value::Text(config.text.apply(page.text_content(found))),
            None => Value::Absent,
        },
        EffectiveSelector::OwnAttribute(name) => page.attribute(node, name).into(),
        EffectiveSelector::OwnMatch(sel) => Value::Bool(page.matches(node, sel)?),
    };
    Ok(raw)
}

/// Run the transform, if any
pub(crate) fn apply(raw: Value, transform: Option<&Transform>) -> Value {
    match transform {
        Some(f) => f(raw),
        None => raw,
    }
}

/// Typed value of one declared attribute
pub(crate) fn value_of<P: Page>(
    page: &P,
    node: P::Element,
    spec: &AttributeSpec,
    config: &Config,
) -> Result<Value, PageError> {
    let selector = spec.effective_selector();
    let raw = extract(page, node, &selector, config)?;
    let value = apply(raw, spec.transformer());
    tracing::trace!("{} via {:?} = {:?}", spec.name(), selector, value);
    Ok(value)
}
