//! Dataset naming
//!
//! Conversions between `data-*` attribute names and the keys used to refer
//! to them from code (`favorite_color`, `favoriteColor`).

/// Attribute name for a dataset key
///
/// Snake case and camel case keys both map to kebab case:
/// `favorite_color` and `favoriteColor` become `data-favorite-color`.
pub fn data_attribute_name(key: &str) -> String {
    format!("data-{}", to_kebab_case(key))
}

/// Dataset key (camelCase) for a `data-*` attribute name
pub fn dataset_key(attribute: &str) -> Option<String> {
    attribute.strip_prefix("data-").map(to_camel_case)
}

/// Convert kebab-case to camelCase
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert camelCase or snake_case to kebab-case
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for c in s.chars() {
        if c == '_' {
            result.push('-');
        } else if c.is_ascii_uppercase() {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}
