//! Comprehensive tests for domino-css
//!
//! Selector matching against parsed documents.

use domino_css::{ElementQuery, SelectorError, SelectorList};
use domino_html::parse;

const PAGE: &str = r#"
<html>
  <body>
    <div data-people>
      <div data-person class="active" data-rank="1" id="alice">
        <h2 data-name>Alice</h2>
      </div>
      <div data-person data-rank="3" id="bob">
        <h2 data-name>Bob</h2>
      </div>
      <div data-person data-rank="2" data-blocked id="charlie">
        <h2 data-name>Charlie</h2>
      </div>
    </div>
    <div data-outside data-person id="stray"></div>
    <form>
      <input type="checkbox" id="terms" checked>
      <input type="text" id="name" disabled>
      <p id="empty"></p>
    </form>
  </body>
</html>
"#;

fn texts(doc: &domino_dom::Document, selector: &str) -> Vec<String> {
    doc.query_selector_all(doc.tree().root(), selector)
        .unwrap()
        .into_iter()
        .map(|id| doc.tree().text_content(id).trim().to_string())
        .collect()
}

fn ids(doc: &domino_dom::Document, selector: &str) -> Vec<String> {
    doc.query_selector_all(doc.tree().root(), selector)
        .unwrap()
        .into_iter()
        .filter_map(|id| doc.tree().attribute(id, "id").map(str::to_string))
        .collect()
}

#[test]
fn test_descendant_scoping() {
    let doc = parse(PAGE);
    assert_eq!(ids(&doc, "[data-people] [data-person]"), vec!["alice", "bob", "charlie"]);
    assert_eq!(ids(&doc, "[data-person]").len(), 4);
}

#[test]
fn test_child_and_sibling_combinators() {
    let doc = parse(PAGE);
    assert_eq!(texts(&doc, "[data-people] > [data-person] > h2"), vec!["Alice", "Bob", "Charlie"]);
    assert_eq!(ids(&doc, "#alice + [data-person]"), vec!["bob"]);
    assert_eq!(ids(&doc, "#alice ~ [data-person]"), vec!["bob", "charlie"]);
}

#[test]
fn test_attribute_operators() {
    let doc = parse(PAGE);
    assert_eq!(ids(&doc, "[data-rank='2']"), vec!["charlie"]);
    assert_eq!(ids(&doc, "[data-rank^='1']"), vec!["alice"]);
    assert_eq!(ids(&doc, "[id$=ob]"), vec!["bob"]);
    assert_eq!(ids(&doc, "[id*=harl]"), vec!["charlie"]);
    assert_eq!(ids(&doc, "[data-blocked]"), vec!["charlie"]);
}

#[test]
fn test_structural_pseudo_classes() {
    let doc = parse(PAGE);
    assert_eq!(ids(&doc, "[data-person]:first-child"), vec!["alice"]);
    assert_eq!(ids(&doc, "[data-people] > :last-child"), vec!["charlie"]);
    assert_eq!(ids(&doc, "[data-people] > div:nth-child(even)"), vec!["bob"]);
    assert_eq!(ids(&doc, "[data-people] > div:nth-last-child(1)"), vec!["charlie"]);
    assert_eq!(ids(&doc, "[data-person]:not(.active, [data-blocked])"), vec!["bob", "stray"]);
    assert_eq!(ids(&doc, "p:empty"), vec!["empty"]);
    assert_eq!(doc.query_selector_all(doc.tree().root(), ":root").unwrap(), vec![doc.document_element()]);
}

#[test]
fn test_nth_extreme_offsets() {
    let doc = parse(PAGE);
    assert_eq!(ids(&doc, "[data-people] > div:nth-child(n-2147483648)").len(), 3);
    assert_eq!(ids(&doc, "[data-people] > div:nth-last-child(-n+2147483647)").len(), 3);
    assert!(ids(&doc, "[data-people] > div:nth-of-type(-2147483648)").is_empty());
    assert!(ids(&doc, "[data-people] > div:nth-last-of-type(2147483647n-2147483648)").is_empty());
}

#[test]
fn test_form_pseudo_classes() {
    let doc = parse(PAGE);
    assert_eq!(ids(&doc, "input:checked"), vec!["terms"]);
    assert_eq!(ids(&doc, "input:disabled"), vec!["name"]);
    assert_eq!(ids(&doc, "input:enabled"), vec!["terms"]);
}

#[test]
fn test_selector_list_deduplicates_in_document_order() {
    let doc = parse(PAGE);
    assert_eq!(ids(&doc, "#charlie, #alice, .active"), vec!["alice", "charlie"]);
}

#[test]
fn test_scoped_query_and_matches() {
    let doc = parse(PAGE);
    let tree = doc.tree();
    let bob = doc.get_element_by_id("bob").unwrap();
    let name = tree.query_selector(bob, "[data-name]").unwrap().unwrap();
    assert_eq!(tree.text_content(name), "Bob");

    let alice = doc.get_element_by_id("alice").unwrap();
    assert!(tree.matches(alice, ".active").unwrap());
    assert!(!tree.matches(bob, ".active").unwrap());
}

#[test]
fn test_parsed_list_reuse() {
    let doc = parse(PAGE);
    let list: SelectorList = "[data-person][data-rank]".parse().unwrap();
    assert_eq!(list.query_all(doc.tree(), doc.tree().root()).len(), 3);
}

#[test]
fn test_invalid_selector_error() {
    let doc = parse(PAGE);
    let err = doc.query_selector_all(doc.tree().root(), "div >").unwrap_err();
    assert_eq!(err, SelectorError::UnexpectedEnd);
}
