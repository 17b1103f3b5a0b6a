//! Comprehensive tests for domino
//!
//! Mapped types queried against the people fixture.

use std::sync::LazyLock;

use domino::{transform, AttributeSpec, Conditions, MappedType, Page, PageError, Regex, Registry, Value};
use domino_dom::Document;

const PEOPLE: &str = r#"
<html>
  <body>
    <h1>Here are people and animals</h1>
    <div data-people>
      <div data-person class="active" data-rank="1" data-uuid="e94bb2d3-71d2-4efb-abd4-ebc0cb58d19f">
        <h2 data-name>Alice</h2>
        <p data-last-name>Cooper</p>
        <p data-bio>Alice is fun</p>
        <p data-fav-color>Blue</p>
        <p data-age>23</p>
      </div>
      <div data-person data-rank="3" data-uuid="05bf319e-8d6a-43c2-be37-2dad8ddbe5af">
        <h2 data-name>Bob</h2>
        <p data-last-name>Marley</p>
        <p data-bio>Bob is smart</p>
        <p data-fav-color>Red</p>
        <p data-age>52</p>
      </div>
      <div data-person data-rank="2" data-uuid="4abcdeff-1d36-44a9-a05e-8fc57564d2c4">
        <h2 data-name>Charlie</h2>
        <p data-last-name>Murphy</p>
        <p data-bio>Charlie is wild</p>
        <p data-fav-color>Red</p>
      </div>
      <div data-person data-rank="7" data-blocked data-uuid="2afccde0-5d13-41c7-ab01-7f37fb2fe3ee">
        <h2 data-name>Donna</h2>
        <p data-last-name>Summer</p>
        <p data-bio>Donna is quiet</p>
      </div>
    </div>
    <div data-animals></div>
    <div data-receipts>
      <div data-receipt id="receipt-72" data-store="ACME"></div>
    </div>
  </body>
</html>
"#;

static PERSON: LazyLock<MappedType> = LazyLock::new(|| {
    MappedType::builder("Person")
        .selector("[data-people] [data-person]")
        .attribute("name")
        .attribute("last_name")
        .attribute(AttributeSpec::new("biography").selector("[data-bio]"))
        .attribute(AttributeSpec::new("favorite_color").selector("[data-fav-color]"))
        .attribute(AttributeSpec::new("age").transform(transform::to_int))
        .attribute(AttributeSpec::new("rank").selector("&[data-rank]").transform(transform::to_int))
        .attribute(AttributeSpec::new("active").selector("&.active"))
        .attribute(AttributeSpec::new("uuid").selector("&[data-uuid]"))
        .attribute(AttributeSpec::new("blocked").selector("&[data-blocked]").transform(transform::present))
        .build()
});

static ANIMAL: LazyLock<MappedType> = LazyLock::new(|| {
    MappedType::builder("Animal")
        .selector("[data-animals] [data-animal]")
        .attribute("name")
        .build()
});

static CAR: LazyLock<MappedType> =
    LazyLock::new(|| MappedType::builder("Car").selector("[data-cars] [data-car]").build());

static NO_SELECTOR: LazyLock<MappedType> = LazyLock::new(|| MappedType::builder("NoSelector").build());

static RECEIPT: LazyLock<MappedType> =
    LazyLock::new(|| MappedType::builder("Receipt").selector("[data-receipts] [data-receipt]").build());

fn page() -> Document {
    domino_html::parse(PEOPLE)
}

fn names(records: &[domino::Record<'_, Document>]) -> Vec<String> {
    records.iter().map(|r| r.get("name").unwrap().to_string()).collect()
}

fn name_of(record: Option<domino::Record<'_, Document>>) -> String {
    record.expect("record").get("name").unwrap().to_string()
}

#[test]
fn test_counts() {
    let doc = page();
    assert_eq!(PERSON.on(&doc).count().unwrap(), 4);
    assert_eq!(ANIMAL.on(&doc).count().unwrap(), 0);
    assert_eq!(CAR.on(&doc).count().unwrap(), 0);
    assert_eq!(PERSON.on(&doc).all().unwrap().len(), 4);
}

#[test]
fn test_select_and_sort() {
    let doc = page();
    let people = PERSON.on(&doc);

    let red = people.select(|p| p.get("favorite_color").unwrap() == "Red").unwrap();
    assert_eq!(names(&red), vec!["Bob", "Charlie"]);

    let sorted = people
        .sort(|a, b| {
            let a = a.get("favorite_color").unwrap().to_string();
            let b = b.get("favorite_color").unwrap().to_string();
            a.cmp(&b)
        })
        .unwrap();
    assert_eq!(names(&sorted), vec!["Donna", "Alice", "Bob", "Charlie"]);
    assert_eq!(names(&people.all().unwrap()), vec!["Alice", "Bob", "Charlie", "Donna"]);
}

#[test]
fn test_sort_by_transformed_attribute() {
    let doc = page();
    let sorted = PERSON
        .on(&doc)
        .sort(|a, b| {
            let a = a.get("rank").unwrap().as_int();
            let b = b.get("rank").unwrap().as_int();
            a.cmp(&b)
        })
        .unwrap();
    assert_eq!(names(&sorted), vec!["Alice", "Charlie", "Bob", "Donna"]);
}

#[test]
fn test_no_selector() {
    let doc = page();
    let none = NO_SELECTOR.on(&doc);
    assert!(none.first().unwrap_err().is_configuration());
    assert!(none.find_required().unwrap_err().is_configuration());
    assert!(none.find_by(("foo", "bar")).unwrap_err().is_configuration());
    assert!(none.find_by_required(("foo", "bar")).unwrap_err().is_configuration());
    assert!(none.filter_by(("foo", "bar")).unwrap_err().is_configuration());
    assert!(none.select(|_| true).unwrap_err().is_configuration());
}

#[test]
fn test_ids() {
    let doc = page();
    assert_eq!(PERSON.on(&doc).first().unwrap().unwrap().id(), None);
    assert_eq!(RECEIPT.on(&doc).first().unwrap().unwrap().id().as_deref(), Some("#receipt-72"));
}

#[test]
fn test_node_properties() {
    let doc = page();
    let receipt = RECEIPT.on(&doc).first().unwrap().unwrap();
    assert_eq!(receipt.node().attr("data-store").as_deref(), Some("ACME"));
}

#[test]
fn test_find_by_attribute() {
    let doc = page();
    let people = PERSON.on(&doc);
    assert_eq!(name_of(people.find_by_attribute("biography", "Alice is fun").unwrap()), "Alice");
    assert_eq!(name_of(people.find_by_attribute("biography", Regex::new("wild").unwrap()).unwrap()), "Charlie");
    assert_eq!(name_of(people.find_by_attribute("uuid", Regex::new("abcdef").unwrap()).unwrap()), "Charlie");
}

#[test]
fn test_default_selector() {
    let doc = page();
    let alice = PERSON.on(&doc).find_by_attribute("name", "Alice").unwrap().unwrap();
    assert_eq!(alice.get("last_name").unwrap(), "Cooper");
}

#[test]
fn test_transform() {
    let doc = page();
    let people = PERSON.on(&doc);
    let alice = people.find_by_attribute("name", "Alice").unwrap().unwrap();
    assert_eq!(alice.get("age").unwrap(), Value::Int(23));

    let charlie = people.find_by_attribute("name", "Charlie").unwrap().unwrap();
    assert_eq!(charlie.get("age").unwrap(), Value::Int(0));
    assert_eq!(charlie.get("favorite_color").unwrap(), "Red");

    let donna = people.find_by_attribute("name", "Donna").unwrap().unwrap();
    assert_eq!(donna.get("favorite_color").unwrap(), Value::Absent);
    assert_eq!(donna.get("blocked").unwrap(), true);
}

#[test]
fn test_attributes() {
    let doc = page();
    let alice = PERSON.on(&doc).first().unwrap().unwrap();
    let attrs = alice.attributes().unwrap();
    let expected: Vec<(String, Value)> = vec![
        ("name".into(), "Alice".into()),
        ("last_name".into(), "Cooper".into()),
        ("biography".into(), "Alice is fun".into()),
        ("favorite_color".into(), "Blue".into()),
        ("age".into(), Value::Int(23)),
        ("rank".into(), Value::Int(1)),
        ("active".into(), true.into()),
        ("uuid".into(), "e94bb2d3-71d2-4efb-abd4-ebc0cb58d19f".into()),
        ("blocked".into(), false.into()),
    ];
    assert_eq!(attrs.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn test_attributes_json() {
    let doc = page();
    let alice = PERSON.on(&doc).first().unwrap().unwrap();
    let json = serde_json::to_value(alice.attributes().unwrap()).unwrap();
    assert_eq!(json["age"], 23);
    assert_eq!(json["active"], true);
    assert_eq!(json["favorite_color"], "Blue");
}

#[test]
fn test_find_required() {
    let doc = page();
    let receipt = RECEIPT.on(&doc).find_required().unwrap();
    assert_eq!(receipt.id().as_deref(), Some("#receipt-72"));

    assert!(ANIMAL.on(&doc).find().unwrap().is_none());
    assert!(ANIMAL.on(&doc).first().unwrap().is_none());

    let err = ANIMAL.on(&doc).find_required().unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        domino::Error::Page(PageError::ElementNotFound { ref selector }) if selector == "[data-animals] [data-animal]"
    ));
}

#[test]
fn test_find_with_override() {
    let doc = page();
    let people = PERSON.on(&doc);
    let blocked = people.find_with("[data-person][data-blocked]").unwrap().unwrap();
    assert_eq!(blocked.get("name").unwrap(), "Donna");
    assert!(people.find_required_with("[data-person].missing").unwrap_err().is_not_found());
}

#[test]
fn test_find_by() {
    let doc = page();
    let people = PERSON.on(&doc);
    assert_eq!(name_of(people.find_by(("biography", "Alice is fun")).unwrap()), "Alice");

    let all_four = Conditions::new()
        .and("biography", "Alice is fun")
        .and("age", 23)
        .and("favorite_color", "Blue")
        .and("rank", 1);
    assert_eq!(name_of(people.find_by(all_four.clone()).unwrap()), "Alice");
    assert_eq!(people.find_by_required(all_four).unwrap().get("name").unwrap(), "Alice");

    assert!(people.find_by(("foo", "bar")).unwrap().is_none());
}

#[test]
fn test_find_by_self_combinators() {
    let doc = page();
    let people = PERSON.on(&doc);
    assert_eq!(name_of(people.find_by(("active", true)).unwrap()), "Alice");
    assert_eq!(name_of(people.find_by(("blocked", true)).unwrap()), "Donna");
    assert_eq!(name_of(people.find_by(("rank", 2)).unwrap()), "Charlie");
}

#[test]
fn test_find_by_required_without_match() {
    let doc = page();
    let err = PERSON.on(&doc).find_by_required(("foo", "bar")).unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_configuration());
}

#[test]
fn test_filter_by() {
    let doc = page();
    let people = PERSON.on(&doc);
    assert_eq!(names(&people.filter_by(("favorite_color", "Red")).unwrap()), vec!["Bob", "Charlie"]);
    assert_eq!(
        names(&people.filter_by([("age", Value::from(23)), ("favorite_color", Value::from("Blue"))]).unwrap()),
        vec!["Alice"]
    );
    assert_eq!(names(&people.filter_by(("active", false)).unwrap()), vec!["Bob", "Charlie", "Donna"]);
    assert_eq!(names(&people.filter_by(("blocked", true)).unwrap()), vec!["Donna"]);
    assert!(people.filter_by(("favorite_color", "Yellow")).unwrap().is_empty());
}

#[test]
fn test_live_re_evaluation() {
    let mut doc = page();
    assert_eq!(PERSON.on(&doc).count().unwrap(), 4);

    let people = Page::query_first(&doc, None, "[data-people]").unwrap().unwrap();
    let tree = doc.tree_mut();
    let eve = tree.create_element("div");
    tree.set_attribute(eve, "data-person", "");
    tree.set_attribute(eve, "data-rank", "5");
    let name = tree.create_element("h2");
    tree.set_attribute(name, "data-name", "");
    let text = tree.create_text("Eve");
    tree.append_child(name, text);
    tree.append_child(eve, name);
    tree.append_child(people, eve);

    let collection = PERSON.on(&doc);
    assert_eq!(collection.count().unwrap(), 5);
    assert_eq!(name_of(collection.find_by(("rank", 5)).unwrap()), "Eve");
}

#[test]
fn test_invalid_selector_propagates() {
    let doc = page();
    let broken = MappedType::builder("Broken").selector("[data-people").build();
    let err = broken.on(&doc).count().unwrap_err();
    assert!(matches!(err, domino::Error::Page(PageError::InvalidSelector { .. })));
}

#[test]
fn test_extreme_nth_offset_in_root_selector() {
    let doc = page();
    let everyone = MappedType::builder("Everyone")
        .selector("[data-people] [data-person]:nth-child(n-2147483648)")
        .attribute("name")
        .build();
    assert_eq!(everyone.on(&doc).count().unwrap(), 4);

    let nobody = MappedType::builder("Nobody")
        .selector("[data-people] [data-person]:nth-last-child(-2147483648)")
        .build();
    assert!(nobody.on(&doc).find().unwrap().is_none());
}

#[test]
fn test_registry_lookup() {
    let mut registry = Registry::new();
    registry.define(PERSON.clone());
    registry.define(RECEIPT.clone());

    let doc = page();
    let person = registry.get("Person").unwrap();
    assert_eq!(person.on(&doc).count().unwrap(), 4);
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Person", "Receipt"]);
}
