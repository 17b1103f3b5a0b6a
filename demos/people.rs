//! Example: query a small people directory
//!
//! Run with `RUST_LOG=domino=debug` to see each query.

use domino::{transform, AttributeSpec, MappedType, Regex};

const PAGE: &str = r#"
<div data-people>
  <div data-person class="active" data-rank="1" id="alice">
    <h2 data-name>Alice</h2>
    <p data-bio>Alice is fun</p>
    <p data-fav-color>Blue</p>
    <p data-age>23</p>
  </div>
  <div data-person data-rank="3">
    <h2 data-name>Bob</h2>
    <p data-bio>Bob is smart</p>
    <p data-fav-color>Red</p>
    <p data-age>52</p>
  </div>
  <div data-person data-rank="2" data-blocked>
    <h2 data-name>Charlie</h2>
    <p data-bio>Charlie is wild</p>
    <p data-fav-color>Red</p>
  </div>
</div>
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let person = MappedType::builder("Person")
        .selector("[data-people] [data-person]")
        .attribute("name")
        .attribute(AttributeSpec::new("biography").selector("[data-bio]"))
        .attribute(AttributeSpec::new("favorite_color").selector("[data-fav-color]"))
        .attribute(AttributeSpec::new("age").transform(transform::to_int))
        .attribute(AttributeSpec::new("rank").selector("&[data-rank]").transform(transform::to_int))
        .attribute(AttributeSpec::new("active").selector("&.active"))
        .attribute(AttributeSpec::new("blocked").selector("&[data-blocked]").transform(transform::present))
        .build();

    let doc = domino_html::parse(PAGE);
    let people = person.on(&doc);

    println!("{} people", people.count()?);
    for record in people.all()? {
        println!("{}", serde_json::to_string(&record.attributes()?)?);
    }

    let red = people.filter_by(("favorite_color", "Red"))?;
    println!("{} like red", red.len());

    if let Some(wild) = people.find_by_attribute("biography", Regex::new("wild")?)? {
        println!("wild one: {}", wild.get("name")?);
    }

    let leader = people.find_by_required(("rank", 1))?;
    println!("rank 1: {} ({})", leader.get("name")?, leader.id().unwrap_or_default());

    Ok(())
}
