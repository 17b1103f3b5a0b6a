//! Domino - typed records over HTML
//!
//! Declare a [`MappedType`] once: a root selector naming the elements that
//! form records, plus the attributes to read from each one. Every query then
//! re-reads the live document through the [`Page`] trait, so results always
//! reflect its current state.
//!
//! # Example
//! ```rust,ignore
//! use domino::{AttributeSpec, Conditions, MappedType, transform};
//!
//! let person = MappedType::builder("Person")
//!     .selector("[data-people] [data-person]")
//!     .attribute("name")
//!     .attribute(AttributeSpec::new("biography").selector("[data-bio]"))
//!     .attribute(AttributeSpec::new("rank").selector("&[data-rank]").transform(transform::to_int))
//!     .attribute(AttributeSpec::new("active").selector("&.active"))
//!     .build();
//!
//! let doc = domino_html::parse(html);
//! let people = person.on(&doc);
//! assert_eq!(people.count()?, 4);
//! let charlie = people.find_by(("rank", 2))?.unwrap();
//! assert_eq!(charlie.get("name")?, "Charlie");
//! ```

mod collection;
mod config;
mod error;
mod extract;
mod matcher;
mod page;
mod record;
mod schema;
mod selector;
mod value;
pub mod transform;

pub use collection::Collection;
pub use config::{Config, TextMode};
pub use error::{Error, Result};
pub use extract::{extract, Transform};
pub use matcher::{Conditions, Matcher};
pub use page::{Page, PageError};
pub use record::{Attributes, NodeRef, Record};
pub use schema::{AttributeSpec, MappedType, MappedTypeBuilder, Registry};
pub use selector::{resolve, EffectiveSelector, SelectorRule};
pub use value::Value;

/// Re-exported so callers can build [`Matcher::Pattern`]s without a direct dependency
pub use regex::Regex;
