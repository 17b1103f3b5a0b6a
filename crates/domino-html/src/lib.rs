//! Domino HTML Parser
//!
//! HTML5 parsing built on html5ever. Parsing never fails: malformed markup
//! is repaired the way a browser would repair it.

mod parser;

pub use parser::HtmlParser;
pub use domino_dom::Document;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}
