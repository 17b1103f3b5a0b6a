//! Query configuration

/// How element text is turned into a raw attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Trim and collapse whitespace runs to a single space
    #[default]
    Normalized,
    /// Text content exactly as it appears in the document
    Raw,
}

impl TextMode {
    /// Apply the mode to raw text content
    pub fn apply(self, text: String) -> String {
        match self {
            TextMode::Normalized => text.split_whitespace().collect::<Vec<_>>().join(" "),
            TextMode::Raw => text,
        }
    }
}

/// Runtime options for a [`Collection`](crate::Collection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Text handling for descendant lookups
    pub text: TextMode,
}

impl Config {
    /// Configuration that keeps text content untouched
    pub fn raw_text() -> Self {
        Self { text: TextMode::Raw }
    }
}
