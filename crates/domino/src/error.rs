//! Error types

use crate::PageError;

/// Result alias for query operations
pub type Result<T> = std::result::Result<T, Error>;

/// Query error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The mapped type was queried without a root selector. This is a
    /// declaration mistake, never a data condition.
    #[error("{type_name} has no root selector")]
    NoSelector { type_name: String },

    /// Raised by the page, including its own element-not-found signal
    #[error(transparent)]
    Page(#[from] PageError),
}

impl Error {
    /// Whether this is the page's element-not-found signal
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Page(PageError::ElementNotFound { .. }))
    }

    /// Whether this is the missing-root-selector configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::NoSelector { .. })
    }
}
