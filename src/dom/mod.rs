//! Read-only access to a rendered page.
//!
//! The harvesting code never touches a concrete HTML library. It talks to the
//! [`DomNode`] capability: find descendants by CSS selector, read text, read an
//! attribute. A lookup that matches nothing is an empty result, never an error;
//! [`DomError`] is reserved for real faults such as an unparsable selector or a
//! node the backend can no longer read.

pub mod html;

pub use html::{HtmlDocument, HtmlNode};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("node unavailable: {message}")]
    NodeUnavailable { message: String },
}

pub trait DomNode: Sized {
    /// Descendants matching `selector`, in document order.
    fn find_all(&self, selector: &str) -> Result<Vec<Self>, DomError>;

    fn find_first(&self, selector: &str) -> Result<Option<Self>, DomError> {
        Ok(self.find_all(selector)?.into_iter().next())
    }

    /// Rendered text of the node. Like a browser's `innerText`, inline children
    /// stay on the current line while `<br>` and block-level children start a
    /// new one. Source whitespace is kept as written.
    fn text(&self) -> Result<String, DomError>;

    fn attr(&self, name: &str) -> Result<Option<String>, DomError>;
}
