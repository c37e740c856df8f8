//! User-facing notices.
//!
//! A notice is the blocking acknowledgment a page shows after an action:
//! "Widget added to cart!", "Login attempt simulated...". Handlers return
//! notices instead of showing them, and the front end decides how to display
//! them.

use core::fmt;

/// A one-line acknowledgment for the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(String);

impl Notice {
    /// Create a notice with arbitrary text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Confirmation shown after every add-to-cart click.
    #[must_use]
    pub fn added_to_cart(product_name: &str) -> Self {
        Self(format!("{product_name} added to cart!"))
    }

    /// The notice text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Notice> for String {
    fn from(notice: Notice) -> Self {
        notice.0
    }
}
