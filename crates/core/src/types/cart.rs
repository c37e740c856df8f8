//! The cart: an ordered list of line items keyed by product id.
//!
//! All operations here are pure. Persisting and rendering after a mutation
//! is the caller's job (see the storefront's `CartManager`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::format_amount;
use super::{LineItem, Price, ProductId, Quantity};

/// Errors that can occur when building a [`Cart`] from existing items.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Two line items share a product id.
    #[error("duplicate line item for product {0}")]
    DuplicateProduct(ProductId),
}

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was appended.
    Appended,
    /// An existing line item gained one unit; carries the new quantity.
    Incremented(Quantity),
}

/// The shopper's ordered collection of line items.
///
/// Insertion order is preserved and no two items share a product id.
/// Serializes as a bare JSON array of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// the stored name and price are left as they were. Otherwise a new line
    /// item is appended.
    pub fn add(&mut self, id: ProductId, name: &str, price: Price) -> AddOutcome {
        if let Some(item) = self.get_mut(&id) {
            item.quantity = item.quantity.incremented();
            return AddOutcome::Incremented(item.quantity);
        }
        self.items.push(LineItem::new(id, name, price));
        AddOutcome::Appended
    }

    /// Add one unit to an existing line. Returns `false` if the product is absent.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        self.get_mut(id).is_some_and(|item| {
            item.quantity = item.quantity.incremented();
            true
        })
    }

    /// Take one unit off an existing line.
    ///
    /// Quantity never drops below one; returns `false` when the product is
    /// absent or already at one.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        match item.quantity.decremented() {
            Some(quantity) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Drop a line entirely, returning it if it was present.
    pub fn remove(&mut self, id: &ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Line items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Line items as a slice.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of line items. This is what the cart badge shows.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Returns `true` if the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Exact sum of `price × quantity` over all lines.
    ///
    /// Saturates instead of panicking; within the [`Price`] bounds that
    /// would take billions of lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// The total formatted to two decimal places, e.g. `"24.98"`.
    #[must_use]
    pub fn format_total(&self) -> String {
        format_amount(self.total())
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        for (index, item) in items.iter().enumerate() {
            if items.iter().skip(index + 1).any(|other| other.id == item.id) {
                return Err(CartError::DuplicateProduct(item.id.clone()));
            }
        }
        Ok(Self { items })
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
