//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Quantity};

/// Base address of the placeholder thumbnail shown next to each line item.
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://via.placeholder.com/80x80";

/// One product entry in the cart.
///
/// The serialized field names (`id`, `name`, `price`, `quantity`, `image`)
/// are the stored record format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Number of units, at least one.
    pub quantity: Quantity,
    /// Thumbnail reference, derived from `id`.
    pub image: String,
}

impl LineItem {
    /// Create a line item holding a single unit.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price) -> Self {
        let image = placeholder_image(&id);
        Self {
            id,
            name: name.into(),
            price,
            quantity: Quantity::ONE,
            image,
        }
    }

    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity.get())
    }
}

/// Thumbnail URL for a product: `.../80x80?text=Product+<id>`.
///
/// The label is form-encoded, so spaces become `+` and reserved characters
/// in the identifier are percent-escaped.
#[must_use]
pub fn placeholder_image(id: &ProductId) -> String {
    let label = format!("Product {id}");
    let encoded: String = url::form_urlencoded::byte_serialize(label.as_bytes()).collect();
    format!("{PLACEHOLDER_IMAGE_BASE}?text={encoded}")
}
