//! Cart display data and templates.
//!
//! Views carry pre-formatted strings so templates stay free of arithmetic.

use askama::Template;
use parrot_core::{Cart, LineItem};

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
    pub image: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub count: usize,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: "0.00".to_string(),
            count: 0,
        }
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.iter().map(CartItemView::from).collect(),
            total: cart.format_total(),
            count: cart.count(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            price: item.price.to_string(),
            quantity: item.quantity.get(),
            line_total: parrot_core::format_amount(item.line_total()),
            image: item.image.clone(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart items container fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// Cart total fragment.
#[derive(Template)]
#[template(path = "partials/cart_total.html")]
pub struct CartTotalTemplate<'a> {
    pub total: &'a str,
}

/// Cart count badge fragment.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// Plain-text cart listing for the terminal.
#[derive(Template)]
#[template(path = "terminal/cart.txt")]
pub struct CartTextTemplate<'a> {
    pub cart: &'a CartView,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use parrot_core::{Price, ProductId};

    use super::*;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            ProductId::parse("p1").unwrap(),
            "Widget",
            Price::parse("9.99").unwrap(),
        );
        cart.add(
            ProductId::parse("p1").unwrap(),
            "Widget",
            Price::parse("9.99").unwrap(),
        );
        cart.add(
            ProductId::parse("p2").unwrap(),
            "Gadget",
            Price::parse("5.00").unwrap(),
        );
        cart
    }

    #[test]
    fn test_view_formats_prices() {
        let view = CartView::from(&sample_cart());
        assert_eq!(view.total, "24.98");
        assert_eq!(view.count, 2);
        assert_eq!(view.items.first().unwrap().line_total, "19.98");
        assert_eq!(view.items.last().unwrap().price, "5.00");
    }

    #[test]
    fn test_empty_view_matches_empty_cart() {
        assert_eq!(CartView::from(&Cart::new()), CartView::empty());
    }

    #[test]
    fn test_items_fragment_empty_placeholder() {
        let view = CartView::empty();
        let html = CartItemsTemplate { cart: &view }.render().unwrap();
        assert_eq!(html.trim(), "<p>Your cart is empty.</p>");
    }

    #[test]
    fn test_items_fragment_lists_controls() {
        let view = CartView::from(&sample_cart());
        let html = CartItemsTemplate { cart: &view }.render().unwrap();

        assert_eq!(html.matches("class=\"cart-item\"").count(), 2);
        assert!(html.contains("<h3>Widget</h3>"));
        assert!(html.contains("<p class=\"price\">$9.99</p>"));
        assert!(html.contains("value=\"2\""));
        assert!(html.contains("class=\"increase-quantity\" data-product-id=\"p2\""));
        assert!(!html.contains("Your cart is empty."));
    }

    #[test]
    fn test_items_fragment_escapes_names() {
        let mut cart = Cart::new();
        cart.add(
            ProductId::parse("x").unwrap(),
            "<b>Bold</b>",
            Price::parse("1").unwrap(),
        );
        let view = CartView::from(&cart);
        let html = CartItemsTemplate { cart: &view }.render().unwrap();
        assert!(!html.contains("<b>Bold</b>"));
    }

    #[test]
    fn test_count_and_total_fragments() {
        let count = CartCountTemplate { count: 2 }.render().unwrap();
        assert_eq!(count.trim(), "<span id=\"cart-count\">2</span>");

        let total = CartTotalTemplate { total: "24.98" }.render().unwrap();
        assert_eq!(total.trim(), "<span id=\"cart-total\">24.98</span>");
    }

    #[test]
    fn test_text_listing() {
        let view = CartView::from(&sample_cart());
        let text = CartTextTemplate { cart: &view }.render().unwrap();

        assert!(text.contains("2 x Widget [p1] @ $9.99 = $19.98"));
        assert!(text.contains("1 x Gadget [p2] @ $5.00 = $5.00"));
        assert!(text.contains("Total: $24.98 | Cart (2)"));

        let empty = CartTextTemplate {
            cart: &CartView::empty(),
        }
        .render()
        .unwrap();
        assert!(empty.starts_with("Your cart is empty."));
    }
}
