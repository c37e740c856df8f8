//! Integration tests for the fragments each page kind renders.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use parrot_storefront::page::CartAction;
use parrot_storefront::storage::MemoryStore;
use parrot_storefront::{AppError, Page, PageEvent, PageKind};
use tokio::time::Instant;

fn page(kind: PageKind) -> Page<MemoryStore> {
    Page::with_reply_delay(MemoryStore::new(), kind, Duration::from_millis(1500)).unwrap()
}

fn add(id: &str, name: &str, price: &str) -> PageEvent {
    PageEvent::AddToCart {
        product_id: id.to_string(),
        product_name: name.to_string(),
        product_price: price.to_string(),
    }
}

#[test]
fn test_catalog_page_renders_badge_only() {
    let mut page = page(PageKind::Catalog);
    page.dispatch(add("p1", "Widget", "9.99"), Instant::now())
        .unwrap();

    let surface = page.surface();
    assert!(surface.cart_count.contains(">1<"));
    assert!(surface.cart_items.is_none());
    assert!(surface.cart_total.is_none());
}

#[test]
fn test_cart_page_renders_lines_and_total() {
    let mut page = page(PageKind::Cart);
    assert!(
        page.surface()
            .cart_items
            .as_deref()
            .unwrap()
            .contains("Your cart is empty.")
    );

    let now = Instant::now();
    page.dispatch(add("p1", "Widget", "9.99"), now).unwrap();
    page.dispatch(add("p1", "Widget", "9.99"), now).unwrap();
    page.dispatch(add("p2", "Gadget", "5"), now).unwrap();

    let surface = page.surface();
    let items = surface.cart_items.as_deref().unwrap();
    assert_eq!(items.matches("class=\"cart-item\"").count(), 2);
    assert!(items.contains("data-product-id=\"p1\""));
    assert!(items.contains("$9.99"));
    assert!(surface.cart_total.as_deref().unwrap().contains("24.98"));
    assert!(surface.cart_count.contains(">2<"));
}

#[test]
fn test_controls_rerender_cart_page() {
    let mut page = page(PageKind::Cart);
    let now = Instant::now();
    page.dispatch(add("p1", "Widget", "9.99"), now).unwrap();
    page.dispatch(
        PageEvent::Cart {
            action: CartAction::Increase,
            product_id: "p1".to_string(),
        },
        now,
    )
    .unwrap();
    assert!(page.surface().cart_total.as_deref().unwrap().contains("19.98"));

    page.dispatch(
        PageEvent::Cart {
            action: CartAction::Remove,
            product_id: "p1".to_string(),
        },
        now,
    )
    .unwrap();
    let surface = page.surface();
    assert!(surface.cart_items.as_deref().unwrap().contains("Your cart is empty."));
    assert!(surface.cart_total.as_deref().unwrap().contains("0.00"));
    assert!(surface.cart_count.contains(">0<"));
}

#[test]
fn test_product_names_are_escaped() {
    let mut page = page(PageKind::Cart);
    page.dispatch(add("p1", "<b>Bold</b>", "1.00"), Instant::now())
        .unwrap();

    let items = page.surface().cart_items.clone().unwrap();
    assert!(!items.contains("<b>Bold</b>"));
    assert!(items.contains("&lt;b&gt;Bold&lt;/b&gt;"));
}

#[test]
fn test_bad_add_is_rejected_without_change() {
    let mut page = page(PageKind::Cart);
    let before = page.surface().clone();

    let err = page
        .dispatch(add("p1", "Widget", "nine"), Instant::now())
        .unwrap_err();
    assert!(matches!(err, AppError::BadInput(_)));

    let err = page
        .dispatch(add("  ", "Widget", "9.99"), Instant::now())
        .unwrap_err();
    assert!(matches!(err, AppError::BadInput(_)));

    assert_eq!(page.surface(), &before);
    assert!(page.cart().cart().is_empty());
}
