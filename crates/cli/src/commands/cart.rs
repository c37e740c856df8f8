//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! parrot cart add p1 Widget 9.99
//! parrot cart inc p1
//! parrot cart dec p1
//! parrot cart remove p1
//! parrot cart show [--html]
//! parrot cart clear
//! ```

use std::io::Write;

use askama::Template;
use parrot_storefront::cart::CartTextTemplate;
use parrot_storefront::page::CartAction;
use parrot_storefront::storage::KeyValueStore;
use parrot_storefront::{Page, PageEvent, Result};
use tokio::time::Instant;

/// Add one unit of a product, then print the notice and the new badge count.
///
/// # Errors
///
/// Returns `AppError::BadInput` for an empty id or malformed price, or a
/// storage/render error.
pub fn add<S: KeyValueStore>(
    page: &mut Page<S>,
    id: String,
    name: String,
    price: String,
    out: &mut impl Write,
) -> Result<()> {
    let notice = page.dispatch(
        PageEvent::AddToCart {
            product_id: id,
            product_name: name,
            product_price: price,
        },
        Instant::now(),
    )?;
    if let Some(notice) = notice {
        writeln!(out, "{notice}")?;
    }
    writeln!(out, "Cart ({})", page.cart().count())?;
    Ok(())
}

/// Apply a line control and print the cart.
///
/// Unknown ids and decrements at one leave the cart as it was; that is
/// reported, not treated as an error.
///
/// # Errors
///
/// Returns a storage or render error.
pub fn control<S: KeyValueStore>(
    page: &mut Page<S>,
    action: CartAction,
    id: String,
    out: &mut impl Write,
) -> Result<()> {
    let before = page.cart().cart().clone();
    page.dispatch(
        PageEvent::Cart {
            action,
            product_id: id.clone(),
        },
        Instant::now(),
    )?;

    if page.cart().cart() == &before {
        writeln!(out, "No change for {id}")?;
    }
    show(page, false, out)
}

/// Print the cart as text, or as the rendered HTML fragments.
///
/// # Errors
///
/// Returns a render or I/O error.
pub fn show<S: KeyValueStore>(page: &Page<S>, html: bool, out: &mut impl Write) -> Result<()> {
    if html {
        let surface = page.surface();
        if let Some(items) = &surface.cart_items {
            writeln!(out, "{}", items.trim_end())?;
        }
        if let Some(total) = &surface.cart_total {
            writeln!(out, "{}", total.trim_end())?;
        }
        writeln!(out, "{}", surface.cart_count.trim_end())?;
        return Ok(());
    }

    let view = page.cart().view();
    let text = CartTextTemplate { cart: &view }.render()?;
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}

/// Remove every line, one remove control at a time.
///
/// # Errors
///
/// Returns a storage or render error.
pub fn clear<S: KeyValueStore>(page: &mut Page<S>, out: &mut impl Write) -> Result<()> {
    let ids: Vec<String> = page
        .cart()
        .cart()
        .iter()
        .map(|item| item.id.to_string())
        .collect();

    for id in &ids {
        page.dispatch(
            PageEvent::Cart {
                action: CartAction::Remove,
                product_id: id.clone(),
            },
            Instant::now(),
        )?;
    }

    tracing::info!(removed = ids.len(), "Cart cleared");
    writeln!(out, "Removed {} line(s)", ids.len())?;
    Ok(())
}
