//! CLI command implementations.
//!
//! Commands write their results to any `io::Write` so tests can capture them.

pub mod cart;
pub mod chat;
pub mod form;

use parrot_storefront::storage::KeyValueStore;
use parrot_storefront::{Page, PageKind, StorefrontConfig};

/// Load a page from the configured store, as a browser would on navigation.
///
/// # Errors
///
/// Returns `AppError` if the store cannot be opened or the page fails to render.
pub fn open_page(
    config: &StorefrontConfig,
    kind: PageKind,
) -> parrot_storefront::Result<Page<Box<dyn KeyValueStore>>> {
    let store = config.storage.open()?;
    Page::load(store, kind, config)
}
