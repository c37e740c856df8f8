//! Core types for Parrot.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod id;
pub mod line_item;
pub mod price;
pub mod quantity;

pub use cart::{AddOutcome, Cart, CartError};
pub use id::*;
pub use line_item::LineItem;
pub use price::{Price, PriceError, format_amount};
pub use quantity::Quantity;
