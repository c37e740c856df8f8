//! Parrot Core - Shared cart types.
//!
//! This crate provides the domain types used across all Parrot components:
//! - `storefront` - The page: cart manager, chat panel, form simulators
//! - `cli` - One-shot command-line access to the same page state
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! storage access, no timers. This keeps the cart rules testable in isolation
//! and lets every front end share one definition of the stored record.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities, and the cart itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
