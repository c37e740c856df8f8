//! Parrot Storefront library.
//!
//! The client-side half of the Parrot store: a cart mirrored to durable
//! key-value storage, a simulated support chat, and form simulators, all
//! driven by discrete page events. The crate is a library so the page can be
//! exercised from tests, the terminal session, and the CLI alike.
//!
//! # Modules
//!
//! - [`page`] - Page bootstrap and event dispatch
//! - [`cart`] - Cart manager, views, and templates
//! - [`chat`] - Chat panel
//! - [`forms`] - Login / register / create-product simulators
//! - [`storage`] - Durable key-value store backends
//! - [`shell`] - Line-based terminal session

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod chat;
pub mod config;
pub mod error;
pub mod forms;
pub mod notice;
pub mod page;
pub mod shell;
pub mod storage;
pub mod telemetry;

pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use notice::Notice;
pub use page::{Page, PageEvent, PageKind};
