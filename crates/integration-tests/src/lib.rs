//! Integration tests for Parrot.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p parrot-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart survives page loads through the file store
//! - `page_surface` - Rendered fragments per page kind
//! - `chat_session` - Chat reply timing through the terminal session
//!
//! Everything runs in-process. Time-dependent tests use tokio's paused
//! clock, so no test sleeps for real.
