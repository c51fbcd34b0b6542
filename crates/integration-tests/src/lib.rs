//! Integration tests for the waifu tracker.
//!
//! Black-box HTTP tests against a running server. All tests are ignored by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server (in-memory store is fine)
//! cargo run -p waifu-tracker-server
//!
//! # Run integration tests
//! WAIFU_BASE_URL=http://localhost:8000 cargo test -p waifu-tracker-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `collection` - Add, dashboard, reminders and delete scoped by owner
//! - `search` - Character search through the live lookup service
