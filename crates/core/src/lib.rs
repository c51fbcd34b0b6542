//! Waifu Tracker Core - Shared types and matching logic.
//!
//! This crate provides everything the tracker needs that does not touch the
//! network or the database. It is shared by:
//! - `server` - HTTP API (search, add, dashboard, delete)
//! - `cli` - Command-line tools for migrations and ad-hoc searches
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Every function here is deterministic given its
//! inputs (the current date is always passed in by the caller).
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, owner ids, stored records, search candidates
//! - [`matching`] - Query expansion and fuzzy scoring of search candidates
//! - [`birthday`] - Birthday extraction from biographies and countdowns

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod birthday;
pub mod matching;
pub mod types;

pub use types::*;
