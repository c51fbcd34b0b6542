//! Business logic services for the tracker.
//!
//! # Services
//!
//! - `collection` - Adding waifus (duplicate check, birthday resolution) and
//!   the owner-scoped views derived from the store
//!
//! Character search lives in [`crate::search`].

pub mod collection;

pub use collection::{AddOutcome, AddWaifu, ReminderEntry, add_waifu, dashboard, reminders};
