//! Core types for the waifu tracker.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod character;
pub mod id;
pub mod owner;
pub mod waifu;

pub use character::{CandidateCharacter, ScoredCandidate};
pub use id::*;
pub use owner::{OwnerId, OwnerIdError};
pub use waifu::{DashboardEntry, NewWaifu, WaifuRecord, build_dashboard};
