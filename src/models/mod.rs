//! Data models for Rick and Morty catalog entities.
//!
//! This module contains the data structures used to represent
//! catalog data:
//!
//! - `Character`: a single catalog record with display fields
//! - `LocationRef`: an origin/location reference embedded in a character

pub mod character;

pub use character::{Character, LocationRef};
