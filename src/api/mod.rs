//! REST API client module for the Rick and Morty catalog.
//!
//! This module provides the `ApiClient` for fetching the character
//! collection from the public Rick and Morty API. The API is paginated;
//! the client aggregates every page behind a single call so callers see
//! the whole collection at once.
//!
//! No authentication is required.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
