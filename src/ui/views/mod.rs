//! Route-specific content rendering.

pub mod detail;
pub mod list;
