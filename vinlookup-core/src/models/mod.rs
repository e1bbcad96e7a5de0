//! Domain models for VIN Lookup.
//!
//! This module contains the data structures returned by the lookup API and
//! the records kept about past searches.
//!
//! ## Submodules
//!
//! - [`vehicle`] - Decoded VIN data
//! - [`image_text`] - Text recognized in an image
//! - [`recent`] - Recent search records

mod image_text;
mod recent;
mod vehicle;

// Re-export everything at the models level
pub use image_text::ImageText;
pub use recent::RecentSearch;
pub use vehicle::Vehicle;
#[cfg(test)]
mod serde_tests;
