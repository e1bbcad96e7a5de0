// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # VIN Lookup Core
//!
//! Core types, models, and traits for the VIN Lookup client.
//!
//! This crate provides the foundational abstractions used across all other
//! VIN Lookup crates, including:
//!
//! - Domain models (vehicles, recognized text, recent searches)
//! - Error types
//! - Trait definitions for lookup services and stores
//! - VIN validation
//!
//! ## Key Types
//!
//! ### Models
//! - [`Vehicle`] - Decoded VIN data (country, region, WMI/VDS/VIS, year)
//! - [`ImageText`] - A text fragment recognized in an image
//! - [`RecentSearch`] - A vehicle lookup together with when it happened
//!
//! ### Validation
//! - [`Validator`] - Generic validation trait
//! - [`VinValidator`] - 17-character VIN format check

pub mod error;
pub mod models;
pub mod traits;
pub mod validator;

// Re-export error types
pub use error::ValidationError;

// Re-export all model types
pub use models::{ImageText, RecentSearch, Vehicle};

// Re-export traits
pub use traits::{ImageToTextService, Store, VehicleLookupService};

// Re-export validators
pub use validator::{Validator, VinValidator};
