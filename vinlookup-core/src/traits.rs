//! Trait definitions for VIN Lookup.
//!
//! This module defines the seams between the network layer, persistence,
//! and the presentation layer.

use crate::models::{ImageText, Vehicle};

/// A service that provides vehicle data based on a VIN.
///
/// Implementors are responsible for:
/// - Building and sending the lookup request
/// - Deduplicating concurrent lookups of the same VIN
/// - Decoding the response into a [`Vehicle`]
pub trait VehicleLookupService: Send + Sync {
    /// Error returned when a lookup fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieves data for a vehicle given its VIN.
    fn vehicle(
        &self,
        vin: &str,
    ) -> impl std::future::Future<Output = Result<Vehicle, Self::Error>> + Send;
}

/// A service that extracts text from image data using OCR.
pub trait ImageToTextService: Send + Sync {
    /// Error returned when text extraction fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Processes image data and returns the recognized text fragments in order.
    fn image_to_text(
        &self,
        image: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<Vec<ImageText>, Self::Error>> + Send;
}

/// A persistent collection of items.
pub trait Store: Send + Sync {
    /// The type of items managed by the store.
    type Item;

    /// Error returned when loading or saving fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads and returns all items.
    ///
    /// A store that has never been written to returns an empty list.
    fn load(&self) -> impl std::future::Future<Output = Result<Vec<Self::Item>, Self::Error>> + Send;

    /// Adds an item, replacing any existing item with the same identity.
    fn add(
        &self,
        item: Self::Item,
    ) -> impl std::future::Future<Output = Result<(), Self::Error>> + Send;
}
