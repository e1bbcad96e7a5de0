//! Vehicle data decoded from a VIN.

use serde::{Deserialize, Serialize};

/// A vehicle, with properties parsed from a Vehicle Identification Number.
///
/// Equality compares every field; [`Vehicle::id`] is the VIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// The full 17-character VIN.
    pub vin: String,
    /// Country of manufacture.
    pub country: String,
    /// World region of manufacture.
    pub region: String,
    /// World Manufacturer Identifier (characters 1-3).
    pub wmi: String,
    /// Vehicle Descriptor Section (characters 4-9).
    pub vds: String,
    /// Vehicle Identifier Section (characters 10-17).
    pub vis: String,
    /// Model year.
    pub year: i32,
}

impl Vehicle {
    /// Creates a new vehicle.
    pub fn new(
        vin: impl Into<String>,
        country: impl Into<String>,
        region: impl Into<String>,
        wmi: impl Into<String>,
        vds: impl Into<String>,
        vis: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            vin: vin.into(),
            country: country.into(),
            region: region.into(),
            wmi: wmi.into(),
            vds: vds.into(),
            vis: vis.into(),
            year,
        }
    }

    /// Identity of the vehicle (its VIN).
    pub fn id(&self) -> &str {
        &self.vin
    }
}
