//! Recent search records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Vehicle;

/// A past vehicle lookup and when it was performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearch {
    /// The vehicle that was found.
    pub vehicle: Vehicle,
    /// When the search happened.
    pub date: DateTime<Utc>,
}

impl RecentSearch {
    /// Creates a new record.
    pub fn new(vehicle: Vehicle, date: DateTime<Utc>) -> Self {
        Self { vehicle, date }
    }

    /// Records a search that happened just now.
    pub fn now(vehicle: Vehicle) -> Self {
        Self::new(vehicle, Utc::now())
    }

    /// Identity of the record (the vehicle's VIN).
    pub fn id(&self) -> &str {
        self.vehicle.id()
    }
}
