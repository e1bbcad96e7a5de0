//! Lookup service facade.
//!
//! Ties the API client to two coalescing caches, one per operation family:
//! vehicles keyed by VIN and OCR results keyed by image digest.

use std::sync::Arc;
use tracing::{info, instrument};
use vinlookup_core::{ImageText, ImageToTextService, Vehicle, VehicleLookupService};

use crate::client::ApiClient;
use crate::coalesce::Coalescer;
use crate::digest::ImageDigest;
use crate::endpoint::Endpoint;
use crate::error::LookupError;
use crate::request::RequestBuilder;
use crate::settings::FetchSettings;
use crate::transport::{HttpTransport, Transport};

/// Deduplicating, memoizing access to the lookup API.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct LookupService {
    client: Arc<ApiClient>,
    vehicles: Coalescer<String, Vehicle>,
    texts: Coalescer<ImageDigest, Vec<ImageText>>,
}

impl LookupService {
    /// Creates a service that talks to the API over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, settings: &FetchSettings) -> Result<Self, LookupError> {
        let transport =
            HttpTransport::with_timeouts(settings.connect_timeout, settings.request_timeout)?;
        Ok(Self::with_transport(api_key, settings, Arc::new(transport)))
    }

    /// Creates a service over a custom transport.
    pub fn with_transport(
        api_key: impl Into<String>,
        settings: &FetchSettings,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let requests = RequestBuilder::with_base_url(settings.base_url.clone(), api_key);
        let client = ApiClient::new(requests, transport).with_retry_policy(settings.retry_policy());

        Self {
            client: Arc::new(client),
            vehicles: Coalescer::new("vehicles"),
            texts: Coalescer::new("image_text"),
        }
    }

    /// Looks up a vehicle by VIN.
    ///
    /// # Errors
    ///
    /// Returns the error of the shared attempt for this VIN.
    #[instrument(skip(self))]
    pub async fn vehicle(&self, vin: &str) -> Result<Vehicle, LookupError> {
        let client = Arc::clone(&self.client);
        let endpoint = Endpoint::vin_lookup(vin);

        let vehicle = self
            .vehicles
            .get(vin.to_string(), move || async move {
                client.fetch::<Vehicle>(&endpoint).await
            })
            .await?;

        info!(vin = %vehicle.vin, year = vehicle.year, "Vehicle resolved");
        Ok(vehicle)
    }

    /// Extracts text from an image.
    ///
    /// # Errors
    ///
    /// Returns the error of the shared attempt for these image bytes.
    #[instrument(skip(self, image), fields(bytes = image.len()))]
    pub async fn image_to_text(&self, image: Vec<u8>) -> Result<Vec<ImageText>, LookupError> {
        let key = ImageDigest::of(&image);
        let client = Arc::clone(&self.client);

        let texts = self
            .texts
            .get(key, move || async move {
                let endpoint = Endpoint::image_to_text(image);
                client.fetch::<Vec<ImageText>>(&endpoint).await
            })
            .await?;

        info!(digest = %key, fragments = texts.len(), "Image text resolved");
        Ok(texts)
    }

    /// Returns the memoized vehicle for `vin`, without network access.
    pub async fn cached_vehicle(&self, vin: &str) -> Option<Vehicle> {
        self.vehicles.cached(&vin.to_string()).await
    }
}

impl VehicleLookupService for LookupService {
    type Error = LookupError;

    async fn vehicle(&self, vin: &str) -> Result<Vehicle, LookupError> {
        LookupService::vehicle(self, vin).await
    }
}

impl ImageToTextService for LookupService {
    type Error = LookupError;

    async fn image_to_text(&self, image: Vec<u8>) -> Result<Vec<ImageText>, LookupError> {
        LookupService::image_to_text(self, image).await
    }
}
