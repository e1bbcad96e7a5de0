//! API endpoint descriptors.
//!
//! An [`Endpoint`] is pure data describing one logical API call. The
//! [`RequestBuilder`](crate::request::RequestBuilder) turns it into a wire
//! request.

use reqwest::Method;

// ============================================================================
// Constants
// ============================================================================

/// API Ninjas base URL.
pub const API_BASE_URL: &str = "https://api.api-ninjas.com/v1";

/// VIN lookup path.
const VINLOOKUP_PATH: &str = "/vinlookup";

/// Image-to-text path.
const IMAGETOTEXT_PATH: &str = "/imagetotext";

/// Default content type for every endpoint.
const JSON_CONTENT_TYPE: &str = "application/json";

// ============================================================================
// Endpoint
// ============================================================================

/// A logical API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Decode a VIN.
    VinLookup {
        /// The VIN to decode.
        vin: String,
    },
    /// Run OCR on an image.
    ImageToText {
        /// Raw image bytes.
        image: Vec<u8>,
    },
}

impl Endpoint {
    /// Creates a VIN lookup endpoint.
    pub fn vin_lookup(vin: impl Into<String>) -> Self {
        Self::VinLookup { vin: vin.into() }
    }

    /// Creates an image-to-text endpoint.
    pub fn image_to_text(image: impl Into<Vec<u8>>) -> Self {
        Self::ImageToText {
            image: image.into(),
        }
    }

    /// Path appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::VinLookup { .. } => VINLOOKUP_PATH,
            Self::ImageToText { .. } => IMAGETOTEXT_PATH,
        }
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        match self {
            Self::VinLookup { .. } => Method::GET,
            Self::ImageToText { .. } => Method::POST,
        }
    }

    /// Query parameters, in order.
    pub fn parameters(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::VinLookup { vin } => vec![("vin", vin.as_str())],
            Self::ImageToText { .. } => Vec::new(),
        }
    }

    /// Fixed headers. A multipart body overrides `Content-Type`.
    pub fn headers(&self) -> Vec<(&'static str, &'static str)> {
        vec![("Content-Type", JSON_CONTENT_TYPE)]
    }

    /// Binary payload to encode as multipart, if any.
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::VinLookup { .. } => None,
            Self::ImageToText { image } => Some(image),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
