// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # VIN Lookup Fetch
//!
//! Network layer for VIN Lookup: request building, the HTTP transport,
//! response classification, retries, and per-key request coalescing.
//!
//! ## Request Flow
//!
//! - [`endpoint::Endpoint`] - Describes an API operation
//! - [`request::RequestBuilder`] - Turns an endpoint into a [`request::WireRequest`]
//! - [`transport::Transport`] - Sends a request, returns status and body
//! - [`response`] - Maps status codes to errors and decodes JSON
//! - [`retry::RetryPolicy`] - Retries rate-limited attempts with backoff
//!
//! ## Caching
//!
//! - [`coalesce::Coalescer`] - At most one in-flight request per key,
//!   successful results memoized
//! - [`service::LookupService`] - Vehicle and image-to-text lookups, each
//!   behind its own coalescer
//!
//! ## Example
//!
//! ```ignore
//! use vinlookup_fetch::{FetchSettings, LookupService};
//!
//! let service = LookupService::new(api_key, &FetchSettings::default())?;
//! let vehicle = service.vehicle("JH4KA7561PC008269").await?;
//! ```

pub mod client;
pub mod coalesce;
pub mod digest;
pub mod endpoint;
pub mod error;
pub mod request;
pub mod response;
pub mod retry;
pub mod service;
pub mod settings;
pub mod transport;

// Re-export key types at crate root

// Errors
pub use error::LookupError;

// Request pipeline
pub use client::ApiClient;
pub use endpoint::{API_BASE_URL, Endpoint};
pub use request::{RequestBuilder, WireRequest};
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, RawResponse, Transport};

// Caching & service
pub use coalesce::Coalescer;
pub use digest::ImageDigest;
pub use service::LookupService;
pub use settings::{FetchSettings, FetchSettingsBuilder};
