//! End-to-end tests for `LookupService` over a scripted transport.

use async_trait::async_trait;
use futures::future::join_all;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use vinlookup_core::{ImageToTextService, VehicleLookupService};
use vinlookup_fetch::{FetchSettings, LookupError, LookupService, RawResponse, Transport, WireRequest};

const VIN: &str = "1HGCM82633A123456";

const VEHICLE_JSON: &str = r#"{
    "vin": "1HGCM82633A123456",
    "country": "United States",
    "region": "North America",
    "wmi": "1HG",
    "vds": "CM8263",
    "vis": "3A123456",
    "year": 2003
}"#;

const TEXT_JSON: &str = r#"[
    {"text": "JH4KA7561PC008269", "bounding_box": {"x1": 1, "y1": 2, "x2": 3, "y2": 4}}
]"#;

// ============================================================================
// Scripted Transport
// ============================================================================

/// Replays canned responses in order and records every request it sees.
#[derive(Default)]
struct ScriptedTransport {
    script: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<(Instant, WireRequest)>>,
    latency: Duration,
}

impl ScriptedTransport {
    fn new(responses: impl IntoIterator<Item = (u16, &'static str)>) -> Arc<Self> {
        Self::with_latency(responses, Duration::ZERO)
    }

    fn with_latency(
        responses: impl IntoIterator<Item = (u16, &'static str)>,
        latency: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(
                responses
                    .into_iter()
                    .map(|(status, body)| RawResponse::new(status, body))
                    .collect(),
            ),
            requests: Mutex::default(),
            latency,
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn call_times(&self) -> Vec<Instant> {
        self.requests.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    fn paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.url.path().to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: WireRequest) -> Result<RawResponse, LookupError> {
        self.requests.lock().unwrap().push((Instant::now(), request));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LookupError::BadResponse("script exhausted".to_string()))
    }
}

fn service(transport: &Arc<ScriptedTransport>) -> LookupService {
    LookupService::with_transport(
        "test-key",
        &FetchSettings::default(),
        Arc::clone(transport) as Arc<dyn Transport>,
    )
}

// ============================================================================
// Vehicle Lookup
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_concurrent_lookups_share_one_request() {
    let transport = ScriptedTransport::with_latency([(200, VEHICLE_JSON)], Duration::from_millis(200));
    let service = service(&transport);

    let results = join_all((0..8).map(|_| service.vehicle(VIN))).await;

    assert_eq!(transport.calls(), 1);
    for result in results {
        assert_eq!(result.unwrap().vin, VIN);
    }
}

#[tokio::test]
async fn test_second_lookup_is_served_from_cache() {
    let transport = ScriptedTransport::new([(200, VEHICLE_JSON)]);
    let service = service(&transport);

    let first = service.vehicle(VIN).await.unwrap();
    let second = service.vehicle(VIN).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(transport.calls(), 1);
    assert_eq!(service.cached_vehicle(VIN).await, Some(first));
}

#[tokio::test]
async fn test_request_carries_key_and_query() {
    let transport = ScriptedTransport::new([(200, VEHICLE_JSON)]);
    let service = service(&transport);

    service.vehicle(VIN).await.unwrap();

    let requests = transport.requests.lock().unwrap();
    let (_, request) = &requests[0];
    assert_eq!(request.method, reqwest::Method::GET);
    assert_eq!(
        request.url.as_str(),
        "https://api.api-ninjas.com/v1/vinlookup?vin=1HGCM82633A123456"
    );
    assert_eq!(request.header("X-Api-Key"), Some("test-key"));
    assert!(request.body.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_retries_with_backoff() {
    let transport = ScriptedTransport::new([(429, ""), (429, ""), (200, VEHICLE_JSON)]);
    let service = service(&transport);
    let start = Instant::now();

    let vehicle = service.vehicle(VIN).await.unwrap();

    assert_eq!(vehicle.year, 2003);
    let offsets: Vec<Duration> = transport.call_times().iter().map(|t| *t - start).collect();
    assert_eq!(
        offsets,
        vec![Duration::ZERO, Duration::from_secs(1), Duration::from_secs(3)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_exhausts_attempts() {
    let transport = ScriptedTransport::new([(429, ""), (429, ""), (429, ""), (200, VEHICLE_JSON)]);
    let service = service(&transport);

    let result = service.vehicle(VIN).await;

    assert!(matches!(result, Err(LookupError::RateLimited)));
    assert_eq!(transport.calls(), 3);
    assert_eq!(service.cached_vehicle(VIN).await, None);
}

#[tokio::test]
async fn test_server_errors_are_not_retried() {
    for status in [404, 500] {
        let transport = ScriptedTransport::new([(status, "{}"), (200, VEHICLE_JSON)]);
        let service = service(&transport);

        let result = service.vehicle(VIN).await;

        assert!(matches!(result, Err(LookupError::ServerError { status: s }) if s == status));
        assert_eq!(transport.calls(), 1);
    }
}

#[tokio::test]
async fn test_malformed_body_is_decoding_error() {
    let transport = ScriptedTransport::new([(200, r#"{"vin": 42}"#)]);
    let service = service(&transport);

    let result = service.vehicle(VIN).await;

    assert!(matches!(result, Err(LookupError::Decoding(_))));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_failure_allows_fresh_attempt() {
    let transport = ScriptedTransport::new([(500, ""), (200, VEHICLE_JSON)]);
    let service = service(&transport);

    assert!(service.vehicle(VIN).await.is_err());
    let vehicle = service.vehicle(VIN).await.unwrap();

    assert_eq!(vehicle.vin, VIN);
    assert_eq!(transport.calls(), 2);
}

// ============================================================================
// Image To Text
// ============================================================================

#[tokio::test]
async fn test_image_to_text_uploads_multipart() {
    let transport = ScriptedTransport::new([(200, TEXT_JSON)]);
    let service = service(&transport);

    let texts = service.image_to_text(vec![0xFF, 0xD8, 0xFF]).await.unwrap();

    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].text, "JH4KA7561PC008269");

    let requests = transport.requests.lock().unwrap();
    let (_, request) = &requests[0];
    assert_eq!(request.method, reqwest::Method::POST);
    assert_eq!(request.url.path(), "/v1/imagetotext");
    assert!(
        request
            .header("Content-Type")
            .is_some_and(|v| v.starts_with("multipart/form-data; boundary="))
    );
    assert!(request.body.as_ref().is_some_and(|b| !b.is_empty()));
}

#[tokio::test]
async fn test_identical_images_share_cache_entry() {
    let transport = ScriptedTransport::new([(200, TEXT_JSON), (200, "[]")]);
    let service = service(&transport);

    let first = service.image_to_text(b"image-a".to_vec()).await.unwrap();
    let again = service.image_to_text(b"image-a".to_vec()).await.unwrap();
    let other = service.image_to_text(b"image-b".to_vec()).await.unwrap();

    assert_eq!(first, again);
    assert!(other.is_empty());
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_operation_caches_are_disjoint() {
    let transport = ScriptedTransport::new([(200, VEHICLE_JSON), (200, TEXT_JSON)]);
    let service = service(&transport);

    // Image bytes equal to the VIN must not hit the vehicle cache
    service.vehicle(VIN).await.unwrap();
    let texts = service.image_to_text(VIN.as_bytes().to_vec()).await.unwrap();

    assert_eq!(texts.len(), 1);
    assert_eq!(transport.paths(), vec!["/v1/vinlookup", "/v1/imagetotext"]);
}

// ============================================================================
// Trait Seams
// ============================================================================

async fn describe<S: VehicleLookupService>(service: &S, vin: &str) -> String {
    match service.vehicle(vin).await {
        Ok(vehicle) => format!("{} {}", vehicle.year, vehicle.country),
        Err(e) => e.to_string(),
    }
}

async fn read_text<S: ImageToTextService>(service: &S, image: Vec<u8>) -> usize {
    service.image_to_text(image).await.map_or(0, |t| t.len())
}

#[tokio::test]
async fn test_service_implements_core_traits() {
    let transport = ScriptedTransport::new([(200, VEHICLE_JSON), (200, TEXT_JSON)]);
    let service = service(&transport);

    assert_eq!(describe(&service, VIN).await, "2003 United States");
    assert_eq!(read_text(&service, vec![1, 2, 3]).await, 1);
}
