use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::domain::{ChatMessage, LatLng, Store, StoreCard};

/// Map view model consumed by the browser map widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapViewResponse {
    pub center: LatLng,
    pub zoom: u8,
    pub coverage_radius_m: f64,
    pub map_api_key: Option<String>,
    pub total_stores: usize,
    pub markers: Vec<StoreMarker>,
    pub rejected: Vec<RejectedStore>,
}

/// One plotted store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMarker {
    pub store: Store,
    pub position: LatLng,
    pub overlapping: bool,
}

/// A store left off the map because its coordinates did not parse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedStore {
    pub name: String,
    pub reason: String,
}

/// Response for the overlap endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlapResponse {
    pub radius_m: f64,
    pub threshold_m: f64,
    pub stores: Vec<String>,
}

/// Info card for a single store (marker click)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDetailResponse {
    pub card: StoreCard,
    pub position: LatLng,
    pub overlapping: bool,
}

/// Messages appended by one chat submission, or a session's whole transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub messages: Vec<ChatMessage>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub stores_loaded: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
