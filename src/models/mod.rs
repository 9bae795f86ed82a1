// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Axis, ChatMessage, ChatbotReply, Contact, CoordinateError, FeatureBadge, LatLng, LocatedStore,
    MessageContent, RawCoordinate, Sender, Store, StoreCard,
};
pub use requests::{ChatRequest, TranscriptQuery};
pub use responses::{
    ChatResponse, ErrorResponse, HealthResponse, MapViewResponse, OverlapResponse, RejectedStore,
    StoreDetailResponse, StoreMarker,
};
