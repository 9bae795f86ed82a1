use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MapSettings;
use crate::core::store_card;
use crate::models::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, MapViewResponse, OverlapResponse,
    StoreDetailResponse, StoreMarker, TranscriptQuery,
};
use crate::services::{ChatSessions, StoreDirectory};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<StoreDirectory>,
    pub chat: Arc<ChatSessions>,
    pub map: MapSettings,
}

/// Configure all locator routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/map", web::get().to(map_view))
        .route("/stores/overlaps", web::get().to(overlaps))
        .route("/stores/by-name/{name:.*}", web::get().to(store_detail))
        .route("/chat", web::post().to(chat))
        .route("/chat/transcript", web::get().to(transcript));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let stores_loaded = state.directory.len();
    let status = if stores_loaded > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        stores_loaded,
    })
}

/// Map view model
///
/// GET /api/v1/map
///
/// Every located store becomes a marker; `overlapping` marks stores whose
/// coverage circle intersects another store's.
async fn map_view(state: web::Data<AppState>) -> impl Responder {
    let directory = &state.directory;

    let markers: Vec<StoreMarker> = directory
        .stores()
        .iter()
        .map(|s| StoreMarker {
            store: s.store.clone(),
            position: s.position.into(),
            overlapping: directory.is_overlapping(s.name()),
        })
        .collect();

    HttpResponse::Ok().json(MapViewResponse {
        center: state.map.center(),
        zoom: state.map.zoom,
        coverage_radius_m: directory.detector().radius_m(),
        map_api_key: state.map.api_key.clone(),
        total_stores: markers.len(),
        markers,
        rejected: directory.rejected().to_vec(),
    })
}

/// Names of overlapping stores, sorted
///
/// GET /api/v1/stores/overlaps
async fn overlaps(state: web::Data<AppState>) -> impl Responder {
    let detector = state.directory.detector();

    HttpResponse::Ok().json(OverlapResponse {
        radius_m: detector.radius_m(),
        threshold_m: detector.threshold_m(),
        stores: state.directory.overlapping().iter().cloned().collect(),
    })
}

/// Info card for a single store
///
/// GET /api/v1/stores/by-name/{name}
///
/// The name is the rest of the path, so names containing `/` resolve too.
async fn store_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let name = path.into_inner();

    match state.directory.find(&name) {
        Some(store) => HttpResponse::Ok().json(StoreDetailResponse {
            card: store_card(&store.store),
            position: store.position.into(),
            overlapping: state.directory.is_overlapping(&name),
        }),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Store not found".to_string(),
            message: format!("No store named {:?}", name),
            status_code: 404,
        }),
    }
}

/// Submit a chat query
///
/// POST /api/v1/chat
///
/// Request body:
/// ```json
/// { "query": "Which outlets in KL operate 24 hours?", "session_id": "uuid (optional)" }
/// ```
///
/// Responds with the session id (minted when the request had none) and the
/// user message and bot reply appended to that session's transcript.
/// Backend failures come back as an error message, not as an HTTP error.
async fn chat(
    state: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }
    if req.is_blank() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: "query must not be blank".to_string(),
            status_code: 400,
        });
    }

    tracing::info!("Chat query: {:?}", req.query);

    let exchange = state.chat.submit(req.session_id, &req.query).await;

    HttpResponse::Ok().json(ChatResponse {
        session_id: exchange.session_id,
        messages: vec![exchange.user, exchange.reply],
    })
}

/// One session's transcript in append order
///
/// GET /api/v1/chat/transcript?session_id={uuid}
async fn transcript(
    state: web::Data<AppState>,
    query: web::Query<TranscriptQuery>,
) -> impl Responder {
    let session_id = query.session_id;

    match state.chat.transcript(session_id).await {
        Some(messages) => HttpResponse::Ok().json(ChatResponse {
            session_id,
            messages,
        }),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Session not found".to_string(),
            message: format!("No chat session {}", session_id),
            status_code: 404,
        }),
    }
}
