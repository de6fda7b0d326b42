//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::Coordinates;
use crate::dataset::coordinator::LoadStatus;
use crate::dataset::{markers, search, MapMarker, Snapshot, ToiletRecord};
use crate::error::Error;
use crate::format::{available_formats, FormatInfo};
use crate::geo::ResolvedReference;
use crate::locale::{available_locales, Locale};
use crate::navigation::TravelMode;
use crate::server::state::AppState;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeFile;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/locales", get(locales_handler))
        .route("/api/formats", get(formats_handler))
        .route("/api/reference", get(reference_handler).post(update_reference_handler))
        .route("/api/toilets", get(toilets_handler))
        .route("/api/toilets/:id", get(toilet_handler))
        .route("/api/toilets/:id/directions", get(directions_handler))
        .route("/api/search", get(search_handler))
        .route("/api/markers", get(markers_handler));

    // Raw dataset download, only when it lives on disk
    if let Some(path) = state.source().file_path() {
        router = router.route_service("/data", ServeFile::new(path));
    }

    router.with_state(state)
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip)]
    status: StatusCode,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            status,
        }
    }

    fn not_found(what: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", what)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<&Error> for ApiError {
    fn from(err: &Error) -> Self {
        let (status, code) = match err {
            Error::DataFetch(_) => (StatusCode::BAD_GATEWAY, "DATA_FETCH_ERROR"),
            Error::DataParse(_) => (StatusCode::UNPROCESSABLE_ENTITY, "DATA_PARSE_ERROR"),
            Error::InvalidCoordinates(_) => (StatusCode::BAD_REQUEST, "INVALID_COORDINATES"),
            Error::GeolocationUnavailable(_) => (StatusCode::BAD_REQUEST, "LOCATION_ERROR"),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::Config(_) => (StatusCode::BAD_REQUEST, "CONFIG_ERROR"),
            Error::Server(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVER_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        Self::new(status, code, err.to_string())
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::from(&err)
    }
}

impl From<Arc<Error>> for ApiError {
    fn from(err: Arc<Error>) -> Self {
        ApiError::from(err.as_ref())
    }
}

/// Locale query parameter shared by the listing endpoints
#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

impl LocaleQuery {
    fn resolve(&self, default: Locale) -> Result<Locale, ApiError> {
        match &self.locale {
            Some(code) => code
                .parse::<Locale>()
                .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, "INVALID_LOCALE", e)),
            None => Ok(default),
        }
    }
}

/// A record as served to clients
///
/// Carries the walking label and remark in the requested language.
#[derive(Debug, Serialize)]
pub struct RecordView {
    #[serde(flatten)]
    pub record: ToiletRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_label: Option<String>,
}

impl RecordView {
    fn new(record: &ToiletRecord, locale: Locale) -> Self {
        Self {
            display_note: record.note_for(locale).map(str::to_string),
            distance_label: record.distance_label(),
            record: record.localized(locale),
        }
    }
}

/// Listing response
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Coordinates>,
    pub locale: Locale,
    pub total: usize,
    pub count: usize,
    pub records: Vec<RecordView>,
}

impl ListingResponse {
    fn new<'a>(
        snapshot: &Snapshot,
        records: impl IntoIterator<Item = &'a ToiletRecord>,
        locale: Locale,
    ) -> Self {
        let records: Vec<RecordView> = records
            .into_iter()
            .map(|r| RecordView::new(r, locale))
            .collect();
        Self {
            reference: snapshot.reference,
            locale,
            total: snapshot.len(),
            count: records.len(),
            records,
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Dataset location
    pub source: String,
    /// Generation of the latest load request
    pub generation: u64,
    /// "pending", "ready" or "failed"
    pub state: String,
    /// Number of loaded records, when ready
    pub records: Option<usize>,
    /// Load error, when failed
    pub error: Option<String>,
    pub reference: ResolvedReference,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let load = state.load_state();
    let (status, records, error) = match &load.status {
        LoadStatus::Pending => ("pending", None, None),
        LoadStatus::Ready(snapshot) => ("ready", Some(snapshot.len()), None),
        LoadStatus::Failed(err) => ("failed", None, Some(err.to_string())),
    };

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.source().to_string(),
        generation: load.generation,
        state: status.to_string(),
        records,
        error,
        reference: state.reference().await,
    })
}

/// Locale description
#[derive(Debug, Serialize, Deserialize)]
pub struct LocaleInfo {
    pub code: String,
    pub name: String,
}

/// List supported display languages
///
/// GET /api/locales
async fn locales_handler() -> Json<Vec<LocaleInfo>> {
    let locales = available_locales()
        .into_iter()
        .map(|l| LocaleInfo {
            code: l.code().to_string(),
            name: l.native_name().to_string(),
        })
        .collect();

    Json(locales)
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<Vec<FormatInfo>> {
    Json(available_formats())
}

/// Current reference point
///
/// GET /api/reference
async fn reference_handler(State(state): State<Arc<AppState>>) -> Json<ResolvedReference> {
    Json(state.reference().await)
}

/// Reference update body
///
/// Omitting either coordinate means the device could not provide a reading.
#[derive(Debug, Deserialize)]
pub struct ReferenceRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Reference update response
#[derive(Debug, Serialize)]
pub struct ReferenceResponse {
    #[serde(flatten)]
    pub reference: ResolvedReference,
    pub generation: u64,
}

/// Replace the reference point and start a reload
///
/// POST /api/reference
async fn update_reference_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReferenceRequest>,
) -> Json<ReferenceResponse> {
    let reading = match (req.lat, req.lng) {
        (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
        _ => None,
    };

    let (reference, generation) = state.update_reference(reading).await;
    Json(ReferenceResponse {
        reference,
        generation,
    })
}

/// Listing query
#[derive(Debug, Deserialize)]
pub struct ToiletsQuery {
    pub locale: Option<String>,
    pub limit: Option<usize>,
}

/// Ranked toilet listing
///
/// GET /api/toilets
async fn toilets_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ToiletsQuery>,
) -> Result<Json<ListingResponse>, ApiError> {
    let locale = LocaleQuery { locale: query.locale }.resolve(state.config.display.locale)?;
    let snapshot = state.snapshot().await?;

    let limit = query.limit.unwrap_or(usize::MAX);
    let records = snapshot.records.iter().take(limit);

    Ok(Json(ListingResponse::new(&snapshot, records, locale)))
}

/// A single toilet
///
/// GET /api/toilets/:id
async fn toilet_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<RecordView>, ApiError> {
    let locale = query.resolve(state.config.display.locale)?;
    let snapshot = state.snapshot().await?;

    snapshot
        .get(&id)
        .map(|record| Json(RecordView::new(record, locale)))
        .ok_or_else(|| ApiError::not_found(format!("Toilet not found: {}", id)))
}

/// Directions query
#[derive(Debug, Deserialize)]
pub struct DirectionsQuery {
    pub mode: Option<String>,
}

/// Directions response
#[derive(Debug, Serialize)]
pub struct DirectionsResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Coordinates>,
    pub destination: Coordinates,
    pub mode: TravelMode,
    pub url: String,
}

/// Directions link from the current reference to a toilet
///
/// GET /api/toilets/:id/directions
async fn directions_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<DirectionsQuery>,
) -> Result<Json<DirectionsResponse>, ApiError> {
    let mode = match &query.mode {
        Some(token) => token
            .parse::<TravelMode>()
            .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, "INVALID_MODE", e))?,
        None => state.config.navigation.default_mode,
    };

    let snapshot = state.snapshot().await?;
    let record = snapshot
        .get(&id)
        .ok_or_else(|| ApiError::not_found(format!("Toilet not found: {}", id)))?;

    let origin = snapshot.reference;
    let destination = record.coordinates();

    Ok(Json(DirectionsResponse {
        id: record.id.clone(),
        origin,
        destination,
        mode,
        url: state.config.directions_url(origin, destination, Some(mode)),
    }))
}

/// Search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub locale: Option<String>,
}

/// Free-text search over the current snapshot
///
/// GET /api/search
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ListingResponse>, ApiError> {
    let locale = LocaleQuery { locale: query.locale }.resolve(state.config.display.locale)?;
    let snapshot = state.snapshot().await?;

    let matches = search(&snapshot.records, &query.q);
    Ok(Json(ListingResponse::new(&snapshot, matches, locale)))
}

/// Map markers for every record
///
/// GET /api/markers
async fn markers_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MapMarker>>, ApiError> {
    let snapshot = state.snapshot().await?;
    Ok(Json(markers(&snapshot.records)))
}
