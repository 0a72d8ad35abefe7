//! REST handlers for segments, campaigns, and operational probes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use promo_core::types::{Campaign, Segment};
use promo_core::PromoError;
use promo_management::models::{CampaignDraft, CampaignWithVouchers, SegmentDraft};
use promo_management::{CampaignOrchestrator, SegmentService};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub segments: Arc<SegmentService>,
    pub campaigns: Arc<CampaignOrchestrator>,
    pub node_id: String,
    pub start_time: Instant,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}

/// A segment together with its current member snapshot.
#[derive(Serialize, ToSchema)]
pub struct SegmentDetail {
    pub segment: Segment,
    pub member_ids: Vec<Uuid>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: PromoError) -> ApiError {
    let (status, tag) = match &err {
        PromoError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
        PromoError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        PromoError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
        PromoError::Store(_) => (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };
    if status.is_server_error() {
        metrics::counter!("api.errors").increment(1);
    }
    (
        status,
        Json(ErrorResponse {
            error: tag.to_string(),
            message: err.to_string(),
        }),
    )
}

// ─── Segments ──────────────────────────────────────────────────────────────

/// POST /v1/segments — create a segment and materialize its membership.
#[utoipa::path(
    post,
    path = "/v1/segments",
    tag = "Segments",
    request_body = SegmentDraft,
    responses(
        (status = 201, description = "Segment created and reconciled", body = Segment),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
    )
)]
pub async fn create_segment(
    State(state): State<AppState>,
    Json(draft): Json<SegmentDraft>,
) -> Result<(StatusCode, Json<Segment>), ApiError> {
    match state.segments.create_segment(draft) {
        Ok(segment) => {
            metrics::counter!("api.segments.created").increment(1);
            Ok((StatusCode::CREATED, Json(segment)))
        }
        Err(err) => {
            warn!(error = %err, "Segment creation failed");
            Err(error_response(err))
        }
    }
}

/// GET /v1/segments — list all segments.
#[utoipa::path(
    get,
    path = "/v1/segments",
    tag = "Segments",
    responses((status = 200, description = "All segments", body = [Segment]))
)]
pub async fn list_segments(State(state): State<AppState>) -> Json<Vec<Segment>> {
    Json(state.segments.list_segments())
}

/// GET /v1/segments/:id — a segment with its member snapshot.
#[utoipa::path(
    get,
    path = "/v1/segments/{id}",
    tag = "Segments",
    params(("id" = Uuid, Path, description = "Segment id")),
    responses(
        (status = 200, description = "Segment with members", body = SegmentDetail),
        (status = 404, description = "Unknown segment", body = ErrorResponse),
    )
)]
pub async fn get_segment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SegmentDetail>, ApiError> {
    let segment = state.segments.get_segment(id).map_err(error_response)?;
    let member_ids = state
        .segments
        .members_of(id)
        .map_err(error_response)?
        .into_iter()
        .collect();
    Ok(Json(SegmentDetail {
        segment,
        member_ids,
    }))
}

/// PUT /v1/segments/:id — update the definition and re-reconcile.
#[utoipa::path(
    put,
    path = "/v1/segments/{id}",
    tag = "Segments",
    params(("id" = Uuid, Path, description = "Segment id")),
    request_body = SegmentDraft,
    responses(
        (status = 200, description = "Segment updated and reconciled", body = Segment),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
        (status = 404, description = "Unknown segment", body = ErrorResponse),
    )
)]
pub async fn update_segment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<SegmentDraft>,
) -> Result<Json<Segment>, ApiError> {
    match state.segments.update_segment(id, draft) {
        Ok(segment) => {
            metrics::counter!("api.segments.updated").increment(1);
            Ok(Json(segment))
        }
        Err(err) => Err(error_response(err)),
    }
}

/// DELETE /v1/segments/:id — cascades membership only, never campaigns.
#[utoipa::path(
    delete,
    path = "/v1/segments/{id}",
    tag = "Segments",
    params(("id" = Uuid, Path, description = "Segment id")),
    responses(
        (status = 204, description = "Segment and membership removed"),
        (status = 404, description = "Unknown segment", body = ErrorResponse),
    )
)]
pub async fn delete_segment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.segments.delete_segment(id).map_err(error_response)?;
    metrics::counter!("api.segments.deleted").increment(1);
    Ok(StatusCode::NO_CONTENT)
}

// ─── Campaigns ─────────────────────────────────────────────────────────────

/// POST /v1/campaigns — create a campaign, issuing vouchers when it
/// targets a segment.
#[utoipa::path(
    post,
    path = "/v1/campaigns",
    tag = "Campaigns",
    request_body = CampaignDraft,
    responses(
        (status = 201, description = "Campaign created", body = Campaign),
        (status = 400, description = "Invalid window", body = ErrorResponse),
        (status = 404, description = "Unknown target segment", body = ErrorResponse),
        (status = 409, description = "Voucher issuance conflict; retry", body = ErrorResponse),
    )
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(draft): Json<CampaignDraft>,
) -> Result<(StatusCode, Json<Campaign>), ApiError> {
    match state.campaigns.create_campaign(draft) {
        Ok(campaign) => {
            metrics::counter!("api.campaigns.created").increment(1);
            Ok((StatusCode::CREATED, Json(campaign)))
        }
        Err(err) => {
            warn!(error = %err, retryable = err.is_retryable(), "Campaign creation failed");
            Err(error_response(err))
        }
    }
}

/// GET /v1/campaigns — all campaigns with their vouchers.
#[utoipa::path(
    get,
    path = "/v1/campaigns",
    tag = "Campaigns",
    responses((status = 200, description = "All campaigns", body = [CampaignWithVouchers]))
)]
pub async fn list_campaigns(State(state): State<AppState>) -> Json<Vec<CampaignWithVouchers>> {
    Json(state.campaigns.list_campaigns())
}

/// GET /v1/campaigns/:id — a campaign with its vouchers.
#[utoipa::path(
    get,
    path = "/v1/campaigns/{id}",
    tag = "Campaigns",
    params(("id" = Uuid, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Campaign with vouchers", body = CampaignWithVouchers),
        (status = 404, description = "Unknown campaign", body = ErrorResponse),
    )
)]
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CampaignWithVouchers>, ApiError> {
    state
        .campaigns
        .get_campaign(id)
        .map(Json)
        .map_err(error_response)
}

/// DELETE /v1/campaigns/:id — removes the campaign and all its vouchers.
#[utoipa::path(
    delete,
    path = "/v1/campaigns/{id}",
    tag = "Campaigns",
    params(("id" = Uuid, Path, description = "Campaign id")),
    responses(
        (status = 204, description = "Campaign and vouchers removed"),
        (status = 404, description = "Unknown campaign", body = ErrorResponse),
    )
)]
pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.campaigns.delete_campaign(id).map_err(error_response)?;
    metrics::counter!("api.campaigns.deleted").increment(1);
    Ok(StatusCode::NO_CONTENT)
}

// ─── Operations ────────────────────────────────────────────────────────────

/// GET /health — health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service health", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — readiness probe.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses((status = 200, description = "Ready to accept traffic"))
)]
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /live — liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is live"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
