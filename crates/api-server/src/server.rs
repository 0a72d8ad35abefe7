//! API server — HTTP router, middleware, and metrics exporter.

use crate::rest::{self, AppState};
use crate::swagger::ApiDoc;
use axum::routing::{delete, get, post, put};
use axum::Router;
use promo_core::config::AppConfig;
use promo_management::{CampaignOrchestrator, SegmentService};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub struct ApiServer {
    config: AppConfig,
    segments: Arc<SegmentService>,
    campaigns: Arc<CampaignOrchestrator>,
}

impl ApiServer {
    pub fn new(
        config: AppConfig,
        segments: Arc<SegmentService>,
        campaigns: Arc<CampaignOrchestrator>,
    ) -> Self {
        Self {
            config,
            segments,
            campaigns,
        }
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            segments: self.segments.clone(),
            campaigns: self.campaigns.clone(),
            node_id: self.config.node_id.clone(),
            start_time: Instant::now(),
        };

        Router::new()
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
            // Segments
            .route("/v1/segments", post(rest::create_segment))
            .route("/v1/segments", get(rest::list_segments))
            .route("/v1/segments/:id", get(rest::get_segment))
            .route("/v1/segments/:id", put(rest::update_segment))
            .route("/v1/segments/:id", delete(rest::delete_segment))
            // Campaigns
            .route("/v1/campaigns", post(rest::create_campaign))
            .route("/v1/campaigns", get(rest::list_campaigns))
            .route("/v1/campaigns/:id", get(rest::get_campaign))
            .route("/v1/campaigns/:id", delete(rest::delete_campaign))
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the HTTP server; runs until the process exits.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);
        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    /// Start the Prometheus exporter on its own port. Must run inside
    /// the Tokio runtime; the exporter spawns its own listener task.
    pub fn start_metrics(&self) -> anyhow::Result<()> {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}
