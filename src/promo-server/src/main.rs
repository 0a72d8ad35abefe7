//! PromoHub — audience segmentation and voucher campaign service.
//!
//! Main entry point that wires the stores and services and starts the
//! HTTP server.

use clap::Parser;
use promo_api::ApiServer;
use promo_core::config::AppConfig;
use promo_management::{CampaignOrchestrator, SegmentService};
use promo_segmentation::{MembershipReconciler, SegmentMatcher};
use promo_store::{CampaignStore, CustomerStore, InMemoryCustomers, MembershipStore, SegmentStore};
use promo_vouchers::VoucherIssuer;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "promo-server")]
#[command(about = "Audience segmentation and voucher campaign service")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "PROMOHUB__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "PROMOHUB__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Seed the customer directory with demo records
    #[arg(long, default_value_t = false)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promo_server=info,promo_api=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("PromoHub starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if cli.seed_demo {
        config.store.seed_demo_data = true;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        seed_demo = config.store.seed_demo_data,
        "Configuration loaded"
    );

    // Stores
    let directory: Arc<dyn CustomerStore> = if config.store.seed_demo_data {
        Arc::new(InMemoryCustomers::with_demo_data())
    } else {
        Arc::new(InMemoryCustomers::new())
    };
    let segments = Arc::new(SegmentStore::new());
    let memberships = Arc::new(MembershipStore::new());
    let campaigns = Arc::new(CampaignStore::new());

    // Services
    let reconciler = Arc::new(MembershipReconciler::new(
        SegmentMatcher::new(directory),
        memberships.clone(),
    ));
    let segment_service = Arc::new(SegmentService::new(
        segments.clone(),
        memberships.clone(),
        reconciler,
    ));
    let orchestrator = Arc::new(CampaignOrchestrator::new(
        campaigns.clone(),
        segments,
        memberships,
        VoucherIssuer::with_config(campaigns, &config.vouchers),
    ));

    let server = ApiServer::new(config, segment_service, orchestrator);

    if let Err(e) = server.start_metrics() {
        warn!(error = %e, "Metrics exporter failed to start, continuing without it");
    }

    server.start_http().await
}
