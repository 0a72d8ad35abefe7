//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PromoHub API",
        version = "0.1.0",
        description = "Audience segmentation and voucher campaign management.\n\nSegments are filter-defined customer groups; campaigns targeting a segment issue one voucher per member at creation time.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Segments", description = "Filter-defined audience segments and their membership"),
        (name = "Campaigns", description = "Promotional campaigns and issued vouchers"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Segments
        crate::rest::create_segment,
        crate::rest::list_segments,
        crate::rest::get_segment,
        crate::rest::update_segment,
        crate::rest::delete_segment,
        // Campaigns
        crate::rest::create_campaign,
        crate::rest::list_campaigns,
        crate::rest::get_campaign,
        crate::rest::delete_campaign,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Domain types
        promo_core::types::Customer,
        promo_core::types::Segment,
        promo_core::types::Campaign,
        promo_core::types::CampaignWindow,
        promo_core::types::DiscountKind,
        promo_core::types::Voucher,
        promo_core::filter::SegmentFilter,
        promo_core::filter::RecencyRule,
        promo_core::filter::RecencyOption,
        // Request/response types
        promo_management::models::SegmentDraft,
        promo_management::models::CampaignDraft,
        promo_management::models::CampaignWithVouchers,
        crate::rest::SegmentDetail,
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
