//! Request and response models for the management operations.

use chrono::{DateTime, Utc};
use promo_core::filter::{RecencyOption, RecencyRule, SegmentFilter};
use promo_core::types::{Campaign, DiscountKind, Voucher};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Payload for creating or updating a segment. Filter fields arrive flat,
/// as the administrator form submits them.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SegmentDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub min_spend: Option<f64>,
    #[serde(default)]
    pub max_spend: Option<f64>,
    #[serde(default)]
    pub joined_before: Option<DateTime<Utc>>,
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub last_login_option: Option<RecencyOption>,
    #[serde(default)]
    pub last_login_threshold: Option<DateTime<Utc>>,
}

impl SegmentDraft {
    /// Assemble the filter value object. The recency rule takes effect
    /// only when both the option and the threshold were supplied; spend
    /// bounds are normalized so a non-finite number reads as absent.
    pub fn filter(&self) -> SegmentFilter {
        SegmentFilter {
            min_spend: self.min_spend,
            max_spend: self.max_spend,
            joined_before: self.joined_before,
            card_type: self.card_type.clone(),
            last_login: match (self.last_login_option, self.last_login_threshold) {
                (Some(option), Some(threshold)) => Some(RecencyRule { option, threshold }),
                _ => None,
            },
        }
        .normalized()
    }
}

/// Payload for creating a campaign.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CampaignDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub target_segment_id: Option<Uuid>,
    pub discount_kind: DiscountKind,
    pub discount_value: f64,
    #[serde(default)]
    pub max_usage_limit: Option<u32>,
    #[serde(default)]
    pub min_cart_value: Option<f64>,
}

/// A campaign together with every voucher issued for it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CampaignWithVouchers {
    pub campaign: Campaign,
    pub vouchers: Vec<Voucher>,
}
