use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A customer record in the directory. Identity is immutable; spend,
/// login recency, and card category mutate externally over time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub date_joined: DateTime<Utc>,
    /// Cumulative spend, non-negative.
    pub total_spend: f64,
    /// None means the customer has never logged in.
    pub last_login: Option<DateTime<Utc>>,
    pub credit_card_type: Option<String>,
}

/// A named, filter-defined audience segment. The filter owns the
/// membership edge set; every filter change regenerates it in full.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Segment {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub filter: crate::filter::SegmentFilter,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A time-bounded promotion, optionally targeting a segment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub target_segment_id: Option<Uuid>,
    pub discount_kind: DiscountKind,
    pub discount_value: f64,
    pub max_usage_limit: Option<u32>,
    pub min_cart_value: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    FixedAmount,
}

impl Campaign {
    /// Activity is derived from the clock, never stored.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }

    pub fn window(&self) -> CampaignWindow {
        CampaignWindow {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Validity window copied onto every voucher at issuance time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct CampaignWindow {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A uniquely-coded, per-customer discount instrument.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Voucher {
    pub id: Uuid,
    /// Globally unique across all vouchers, not just within a campaign.
    pub code: String,
    pub campaign_id: Uuid,
    pub customer_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    /// Incremented by redemption, which lives outside this service.
    pub usage_count: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_campaign_activity_is_derived() {
        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: "January promo".into(),
            description: None,
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
            target_segment_id: None,
            discount_kind: DiscountKind::Percentage,
            discount_value: 15.0,
            max_usage_limit: Some(1),
            min_cart_value: None,
            created_at: Utc::now(),
        };

        let before = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
        let during = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        assert!(!campaign.is_active(before));
        assert!(campaign.is_active(during));
        // Bounds are inclusive.
        assert!(campaign.is_active(campaign.start_date));
        assert!(campaign.is_active(campaign.end_date));
        assert!(!campaign.is_active(after));
    }
}
