//! Campaign orchestration — creation with one-shot voucher issuance,
//! lookup with vouchers, cascading deletion.

use std::sync::Arc;

use chrono::Utc;
use promo_core::types::Campaign;
use promo_core::{PromoError, PromoResult};
use promo_store::{CampaignStore, MembershipStore, SegmentStore};
use promo_vouchers::VoucherIssuer;
use tracing::info;
use uuid::Uuid;

use crate::models::{CampaignDraft, CampaignWithVouchers};

pub struct CampaignOrchestrator {
    campaigns: Arc<CampaignStore>,
    segments: Arc<SegmentStore>,
    memberships: Arc<MembershipStore>,
    issuer: VoucherIssuer,
}

impl CampaignOrchestrator {
    pub fn new(
        campaigns: Arc<CampaignStore>,
        segments: Arc<SegmentStore>,
        memberships: Arc<MembershipStore>,
        issuer: VoucherIssuer,
    ) -> Self {
        Self {
            campaigns,
            segments,
            memberships,
            issuer,
        }
    }

    /// Create a campaign. When a target segment is named, the current
    /// membership snapshot gets one voucher per member; the campaign row
    /// and the voucher batch commit as one unit, so an issuance failure
    /// leaves no campaign behind.
    pub fn create_campaign(&self, draft: CampaignDraft) -> PromoResult<Campaign> {
        if draft.end_date < draft.start_date {
            return Err(PromoError::Validation(
                "end_date precedes start_date".into(),
            ));
        }
        if let Some(target) = draft.target_segment_id {
            if !self.segments.exists(target) {
                return Err(PromoError::not_found("segment", target));
            }
        }

        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            target_segment_id: draft.target_segment_id,
            discount_kind: draft.discount_kind,
            discount_value: draft.discount_value,
            max_usage_limit: draft.max_usage_limit,
            min_cart_value: draft.min_cart_value,
            created_at: Utc::now(),
        };
        self.campaigns.insert_campaign(campaign.clone());

        if let Some(target) = campaign.target_segment_id {
            // Snapshot taken now; later membership changes never issue or
            // revoke vouchers for this campaign.
            let snapshot = self.memberships.members_of(target);
            if let Err(err) = self.issuer.issue(campaign.id, campaign.window(), &snapshot) {
                self.campaigns.remove_campaign_cascade(campaign.id);
                return Err(err);
            }
            info!(
                campaign_id = %campaign.id,
                segment_id = %target,
                members = snapshot.len(),
                "Campaign created with vouchers"
            );
        } else {
            info!(campaign_id = %campaign.id, "Campaign created without target segment");
        }

        Ok(campaign)
    }

    pub fn get_campaign(&self, id: Uuid) -> PromoResult<CampaignWithVouchers> {
        let campaign = self
            .campaigns
            .get_campaign(id)
            .ok_or_else(|| PromoError::not_found("campaign", id))?;
        Ok(CampaignWithVouchers {
            vouchers: self.campaigns.vouchers_for_campaign(id),
            campaign,
        })
    }

    pub fn list_campaigns(&self) -> Vec<CampaignWithVouchers> {
        self.campaigns
            .list_campaigns()
            .into_iter()
            .map(|campaign| CampaignWithVouchers {
                vouchers: self.campaigns.vouchers_for_campaign(campaign.id),
                campaign,
            })
            .collect()
    }

    /// Delete a campaign and all of its vouchers.
    pub fn delete_campaign(&self, id: Uuid) -> PromoResult<()> {
        if !self.campaigns.remove_campaign_cascade(id) {
            return Err(PromoError::not_found("campaign", id));
        }
        Ok(())
    }
}
