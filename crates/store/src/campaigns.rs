//! Campaign rows and their vouchers, plus the unique voucher-code index.

use dashmap::DashMap;
use parking_lot::Mutex;
use promo_core::types::{Campaign, Voucher};
use promo_core::{PromoError, PromoResult};
use tracing::info;
use uuid::Uuid;

/// Campaigns and vouchers share one store because every multi-row write
/// spans both: a voucher batch commits against the code index as a unit,
/// and deleting a campaign sweeps its vouchers in the same operation.
pub struct CampaignStore {
    campaigns: DashMap<Uuid, Campaign>,
    vouchers: DashMap<Uuid, Voucher>,
    /// Unique index: code -> voucher id. Source of truth for global code
    /// uniqueness; the issuer's pre-draw check only reduces wasted work.
    codes: DashMap<String, Uuid>,
    /// Serializes multi-row writes so they commit all-or-nothing.
    write_lock: Mutex<()>,
}

impl CampaignStore {
    pub fn new() -> Self {
        Self {
            campaigns: DashMap::new(),
            vouchers: DashMap::new(),
            codes: DashMap::new(),
            write_lock: Mutex::new(()),
        }
    }

    // ─── Campaigns ─────────────────────────────────────────────────────────

    pub fn insert_campaign(&self, campaign: Campaign) {
        self.campaigns.insert(campaign.id, campaign);
    }

    pub fn get_campaign(&self, id: Uuid) -> Option<Campaign> {
        self.campaigns.get(&id).map(|entry| entry.value().clone())
    }

    pub fn list_campaigns(&self) -> Vec<Campaign> {
        let mut campaigns: Vec<Campaign> =
            self.campaigns.iter().map(|r| r.value().clone()).collect();
        campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        campaigns
    }

    /// Delete a campaign and every voucher that references it. Returns
    /// false when the campaign does not exist.
    pub fn remove_campaign_cascade(&self, id: Uuid) -> bool {
        let _guard = self.write_lock.lock();

        if self.campaigns.remove(&id).is_none() {
            return false;
        }

        let voucher_ids: Vec<Uuid> = self
            .vouchers
            .iter()
            .filter(|r| r.value().campaign_id == id)
            .map(|r| *r.key())
            .collect();
        for vid in &voucher_ids {
            if let Some((_, voucher)) = self.vouchers.remove(vid) {
                self.codes.remove(&voucher.code);
            }
        }

        info!(campaign_id = %id, vouchers = voucher_ids.len(), "Campaign deleted with its vouchers");
        true
    }

    // ─── Vouchers ──────────────────────────────────────────────────────────

    pub fn code_in_use(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    /// Persist a voucher batch as a unit. Every code must be unused; on
    /// any clash nothing is written and the caller gets a retryable
    /// conflict.
    pub fn insert_vouchers(&self, batch: &[Voucher]) -> PromoResult<()> {
        let _guard = self.write_lock.lock();

        for voucher in batch {
            if self.codes.contains_key(&voucher.code) {
                return Err(PromoError::Conflict(format!(
                    "voucher code {} already exists",
                    voucher.code
                )));
            }
        }

        for voucher in batch {
            self.codes.insert(voucher.code.clone(), voucher.id);
            self.vouchers.insert(voucher.id, voucher.clone());
        }
        Ok(())
    }

    pub fn vouchers_for_campaign(&self, campaign_id: Uuid) -> Vec<Voucher> {
        let mut vouchers: Vec<Voucher> = self
            .vouchers
            .iter()
            .filter(|r| r.value().campaign_id == campaign_id)
            .map(|r| r.value().clone())
            .collect();
        vouchers.sort_by(|a, b| a.code.cmp(&b.code));
        vouchers
    }

    pub fn voucher_count(&self) -> usize {
        self.vouchers.len()
    }
}

impl Default for CampaignStore {
    fn default() -> Self {
        Self::new()
    }
}
