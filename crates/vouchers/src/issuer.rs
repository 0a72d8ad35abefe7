//! Voucher issuer — one voucher per member of a campaign's target snapshot.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::Utc;
use promo_core::config::VoucherConfig;
use promo_core::types::{CampaignWindow, Voucher};
use promo_core::{PromoError, PromoResult};
use promo_store::CampaignStore;
use tracing::info;
use uuid::Uuid;

use crate::codes;

/// Issues the voucher batch for a freshly created campaign. Invoked once
/// per campaign lifecycle; later membership changes never re-trigger it.
pub struct VoucherIssuer {
    store: Arc<CampaignStore>,
    code_length: usize,
    max_code_attempts: usize,
}

impl VoucherIssuer {
    pub fn new(store: Arc<CampaignStore>) -> Self {
        Self::with_config(store, &VoucherConfig::default())
    }

    pub fn with_config(store: Arc<CampaignStore>, config: &VoucherConfig) -> Self {
        Self {
            store,
            code_length: config.code_length,
            max_code_attempts: config.max_code_attempts,
        }
    }

    /// Create one voucher per member, validity window copied from the
    /// campaign, usage counter zero. The batch commits all-or-nothing:
    /// a code-space exhaustion or store clash fails the whole issuance
    /// with a retryable error and persists nothing.
    pub fn issue(
        &self,
        campaign_id: Uuid,
        window: CampaignWindow,
        members: &BTreeSet<Uuid>,
    ) -> PromoResult<Vec<Voucher>> {
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut drawn: HashSet<String> = HashSet::with_capacity(members.len());
        let mut batch = Vec::with_capacity(members.len());

        for &customer_id in members {
            let code = self.draw_unused_code(&mut drawn)?;
            batch.push(Voucher {
                id: Uuid::new_v4(),
                code,
                campaign_id,
                customer_id,
                start_date: window.start_date,
                expiry_date: window.end_date,
                usage_count: 0,
                created_at: now,
            });
        }

        // The unique code index is the source of truth; the draw loop
        // above only cuts down wasted attempts.
        self.store.insert_vouchers(&batch)?;

        info!(campaign_id = %campaign_id, vouchers = batch.len(), "Vouchers issued");
        Ok(batch)
    }

    fn draw_unused_code(&self, drawn: &mut HashSet<String>) -> PromoResult<String> {
        for _ in 0..self.max_code_attempts {
            let code = codes::generate_code(self.code_length);
            if !drawn.contains(&code) && !self.store.code_in_use(&code) {
                drawn.insert(code.clone());
                return Ok(code);
            }
        }
        Err(PromoError::Conflict(format!(
            "voucher code generation exhausted {} attempts",
            self.max_code_attempts
        )))
    }
}
