//! Segment lifecycle — create/update with synchronous reconciliation,
//! deletion cascading membership only.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use promo_core::types::Segment;
use promo_core::{PromoError, PromoResult};
use promo_segmentation::MembershipReconciler;
use promo_store::{MembershipStore, SegmentStore};
use tracing::info;
use uuid::Uuid;

use crate::models::SegmentDraft;

pub struct SegmentService {
    segments: Arc<SegmentStore>,
    memberships: Arc<MembershipStore>,
    reconciler: Arc<MembershipReconciler>,
}

impl SegmentService {
    pub fn new(
        segments: Arc<SegmentStore>,
        memberships: Arc<MembershipStore>,
        reconciler: Arc<MembershipReconciler>,
    ) -> Self {
        Self {
            segments,
            memberships,
            reconciler,
        }
    }

    /// Create a segment and materialize its membership. A reconciliation
    /// failure rolls the new row back so no half-created segment remains.
    pub fn create_segment(&self, draft: SegmentDraft) -> PromoResult<Segment> {
        let filter = draft.filter();
        filter.validate().map_err(PromoError::Validation)?;

        let now = Utc::now();
        let segment = Segment {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            filter: filter.clone(),
            created_at: now,
            updated_at: now,
        };
        self.segments.insert(segment.clone());

        match self.reconciler.reconcile(segment.id, &filter) {
            Ok(members) => {
                info!(segment_id = %segment.id, members, "Segment created");
                Ok(segment)
            }
            Err(err) => {
                self.segments.remove(segment.id);
                self.memberships.remove_segment(segment.id);
                Err(err)
            }
        }
    }

    /// Update a segment's definition and re-reconcile. The updated row
    /// stays committed even if reconciliation fails; the caller retries
    /// with another update.
    pub fn update_segment(&self, id: Uuid, draft: SegmentDraft) -> PromoResult<Segment> {
        let filter = draft.filter();
        filter.validate().map_err(PromoError::Validation)?;

        let existing = self
            .segments
            .get(id)
            .ok_or_else(|| PromoError::not_found("segment", id))?;

        let segment = Segment {
            id,
            name: draft.name,
            description: draft.description,
            filter: filter.clone(),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.segments.insert(segment.clone());

        let members = self.reconciler.reconcile(id, &filter)?;
        info!(segment_id = %id, members, "Segment updated");
        Ok(segment)
    }

    pub fn get_segment(&self, id: Uuid) -> PromoResult<Segment> {
        self.segments
            .get(id)
            .ok_or_else(|| PromoError::not_found("segment", id))
    }

    pub fn list_segments(&self) -> Vec<Segment> {
        self.segments.list()
    }

    /// Current membership snapshot for a segment.
    pub fn members_of(&self, id: Uuid) -> PromoResult<BTreeSet<Uuid>> {
        if !self.segments.exists(id) {
            return Err(PromoError::not_found("segment", id));
        }
        Ok(self.memberships.members_of(id))
    }

    /// Delete a segment and its membership edges. Campaigns that target
    /// the segment are untouched; they keep their issued vouchers and
    /// simply can no longer issue new ones.
    pub fn delete_segment(&self, id: Uuid) -> PromoResult<()> {
        if !self.segments.remove(id) {
            return Err(PromoError::not_found("segment", id));
        }
        self.memberships.remove_segment(id);
        info!(segment_id = %id, "Segment deleted");
        Ok(())
    }
}
