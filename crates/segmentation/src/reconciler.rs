//! Membership reconciliation — full replace of a segment's edge set.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use promo_core::filter::SegmentFilter;
use promo_core::PromoResult;
use promo_store::MembershipStore;
use tracing::info;
use uuid::Uuid;

use crate::matcher::SegmentMatcher;

/// Owns the segment → member edge set. On every filter change the whole
/// set is recomputed and swapped in one write; there is no incremental
/// diffing and no partial state. Runs serialized per segment id; distinct
/// segments reconcile independently.
pub struct MembershipReconciler {
    matcher: SegmentMatcher,
    memberships: Arc<MembershipStore>,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl MembershipReconciler {
    pub fn new(matcher: SegmentMatcher, memberships: Arc<MembershipStore>) -> Self {
        Self {
            matcher,
            memberships,
            locks: DashMap::new(),
        }
    }

    /// Recompute and replace the member set for a segment, returning the
    /// new member count. The directory read happens before any write, so
    /// a failed match leaves the previous edge set untouched.
    pub fn reconcile(&self, segment_id: Uuid, filter: &SegmentFilter) -> PromoResult<usize> {
        let lock = self
            .locks
            .entry(segment_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock();

        let members = self.matcher.match_members(filter)?;
        let count = self.memberships.replace_members(segment_id, members);

        info!(segment_id = %segment_id, members = count, "Segment membership reconciled");
        Ok(count)
    }
}
