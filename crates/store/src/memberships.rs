//! Membership edges — which customers currently belong to which segment.

use std::collections::BTreeSet;

use dashmap::DashMap;
use uuid::Uuid;

/// Edge set keyed by segment. The whole set for a segment is written in
/// one keyed operation, so a replace is all-or-nothing: readers observe
/// either the previous member set or the new one, never a half-deleted
/// state.
pub struct MembershipStore {
    edges: DashMap<Uuid, BTreeSet<Uuid>>,
}

impl MembershipStore {
    pub fn new() -> Self {
        Self {
            edges: DashMap::new(),
        }
    }

    /// Replace the full edge set for a segment, returning the new size.
    pub fn replace_members(&self, segment_id: Uuid, members: BTreeSet<Uuid>) -> usize {
        let count = members.len();
        self.edges.insert(segment_id, members);
        count
    }

    /// Current member snapshot for a segment; empty when unknown.
    pub fn members_of(&self, segment_id: Uuid) -> BTreeSet<Uuid> {
        self.edges
            .get(&segment_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn member_count(&self, segment_id: Uuid) -> usize {
        self.edges
            .get(&segment_id)
            .map(|entry| entry.value().len())
            .unwrap_or(0)
    }

    pub fn contains(&self, segment_id: Uuid, customer_id: Uuid) -> bool {
        self.edges
            .get(&segment_id)
            .map(|entry| entry.value().contains(&customer_id))
            .unwrap_or(false)
    }

    /// Cascade target for segment deletion.
    pub fn remove_segment(&self, segment_id: Uuid) {
        self.edges.remove(&segment_id);
    }
}

impl Default for MembershipStore {
    fn default() -> Self {
        Self::new()
    }
}
