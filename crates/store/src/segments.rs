//! Segment rows.

use dashmap::DashMap;
use promo_core::types::Segment;
use uuid::Uuid;

pub struct SegmentStore {
    segments: DashMap<Uuid, Segment>,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self {
            segments: DashMap::new(),
        }
    }

    pub fn insert(&self, segment: Segment) {
        self.segments.insert(segment.id, segment);
    }

    pub fn get(&self, id: Uuid) -> Option<Segment> {
        self.segments.get(&id).map(|entry| entry.value().clone())
    }

    pub fn exists(&self, id: Uuid) -> bool {
        self.segments.contains_key(&id)
    }

    pub fn list(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = self.segments.iter().map(|r| r.value().clone()).collect();
        segments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        segments
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.segments.remove(&id).is_some()
    }
}

impl Default for SegmentStore {
    fn default() -> Self {
        Self::new()
    }
}
