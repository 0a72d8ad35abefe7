//! Segment matcher — resolves a filter to the set of matching customers.

use std::collections::BTreeSet;
use std::sync::Arc;

use promo_core::filter::SegmentFilter;
use promo_core::PromoResult;
use promo_store::CustomerStore;
use uuid::Uuid;

/// Evaluates a segment filter against the customer directory. Read-only;
/// directory failures propagate unchanged — retry policy belongs to the
/// caller.
pub struct SegmentMatcher {
    customers: Arc<dyn CustomerStore>,
}

impl SegmentMatcher {
    pub fn new(customers: Arc<dyn CustomerStore>) -> Self {
        Self { customers }
    }

    /// Ids of every customer the filter currently matches. A filter with
    /// zero active predicates resolves to the empty set without querying
    /// the directory at all.
    pub fn match_members(&self, filter: &SegmentFilter) -> PromoResult<BTreeSet<Uuid>> {
        if filter.is_empty() {
            return Ok(BTreeSet::new());
        }
        self.customers.find_matching(filter)
    }
}
