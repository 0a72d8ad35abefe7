//! Filter builder — fluent API for constructing segment filters.

use chrono::{DateTime, Utc};
use promo_core::filter::{RecencyOption, RecencyRule, SegmentFilter};

pub struct SegmentFilterBuilder {
    filter: SegmentFilter,
}

impl SegmentFilterBuilder {
    pub fn new() -> Self {
        Self {
            filter: SegmentFilter::default(),
        }
    }

    pub fn min_spend(mut self, value: f64) -> Self {
        self.filter.min_spend = Some(value);
        self
    }

    pub fn max_spend(mut self, value: f64) -> Self {
        self.filter.max_spend = Some(value);
        self
    }

    pub fn joined_before(mut self, cutoff: DateTime<Utc>) -> Self {
        self.filter.joined_before = Some(cutoff);
        self
    }

    pub fn card_type(mut self, card: impl Into<String>) -> Self {
        self.filter.card_type = Some(card.into());
        self
    }

    /// Customers whose last login is at or after the threshold.
    pub fn active_since(mut self, threshold: DateTime<Utc>) -> Self {
        self.filter.last_login = Some(RecencyRule {
            option: RecencyOption::Active,
            threshold,
        });
        self
    }

    /// Customers whose last login is at or before the threshold.
    pub fn inactive_since(mut self, threshold: DateTime<Utc>) -> Self {
        self.filter.last_login = Some(RecencyRule {
            option: RecencyOption::Inactive,
            threshold,
        });
        self
    }

    pub fn build(self) -> SegmentFilter {
        self.filter.normalized()
    }
}

impl Default for SegmentFilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
