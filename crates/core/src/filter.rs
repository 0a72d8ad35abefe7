//! Segment filter — the declarative criteria that define an audience.
//!
//! A filter is a conjunction of independently-optional predicates. It is a
//! plain value object evaluated by a pure function, so matching is testable
//! without a live customer directory. A filter with zero active predicates
//! matches no one; "no conditions" is an empty audience, not "everyone".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::Customer;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SegmentFilter {
    /// Inclusive lower bound on cumulative spend.
    #[serde(default)]
    pub min_spend: Option<f64>,
    /// Inclusive upper bound on cumulative spend.
    #[serde(default)]
    pub max_spend: Option<f64>,
    /// Inclusive upper bound on the join timestamp.
    #[serde(default)]
    pub joined_before: Option<DateTime<Utc>>,
    /// Exact card-category match.
    #[serde(default)]
    pub card_type: Option<String>,
    /// Login-recency rule; only present when both halves were supplied.
    #[serde(default)]
    pub last_login: Option<RecencyRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecencyRule {
    pub option: RecencyOption,
    pub threshold: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecencyOption {
    /// last_login >= threshold
    Active,
    /// last_login <= threshold
    Inactive,
}

impl SegmentFilter {
    /// Drop spend bounds that are not finite numbers. A NaN bound is an
    /// absent predicate, never "spend >= 0".
    pub fn normalized(mut self) -> Self {
        self.min_spend = self.min_spend.filter(|v| v.is_finite());
        self.max_spend = self.max_spend.filter(|v| v.is_finite());
        self
    }

    /// True when no predicate is active. Such a filter matches no one.
    pub fn is_empty(&self) -> bool {
        self.min_spend.is_none()
            && self.max_spend.is_none()
            && self.joined_before.is_none()
            && self.card_type.is_none()
            && self.last_login.is_none()
    }

    /// Reject contradictory or out-of-domain bounds. Call after
    /// [`SegmentFilter::normalized`].
    pub fn validate(&self) -> Result<(), String> {
        if let Some(min) = self.min_spend {
            if min < 0.0 {
                return Err("min_spend must be non-negative".into());
            }
        }
        if let Some(max) = self.max_spend {
            if max < 0.0 {
                return Err("max_spend must be non-negative".into());
            }
        }
        if let (Some(min), Some(max)) = (self.min_spend, self.max_spend) {
            if min > max {
                return Err("min_spend exceeds max_spend".into());
            }
        }
        Ok(())
    }

    /// Evaluate the conjunction against a single customer. Absent
    /// predicates impose no constraint; an empty filter matches no one.
    pub fn matches(&self, customer: &Customer) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(min) = self.min_spend {
            if customer.total_spend < min {
                return false;
            }
        }
        if let Some(max) = self.max_spend {
            if customer.total_spend > max {
                return false;
            }
        }
        if let Some(joined_before) = self.joined_before {
            if customer.date_joined > joined_before {
                return false;
            }
        }
        if let Some(card_type) = &self.card_type {
            if customer.credit_card_type.as_deref() != Some(card_type.as_str()) {
                return false;
            }
        }
        if let Some(rule) = self.last_login {
            // A customer who never logged in satisfies neither direction.
            let Some(last_login) = customer.last_login else {
                return false;
            };
            let ok = match rule.option {
                RecencyOption::Active => last_login >= rule.threshold,
                RecencyOption::Inactive => last_login <= rule.threshold,
            };
            if !ok {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn customer(spend: f64, card: Option<&str>) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            email: "jane@example.com".into(),
            name: "Jane".into(),
            date_joined: Utc.with_ymd_and_hms(2022, 6, 1, 0, 0, 0).unwrap(),
            total_spend: spend,
            last_login: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            credit_card_type: card.map(String::from),
        }
    }

    #[test]
    fn test_empty_filter_matches_no_one() {
        let filter = SegmentFilter::default();
        assert!(filter.is_empty());
        assert!(!filter.matches(&customer(1000.0, Some("visa"))));
    }

    #[test]
    fn test_nan_bound_is_absent() {
        let filter = SegmentFilter {
            min_spend: Some(f64::NAN),
            ..Default::default()
        }
        .normalized();
        assert!(filter.min_spend.is_none());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_spend_and_card_conjunction() {
        // min_spend 100 AND card visa: only the high-spend visa holder.
        let filter = SegmentFilter {
            min_spend: Some(100.0),
            card_type: Some("visa".into()),
            ..Default::default()
        };

        let a = customer(150.0, Some("visa"));
        let b = customer(50.0, Some("visa"));
        let c = customer(200.0, Some("mastercard"));

        assert!(filter.matches(&a));
        assert!(!filter.matches(&b));
        assert!(!filter.matches(&c));
    }

    #[test]
    fn test_spend_bounds_inclusive() {
        let filter = SegmentFilter {
            min_spend: Some(100.0),
            max_spend: Some(200.0),
            ..Default::default()
        };
        assert!(filter.matches(&customer(100.0, None)));
        assert!(filter.matches(&customer(200.0, None)));
        assert!(!filter.matches(&customer(99.99, None)));
        assert!(!filter.matches(&customer(200.01, None)));
    }

    #[test]
    fn test_joined_before_inclusive() {
        let cutoff = Utc.with_ymd_and_hms(2022, 6, 1, 0, 0, 0).unwrap();
        let filter = SegmentFilter {
            joined_before: Some(cutoff),
            ..Default::default()
        };
        // Customer joined exactly at the cutoff.
        assert!(filter.matches(&customer(10.0, None)));

        let late = SegmentFilter {
            joined_before: Some(cutoff - chrono::Duration::days(1)),
            ..Default::default()
        };
        assert!(!late.matches(&customer(10.0, None)));
    }

    #[test]
    fn test_recency_directions() {
        let threshold = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let active = SegmentFilter {
            last_login: Some(RecencyRule {
                option: RecencyOption::Active,
                threshold,
            }),
            ..Default::default()
        };
        let inactive = SegmentFilter {
            last_login: Some(RecencyRule {
                option: RecencyOption::Inactive,
                threshold,
            }),
            ..Default::default()
        };

        // Last login 2024-03-01 is after the threshold.
        let c = customer(0.0, None);
        assert!(active.matches(&c));
        assert!(!inactive.matches(&c));

        let mut never = customer(0.0, None);
        never.last_login = None;
        assert!(!active.matches(&never));
        assert!(!inactive.matches(&never));
    }

    #[test]
    fn test_validate_rejects_contradiction() {
        let filter = SegmentFilter {
            min_spend: Some(500.0),
            max_spend: Some(100.0),
            ..Default::default()
        };
        assert!(filter.validate().is_err());

        let negative = SegmentFilter {
            min_spend: Some(-1.0),
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }
}
