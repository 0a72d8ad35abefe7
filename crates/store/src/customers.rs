//! Customer directory — the external population the segmenter queries.

use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use promo_core::filter::SegmentFilter;
use promo_core::types::Customer;
use promo_core::PromoResult;
use tracing::info;
use uuid::Uuid;

/// Read-only query seam over the customer population. The matcher talks
/// to this trait only; implementations translate the predicate conjunction
/// into their native query language and surface transport failures as
/// `PromoError::Store`.
pub trait CustomerStore: Send + Sync {
    /// Ids of every customer satisfying the filter conjunction.
    fn find_matching(&self, filter: &SegmentFilter) -> PromoResult<BTreeSet<Uuid>>;

    fn get(&self, id: Uuid) -> PromoResult<Option<Customer>>;
}

/// DashMap-backed directory for development and tests.
pub struct InMemoryCustomers {
    customers: DashMap<Uuid, Customer>,
}

impl InMemoryCustomers {
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
        }
    }

    /// Directory pre-populated with demo records for the dev server.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        store.seed_demo_data();
        store
    }

    pub fn upsert(&self, customer: Customer) {
        self.customers.insert(customer.id, customer);
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    fn seed_demo_data(&self) {
        let now = Utc::now();

        let customers = vec![
            ("ava.martin@example.com", "Ava Martin", 820, 2150.0, Some(3), Some("visa")),
            ("liam.chen@example.com", "Liam Chen", 640, 430.5, Some(12), Some("mastercard")),
            ("sofia.rossi@example.com", "Sofia Rossi", 410, 75.0, Some(95), Some("visa")),
            ("noah.patel@example.com", "Noah Patel", 230, 1310.0, Some(1), Some("amex")),
            ("emma.schmidt@example.com", "Emma Schmidt", 180, 0.0, None, None),
            ("lucas.silva@example.com", "Lucas Silva", 150, 267.8, Some(40), Some("visa")),
            ("mia.kim@example.com", "Mia Kim", 90, 5400.0, Some(7), Some("mastercard")),
            ("oliver.brown@example.com", "Oliver Brown", 30, 19.99, Some(2), None),
        ];

        for (email, name, joined_days_ago, spend, login_days_ago, card) in customers {
            let id = Uuid::new_v4();
            self.customers.insert(
                id,
                Customer {
                    id,
                    email: email.to_string(),
                    name: name.to_string(),
                    date_joined: now - Duration::days(joined_days_ago),
                    total_spend: spend,
                    last_login: login_days_ago.map(|d| now - Duration::days(d)),
                    credit_card_type: card.map(String::from),
                },
            );
        }

        info!(customers = self.customers.len(), "Customer directory seeded (demo mode)");
    }
}

impl Default for InMemoryCustomers {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerStore for InMemoryCustomers {
    fn find_matching(&self, filter: &SegmentFilter) -> PromoResult<BTreeSet<Uuid>> {
        Ok(self
            .customers
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| *entry.key())
            .collect())
    }

    fn get(&self, id: Uuid) -> PromoResult<Option<Customer>> {
        Ok(self.customers.get(&id).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_matching_applies_conjunction() {
        let store = InMemoryCustomers::new();
        let now = Utc::now();

        let mut wanted = None;
        for (spend, card) in [(150.0, Some("visa")), (50.0, Some("visa")), (200.0, Some("mastercard"))] {
            let id = Uuid::new_v4();
            store.upsert(Customer {
                id,
                email: format!("c-{id}@example.com"),
                name: "Customer".into(),
                date_joined: now - Duration::days(30),
                total_spend: spend,
                last_login: Some(now),
                credit_card_type: card.map(String::from),
            });
            if spend == 150.0 {
                wanted = Some(id);
            }
        }

        let filter = SegmentFilter {
            min_spend: Some(100.0),
            card_type: Some("visa".into()),
            ..Default::default()
        };
        let matched = store.find_matching(&filter).unwrap();
        assert_eq!(matched.len(), 1);
        assert!(matched.contains(&wanted.unwrap()));
    }

    #[test]
    fn test_demo_seed_is_nonempty() {
        let store = InMemoryCustomers::with_demo_data();
        assert!(!store.is_empty());
    }
}
