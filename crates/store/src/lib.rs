//! In-memory stores backed by DashMap.
//!
//! Production: replace with PostgreSQL (sqlx) or similar ACID store.
//! These provide the same API surface — including the multi-row write
//! atomicity the reconciler and issuer rely on — for development and
//! testing.

pub mod campaigns;
pub mod customers;
pub mod memberships;
pub mod segments;

pub use campaigns::CampaignStore;
pub use customers::{CustomerStore, InMemoryCustomers};
pub use memberships::MembershipStore;
pub use segments::SegmentStore;
