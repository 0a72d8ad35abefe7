//! Audience segmentation — filter matching against the customer directory
//! and full-replace membership reconciliation.

pub mod builder;
pub mod matcher;
pub mod reconciler;

pub use builder::SegmentFilterBuilder;
pub use matcher::SegmentMatcher;
pub use reconciler::MembershipReconciler;
