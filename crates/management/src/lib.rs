//! Management services — the segment and campaign operations the API
//! layer invokes with already-deserialized request structs.

pub mod campaigns;
pub mod models;
pub mod segments;

pub use campaigns::CampaignOrchestrator;
pub use models::{CampaignDraft, CampaignWithVouchers, SegmentDraft};
pub use segments::SegmentService;
