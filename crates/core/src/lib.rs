pub mod config;
pub mod error;
pub mod filter;
pub mod types;

pub use config::AppConfig;
pub use error::{PromoError, PromoResult};
pub use filter::{RecencyOption, RecencyRule, SegmentFilter};
