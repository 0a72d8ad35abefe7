//! Voucher issuance — collision-free code generation and one-shot batch
//! issuance for campaigns that target a segment.

pub mod codes;
pub mod issuer;

pub use issuer::VoucherIssuer;
