//! REST surface for segment and campaign management.

pub mod rest;
pub mod server;
pub mod swagger;

pub use server::ApiServer;
