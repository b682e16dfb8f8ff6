//! Data models: purchase-order records, output rows and configuration.

pub mod config;
pub mod order;
